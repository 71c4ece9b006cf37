//! Structured reporting for configurator lifecycle events.

use coco_admin::Activation;

/// Observer trait used to surface per-server progress to telemetry sinks.
pub trait RunReporter: Send + Sync {
    /// Invoked when a configured server is about to be reactivated.
    fn server_reactivating(&self, server: &str);

    /// Invoked before the steps of a fresh configuration are applied.
    fn server_configuring(&self, server: &str, steps: usize);

    /// Invoked once a server is known to be running.
    fn server_activated(&self, server: &str, activation: Activation);

    /// Invoked when any call for a server fails. `report` is the rendered
    /// failure.
    fn server_failed(&self, server: &str, report: &str);

    /// Invoked after the platform session has been released.
    fn session_closed(&self, server: &str);
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredRunReporter;

impl StructuredRunReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RunReporter for StructuredRunReporter {
    fn server_reactivating(&self, server: &str) {
        tracing::info!(
            target: "coco_labs::run",
            event = "server_reactivating",
            server,
            "server is configured; activating if down"
        );
    }

    fn server_configuring(&self, server: &str, steps: usize) {
        tracing::info!(
            target: "coco_labs::run",
            event = "server_configuring",
            server,
            steps,
            "configuring server"
        );
    }

    fn server_activated(&self, server: &str, activation: Activation) {
        tracing::info!(
            target: "coco_labs::run",
            event = "server_activated",
            server,
            activation = ?activation,
            "server active"
        );
    }

    fn server_failed(&self, server: &str, report: &str) {
        tracing::error!(
            target: "coco_labs::run",
            event = "server_failed",
            server,
            error = %report,
            "server could not be brought up"
        );
    }

    fn session_closed(&self, server: &str) {
        tracing::info!(
            target: "coco_labs::run",
            event = "session_closed",
            server,
            "platform session closed"
        );
    }
}
