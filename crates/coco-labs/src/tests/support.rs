//! Shared fakes for configurator tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use coco_admin::{Activation, AdminCommand, AdminError, ConfigTarget, PlatformAdmin};
use coco_config::Config;

use crate::config::ConfigLoader;
use crate::context::LabContext;
use crate::errors::AppError;
use crate::report::RunReporter;
use crate::{Procedure, ServerOutcome};

/// A call observed by [`RecordingAdmin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Call {
    IsConfigured(String),
    ActivateIfDown(String),
    ActivateStored(String),
    Apply {
        server: String,
        operation: &'static str,
    },
    Close,
}

/// In-memory platform that records every call.
#[derive(Debug, Default)]
pub(super) struct RecordingAdmin {
    configured: HashSet<String>,
    failing_queries: HashSet<String>,
    failing_edits: HashSet<String>,
    calls: RefCell<Vec<Call>>,
    applied: RefCell<Vec<(ConfigTarget, AdminCommand)>>,
}

impl RecordingAdmin {
    pub(super) fn with_configured<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            configured: names.into_iter().map(str::to_owned).collect(),
            ..Self::default()
        }
    }

    pub(super) fn mark_configured(&mut self, server: &str) {
        self.configured.insert(server.to_owned());
    }

    pub(super) fn fail_query_for(&mut self, server: &str) {
        self.failing_queries.insert(server.to_owned());
    }

    pub(super) fn fail_edits_for(&mut self, server: &str) {
        self.failing_edits.insert(server.to_owned());
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(super) fn calls_for(&self, server: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| match call {
                Call::IsConfigured(name)
                | Call::ActivateIfDown(name)
                | Call::ActivateStored(name)
                | Call::Apply { server: name, .. } => name == server,
                Call::Close => false,
            })
            .collect()
    }

    pub(super) fn close_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Close))
            .count()
    }

    pub(super) fn applied(&self) -> Vec<(ConfigTarget, AdminCommand)> {
        self.applied.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn rejected(server: &str) -> AdminError {
    AdminError::Status {
        endpoint: format!("https://platform.test/servers/{server}"),
        status: 500,
    }
}

impl PlatformAdmin for RecordingAdmin {
    fn is_server_configured(&self, server: &str) -> Result<bool, AdminError> {
        self.record(Call::IsConfigured(server.to_owned()));
        if self.failing_queries.contains(server) {
            return Err(rejected(server));
        }
        Ok(self.configured.contains(server))
    }

    fn activate_server_if_down(&self, server: &str) -> Result<Activation, AdminError> {
        self.record(Call::ActivateIfDown(server.to_owned()));
        Ok(Activation::AlreadyActive)
    }

    fn activate_server_stored_config(&self, server: &str) -> Result<(), AdminError> {
        self.record(Call::ActivateStored(server.to_owned()));
        Ok(())
    }

    fn apply(&self, target: &ConfigTarget, command: &AdminCommand) -> Result<(), AdminError> {
        self.record(Call::Apply {
            server: target.server_name.clone(),
            operation: command.operation(),
        });
        if self.failing_edits.contains(&target.server_name) {
            return Err(rejected(&target.server_name));
        }
        self.applied
            .borrow_mut()
            .push((target.clone(), command.clone()));
        Ok(())
    }

    fn close_session(&self) {
        self.record(Call::Close);
    }
}

/// Reporter that keeps event names for assertions.
#[derive(Debug, Default)]
pub(super) struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub(super) fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: String) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl RunReporter for RecordingReporter {
    fn server_reactivating(&self, server: &str) {
        self.push(format!("reactivating {server}"));
    }

    fn server_configuring(&self, server: &str, steps: usize) {
        self.push(format!("configuring {server} ({steps} steps)"));
    }

    fn server_activated(&self, server: &str, activation: Activation) {
        self.push(format!("activated {server} ({activation:?})"));
    }

    fn server_failed(&self, server: &str, _report: &str) {
        self.push(format!("failed {server}"));
    }

    fn session_closed(&self, server: &str) {
        self.push(format!("closed {server}"));
    }
}

/// Loader returning a fixed configuration.
pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Context a procedure builds from default configuration and no overrides.
pub(super) fn default_context(procedure: Procedure) -> LabContext {
    let config = Config::default();
    let platform = procedure.default_platform_url(&config).to_owned();
    let admin = config.admin_user_id.clone();
    LabContext::new(&config, platform, admin)
}

pub(super) fn outcome_label(outcome: &ServerOutcome) -> &'static str {
    match outcome {
        ServerOutcome::Reactivated(_) => "reactivated",
        ServerOutcome::Configured => "configured",
        ServerOutcome::Failed(_) => "failed",
    }
}

pub(super) fn read_fixture(name: &str) -> Result<String> {
    let normalized = name.trim().trim_matches('"');
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("golden");
    path.push(normalized);
    fs::read_to_string(&path).with_context(|| format!("read fixture at {}", path.display()))
}
