//! Error types for the configurator runtime.

use std::sync::Arc;

use coco_admin::AdminError;
use coco_config::ConfigError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures that stop a configurator before or while opening its session.
///
/// Per-server failures are not errors at this level; they are reported and
/// the batch continues.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to open platform session: {0}")]
    Session(#[source] AdminError),
}
