//! Shared configuration for the Coco Pharmaceuticals lab configurators.
//!
//! Values are layered by `ortho-config`: built-in defaults first, then the
//! `coco-labs.toml` file (or the file named by `--config-path` /
//! `COCO_CONFIG_PATH`), then `COCO_*` environment variables, then CLI flags.
//! Both configurator binaries load the same [`Config`], so a single file can
//! describe the whole lab deployment.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_ADMIN_USER_ID, DEFAULT_COCO_COHORT, DEFAULT_CORE_PLATFORM_URL,
    DEFAULT_DATALAKE_PLATFORM_URL, DEFAULT_DEV_COHORT, DEFAULT_EVENT_BUS_BOOTSTRAP,
    DEFAULT_FILE_SYSTEM_ROOT, DEFAULT_IOT_COHORT, DEFAULT_LOG_FILTER, DEFAULT_MAX_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS, default_accept_invalid_certs, default_admin_user_id,
    default_coco_cohort, default_core_platform_url, default_datalake_platform_url,
    default_dev_cohort, default_event_bus_bootstrap, default_file_system_root,
    default_iot_cohort, default_log_filter, default_log_filter_string, default_log_format,
    default_max_page_size, default_request_timeout_secs,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for a lab configurator run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "COCO",
    discovery(
        app_name = "coco-labs",
        env_var = "COCO_CONFIG_PATH",
        config_file_name = "coco-labs.toml",
        dotfile_name = ".coco-labs.toml",
        config_cli_long = "config-path",
        config_cli_visible = true,
    )
)]
pub struct Config {
    /// `tracing` filter directive applied to log output.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log lines.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Base URL of the core platform.
    #[ortho_config(default = default_core_platform_url())]
    pub core_platform_url: String,
    /// Base URL of the data-lake platform.
    #[ortho_config(default = default_datalake_platform_url())]
    pub datalake_platform_url: String,
    /// Administrator identity used when `--userid` is absent.
    #[ortho_config(default = default_admin_user_id())]
    pub admin_user_id: String,
    /// Cohort shared by every Coco repository.
    #[ortho_config(default = default_coco_cohort())]
    pub coco_cohort: String,
    /// Development cohort.
    #[ortho_config(default = default_dev_cohort())]
    pub dev_cohort: String,
    /// IoT cohort.
    #[ortho_config(default = default_iot_cohort())]
    pub iot_cohort: String,
    /// Kafka bootstrap address for every event bus.
    #[ortho_config(default = default_event_bus_bootstrap())]
    pub event_bus_bootstrap: String,
    /// Root of the landing-area folders.
    #[ortho_config(default = default_file_system_root())]
    pub file_system_root: String,
    /// Maximum page size advertised by configured servers.
    #[ortho_config(default = default_max_page_size())]
    pub max_page_size: u32,
    /// Per-request timeout for admin calls, in seconds.
    #[ortho_config(default = default_request_timeout_secs())]
    pub request_timeout_secs: u64,
    /// Skip TLS certificate verification for the self-signed lab platforms.
    #[ortho_config(default = default_accept_invalid_certs())]
    pub accept_invalid_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            core_platform_url: default_core_platform_url(),
            datalake_platform_url: default_datalake_platform_url(),
            admin_user_id: default_admin_user_id(),
            coco_cohort: default_coco_cohort(),
            dev_cohort: default_dev_cohort(),
            iot_cohort: default_iot_cohort(),
            event_bus_bootstrap: default_event_bus_bootstrap(),
            file_system_root: default_file_system_root(),
            max_page_size: default_max_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}

impl Config {
    /// Filter directive for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Selected log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks values that `ortho-config` cannot validate on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a platform URL does not parse as an
    /// absolute HTTP(S) URL, when an identity field is blank, or when the
    /// request timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_platform_url("core_platform_url", &self.core_platform_url)?;
        parse_platform_url("datalake_platform_url", &self.datalake_platform_url)?;
        for (field, value) in [
            ("admin_user_id", &self.admin_user_id),
            ("coco_cohort", &self.coco_cohort),
            ("dev_cohort", &self.dev_cohort),
            ("iot_cohort", &self.iot_cohort),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Blank { field });
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "request_timeout_secs",
            });
        }
        Ok(())
    }
}

/// Parses a platform base URL, rejecting anything other than HTTP(S).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] or [`ConfigError::UnsupportedScheme`].
pub fn parse_platform_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_owned(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedScheme {
            field,
            scheme: scheme.to_owned(),
        }),
    }
}

/// Errors raised while validating a loaded [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A platform URL failed to parse.
    #[error("{field} '{value}' is not a valid URL: {source}")]
    InvalidUrl {
        /// Configuration field holding the value.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A platform URL used a scheme other than HTTP(S).
    #[error("{field} must use http or https, found '{scheme}'")]
    UnsupportedScheme {
        /// Configuration field holding the value.
        field: &'static str,
        /// Scheme found in the value.
        scheme: String,
    },
    /// A required identity value was empty.
    #[error("{field} must not be blank")]
    Blank {
        /// Configuration field holding the value.
        field: &'static str,
    },
    /// A timeout of zero would fail every request.
    #[error("{field} must be at least one second")]
    ZeroTimeout {
        /// Configuration field holding the value.
        field: &'static str,
    },
}
