//! Lab-wide values shared by every server definition.

use coco_admin::payloads::{EventBusConfig, ServiceOptions};
use coco_config::Config;
use serde_json::Value;

/// Organisation written into every server's properties.
pub const ORGANIZATION_NAME: &str = "Coco Pharmaceuticals";

/// Resolved values a configuration plan is built from.
///
/// The session platform and administrator come from the command line; the
/// rest comes from the layered [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabContext {
    /// Platform the session was opened against.
    pub session_platform_url: String,
    /// Administrator the session acts as.
    pub session_admin_user: String,
    /// Core platform root from configuration.
    pub core_platform_url: String,
    /// Data-lake platform root from configuration.
    pub datalake_platform_url: String,
    /// Configured administrator, used by servers pinned to it.
    pub configured_admin_user: String,
    /// Cohort every Coco repository joins.
    pub coco_cohort: String,
    /// Development cohort.
    pub dev_cohort: String,
    /// IoT cohort.
    pub iot_cohort: String,
    /// Kafka bootstrap address.
    pub event_bus_bootstrap: String,
    /// Root of the landing-area folders.
    pub file_system_root: String,
    /// Page size advertised in basic properties.
    pub max_page_size: u32,
}

impl LabContext {
    /// Builds the context for a session against `platform_url` as `admin_user`.
    #[must_use]
    pub fn new(config: &Config, platform_url: String, admin_user: String) -> Self {
        Self {
            session_platform_url: platform_url,
            session_admin_user: admin_user,
            core_platform_url: config.core_platform_url.clone(),
            datalake_platform_url: config.datalake_platform_url.clone(),
            configured_admin_user: config.admin_user_id.clone(),
            coco_cohort: config.coco_cohort.clone(),
            dev_cohort: config.dev_cohort.clone(),
            iot_cohort: config.iot_cohort.clone(),
            event_bus_bootstrap: config.event_bus_bootstrap.clone(),
            file_system_root: config.file_system_root.clone(),
            max_page_size: config.max_page_size,
        }
    }

    /// Event bus pointing at the lab's Kafka broker.
    #[must_use]
    pub fn event_bus(&self) -> EventBusConfig {
        EventBusConfig::kafka(&self.event_bus_bootstrap)
    }

    /// Joins `relative` onto the landing-area root.
    #[must_use]
    pub fn landing_path(&self, relative: &str) -> String {
        format!(
            "{}/{}",
            self.file_system_root.trim_end_matches('/'),
            relative.trim_start_matches('/')
        )
    }

    /// Kafka client properties carried inside topic connections.
    #[must_use]
    pub fn kafka_client_properties(&self) -> ServiceOptions {
        let bootstrap = serde_json::json!({ "bootstrap.servers": self.event_bus_bootstrap });
        ServiceOptions::from([
            (String::from("producer"), bootstrap.clone()),
            (String::from("consumer"), bootstrap),
        ])
    }
}

/// Options granting a service the `KarmaPointPlateau` threshold used across the lab.
#[must_use]
pub fn karma_point_options() -> ServiceOptions {
    ServiceOptions::from([(
        String::from("KarmaPointPlateau"),
        Value::String(String::from("500")),
    )])
}
