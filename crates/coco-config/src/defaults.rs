//! Built-in values for the Coco Pharmaceuticals lab deployment.
//!
//! These mirror the docker-compose lab: both platforms listen on the docker
//! host with self-signed certificates, and every server shares one Kafka
//! broker for its event bus.

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Base URL of the core platform hosting `cocoMDS2`, `cocoMDS5` and `cocoMDS6`.
pub const DEFAULT_CORE_PLATFORM_URL: &str = "https://host.docker.internal:7443";

/// Base URL of the data-lake platform hosting `cocoMDS1` and its satellites.
pub const DEFAULT_DATALAKE_PLATFORM_URL: &str = "https://host.docker.internal:7444";

/// Administrator identity used for admin-services calls.
pub const DEFAULT_ADMIN_USER_ID: &str = "garygeeke";

/// Cohort shared by every Coco metadata repository.
pub const DEFAULT_COCO_COHORT: &str = "cocoCohort";

/// Cohort joined by repositories that serve the development teams.
pub const DEFAULT_DEV_COHORT: &str = "devCohort";

/// Cohort joined by repositories that serve the manufacturing sensors.
pub const DEFAULT_IOT_COHORT: &str = "iotCohort";

/// Kafka bootstrap address written into every event-bus configuration.
pub const DEFAULT_EVENT_BUS_BOOTSTRAP: &str = "host.docker.internal:9192";

/// Root of the landing-area folders monitored by the integration daemons.
pub const DEFAULT_FILE_SYSTEM_ROOT: &str = "data/coco-data-lake";

/// Maximum page size advertised in each server's basic properties.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 600;

/// Per-request timeout applied by the admin client.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log filter expression used by the binaries.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}

/// Owned core platform URL.
#[must_use]
pub fn default_core_platform_url() -> String {
    DEFAULT_CORE_PLATFORM_URL.to_owned()
}

/// Owned data-lake platform URL.
#[must_use]
pub fn default_datalake_platform_url() -> String {
    DEFAULT_DATALAKE_PLATFORM_URL.to_owned()
}

/// Owned administrator identity.
#[must_use]
pub fn default_admin_user_id() -> String {
    DEFAULT_ADMIN_USER_ID.to_owned()
}

/// Owned Coco cohort name.
#[must_use]
pub fn default_coco_cohort() -> String {
    DEFAULT_COCO_COHORT.to_owned()
}

/// Owned development cohort name.
#[must_use]
pub fn default_dev_cohort() -> String {
    DEFAULT_DEV_COHORT.to_owned()
}

/// Owned IoT cohort name.
#[must_use]
pub fn default_iot_cohort() -> String {
    DEFAULT_IOT_COHORT.to_owned()
}

/// Owned Kafka bootstrap address.
#[must_use]
pub fn default_event_bus_bootstrap() -> String {
    DEFAULT_EVENT_BUS_BOOTSTRAP.to_owned()
}

/// Owned landing-area root.
#[must_use]
pub fn default_file_system_root() -> String {
    DEFAULT_FILE_SYSTEM_ROOT.to_owned()
}

/// Default maximum page size.
#[must_use]
pub const fn default_max_page_size() -> u32 {
    DEFAULT_MAX_PAGE_SIZE
}

/// Default request timeout in seconds.
#[must_use]
pub const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Lab platforms use self-signed certificates, so verification is off by default.
#[must_use]
pub const fn default_accept_invalid_certs() -> bool {
    true
}
