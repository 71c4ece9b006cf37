//! The two lab procedures and what distinguishes them.

use coco_config::Config;

use crate::topology::{CORE_SERVERS, DATALAKE_SERVERS, ServerDefinition};

/// A configurator procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    /// Servers on the core platform.
    Core,
    /// Servers on the data-lake platform.
    DataLake,
}

impl Procedure {
    /// Server the platform session is opened for.
    #[must_use]
    pub const fn session_server(self) -> &'static str {
        match self {
            Self::Core => "cocoMDS2",
            Self::DataLake => "cocoMDS1",
        }
    }

    /// Servers driven by the procedure, in order.
    #[must_use]
    pub fn servers(self) -> &'static [ServerDefinition] {
        match self {
            Self::Core => &CORE_SERVERS,
            Self::DataLake => &DATALAKE_SERVERS,
        }
    }

    /// Platform used when `--url` is absent.
    #[must_use]
    pub fn default_platform_url(self, config: &Config) -> &str {
        match self {
            Self::Core => &config.core_platform_url,
            Self::DataLake => &config.datalake_platform_url,
        }
    }

    /// Line printed when the procedure starts.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Core => "Configuring and activating the core Coco platform",
            Self::DataLake => "Configuring and starting the data lake",
        }
    }
}
