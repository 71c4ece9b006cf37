//! Configuration commands issued against one server's stored configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payloads::{
    Connection, EngineConfig, EventBusConfig, IntegrationConnectorConfig, OpenLineageConfig,
    ServerProperties, ServiceOptions,
};

/// Addresses the stored configuration of one server.
///
/// The admin user and platform may differ from the session's own: a single
/// run configures servers on more than one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTarget {
    /// Server whose configuration document is edited.
    pub server_name: String,
    /// Platform URL root hosting the server.
    pub platform_url: String,
    /// Administrator identity issuing the calls.
    pub admin_user: String,
}

impl ConfigTarget {
    /// Builds a target from its three parts.
    #[must_use]
    pub fn new(
        server_name: impl Into<String>,
        platform_url: impl Into<String>,
        admin_user: impl Into<String>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            platform_url: platform_url.into(),
            admin_user: admin_user.into(),
        }
    }
}

impl fmt::Display for ConfigTarget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}@{} as {}",
            self.server_name, self.platform_url, self.admin_user
        )
    }
}

/// Another server a configured server calls out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteServer {
    /// Partner server name.
    pub server_name: String,
    /// Platform URL root hosting the partner.
    pub platform_url: String,
}

impl RemoteServer {
    /// Builds a partner reference.
    #[must_use]
    pub fn new(server_name: impl Into<String>, platform_url: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            platform_url: platform_url.into(),
        }
    }
}

/// Kind of local metadata repository a server hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LocalRepositoryMode {
    /// Persistent XTDB key-value repository.
    XtdbLocalKv,
    /// Proxy onto a third-party repository through the named connector provider.
    RepositoryProxy {
        /// Fully qualified provider class name.
        connector_provider: String,
    },
}

/// A single edit to a server's stored configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum AdminCommand {
    /// Sets description, organisation, URL root, credentials and page size together.
    SetBasicServerProperties {
        /// Property values.
        properties: ServerProperties,
    },
    /// Sets the server's own user id.
    SetServerUserId {
        /// User id.
        user_id: String,
    },
    /// Sets the server's own password.
    SetServerUserPassword {
        /// Password.
        password: String,
    },
    /// Sets the owning organisation.
    SetOrganizationName {
        /// Organisation name.
        name: String,
    },
    /// Sets the server description.
    SetServerDescription {
        /// Description text.
        description: String,
    },
    /// Sets the platform URL root the server advertises.
    SetServerUrlRoot {
        /// URL root.
        url: String,
    },
    /// Sets the event bus used by cohorts and services.
    SetEventBus {
        /// Kafka properties.
        event_bus: EventBusConfig,
    },
    /// Sets the connection for the server security connector.
    SetServerSecurityConnection {
        /// Security connector connection.
        connection: Connection,
    },
    /// Adds the platform's default audit-log destinations.
    AddDefaultLogDestinations,
    /// Chooses the local repository kind.
    SetLocalRepository {
        /// Repository mode.
        mode: LocalRepositoryMode,
    },
    /// Sets the local metadata collection identifier.
    SetLocalMetadataCollectionId {
        /// Collection identifier.
        id: String,
    },
    /// Sets the local metadata collection display name.
    SetLocalMetadataCollectionName {
        /// Collection name.
        name: String,
    },
    /// Registers the server with a cohort.
    AddCohortRegistration {
        /// Cohort name.
        cohort: String,
    },
    /// Enables an access service with the given options.
    ConfigureAccessService {
        /// Access service URL marker, for example `asset-consumer`.
        service: String,
        /// Service options.
        options: ServiceOptions,
    },
    /// Loads an open metadata archive each time the server starts.
    AddStartupArchiveFile {
        /// Archive path as seen by the platform.
        file: String,
    },
    /// Enables an integration service hosting the given connectors.
    ConfigureIntegrationService {
        /// Integration service URL marker, for example `files-integrator`.
        service: String,
        /// Metadata server the service calls.
        partner: RemoteServer,
        /// Service options.
        options: ServiceOptions,
        /// Connectors run by the service.
        connectors: Vec<IntegrationConnectorConfig>,
    },
    /// Attaches a dynamically configured integration group.
    ConfigureIntegrationGroup {
        /// Metadata server holding the group definition.
        partner: RemoteServer,
        /// Qualified name of the group.
        qualified_name: String,
    },
    /// Names the metadata server that supplies governance engine definitions.
    SetEngineDefinitionsClient {
        /// Metadata server holding the definitions.
        partner: RemoteServer,
    },
    /// Sets the governance engines an engine host runs.
    SetEngineList {
        /// Engines to run.
        engines: Vec<EngineConfig>,
    },
    /// Enables every view service against one metadata server.
    ConfigureAllViewServices {
        /// Metadata server backing the views.
        partner: RemoteServer,
    },
    /// Configures the lineage warehouse services.
    SetLineageWarehouseServices {
        /// Warehouse configuration.
        config: OpenLineageConfig,
    },
}

impl AdminCommand {
    /// Short operation name used in logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::SetBasicServerProperties { .. } => "set-basic-server-properties",
            Self::SetServerUserId { .. } => "set-server-user-id",
            Self::SetServerUserPassword { .. } => "set-server-user-password",
            Self::SetOrganizationName { .. } => "set-organization-name",
            Self::SetServerDescription { .. } => "set-server-description",
            Self::SetServerUrlRoot { .. } => "set-server-url-root",
            Self::SetEventBus { .. } => "set-event-bus",
            Self::SetServerSecurityConnection { .. } => "set-server-security-connection",
            Self::AddDefaultLogDestinations => "add-default-log-destinations",
            Self::SetLocalRepository { .. } => "set-local-repository",
            Self::SetLocalMetadataCollectionId { .. } => "set-local-metadata-collection-id",
            Self::SetLocalMetadataCollectionName { .. } => "set-local-metadata-collection-name",
            Self::AddCohortRegistration { .. } => "add-cohort-registration",
            Self::ConfigureAccessService { .. } => "configure-access-service",
            Self::AddStartupArchiveFile { .. } => "add-startup-archive-file",
            Self::ConfigureIntegrationService { .. } => "configure-integration-service",
            Self::ConfigureIntegrationGroup { .. } => "configure-integration-group",
            Self::SetEngineDefinitionsClient { .. } => "set-engine-definitions-client",
            Self::SetEngineList { .. } => "set-engine-list",
            Self::ConfigureAllViewServices { .. } => "configure-all-view-services",
            Self::SetLineageWarehouseServices { .. } => "set-lineage-warehouse-services",
        }
    }
}
