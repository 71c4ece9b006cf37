//! Maps configuration commands onto admin-services routes and bodies.
//!
//! Every route is relative to
//! `<platform>/open-metadata/admin-services/users/<admin>/servers/<server>`.

use serde::Serialize;
use serde_json::Value;

use crate::command::{AdminCommand, LocalRepositoryMode, RemoteServer};
use crate::error::AdminError;
use crate::payloads::{IntegrationConnectorConfig, ServiceOptions};

/// Body attached to an admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestBody {
    Empty,
    Json(Value),
    Text(String),
}

/// Route, query and body for one configuration command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdminRequest {
    pub(crate) segments: Vec<String>,
    pub(crate) query: Vec<(&'static str, String)>,
    pub(crate) body: RequestBody,
}

impl AdminRequest {
    fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|segment| (*segment).to_owned()).collect(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    fn with_query(mut self, key: &'static str, value: &str) -> Self {
        self.query.push((key, value.to_owned()));
        self
    }

    fn with_json<T: Serialize>(
        mut self,
        operation: &'static str,
        body: &T,
    ) -> Result<Self, AdminError> {
        let value = serde_json::to_value(body)
            .map_err(|source| AdminError::Encode { operation, source })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    fn with_text(mut self, body: &str) -> Self {
        self.body = RequestBody::Text(body.to_owned());
        self
    }
}

#[derive(Serialize)]
#[serde(tag = "class", rename = "IntegrationServiceRequestBody", rename_all = "camelCase")]
struct IntegrationServiceRequestBody<'a> {
    #[serde(rename = "omagserverPlatformRootURL")]
    platform_root_url: &'a str,
    #[serde(rename = "omagserverName")]
    server_name: &'a str,
    integration_service_options: &'a ServiceOptions,
    integration_connector_configs: &'a [IntegrationConnectorConfig],
}

#[derive(Serialize)]
#[serde(tag = "class", rename = "IntegrationGroupConfig", rename_all = "camelCase")]
struct IntegrationGroupRequestBody<'a> {
    #[serde(rename = "omagserverPlatformRootURL")]
    platform_root_url: &'a str,
    #[serde(rename = "omagserverName")]
    server_name: &'a str,
    integration_group_qualified_name: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "class", rename = "OMAGServerClientConfig")]
struct ServerClientConfig<'a> {
    #[serde(rename = "omagserverPlatformRootURL")]
    platform_root_url: &'a str,
    #[serde(rename = "omagserverName")]
    server_name: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "class", rename = "ViewServiceRequestBody")]
struct ViewServiceRequestBody<'a> {
    #[serde(rename = "omagserverPlatformRootURL")]
    platform_root_url: &'a str,
    #[serde(rename = "omagserverName")]
    server_name: &'a str,
}

impl<'a> From<&'a RemoteServer> for ServerClientConfig<'a> {
    fn from(partner: &'a RemoteServer) -> Self {
        Self {
            platform_root_url: &partner.platform_url,
            server_name: &partner.server_name,
        }
    }
}

impl TryFrom<&AdminCommand> for AdminRequest {
    type Error = AdminError;

    fn try_from(command: &AdminCommand) -> Result<Self, Self::Error> {
        let operation = command.operation();
        let request = match command {
            AdminCommand::SetBasicServerProperties { properties } => {
                Self::new(&["server-properties"]).with_json(operation, properties)?
            }
            AdminCommand::SetServerUserId { user_id } => {
                Self::new(&["server-user-id"]).with_query("id", user_id)
            }
            AdminCommand::SetServerUserPassword { password } => {
                Self::new(&["server-user-password"]).with_query("password", password)
            }
            AdminCommand::SetOrganizationName { name } => {
                Self::new(&["organization-name"]).with_query("name", name)
            }
            AdminCommand::SetServerDescription { description } => {
                Self::new(&["server-description"]).with_query("description", description)
            }
            AdminCommand::SetServerUrlRoot { url } => {
                Self::new(&["server-url-root"]).with_query("url", url)
            }
            AdminCommand::SetEventBus { event_bus } => {
                Self::new(&["event-bus"]).with_json(operation, event_bus)?
            }
            AdminCommand::SetServerSecurityConnection { connection } => {
                Self::new(&["security", "connection"]).with_json(operation, connection)?
            }
            AdminCommand::AddDefaultLogDestinations => {
                Self::new(&["audit-log-destinations", "default"])
            }
            AdminCommand::SetLocalRepository { mode } => local_repository_request(mode),
            AdminCommand::SetLocalMetadataCollectionId { id } => {
                Self::new(&["local-repository", "metadata-collection-id"]).with_text(id)
            }
            AdminCommand::SetLocalMetadataCollectionName { name } => {
                Self::new(&["local-repository", "metadata-collection-name", name.as_str()])
            }
            AdminCommand::AddCohortRegistration { cohort } => {
                Self::new(&["cohorts", cohort.as_str()])
            }
            AdminCommand::ConfigureAccessService { service, options } => {
                Self::new(&["access-services", service.as_str()]).with_json(operation, options)?
            }
            AdminCommand::AddStartupArchiveFile { file } => {
                Self::new(&["open-metadata-archives", "file"]).with_text(file)
            }
            AdminCommand::ConfigureIntegrationService {
                service,
                partner,
                options,
                connectors,
            } => Self::new(&["integration-services", service.as_str()]).with_json(
                operation,
                &IntegrationServiceRequestBody {
                    platform_root_url: &partner.platform_url,
                    server_name: &partner.server_name,
                    integration_service_options: options,
                    integration_connector_configs: connectors,
                },
            )?,
            AdminCommand::ConfigureIntegrationGroup {
                partner,
                qualified_name,
            } => Self::new(&["integration-groups", "configuration"]).with_json(
                operation,
                &IntegrationGroupRequestBody {
                    platform_root_url: &partner.platform_url,
                    server_name: &partner.server_name,
                    integration_group_qualified_name: qualified_name,
                },
            )?,
            AdminCommand::SetEngineDefinitionsClient { partner } => {
                Self::new(&["engine-definitions", "client-config"])
                    .with_json(operation, &ServerClientConfig::from(partner))?
            }
            AdminCommand::SetEngineList { engines } => {
                Self::new(&["engine-list"]).with_json(operation, engines)?
            }
            AdminCommand::ConfigureAllViewServices { partner } => Self::new(&["view-services"])
                .with_json(
                    operation,
                    &ViewServiceRequestBody {
                        platform_root_url: &partner.platform_url,
                        server_name: &partner.server_name,
                    },
                )?,
            AdminCommand::SetLineageWarehouseServices { config } => {
                Self::new(&["lineage-warehouse", "configuration"]).with_json(operation, config)?
            }
        };
        Ok(request)
    }
}

fn local_repository_request(mode: &LocalRepositoryMode) -> AdminRequest {
    match mode {
        LocalRepositoryMode::XtdbLocalKv => {
            AdminRequest::new(&["local-repository", "mode", "xtdb-local-kv-repository"])
        }
        LocalRepositoryMode::RepositoryProxy { connector_provider } => AdminRequest::new(&[
            "local-repository",
            "mode",
            "repository-proxy",
            "details",
        ])
        .with_query("connectorProvider", connector_provider),
    }
}
