//! Declarative description of the lab's servers.
//!
//! Each [`ServerDefinition`] names a server, where its configuration lives,
//! and a role-specific profile. [`ServerDefinition::plan`] expands the profile
//! into the ordered [`ConfigPlan`] applied when the server has no stored
//! configuration yet.

use coco_admin::payloads::{
    Connection, EngineConfig, IntegrationConnectorConfig, OpenLineageConfig, ServerProperties,
    ServiceOptions,
};
use coco_admin::{AdminCommand, ConfigTarget, LocalRepositoryMode, RemoteServer};
use serde::Serialize;
use serde_json::Value;

use crate::context::{LabContext, ORGANIZATION_NAME, karma_point_options};

mod core_platform;
mod datalake;

pub use self::core_platform::CORE_SERVERS;
pub use self::datalake::DATALAKE_SERVERS;

const SECURITY_PROVIDER: &str =
    "org.odpi.openmetadata.metadatasecurity.samples.CocoPharmaServerSecurityProvider";
const READ_ONLY_PROXY_PROVIDER: &str = "org.odpi.openmetadata.adapters.repositoryservices.readonly.repositoryconnector.ReadOnlyOMRSRepositoryConnectorProvider";
const COLLECTION_ID_SUFFIX: &str = "e915f2fa-aa3g-4396-8bde-bcd65e642b1d";

/// Selects a platform URL root from the [`LabContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSelector {
    /// The platform the session was opened against.
    Session,
    /// The configured core platform.
    Core,
    /// The configured data-lake platform.
    DataLake,
}

impl PlatformSelector {
    /// Resolves the selector against `context`.
    #[must_use]
    pub fn resolve(self, context: &LabContext) -> &str {
        match self {
            Self::Session => &context.session_platform_url,
            Self::Core => &context.core_platform_url,
            Self::DataLake => &context.datalake_platform_url,
        }
    }
}

/// Selects the administrator issuing configuration calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSelector {
    /// The administrator given on the command line.
    Session,
    /// The configured administrator, whatever the command line says.
    Configured,
}

/// Whose identity a server runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    /// `<name>npa` with password `<name>passw0rd`.
    Own,
    /// The identity of another named server.
    SharedWith(&'static str),
}

impl Credentials {
    fn resolve(self, server: &str) -> (String, String) {
        let owner = match self {
            Self::Own => server,
            Self::SharedWith(other) => other,
        };
        (format!("{owner}npa"), format!("{owner}passw0rd"))
    }
}

/// Cohort a repository registers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortRef {
    /// The shared Coco cohort.
    Coco,
    /// The development cohort.
    Dev,
    /// The IoT cohort.
    Iot,
}

impl CohortRef {
    fn resolve(self, context: &LabContext) -> &str {
        match self {
            Self::Coco => &context.coco_cohort,
            Self::Dev => &context.dev_cohort,
            Self::Iot => &context.iot_cohort,
        }
    }
}

/// Another server a configured server calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partner {
    /// Partner server name.
    pub server: &'static str,
    /// Platform hosting the partner.
    pub platform: PlatformSelector,
}

impl Partner {
    fn resolve(self, context: &LabContext) -> RemoteServer {
        RemoteServer::new(self.server, self.platform.resolve(context))
    }
}

/// Governance zones an access service is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneOptions {
    /// Zones the service may see.
    pub supported: &'static [&'static str],
    /// Zones assigned to new assets.
    pub default: &'static [&'static str],
    /// Zones assigned when an asset is published.
    pub publish: &'static [&'static str],
}

/// Options passed when enabling an access service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsSpec {
    /// No options.
    Empty,
    /// The lab's karma-point plateau.
    KarmaPoints,
    /// Zone restrictions.
    Zones(ZoneOptions),
}

impl OptionsSpec {
    fn resolve(self) -> ServiceOptions {
        match self {
            Self::Empty => ServiceOptions::new(),
            Self::KarmaPoints => karma_point_options(),
            Self::Zones(zones) => [
                ("SupportedZones", zones.supported),
                ("DefaultZones", zones.default),
                ("PublishZones", zones.publish),
            ]
            .into_iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(key, list)| {
                let values = list.iter().map(|zone| Value::from(*zone)).collect();
                (key.to_owned(), Value::Array(values))
            })
            .collect(),
        }
    }
}

/// An access service enabled on a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessService {
    /// URL marker of the service.
    pub name: &'static str,
    /// Options supplied with it.
    pub options: OptionsSpec,
}

/// Kind of local repository a metadata server hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// Persistent XTDB key-value store.
    XtdbLocalKv,
    /// Read-only proxy onto content loaded from archives.
    ReadOnlyProxy,
}

/// Local repository and the collection it publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalRepository {
    /// Repository kind.
    pub kind: RepositoryKind,
    /// Metadata collection display name.
    pub collection_name: &'static str,
}

/// Metadata access server or repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryProfile {
    /// Server description.
    pub description: &'static str,
    /// Local repository; absent for access-only servers.
    pub repository: Option<LocalRepository>,
    /// Cohorts joined, in order.
    pub cohorts: &'static [CohortRef],
    /// Access services enabled, in order.
    pub access_services: &'static [AccessService],
    /// Archive loaded at every start.
    pub startup_archive: Option<&'static str>,
}

/// Integration daemon hosting one integration service.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationDaemonProfile {
    /// Server description.
    pub description: &'static str,
    /// Integration service URL marker.
    pub service: &'static str,
    /// Metadata server the service and group read from.
    pub partner: Partner,
    /// Builds the connector list.
    pub connectors: fn(&LabContext) -> Vec<IntegrationConnectorConfig>,
    /// Integration group to run, if any.
    pub group: Option<&'static str>,
}

/// Engine host running governance engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineHostProfile {
    /// Server description.
    pub description: &'static str,
    /// Server providing engine definitions.
    pub partner: Partner,
    /// Engine qualified names.
    pub engines: &'static [&'static str],
    /// Identity every engine runs under.
    pub engine_user: &'static str,
}

/// View server exposing every view service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewServerProfile {
    /// Server description.
    pub description: &'static str,
    /// Metadata server behind the views.
    pub partner: Partner,
}

/// Lineage warehouse.
#[derive(Debug, Clone, Copy)]
pub struct LineageWarehouseProfile {
    /// Server description.
    pub description: &'static str,
    /// Builds the lineage warehouse configuration.
    pub config: fn(&LabContext) -> OpenLineageConfig,
}

/// Role-specific body of a [`ServerDefinition`].
#[derive(Debug, Clone, Copy)]
pub enum ServerRole {
    /// Metadata repository or access server.
    MetadataRepository(RepositoryProfile),
    /// Integration daemon.
    IntegrationDaemon(IntegrationDaemonProfile),
    /// Governance engine host.
    EngineHost(EngineHostProfile),
    /// View server.
    ViewServer(ViewServerProfile),
    /// Lineage warehouse.
    LineageWarehouse(LineageWarehouseProfile),
}

/// One server in the lab topology.
#[derive(Debug, Clone, Copy)]
pub struct ServerDefinition {
    /// Server name.
    pub name: &'static str,
    /// Platform holding the stored configuration.
    pub platform: PlatformSelector,
    /// Administrator editing the stored configuration.
    pub admin: AdminSelector,
    /// Identity the server runs under.
    pub credentials: Credentials,
    /// Role-specific body.
    pub role: ServerRole,
}

/// Ordered configuration edits for one server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigPlan {
    /// Configuration document being edited.
    pub target: ConfigTarget,
    /// Edits, applied in order.
    pub steps: Vec<AdminCommand>,
}

impl ServerDefinition {
    /// Address of this server's stored configuration.
    #[must_use]
    pub fn target(&self, context: &LabContext) -> ConfigTarget {
        let admin = match self.admin {
            AdminSelector::Session => &context.session_admin_user,
            AdminSelector::Configured => &context.configured_admin_user,
        };
        ConfigTarget::new(self.name, self.platform.resolve(context), admin.as_str())
    }

    /// Expands the definition into its configuration plan.
    #[must_use]
    pub fn plan(&self, context: &LabContext) -> ConfigPlan {
        let target = self.target(context);
        let mut builder = PlanBuilder::new(self, &target, context);
        match self.role {
            ServerRole::MetadataRepository(profile) => builder.repository(&profile),
            ServerRole::IntegrationDaemon(profile) => builder.integration_daemon(&profile),
            ServerRole::EngineHost(profile) => builder.engine_host(&profile),
            ServerRole::ViewServer(profile) => builder.view_server(&profile),
            ServerRole::LineageWarehouse(profile) => builder.lineage_warehouse(&profile),
        }
        let steps = builder.steps;
        ConfigPlan { target, steps }
    }
}

struct PlanBuilder<'a> {
    server: &'a ServerDefinition,
    platform_url: &'a str,
    context: &'a LabContext,
    steps: Vec<AdminCommand>,
}

impl<'a> PlanBuilder<'a> {
    fn new(server: &'a ServerDefinition, target: &'a ConfigTarget, context: &'a LabContext) -> Self {
        Self {
            server,
            platform_url: &target.platform_url,
            context,
            steps: Vec::new(),
        }
    }

    fn push(&mut self, command: AdminCommand) {
        self.steps.push(command);
    }

    fn basic_properties(&mut self, description: &str) {
        let (user_id, password) = self.server.credentials.resolve(self.server.name);
        self.push(AdminCommand::SetBasicServerProperties {
            properties: ServerProperties {
                local_server_description: description.to_owned(),
                organization_name: ORGANIZATION_NAME.to_owned(),
                local_server_url: self.platform_url.to_owned(),
                local_server_user_id: user_id,
                local_server_password: password,
                max_page_size: self.context.max_page_size,
            },
        });
    }

    fn event_bus(&mut self) {
        self.push(AdminCommand::SetEventBus {
            event_bus: self.context.event_bus(),
        });
    }

    fn security(&mut self) {
        self.push(AdminCommand::SetServerSecurityConnection {
            connection: Connection::for_provider(SECURITY_PROVIDER),
        });
    }

    fn log_destinations(&mut self) {
        self.push(AdminCommand::AddDefaultLogDestinations);
    }

    fn repository(&mut self, profile: &RepositoryProfile) {
        self.basic_properties(profile.description);
        self.event_bus();
        self.security();
        self.log_destinations();
        if let Some(repository) = profile.repository {
            let mode = match repository.kind {
                RepositoryKind::XtdbLocalKv => LocalRepositoryMode::XtdbLocalKv,
                RepositoryKind::ReadOnlyProxy => LocalRepositoryMode::RepositoryProxy {
                    connector_provider: READ_ONLY_PROXY_PROVIDER.to_owned(),
                },
            };
            self.push(AdminCommand::SetLocalRepository { mode });
            self.push(AdminCommand::SetLocalMetadataCollectionId {
                id: format!("{}-{COLLECTION_ID_SUFFIX}", self.server.name),
            });
            self.push(AdminCommand::SetLocalMetadataCollectionName {
                name: repository.collection_name.to_owned(),
            });
        }
        for cohort in profile.cohorts {
            self.push(AdminCommand::AddCohortRegistration {
                cohort: cohort.resolve(self.context).to_owned(),
            });
        }
        for service in profile.access_services {
            self.push(AdminCommand::ConfigureAccessService {
                service: service.name.to_owned(),
                options: service.options.resolve(),
            });
        }
        if let Some(file) = profile.startup_archive {
            self.push(AdminCommand::AddStartupArchiveFile {
                file: file.to_owned(),
            });
        }
    }

    fn integration_daemon(&mut self, profile: &IntegrationDaemonProfile) {
        self.basic_properties(profile.description);
        self.security();
        self.log_destinations();
        let partner = profile.partner.resolve(self.context);
        self.push(AdminCommand::ConfigureIntegrationService {
            service: profile.service.to_owned(),
            partner: partner.clone(),
            options: ServiceOptions::new(),
            connectors: (profile.connectors)(self.context),
        });
        if let Some(group) = profile.group {
            self.push(AdminCommand::ConfigureIntegrationGroup {
                partner,
                qualified_name: group.to_owned(),
            });
        }
    }

    fn engine_host(&mut self, profile: &EngineHostProfile) {
        self.basic_properties(profile.description);
        self.security();
        self.push(AdminCommand::SetEngineDefinitionsClient {
            partner: profile.partner.resolve(self.context),
        });
        self.push(AdminCommand::SetEngineList {
            engines: profile
                .engines
                .iter()
                .map(|engine| EngineConfig {
                    engine_qualified_name: (*engine).to_owned(),
                    engine_user_id: profile.engine_user.to_owned(),
                })
                .collect(),
        });
    }

    fn view_server(&mut self, profile: &ViewServerProfile) {
        let (user_id, password) = self.server.credentials.resolve(self.server.name);
        self.push(AdminCommand::SetServerUserId { user_id });
        self.push(AdminCommand::SetServerUserPassword { password });
        self.push(AdminCommand::SetOrganizationName {
            name: ORGANIZATION_NAME.to_owned(),
        });
        self.push(AdminCommand::SetServerDescription {
            description: profile.description.to_owned(),
        });
        self.push(AdminCommand::SetServerUrlRoot {
            url: self.platform_url.to_owned(),
        });
        self.event_bus();
        self.security();
        self.log_destinations();
        self.push(AdminCommand::ConfigureAllViewServices {
            partner: profile.partner.resolve(self.context),
        });
    }

    fn lineage_warehouse(&mut self, profile: &LineageWarehouseProfile) {
        self.push(AdminCommand::SetServerDescription {
            description: profile.description.to_owned(),
        });
        self.push(AdminCommand::SetServerUrlRoot {
            url: self.platform_url.to_owned(),
        });
        self.event_bus();
        self.log_destinations();
        self.push(AdminCommand::SetLineageWarehouseServices {
            config: (profile.config)(self.context),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coco_config::Config;
    use serde_json::json;

    fn context() -> LabContext {
        LabContext::new(
            &Config::default(),
            String::from("https://session:9443"),
            String::from("erinoverview"),
        )
    }

    #[test]
    fn zone_options_skip_empty_lists() {
        let options = OptionsSpec::Zones(ZoneOptions {
            supported: &["data-lake"],
            default: &[],
            publish: &[],
        })
        .resolve();
        assert_eq!(
            serde_json::to_value(options).expect("serialise options"),
            json!({"SupportedZones": ["data-lake"]})
        );
    }

    #[test]
    fn shared_credentials_use_the_other_servers_identity() {
        let (user, password) = Credentials::SharedWith("exchangeDL01").resolve("monitorGov01");
        assert_eq!(user, "exchangeDL01npa");
        assert_eq!(password, "exchangeDL01passw0rd");
    }

    #[test]
    fn configured_admin_overrides_the_session_admin() {
        let server = ServerDefinition {
            name: "cocoMDS6",
            platform: PlatformSelector::Core,
            admin: AdminSelector::Configured,
            credentials: Credentials::Own,
            role: ServerRole::ViewServer(ViewServerProfile {
                description: "test",
                partner: Partner {
                    server: "cocoMDS1",
                    platform: PlatformSelector::Session,
                },
            }),
        };
        let context = context();
        let target = server.target(&context);
        assert_eq!(target.admin_user, context.configured_admin_user);
        assert_eq!(target.platform_url, context.core_platform_url);
    }

    #[test]
    fn server_names_are_unique_per_procedure() {
        for table in [&CORE_SERVERS[..], &DATALAKE_SERVERS[..]] {
            let mut names: Vec<&str> = table.iter().map(|server| server.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), table.len());
        }
    }

    #[test]
    fn every_repository_registers_with_the_coco_cohort() {
        let context = context();
        for server in CORE_SERVERS.iter().chain(DATALAKE_SERVERS.iter()) {
            if let ServerRole::MetadataRepository(_) = server.role {
                let plan = server.plan(&context);
                assert!(
                    plan.steps.contains(&AdminCommand::AddCohortRegistration {
                        cohort: context.coco_cohort.clone(),
                    }),
                    "{} is missing the coco cohort",
                    server.name
                );
            }
        }
    }
}
