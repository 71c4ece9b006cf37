//! Servers hosted on the data-lake platform.

use coco_admin::payloads::{
    BackgroundJob, Connection, IntegrationConnectorConfig, LineageAccessServiceConfig,
    OpenLineageConfig,
};
use serde_json::Value;

use super::{
    AccessService, AdminSelector, CohortRef, Credentials, EngineHostProfile,
    IntegrationDaemonProfile, LineageWarehouseProfile, LocalRepository, OptionsSpec, Partner,
    PlatformSelector, RepositoryKind, RepositoryProfile, ServerDefinition, ServerRole,
    ViewServerProfile, ZoneOptions,
};
use crate::context::LabContext;

const OPEN_LINEAGE_PACKAGE: &str = "org.odpi.openmetadata.adapters.connectors.integration.openlineage";
const KAFKA_TOPIC_PROVIDER: &str =
    "org.odpi.openmetadata.adapters.eventbus.topic.kafka.KafkaOpenMetadataTopicProvider";
const FOLDER_MONITOR_PROVIDER: &str = "org.odpi.openmetadata.adapters.connectors.integration.basicfiles.DataFolderMonitorIntegrationProvider";
const LINEAGE_GRAPH_PROVIDER: &str = "org.odpi.openmetadata.openconnectors.governancedaemonconnectors.lineagewarehouseconnectors.janusconnector.graph.LineageGraphConnectorProvider";
const OPEN_LINEAGE_TOPIC: &str = "openlineage.topic";
const OPEN_LINEAGE_LOCAL_SERVER_ID: &str = "f234e808-2d0c-4d88-83df-275eee20c1b7";
const OPEN_LINEAGE_API_ENDPOINT: &str = "http://host.docker.internal:5000/api/v1/lineage";
const ONBOARDING_USER: &str = "onboardDL01npa";
const REFRESH_MINUTES: u64 = 10;

const LAKE_ZONES: OptionsSpec = OptionsSpec::Zones(ZoneOptions {
    supported: &[
        "quarantine",
        "clinical-trials",
        "research",
        "data-lake",
        "trash-can",
    ],
    default: &["quarantine"],
    publish: &["data-lake"],
});

const LAKE_USERS: OptionsSpec = OptionsSpec::Zones(ZoneOptions {
    supported: &["data-lake"],
    default: &[],
    publish: &[],
});

const MDS1_ON_SESSION: Partner = Partner {
    server: "cocoMDS1",
    platform: PlatformSelector::Session,
};

const MDS1_ON_DATALAKE: Partner = Partner {
    server: "cocoMDS1",
    platform: PlatformSelector::DataLake,
};

const fn service(name: &'static str, options: OptionsSpec) -> AccessService {
    AccessService { name, options }
}

/// Data-lake servers, in configuration order.
pub static DATALAKE_SERVERS: [ServerDefinition; 7] = [
    ServerDefinition {
        name: "cocoMDS1",
        platform: PlatformSelector::Session,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::MetadataRepository(RepositoryProfile {
            description: "Data Lake Operations",
            repository: Some(LocalRepository {
                kind: RepositoryKind::XtdbLocalKv,
                collection_name: "Data Lake Operations",
            }),
            cohorts: &[CohortRef::Coco],
            access_services: &[
                service("asset-consumer", OptionsSpec::Empty),
                service("asset-manager", LAKE_ZONES),
                service("asset-owner", LAKE_ZONES),
                service("community-profile", OptionsSpec::KarmaPoints),
                service("data-manager", LAKE_ZONES),
                service("digital-architecture", LAKE_ZONES),
                service("governance-engine", LAKE_ZONES),
                service("governance-server", LAKE_ZONES),
                service("asset-lineage", LAKE_ZONES),
            ],
            startup_archive: Some("content-packs/CoreContentPack.omarchive"),
        }),
    },
    ServerDefinition {
        name: "cocoMDS4",
        platform: PlatformSelector::Session,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::MetadataRepository(RepositoryProfile {
            description: "Data Lake Users",
            repository: None,
            cohorts: &[CohortRef::Coco],
            access_services: &[
                service("asset-consumer", LAKE_USERS),
                service("asset-owner", OptionsSpec::Empty),
                service("community-profile", OptionsSpec::KarmaPoints),
                service("data-science", LAKE_USERS),
            ],
            startup_archive: None,
        }),
    },
    ServerDefinition {
        name: "exchangeDL01",
        platform: PlatformSelector::Session,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::IntegrationDaemon(IntegrationDaemonProfile {
            description: "Supports exchange of metadata with third party technologies",
            service: "files-integrator",
            partner: MDS1_ON_SESSION,
            connectors: folder_monitor_connectors,
            group: Some("Onboarding"),
        }),
    },
    ServerDefinition {
        name: "governDL01",
        platform: PlatformSelector::Session,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::EngineHost(EngineHostProfile {
            description: "An Engine Host to run governance actions for Coco Pharmaceuticals",
            partner: MDS1_ON_DATALAKE,
            engines: &["AssetDiscovery", "AssetQuality"],
            engine_user: "findItDL01npa",
        }),
    },
    ServerDefinition {
        name: "cocoView1",
        platform: PlatformSelector::Session,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::ViewServer(ViewServerProfile {
            description: "Coco View Server",
            partner: MDS1_ON_SESSION,
        }),
    },
    ServerDefinition {
        name: "cocoOLS1",
        platform: PlatformSelector::DataLake,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::LineageWarehouse(LineageWarehouseProfile {
            description: "Open Lineage Server",
            config: lineage_warehouse_config,
        }),
    },
    ServerDefinition {
        name: "monitorGov01",
        platform: PlatformSelector::DataLake,
        admin: AdminSelector::Configured,
        credentials: Credentials::SharedWith("exchangeDL01"),
        role: ServerRole::IntegrationDaemon(IntegrationDaemonProfile {
            description: "An integration daemon server supporting the governance team",
            service: "lineage-integrator",
            partner: MDS1_ON_DATALAKE,
            connectors: open_lineage_connectors,
            group: None,
        }),
    },
];

fn connector(
    name: &str,
    user_id: &str,
    source: &str,
    connection: Connection,
) -> IntegrationConnectorConfig {
    IntegrationConnectorConfig {
        connector_name: name.to_owned(),
        connector_user_id: user_id.to_owned(),
        connection,
        metadata_source_qualified_name: source.to_owned(),
        refresh_time_interval: REFRESH_MINUTES,
        uses_blocking_calls: false,
    }
}

fn open_lineage_provider(class_name: &str) -> String {
    format!("{OPEN_LINEAGE_PACKAGE}.{class_name}")
}

fn folder_monitor_connectors(context: &LabContext) -> Vec<IntegrationConnectorConfig> {
    let folder = context
        .landing_path("data-lake/research/clinical-trials/drop-foot/weekly-measurements");
    vec![connector(
        "DropFootClinicalTrialResultsFolderMonitor",
        "monitorDL01npa",
        "DropFootClinicalTrialResults",
        Connection::for_provider(FOLDER_MONITOR_PROVIDER).with_endpoint(folder),
    )]
}

fn open_lineage_connectors(context: &LabContext) -> Vec<IntegrationConnectorConfig> {
    let mut topic = Connection::for_provider(KAFKA_TOPIC_PROVIDER).with_endpoint(OPEN_LINEAGE_TOPIC);
    for (key, value) in context.kafka_client_properties() {
        topic = topic.with_property(&key, value);
    }
    let topic = topic.with_property(
        "local.server.id",
        Value::from(OPEN_LINEAGE_LOCAL_SERVER_ID),
    );
    let receiver = Connection::virtual_for_provider(
        &open_lineage_provider("OpenLineageEventReceiverIntegrationProvider"),
        vec![topic],
    );

    vec![
        connector(
            "KafkaOpenLineageEventReceiver",
            ONBOARDING_USER,
            "Apache Kafka",
            receiver,
        ),
        connector(
            "GovernanceActionOpenLineageCreator",
            ONBOARDING_USER,
            "Egeria",
            Connection::for_provider(&open_lineage_provider(
                "GovernanceActionOpenLineageIntegrationProvider",
            )),
        ),
        connector(
            "APIBasedOpenLineageLogStore",
            ONBOARDING_USER,
            "Egeria",
            Connection::for_provider(&open_lineage_provider("APIBasedOpenLineageLogStoreProvider"))
                .with_endpoint(OPEN_LINEAGE_API_ENDPOINT),
        ),
        connector(
            "FileBasedOpenLineageLogStore",
            ONBOARDING_USER,
            "Egeria",
            Connection::for_provider(&open_lineage_provider(
                "FileBasedOpenLineageLogStoreProvider",
            ))
            .with_endpoint(context.landing_path("openlineage.log")),
        ),
        connector(
            "OpenLineageCataloguer",
            ONBOARDING_USER,
            "OpenLineageSources",
            Connection::for_provider(&open_lineage_provider(
                "OpenLineageCataloguerIntegrationProvider",
            )),
        ),
    ]
}

/// Lineage warehouse for `cocoOLS1`.
///
/// The access-service password is the lab's placeholder `secret`, not the
/// `passw0rd` pattern the servers use for themselves.
fn lineage_warehouse_config(context: &LabContext) -> OpenLineageConfig {
    let repository = "data/servers/cocoOLS1/lineage-repository";
    OpenLineageConfig {
        open_lineage_description: String::from(
            "Open Lineage Service is used for the storage and querying of lineage",
        ),
        lineage_graph_connection: Connection::for_provider(LINEAGE_GRAPH_PROVIDER)
            .with_labels(
                "Lineage Graph Connection",
                "Used for storing lineage in the Open Metadata format",
            )
            .with_property("gremlin.graph", "org.janusgraph.core.JanusGraphFactory")
            .with_property("storage.backend", "berkeleyje")
            .with_property("storage.directory", format!("{repository}/berkeley"))
            .with_property("index.search.backend", "lucene")
            .with_property("index.search.directory", format!("{repository}/searchindex")),
        access_service_config: LineageAccessServiceConfig {
            server_name: String::from("cocoMDS1"),
            server_platform_url_root: context.datalake_platform_url.clone(),
            user: String::from("cocoMDS1npa"),
            password: String::from("secret"),
        },
        background_jobs: vec![
            BackgroundJob {
                job_name: String::from("LineageGraphJob"),
                job_interval: 120,
                job_enabled: false,
                job_default_value: None,
            },
            BackgroundJob {
                job_name: String::from("AssetLineageUpdateJob"),
                job_interval: 120,
                job_enabled: false,
                job_default_value: Some(String::from("2021-12-03T10:15:30")),
            },
        ],
    }
}
