//! Serialisable configuration documents accepted by the admin services.
//!
//! Field names follow the platform's JSON conventions (camelCase plus a
//! `class` discriminator) so these values can be posted verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options map passed when enabling an access or integration service.
pub type ServiceOptions = BTreeMap<String, Value>;

/// Basic identity and paging properties of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProperties {
    /// Free-text description shown by operational tooling.
    pub local_server_description: String,
    /// Owning organisation.
    pub organization_name: String,
    /// Platform URL root the server is reachable on.
    #[serde(rename = "localServerURL")]
    pub local_server_url: String,
    /// Identity the server uses for its own outbound calls.
    pub local_server_user_id: String,
    /// Password paired with `local_server_user_id`.
    pub local_server_password: String,
    /// Largest page size the server returns.
    pub max_page_size: u32,
}

/// Kafka producer and consumer properties shared by the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBusConfig {
    /// Producer configuration properties.
    pub producer: BTreeMap<String, String>,
    /// Consumer configuration properties.
    pub consumer: BTreeMap<String, String>,
}

impl EventBusConfig {
    /// Builds an event bus pointing both directions at one bootstrap address.
    #[must_use]
    pub fn kafka(bootstrap_servers: &str) -> Self {
        let properties =
            BTreeMap::from([(String::from("bootstrap.servers"), bootstrap_servers.to_owned())]);
        Self {
            producer: properties.clone(),
            consumer: properties,
        }
    }
}

/// Discriminates plain connections from virtual ones wrapping embedded connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionClass {
    /// A connection to a single connector.
    Connection,
    /// A connection whose connector delegates to embedded connections.
    VirtualConnection,
}

/// Connector type naming the provider class the platform instantiates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "camelCase")]
pub struct ConnectorType {
    /// Fully qualified Java class name of the connector provider.
    pub connector_provider_class_name: String,
}

/// Network or file address a connector attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "camelCase")]
pub struct Endpoint {
    /// Address string interpreted by the connector.
    pub address: String,
}

/// Connection nested inside a virtual connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "camelCase")]
pub struct EmbeddedConnection {
    /// The wrapped connection.
    pub embedded_connection: Connection,
}

/// Connection descriptor for connectors, security providers and lineage stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Plain or virtual connection.
    #[serde(rename = "class")]
    pub class: ConnectionClass,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provider used to build the connector.
    pub connector_type: ConnectorType,
    /// Address the connector attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    /// Provider-specific properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub configuration_properties: BTreeMap<String, Value>,
    /// Connections wrapped by a virtual connection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_connections: Vec<EmbeddedConnection>,
}

impl Connection {
    /// Builds a plain connection for the given provider class.
    #[must_use]
    pub fn for_provider(provider_class_name: &str) -> Self {
        Self {
            class: ConnectionClass::Connection,
            display_name: None,
            description: None,
            connector_type: ConnectorType {
                connector_provider_class_name: provider_class_name.to_owned(),
            },
            endpoint: None,
            configuration_properties: BTreeMap::new(),
            embedded_connections: Vec::new(),
        }
    }

    /// Builds a virtual connection wrapping `embedded`.
    #[must_use]
    pub fn virtual_for_provider(provider_class_name: &str, embedded: Vec<Self>) -> Self {
        Self {
            class: ConnectionClass::VirtualConnection,
            embedded_connections: embedded
                .into_iter()
                .map(|embedded_connection| EmbeddedConnection {
                    embedded_connection,
                })
                .collect(),
            ..Self::for_provider(provider_class_name)
        }
    }

    /// Sets the endpoint address.
    #[must_use]
    pub fn with_endpoint(mut self, address: impl Into<String>) -> Self {
        self.endpoint = Some(Endpoint {
            address: address.into(),
        });
        self
    }

    /// Sets the display name and description.
    #[must_use]
    pub fn with_labels(mut self, display_name: &str, description: &str) -> Self {
        self.display_name = Some(display_name.to_owned());
        self.description = Some(description.to_owned());
        self
    }

    /// Adds one configuration property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.configuration_properties
            .insert(key.to_owned(), value.into());
        self
    }
}

/// One connector hosted by an integration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "camelCase")]
pub struct IntegrationConnectorConfig {
    /// Unique connector name within the daemon.
    pub connector_name: String,
    /// Identity the connector acts as.
    pub connector_user_id: String,
    /// Connection used to build the connector.
    pub connection: Connection,
    /// Qualified name of the metadata source the connector represents.
    pub metadata_source_qualified_name: String,
    /// Minutes between refresh calls.
    pub refresh_time_interval: u64,
    /// Whether the connector issues blocking calls from its own thread.
    pub uses_blocking_calls: bool,
}

/// Governance engine hosted by an engine host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "camelCase")]
pub struct EngineConfig {
    /// Qualified name of the engine definition.
    pub engine_qualified_name: String,
    /// Identity the engine runs as.
    pub engine_user_id: String,
}

/// Client settings a lineage warehouse uses to reach its metadata server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageAccessServiceConfig {
    /// Metadata server name.
    pub server_name: String,
    /// Platform URL root hosting the metadata server.
    pub server_platform_url_root: String,
    /// User id for the connection.
    pub user: String,
    /// Password for the connection.
    pub password: String,
}

/// Scheduled job inside a lineage warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundJob {
    /// Job name.
    pub job_name: String,
    /// Seconds between runs.
    pub job_interval: u64,
    /// Whether the job runs at all.
    pub job_enabled: bool,
    /// Optional seed value such as a starting timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_default_value: Option<String>,
}

/// Full configuration of the lineage warehouse services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "camelCase")]
pub struct OpenLineageConfig {
    /// Free-text description of the service.
    pub open_lineage_description: String,
    /// Connection to the lineage graph store.
    pub lineage_graph_connection: Connection,
    /// Client settings for the metadata server feeding the warehouse.
    pub access_service_config: LineageAccessServiceConfig,
    /// Scheduled maintenance jobs.
    pub background_jobs: Vec<BackgroundJob>,
}
