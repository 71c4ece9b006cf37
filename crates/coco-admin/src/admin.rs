//! The administration capability surface consumed by the lab configurators.

use crate::command::{AdminCommand, ConfigTarget, LocalRepositoryMode, RemoteServer};
use crate::error::AdminError;
use crate::payloads::{
    Connection, EngineConfig, EventBusConfig, IntegrationConnectorConfig, OpenLineageConfig,
    ServerProperties, ServiceOptions,
};

/// Result of a conditional activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The server was already running; nothing was sent.
    AlreadyActive,
    /// The server was started from its stored configuration.
    Started,
}

/// Session-scoped access to a platform's administration services.
///
/// Implementors supply the five required operations. The named setters are
/// thin wrappers that build an [`AdminCommand`] and hand it to
/// [`PlatformAdmin::apply`], so fakes only need to observe `apply`.
pub trait PlatformAdmin {
    /// Reports whether `server` already has a stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when the query cannot be completed.
    fn is_server_configured(&self, server: &str) -> Result<bool, AdminError>;

    /// Starts `server` from its stored configuration unless it is running.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when the liveness query or activation fails.
    fn activate_server_if_down(&self, server: &str) -> Result<Activation, AdminError>;

    /// Starts `server` from its stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when activation fails.
    fn activate_server_stored_config(&self, server: &str) -> Result<(), AdminError>;

    /// Applies one edit to the stored configuration addressed by `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when the platform rejects the edit.
    fn apply(&self, target: &ConfigTarget, command: &AdminCommand) -> Result<(), AdminError>;

    /// Releases the session. Later calls fail with [`AdminError::SessionClosed`].
    fn close_session(&self);

    /// Sets the basic server properties.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_basic_server_properties(
        &self,
        target: &ConfigTarget,
        properties: ServerProperties,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::SetBasicServerProperties { properties })
    }

    /// Sets the server's own user id.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_server_user_id(&self, target: &ConfigTarget, user_id: &str) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::SetServerUserId {
                user_id: user_id.to_owned(),
            },
        )
    }

    /// Sets the server's own password.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_server_user_password(
        &self,
        target: &ConfigTarget,
        password: &str,
    ) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::SetServerUserPassword {
                password: password.to_owned(),
            },
        )
    }

    /// Sets the owning organisation.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_organization_name(&self, target: &ConfigTarget, name: &str) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::SetOrganizationName {
                name: name.to_owned(),
            },
        )
    }

    /// Sets the server description.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_server_description(
        &self,
        target: &ConfigTarget,
        description: &str,
    ) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::SetServerDescription {
                description: description.to_owned(),
            },
        )
    }

    /// Sets the advertised platform URL root.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_server_url_root(&self, target: &ConfigTarget, url: &str) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::SetServerUrlRoot {
                url: url.to_owned(),
            },
        )
    }

    /// Sets the event bus.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_event_bus(
        &self,
        target: &ConfigTarget,
        event_bus: EventBusConfig,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::SetEventBus { event_bus })
    }

    /// Sets the security connector connection.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_server_security_connection(
        &self,
        target: &ConfigTarget,
        connection: Connection,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::SetServerSecurityConnection { connection })
    }

    /// Adds the default audit-log destinations.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn add_default_log_destinations(&self, target: &ConfigTarget) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::AddDefaultLogDestinations)
    }

    /// Chooses the local repository kind.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_local_repository(
        &self,
        target: &ConfigTarget,
        mode: LocalRepositoryMode,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::SetLocalRepository { mode })
    }

    /// Sets the local metadata collection id.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_local_metadata_collection_id(
        &self,
        target: &ConfigTarget,
        id: &str,
    ) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::SetLocalMetadataCollectionId { id: id.to_owned() },
        )
    }

    /// Sets the local metadata collection name.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_local_metadata_collection_name(
        &self,
        target: &ConfigTarget,
        name: &str,
    ) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::SetLocalMetadataCollectionName {
                name: name.to_owned(),
            },
        )
    }

    /// Registers the server with a cohort.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn add_cohort_registration(&self, target: &ConfigTarget, cohort: &str) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::AddCohortRegistration {
                cohort: cohort.to_owned(),
            },
        )
    }

    /// Enables a named access service.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn configure_access_service(
        &self,
        target: &ConfigTarget,
        service: &str,
        options: ServiceOptions,
    ) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::ConfigureAccessService {
                service: service.to_owned(),
                options,
            },
        )
    }

    /// Adds an archive loaded at every start.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn add_startup_archive_file(&self, target: &ConfigTarget, file: &str) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::AddStartupArchiveFile {
                file: file.to_owned(),
            },
        )
    }

    /// Enables an integration service with its connectors.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn configure_integration_service(
        &self,
        target: &ConfigTarget,
        service: &str,
        partner: RemoteServer,
        connectors: Vec<IntegrationConnectorConfig>,
    ) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::ConfigureIntegrationService {
                service: service.to_owned(),
                partner,
                options: ServiceOptions::new(),
                connectors,
            },
        )
    }

    /// Attaches an integration group.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn configure_integration_group(
        &self,
        target: &ConfigTarget,
        partner: RemoteServer,
        qualified_name: &str,
    ) -> Result<(), AdminError> {
        self.apply(
            target,
            &AdminCommand::ConfigureIntegrationGroup {
                partner,
                qualified_name: qualified_name.to_owned(),
            },
        )
    }

    /// Names the engine definitions server.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_engine_definitions_client(
        &self,
        target: &ConfigTarget,
        partner: RemoteServer,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::SetEngineDefinitionsClient { partner })
    }

    /// Sets the engine list.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_engine_list(
        &self,
        target: &ConfigTarget,
        engines: Vec<EngineConfig>,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::SetEngineList { engines })
    }

    /// Enables all view services.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn configure_all_view_services(
        &self,
        target: &ConfigTarget,
        partner: RemoteServer,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::ConfigureAllViewServices { partner })
    }

    /// Configures the lineage warehouse.
    ///
    /// # Errors
    ///
    /// See [`PlatformAdmin::apply`].
    fn set_lineage_warehouse_services(
        &self,
        target: &ConfigTarget,
        config: OpenLineageConfig,
    ) -> Result<(), AdminError> {
        self.apply(target, &AdminCommand::SetLineageWarehouseServices { config })
    }
}

impl<T> PlatformAdmin for &T
where
    T: PlatformAdmin + ?Sized,
{
    fn is_server_configured(&self, server: &str) -> Result<bool, AdminError> {
        (**self).is_server_configured(server)
    }

    fn activate_server_if_down(&self, server: &str) -> Result<Activation, AdminError> {
        (**self).activate_server_if_down(server)
    }

    fn activate_server_stored_config(&self, server: &str) -> Result<(), AdminError> {
        (**self).activate_server_stored_config(server)
    }

    fn apply(&self, target: &ConfigTarget, command: &AdminCommand) -> Result<(), AdminError> {
        (**self).apply(target, command)
    }

    fn close_session(&self) {
        (**self).close_session();
    }
}
