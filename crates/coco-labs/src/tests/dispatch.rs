//! Branching properties of the configure-or-reactivate dispatcher.

use coco_admin::{Activation, AdminCommand, AdminError, ConfigTarget, PlatformAdmin};
use mockall::mock;
use mockall::predicate::eq;
use rstest::rstest;

use super::support::{RecordingReporter, default_context};
use crate::topology::ServerDefinition;
use crate::{Procedure, ServerOutcome, StructuredRunReporter, configure_or_reactivate};

mock! {
    Admin {}
    impl PlatformAdmin for Admin {
        fn is_server_configured(&self, server: &str) -> Result<bool, AdminError>;
        fn activate_server_if_down(&self, server: &str) -> Result<Activation, AdminError>;
        fn activate_server_stored_config(&self, server: &str) -> Result<(), AdminError>;
        fn apply(&self, target: &ConfigTarget, command: &AdminCommand) -> Result<(), AdminError>;
        fn close_session(&self);
    }
}

fn server(procedure: Procedure, name: &str) -> &'static ServerDefinition {
    procedure
        .servers()
        .iter()
        .find(|server| server.name == name)
        .expect("server is defined")
}

fn refused() -> AdminError {
    AdminError::Status {
        endpoint: String::from("https://platform.test/configuration"),
        status: 503,
    }
}

#[rstest]
#[case(Activation::AlreadyActive)]
#[case(Activation::Started)]
fn configured_server_is_only_reactivated(#[case] activation: Activation) {
    let mut admin = MockAdmin::new();
    admin
        .expect_is_server_configured()
        .with(eq("cocoMDS4"))
        .once()
        .returning(|_| Ok(true));
    admin
        .expect_activate_server_if_down()
        .with(eq("cocoMDS4"))
        .once()
        .returning(move |_| Ok(activation));
    admin.expect_apply().never();
    admin.expect_activate_server_stored_config().never();

    let outcome = configure_or_reactivate(
        &admin,
        server(Procedure::DataLake, "cocoMDS4"),
        &default_context(Procedure::DataLake),
        &StructuredRunReporter::new(),
    );
    assert_eq!(outcome, ServerOutcome::Reactivated(activation));
}

#[test]
fn unconfigured_server_is_built_then_activated_from_storage() {
    let definition = server(Procedure::Core, "cocoMDS5");
    let context = default_context(Procedure::Core);
    let steps = definition.plan(&context).steps.len();

    let mut sequence = mockall::Sequence::new();
    let mut admin = MockAdmin::new();
    admin
        .expect_is_server_configured()
        .once()
        .in_sequence(&mut sequence)
        .returning(|_| Ok(false));
    admin
        .expect_apply()
        .withf(|target, _| target.server_name == "cocoMDS5")
        .times(steps)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    admin
        .expect_activate_server_stored_config()
        .with(eq("cocoMDS5"))
        .once()
        .in_sequence(&mut sequence)
        .returning(|_| Ok(()));
    admin.expect_activate_server_if_down().never();

    let outcome =
        configure_or_reactivate(&admin, definition, &context, &StructuredRunReporter::new());
    assert_eq!(outcome, ServerOutcome::Configured);
}

#[test]
fn failed_existence_query_attempts_neither_branch() {
    let mut admin = MockAdmin::new();
    admin
        .expect_is_server_configured()
        .once()
        .returning(|_| Err(refused()));
    admin.expect_activate_server_if_down().never();
    admin.expect_apply().never();
    admin.expect_activate_server_stored_config().never();
    let reporter = RecordingReporter::default();

    let outcome = configure_or_reactivate(
        &admin,
        server(Procedure::DataLake, "cocoView1"),
        &default_context(Procedure::DataLake),
        &reporter,
    );
    match outcome {
        ServerOutcome::Failed(report) => assert!(report.contains("HTTP 503")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(reporter.events(), ["failed cocoView1"]);
}

#[test]
fn failed_edit_stops_before_activation() {
    let mut admin = MockAdmin::new();
    admin.expect_is_server_configured().returning(|_| Ok(false));
    admin
        .expect_apply()
        .once()
        .returning(|_, _| Err(refused()));
    admin.expect_activate_server_stored_config().never();

    let outcome = configure_or_reactivate(
        &admin,
        server(Procedure::DataLake, "governDL01"),
        &default_context(Procedure::DataLake),
        &StructuredRunReporter::new(),
    );
    assert!(outcome.is_failure());
}
