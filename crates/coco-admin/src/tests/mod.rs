//! Exercises [`HttpPlatformAdmin`] against a loopback platform.


use std::time::Duration;

use anyhow::Result;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use self::fake_platform::{CannedResponse, FakePlatform};
use crate::{
    Activation, AdminError, ClientOptions, ConfigTarget, HttpPlatformAdmin, LocalRepositoryMode,
    PlatformAdmin, SessionIdentity,
};

const ADMIN: &str = "garygeeke";

#[fixture]
fn options() -> ClientOptions {
    ClientOptions {
        timeout: Duration::from_secs(5),
        accept_invalid_certs: false,
    }
}

fn session(platform: &FakePlatform, options: ClientOptions) -> Result<HttpPlatformAdmin> {
    let identity = SessionIdentity {
        server_name: String::from("cocoMDS1"),
        platform_url: platform.url(),
        admin_user: String::from(ADMIN),
    };
    Ok(HttpPlatformAdmin::open(identity, options)?)
}

#[rstest]
#[case(json!({"omagserverConfig": {"auditTrail": ["Configured"]}}), true)]
#[case(json!({"omagserverConfig": {"localServerName": "cocoMDS4"}}), false)]
fn configured_check_reads_audit_trail(
    options: ClientOptions,
    #[case] document: Value,
    #[case] expected: bool,
) -> Result<()> {
    let mut body = document;
    body["class"] = json!("OMAGServerConfigResponse");
    body["relatedHTTPCode"] = json!(200);
    let mut platform = FakePlatform::spawn(vec![CannedResponse::ok(body.to_string())])?;
    let admin = session(&platform, options)?;

    assert_eq!(admin.is_server_configured("cocoMDS4")?, expected);

    let requests = platform.take_requests()?;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(
        requests[0].target,
        "/open-metadata/admin-services/users/garygeeke/servers/cocoMDS4/configuration"
    );
    Ok(())
}

#[rstest]
fn running_server_is_left_alone(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(vec![CannedResponse::ok(
        r#"{"class":"BooleanResponse","relatedHTTPCode":200,"flag":true}"#,
    )])?;
    let admin = session(&platform, options)?;

    assert_eq!(
        admin.activate_server_if_down("cocoMDS2")?,
        Activation::AlreadyActive
    );

    let requests = platform.take_requests()?;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].target,
        "/open-metadata/platform-services/users/garygeeke/server-platform/servers/cocoMDS2/is-active"
    );
    Ok(())
}

#[rstest]
fn stopped_server_is_started_from_stored_configuration(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(vec![
        CannedResponse::ok(r#"{"class":"BooleanResponse","relatedHTTPCode":200,"flag":false}"#),
        CannedResponse::ok(r#"{"class":"SuccessMessageResponse","relatedHTTPCode":200}"#),
    ])?;
    let admin = session(&platform, options)?;

    assert_eq!(admin.activate_server_if_down("cocoMDS2")?, Activation::Started);

    let requests = platform.take_requests()?;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, "POST");
    assert_eq!(
        requests[1].target,
        "/open-metadata/admin-services/users/garygeeke/servers/cocoMDS2/instance"
    );
    Ok(())
}

#[rstest]
fn exception_envelope_surfaces_as_platform_error(options: ClientOptions) -> Result<()> {
    let body = json!({
        "class": "VoidResponse",
        "relatedHTTPCode": 400,
        "exceptionClassName": "org.odpi.openmetadata.adminservices.ffdc.exception.OMAGInvalidParameterException",
        "exceptionErrorMessage": "OMAG-ADMIN-400-001 The cohort name is null",
    });
    let mut platform = FakePlatform::spawn(vec![CannedResponse::ok(body.to_string())])?;
    let admin = session(&platform, options)?;
    let target = ConfigTarget::new("cocoMDS2", platform.url(), ADMIN);

    let error = admin
        .add_cohort_registration(&target, "cocoCohort")
        .expect_err("exception envelope must fail");
    match error {
        AdminError::Platform { exception, .. } => {
            assert_eq!(exception.related_http_code, 400);
        }
        other => panic!("expected platform error, got {other:?}"),
    }
    platform.take_requests()?;
    Ok(())
}

#[rstest]
fn http_failure_without_envelope_is_status_error(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(vec![CannedResponse::status(503, "")])?;
    let admin = session(&platform, options)?;

    let error = admin
        .activate_server_stored_config("cocoMDS3")
        .expect_err("503 must fail");
    assert!(matches!(error, AdminError::Status { status: 503, .. }));
    platform.take_requests()?;
    Ok(())
}

#[rstest]
fn query_parameters_are_form_encoded(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(vec![CannedResponse::void()])?;
    let admin = session(&platform, options)?;
    let target = ConfigTarget::new("cocoMDS3", platform.url(), ADMIN);

    admin.set_organization_name(&target, "Coco Pharmaceuticals")?;

    let requests = platform.take_requests()?;
    assert_eq!(
        requests[0].target,
        "/open-metadata/admin-services/users/garygeeke/servers/cocoMDS3/organization-name?name=Coco+Pharmaceuticals"
    );
    Ok(())
}

#[rstest]
fn target_addresses_its_own_platform_and_admin(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(vec![CannedResponse::void()])?;
    let admin = session(&platform, options)?;
    let target = ConfigTarget::new("cocoMDS6", platform.url(), "peterprofile");

    admin.set_local_repository(&target, LocalRepositoryMode::XtdbLocalKv)?;

    let requests = platform.take_requests()?;
    assert_eq!(
        requests[0].target,
        "/open-metadata/admin-services/users/peterprofile/servers/cocoMDS6/local-repository/mode/xtdb-local-kv-repository"
    );
    Ok(())
}

#[rstest]
fn text_bodies_are_sent_verbatim(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(vec![CannedResponse::void()])?;
    let admin = session(&platform, options)?;
    let target = ConfigTarget::new("cocoMDS2", platform.url(), ADMIN);

    admin.add_startup_archive_file(&target, "content-packs/CocoComboArchive.omarchive")?;

    let requests = platform.take_requests()?;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(requests[0].body, "content-packs/CocoComboArchive.omarchive");
    Ok(())
}

#[rstest]
fn json_bodies_carry_their_class(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(vec![CannedResponse::void()])?;
    let admin = session(&platform, options)?;
    let target = ConfigTarget::new("cocoView1", platform.url(), ADMIN);

    admin.configure_all_view_services(
        &target,
        crate::RemoteServer::new("cocoMDS1", "https://lake:7444"),
    )?;

    let requests = platform.take_requests()?;
    let body: Value = serde_json::from_str(&requests[0].body)?;
    assert_eq!(
        body,
        json!({
            "class": "ViewServiceRequestBody",
            "omagserverPlatformRootURL": "https://lake:7444",
            "omagserverName": "cocoMDS1",
        })
    );
    Ok(())
}

#[rstest]
fn closed_session_refuses_further_calls(options: ClientOptions) -> Result<()> {
    let mut platform = FakePlatform::spawn(Vec::new())?;
    let admin = session(&platform, options)?;

    admin.close_session();
    admin.close_session();

    let error = admin
        .is_server_configured("cocoMDS1")
        .expect_err("closed session must refuse");
    assert!(matches!(error, AdminError::SessionClosed { ref server } if server == "cocoMDS1"));
    assert!(platform.take_requests()?.is_empty());
    Ok(())
}
