//! End-to-end runs of the configurator with a static configuration.

use std::ffi::OsString;
use std::process::ExitCode;

use coco_config::Config;
use rstest::{fixture, rstest};

use super::support::StaticConfigLoader;
use crate::{IoStreams, Procedure, run_with_loader};

const UNREACHABLE: &str = "http://127.0.0.1:1";

#[fixture]
fn unreachable_config() -> Config {
    Config {
        core_platform_url: String::from(UNREACHABLE),
        datalake_platform_url: String::from(UNREACHABLE),
        request_timeout_secs: 2,
        ..Config::default()
    }
}

struct Captured {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_procedure(procedure: Procedure, config: Config, args: &[&str]) -> Captured {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let loader = StaticConfigLoader::new(config);
    let args: Vec<OsString> = args.iter().map(OsString::from).collect();
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        run_with_loader(procedure, args, &mut io, &loader)
    };
    Captured {
        exit,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

#[rstest]
fn unreachable_platform_still_completes_the_batch(unreachable_config: Config) {
    let captured = run_procedure(
        Procedure::Core,
        unreachable_config,
        &["config-coco-core", "--url", UNREACHABLE],
    );

    assert_eq!(captured.exit, ExitCode::SUCCESS);
    insta::assert_snapshot!(captured.stdout, @r"
    Configuring and activating the core Coco platform
    cocoMDS2: failed
    cocoMDS5: failed
    cocoMDS6: failed
    0 of 3 servers running
    ");
    for server in ["cocoMDS2", "cocoMDS5", "cocoMDS6"] {
        assert!(
            captured.stderr.contains(&format!("{server} failed")),
            "stderr: {}",
            captured.stderr
        );
    }
}

#[rstest]
fn data_lake_defaults_to_its_own_platform(unreachable_config: Config) {
    let captured = run_procedure(
        Procedure::DataLake,
        unreachable_config,
        &["config-coco-datalake", "--userid", "peterprofile"],
    );

    assert_eq!(captured.exit, ExitCode::SUCCESS);
    assert!(captured.stdout.starts_with("Configuring and starting the data lake\n"));
    assert!(captured.stdout.ends_with("0 of 7 servers running\n"));
}

#[rstest]
fn malformed_platform_url_stops_before_any_call(unreachable_config: Config) {
    let captured = run_procedure(
        Procedure::Core,
        unreachable_config,
        &["config-coco-core", "--url", "not a url"],
    );

    assert_eq!(captured.exit, ExitCode::FAILURE);
    assert!(captured.stdout.is_empty(), "stdout: {}", captured.stdout);
    assert!(captured.stderr.contains("url"), "stderr: {}", captured.stderr);
}

#[rstest]
fn invalid_configuration_is_rejected(unreachable_config: Config) {
    let config = Config {
        admin_user_id: String::from("  "),
        ..unreachable_config
    };
    let captured = run_procedure(Procedure::Core, config, &["config-coco-core"]);

    assert_eq!(captured.exit, ExitCode::FAILURE);
    assert!(
        captured.stderr.starts_with("invalid configuration:"),
        "stderr: {}",
        captured.stderr
    );
}

#[rstest]
fn zero_request_timeout_is_rejected(unreachable_config: Config) {
    let config = Config {
        request_timeout_secs: 0,
        ..unreachable_config
    };
    let captured = run_procedure(Procedure::DataLake, config, &["config-coco-datalake"]);

    assert_eq!(captured.exit, ExitCode::FAILURE);
    assert!(captured.stdout.is_empty(), "stdout: {}", captured.stdout);
    assert_eq!(
        captured.stderr,
        "invalid configuration: request_timeout_secs must be at least one second\n"
    );
}

#[rstest]
fn unknown_flag_is_a_usage_error(unreachable_config: Config) {
    let captured = run_procedure(
        Procedure::Core,
        unreachable_config,
        &["config-coco-core", "--bogus"],
    );

    assert_eq!(captured.exit, ExitCode::FAILURE);
    assert!(captured.stderr.contains("--bogus"), "stderr: {}", captured.stderr);
    assert!(captured.stdout.is_empty());
}

#[rstest]
fn help_is_written_to_stdout(unreachable_config: Config) {
    let captured = run_procedure(
        Procedure::DataLake,
        unreachable_config,
        &["config-coco-datalake", "--help"],
    );

    assert_eq!(captured.exit, ExitCode::SUCCESS);
    assert!(captured.stdout.contains("--url <URL>"));
    assert!(captured.stdout.contains("--userid <USER>"));
    assert!(captured.stderr.is_empty());
}
