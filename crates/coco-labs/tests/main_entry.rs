//! Integration tests for the configurator binary entry points.
//!
//! Covers help output and the user-facing errors raised before any platform
//! is contacted.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn core_help_succeeds() {
    let mut command = cargo_bin_cmd!("config-coco-core");
    command.arg("--help");
    command.assert().success().stdout(contains("--url <URL>"));
}

#[test]
fn datalake_help_succeeds() {
    let mut command = cargo_bin_cmd!("config-coco-datalake");
    command.arg("--help");
    command.assert().success().stdout(contains("--userid <USER>"));
}

#[test]
fn unknown_flag_exits_with_failure() {
    let mut command = cargo_bin_cmd!("config-coco-core");
    command.arg("--bogus");
    command.assert().failure().stderr(contains("--bogus"));
}

#[test]
fn non_http_platform_url_exits_with_failure() {
    let mut command = cargo_bin_cmd!("config-coco-datalake");
    command.args(["--url", "ftp://host.docker.internal:7444"]);
    command
        .assert()
        .failure()
        .stderr(contains("url must use http or https, found 'ftp'"));
}
