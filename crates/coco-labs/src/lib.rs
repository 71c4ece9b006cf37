//! Configurators for the Coco Pharmaceuticals lab platforms.
//!
//! Each binary loads the layered configuration, installs logging, opens one
//! admin session and walks a fixed list of servers, configuring the ones that
//! have no stored configuration and reactivating the rest. A failing server is
//! reported and skipped; the exit status only reflects problems that stop the
//! run from starting.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use coco_admin::{ClientOptions, HttpPlatformAdmin, SessionIdentity};
use coco_config::{Config, parse_platform_url};

mod cli;
mod config;
mod context;
mod dispatch;
mod errors;
mod procedure;
mod report;
mod telemetry;
pub mod topology;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;

pub use context::{LabContext, ORGANIZATION_NAME, karma_point_options};
pub use dispatch::{BatchReport, ServerOutcome, configure_or_reactivate, run_batch};
pub use procedure::Procedure;
pub use report::{RunReporter, StructuredRunReporter};

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the value-taking fields of
/// `coco_config::Config`. `accept_invalid_certs` is only read from files and
/// the environment.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--core-platform-url",
    "--datalake-platform-url",
    "--admin-user-id",
    "--coco-cohort",
    "--dev-cohort",
    "--iot-cohort",
    "--event-bus-bootstrap",
    "--file-system-root",
    "--max-page-size",
    "--request-timeout-secs",
];

/// Bundles the output streams handed to the runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct ConfiguratorRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    procedure: Procedure,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
}

impl<'a, W, E, L> ConfiguratorRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(procedure: Procedure, io: &'a mut IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self {
            procedure,
            io,
            loader,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(split.cli_arguments.iter().cloned()) {
            Ok(cli) => cli,
            Err(error)
                if matches!(
                    error.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
                ) =>
            {
                let _ = write!(self.io.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => return self.fail(&AppError::CliUsage(error)),
        };

        match self.execute(&cli, &split.config_arguments) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => self.fail(&error),
        }
    }

    fn execute(&mut self, cli: &Cli, config_arguments: &[OsString]) -> Result<(), AppError> {
        let config = self.loader.load(config_arguments)?;
        config.validate()?;
        telemetry::initialise(&config)?;

        let platform_url = cli
            .url
            .clone()
            .unwrap_or_else(|| self.procedure.default_platform_url(&config).to_owned());
        parse_platform_url("url", &platform_url)?;
        let admin_user = cli
            .userid
            .clone()
            .unwrap_or_else(|| config.admin_user_id.clone());

        let _ = writeln!(self.io.stdout, "{}", self.procedure.banner());
        let session = open_session(self.procedure, &config, &platform_url, &admin_user)?;
        let context = LabContext::new(&config, platform_url, admin_user);
        let report = run_batch(
            &session,
            self.procedure.session_server(),
            self.procedure.servers(),
            &context,
            &StructuredRunReporter::new(),
        );
        self.write_summary(&report);
        Ok(())
    }

    fn write_summary(&mut self, report: &BatchReport) {
        for (server, outcome) in &report.outcomes {
            let _ = writeln!(self.io.stdout, "{server}: {outcome}");
            if let ServerOutcome::Failed(details) = outcome {
                let _ = writeln!(self.io.stderr, "{server} failed\n{details}");
            }
        }
        let _ = writeln!(
            self.io.stdout,
            "{} of {} servers running",
            report.outcomes.len() - report.failures(),
            report.outcomes.len()
        );
    }

    fn fail(&mut self, error: &AppError) -> ExitCode {
        let _ = writeln!(self.io.stderr, "{error}");
        ExitCode::FAILURE
    }
}

fn open_session(
    procedure: Procedure,
    config: &Config,
    platform_url: &str,
    admin_user: &str,
) -> Result<HttpPlatformAdmin, AppError> {
    let identity = SessionIdentity {
        server_name: procedure.session_server().to_owned(),
        platform_url: platform_url.to_owned(),
        admin_user: admin_user.to_owned(),
    };
    let options = ClientOptions {
        timeout: config.request_timeout(),
        accept_invalid_certs: config.accept_invalid_certs,
    };
    HttpPlatformAdmin::open(identity, options).map_err(AppError::Session)
}

/// Runs `procedure` using the provided arguments and output streams.
///
/// Returns success once every server has been attempted, whatever the
/// individual outcomes.
#[must_use]
pub fn run<I, W, E>(procedure: Procedure, args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(procedure, args, &mut io, &OrthoConfigLoader)
}

/// Runs `procedure` with a custom configuration loader.
pub(crate) fn run_with_loader<'a, I, W, E, L>(
    procedure: Procedure,
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    ConfiguratorRunner::new(procedure, io, loader).run(args)
}

#[cfg(test)]
mod tests;
