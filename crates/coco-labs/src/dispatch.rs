//! Configure-or-reactivate dispatch over a list of servers.
//!
//! A server with stored configuration is only started if it is down. A
//! server without one has its plan applied and is then started from the
//! configuration just stored. Failures are reported per server and never
//! stop the batch.

use std::fmt;

use coco_admin::{Activation, AdminError, PlatformAdmin, describe_failure};

use crate::context::LabContext;
use crate::report::RunReporter;
use crate::topology::ServerDefinition;

/// What happened to one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerOutcome {
    /// The server already had configuration and was reactivated if needed.
    Reactivated(Activation),
    /// The server was configured from scratch and activated.
    Configured,
    /// A call failed; carries the rendered failure.
    Failed(String),
}

impl ServerOutcome {
    /// Returns true for [`ServerOutcome::Failed`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for ServerOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reactivated(Activation::AlreadyActive) => formatter.write_str("already active"),
            Self::Reactivated(Activation::Started) => {
                formatter.write_str("activated from stored configuration")
            }
            Self::Configured => formatter.write_str("configured and activated"),
            Self::Failed(_) => formatter.write_str("failed"),
        }
    }
}

/// Outcomes of a batch, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Server name and outcome pairs.
    pub outcomes: Vec<(&'static str, ServerOutcome)>,
}

impl BatchReport {
    /// Number of servers that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_failure())
            .count()
    }
}

/// Brings one server up, either by reactivation or by configuring it.
///
/// Exactly one of the two branches is attempted. Errors from either branch,
/// including the existence query, are rendered and returned as
/// [`ServerOutcome::Failed`].
pub fn configure_or_reactivate<A, R>(
    admin: &A,
    server: &ServerDefinition,
    context: &LabContext,
    reporter: &R,
) -> ServerOutcome
where
    A: PlatformAdmin + ?Sized,
    R: RunReporter + ?Sized,
{
    match bring_up(admin, server, context, reporter) {
        Ok(outcome) => outcome,
        Err(error) => {
            let report = describe_failure(&error);
            reporter.server_failed(server.name, &report);
            ServerOutcome::Failed(report)
        }
    }
}

fn bring_up<A, R>(
    admin: &A,
    server: &ServerDefinition,
    context: &LabContext,
    reporter: &R,
) -> Result<ServerOutcome, AdminError>
where
    A: PlatformAdmin + ?Sized,
    R: RunReporter + ?Sized,
{
    if admin.is_server_configured(server.name)? {
        reporter.server_reactivating(server.name);
        let activation = admin.activate_server_if_down(server.name)?;
        reporter.server_activated(server.name, activation);
        return Ok(ServerOutcome::Reactivated(activation));
    }

    let plan = server.plan(context);
    reporter.server_configuring(server.name, plan.steps.len());
    for step in &plan.steps {
        admin.apply(&plan.target, step)?;
    }
    admin.activate_server_stored_config(server.name)?;
    reporter.server_activated(server.name, Activation::Started);
    Ok(ServerOutcome::Configured)
}

/// Runs [`configure_or_reactivate`] for every server, then closes the session.
///
/// The session is closed exactly once, after the last server, whatever the
/// individual outcomes.
pub fn run_batch<A, R>(
    admin: &A,
    session_server: &str,
    servers: &[ServerDefinition],
    context: &LabContext,
    reporter: &R,
) -> BatchReport
where
    A: PlatformAdmin + ?Sized,
    R: RunReporter + ?Sized,
{
    let outcomes = servers
        .iter()
        .map(|server| {
            (
                server.name,
                configure_or_reactivate(admin, server, context, reporter),
            )
        })
        .collect();
    admin.close_session();
    reporter.session_closed(session_server);
    BatchReport { outcomes }
}
