//! Human-readable rendering of admin failures.

use std::error::Error as _;
use std::fmt::Write as _;

use crate::error::{AdminError, PlatformException};

/// Renders `error` as a multi-line report.
///
/// Platform exceptions list the exception class, message, and the system and
/// user actions the platform suggests. Other errors print their message,
/// which already names the direct cause, followed by each deeper cause.
#[must_use]
pub fn describe_failure(error: &AdminError) -> String {
    match error {
        AdminError::Platform {
            endpoint,
            exception,
        } => describe_exception(endpoint, exception),
        other => describe_chain(other),
    }
}

fn describe_exception(endpoint: &str, exception: &PlatformException) -> String {
    let mut report = format!(
        "Exception: {}\n",
        exception
            .exception_class_name
            .as_deref()
            .unwrap_or("unknown exception")
    );
    let _ = writeln!(report, "  Endpoint: {endpoint}");
    let _ = writeln!(report, "  HTTP code: {}", exception.related_http_code);
    for (label, value) in [
        ("Message", &exception.exception_error_message),
        ("System action", &exception.exception_system_action),
        ("User action", &exception.exception_user_action),
    ] {
        if let Some(text) = value.as_deref() {
            let _ = writeln!(report, "  {label}: {text}");
        }
    }
    report.truncate(report.trim_end().len());
    report
}

fn describe_chain(error: &AdminError) -> String {
    let mut report = error.to_string();
    let mut source = error.source().and_then(|direct| direct.source());
    while let Some(cause) = source {
        let _ = write!(report, "\n  caused by: {cause}");
        source = cause.source();
    }
    report
}
