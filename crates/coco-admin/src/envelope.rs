//! Decoding of the platform's response envelope.
//!
//! Admin and platform services wrap every answer in a JSON object carrying
//! `relatedHTTPCode`; anything other than 200 there is an exception even when
//! the HTTP status itself reports success.

use serde_json::Value;

use crate::error::{AdminError, PlatformException};

const OK_CODE: u64 = 200;

/// Validates a response and returns its decoded body.
///
/// Empty bodies decode to [`Value::Null`] on success.
pub(crate) fn check_response(endpoint: &str, status: u16, body: &str) -> Result<Value, AdminError> {
    let success = (200..300).contains(&status);
    if body.trim().is_empty() {
        return if success {
            Ok(Value::Null)
        } else {
            Err(status_error(endpoint, status))
        };
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !success => return Err(status_error(endpoint, status)),
        Err(source) => {
            return Err(AdminError::Decode {
                endpoint: endpoint.to_owned(),
                source,
            });
        }
    };

    match value.get("relatedHTTPCode").and_then(Value::as_u64) {
        Some(code) if code != OK_CODE => Err(platform_error(endpoint, value)),
        _ if !success => Err(status_error(endpoint, status)),
        _ => Ok(value),
    }
}

fn status_error(endpoint: &str, status: u16) -> AdminError {
    AdminError::Status {
        endpoint: endpoint.to_owned(),
        status,
    }
}

fn platform_error(endpoint: &str, value: Value) -> AdminError {
    match serde_json::from_value::<PlatformException>(value) {
        Ok(exception) => AdminError::Platform {
            endpoint: endpoint.to_owned(),
            exception: Box::new(exception),
        },
        Err(source) => AdminError::Decode {
            endpoint: endpoint.to_owned(),
            source,
        },
    }
}

/// Reads `omagserverConfig.auditTrail`, which only exists once a server has
/// had configuration stored for it.
pub(crate) fn has_stored_configuration(value: &Value) -> bool {
    value
        .get("omagserverConfig")
        .and_then(|config| config.get("auditTrail"))
        .is_some_and(|trail| !trail.is_null())
}

/// Reads the `flag` of a boolean response.
pub(crate) fn boolean_flag(endpoint: &str, value: &Value) -> Result<bool, AdminError> {
    value
        .get("flag")
        .and_then(Value::as_bool)
        .ok_or_else(|| AdminError::Decode {
            endpoint: endpoint.to_owned(),
            source: serde::de::Error::custom("boolean response is missing its flag"),
        })
}
