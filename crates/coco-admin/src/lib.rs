//! Client for a metadata platform's administration services.
//!
//! The crate exposes the [`PlatformAdmin`] capability surface used by the lab
//! configurators, the [`AdminCommand`] vocabulary describing edits to a
//! server's stored configuration, the JSON payloads those edits carry, and a
//! blocking HTTP implementation, [`HttpPlatformAdmin`].

mod admin;
mod command;
mod diagnostics;
mod envelope;
mod error;
mod http;
pub mod payloads;
mod request;

pub use admin::{Activation, PlatformAdmin};
pub use command::{AdminCommand, ConfigTarget, LocalRepositoryMode, RemoteServer};
pub use diagnostics::describe_failure;
pub use error::{AdminError, PlatformException};
pub use http::{ClientOptions, HttpPlatformAdmin, SessionIdentity};

#[cfg(test)]
mod tests;
