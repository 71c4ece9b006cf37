//! Blocking HTTP implementation of [`PlatformAdmin`].
//!
//! Liveness and activation calls use the session's own platform and admin
//! user. Configuration edits use the [`ConfigTarget`] supplied with each
//! command, so one session can configure servers hosted elsewhere.

use std::cell::Cell;
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use crate::admin::{Activation, PlatformAdmin};
use crate::command::{AdminCommand, ConfigTarget};
use crate::envelope::{boolean_flag, check_response, has_stored_configuration};
use crate::error::AdminError;
use crate::request::{AdminRequest, RequestBody};

const ADMIN_SERVICES: [&str; 3] = ["open-metadata", "admin-services", "users"];
const PLATFORM_SERVICES: [&str; 3] = ["open-metadata", "platform-services", "users"];

/// Transport options for [`HttpPlatformAdmin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// Accept self-signed or otherwise invalid TLS certificates.
    pub accept_invalid_certs: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// Identity of a platform session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Server the session was opened for.
    pub server_name: String,
    /// Platform URL root.
    pub platform_url: String,
    /// Administrator identity.
    pub admin_user: String,
}

/// Admin session speaking to one platform over HTTP.
#[derive(Debug)]
pub struct HttpPlatformAdmin {
    client: Client,
    identity: SessionIdentity,
    closed: Cell<bool>,
}

impl HttpPlatformAdmin {
    /// Opens a session. No request is sent until the first call.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidUrl`] for an unusable platform URL and
    /// [`AdminError::Client`] when the HTTP client cannot be built.
    pub fn open(identity: SessionIdentity, options: ClientOptions) -> Result<Self, AdminError> {
        platform_base(&identity.platform_url)?;
        let client = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(AdminError::Client)?;
        tracing::debug!(
            target: "coco_admin::http",
            server = %identity.server_name,
            platform = %identity.platform_url,
            admin = %identity.admin_user,
            "opened admin session"
        );
        Ok(Self {
            client,
            identity,
            closed: Cell::new(false),
        })
    }

    fn ensure_open(&self) -> Result<(), AdminError> {
        if self.closed.get() {
            return Err(AdminError::SessionClosed {
                server: self.identity.server_name.clone(),
            });
        }
        Ok(())
    }

    fn session_server_url(
        &self,
        root: [&str; 3],
        server: &str,
        tail: &[&str],
    ) -> Result<Url, AdminError> {
        let mut url = platform_base(&self.identity.platform_url)?;
        extend_path(&mut url, &root)?;
        extend_path(&mut url, &[self.identity.admin_user.as_str()])?;
        if root == PLATFORM_SERVICES {
            extend_path(&mut url, &["server-platform"])?;
        }
        extend_path(&mut url, &["servers", server])?;
        extend_path(&mut url, tail)?;
        Ok(url)
    }

    fn send(&self, builder: RequestBuilder, url: &Url) -> Result<Value, AdminError> {
        let endpoint = url.to_string();
        let response = builder.send().map_err(|source| AdminError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|source| AdminError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;
        tracing::debug!(target: "coco_admin::http", %endpoint, status, "admin response");
        check_response(&endpoint, status, &body)
    }

    fn call(&self, method: Method, url: Url, body: RequestBody) -> Result<Value, AdminError> {
        self.ensure_open()?;
        tracing::debug!(target: "coco_admin::http", %method, %url, "admin request");
        let builder = self.client.request(method, url.clone());
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Text(text) => builder.header(CONTENT_TYPE, "text/plain").body(text),
        };
        self.send(builder, &url)
    }
}

impl PlatformAdmin for HttpPlatformAdmin {
    fn is_server_configured(&self, server: &str) -> Result<bool, AdminError> {
        let url = self.session_server_url(ADMIN_SERVICES, server, &["configuration"])?;
        let value = self.call(Method::GET, url, RequestBody::Empty)?;
        Ok(has_stored_configuration(&value))
    }

    fn activate_server_if_down(&self, server: &str) -> Result<Activation, AdminError> {
        let url = self.session_server_url(PLATFORM_SERVICES, server, &["is-active"])?;
        let endpoint = url.to_string();
        let value = self.call(Method::GET, url, RequestBody::Empty)?;
        if boolean_flag(&endpoint, &value)? {
            return Ok(Activation::AlreadyActive);
        }
        self.activate_server_stored_config(server)?;
        Ok(Activation::Started)
    }

    fn activate_server_stored_config(&self, server: &str) -> Result<(), AdminError> {
        let url = self.session_server_url(ADMIN_SERVICES, server, &["instance"])?;
        self.call(Method::POST, url, RequestBody::Empty).map(drop)
    }

    fn apply(&self, target: &ConfigTarget, command: &AdminCommand) -> Result<(), AdminError> {
        let request = AdminRequest::try_from(command)?;
        let mut url = platform_base(&target.platform_url)?;
        extend_path(&mut url, &ADMIN_SERVICES)?;
        extend_path(
            &mut url,
            &[target.admin_user.as_str(), "servers", target.server_name.as_str()],
        )?;
        let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();
        extend_path(&mut url, &segments)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        tracing::debug!(
            target: "coco_admin::http",
            operation = command.operation(),
            target_server = %target,
            "applying configuration command"
        );
        self.call(Method::POST, url, request.body).map(drop)
    }

    fn close_session(&self) {
        if !self.closed.replace(true) {
            tracing::debug!(
                target: "coco_admin::http",
                server = %self.identity.server_name,
                "closed admin session"
            );
        }
    }
}

fn platform_base(platform_url: &str) -> Result<Url, AdminError> {
    let url = Url::parse(platform_url).map_err(|error| AdminError::InvalidUrl {
        url: platform_url.to_owned(),
        reason: error.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(AdminError::InvalidUrl {
            url: platform_url.to_owned(),
            reason: String::from("URL cannot be a base"),
        });
    }
    Ok(url)
}

fn extend_path(url: &mut Url, segments: &[&str]) -> Result<(), AdminError> {
    let text = url.to_string();
    let mut path = url.path_segments_mut().map_err(|()| AdminError::InvalidUrl {
        url: text,
        reason: String::from("URL cannot be a base"),
    })?;
    path.pop_if_empty().extend(segments);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_unparseable_platform() {
        let identity = SessionIdentity {
            server_name: String::from("cocoMDS1"),
            platform_url: String::from("not a url"),
            admin_user: String::from("garygeeke"),
        };
        let error = HttpPlatformAdmin::open(identity, ClientOptions::default())
            .expect_err("bad URL must be rejected");
        assert!(matches!(error, AdminError::InvalidUrl { .. }));
    }

    #[test]
    fn extend_path_encodes_segments() {
        let mut url = platform_base("https://lake:7444/").expect("parse base");
        extend_path(&mut url, &["metadata-collection-name", "Data Lake Users"])
            .expect("extend path");
        assert_eq!(
            url.as_str(),
            "https://lake:7444/metadata-collection-name/Data%20Lake%20Users"
        );
    }
}
