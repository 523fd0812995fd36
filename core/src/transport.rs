//! The transport collaborator and its blocking HTTP implementation.
//!
//! # Design
//! `Transport` is the seam between request construction and I/O: one method
//! per verb, each returning the decoded JSON value or a `TransportError`.
//! Signing, endpoint resolution and status handling all live behind it.
//! `HttpTransport` is the stock implementation over `ureq`; tests substitute
//! mocks or recording transports.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, Route};

/// Everything except RFC 3986 unreserved characters is escaped inside a path
/// segment, so `/`, `?`, `#` and `%` in a name never change the target.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Executes one call against the remote service.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn get(&self, route: &Route, query: &[(String, String)]) -> Result<Value, TransportError>;

    fn post(
        &self,
        route: &Route,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<Value, TransportError>;

    fn put(
        &self,
        route: &Route,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<Value, TransportError>;

    fn delete(&self, route: &Route, query: &[(String, String)]) -> Result<Value, TransportError>;
}

/// Blocking HTTP transport.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data and are mapped by `check_status`.
#[derive(Clone)]
pub struct HttpTransport {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self { config, agent }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Append each route segment, percent-encoded, to the endpoint's base URL,
    /// then append query pairs. `.` and `..` segments are rejected because URL
    /// normalization would resolve them against the preceding segments.
    pub fn url_for(
        &self,
        route: &Route,
        query: &[(String, String)],
    ) -> Result<Url, TransportError> {
        let mut raw = self.config.base_url(route.endpoint);
        for segment in &route.segments {
            if segment == "." || segment == ".." {
                return Err(TransportError::InvalidUrl(format!(
                    "dot segment in path {}",
                    route.path
                )));
            }
            raw.push('/');
            raw.extend(utf8_percent_encode(segment, SEGMENT));
        }
        let mut url =
            Url::parse(&raw).map_err(|e| TransportError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    fn send(
        &self,
        method: HttpMethod,
        route: &Route,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<Value, TransportError> {
        let url = self.url_for(route, query)?;
        debug!(
            service = route.service,
            operation = route.operation,
            %method,
            url = url.as_str(),
            "sending request"
        );

        let payload = body.map(Value::to_string);

        let result = match method {
            HttpMethod::Get => self.with_headers(self.agent.get(url.as_str())).call(),
            HttpMethod::Delete => self.with_headers(self.agent.delete(url.as_str())).call(),
            HttpMethod::Post => {
                let req = self.with_headers(self.agent.post(url.as_str()));
                match &payload {
                    Some(json) => req.content_type("application/json").send(json.as_bytes()),
                    None => req.send_empty(),
                }
            }
            HttpMethod::Put => {
                let req = self.with_headers(self.agent.put(url.as_str()));
                match &payload {
                    Some(json) => req.content_type("application/json").send(json.as_bytes()),
                    None => req.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(operation = route.operation, status, "received response");

        check_status(status, &text)?;
        decode_body(&text)
    }

    fn with_headers<B>(&self, mut req: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        for (name, value) in &self.config.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        req
    }
}

impl Transport for HttpTransport {
    fn get(&self, route: &Route, query: &[(String, String)]) -> Result<Value, TransportError> {
        self.send(HttpMethod::Get, route, None, query)
    }

    fn post(
        &self,
        route: &Route,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<Value, TransportError> {
        self.send(HttpMethod::Post, route, Some(body), query)
    }

    fn put(
        &self,
        route: &Route,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<Value, TransportError> {
        self.send(HttpMethod::Put, route, Some(body), query)
    }

    fn delete(&self, route: &Route, query: &[(String, String)]) -> Result<Value, TransportError> {
        self.send(HttpMethod::Delete, route, None, query)
    }
}

/// Map non-success status codes to the appropriate `TransportError` variant.
fn check_status(status: u16, body: &str) -> Result<(), TransportError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    if status == 404 {
        return Err(TransportError::NotFound);
    }
    Err(TransportError::Http {
        status,
        body: body.to_string(),
    })
}

/// An empty body (e.g. 204 on delete) decodes to `null`.
fn decode_body(text: &str) -> Result<Value, TransportError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))
}
