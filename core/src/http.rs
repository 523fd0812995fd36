//! Request-as-data types shared by the client and its transports.
//!
//! # Design
//! A `ServiceRequest` describes one remote call as plain data: verb, route,
//! optional JSON body and ordered query pairs. `TimerClient::build_*` methods
//! produce these without touching the network, which keeps request shape
//! deterministic and testable. The transport owns turning a `Route` into a
//! URL and executing it.

use std::fmt;

use serde_json::Value;

/// Query parameters in the order they are sent.
pub type QueryPairs = Vec<(String, String)>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a call goes: service and operation names for signing/telemetry, the
/// endpoint group the transport resolves to a host, and the path on that host.
///
/// `path` is the segments joined with `/`, unescaped. `segments` keeps each
/// piece separate so a transport can escape names without re-splitting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub service: &'static str,
    pub operation: &'static str,
    pub endpoint: &'static str,
    pub path: String,
    pub segments: Vec<String>,
}

impl Route {
    pub fn new(
        service: &'static str,
        operation: &'static str,
        endpoint: &'static str,
        segments: &[&str],
    ) -> Self {
        let path = segments.iter().fold(String::new(), |mut path, segment| {
            path.push('/');
            path.push_str(segment);
            path
        });
        Self {
            service,
            operation,
            endpoint,
            path,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A single remote call described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub method: HttpMethod,
    pub route: Route,
    pub body: Option<Value>,
    pub query: QueryPairs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joins_segments_verbatim() {
        let segments = ["timerPool", "a/b#c", "timer", "t?1"];
        let route = Route::new("Gs2Timer", "GetTimer", "timer", &segments);
        assert_eq!(route.path, "/timerPool/a/b#c/timer/t?1");
        assert_eq!(route.segments, vec!["timerPool", "a/b#c", "timer", "t?1"]);
    }
}
