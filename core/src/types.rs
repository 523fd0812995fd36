//! Resource records and per-operation request types for the timer API.
//!
//! # Design
//! Resources mirror the service's JSON schema (camelCase on the wire) and are
//! defined independently from the mock-server crate; integration tests catch
//! schema drift. Request types model every field as `Option` so that a
//! loosely-typed JSON map converts into them without loss: missing keys become
//! `None`, unknown keys are dropped. Which fields are required is decided by
//! `TimerClient` validation, not by deserialization.

use serde::{Deserialize, Serialize};

/// A timer pool owned by the calling account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerPool {
    pub timer_pool_id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unix epoch seconds.
    pub create_at: i64,
}

/// A single scheduled HTTP callback inside a pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub timer_id: String,
    pub timer_pool_id: String,
    pub owner_id: String,
    pub callback_method: String,
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_body: Option<String>,
    /// Unix epoch seconds at which the callback fires.
    pub execute_time: i64,
    pub retry_max: u32,
    pub create_at: i64,
}

/// One page of a list operation.
///
/// `next_page_token` is opaque; pass it back unchanged to fetch the next page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Envelope for singular get / create / update responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemResult<T> {
    pub item: T,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Pagination options shared by `DescribeTimerPool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ListTimerPoolsRequest {
    pub page_token: Option<String>,
    pub limit: Option<u32>,
}

impl ListTimerPoolsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTimerPoolRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateTimerPoolRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GetTimerPoolRequest {
    pub timer_pool_name: Option<String>,
}

impl GetTimerPoolRequest {
    pub fn new(timer_pool_name: impl Into<String>) -> Self {
        Self {
            timer_pool_name: Some(timer_pool_name.into()),
        }
    }
}

/// Only `description` is mutable on an existing pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateTimerPoolRequest {
    pub timer_pool_name: Option<String>,
    pub description: Option<String>,
}

impl UpdateTimerPoolRequest {
    pub fn new(timer_pool_name: impl Into<String>) -> Self {
        Self {
            timer_pool_name: Some(timer_pool_name.into()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteTimerPoolRequest {
    pub timer_pool_name: Option<String>,
}

impl DeleteTimerPoolRequest {
    pub fn new(timer_pool_name: impl Into<String>) -> Self {
        Self {
            timer_pool_name: Some(timer_pool_name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ListTimersRequest {
    pub timer_pool_name: Option<String>,
    pub page_token: Option<String>,
    pub limit: Option<u32>,
}

impl ListTimersRequest {
    pub fn new(timer_pool_name: impl Into<String>) -> Self {
        Self {
            timer_pool_name: Some(timer_pool_name.into()),
            ..Self::default()
        }
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Request payload for scheduling a callback. The server rejects the call if
/// `callback_method`, `callback_url` or `execute_time` is missing; the client
/// forwards whatever is set and leaves that check to the server. A callback
/// body cannot be set on create; `Timer::callback_body` is only read back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTimerRequest {
    pub timer_pool_name: Option<String>,
    pub callback_method: Option<String>,
    pub callback_url: Option<String>,
    pub execute_time: Option<i64>,
    pub retry_max: Option<u32>,
}

impl CreateTimerRequest {
    pub fn new(timer_pool_name: impl Into<String>) -> Self {
        Self {
            timer_pool_name: Some(timer_pool_name.into()),
            ..Self::default()
        }
    }

    pub fn with_callback(mut self, method: impl Into<String>, url: impl Into<String>) -> Self {
        self.callback_method = Some(method.into());
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_execute_time(mut self, execute_time: i64) -> Self {
        self.execute_time = Some(execute_time);
        self
    }

    pub fn with_retry_max(mut self, retry_max: u32) -> Self {
        self.retry_max = Some(retry_max);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GetTimerRequest {
    pub timer_pool_name: Option<String>,
    pub timer_id: Option<String>,
}

impl GetTimerRequest {
    pub fn new(timer_pool_name: impl Into<String>, timer_id: impl Into<String>) -> Self {
        Self {
            timer_pool_name: Some(timer_pool_name.into()),
            timer_id: Some(timer_id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteTimerRequest {
    pub timer_pool_name: Option<String>,
    pub timer_id: Option<String>,
}

impl DeleteTimerRequest {
    pub fn new(timer_pool_name: impl Into<String>, timer_id: impl Into<String>) -> Self {
        Self {
            timer_pool_name: Some(timer_pool_name.into()),
            timer_id: Some(timer_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_map_drops_unknown_keys() {
        let req: CreateTimerPoolRequest =
            serde_json::from_str(r#"{"name":"pool1","unused":"x"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("pool1"));
        assert!(req.description.is_none());
    }

    #[test]
    fn create_timer_request_ignores_callback_body() {
        let req: CreateTimerRequest = serde_json::from_str(
            r#"{"timerPoolName":"p","callbackBody":"x","executeTime":1000}"#,
        )
        .unwrap();
        assert_eq!(req, CreateTimerRequest::new("p").with_execute_time(1000));
    }

    #[test]
    fn request_from_map_treats_null_as_absent() {
        let req: GetTimerRequest =
            serde_json::from_str(r#"{"timerPoolName":null,"timerId":"t1"}"#).unwrap();
        assert!(req.timer_pool_name.is_none());
        assert_eq!(req.timer_id.as_deref(), Some("t1"));
    }

    #[test]
    fn timer_pool_description_is_optional() {
        let pool: TimerPool = serde_json::from_str(
            r#"{"timerPoolId":"id-1","ownerId":"owner","name":"p","createAt":1700000000}"#,
        )
        .unwrap();
        assert!(pool.description.is_none());
        assert_eq!(pool.create_at, 1_700_000_000);
    }

    #[test]
    fn page_without_next_token() {
        let page: Page<TimerPool> = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn timer_uses_camel_case_keys() {
        let timer = Timer {
            timer_id: "t1".to_string(),
            timer_pool_id: "p1".to_string(),
            owner_id: "o".to_string(),
            callback_method: "POST".to_string(),
            callback_url: "https://example.com/hook".to_string(),
            callback_body: None,
            execute_time: 1000,
            retry_max: 3,
            create_at: 900,
        };
        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["callbackUrl"], "https://example.com/hook");
        assert_eq!(json["executeTime"], 1000);
        assert!(json.get("callbackBody").is_none());
    }
}
