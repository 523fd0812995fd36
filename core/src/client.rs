//! Stateless request builder and dispatcher for the timer API.
//!
//! # Design
//! `TimerClient` holds only its transport and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! validates input and produces a `ServiceRequest`, and a public method that
//! builds, dispatches exactly one transport call via `execute`, and decodes
//! the JSON value into a typed result. Validation always completes before a
//! body is assembled, so a rejected call never reaches the transport.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::http::{HttpMethod, QueryPairs, Route, ServiceRequest};
use crate::transport::Transport;
use crate::types::{
    CreateTimerPoolRequest, CreateTimerRequest, DeleteTimerPoolRequest, DeleteTimerRequest,
    GetTimerPoolRequest, GetTimerRequest, ItemResult, ListTimerPoolsRequest, ListTimersRequest,
    Page, Timer, TimerPool, UpdateTimerPoolRequest,
};

pub const SERVICE: &str = "Gs2Timer";
pub const ENDPOINT: &str = "timer";

/// Synchronous, stateless client for the timer API.
#[derive(Debug, Clone)]
pub struct TimerClient<T> {
    transport: T,
}

#[derive(Serialize)]
struct TimerPoolBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimerBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_method: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    execute_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_max: Option<u32>,
}

impl<T: Transport> TimerClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Timer pools
    // -----------------------------------------------------------------------

    pub fn build_list_timer_pools(&self, request: &ListTimerPoolsRequest) -> ServiceRequest {
        ServiceRequest {
            method: HttpMethod::Get,
            route: route("DescribeTimerPool", &["timerPool"]),
            body: None,
            query: page_query(request.page_token.as_deref(), request.limit),
        }
    }

    pub fn build_create_timer_pool(
        &self,
        request: &CreateTimerPoolRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let body = to_body(&TimerPoolBody {
            name: request.name.as_deref(),
            description: request.description.as_deref(),
        })?;
        Ok(ServiceRequest {
            method: HttpMethod::Post,
            route: route("CreateTimerPool", &["timerPool"]),
            body: Some(body),
            query: QueryPairs::new(),
        })
    }

    pub fn build_get_timer_pool(
        &self,
        request: &GetTimerPoolRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let pool = require("timerPoolName", &request.timer_pool_name)?;
        Ok(ServiceRequest {
            method: HttpMethod::Get,
            route: route("GetTimerPool", &["timerPool", pool]),
            body: None,
            query: QueryPairs::new(),
        })
    }

    pub fn build_update_timer_pool(
        &self,
        request: &UpdateTimerPoolRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let pool = require("timerPoolName", &request.timer_pool_name)?;
        let body = to_body(&TimerPoolBody {
            name: None,
            description: request.description.as_deref(),
        })?;
        Ok(ServiceRequest {
            method: HttpMethod::Put,
            route: route("UpdateTimerPool", &["timerPool", pool]),
            body: Some(body),
            query: QueryPairs::new(),
        })
    }

    pub fn build_delete_timer_pool(
        &self,
        request: &DeleteTimerPoolRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let pool = require("timerPoolName", &request.timer_pool_name)?;
        Ok(ServiceRequest {
            method: HttpMethod::Delete,
            route: route("DeleteTimerPool", &["timerPool", pool]),
            body: None,
            query: QueryPairs::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    pub fn build_list_timers(
        &self,
        request: &ListTimersRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let pool = require("timerPoolName", &request.timer_pool_name)?;
        Ok(ServiceRequest {
            method: HttpMethod::Get,
            route: route("DescribeTimer", &["timerPool", pool, "timer"]),
            body: None,
            query: page_query(request.page_token.as_deref(), request.limit),
        })
    }

    pub fn build_create_timer(
        &self,
        request: &CreateTimerRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let pool = require("timerPoolName", &request.timer_pool_name)?;
        let body = to_body(&TimerBody {
            callback_method: request.callback_method.as_deref(),
            callback_url: request.callback_url.as_deref(),
            execute_time: request.execute_time,
            retry_max: request.retry_max,
        })?;
        Ok(ServiceRequest {
            method: HttpMethod::Post,
            route: route("CreateTimer", &["timerPool", pool, "timer"]),
            body: Some(body),
            query: QueryPairs::new(),
        })
    }

    pub fn build_get_timer(
        &self,
        request: &GetTimerRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let pool = require("timerPoolName", &request.timer_pool_name)?;
        let timer = require("timerId", &request.timer_id)?;
        Ok(ServiceRequest {
            method: HttpMethod::Get,
            route: route("GetTimer", &["timerPool", pool, "timer", timer]),
            body: None,
            query: QueryPairs::new(),
        })
    }

    pub fn build_delete_timer(
        &self,
        request: &DeleteTimerRequest,
    ) -> Result<ServiceRequest, ClientError> {
        let pool = require("timerPoolName", &request.timer_pool_name)?;
        let timer = require("timerId", &request.timer_id)?;
        Ok(ServiceRequest {
            method: HttpMethod::Delete,
            route: route("DeleteTimer", &["timerPool", pool, "timer", timer]),
            body: None,
            query: QueryPairs::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn list_timer_pools(
        &self,
        request: &ListTimerPoolsRequest,
    ) -> Result<Page<TimerPool>, ClientError> {
        let value = self.execute(&self.build_list_timer_pools(request))?;
        decode(value)
    }

    pub fn create_timer_pool(
        &self,
        request: &CreateTimerPoolRequest,
    ) -> Result<ItemResult<TimerPool>, ClientError> {
        let value = self.execute(&self.build_create_timer_pool(request)?)?;
        decode(value)
    }

    pub fn get_timer_pool(
        &self,
        request: &GetTimerPoolRequest,
    ) -> Result<ItemResult<TimerPool>, ClientError> {
        let value = self.execute(&self.build_get_timer_pool(request)?)?;
        decode(value)
    }

    pub fn update_timer_pool(
        &self,
        request: &UpdateTimerPoolRequest,
    ) -> Result<ItemResult<TimerPool>, ClientError> {
        let value = self.execute(&self.build_update_timer_pool(request)?)?;
        decode(value)
    }

    pub fn delete_timer_pool(&self, request: &DeleteTimerPoolRequest) -> Result<(), ClientError> {
        self.execute(&self.build_delete_timer_pool(request)?)?;
        Ok(())
    }

    pub fn list_timers(&self, request: &ListTimersRequest) -> Result<Page<Timer>, ClientError> {
        let value = self.execute(&self.build_list_timers(request)?)?;
        decode(value)
    }

    pub fn create_timer(
        &self,
        request: &CreateTimerRequest,
    ) -> Result<ItemResult<Timer>, ClientError> {
        let value = self.execute(&self.build_create_timer(request)?)?;
        decode(value)
    }

    pub fn get_timer(&self, request: &GetTimerRequest) -> Result<ItemResult<Timer>, ClientError> {
        let value = self.execute(&self.build_get_timer(request)?)?;
        decode(value)
    }

    pub fn delete_timer(&self, request: &DeleteTimerRequest) -> Result<(), ClientError> {
        self.execute(&self.build_delete_timer(request)?)?;
        Ok(())
    }

    /// Dispatch a built request to the matching transport verb and return the
    /// transport's value unchanged.
    pub fn execute(&self, request: &ServiceRequest) -> Result<Value, ClientError> {
        debug!(
            service = request.route.service,
            operation = request.route.operation,
            method = %request.method,
            path = %request.route.path,
            "dispatching"
        );
        let route = &request.route;
        let query = request.query.as_slice();
        let result = match (request.method, &request.body) {
            (HttpMethod::Get, _) => self.transport.get(route, query),
            (HttpMethod::Delete, _) => self.transport.delete(route, query),
            (HttpMethod::Post, Some(body)) => self.transport.post(route, body, query),
            (HttpMethod::Post, None) => self.transport.post(route, &Value::Null, query),
            (HttpMethod::Put, Some(body)) => self.transport.put(route, body, query),
            (HttpMethod::Put, None) => self.transport.put(route, &Value::Null, query),
        };
        Ok(result?)
    }
}

// Names go into the path unescaped; `HttpTransport` escapes each segment.
fn route(operation: &'static str, segments: &[&str]) -> Route {
    Route::new(SERVICE, operation, ENDPOINT, segments)
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, ClientError> {
    match value {
        Some(v) => Ok(v.as_str()),
        None => {
            warn!(field, "rejecting request with missing argument");
            Err(ClientError::NullArgument { field })
        }
    }
}

/// Empty tokens and a zero limit are treated as "not provided".
fn page_query(page_token: Option<&str>, limit: Option<u32>) -> QueryPairs {
    let mut query = QueryPairs::new();
    if let Some(token) = page_token.filter(|t| !t.is_empty()) {
        query.push(("pageToken".to_string(), token.to_string()));
    }
    if let Some(limit) = limit.filter(|l| *l > 0) {
        query.push(("limit".to_string(), limit.to_string()));
    }
    query
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
