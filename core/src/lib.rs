//! Synchronous client for the timer pool service.
//!
//! # Overview
//! Validates typed requests, turns them into `ServiceRequest` values and hands
//! each one to a `Transport`. The transport owns endpoint resolution, signing
//! and HTTP execution; `HttpTransport` is the stock blocking implementation.
//!
//! # Design
//! - `TimerClient` is stateless: it holds only its transport.
//! - Each operation has a pure `build_*` counterpart, so request shape can be
//!   checked without any I/O.
//! - Optional request fields are serialized only when set.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```rust,no_run
//! use timer_core::{ClientConfig, CreateTimerRequest, HttpTransport, TimerClient};
//!
//! let transport = HttpTransport::new(ClientConfig::from_env());
//! let client = TimerClient::new(transport);
//! let created = client.create_timer(
//!     &CreateTimerRequest::new("pool")
//!         .with_callback("POST", "https://example.com/hook")
//!         .with_execute_time(1_900_000_000),
//! )?;
//! println!("scheduled {}", created.item.timer_id);
//! # Ok::<(), timer_core::ClientError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::TimerClient;
pub use config::ClientConfig;
pub use error::{ClientError, TransportError};
pub use http::{HttpMethod, Route, ServiceRequest};
pub use transport::{HttpTransport, Transport};
pub use types::{
    CreateTimerPoolRequest, CreateTimerRequest, DeleteTimerPoolRequest, DeleteTimerRequest,
    GetTimerPoolRequest, GetTimerRequest, ItemResult, ListTimerPoolsRequest, ListTimersRequest,
    Page, Timer, TimerPool, UpdateTimerPoolRequest,
};
