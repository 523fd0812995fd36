//! In-memory stand-in for the remote timer pool service.
//!
//! Serves the same REST layout as the real service so the client can be
//! exercised end-to-end. Timers are stored but never fired.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const OWNER_ID: &str = "mock-owner";
pub const DEFAULT_LIMIT: usize = 30;
pub const DEFAULT_RETRY_MAX: u32 = 3;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerPool {
    pub timer_pool_id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub create_at: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub timer_id: String,
    pub timer_pool_id: String,
    pub owner_id: String,
    pub callback_method: String,
    pub callback_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_body: Option<String>,
    pub execute_time: i64,
    pub retry_max: u32,
    pub create_at: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Item<T> {
    pub item: T,
}

#[derive(Deserialize)]
pub struct CreateTimerPool {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTimerPool {
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimer {
    pub callback_method: String,
    pub callback_url: String,
    pub callback_body: Option<String>,
    pub execute_time: i64,
    #[serde(default = "default_retry_max")]
    pub retry_max: u32,
}

fn default_retry_max() -> u32 {
    DEFAULT_RETRY_MAX
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_token: Option<String>,
    pub limit: Option<usize>,
}

/// Pools keyed by name; timers keyed by pool name, in creation order.
#[derive(Default)]
pub struct Store {
    pools: BTreeMap<String, TimerPool>,
    timers: HashMap<String, Vec<Timer>>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/timerPool", get(list_pools).post(create_pool))
        .route(
            "/timerPool/{pool}",
            get(get_pool).put(update_pool).delete(delete_pool),
        )
        .route("/timerPool/{pool}/timer", get(list_timers).post(create_timer))
        .route(
            "/timerPool/{pool}/timer/{timer_id}",
            get(get_timer).delete(delete_timer),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// `pageToken` is the decimal offset of the first item to return.
fn paginate<T: Clone>(items: &[T], params: &PageParams) -> Result<Page<T>, StatusCode> {
    let offset = match params.page_token.as_deref() {
        Some(token) if !token.is_empty() => {
            token.parse::<usize>().map_err(|_| StatusCode::BAD_REQUEST)?
        }
        _ => 0,
    };
    let limit = params.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);
    let end = offset.saturating_add(limit).min(items.len());
    let page = items.get(offset..end).unwrap_or_default().to_vec();
    let next_page_token = (end < items.len()).then(|| end.to_string());
    Ok(Page {
        items: page,
        next_page_token,
    })
}

async fn list_pools(
    State(db): State<Db>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<TimerPool>>, StatusCode> {
    let store = db.read().await;
    let pools: Vec<TimerPool> = store.pools.values().cloned().collect();
    paginate(&pools, &params).map(Json)
}

async fn create_pool(
    State(db): State<Db>,
    Json(input): Json<CreateTimerPool>,
) -> Result<Json<Item<TimerPool>>, StatusCode> {
    let mut store = db.write().await;
    if store.pools.contains_key(&input.name) {
        return Err(StatusCode::CONFLICT);
    }
    let pool = TimerPool {
        timer_pool_id: Uuid::new_v4().to_string(),
        owner_id: OWNER_ID.to_string(),
        name: input.name,
        description: input.description,
        create_at: now_secs(),
    };
    store.pools.insert(pool.name.clone(), pool.clone());
    Ok(Json(Item { item: pool }))
}

async fn get_pool(
    State(db): State<Db>,
    Path(pool): Path<String>,
) -> Result<Json<Item<TimerPool>>, StatusCode> {
    let store = db.read().await;
    store
        .pools
        .get(&pool)
        .cloned()
        .map(|item| Json(Item { item }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_pool(
    State(db): State<Db>,
    Path(pool): Path<String>,
    Json(input): Json<UpdateTimerPool>,
) -> Result<Json<Item<TimerPool>>, StatusCode> {
    let mut store = db.write().await;
    let existing = store.pools.get_mut(&pool).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(description) = input.description {
        existing.description = Some(description);
    }
    Ok(Json(Item {
        item: existing.clone(),
    }))
}

async fn delete_pool(State(db): State<Db>, Path(pool): Path<String>) -> StatusCode {
    let mut store = db.write().await;
    match store.pools.remove(&pool) {
        Some(_) => {
            store.timers.remove(&pool);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_timers(
    State(db): State<Db>,
    Path(pool): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Timer>>, StatusCode> {
    let store = db.read().await;
    if !store.pools.contains_key(&pool) {
        return Err(StatusCode::NOT_FOUND);
    }
    let timers = store.timers.get(&pool).map(Vec::as_slice).unwrap_or_default();
    paginate(timers, &params).map(Json)
}

async fn create_timer(
    State(db): State<Db>,
    Path(pool): Path<String>,
    Json(input): Json<CreateTimer>,
) -> Result<Json<Item<Timer>>, StatusCode> {
    let mut store = db.write().await;
    let timer_pool_id = store
        .pools
        .get(&pool)
        .map(|p| p.timer_pool_id.clone())
        .ok_or(StatusCode::NOT_FOUND)?;
    let timer = Timer {
        timer_id: Uuid::new_v4().to_string(),
        timer_pool_id,
        owner_id: OWNER_ID.to_string(),
        callback_method: input.callback_method,
        callback_url: input.callback_url,
        callback_body: input.callback_body,
        execute_time: input.execute_time,
        retry_max: input.retry_max,
        create_at: now_secs(),
    };
    store.timers.entry(pool).or_default().push(timer.clone());
    Ok(Json(Item { item: timer }))
}

async fn get_timer(
    State(db): State<Db>,
    Path((pool, timer_id)): Path<(String, String)>,
) -> Result<Json<Item<Timer>>, StatusCode> {
    let store = db.read().await;
    store
        .timers
        .get(&pool)
        .and_then(|timers| timers.iter().find(|t| t.timer_id == timer_id))
        .cloned()
        .map(|item| Json(Item { item }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_timer(
    State(db): State<Db>,
    Path((pool, timer_id)): Path<(String, String)>,
) -> StatusCode {
    let mut store = db.write().await;
    let Some(timers) = store.timers.get_mut(&pool) else {
        return StatusCode::NOT_FOUND;
    };
    let before = timers.len();
    timers.retain(|t| t.timer_id != timer_id);
    if timers.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
