use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Item, Page, Timer, TimerPool, DEFAULT_RETRY_MAX};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- pools ---

#[tokio::test]
async fn list_pools_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/timerPool"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page<TimerPool> = body_json(resp).await;
    assert!(page.items.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn create_pool_returns_item() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/timerPool",
            r#"{"name":"pool1","description":"first"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let created: Item<TimerPool> = body_json(resp).await;
    assert_eq!(created.item.name, "pool1");
    assert_eq!(created.item.description.as_deref(), Some("first"));
    assert!(!created.item.timer_pool_id.is_empty());
}

#[tokio::test]
async fn create_pool_without_name_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/timerPool", r#"{"description":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_pool_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/timerPool/missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_pool_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/timerPool/missing",
            r#"{"description":"nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_pool_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/timerPool/missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_timers_of_missing_pool() {
    let resp = app()
        .oneshot(empty_request("GET", "/timerPool/missing/timer"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_timer_in_missing_pool() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/timerPool/missing/timer",
            r#"{"callbackMethod":"POST","callbackUrl":"http://x","executeTime":10}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_pools_rejects_bad_page_token() {
    let resp = app()
        .oneshot(empty_request("GET", "/timerPool?pageToken=zzz"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn pool_and_timer_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create pool
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/timerPool", r#"{"name":"pool1"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let pool: Item<TimerPool> = body_json(resp).await;
    assert!(pool.item.description.is_none());

    // duplicate name
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/timerPool", r#"{"name":"pool1"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // update description
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/timerPool/pool1",
            r#"{"description":"updated"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Item<TimerPool> = body_json(resp).await;
    assert_eq!(updated.item.description.as_deref(), Some("updated"));
    assert_eq!(updated.item.timer_pool_id, pool.item.timer_pool_id);

    // create three timers
    let mut ids = Vec::new();
    for execute_time in [100, 200, 300] {
        let body = format!(
            r#"{{"callbackMethod":"POST","callbackUrl":"http://x","executeTime":{execute_time}}}"#
        );
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/timerPool/pool1/timer", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let timer: Item<Timer> = body_json(resp).await;
        assert_eq!(timer.item.retry_max, DEFAULT_RETRY_MAX);
        assert_eq!(timer.item.timer_pool_id, pool.item.timer_pool_id);
        ids.push(timer.item.timer_id);
    }

    // first page of two
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/timerPool/pool1/timer?limit=2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page<Timer> = body_json(resp).await;
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].timer_id, ids[0]);
    let token = page.next_page_token.expect("expected a next page token");

    // second page
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request(
            "GET",
            &format!("/timerPool/pool1/timer?limit=2&pageToken={token}"),
        ))
        .await
        .unwrap();
    let page: Page<Timer> = body_json(resp).await;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].timer_id, ids[2]);
    assert!(page.next_page_token.is_none());

    // get + delete one timer
    let uri = format!("/timerPool/pool1/timer/{}", ids[1]);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let timer: Item<Timer> = body_json(resp).await;
    assert_eq!(timer.item.execute_time, 200);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // deleting the pool drops its timers
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/timerPool/pool1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request(
            "GET",
            &format!("/timerPool/pool1/timer/{}", ids[0]),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
