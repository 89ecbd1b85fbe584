//! End-to-end routing tests over a real socket.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use reqwest::Method;
use simple_router::routing::{get_param, Router};

mod common;

#[tokio::test]
async fn test_params_reach_handler() {
    let mut router = Router::new();
    router
        .get(r"/get/(?P<param1>\d+)/(?P<param2>\w+)", |req: Request<Body>| async move {
            let mut data = BTreeMap::new();
            for name in ["param1", "param2", "invalid1"] {
                if let Some(value) = get_param(&req, name) {
                    data.insert(name, value.to_string());
                }
            }
            axum::Json(data)
        })
        .unwrap();
    let server = common::start_server(router).await;

    let res = common::client()
        .get(server.url("/get/123/abc"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::OK);
    let body: BTreeMap<String, String> = res.json().await.unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body["param1"], "123");
    assert_eq!(body["param2"], "abc");
}

#[tokio::test]
async fn test_method_not_allowed_then_not_found() {
    let mut router = Router::new();
    router
        .get("/ops", |_req: Request<Body>| async { "ops" })
        .unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.post(server.url("/ops")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "Method Not Allowed");

    let res = client.get(server.url("/ops2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Not Found");
}

#[tokio::test]
async fn test_custom_fallbacks_supersede_defaults() {
    let mut router = Router::new();
    router
        .not_found(|_req: Request<Body>| async { (StatusCode::OK, "custom") })
        .method_not_allowed(|_req: Request<Body>| async { (StatusCode::IM_A_TEAPOT, "teapot") });
    router
        .put("/kettle", |_req: Request<Body>| async { "put" })
        .unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.get(server.url("/anything/at/all")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "custom");

    let res = client.get(server.url("/kettle")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(res.headers()["allow"], "PUT");
    assert_eq!(res.text().await.unwrap(), "teapot");
}

#[tokio::test]
async fn test_extension_method_is_routed() {
    let mut router = Router::new();
    let purge = Method::from_bytes(b"PURGE").unwrap();
    router
        .add(purge.clone(), r"/cache/.+", |_req: Request<Body>| async { "purged" })
        .unwrap();
    let server = common::start_server(router).await;

    let res = common::client()
        .request(purge, server.url("/cache/users/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "purged");
}

#[tokio::test]
async fn test_concurrent_requests_see_their_own_params() {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    let mut router = Router::new();
    router
        .get(r"/echo/(?P<n>\d+)", move |req: Request<Body>| {
            counter.fetch_add(1, Ordering::SeqCst);
            let n = get_param(&req, "n").unwrap_or_default().to_string();
            async move {
                tokio::task::yield_now().await;
                n
            }
        })
        .unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let url = server.url(&format!("/echo/{}", i));
        tasks.push(tokio::spawn(async move {
            let body = client.get(url).send().await.unwrap().text().await.unwrap();
            (i, body)
        }));
    }

    for task in tasks {
        let (i, body) = task.await.unwrap();
        assert_eq!(body, i.to_string());
    }
    assert_eq!(hits.load(Ordering::SeqCst), 32);
}
