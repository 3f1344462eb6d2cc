//! GraphQL requester

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap as AxumHeaders, header};
use axum::routing::post;
use common::MockTransport;
use gromit::transport::error as transport_error;
use gromit::{GromitError, Method, Payload, RawResponse, graphql_request, graphql_request_with};
use serde_json::{Value, json};

#[tokio::test]
async fn test_posts_query_with_fresh_token() {
    let transport = MockTransport::json(200, json!({"data": {"user": {"name": "wallace"}}}));
    let token_calls = Arc::new(AtomicUsize::new(0));

    let graphql = {
        let token_calls = Arc::clone(&token_calls);
        graphql_request_with(transport.clone(), "http://gql.test/graphql", move || {
            let call = token_calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<_, std::io::Error>(format!("Bearer token-{call}")) }
        })
    };

    let data = graphql
        .request("query { user { name } }", json!({"id": 1}))
        .await
        .expect("graphql request should succeed");
    assert_eq!(data, Payload::Json(json!({"data": {"user": {"name": "wallace"}}})));

    graphql
        .request("query { me }", Value::Null)
        .await
        .expect("graphql request should succeed");

    assert_eq!(token_calls.load(Ordering::SeqCst), 2);

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(calls[0].url(), "http://gql.test/graphql");
    assert_eq!(
        calls[0].body(),
        Some(&Payload::Json(json!({"query": "query { user { name } }", "variables": {"id": 1}})))
    );

    let authorization = |index: usize| {
        calls[index]
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(authorization(0).as_deref(), Some("Bearer token-1"));
    assert_eq!(authorization(1).as_deref(), Some("Bearer token-2"));
}

#[tokio::test]
async fn test_token_failure_skips_request() {
    let transport = MockTransport::json(200, json!(null));
    let graphql = graphql_request_with(transport.clone(), "http://gql.test/graphql", || async {
        Err::<String, _>(std::io::Error::other("token service down"))
    });

    let err = graphql
        .request("query { me }", Value::Null)
        .await
        .expect_err("token failure should fail the request");

    assert!(err.is_token());
    assert_eq!(err.to_string(), "token service down");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let transport = MockTransport::json(200, json!(null));
    let graphql = graphql_request_with(transport.clone(), "http://gql.test/graphql", || async {
        Ok::<_, std::io::Error>("Bearer\nsplit".to_owned())
    });

    let err = graphql
        .request("query { me }", Value::Null)
        .await
        .expect_err("invalid token should fail the request");

    assert!(err.is_token());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_transport_failure_is_classified() {
    let transport = MockTransport::new(|_| {
        Err(Box::new(transport_error::status(
            RawResponse::new(401).with_data(json!({"errors": [{"message": "expired"}]})),
        )))
    });
    let graphql = graphql_request_with(transport, "http://gql.test/graphql", || async {
        Ok::<_, std::io::Error>("Bearer stale".to_owned())
    });

    let err = graphql
        .request("query { me }", Value::Null)
        .await
        .expect_err("401 should fail");
    let classified = err.classified().expect("failure should be classified");

    assert_eq!(classified.status_code(), 401);
    assert_eq!(classified.name(), "UNAUTHORIZED");
    assert!(GromitError::is_classified(classified));
}

#[tokio::test]
async fn test_default_transport_round_trip() {
    env_logger::try_init().ok(); // Ignore error if already initialized

    let app = Router::new().route(
        "/graphql",
        post(|headers: AxumHeaders, Json(body): Json<Value>| async move {
            let authorization = headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            Json(json!({
                "data": {
                    "authorization": authorization,
                    "query": body["query"],
                    "variables": body["variables"],
                }
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test listener should bind");
    let addr = listener.local_addr().expect("listener should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let graphql = graphql_request(format!("http://{addr}/graphql"), || async {
        Ok::<_, std::io::Error>("Bearer live".to_owned())
    });
    assert!(graphql.url().ends_with("/graphql"));

    let data = graphql
        .request("query ($n: Int) { square(n: $n) }", json!({"n": 3}))
        .await
        .expect("graphql request should succeed");

    assert_eq!(
        data.as_json(),
        Some(&json!({
            "data": {
                "authorization": "Bearer live",
                "query": "query ($n: Int) { square(n: $n) }",
                "variables": {"n": 3},
            }
        }))
    );
}
