//! Fluent builder walkthrough against a local axum server

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use gromit::{GromitError, Payload, RequestConfig};
use serde_json::{Value, json};

async fn user() -> Json<Value> {
    Json(json!({"id": 1, "name": "wallace"}))
}

async fn create(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({"created": body})))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let app = Router::new()
        .route("/users/1", get(user))
        .route("/users", post(create))
        .route("/broken", get(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    let api = gromit::new(
        RequestConfig::default()
            .with_base_url(format!("http://{addr}"))
            .with_timeout(Duration::from_secs(5)),
    );

    // every step returns a new builder
    let authed = api.bearer_auth("demo-token");
    let response = authed.get("/users/1", None).await?;
    println!("GET /users/1 -> {} {:?}", response.status_code(), response.json());

    let response = authed
        .post("/users", Payload::from(json!({"name": "gromit"})), None)
        .await?;
    println!("POST /users -> {} {:?}", response.status_code(), response.json());

    match api.get("/broken", None).await {
        Ok(response) => println!("unexpected success: {}", response.status_code()),
        Err(err) => {
            if let Some(classified) = err.classified() {
                let serialized = classified.serialize();
                println!("GET /broken -> {serialized}");

                let restored = GromitError::deserialize_message(&serialized.to_string());
                println!(
                    "restored -> {} {} {}",
                    restored.status_code(),
                    restored.name(),
                    restored.message()
                );
            }
        }
    }

    Ok(())
}
