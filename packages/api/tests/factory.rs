//! Builder factories and the shared default transport

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::MockTransport;
use gromit::{Gromit, Method, RequestConfig, TransportConfig, Transport};
use serde_json::json;

#[test]
fn test_default_transport_is_shared() {
    let first = gromit::default_transport();
    let second = gromit::default_transport();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.name(), "hyper-http1");

    let a = gromit::new(RequestConfig::default());
    let b = Gromit::new(RequestConfig::default().with_path("/x"));
    assert!(Arc::ptr_eq(a.transport(), b.transport()));

    // too late: the default already exists
    assert!(!gromit::init_default_transport(TransportConfig::default()));
}

#[test]
fn test_invalid_transport_config_is_rejected() {
    env_logger::try_init().ok(); // Ignore error if already initialized

    let config = TransportConfig::default().with_user_agent("");
    assert!(config.validate().is_err());
    assert!(!gromit::init_default_transport(config));

    let config = TransportConfig::default().with_connect_timeout(Duration::ZERO);
    assert!(!gromit::init_default_transport(config));
}

#[test]
fn test_with_transport_uses_given_transport() {
    let transport = MockTransport::json(200, json!({"ok": true}));

    let api = gromit::with_transport(
        RequestConfig::default().with_base_url("http://api.test"),
        transport.clone(),
    );
    let response = tokio_test::block_on(api.get("/ping", None)).expect("get should succeed");

    assert_eq!(response.json(), Some(&json!({"ok": true})));
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Get);
    assert_eq!(calls[0].url(), "http://api.test/ping");

    let same = Gromit::with_transport(RequestConfig::default(), transport.clone());
    assert_eq!(same.transport().name(), "mock");
}
