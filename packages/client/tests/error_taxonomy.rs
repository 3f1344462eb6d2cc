//! Classified errors as they travel through other layers

mod common;

use common::MockTransport;
use gromit_client::error::ErrorMessage;
use gromit_client::prelude::*;
use gromit_client::status;
use gromit_client::transport::error as transport_error;
use serde_json::json;

fn failed_fetch(status: u16) -> GromitError {
    let transport = MockTransport::failing(move || {
        Box::new(transport_error::status(
            RawResponse::new(status).with_data(json!({"reason": "upstream"})),
        ))
    });
    let requester = RequestBuilder::new(
        RequestConfig::default()
            .with_base_url("http://api.test")
            .with_path("/missing"),
        transport,
    );

    tokio_test::block_on(requester.fetch())
        .expect_err("fetch should fail")
        .into_classified()
        .expect("failure should be classified")
}

#[test]
fn test_serialized_error_survives_message_only_layer() {
    let original = failed_fetch(404);

    // a layer that only forwards the message text
    let forwarded = ErrorMessage::new(original.serialize().to_string());
    let recovered = GromitError::deserialize(&forwarded);

    assert_eq!(recovered.status_code(), 404);
    assert_eq!(recovered.name(), "NOT_FOUND");
    assert_eq!(recovered.message(), "Request failed with status code 404");
}

#[test]
fn test_unserialized_message_is_wrapped() {
    let recovered = GromitError::deserialize_message("plain failure");

    assert_eq!(recovered.status_code(), 500);
    assert_eq!(recovered.name(), "INTERNAL_SERVER_ERROR");
    assert_eq!(recovered.message(), "plain failure");
}

#[test]
fn test_json_form_describes_transport_context() {
    let err = failed_fetch(404);
    let rendered = err.to_json();

    assert_eq!(rendered["statusCode"], 404);
    assert_eq!(rendered["name"], "NOT_FOUND");
    assert_eq!(rendered["message"], "Request failed with status code 404");
    assert_eq!(rendered["data"]["requester"]["method"], "get");
    assert_eq!(rendered["data"]["requester"]["baseURL"], "http://api.test");
    assert_eq!(rendered["data"]["requester"]["url"], "/missing");
    assert_eq!(rendered["data"]["response"]["statusCode"], 404);
    assert_eq!(rendered["data"]["response"]["data"], json!({"reason": "upstream"}));
}

#[test]
fn test_wrap_reads_transport_status() {
    let raw = transport_error::status(RawResponse::new(502));
    let err = GromitError::wrap(&raw, None, None, None, None);

    assert_eq!(err.status_code(), 502);
    assert_eq!(err.name(), "BAD_GATEWAY");
    assert_eq!(err.message(), "Request failed with status code 502");

    let overridden = GromitError::wrap(&raw, Some(503), Some("try later"), None, None);
    assert_eq!(overridden.status_code(), 503);
    assert_eq!(overridden.name(), "SERVICE_UNAVAILABLE");
    assert_eq!(overridden.message(), "try later");
}

#[test]
fn test_wrap_unwraps_facade_error() {
    let classified = failed_fetch(409);
    let facade = Error::Classified(classified.clone());

    let err = GromitError::wrap(&facade, None, None, None, None);

    assert_eq!(err.status_code(), 409);
    assert_eq!(err.name(), classified.name());
    assert_eq!(err.location(), classified.location());
    assert!(err.transport_context().is_some());
}

#[test]
fn test_create_requires_registry_or_explicit_fields() {
    let err = GromitError::create(Some(499), None, None, None)
        .expect_err("unregistered status without a name should fail");
    assert!(err.is_unknown_status());

    let custom = GromitError::create(Some(499), Some("client went away"), Some("CLIENT_CLOSED"), None)
        .expect("explicit message and name should be enough");
    assert_eq!(custom.status_code(), 499);
    assert_eq!(custom.name(), "CLIENT_CLOSED");

    let defaulted = GromitError::create(None, None, None, Some(json!({"id": 7})))
        .expect("missing status should default to 500");
    assert_eq!(defaulted.status_code(), 500);
    assert_eq!(defaulted.message(), "Internal Server Error");
    assert_eq!(defaulted.value(), Some(&json!({"id": 7})));
}

#[test]
fn test_constructors_match_registry() {
    for info in status::iter() {
        let err = GromitError::create(Some(info.code), None, None, None)
            .expect("registered status should build");
        assert_eq!(err.name(), info.name);
        assert_eq!(err.message(), info.message);
        assert_eq!(err.http_status().map(|status| status.as_u16()), Some(info.code));
    }

    assert_eq!(GromitError::not_found(None, None, None).name(), "NOT_FOUND");
    assert_eq!(
        GromitError::server_unavailable(Some("maintenance"), None, None).message(),
        "maintenance"
    );
}
