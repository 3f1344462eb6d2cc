//! String round trip for classified errors
//!
//! Some layers only let an error message through (GraphQL resolvers being the
//! usual culprit). `serialize` folds the status code and name into the message
//! as `[<status>][<name>] <message>` and `deserialize` pulls them back out.

use std::error::Error as StdError;
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Value, json};

use super::gromit_error::{ErrorData, GromitError};
use super::types::ErrorMessage;

// Dot matches newlines so multi-line names and messages survive.
static SERIALIZED_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)^\[(.+?)\]\[(.+?)\]\W(.+)$").ok());

struct Parsed<'a> {
    status_code: Option<u16>,
    name: &'a str,
    message: &'a str,
}

fn parse(message: &str) -> Option<Parsed<'_>> {
    let captures = SERIALIZED_PATTERN.as_ref()?.captures(message)?;
    Some(Parsed {
        status_code: captures.get(1)?.as_str().parse().ok(),
        name: captures.get(2)?.as_str(),
        message: captures.get(3)?.as_str(),
    })
}

impl GromitError {
    /// Fold the status code and name into the message.
    ///
    /// Returns a new error whose message is `[<status>][<name>] <message>`. All
    /// other fields are kept.
    #[must_use]
    pub fn serialize(&self) -> GromitError {
        let message = format!("[{}][{}] {}", self.status_code, self.name, self.message);
        GromitError::from_parts(
            self.status_code,
            self.name.clone(),
            message,
            self.data.clone(),
            self.location,
        )
    }

    /// Recover a serialized error.
    ///
    /// When the message of `raw` does not carry the bracket prefix this is the
    /// same as [`GromitError::wrap`] with no overrides.
    #[track_caller]
    #[must_use]
    pub fn deserialize(raw: &(dyn StdError + 'static)) -> GromitError {
        let message = raw.to_string();
        match parse(&message) {
            Some(parsed) => GromitError::wrap(
                raw,
                parsed.status_code,
                Some(parsed.message),
                Some(parsed.name),
                None,
            ),
            None => GromitError::wrap(raw, None, None, None, None),
        }
    }

    /// Recover a serialized error from nothing but its message.
    #[track_caller]
    #[must_use]
    pub fn deserialize_message(message: &str) -> GromitError {
        GromitError::deserialize(&ErrorMessage::new(message))
    }

    /// JSON form: `statusCode`, `name`, `message` and `data`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for ErrorData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorData::Value(value) => value.serialize(serializer),
            ErrorData::Transport(context) => {
                let response = context.response().map(|response| {
                    json!({
                        "statusCode": response.status,
                        "statusText": response.status_text,
                        "data": response.data.as_json(),
                    })
                });
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("requester", &context.requester().config().describe())?;
                map.serialize_entry("response", &response)?;
                map.end()
            }
        }
    }
}

impl Serialize for GromitError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("statusCode", &self.status_code)?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("data", &self.data.as_deref())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn assert_round_trip(err: &GromitError) {
        let serialized = err.serialize();
        let restored = GromitError::deserialize(&serialized);
        assert_eq!(restored.status_code(), err.status_code());
        assert_eq!(restored.name(), err.name());
        assert_eq!(restored.message(), err.message());
    }

    #[test]
    fn serialize_prefixes_status_and_name() {
        let err = GromitError::create(Some(404), None, None, None).unwrap();
        assert_eq!(err.serialize().message(), "[404][NOT_FOUND] Not Found");
        assert_eq!(err.serialize().status_code(), 404);
    }

    #[test]
    fn round_trips() {
        assert_round_trip(&GromitError::create(Some(404), None, None, None).unwrap());
        assert_round_trip(
            &GromitError::create(Some(418), Some("custom"), Some("TEAPOT"), Some(json!({"x": 1})))
                .unwrap(),
        );
        assert_round_trip(&GromitError::wrap(&ErrorMessage::new("boom"), None, None, None, None));
        assert_round_trip(
            &GromitError::create(Some(400), Some("line one\nline two"), Some("MULTI"), None)
                .unwrap(),
        );
    }

    #[test]
    fn round_trips_multi_line_name() {
        let err = GromitError::create(Some(400), Some("msg"), Some("A\nB"), None).unwrap();
        let restored = GromitError::deserialize(&err.serialize());
        assert_eq!(restored.status_code(), 400);
        assert_eq!(restored.name(), "A\nB");
        assert_eq!(restored.message(), "msg");
    }

    #[test]
    fn round_trip_through_message_only() {
        let err = GromitError::create(Some(418), Some("custom"), Some("TEAPOT"), None).unwrap();
        let restored = GromitError::deserialize_message(&err.serialize().to_string());
        assert_eq!(restored.status_code(), 418);
        assert_eq!(restored.name(), "TEAPOT");
        assert_eq!(restored.message(), "custom");
    }

    #[test]
    fn round_trip_keeps_data() {
        let err =
            GromitError::create(Some(418), Some("custom"), Some("TEAPOT"), Some(json!({"x": 1})))
                .unwrap();
        let restored = GromitError::deserialize(&err.serialize());
        assert_eq!(restored.value(), Some(&json!({"x": 1})));
    }

    #[test]
    fn plain_message_falls_back_to_wrap() {
        let err = GromitError::deserialize_message("socket hang up");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.name(), "INTERNAL_SERVER_ERROR");
        assert_eq!(err.message(), "socket hang up");
    }

    #[test]
    fn unknown_status_in_message_is_kept() {
        let err = GromitError::deserialize_message("[299][ODD] strange");
        assert_eq!(err.status_code(), 299);
        assert_eq!(err.name(), "ODD");
        assert_eq!(err.message(), "strange");
    }

    #[test]
    fn json_form() {
        let err = GromitError::bad_request(Some("nope"), None, Some(json!({"field": "email"})));
        assert_eq!(
            err.to_json(),
            json!({
                "statusCode": 400,
                "message": "nope",
                "name": "BAD_REQUEST",
                "data": {"field": "email"},
            })
        );
        assert_eq!(GromitError::internal(None, None, None).to_json()["data"], Value::Null);
    }
}
