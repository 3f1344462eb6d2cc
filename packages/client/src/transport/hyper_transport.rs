//! Default transport: HTTP/1.1 over hyper
//!
//! Pooled `hyper_util` legacy client over a plain `HttpConnector`. Adds the
//! default `Accept` and `User-Agent` headers, follows redirects, enforces the
//! request timeout and body size limit, reports progress, and decodes the
//! body according to the requested response type. Any non-2xx answer fails
//! with a [`TransportError`] carrying the response.

use std::fmt;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::FutureExt;
use futures::future::BoxFuture;
use http::header::{
    ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue,
    LOCATION, USER_AGENT,
};
use http::{Method, StatusCode, Uri};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use serde_json::Value;
use url::Url;

use super::error::{self, TransportError};
use super::{RawResponse, RequestDescriptor, RequestHandle, Transport};
use crate::config::{
    BasicAuth, Method as RequestMethod, Payload, ProgressEvent, ResponseType, TransportConfig,
};
use crate::error::BoxError;

const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";

/// What [`HyperTransport`] actually sent for the final hop of a request.
///
/// Available from a response or error through
/// [`RequestHandle::downcast_ref`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Number of redirects followed before this hop.
    pub redirects: u32,
}

/// HTTP/1.1 transport backed by a pooled hyper client.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    config: Arc<TransportConfig>,
}

impl HyperTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(config.connect_timeout);
        connector.set_nodelay(config.tcp_nodelay);
        connector.set_keepalive(config.tcp_keepalive);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_timer(TokioTimer::new())
            .build(connector);

        Self {
            client,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Transport for HyperTransport {
    fn execute(
        &self,
        descriptor: RequestDescriptor,
    ) -> BoxFuture<'static, Result<RawResponse, BoxError>> {
        let exchange = Exchange {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
        };

        async move {
            // zero means no timeout
            let timeout = descriptor.timeout.filter(|timeout| !timeout.is_zero());
            let result = match timeout {
                Some(after) => {
                    match tokio::time::timeout(after, exchange.run(&descriptor)).await {
                        Ok(result) => result,
                        Err(_elapsed) => Err(error::timeout(after)),
                    }
                }
                None => exchange.run(&descriptor).await,
            };
            result.map_err(BoxError::from)
        }
        .boxed()
    }

    fn name(&self) -> &'static str {
        "hyper-http1"
    }
}

struct Exchange {
    client: Client<HttpConnector, Full<Bytes>>,
    config: Arc<TransportConfig>,
}

impl Exchange {
    async fn run(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let full_url = descriptor.full_url().map_err(error::request)?;
        let mut url = Url::parse(&full_url).map_err(error::request)?;
        let mut method = Method::from(descriptor.method);
        let mut headers = self.request_headers(descriptor);
        let mut body = match descriptor.body() {
            Some(payload) => Some(payload.to_bytes().map_err(error::request)?),
            None => None,
        };

        if let (Some(callback), Some(bytes)) = (&descriptor.on_upload_progress, &body) {
            let size = bytes.len() as u64;
            callback.call(ProgressEvent { loaded: size, total: Some(size) });
        }

        let max_redirects = descriptor.max_redirects.unwrap_or(self.config.max_redirects);
        let mut redirects = 0u32;

        loop {
            let request = build_request(&method, &url, &headers, body.clone())?;
            let sent = SentRequest {
                method: method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                redirects,
            };

            let response = self.client.request(request).await.map_err(|err| {
                let handle = RequestHandle::new(sent.clone());
                if err.is_connect() {
                    error::connect(err).with_request(handle)
                } else {
                    error::request(err).with_request(handle)
                }
            })?;

            let status = response.status();
            let location = response.headers().get(LOCATION).cloned();

            if let Some(location) = location
                && is_followed_redirect(status)
                && max_redirects > 0
            {
                if redirects >= max_redirects {
                    return Err(error::redirects().with_request(RequestHandle::new(sent)));
                }

                let location = location.to_str().map_err(error::redirect)?;
                let next = url.join(location).map_err(error::redirect)?;
                tracing::debug!(
                    target: "gromit::transport",
                    status = status.as_u16(),
                    from = %url,
                    to = %next,
                    "following redirect"
                );

                if next.host_str() != url.host_str() {
                    headers.remove(AUTHORIZATION);
                    headers.remove(COOKIE);
                }
                if switches_to_get(status, &method) {
                    method = Method::GET;
                    body = None;
                    headers.remove(CONTENT_TYPE);
                    headers.remove(CONTENT_LENGTH);
                }

                url = next;
                redirects += 1;
                continue;
            }

            return read_response(response, descriptor, sent).await;
        }
    }

    fn request_headers(&self, descriptor: &RequestDescriptor) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        if let Ok(user_agent) = HeaderValue::from_str(&self.config.user_agent) {
            headers.insert(USER_AGENT, user_agent);
        }
        if let Some(content_type) = descriptor.body().and_then(Payload::content_type) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        // caller headers replace defaults of the same name
        for name in descriptor.headers.keys() {
            headers.remove(name);
        }
        headers.extend(
            descriptor
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        if let Some(value) = descriptor.auth.as_deref().and_then(BasicAuth::header_value) {
            headers.insert(AUTHORIZATION, value);
        }

        headers
    }
}

fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

fn switches_to_get(status: StatusCode, method: &Method) -> bool {
    status == StatusCode::SEE_OTHER
        || (matches!(status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND)
            && *method != Method::GET
            && *method != Method::HEAD)
}

fn build_request(
    method: &Method,
    url: &Url,
    headers: &HeaderMap,
    body: Option<Bytes>,
) -> Result<http::Request<Full<Bytes>>, TransportError> {
    let uri: Uri = url.as_str().parse().map_err(error::request)?;
    let mut request = http::Request::builder()
        .method(method.clone())
        .uri(uri)
        .body(Full::new(body.unwrap_or_default()))
        .map_err(error::request)?;
    *request.headers_mut() = headers.clone();
    Ok(request)
}

async fn read_response(
    response: http::Response<Incoming>,
    descriptor: &RequestDescriptor,
    sent: SentRequest,
) -> Result<RawResponse, TransportError> {
    let handle = RequestHandle::new(sent);
    let (parts, mut body) = response.into_parts();

    let total = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    // HEAD answers advertise the size of a body they never send
    if let (Some(limit), Some(total)) = (descriptor.max_content_length, total)
        && total > limit
        && descriptor.method != RequestMethod::Head
    {
        return Err(error::content_length(limit).with_request(handle));
    }

    let mut buffer = BytesMut::new();
    let mut loaded = 0u64;
    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|err| error::body(err).with_request(handle.clone()))?;
        let Ok(chunk) = frame.into_data() else {
            continue;
        };

        loaded += chunk.len() as u64;
        if let Some(limit) = descriptor.max_content_length
            && loaded > limit
        {
            return Err(error::content_length(limit).with_request(handle));
        }
        buffer.extend_from_slice(&chunk);

        if let Some(callback) = &descriptor.on_download_progress {
            callback.call(ProgressEvent { loaded, total });
        }
    }

    let status_text = parts
        .extensions
        .get::<hyper::ext::ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .or_else(|| parts.status.canonical_reason().map(str::to_owned))
        .unwrap_or_default();

    let raw = RawResponse {
        status: parts.status.as_u16(),
        status_text,
        data: decode_body(buffer.freeze(), descriptor.response_type),
        headers: parts.headers,
        request: Some(handle),
    };

    if raw.is_success() {
        Ok(raw)
    } else {
        Err(error::status(raw))
    }
}

/// Decode a response body for the requested response type.
///
/// JSON falls back to text when the body does not parse.
#[must_use]
pub fn decode_body(bytes: Bytes, response_type: ResponseType) -> Payload {
    if bytes.is_empty() {
        return Payload::Empty;
    }

    match response_type {
        ResponseType::Json => match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(String::from_utf8_lossy(&bytes).into_owned()),
        },
        ResponseType::Text | ResponseType::Document => {
            Payload::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        ResponseType::ArrayBuffer | ResponseType::Blob | ResponseType::Stream => {
            Payload::Bytes(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_body_falls_back_to_text() {
        assert_eq!(
            decode_body(Bytes::from_static(b"{\"a\":1}"), ResponseType::Json),
            Payload::Json(json!({"a": 1}))
        );
        assert_eq!(
            decode_body(Bytes::from_static(b"not json"), ResponseType::Json),
            Payload::Text("not json".into())
        );
        assert_eq!(decode_body(Bytes::new(), ResponseType::Json), Payload::Empty);
        assert_eq!(
            decode_body(Bytes::from_static(b"raw"), ResponseType::ArrayBuffer),
            Payload::Bytes(Bytes::from_static(b"raw"))
        );
    }

    #[test]
    fn redirect_method_rules() {
        assert!(switches_to_get(StatusCode::SEE_OTHER, &Method::PUT));
        assert!(switches_to_get(StatusCode::FOUND, &Method::POST));
        assert!(!switches_to_get(StatusCode::FOUND, &Method::HEAD));
        assert!(!switches_to_get(StatusCode::TEMPORARY_REDIRECT, &Method::POST));
        assert!(!is_followed_redirect(StatusCode::NOT_MODIFIED));
    }
}
