//! GraphQL requester
//!
//! Posts `{query, variables}` to one endpoint, fetching a fresh token for
//! every call and sending it verbatim as the `Authorization` header.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use gromit_client::{
    BoxError, Error, GromitResponse, Payload, RequestBuilder, RequestConfig, Result, Transport,
};
use http::HeaderValue;
use http::header::AUTHORIZATION;
use serde_json::{Value, json};

use crate::default_transport;

/// Sends GraphQL operations to a single endpoint
pub struct GraphqlRequester<F> {
    url: Arc<str>,
    get_token: F,
    transport: Arc<dyn Transport>,
}

/// Create a GraphQL requester using the default transport
///
/// `get_token` runs once per [`request`](GraphqlRequester::request).
///
/// # Examples
/// ```no_run
/// use serde_json::json;
///
/// # async fn run() -> gromit::Result<()> {
/// let graphql = gromit::graphql_request("http://localhost:4000/graphql", || async {
///     Ok::<_, std::io::Error>("Bearer secret".to_string())
/// });
///
/// let data = graphql
///     .request("query ($id: ID!) { user(id: $id) { name } }", json!({"id": 1}))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn graphql_request<F>(url: impl AsRef<str>, get_token: F) -> GraphqlRequester<F> {
    graphql_request_with(default_transport(), url, get_token)
}

/// Create a GraphQL requester with a custom transport
pub fn graphql_request_with<F>(
    transport: Arc<dyn Transport>,
    url: impl AsRef<str>,
    get_token: F,
) -> GraphqlRequester<F> {
    GraphqlRequester {
        url: Arc::from(url.as_ref()),
        get_token,
        transport,
    }
}

impl<F> GraphqlRequester<F> {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run one GraphQL operation and return only the response body
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Token`] when the token provider fails or returns a
    /// token that is not a valid header value, and with
    /// [`Error::Classified`] when the request itself fails.
    pub async fn request<Fut, E>(&self, query: &str, variables: Value) -> Result<Payload>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = std::result::Result<String, E>>,
        E: Into<BoxError>,
    {
        let token = (self.get_token)()
            .await
            .map_err(|e| Error::Token(e.into()))?;
        let mut authorization =
            HeaderValue::from_str(&token).map_err(|e| Error::Token(e.into()))?;
        authorization.set_sensitive(true);

        tracing::debug!(target: "gromit::graphql", url = %self.url, "sending graphql operation");

        let builder = RequestBuilder::new(
            RequestConfig::default().with_header(AUTHORIZATION, authorization),
            Arc::clone(&self.transport),
        );
        let body = Payload::from(json!({ "query": query, "variables": variables }));

        builder
            .post(&*self.url, body, None)
            .await
            .map(GromitResponse::into_data)
    }
}

impl<F> fmt::Debug for GraphqlRequester<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlRequester")
            .field("url", &self.url)
            .field("transport", &self.transport.name())
            .finish_non_exhaustive()
    }
}
