//! Terminal operations: HTTP verbs, `request` and `fetch`
//!
//! Every verb fixes the method, merges whatever was passed explicitly over the
//! builder's configuration and executes the result. An argument left as
//! `None` keeps the configured value.

use std::sync::Arc;

use crate::config::{Method, Params, Payload, RequestConfig};
use crate::error::{Error, GromitError, Result};
use crate::response::GromitResponse;
use crate::transport::RequestDescriptor;

use super::core::RequestBuilder;

impl RequestBuilder {
    /// Execute a request.
    ///
    /// Each argument overrides the configured value when given.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Classified`] when the transport fails and
    /// [`Error::Hook`] when the `before_response` hook does.
    pub async fn request<'a>(
        &self,
        method: impl Into<Option<Method>>,
        path: impl Into<Option<&'a str>>,
        data: impl Into<Option<Payload>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        let overrides = RequestConfig {
            method: method.into(),
            path: path.into().map(Arc::from),
            data: data.into().map(Arc::new),
            params: params.into().map(Arc::new),
            ..RequestConfig::default()
        };
        self.merge(overrides).fetch().await
    }

    /// Execute a `GET` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get<'a>(
        &self,
        path: impl Into<Option<&'a str>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        self.request(Method::Get, path, None, params).await
    }

    /// Execute a `DELETE` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete<'a>(
        &self,
        path: impl Into<Option<&'a str>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        self.request(Method::Delete, path, None, params).await
    }

    /// Execute a `HEAD` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn head<'a>(
        &self,
        path: impl Into<Option<&'a str>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        self.request(Method::Head, path, None, params).await
    }

    /// Execute an `OPTIONS` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn options<'a>(
        &self,
        path: impl Into<Option<&'a str>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        self.request(Method::Options, path, None, params).await
    }

    /// Execute a `POST` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post<'a>(
        &self,
        path: impl Into<Option<&'a str>>,
        data: impl Into<Option<Payload>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        self.request(Method::Post, path, data, params).await
    }

    /// Execute a `PUT` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put<'a>(
        &self,
        path: impl Into<Option<&'a str>>,
        data: impl Into<Option<Payload>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        self.request(Method::Put, path, data, params).await
    }

    /// Execute a `PATCH` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch<'a>(
        &self,
        path: impl Into<Option<&'a str>>,
        data: impl Into<Option<Payload>>,
        params: impl Into<Option<Params>>,
    ) -> Result<GromitResponse> {
        self.request(Method::Patch, path, data, params).await
    }

    /// Execute the current configuration as is.
    ///
    /// On success the response goes through the `before_response` hook, when
    /// one is configured. On failure the error is classified; an error that
    /// already is a [`GromitError`] passes through unchanged.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Classified`] when the transport fails and
    /// [`Error::Hook`] when the hook does.
    pub async fn fetch(&self) -> Result<GromitResponse> {
        let descriptor = RequestDescriptor::from_config(&self.config);
        let method = descriptor.method;
        let url = descriptor.url();

        tracing::debug!(
            target: "gromit::fetch",
            %method,
            %url,
            transport = self.transport.name(),
            "dispatching request"
        );

        match self.transport.execute(descriptor).await {
            Ok(raw) => {
                tracing::debug!(
                    target: "gromit::fetch",
                    %method,
                    %url,
                    status = raw.status,
                    "request settled"
                );

                let response = GromitResponse::from_raw(raw, self.clone());
                match &self.config.before_response {
                    Some(hook) => hook.call(response).await.map_err(Error::Hook),
                    None => Ok(response),
                }
            }
            Err(err) => {
                let classified = GromitError::classify(err, self);
                tracing::debug!(
                    target: "gromit::fetch",
                    %method,
                    %url,
                    status = classified.status_code(),
                    name = classified.name(),
                    "request failed"
                );
                Err(Error::Classified(classified))
            }
        }
    }
}
