//! Shared test helpers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::BoxFuture;
use gromit_client::{BoxError, RawResponse, RequestDescriptor, Transport};
use serde_json::Value;

type Responder = dyn Fn(&RequestDescriptor) -> Result<RawResponse, BoxError> + Send + Sync;

/// Transport that records every descriptor and answers from a closure
pub struct MockTransport {
    responder: Box<Responder>,
    calls: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&RequestDescriptor) -> Result<RawResponse, BoxError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Always answers `status` with a JSON body
    pub fn json(status: u16, body: Value) -> Arc<Self> {
        Self::new(move |_| Ok(RawResponse::new(status).with_data(body.clone())))
    }

    /// Always fails with whatever `make_error` builds
    pub fn failing<F>(make_error: F) -> Arc<Self>
    where
        F: Fn() -> BoxError + Send + Sync + 'static,
    {
        Self::new(move |_| Err(make_error()))
    }

    pub fn calls(&self) -> Vec<RequestDescriptor> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn last_call(&self) -> RequestDescriptor {
        self.calls()
            .pop()
            .expect("transport should have been called")
    }
}

impl Transport for MockTransport {
    fn execute(
        &self,
        descriptor: RequestDescriptor,
    ) -> BoxFuture<'static, Result<RawResponse, BoxError>> {
        let result = (self.responder)(&descriptor);
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(descriptor);
        async move { result }.boxed()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
