//! Shared test helpers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::BoxFuture;
use gromit::{BoxError, RawResponse, RequestDescriptor, Transport};
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

    pub fn json(status: u16, body: Value) -> Arc<Self> {
        Self::new(move |_| Ok(RawResponse::new(status).with_data(body.clone())))
    }

    pub fn calls(&self) -> Vec<RequestDescriptor> {
        self.calls.lock().expect("calls lock poisoned").clone()
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
