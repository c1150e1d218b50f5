//! Mock gateway for testing stores, sessions, and submission flows.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use super::traits::{Gateway, GatewayError, GatewayResponse, Method};

/// One request the mock has seen.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

type Scripted = Result<GatewayResponse, GatewayError>;

/// Scripted gateway.
///
/// Responses are queued per (method, path); the final scripted response
/// for a route repeats, so refetch loops keep working without re-scripting.
/// Every call is recorded for assertions.
#[derive(Default)]
pub struct MockGateway {
    responses: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
    call_count: AtomicU32,
}

impl MockGateway {
    /// Create a mock with no scripted routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a route.
    pub fn with_response(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.script(method, path, Ok(GatewayResponse { status, body }));
        self
    }

    /// Queue an error for a route.
    pub fn with_error(self, method: Method, path: &str, error: GatewayError) -> Self {
        self.script(method, path, Err(error));
        self
    }

    /// Queue a response after construction.
    pub fn push_response(&self, method: Method, path: &str, status: u16, body: Value) {
        self.script(method, path, Ok(GatewayResponse { status, body }));
    }

    /// Queue an error after construction.
    pub fn push_error(&self, method: Method, path: &str, error: GatewayError) {
        self.script(method, path, Err(error));
    }

    fn script(&self, method: Method, path: &str, response: Scripted) {
        self.responses
            .lock()
            .expect("mock poisoned")
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Every call seen so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock poisoned").clone()
    }

    /// How many calls hit a specific route.
    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .expect("mock poisoned")
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    /// Total number of calls.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<GatewayResponse, GatewayError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().expect("mock poisoned").push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        let mut responses = self.responses.lock().expect("mock poisoned");
        match responses.get_mut(&(method, path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("non-empty queue"),
            Some(queue) => queue.front().cloned().expect("non-empty queue"),
            None => Ok(GatewayResponse {
                status: 200,
                body: Value::Null,
            }),
        }
    }
}
