//! Core gateway trait - the sole HTTP boundary.
//!
//! Every entity operation passes through a `Gateway`. The trait is object
//! safe so stores and sessions can be tested against
//! [`MockGateway`](crate::gateway::MockGateway) without a network.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error types for gateway calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// No response received (includes the fixed client-side timeout)
    #[error("Network error: {0}")]
    NetworkUnreachable(String),

    /// HTTP 401; deliberately not recovered from - the stored credential
    /// is left untouched and the caller decides
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-2xx response with the server's `message` when it sent one
    #[error("Server rejected request (HTTP {status}): {message}")]
    ServerRejected { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl GatewayError {
    /// Whether the gateway itself already surfaced this failure to the
    /// user. Stores skip their own notification in that case so every
    /// failure produces exactly one message.
    pub fn already_reported(&self) -> bool {
        matches!(self, GatewayError::NetworkUnreachable(_))
    }

    /// Text suitable for a user-facing notification, preferring the
    /// server's own message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::ServerRejected { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// HTTP methods used by the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A decoded response: status plus parsed JSON body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GatewayResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed body; `Null` when the server sent none
    pub body: Value,
}

impl GatewayResponse {
    /// Decode the body into a typed shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| GatewayError::ParseError(e.to_string()))
    }

    /// Whether the server reported resource creation.
    pub fn is_created(&self) -> bool {
        self.status == 201
    }
}

/// The sole HTTP boundary component.
///
/// One retry-free pass per call: the bearer credential is attached when
/// present, the response body is parsed, and non-success statuses become
/// [`GatewayError`]s. No backoff, no cancellation.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue a single request.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<GatewayResponse, GatewayError>;

    /// GET a path.
    async fn get(&self, path: &str) -> Result<GatewayResponse, GatewayError> {
        self.request(Method::Get, path, None).await
    }

    /// POST a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<GatewayResponse, GatewayError> {
        self.request(Method::Post, path, Some(body)).await
    }

    /// PUT a JSON body.
    async fn put(&self, path: &str, body: Value) -> Result<GatewayResponse, GatewayError> {
        self.request(Method::Put, path, Some(body)).await
    }

    /// DELETE a path.
    async fn delete(&self, path: &str) -> Result<GatewayResponse, GatewayError> {
        self.request(Method::Delete, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = GatewayError::ServerRejected {
            status: 409,
            message: "Request already sent".to_string(),
        };
        assert_eq!(err.user_message("An error occurred"), "Request already sent");

        let err = GatewayError::Unauthorized;
        assert_eq!(err.user_message("An error occurred"), "An error occurred");
    }

    #[test]
    fn test_already_reported_only_for_network() {
        assert!(GatewayError::NetworkUnreachable("refused".into()).already_reported());
        assert!(!GatewayError::Unauthorized.already_reported());
    }

    #[test]
    fn test_response_json_decode() {
        #[derive(Deserialize)]
        struct Body {
            token: String,
        }

        let resp = GatewayResponse {
            status: 200,
            body: json!({"token": "t1"}),
        };
        assert_eq!(resp.json::<Body>().unwrap().token, "t1");

        let resp = GatewayResponse {
            status: 200,
            body: json!({"nope": true}),
        };
        assert!(matches!(
            resp.json::<Body>(),
            Err(GatewayError::ParseError(_))
        ));
    }
}
