//! HTTP gateway backed by `reqwest`.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::notify::{Notification, NotificationSink};

use super::traits::{Gateway, GatewayError, GatewayResponse, Method};

/// The production gateway.
///
/// Attaches the bearer credential before every call, parses JSON bodies,
/// and reports transport failures through the notification sink. One
/// retry-free pass per request with a fixed timeout from the config.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
    sink: Arc<dyn NotificationSink>,
}

impl HttpGateway {
    /// Create a gateway from config plus its injected collaborators.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            sink,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer header value, when a credential is stored.
    ///
    /// A credential-store failure degrades to an unauthenticated call,
    /// matching keychain-unavailable behavior on device.
    async fn auth_header(&self) -> Option<String> {
        match self.credentials.load().await {
            Ok(token) => token.map(|t| format!("Bearer {}", t)),
            Err(e) => {
                warn!(error = %e, "credential store unavailable, sending unauthenticated");
                None
            }
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<GatewayResponse, GatewayError> {
        let url = self.url(path);
        debug!(?method, %path, "gateway request");

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(auth) = self.auth_header().await {
            request = request.header(header::AUTHORIZATION, auth);
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                // No response at all: timeout, DNS, refused connection.
                warn!(%path, error = %e, "network unreachable");
                self.sink.notify(Notification::error("Network Error"));
                return Err(GatewayError::NetworkUnreachable(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::NetworkUnreachable(e.to_string()))?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if status == 401 {
            // Token-expiry recovery is a stated open gap: no refresh, no
            // forced logout, credential left in place.
            return Err(GatewayError::Unauthorized);
        }

        if !(200..300).contains(&status) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with HTTP {}", status));
            debug!(%path, status, %message, "server rejected request");
            return Err(GatewayError::ServerRejected { status, message });
        }

        Ok(GatewayResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::notify::MemorySink;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://localhost:8003/");
        let gateway = HttpGateway::new(
            &config,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemorySink::new()),
        );
        assert_eq!(gateway.url("/user"), "http://localhost:8003/user");
    }

    #[tokio::test]
    async fn test_auth_header_absent_without_credential() {
        let config = ClientConfig::default();
        let gateway = HttpGateway::new(
            &config,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemorySink::new()),
        );
        assert_eq!(gateway.auth_header().await, None);
    }

    #[tokio::test]
    async fn test_auth_header_present_with_credential() {
        let config = ClientConfig::default();
        let gateway = HttpGateway::new(
            &config,
            Arc::new(MemoryCredentialStore::with_token("tok-1")),
            Arc::new(MemorySink::new()),
        );
        assert_eq!(gateway.auth_header().await.as_deref(), Some("Bearer tok-1"));
    }
}
