//! Store for connections and pending connection requests.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use medikit_core::{Connection, ConnectionStatus, User};

use crate::gateway::{Gateway, GatewayError};
use crate::notify::{Notification, NotificationSink};
use crate::routes;

use super::{decode, report_failure, SnapshotCell};

/// `{connections: [...]}` envelope.
///
/// The backend occasionally interleaves nulls into the array; they are
/// dropped during decode.
#[derive(Debug, Deserialize)]
struct ConnectionsEnvelope {
    #[serde(default)]
    connections: Vec<Option<Connection>>,
}

impl ConnectionsEnvelope {
    fn into_items(self) -> Vec<Connection> {
        self.connections.into_iter().flatten().collect()
    }
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

/// Holds the accepted-connections and pending-requests snapshots and the
/// mutations that act on them.
///
/// One instance is owned by the screen/context that displays it and is
/// injected explicitly; no other writer touches the snapshots.
pub struct ConnectionStore {
    gateway: Arc<dyn Gateway>,
    sink: Arc<dyn NotificationSink>,
    connections: SnapshotCell<Connection>,
    requests: SnapshotCell<Connection>,
}

impl ConnectionStore {
    /// Create a store over the given gateway and sink.
    pub fn new(gateway: Arc<dyn Gateway>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            gateway,
            sink,
            connections: SnapshotCell::new(),
            requests: SnapshotCell::new(),
        }
    }

    /// Current accepted-connections snapshot.
    pub async fn connections(&self) -> Vec<Connection> {
        self.connections.snapshot().await
    }

    /// Current pending-requests snapshot.
    pub async fn requests(&self) -> Vec<Connection> {
        self.requests.snapshot().await
    }

    /// Refetch the full connections collection, replacing the snapshot.
    ///
    /// On failure the previous snapshot is retained unchanged.
    pub async fn refresh_connections(&self) -> Result<Vec<Connection>, GatewayError> {
        let ticket = self.connections.begin_fetch();
        let response = match self.gateway.get(routes::CONNECTIONS).await {
            Ok(response) => response,
            Err(e) => {
                report_failure(self.sink.as_ref(), "Failed to fetch connections", &e);
                return Err(e);
            }
        };

        let envelope: ConnectionsEnvelope =
            decode(&response, self.sink.as_ref(), "Failed to fetch connections")?;
        self.connections.install(ticket, envelope.into_items()).await;
        Ok(self.connections.snapshot().await)
    }

    /// Refetch the pending requests collection.
    pub async fn refresh_requests(&self) -> Result<Vec<Connection>, GatewayError> {
        let ticket = self.requests.begin_fetch();
        let response = match self.gateway.get(routes::PENDING_REQUESTS).await {
            Ok(response) => response,
            Err(e) => {
                report_failure(self.sink.as_ref(), "Failed to fetch requests", &e);
                return Err(e);
            }
        };

        let envelope: ConnectionsEnvelope =
            decode(&response, self.sink.as_ref(), "Failed to fetch requests")?;
        self.requests.install(ticket, envelope.into_items()).await;
        Ok(self.requests.snapshot().await)
    }

    /// Look up a connection candidate by account id.
    ///
    /// Read-only; the result is shown to the user, not stored.
    pub async fn find_candidate(&self, id: &str) -> Result<User, GatewayError> {
        let response = match self.gateway.get(&routes::find_user(id)).await {
            Ok(response) => response,
            Err(e) => {
                report_failure(self.sink.as_ref(), "Failed to find user", &e);
                return Err(e);
            }
        };

        let envelope: UserEnvelope =
            decode(&response, self.sink.as_ref(), "Failed to find user")?;
        self.sink.notify(
            Notification::success("Connection Found").with_detail(envelope.user.username.clone()),
        );
        Ok(envelope.user)
    }

    /// Send a connection request to another account.
    ///
    /// Two-phase: the mutation, then one refetch of the connections
    /// snapshot once the mutation's response has resolved.
    pub async fn send_request(&self, receiver_id: &str) -> Result<(), GatewayError> {
        if let Err(e) = self
            .gateway
            .post(routes::CONNECTIONS, json!({ "receiverId": receiver_id }))
            .await
        {
            report_failure(self.sink.as_ref(), "An error occurred", &e);
            return Err(e);
        }

        // Refetch failures report themselves; the mutation still succeeded.
        let _ = self.refresh_connections().await;
        info!(%receiver_id, "connection request sent");
        self.sink
            .notify(Notification::success("Connection Request Sent"));
        Ok(())
    }

    /// Accept or reject a pending request, then refetch the pending
    /// snapshot exactly once.
    pub async fn update_request(
        &self,
        sender_id: &str,
        status: ConnectionStatus,
    ) -> Result<(), GatewayError> {
        if let Err(e) = self
            .gateway
            .put(
                routes::CONNECTIONS,
                json!({ "senderId": sender_id, "status": status }),
            )
            .await
        {
            report_failure(self.sink.as_ref(), "An error occurred", &e);
            return Err(e);
        }

        let _ = self.refresh_requests().await;
        info!(%sender_id, status = status.as_str(), "connection request updated");
        self.sink.notify(Notification::success("Connection Updated"));
        Ok(())
    }
}
