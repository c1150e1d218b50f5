//! Entity stores - in-memory snapshots refreshed by explicit refetch.
//!
//! A store caches the last fully-fetched collection of one entity type.
//! Mutations are a documented two-phase operation: one gateway call, then
//! - only after its response resolves - exactly one refetch to
//! resynchronize. There is no optimistic update and no diffing.
//!
//! Concurrent refetches are decided by sequence-numbered snapshot
//! rejection: every fetch takes a ticket at dispatch, and a response whose
//! ticket is older than the last installed snapshot is discarded. A slow,
//! stale refetch can therefore never clobber a newer snapshot.

pub mod connections;
pub mod medications;

pub use connections::ConnectionStore;
pub use medications::MedicationStore;

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use medikit_core::Entity;

use crate::gateway::{GatewayError, GatewayResponse};
use crate::notify::{Notification, NotificationSink};

/// Snapshot holder shared by the concrete stores.
///
/// Readers always see either the previous fully-installed snapshot or the
/// new one; installation is a single assignment under the write lock.
pub(crate) struct SnapshotCell<T> {
    items: RwLock<Vec<T>>,
    /// Ticket dispenser for fetches
    next_ticket: AtomicU64,
    /// Ticket of the installed snapshot; guarded by the `items` write lock
    installed: AtomicU64,
}

impl<T: Entity + Clone> SnapshotCell<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            next_ticket: AtomicU64::new(0),
            installed: AtomicU64::new(0),
        }
    }

    /// Clone of the current snapshot.
    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    /// Take a ticket for a fetch that is about to be dispatched.
    pub fn begin_fetch(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Install a fetched collection, deduplicated by id (last write wins).
    ///
    /// Returns `false` when the ticket is stale and the response was
    /// discarded.
    pub async fn install(&self, ticket: u64, items: Vec<T>) -> bool {
        let mut guard = self.items.write().await;
        if ticket <= self.installed.load(Ordering::SeqCst) {
            debug!(ticket, "discarding stale snapshot");
            return false;
        }

        let mut deduped: Vec<T> = Vec::with_capacity(items.len());
        let mut index: HashMap<String, usize> = HashMap::new();
        for item in items {
            match index.get(item.id()) {
                Some(&i) => deduped[i] = item,
                None => {
                    index.insert(item.id().to_string(), deduped.len());
                    deduped.push(item);
                }
            }
        }

        self.installed.store(ticket, Ordering::SeqCst);
        *guard = deduped;
        true
    }
}

/// Surface a store failure as exactly one user-facing message.
///
/// Network failures were already reported by the gateway, so they are
/// skipped here. Server rejections reuse the server's own message text.
pub(crate) fn report_failure(sink: &dyn NotificationSink, fallback: &str, error: &GatewayError) {
    if error.already_reported() {
        return;
    }
    sink.notify(Notification::error(error.user_message(fallback)));
}

/// Decode a response body, surfacing a decode failure like any other
/// store failure: one notification, then the error to the caller.
pub(crate) fn decode<T: DeserializeOwned>(
    response: &GatewayResponse,
    sink: &dyn NotificationSink,
    fallback: &str,
) -> Result<T, GatewayError> {
    response.json().map_err(|e| {
        report_failure(sink, fallback, &e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MemorySink, NotificationKind};
    use medikit_core::{Connection, ConnectionStatus};

    fn conn(id: &str, name: &str) -> Connection {
        Connection {
            id: id.to_string(),
            user_id: format!("u-{}", id),
            username: name.to_string(),
            status: ConnectionStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_install_dedupes_last_write_wins() {
        let cell = SnapshotCell::new();
        let ticket = cell.begin_fetch();
        cell.install(
            ticket,
            vec![conn("a", "old"), conn("b", "keep"), conn("a", "new")],
        )
        .await;

        let snapshot = cell.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].username, "new");
        assert_eq!(snapshot[1].username, "keep");
    }

    #[tokio::test]
    async fn test_stale_ticket_rejected() {
        let cell = SnapshotCell::new();
        let early = cell.begin_fetch();
        let late = cell.begin_fetch();

        assert!(cell.install(late, vec![conn("a", "fresh")]).await);
        // The earlier fetch resolves after the later one: discarded
        assert!(!cell.install(early, vec![conn("a", "stale")]).await);

        assert_eq!(cell.snapshot().await[0].username, "fresh");
    }

    #[tokio::test]
    async fn test_report_failure_skips_network_errors() {
        let sink = MemorySink::new();
        report_failure(
            &sink,
            "Failed to fetch",
            &GatewayError::NetworkUnreachable("refused".into()),
        );
        assert!(sink.all().is_empty());

        report_failure(&sink, "Failed to fetch", &GatewayError::Unauthorized);
        assert_eq!(sink.count_of(NotificationKind::Error), 1);
        assert_eq!(sink.latest().unwrap().title, "Failed to fetch");

        report_failure(
            &sink,
            "Failed to fetch",
            &GatewayError::ServerRejected {
                status: 500,
                message: "database down".into(),
            },
        );
        assert_eq!(sink.latest().unwrap().title, "database down");

        report_failure(
            &sink,
            "Failed to fetch",
            &GatewayError::ParseError("bad shape".into()),
        );
        assert_eq!(sink.latest().unwrap().title, "Failed to fetch");
    }

    #[tokio::test]
    async fn test_decode_failure_is_notified_once() {
        let sink = MemorySink::new();
        let response = crate::gateway::GatewayResponse {
            status: 200,
            body: serde_json::json!({"connections": "not-an-array"}),
        };

        #[derive(serde::Deserialize)]
        struct Envelope {
            #[allow(dead_code)]
            connections: Vec<Connection>,
        }

        let result: Result<Envelope, _> = decode(&response, &sink, "Failed to fetch");
        assert!(matches!(result, Err(GatewayError::ParseError(_))));
        assert_eq!(sink.count_of(NotificationKind::Error), 1);
        assert_eq!(sink.latest().unwrap().title, "Failed to fetch");
    }
}
