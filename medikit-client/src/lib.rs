//! Medikit Client - async backend client for the Medikit health service
//!
//! Provides the IO layer over the `medikit-core` domain model:
//! - A trait-based HTTP gateway (reqwest production impl, scripted mock)
//! - An auth session with token persistence through a credential store
//! - Entity stores with refetch-on-mutate snapshot semantics
//! - A notification sink for the user-facing toasts every flow emits
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐
//! │ AuthSession  │   │ Connection/      │
//! │ (login,      │   │ Medication store │
//! │  restore)    │   │ (snapshots)      │
//! └──────┬───────┘   └────────┬─────────┘
//!        │                    │
//!        └────────┬───────────┘
//!                 ▼
//!         ┌──────────────┐      ┌──────────────────┐
//!         │   Gateway    │─────▶│ NotificationSink │
//!         │ (HttpGateway │      │ (toasts)         │
//!         │  / mock)     │      └──────────────────┘
//!         └──────┬───────┘
//!                ▼
//!         ┌──────────────┐
//!         │ Credential   │
//!         │ Store        │
//!         └──────────────┘
//! ```
//!
//! Every component takes its collaborators as `Arc<dyn Trait>` at
//! construction; nothing reaches for a global.

pub mod config;
pub mod credentials;
pub mod gateway;
pub mod notify;
pub mod routes;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use credentials::{CredentialError, CredentialStore, MemoryCredentialStore};
pub use gateway::{Gateway, GatewayError, GatewayResponse, HttpGateway, Method, MockGateway};
pub use notify::{MemorySink, Notification, NotificationKind, NotificationSink, TracingSink};
pub use session::{AuthSession, AuthState, NewUser, SessionError};
pub use store::{ConnectionStore, MedicationStore};
