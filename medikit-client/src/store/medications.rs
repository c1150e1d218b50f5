//! Store for medication plans.

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use medikit_core::{MedicationPayload, MedicationPlan};

use crate::gateway::{Gateway, GatewayError};
use crate::notify::{Notification, NotificationSink};
use crate::routes;

use super::{decode, report_failure, SnapshotCell};

/// `{medications: [...]}` envelope.
#[derive(Debug, Deserialize)]
struct MedicationsEnvelope {
    #[serde(default)]
    medications: Vec<MedicationPlan>,
}

/// Single-plan envelope; some deployments return the bare object.
#[derive(Debug, Deserialize)]
struct MedicationEnvelope {
    medication: MedicationPlan,
}

/// Holds the medication-plans snapshot and its mutations.
///
/// `add` is the terminal submit target of the add-medication wizard: the
/// wizard reaches `Submitted`, the caller shapes a [`MedicationPayload`]
/// and hands it here.
pub struct MedicationStore {
    gateway: Arc<dyn Gateway>,
    sink: Arc<dyn NotificationSink>,
    plans: SnapshotCell<MedicationPlan>,
}

impl MedicationStore {
    /// Create a store over the given gateway and sink.
    pub fn new(gateway: Arc<dyn Gateway>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            gateway,
            sink,
            plans: SnapshotCell::new(),
        }
    }

    /// Current snapshot.
    pub async fn medications(&self) -> Vec<MedicationPlan> {
        self.plans.snapshot().await
    }

    /// Refetch the full collection, replacing the snapshot.
    pub async fn refresh(&self) -> Result<Vec<MedicationPlan>, GatewayError> {
        let ticket = self.plans.begin_fetch();
        let response = match self.gateway.get(routes::MEDICATIONS_ALL).await {
            Ok(response) => response,
            Err(e) => {
                report_failure(self.sink.as_ref(), "Failed to fetch medications", &e);
                return Err(e);
            }
        };

        let envelope: MedicationsEnvelope =
            decode(&response, self.sink.as_ref(), "Failed to fetch medications")?;
        self.plans.install(ticket, envelope.medications).await;
        Ok(self.plans.snapshot().await)
    }

    /// Submit a new plan. Success means HTTP 201 exactly; any other
    /// status is treated as a rejection and the caller keeps the form
    /// state. On 201 the snapshot is refetched once, then success is
    /// reported.
    pub async fn add(&self, payload: &MedicationPayload) -> Result<(), GatewayError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        let response = match self.gateway.post(routes::MEDICATIONS, body).await {
            Ok(response) => response,
            Err(e) => {
                report_failure(self.sink.as_ref(), "Failed to add medication", &e);
                return Err(e);
            }
        };

        if !response.is_created() {
            let error = GatewayError::ServerRejected {
                status: response.status,
                message: "Failed to add medication".to_string(),
            };
            report_failure(self.sink.as_ref(), "Failed to add medication", &error);
            return Err(error);
        }

        let _ = self.refresh().await;
        info!(medicine = %payload.medicine_name, "medication added");
        self.sink
            .notify(Notification::success("Medication added successfully"));
        Ok(())
    }

    /// Fetch one plan by id. Read-only; the snapshot is untouched.
    pub async fn get(&self, id: &str) -> Result<MedicationPlan, GatewayError> {
        let response = match self.gateway.get(&routes::medication(id)).await {
            Ok(response) => response,
            Err(e) => {
                report_failure(self.sink.as_ref(), "Failed to fetch medication", &e);
                return Err(e);
            }
        };

        // Try the envelope first; only a failure of the bare-object
        // fallback is a real decode failure worth reporting.
        match response.json::<MedicationEnvelope>() {
            Ok(envelope) => Ok(envelope.medication),
            Err(_) => decode(&response, self.sink.as_ref(), "Failed to fetch medication"),
        }
    }

    /// Replace a plan, then refetch once.
    pub async fn update(
        &self,
        id: &str,
        payload: &MedicationPayload,
    ) -> Result<(), GatewayError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        if let Err(e) = self.gateway.put(&routes::medication(id), body).await {
            report_failure(self.sink.as_ref(), "Failed to update medication", &e);
            return Err(e);
        }

        let _ = self.refresh().await;
        self.sink.notify(Notification::success("Medication updated"));
        Ok(())
    }

    /// Delete a plan, then refetch once.
    pub async fn remove(&self, id: &str) -> Result<(), GatewayError> {
        if let Err(e) = self.gateway.delete(&routes::medication(id)).await {
            report_failure(self.sink.as_ref(), "Failed to remove medication", &e);
            return Err(e);
        }

        let _ = self.refresh().await;
        self.sink.notify(Notification::success("Medication removed"));
        Ok(())
    }
}
