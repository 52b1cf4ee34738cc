//! Storage boundary for templates and submissions.
//!
//! The production backend is an external REST collaborator; this crate ships
//! the contract plus [`MemoryStore`], an in-process reference implementation
//! used by the test suite and as a read-path fallback. Timeouts and retries
//! for a networked implementation belong to that implementation, not here.

mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::errors::FormError;
use crate::search::{SubmissionPage, SubmissionQuery};
use crate::types::{CustomEventForm, FormData, SubmissionStatus};

/// Summary row for the customer-facing event-type picker.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    pub event_type: String,
    pub template_name: String,
}

/// Payload for submitting a filled form against a stored template.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub template_id: String,
    pub form_data: FormData,
}

/// Async contract mirroring the booking API.
///
/// Write-path failures must always surface to the caller; only read paths
/// may fall back to cached data.
#[allow(async_fn_in_trait)]
pub trait EventFormStore {
    /// List id/name pairs for the event-type picker.
    async fn list_event_names(&self) -> Result<Vec<EventSummary>, FormError>;

    /// Fetch one admin-authored form with its full field schema.
    async fn get_event(&self, id: &str) -> Result<CustomEventForm, FormError>;

    /// Persist an admin-authored form. Returns the stored id.
    async fn create_event(&self, form: CustomEventForm) -> Result<String, FormError>;

    async fn delete_event(&self, id: &str) -> Result<(), FormError>;

    /// Validate and store a customer submission. Returns the submission id.
    async fn submit_form(&self, request: SubmissionRequest) -> Result<String, FormError>;

    async fn list_submissions(&self, query: &SubmissionQuery) -> Result<SubmissionPage, FormError>;

    async fn update_submission_status(&self, id: &str, status: SubmissionStatus) -> Result<(), FormError>;

    async fn delete_submission(&self, id: &str) -> Result<(), FormError>;
}
