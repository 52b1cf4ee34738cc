use std::sync::RwLock;

use chrono::Utc;

use super::{EventFormStore, EventSummary, SubmissionRequest};
use crate::errors::FormError;
use crate::id::generate_entity_id;
use crate::renderer::validate_submission;
use crate::search::{Pagination, SubmissionPage, SubmissionQuery};
use crate::types::{CustomEventForm, Submission, SubmissionStatus, UserInfo};

/// In-process store keeping events and submissions in insertion order.
///
/// Submissions are validated against the stored template before acceptance,
/// the same gate a networked backend applies server-side.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<CustomEventForm>,
    submissions: Vec<Submission>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, e.g. a cached read-path
    /// snapshot taken before the network went away.
    pub fn seeded(events: Vec<CustomEventForm>, submissions: Vec<Submission>) -> Self {
        Self {
            inner: RwLock::new(Inner { events, submissions }),
        }
    }
}

impl EventFormStore for MemoryStore {
    async fn list_event_names(&self) -> Result<Vec<EventSummary>, FormError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .events
            .iter()
            .map(|event| EventSummary {
                id: event.id.clone(),
                event_type: event.event_type.clone(),
                template_name: event.template_name.clone(),
            })
            .collect())
    }

    async fn get_event(&self, id: &str) -> Result<CustomEventForm, FormError> {
        let inner = self.inner.read().unwrap();
        inner
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(|| FormError::NotFound {
                entity_id: Some(id.to_string()),
            })
    }

    async fn create_event(&self, form: CustomEventForm) -> Result<String, FormError> {
        let mut inner = self.inner.write().unwrap();
        if inner.events.iter().any(|event| event.id == form.id) {
            return Err(FormError::InvalidRequest {
                message: format!("event {} already exists", form.id),
            });
        }
        let id = form.id.clone();
        log::debug!("create_event: {} ({} fields)", id, form.form_fields.len());
        inner.events.push(form);
        Ok(id)
    }

    async fn delete_event(&self, id: &str) -> Result<(), FormError> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.events.len();
        inner.events.retain(|event| event.id != id);
        if inner.events.len() == before {
            return Err(FormError::NotFound {
                entity_id: Some(id.to_string()),
            });
        }
        Ok(())
    }

    async fn submit_form(&self, request: SubmissionRequest) -> Result<String, FormError> {
        let mut inner = self.inner.write().unwrap();
        let event = inner
            .events
            .iter()
            .find(|event| event.id == request.template_id)
            .ok_or_else(|| FormError::NotFound {
                entity_id: Some(request.template_id.clone()),
            })?;

        validate_submission(&event.form_fields, &request.form_data)?;

        let submission = Submission {
            id: generate_entity_id(),
            event_type: event.event_type.clone(),
            template_name: event.template_name.clone(),
            user_info: UserInfo::from_form_data(&request.form_data),
            form_data: request.form_data,
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
        };
        let id = submission.id.clone();
        log::debug!("submit_form: {} for event {}", id, request.template_id);
        inner.submissions.push(submission);
        Ok(id)
    }

    async fn list_submissions(&self, query: &SubmissionQuery) -> Result<SubmissionPage, FormError> {
        let inner = self.inner.read().unwrap();
        let mut matched: Vec<Submission> = inner
            .submissions
            .iter()
            .filter(|submission| query.matches(submission))
            .cloned()
            .collect();
        match query.order {
            crate::search::SortOrder::Asc => matched.sort_by_key(|submission| submission.submitted_at),
            crate::search::SortOrder::Desc => {
                matched.sort_by_key(|submission| std::cmp::Reverse(submission.submitted_at))
            }
        }

        let page = query.effective_page();
        let page_size = query.effective_page_size();
        let total = matched.len() as u64;
        let start = ((page - 1) * page_size) as usize;
        let submissions: Vec<Submission> = matched.into_iter().skip(start).take(page_size as usize).collect();

        Ok(SubmissionPage {
            submissions,
            pagination: Pagination::new(page, page_size, total),
        })
    }

    async fn update_submission_status(&self, id: &str, status: SubmissionStatus) -> Result<(), FormError> {
        let mut inner = self.inner.write().unwrap();
        let submission = inner
            .submissions
            .iter_mut()
            .find(|submission| submission.id == id)
            .ok_or_else(|| FormError::NotFound {
                entity_id: Some(id.to_string()),
            })?;
        submission.status = status;
        Ok(())
    }

    async fn delete_submission(&self, id: &str) -> Result<(), FormError> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.submissions.len();
        inner.submissions.retain(|submission| submission.id != id);
        if inner.submissions.len() == before {
            return Err(FormError::NotFound {
                entity_id: Some(id.to_string()),
            });
        }
        Ok(())
    }
}
