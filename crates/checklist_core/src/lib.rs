use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{domain::ChecklistId, protocol::ChecklistSummary};
use tracing::{info, warn};

pub mod assembler;
pub mod attachments;
pub mod codec;
pub mod credentials;
pub mod date;
pub mod error;
pub mod form;
pub mod numeric;
pub mod render;
pub mod session;
pub mod store;
pub mod transport;

pub use attachments::AttachmentRef;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::ClientError;
pub use form::ChecklistForm;
pub use session::{Clock, Session, SystemClock, TokenGuard, TokenRecord};
pub use transport::{HttpInspectionService, InspectionService};

/// Drives the sign-in, listing, loading and submission flow against an
/// [`InspectionService`], keeping the cached credential in a
/// [`CredentialStore`].
pub struct ChecklistClient {
    service: Arc<dyn InspectionService>,
    credentials: Arc<dyn CredentialStore>,
    guard: TokenGuard,
    submitting: AtomicBool,
}

impl ChecklistClient {
    pub fn new(
        service: Arc<dyn InspectionService>,
        credentials: Arc<dyn CredentialStore>,
        guard: TokenGuard,
    ) -> Self {
        Self {
            service,
            credentials,
            guard,
            submitting: AtomicBool::new(false),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let token = match self.service.exchange_credentials(username, password).await {
            Ok(token) => token,
            Err(err) => {
                warn!(username, error = %err, "login failed");
                self.credentials.clear()?;
                return Err(match err {
                    ClientError::Unauthorized { .. } | ClientError::MalformedResponse { .. } => {
                        ClientError::InvalidCredentials
                    }
                    other => other,
                });
            }
        };
        let record = self.guard.issue(token);
        self.credentials.save(&record.to_json())?;
        info!(username, "signed in");
        Ok(Session::new(record.value))
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.credentials.clear()?;
        info!("signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_ok()
    }

    /// Current session from the cached credential. A missing, unreadable or
    /// expired record is discarded and reported as [`ClientError::SessionExpired`].
    pub fn session(&self) -> Result<Session, ClientError> {
        let Some(raw) = self.credentials.load()? else {
            return Err(ClientError::SessionExpired);
        };
        match self.guard.session(&raw) {
            Some(session) => Ok(session),
            None => {
                info!("cached credential expired or unreadable; discarding");
                self.credentials.clear()?;
                Err(ClientError::SessionExpired)
            }
        }
    }

    pub async fn list_checklists(&self) -> Result<Vec<ChecklistSummary>, ClientError> {
        let session = self.session()?;
        let result = self.service.list_checklists(&session).await;
        self.discard_on_reauth(result)
    }

    pub async fn open(&self, checklist_id: &ChecklistId) -> Result<ChecklistForm, ClientError> {
        let session = self.session()?;
        let items = self
            .discard_on_reauth(self.service.fetch_items(&session, checklist_id).await)?;
        info!(checklist = %checklist_id, items = items.len(), "checklist opened");
        Ok(ChecklistForm::load(checklist_id.clone(), items))
    }

    /// Submits the form and reloads the checklist from the service.
    ///
    /// Only one submission runs at a time; a concurrent call fails with
    /// [`ClientError::Busy`]. The form passed in is never modified, so a
    /// failed submission can be retried with it as is.
    pub async fn submit(&self, form: &ChecklistForm) -> Result<ChecklistForm, ClientError> {
        let _in_flight = SubmitGuard::acquire(&self.submitting)?;
        let session = self.session()?;
        let request = form.execution_request();
        self.discard_on_reauth(self.service.submit_execution(&session, &request).await)?;

        self.open(form.checklist_id())
            .await
            .map_err(|err| ClientError::ReloadAfterSubmit(Box::new(err)))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    fn discard_on_reauth<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(err) = &result {
            if err.requires_reauth() {
                warn!(error = %err, "service rejected the session; discarding credential");
                self.credentials.clear()?;
            }
        }
        result
    }
}

struct SubmitGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ClientError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub fn filter_checklists<'a>(
    checklists: &'a [ChecklistSummary],
    term: &str,
) -> Vec<&'a ChecklistSummary> {
    let term = term.trim().to_lowercase();
    checklists
        .iter()
        .filter(|summary| {
            term.is_empty()
                || [
                    summary.reference_number.as_str(),
                    summary.carrier.as_str(),
                    summary.status.as_wire(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
