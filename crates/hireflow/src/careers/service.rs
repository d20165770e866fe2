use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::assembler::assemble_career;
use super::domain::{Career, CareerId};
use super::quota::{QuotaDecision, QuotaError, QuotaResolver};
use super::repository::{CareerRepository, DirectoryError, OrganizationDirectory, RepositoryError};
use super::sanitize::{sanitize_value, SanitizeError, DEFAULT_MAX_DEPTH};
use super::validate::{validate_submission, ValidationError};

/// Failure taxonomy for the posting pipeline. Validation and quota errors
/// carry their user-facing message; directory and repository failures are
/// internal and get flattened at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum CareerServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Organization not found")]
    OrganizationNotFound,
    #[error("You have reached the maximum number of jobs for your plan")]
    QuotaExceeded,
    #[error(transparent)]
    Directory(DirectoryError),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<QuotaError> for CareerServiceError {
    fn from(value: QuotaError) -> Self {
        match value {
            QuotaError::OrganizationNotFound => Self::OrganizationNotFound,
            QuotaError::Directory(err) => Self::Directory(err),
            QuotaError::Repository(err) => Self::Repository(err),
        }
    }
}

impl From<SanitizeError> for CareerServiceError {
    fn from(value: SanitizeError) -> Self {
        match value {
            SanitizeError::DepthExceeded { .. } => {
                Self::Validation(ValidationError::PayloadTooDeep)
            }
        }
    }
}

/// Service running the submission pipeline in its required order:
/// sanitize the whole payload, validate fields, resolve the quota, persist.
///
/// The quota check and the insert are two independent operations with no
/// shared guard; concurrent submissions can transiently exceed the plan
/// limit. Accepted race, inherited from the stored contract.
pub struct CareerService<D, R> {
    resolver: QuotaResolver<D, R>,
    repository: Arc<R>,
    sanitize_max_depth: usize,
}

impl<D, R> CareerService<D, R>
where
    D: OrganizationDirectory + 'static,
    R: CareerRepository + 'static,
{
    pub fn new(directory: Arc<D>, repository: Arc<R>) -> Self {
        Self {
            resolver: QuotaResolver::new(directory, repository.clone()),
            repository,
            sanitize_max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_sanitize_max_depth(mut self, max_depth: usize) -> Self {
        self.sanitize_max_depth = max_depth;
        self
    }

    /// Create a posting from an untrusted inbound payload.
    pub fn create(&self, payload: &Value) -> Result<Career, CareerServiceError> {
        // Sanitization runs once, over the entire payload, before any
        // field is read.
        let sanitized = sanitize_value(payload, self.sanitize_max_depth)?;
        let submission = validate_submission(&sanitized)?;

        let decision = self.resolver.check(&submission.org_id)?;
        if !decision.permits_creation() {
            if let QuotaDecision::Exhausted { allowed, active } = decision {
                warn!(
                    org_id = %submission.org_id,
                    allowed,
                    active,
                    "posting refused: plan quota exhausted"
                );
            }
            return Err(CareerServiceError::QuotaExceeded);
        }

        let career = assemble_career(submission);
        let stored = self
            .repository
            .insert(career)
            .map_err(CareerServiceError::Repository)?;

        info!(
            career_id = %stored.id.0,
            org_id = %stored.org_id,
            status = stored.status.label(),
            "career posting created"
        );
        Ok(stored)
    }

    /// Fetch a stored posting for API responses.
    pub fn get(&self, id: &CareerId) -> Result<Option<Career>, CareerServiceError> {
        self.repository
            .fetch(id)
            .map_err(CareerServiceError::Repository)
    }
}
