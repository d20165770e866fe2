use serde::{Deserialize, Serialize};

use super::domain::{Career, CareerId, Organization, Plan};
use super::quota::OrgKey;

/// Organization joined with its subscription plan, as returned by one
/// logical directory read. The plan slot is optional: an organization whose
/// `planId` matches nothing still resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub organization: Organization,
    pub plan: Option<Plan>,
}

/// Lookup surface for organizations and their plans.
///
/// Implementations must normalize the plan's own identifier to a string
/// before comparing it with the organization's stored `planId`; historical
/// plan documents carry a non-string native id.
pub trait OrganizationDirectory: Send + Sync {
    fn find(&self, key: &OrgKey) -> Result<Option<OrganizationRecord>, DirectoryError>;
}

/// Storage abstraction for career postings so the service can be exercised
/// against in-memory fakes.
pub trait CareerRepository: Send + Sync {
    fn insert(&self, career: Career) -> Result<Career, RepositoryError>;
    fn fetch(&self, id: &CareerId) -> Result<Option<Career>, RepositoryError>;
    /// Number of currently `active` postings owned by the organization.
    fn count_active(&self, org_id: &str) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Directory read failure.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
