use std::fmt;
use std::sync::Arc;

use super::repository::{
    CareerRepository, DirectoryError, OrganizationDirectory, OrganizationRecord, RepositoryError,
};

/// Resolved form of an inbound organization identifier.
///
/// Historical records key organizations either by a strict 24-hex reference
/// or by an arbitrary literal string, and the two never collide. Resolution
/// is a two-branch decision: attempt the structured parse, fall back to the
/// literal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrgKey {
    Reference(String),
    Literal(String),
}

impl OrgKey {
    pub fn resolve(raw: &str) -> Self {
        if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Self::Reference(raw.to_ascii_lowercase())
        } else {
            Self::Literal(raw.to_string())
        }
    }

    /// The identifier as submitted, regardless of representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Reference(value) | Self::Literal(value) => value,
        }
    }
}

impl fmt::Display for OrgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a quota check for one prospective posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// A plan caps the organization and head room remains.
    Granted { allowed: u32, active: u32 },
    /// The cap is reached; creation must be refused.
    Exhausted { allowed: u32, active: u32 },
    /// No plan (or a plan without a job limit): nothing to enforce.
    Unrestricted,
}

impl QuotaDecision {
    pub fn permits_creation(self) -> bool {
        !matches!(self, QuotaDecision::Exhausted { .. })
    }
}

/// Failures surfaced while resolving an organization's posting quota.
#[derive(Debug, thiserror::Error)]
pub enum QuotaError {
    #[error("organization not found")]
    OrganizationNotFound,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Joins an organization to its plan and compares the active-posting count
/// against the plan's cap.
///
/// The count and the caller's subsequent insert share no lock or
/// conditional write; concurrent submissions from one organization can both
/// pass and transiently exceed the cap. That race is accepted.
pub struct QuotaResolver<D, R> {
    directory: Arc<D>,
    repository: Arc<R>,
}

impl<D, R> QuotaResolver<D, R>
where
    D: OrganizationDirectory,
    R: CareerRepository,
{
    pub fn new(directory: Arc<D>, repository: Arc<R>) -> Self {
        Self {
            directory,
            repository,
        }
    }

    /// Look up the organization record (with optional plan) for a raw
    /// identifier, failing when neither representation matches.
    pub fn organization(&self, raw_org_id: &str) -> Result<OrganizationRecord, QuotaError> {
        let key = OrgKey::resolve(raw_org_id);
        self.directory
            .find(&key)?
            .ok_or(QuotaError::OrganizationNotFound)
    }

    /// Decide whether the organization may create one more posting.
    pub fn check(&self, raw_org_id: &str) -> Result<QuotaDecision, QuotaError> {
        let record = self.organization(raw_org_id)?;

        let Some(job_limit) = record.plan.as_ref().and_then(|plan| plan.job_limit) else {
            return Ok(QuotaDecision::Unrestricted);
        };

        let extra = record.organization.extra_job_slots.unwrap_or(0);
        let allowed = job_limit.saturating_add(extra);
        let active = self.repository.count_active(raw_org_id)?;
        let active = u32::try_from(active).unwrap_or(u32::MAX);

        if active >= allowed {
            Ok(QuotaDecision::Exhausted { allowed, active })
        } else {
            Ok(QuotaDecision::Granted { allowed, active })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::careers::domain::{Organization, Plan};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FixedDirectory {
        records: HashMap<OrgKey, OrganizationRecord>,
    }

    impl OrganizationDirectory for FixedDirectory {
        fn find(&self, key: &OrgKey) -> Result<Option<OrganizationRecord>, DirectoryError> {
            Ok(self.records.get(key).cloned())
        }
    }

    struct FixedCounts {
        active: Mutex<HashMap<String, usize>>,
    }

    impl CareerRepository for FixedCounts {
        fn insert(
            &self,
            career: crate::careers::domain::Career,
        ) -> Result<crate::careers::domain::Career, RepositoryError> {
            Ok(career)
        }

        fn fetch(
            &self,
            _id: &crate::careers::domain::CareerId,
        ) -> Result<Option<crate::careers::domain::Career>, RepositoryError> {
            Ok(None)
        }

        fn count_active(&self, org_id: &str) -> Result<usize, RepositoryError> {
            let guard = self.active.lock().expect("count mutex poisoned");
            Ok(guard.get(org_id).copied().unwrap_or(0))
        }
    }

    fn organization(plan_id: Option<&str>, extra: Option<u32>) -> Organization {
        Organization {
            name: "Acme Talent".to_string(),
            plan_id: plan_id.map(str::to_string),
            extra_job_slots: extra,
        }
    }

    fn resolver(
        record: OrganizationRecord,
        key: OrgKey,
        active: usize,
    ) -> QuotaResolver<FixedDirectory, FixedCounts> {
        let mut records = HashMap::new();
        let org_id = key.as_str().to_string();
        records.insert(key, record);
        let mut counts = HashMap::new();
        counts.insert(org_id, active);
        QuotaResolver::new(
            Arc::new(FixedDirectory { records }),
            Arc::new(FixedCounts {
                active: Mutex::new(counts),
            }),
        )
    }

    #[test]
    fn strict_hex_identifiers_resolve_as_references() {
        let key = OrgKey::resolve("64f1a2b3c4d5e6f708192a3b");
        assert_eq!(
            key,
            OrgKey::Reference("64f1a2b3c4d5e6f708192a3b".to_string())
        );
    }

    #[test]
    fn everything_else_resolves_as_a_literal_key() {
        assert_eq!(
            OrgKey::resolve("acme-talent"),
            OrgKey::Literal("acme-talent".to_string())
        );
        // 23 hex chars: too short for the reference form.
        assert_eq!(
            OrgKey::resolve("64f1a2b3c4d5e6f708192a3"),
            OrgKey::Literal("64f1a2b3c4d5e6f708192a3".to_string())
        );
    }

    #[test]
    fn head_room_below_the_cap_grants_creation() {
        let record = OrganizationRecord {
            organization: organization(Some("plan-1"), Some(2)),
            plan: Some(Plan {
                id: "plan-1".to_string(),
                name: "Growth".to_string(),
                job_limit: Some(5),
            }),
        };
        let resolver = resolver(record, OrgKey::resolve("acme"), 6);

        let decision = resolver.check("acme").expect("resolves");
        assert_eq!(
            decision,
            QuotaDecision::Granted {
                allowed: 7,
                active: 6
            }
        );
        assert!(decision.permits_creation());
    }

    #[test]
    fn reaching_the_cap_exhausts_the_quota() {
        let record = OrganizationRecord {
            organization: organization(Some("plan-1"), Some(2)),
            plan: Some(Plan {
                id: "plan-1".to_string(),
                name: "Growth".to_string(),
                job_limit: Some(5),
            }),
        };
        let resolver = resolver(record, OrgKey::resolve("acme"), 7);

        let decision = resolver.check("acme").expect("resolves");
        assert_eq!(
            decision,
            QuotaDecision::Exhausted {
                allowed: 7,
                active: 7
            }
        );
        assert!(!decision.permits_creation());
    }

    #[test]
    fn missing_plan_means_no_enforcement() {
        let record = OrganizationRecord {
            organization: organization(Some("plan-vanished"), None),
            plan: None,
        };
        let resolver = resolver(record, OrgKey::resolve("acme"), 100);

        let decision = resolver.check("acme").expect("resolves");
        assert_eq!(decision, QuotaDecision::Unrestricted);
    }

    #[test]
    fn plan_without_a_limit_means_no_enforcement() {
        let record = OrganizationRecord {
            organization: organization(Some("plan-1"), Some(3)),
            plan: Some(Plan {
                id: "plan-1".to_string(),
                name: "Enterprise".to_string(),
                job_limit: None,
            }),
        };
        let resolver = resolver(record, OrgKey::resolve("acme"), 100);

        assert_eq!(
            resolver.check("acme").expect("resolves"),
            QuotaDecision::Unrestricted
        );
    }

    #[test]
    fn unknown_organization_fails_with_not_found() {
        let resolver = QuotaResolver::new(
            Arc::new(FixedDirectory {
                records: HashMap::new(),
            }),
            Arc::new(FixedCounts {
                active: Mutex::new(HashMap::new()),
            }),
        );

        let result = resolver.check("nobody");
        assert!(matches!(result, Err(QuotaError::OrganizationNotFound)));
    }
}
