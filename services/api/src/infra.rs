use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use hireflow::careers::{
    Career, CareerId, CareerRepository, CareerStatus, DirectoryError, OrgKey, Organization,
    OrganizationDirectory, OrganizationRecord, Plan, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCareerRepository {
    careers: Arc<Mutex<HashMap<CareerId, Career>>>,
}

impl CareerRepository for InMemoryCareerRepository {
    fn insert(&self, career: Career) -> Result<Career, RepositoryError> {
        let mut guard = self.careers.lock().expect("career mutex poisoned");
        if guard.contains_key(&career.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(career.id.clone(), career.clone());
        Ok(career)
    }

    fn fetch(&self, id: &CareerId) -> Result<Option<Career>, RepositoryError> {
        let guard = self.careers.lock().expect("career mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn count_active(&self, org_id: &str) -> Result<usize, RepositoryError> {
        let guard = self.careers.lock().expect("career mutex poisoned");
        Ok(guard
            .values()
            .filter(|career| career.org_id == org_id && career.status == CareerStatus::Active)
            .count())
    }
}

/// Directory with the plan join resolved at seed time: each stored record
/// already pairs the organization with the plan whose string-normalized id
/// equals the organization's `planId`.
#[derive(Default, Clone)]
pub(crate) struct InMemoryOrganizationDirectory {
    records: Arc<Mutex<HashMap<OrgKey, OrganizationRecord>>>,
}

impl InMemoryOrganizationDirectory {
    pub(crate) fn seed(&self, key: OrgKey, organization: Organization, plans: &[Plan]) {
        let plan = organization
            .plan_id
            .as_deref()
            .and_then(|plan_id| plans.iter().find(|plan| plan.id == plan_id).cloned());
        let record = OrganizationRecord { organization, plan };
        self.records
            .lock()
            .expect("directory mutex poisoned")
            .insert(key, record);
    }
}

impl OrganizationDirectory for InMemoryOrganizationDirectory {
    fn find(&self, key: &OrgKey) -> Result<Option<OrganizationRecord>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(key).cloned())
    }
}

/// Development seed: one organization on a capped plan plus a legacy
/// organization keyed by a literal string with no plan at all.
pub(crate) fn seed_directory(directory: &InMemoryOrganizationDirectory) {
    let plans = vec![
        Plan {
            id: "plan-starter".to_string(),
            name: "Starter".to_string(),
            job_limit: Some(3),
        },
        Plan {
            id: "plan-growth".to_string(),
            name: "Growth".to_string(),
            job_limit: Some(10),
        },
    ];

    directory.seed(
        OrgKey::resolve("64f1a2b3c4d5e6f708192a3b"),
        Organization {
            name: "Acme Talent".to_string(),
            plan_id: Some("plan-growth".to_string()),
            extra_job_slots: Some(2),
        },
        &plans,
    );
    directory.seed(
        OrgKey::resolve("legacy-demo-org"),
        Organization {
            name: "Legacy Demo Org".to_string(),
            plan_id: None,
            extra_job_slots: None,
        },
        &plans,
    );
}
