//! End-to-end flow: wizard field accumulation, payload assembly, and the
//! posting service consuming the assembled draft.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use hireflow::careers::{
    ActorSnapshot, Career, CareerId, CareerRepository, CareerService, CareerStatus,
    DirectoryError, InterviewQuestion, MemberSnapshot, OrgKey, Organization,
    OrganizationDirectory, OrganizationRecord, Plan, RepositoryError, TeamRole, CareerWizard,
    WizardStep,
};

#[derive(Default)]
struct MemoryDirectory {
    records: HashMap<OrgKey, OrganizationRecord>,
}

impl OrganizationDirectory for MemoryDirectory {
    fn find(&self, key: &OrgKey) -> Result<Option<OrganizationRecord>, DirectoryError> {
        Ok(self.records.get(key).cloned())
    }
}

#[derive(Default)]
struct MemoryRepository {
    careers: Mutex<Vec<Career>>,
}

impl CareerRepository for MemoryRepository {
    fn insert(&self, career: Career) -> Result<Career, RepositoryError> {
        self.careers.lock().expect("lock").push(career.clone());
        Ok(career)
    }

    fn fetch(&self, id: &CareerId) -> Result<Option<Career>, RepositoryError> {
        let guard = self.careers.lock().expect("lock");
        Ok(guard.iter().find(|career| &career.id == id).cloned())
    }

    fn count_active(&self, org_id: &str) -> Result<usize, RepositoryError> {
        let guard = self.careers.lock().expect("lock");
        Ok(guard
            .iter()
            .filter(|career| career.org_id == org_id && career.status == CareerStatus::Active)
            .count())
    }
}

fn build_service() -> CareerService<MemoryDirectory, MemoryRepository> {
    let mut records = HashMap::new();
    records.insert(
        OrgKey::resolve("acme"),
        OrganizationRecord {
            organization: Organization {
                name: "Acme Talent".to_string(),
                plan_id: Some("plan-1".to_string()),
                extra_job_slots: None,
            },
            plan: Some(Plan {
                id: "plan-1".to_string(),
                name: "Growth".to_string(),
                job_limit: Some(5),
            }),
        },
    );
    CareerService::new(
        Arc::new(MemoryDirectory { records }),
        Arc::new(MemoryRepository::default()),
    )
}

fn actor() -> ActorSnapshot {
    ActorSnapshot {
        name: "Dana Cruz".to_string(),
        email: "dana@acme.example".to_string(),
        image: Some("https://cdn.example/avatars/dana.png".to_string()),
    }
}

fn creator() -> MemberSnapshot {
    MemberSnapshot {
        id: "u-1".to_string(),
        name: "Dana Cruz".to_string(),
        email: "dana@acme.example".to_string(),
        image: None,
    }
}

fn completed_wizard() -> CareerWizard {
    let mut wizard = CareerWizard::for_actor(&creator());
    wizard.fields.job_title = "Data Engineer".to_string();
    wizard.fields.description = "<p>Own the warehouse.</p>".to_string();
    wizard.fields.work_setup = "Fully Remote".to_string();
    wizard.fields.employment_type = "Full-Time".to_string();
    wizard.fields.city = "Cebu City".to_string();
    wizard.fields.minimum_salary = "80000".to_string();
    wizard.fields.maximum_salary = "110000".to_string();
    wizard.fields.questions[1].questions.push(InterviewQuestion {
        question: "Describe a pipeline you hardened.".to_string(),
    });
    wizard
}

#[test]
fn published_wizard_draft_is_accepted_by_the_endpoint() {
    let mut wizard = completed_wizard();
    while wizard.step() != WizardStep::Review {
        let before = wizard.step();
        wizard.next();
        assert_ne!(wizard.step(), before, "wizard must be able to advance");
    }

    let draft = wizard.publish(&actor(), "acme").expect("publish assembles");
    let payload: Value = serde_json::to_value(&draft).expect("draft serializes");

    let service = build_service();
    let career = service.create(&payload).expect("endpoint accepts the draft");

    assert_eq!(career.status, CareerStatus::Active);
    assert_eq!(career.job_title, "Data Engineer");
    assert_eq!(career.location.as_deref(), Some("Cebu City"));
    assert_eq!(career.minimum_salary, Some(80000.0));
    assert_eq!(career.maximum_salary, Some(110000.0));
    assert_eq!(career.created_by, actor());
    assert_eq!(career.last_edited_by, actor());
    assert_eq!(career.team_members.len(), 1);
    assert_eq!(career.team_members[0].role, TeamRole::JobOwner);
    // The rich-text description is escaped on the way into the store.
    assert_eq!(
        career.description,
        "&lt;p&gt;Own the warehouse.&lt;&#x2F;p&gt;"
    );
}

#[test]
fn unpublished_save_lands_as_inactive_from_any_step() {
    let wizard = completed_wizard();
    assert_eq!(wizard.step(), WizardStep::CareerDetails);

    let draft = wizard
        .save_unpublished(&actor(), "acme")
        .expect("draft assembles");
    let payload: Value = serde_json::to_value(&draft).expect("draft serializes");

    let service = build_service();
    let career = service.create(&payload).expect("endpoint accepts the draft");
    assert_eq!(career.status, CareerStatus::Inactive);
}
