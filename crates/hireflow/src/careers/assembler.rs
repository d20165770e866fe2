use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{
    ActorSnapshot, Career, CareerId, CareerStatus, EmploymentType, PreScreeningQuestion,
    QuestionCategory, ScreeningSetting, TeamMemberAssignment, WorkArrangement,
};
use super::wizard::WizardFields;

/// Outbound posting payload, shaped exactly like the wire format the
/// posting endpoint accepts. Every field is optional here; the endpoint
/// owns the required-field rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<ActorSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ActorSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screening_setting: Option<ScreeningSetting>,
    #[serde(rename = "orgID", default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_video: Option<bool>,
    /// Flat city field kept for consumers predating the country/province
    /// split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_setup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_setup_remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CareerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_negotiable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_secret_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_interview_secret_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_screening_questions: Option<Vec<PreScreeningQuestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<TeamMemberAssignment>>,
}

/// Parse a user-entered salary. A failed parse maps to absent, never zero.
fn parse_salary(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl CareerDraft {
    /// Map accumulated wizard state into the posting payload.
    ///
    /// The actor snapshot is embedded verbatim for both `createdBy` and
    /// `lastEditedBy` on creation.
    pub fn from_wizard(
        fields: &WizardFields,
        actor: &ActorSnapshot,
        org_id: &str,
        status: CareerStatus,
    ) -> Self {
        Self {
            job_title: Some(fields.job_title.clone()),
            description: Some(fields.description.clone()),
            questions: Some(fields.questions.clone()),
            last_edited_by: Some(actor.clone()),
            created_by: Some(actor.clone()),
            screening_setting: Some(fields.screening_setting),
            org_id: Some(org_id.to_string()),
            require_video: Some(fields.require_video),
            location: non_empty(&fields.city),
            work_setup: Some(fields.work_setup.clone()),
            work_setup_remarks: non_empty(&fields.work_setup_remarks),
            status: Some(status),
            salary_negotiable: Some(fields.salary_negotiable),
            minimum_salary: parse_salary(&fields.minimum_salary),
            maximum_salary: parse_salary(&fields.maximum_salary),
            country: non_empty(&fields.country),
            province: non_empty(&fields.province),
            employment_type: non_empty(&fields.employment_type),
            cv_secret_prompt: non_empty(&fields.cv_secret_prompt),
            ai_interview_secret_prompt: non_empty(&fields.ai_interview_secret_prompt),
            pre_screening_questions: Some(fields.pre_screening_questions.clone()),
            team_members: Some(fields.team_members.clone()),
        }
    }

    /// Update payload for an existing posting: identical mapping, except
    /// only `lastEditedBy` is refreshed and `createdBy` is left alone.
    pub fn from_wizard_update(
        fields: &WizardFields,
        actor: &ActorSnapshot,
        status: CareerStatus,
    ) -> Self {
        let mut draft = Self::from_wizard(fields, actor, "", status);
        draft.org_id = None;
        draft.created_by = None;
        draft
    }
}

/// Validated required fields, produced by the endpoint's field checks and
/// consumed here to build the persisted record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub job_title: String,
    pub description: String,
    pub questions: Vec<QuestionCategory>,
    pub work_setup: WorkArrangement,
    pub employment_type: Option<EmploymentType>,
    pub status: CareerStatus,
    pub org_id: String,
    pub draft: CareerDraft,
}

/// Assemble the canonical career record from a validated submission,
/// applying default-filling rules and stamping creation metadata.
pub fn assemble_career(submission: ValidatedSubmission) -> Career {
    let now = Utc::now();
    let draft = submission.draft;

    let fallback_actor = ActorSnapshot {
        name: String::new(),
        email: String::new(),
        image: None,
    };
    let created_by = draft.created_by.unwrap_or_else(|| fallback_actor.clone());
    let last_edited_by = draft.last_edited_by.unwrap_or(fallback_actor);

    Career {
        id: CareerId::generate(),
        job_title: submission.job_title,
        description: submission.description,
        questions: submission.questions,
        location: draft.location,
        work_setup: submission.work_setup,
        work_setup_remarks: draft.work_setup_remarks,
        created_at: now,
        updated_at: now,
        last_activity_at: now,
        last_edited_by,
        created_by,
        status: submission.status,
        screening_setting: draft.screening_setting.unwrap_or_default(),
        org_id: submission.org_id,
        require_video: draft.require_video.unwrap_or(false),
        salary_negotiable: draft.salary_negotiable.unwrap_or(false),
        minimum_salary: draft.minimum_salary,
        maximum_salary: draft.maximum_salary,
        country: draft.country,
        province: draft.province,
        employment_type: submission.employment_type,
        cv_secret_prompt: draft.cv_secret_prompt,
        ai_interview_secret_prompt: draft.ai_interview_secret_prompt,
        pre_screening_questions: draft.pre_screening_questions.unwrap_or_default(),
        team_members: draft.team_members.unwrap_or_default(),
    }
}
