use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted career postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CareerId(pub String);

impl CareerId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Publication state of a posting. `draft` is a historical alias of
/// `inactive`; both deserialize to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerStatus {
    Active,
    #[serde(alias = "draft")]
    Inactive,
    Closed,
}

impl CareerStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CareerStatus::Active => "active",
            CareerStatus::Inactive => "inactive",
            CareerStatus::Closed => "closed",
        }
    }

    /// Parse one of the accepted wire values, `draft` included.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" | "draft" => Some(Self::Inactive),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Where the role is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkArrangement {
    #[serde(rename = "Fully Remote")]
    FullyRemote,
    Onsite,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
}

/// Threshold at which candidates are automatically endorsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningSetting {
    #[serde(rename = "Good Fit and above")]
    GoodFitAndAbove,
    #[serde(rename = "Only Strong Fit")]
    OnlyStrongFit,
    #[serde(rename = "No Automatic Promotion")]
    NoAutomaticPromotion,
}

impl Default for ScreeningSetting {
    fn default() -> Self {
        Self::GoodFitAndAbove
    }
}

/// Access level granted to a collaborating team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamRole {
    #[serde(rename = "Job Owner")]
    JobOwner,
    Contributor,
    Reviewer,
}

/// Directory snapshot of a member, embedded rather than referenced so the
/// posting stays renderable if the directory entry changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Pairs a member with a role. At most one assignment per member reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberAssignment {
    pub member: MemberSnapshot,
    pub role: TeamRole,
}

/// Actor identity embedded verbatim into `createdBy` / `lastEditedBy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Answer widget presented to an applicant for a pre-screening question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "Short Answer")]
    ShortAnswer,
    #[serde(rename = "Long Answer")]
    LongAnswer,
    Dropdown,
    Checkboxes,
    Range,
}

impl Default for QuestionKind {
    fn default() -> Self {
        Self::ShortAnswer
    }
}

/// Kind-specific configuration: options feed Dropdown/Checkboxes, the
/// min/max pair feeds Range. Unused slots stay absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

/// Structured question answered before the AI interview stages. Order is
/// significant and user-reorderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreScreeningQuestion {
    pub id: u64,
    pub question: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub config: QuestionConfig,
}

/// One interview question inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
}

/// Ordered grouping of interview questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCategory {
    pub id: u64,
    pub category: String,
    #[serde(default)]
    pub question_count_to_ask: Option<u32>,
    #[serde(default)]
    pub questions: Vec<InterviewQuestion>,
}

/// The five categories every new posting starts from, each empty.
pub fn standard_question_categories() -> Vec<QuestionCategory> {
    ["CV Validation / Experience", "Technical", "Behavioral", "Analytical", "Others"]
        .into_iter()
        .enumerate()
        .map(|(index, category)| QuestionCategory {
            id: index as u64 + 1,
            category: category.to_string(),
            question_count_to_ask: None,
            questions: Vec::new(),
        })
        .collect()
}

/// The persisted job posting record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub id: CareerId,
    pub job_title: String,
    pub description: String,
    pub questions: Vec<QuestionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub work_setup: WorkArrangement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_setup_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub last_edited_by: ActorSnapshot,
    pub created_by: ActorSnapshot,
    pub status: CareerStatus,
    #[serde(default)]
    pub screening_setting: ScreeningSetting,
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(default)]
    pub require_video: bool,
    #[serde(default)]
    pub salary_negotiable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_secret_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_interview_secret_prompt: Option<String>,
    #[serde(default)]
    pub pre_screening_questions: Vec<PreScreeningQuestion>,
    #[serde(default)]
    pub team_members: Vec<TeamMemberAssignment>,
}

/// An organization owning zero or more careers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    /// String-typed reference; the plan's own identifier is normalized to
    /// string before the join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_job_slots: Option<u32>,
}

/// A subscription tier. `job_limit` caps concurrently active postings;
/// tiers without one impose no cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_draft_as_inactive_alias() {
        assert_eq!(CareerStatus::parse("draft"), Some(CareerStatus::Inactive));
        assert_eq!(CareerStatus::parse("inactive"), Some(CareerStatus::Inactive));
        assert_eq!(CareerStatus::parse("active"), Some(CareerStatus::Active));
        assert_eq!(CareerStatus::parse("closed"), Some(CareerStatus::Closed));
        assert_eq!(CareerStatus::parse("bogus"), None);
    }

    #[test]
    fn standard_categories_cover_the_five_groups() {
        let categories = standard_question_categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].category, "CV Validation / Experience");
        assert_eq!(categories[4].category, "Others");
        assert!(categories.iter().all(|c| c.questions.is_empty()));
    }

    #[test]
    fn enums_round_trip_through_their_wire_labels() {
        let json = serde_json::to_string(&WorkArrangement::FullyRemote).expect("serializes");
        assert_eq!(json, "\"Fully Remote\"");
        let parsed: EmploymentType = serde_json::from_str("\"Part-Time\"").expect("deserializes");
        assert_eq!(parsed, EmploymentType::PartTime);
    }
}
