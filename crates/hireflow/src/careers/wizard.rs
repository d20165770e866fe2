use serde::{Deserialize, Serialize};

use super::assembler::CareerDraft;
use super::domain::{
    standard_question_categories, ActorSnapshot, CareerStatus, MemberSnapshot,
    PreScreeningQuestion, QuestionCategory, ScreeningSetting, TeamMemberAssignment, TeamRole,
};

/// The five ordered steps of the posting wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    CareerDetails,
    CvReview,
    AiInterview,
    PipelineStages,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::CareerDetails,
        WizardStep::CvReview,
        WizardStep::AiInterview,
        WizardStep::PipelineStages,
        WizardStep::Review,
    ];

    pub const fn number(self) -> u8 {
        match self {
            WizardStep::CareerDetails => 1,
            WizardStep::CvReview => 2,
            WizardStep::AiInterview => 3,
            WizardStep::PipelineStages => 4,
            WizardStep::Review => 5,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::CareerDetails => "Career Details & Team Access",
            WizardStep::CvReview => "CV Review & Pre-screening",
            WizardStep::AiInterview => "AI Interview Setup",
            WizardStep::PipelineStages => "Pipeline Stages",
            WizardStep::Review => "Review Career",
        }
    }

    fn next(self) -> Option<Self> {
        let index = self.number() as usize;
        Self::ALL.get(index).copied()
    }

    fn previous(self) -> Option<Self> {
        let index = self.number() as usize;
        index.checked_sub(2).map(|prev| Self::ALL[prev])
    }
}

/// Field state accumulated across the wizard. Salary inputs stay raw
/// strings until submission so partial edits never corrupt the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardFields {
    pub job_title: String,
    pub description: String,
    pub work_setup: String,
    pub work_setup_remarks: String,
    pub employment_type: String,
    pub screening_setting: ScreeningSetting,
    pub require_video: bool,
    pub salary_negotiable: bool,
    pub minimum_salary: String,
    pub maximum_salary: String,
    pub questions: Vec<QuestionCategory>,
    pub country: String,
    pub province: String,
    pub city: String,
    pub cv_secret_prompt: String,
    pub ai_interview_secret_prompt: String,
    pub pre_screening_questions: Vec<PreScreeningQuestion>,
    pub team_members: Vec<TeamMemberAssignment>,
}

impl Default for WizardFields {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            description: String::new(),
            work_setup: String::new(),
            work_setup_remarks: String::new(),
            employment_type: String::new(),
            screening_setting: ScreeningSetting::default(),
            require_video: true,
            salary_negotiable: true,
            minimum_salary: String::new(),
            maximum_salary: String::new(),
            questions: standard_question_categories(),
            country: "Philippines".to_string(),
            province: String::new(),
            city: String::new(),
            cv_secret_prompt: String::new(),
            ai_interview_secret_prompt: String::new(),
            pre_screening_questions: Vec::new(),
            team_members: Vec::new(),
        }
    }
}

/// Errors resolved locally by the wizard, with no network round trip.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Minimum salary cannot be greater than maximum salary")]
    SalaryRangeInverted,
    #[error("complete the required fields before publishing")]
    FormIncomplete,
    #[error("publishing is only available from the review step")]
    NotOnReviewStep,
}

/// Client-session state machine for the posting form.
///
/// Holds the current step, the highest step reached (direct navigation may
/// never skip ahead of it), and the accumulated field state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerWizard {
    step: WizardStep,
    highest_reached: WizardStep,
    pub fields: WizardFields,
}

impl Default for CareerWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CareerWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::CareerDetails,
            highest_reached: WizardStep::CareerDetails,
            fields: WizardFields::default(),
        }
    }

    /// Start a wizard for `actor`, auto-assigning them as Job Owner.
    pub fn for_actor(actor: &MemberSnapshot) -> Self {
        let mut wizard = Self::new();
        wizard.add_team_member(actor.clone(), TeamRole::JobOwner);
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn highest_reached(&self) -> WizardStep {
        self.highest_reached
    }

    /// Validity predicate gating `next` for the current step. Only the
    /// first step carries required fields; the rest are optional content.
    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::CareerDetails => {
                !self.fields.job_title.trim().is_empty()
                    && !self.fields.work_setup.trim().is_empty()
                    && !self.fields.employment_type.trim().is_empty()
                    && !self.fields.description.trim().is_empty()
            }
            WizardStep::CvReview
            | WizardStep::AiInterview
            | WizardStep::PipelineStages
            | WizardStep::Review => true,
        }
    }

    /// Publish gate, independent of per-step validity.
    pub fn is_form_valid(&self) -> bool {
        !self.fields.job_title.trim().is_empty()
            && !self.fields.description.trim().is_empty()
            && self
                .fields
                .questions
                .iter()
                .any(|category| !category.questions.is_empty())
            && !self.fields.work_setup.trim().is_empty()
    }

    /// Advance one step when the current step is valid. Invalid state makes
    /// this a no-op, as does standing on the final step.
    pub fn next(&mut self) -> WizardStep {
        if self.is_step_valid(self.step) {
            if let Some(next) = self.step.next() {
                self.step = next;
                self.highest_reached = self.highest_reached.max(next);
            }
        }
        self.step
    }

    /// Step back; always allowed above the first step.
    pub fn previous(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Jump directly to a step already reached. Unvisited steps cannot be
    /// skipped ahead to.
    pub fn go_to(&mut self, step: WizardStep) -> WizardStep {
        if step <= self.highest_reached {
            self.step = step;
        }
        self.step
    }

    /// Add a collaborator, keeping at most one assignment per member.
    pub fn add_team_member(&mut self, member: MemberSnapshot, role: TeamRole) {
        if self
            .fields
            .team_members
            .iter()
            .any(|assignment| assignment.member.id == member.id)
        {
            return;
        }
        self.fields
            .team_members
            .push(TeamMemberAssignment { member, role });
    }

    pub fn remove_team_member(&mut self, member_id: &str) {
        self.fields
            .team_members
            .retain(|assignment| assignment.member.id != member_id);
    }

    pub fn set_team_member_role(&mut self, member_id: &str, role: TeamRole) {
        if let Some(assignment) = self
            .fields
            .team_members
            .iter_mut()
            .find(|assignment| assignment.member.id == member_id)
        {
            assignment.role = role;
        }
    }

    pub fn add_pre_screening_question(&mut self, question: PreScreeningQuestion) {
        self.fields.pre_screening_questions.push(question);
    }

    pub fn remove_pre_screening_question(&mut self, id: u64) {
        self.fields
            .pre_screening_questions
            .retain(|question| question.id != id);
    }

    /// Reorder a pre-screening question; order is user-significant.
    pub fn move_pre_screening_question(&mut self, id: u64, to_index: usize) {
        let Some(from) = self
            .fields
            .pre_screening_questions
            .iter()
            .position(|question| question.id == id)
        else {
            return;
        };
        let to = to_index.min(self.fields.pre_screening_questions.len() - 1);
        let question = self.fields.pre_screening_questions.remove(from);
        self.fields.pre_screening_questions.insert(to, question);
    }

    /// Both salaries parse and the minimum exceeds the maximum: reject
    /// locally before any payload is assembled.
    fn check_salary_range(&self) -> Result<(), WizardError> {
        let minimum = self.fields.minimum_salary.trim().parse::<f64>().ok();
        let maximum = self.fields.maximum_salary.trim().parse::<f64>().ok();
        if let (Some(min), Some(max)) = (minimum, maximum) {
            if !min.is_nan() && !max.is_nan() && min > max {
                return Err(WizardError::SalaryRangeInverted);
            }
        }
        Ok(())
    }

    /// Assemble the publish payload. Only available from the review step
    /// and only once the publish gate holds.
    pub fn publish(&self, actor: &ActorSnapshot, org_id: &str) -> Result<CareerDraft, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::NotOnReviewStep);
        }
        if !self.is_form_valid() {
            return Err(WizardError::FormIncomplete);
        }
        self.check_salary_range()?;
        Ok(CareerDraft::from_wizard(
            &self.fields,
            actor,
            org_id,
            CareerStatus::Active,
        ))
    }

    /// Assemble an unpublished draft. Available from any step and exempt
    /// from the publish gate; the salary check still applies.
    pub fn save_unpublished(
        &self,
        actor: &ActorSnapshot,
        org_id: &str,
    ) -> Result<CareerDraft, WizardError> {
        self.check_salary_range()?;
        Ok(CareerDraft::from_wizard(
            &self.fields,
            actor,
            org_id,
            CareerStatus::Inactive,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> ActorSnapshot {
        ActorSnapshot {
            name: "Dana Cruz".to_string(),
            email: "dana@acme.example".to_string(),
            image: Some("https://cdn.example/avatars/dana.png".to_string()),
        }
    }

    fn member(id: &str) -> MemberSnapshot {
        MemberSnapshot {
            id: id.to_string(),
            name: "Member".to_string(),
            email: format!("{id}@acme.example"),
            image: None,
        }
    }

    fn filled_wizard() -> CareerWizard {
        let mut wizard = CareerWizard::new();
        wizard.fields.job_title = "Backend Engineer".to_string();
        wizard.fields.description = "<p>Build services.</p>".to_string();
        wizard.fields.work_setup = "Hybrid".to_string();
        wizard.fields.employment_type = "Full-Time".to_string();
        wizard.fields.questions[1]
            .questions
            .push(super::super::domain::InterviewQuestion {
                question: "Walk me through a system you scaled.".to_string(),
            });
        wizard
    }

    #[test]
    fn next_is_a_no_op_while_step_one_is_incomplete() {
        let mut wizard = CareerWizard::new();
        assert_eq!(wizard.next(), WizardStep::CareerDetails);

        wizard.fields.job_title = "Backend Engineer".to_string();
        assert_eq!(wizard.next(), WizardStep::CareerDetails);
    }

    #[test]
    fn next_advances_once_required_fields_are_filled() {
        let mut wizard = filled_wizard();
        assert_eq!(wizard.next(), WizardStep::CvReview);
    }

    #[test]
    fn whitespace_only_fields_do_not_satisfy_step_one() {
        let mut wizard = filled_wizard();
        wizard.fields.description = "   ".to_string();
        assert_eq!(wizard.next(), WizardStep::CareerDetails);
    }

    #[test]
    fn previous_is_always_allowed_above_step_one() {
        let mut wizard = filled_wizard();
        wizard.next();
        assert_eq!(wizard.previous(), WizardStep::CareerDetails);
        // Already on the first step: stays put.
        assert_eq!(wizard.previous(), WizardStep::CareerDetails);
    }

    #[test]
    fn direct_navigation_cannot_skip_unvisited_steps() {
        let mut wizard = filled_wizard();
        assert_eq!(wizard.go_to(WizardStep::Review), WizardStep::CareerDetails);

        wizard.next();
        wizard.next();
        assert_eq!(wizard.step(), WizardStep::AiInterview);
        assert_eq!(wizard.go_to(WizardStep::CareerDetails), WizardStep::CareerDetails);
        // Step 3 was reached earlier, so jumping forward to it is allowed.
        assert_eq!(wizard.go_to(WizardStep::AiInterview), WizardStep::AiInterview);
        assert_eq!(wizard.go_to(WizardStep::Review), WizardStep::AiInterview);
    }

    #[test]
    fn publish_requires_the_review_step() {
        let wizard = filled_wizard();
        assert_eq!(
            wizard.publish(&actor(), "acme"),
            Err(WizardError::NotOnReviewStep)
        );
    }

    #[test]
    fn publish_succeeds_from_review_with_a_complete_form() {
        let mut wizard = filled_wizard();
        for _ in 0..4 {
            wizard.next();
        }
        assert_eq!(wizard.step(), WizardStep::Review);

        let draft = wizard.publish(&actor(), "acme").expect("publishes");
        assert_eq!(draft.status, Some(CareerStatus::Active));
        assert_eq!(draft.job_title.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn publish_gate_requires_at_least_one_interview_question() {
        let mut wizard = filled_wizard();
        wizard.fields.questions.iter_mut().for_each(|category| {
            category.questions.clear();
        });
        for _ in 0..4 {
            wizard.next();
        }

        assert_eq!(
            wizard.publish(&actor(), "acme"),
            Err(WizardError::FormIncomplete)
        );
    }

    #[test]
    fn inverted_salary_range_is_rejected_locally() {
        let mut wizard = filled_wizard();
        wizard.fields.minimum_salary = "50000".to_string();
        wizard.fields.maximum_salary = "40000".to_string();

        assert_eq!(
            wizard.save_unpublished(&actor(), "acme"),
            Err(WizardError::SalaryRangeInverted)
        );
    }

    #[test]
    fn ordered_salary_range_proceeds() {
        let mut wizard = filled_wizard();
        wizard.fields.minimum_salary = "40000".to_string();
        wizard.fields.maximum_salary = "50000".to_string();

        let draft = wizard
            .save_unpublished(&actor(), "acme")
            .expect("assembles");
        assert_eq!(draft.minimum_salary, Some(40000.0));
        assert_eq!(draft.maximum_salary, Some(50000.0));
    }

    #[test]
    fn save_unpublished_bypasses_the_publish_gate() {
        let wizard = CareerWizard::new();
        let draft = wizard
            .save_unpublished(&actor(), "acme")
            .expect("drafts save from any state");
        assert_eq!(draft.status, Some(CareerStatus::Inactive));
    }

    #[test]
    fn actor_is_auto_assigned_job_owner() {
        let wizard = CareerWizard::for_actor(&member("u-1"));
        assert_eq!(wizard.fields.team_members.len(), 1);
        assert_eq!(wizard.fields.team_members[0].role, TeamRole::JobOwner);
    }

    #[test]
    fn duplicate_member_additions_collapse_to_one_assignment() {
        let mut wizard = CareerWizard::new();
        wizard.add_team_member(member("u-1"), TeamRole::JobOwner);
        wizard.add_team_member(member("u-1"), TeamRole::Reviewer);
        wizard.add_team_member(member("u-2"), TeamRole::Contributor);

        assert_eq!(wizard.fields.team_members.len(), 2);
        assert_eq!(wizard.fields.team_members[0].role, TeamRole::JobOwner);
    }

    #[test]
    fn pre_screening_questions_reorder_by_id() {
        let mut wizard = CareerWizard::new();
        for id in 1..=3 {
            wizard.add_pre_screening_question(PreScreeningQuestion {
                id,
                question: format!("Question {id}"),
                kind: Default::default(),
                config: Default::default(),
            });
        }

        wizard.move_pre_screening_question(3, 0);
        let ids: Vec<u64> = wizard
            .fields
            .pre_screening_questions
            .iter()
            .map(|question| question.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
