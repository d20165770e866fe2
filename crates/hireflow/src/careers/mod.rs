//! The career posting pipeline.
//!
//! A submission flows through four stages in a fixed order: the wizard
//! accumulates field state and assembles the outgoing payload, the
//! sanitization pass escapes every string leaf of the inbound tree, field
//! validation checks the required shape, and the quota resolver authorizes
//! the creation against the organization's plan before the record is
//! persisted.

pub mod assembler;
pub mod domain;
pub mod quota;
pub mod repository;
pub mod router;
pub mod sanitize;
pub mod service;
pub mod validate;
pub mod wizard;

pub use assembler::{assemble_career, CareerDraft, ValidatedSubmission};
pub use domain::{
    standard_question_categories, ActorSnapshot, Career, CareerId, CareerStatus, EmploymentType,
    InterviewQuestion, MemberSnapshot, Organization, Plan, PreScreeningQuestion, QuestionCategory,
    QuestionConfig, QuestionKind, ScreeningSetting, TeamMemberAssignment, TeamRole,
    WorkArrangement,
};
pub use quota::{OrgKey, QuotaDecision, QuotaError, QuotaResolver};
pub use repository::{
    CareerRepository, DirectoryError, OrganizationDirectory, OrganizationRecord, RepositoryError,
};
pub use router::career_router;
pub use sanitize::{sanitize_str, sanitize_value, SanitizeError, DEFAULT_MAX_DEPTH};
pub use service::{CareerService, CareerServiceError};
pub use validate::{validate_submission, ValidationError};
pub use wizard::{CareerWizard, WizardError, WizardFields, WizardStep};
