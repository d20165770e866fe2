use crate::infra::{seed_directory, InMemoryCareerRepository, InMemoryOrganizationDirectory};
use clap::Args;
use hireflow::careers::{
    ActorSnapshot, CareerRepository, CareerService, CareerServiceError, CareerWizard,
    InterviewQuestion, MemberSnapshot, PreScreeningQuestion, QuestionConfig, QuestionKind,
    WizardStep,
};
use hireflow::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Organization to submit against (defaults to the seeded demo org).
    #[arg(long)]
    pub(crate) org_id: Option<String>,
    /// Save the posting without publishing it.
    #[arg(long)]
    pub(crate) unpublished: bool,
    /// Print the assembled submission payload before it enters the pipeline.
    #[arg(long)]
    pub(crate) show_payload: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        org_id,
        unpublished,
        show_payload,
    } = args;

    let org_id = org_id.unwrap_or_else(|| "64f1a2b3c4d5e6f708192a3b".to_string());

    println!("Career posting demo");

    let creator = MemberSnapshot {
        id: "member-demo".to_string(),
        name: "Alex Reyes".to_string(),
        email: "alex@demo.example".to_string(),
        image: None,
    };
    let actor = ActorSnapshot {
        name: creator.name.clone(),
        email: creator.email.clone(),
        image: None,
    };

    let mut wizard = CareerWizard::for_actor(&creator);
    wizard.fields.job_title = "Senior Backend Engineer".to_string();
    wizard.fields.description =
        "<p>Design and operate the services behind our hiring platform.</p>".to_string();
    wizard.fields.work_setup = "Hybrid".to_string();
    wizard.fields.employment_type = "Full-Time".to_string();
    wizard.fields.city = "Cebu City".to_string();
    wizard.fields.province = "Cebu".to_string();
    wizard.fields.minimum_salary = "90000".to_string();
    wizard.fields.maximum_salary = "140000".to_string();
    wizard.fields.questions[1].questions.push(InterviewQuestion {
        question: "Walk through a service outage you debugged.".to_string(),
    });
    wizard.add_pre_screening_question(PreScreeningQuestion {
        id: 1,
        question: "Years of production Rust or Go experience?".to_string(),
        kind: QuestionKind::Range,
        config: QuestionConfig {
            options: None,
            min: Some("0".to_string()),
            max: Some("15".to_string()),
        },
    });

    println!("Wizard steps:");
    for step in WizardStep::ALL {
        let marker = if wizard.is_step_valid(step) { "ok" } else { "--" };
        println!("  [{}] {}. {}", marker, step.number(), step.title());
    }

    let draft = if unpublished {
        wizard.save_unpublished(&actor, &org_id)?
    } else {
        while wizard.step() != WizardStep::Review {
            let before = wizard.step();
            wizard.next();
            if wizard.step() == before {
                println!(
                    "Wizard stuck on step {} ({}): required fields incomplete",
                    before.number(),
                    before.title()
                );
                return Ok(());
            }
        }
        wizard.publish(&actor, &org_id)?
    };
    let payload = match serde_json::to_value(&draft) {
        Ok(payload) => payload,
        Err(err) => {
            println!("Draft failed to serialize: {}", err);
            return Ok(());
        }
    };

    if show_payload {
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("Submission payload:\n{}", json),
            Err(err) => println!("Submission payload unavailable: {}", err),
        }
    }

    let directory = Arc::new(InMemoryOrganizationDirectory::default());
    seed_directory(&directory);
    let repository = Arc::new(InMemoryCareerRepository::default());
    let service = CareerService::new(directory, repository.clone());

    let career = match service.create(&payload) {
        Ok(career) => career,
        Err(err @ CareerServiceError::Validation(_))
        | Err(err @ CareerServiceError::QuotaExceeded)
        | Err(err @ CareerServiceError::OrganizationNotFound) => {
            println!("Submission rejected: {}", err);
            return Ok(());
        }
        Err(err) => {
            println!("Submission failed: {}", err);
            return Ok(());
        }
    };

    println!(
        "- Created career {} -> status {}",
        career.id.0,
        career.status.label()
    );
    println!("  Title: {}", career.job_title);
    if let Some(location) = &career.location {
        println!("  Location: {}", location);
    }
    if let Some(owner) = career.team_members.first() {
        println!(
            "  Team: {} member(s), owner {}",
            career.team_members.len(),
            owner.member.name
        );
    }
    match repository.count_active(&career.org_id) {
        Ok(active) => println!("  Active postings now counted against the plan: {}", active),
        Err(err) => println!("  Repository unavailable: {}", err),
    }

    match repository.fetch(&career.id) {
        Ok(Some(stored)) => match serde_json::to_string_pretty(&stored) {
            Ok(json) => println!("  Stored record:\n{}", json),
            Err(err) => println!("  Stored record unavailable: {}", err),
        },
        Ok(None) => println!("  Repository lookup returned no record"),
        Err(err) => println!("  Repository unavailable: {}", err),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_walks_the_wizard_to_a_published_posting() {
        run_demo(DemoArgs::default()).expect("demo completes");
    }

    #[test]
    fn demo_saves_an_unpublished_draft() {
        let args = DemoArgs {
            unpublished: true,
            ..DemoArgs::default()
        };
        run_demo(args).expect("demo completes");
    }
}
