//! Graduation-requirement evaluation
//!
//! Computes how far a transcript is from the configured department
//! requirements: overall and per-classification credit totals, required
//! courses not yet taken, and the outcome of each composite rule.
//!
//! [`evaluate`] is pure; [`analyze_graduation_progress`] wraps it with the
//! department lookup and the store fetch.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::models::course::normalize_name;
use crate::core::models::{Enrollment, Student};
use crate::core::requirements::{Requirements, RequirementsTable, Rule, RuleSpec};
use crate::core::store::{StoreError, StudentStore};

/// Errors raised by the evaluator and recommender
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The student's department has no configured requirements
    #[error("no graduation requirements configured for department '{0}'")]
    UnknownDepartment(String),
    /// A store lookup failed; distinct from "no data" so an outage is never
    /// read as an empty transcript
    #[error("store lookup failed: {0}")]
    Store(#[from] StoreError),
}

/// Overall credit totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditSummary {
    /// Total credits the department requires
    pub total_required: u32,
    /// Whole credits completed (fractional sums truncate)
    pub total_completed: u32,
    /// Credits still to earn, floored at zero
    pub total_missing: u32,
}

/// Progress against one classification's credit minimum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationStatus {
    /// Classification name (e.g., "전필")
    pub classification: String,
    /// Required credits for this classification
    pub required: u32,
    /// Whole credits completed under this classification
    pub completed: u32,
    /// Shortfall, floored at zero
    pub missing: u32,
}

/// Evaluation outcome of one composite rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Rule name from the requirements table
    pub name: String,
    /// Rule description for reports
    pub description: String,
    /// Whether the rule is satisfied
    pub satisfied: bool,
    /// Progress note (credit totals, area counts, take-one status)
    pub detail: Option<String>,
    /// Listed courses still to take, in rule order (`take_all`)
    pub missing_courses: Vec<String>,
    /// Areas without a taken course, in area order (`area_based`)
    pub missing_areas: Vec<String>,
}

/// Full analysis of one student's graduation progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Overall credit totals
    pub summary: CreditSummary,
    /// One entry per configured classification, in table order
    pub by_classification: Vec<ClassificationStatus>,
    /// Required courses with no normalized match in the transcript
    pub missing_required_courses: Vec<String>,
    /// Composite rule outcomes, in table order
    pub rule_outcomes: Vec<RuleOutcome>,
}

impl Analysis {
    /// Rule outcomes that are not satisfied, in table order
    #[must_use]
    pub fn unsatisfied_rules(&self) -> Vec<&RuleOutcome> {
        self.rule_outcomes.iter().filter(|o| !o.satisfied).collect()
    }
}

/// Analyze a student's graduation progress, reading the transcript from the
/// store.
///
/// # Errors
/// [`AdvisorError::UnknownDepartment`] when the student's department has no
/// requirements row; [`AdvisorError::Store`] when the enrollment fetch
/// fails. No partial analysis is produced in either case.
pub fn analyze_graduation_progress(
    student: &Student,
    store: &dyn StudentStore,
    table: &RequirementsTable,
) -> Result<Analysis, AdvisorError> {
    let requirements = table
        .for_department(&student.department)
        .ok_or_else(|| AdvisorError::UnknownDepartment(student.department.clone()))?;
    let enrollments = store.fetch_enrollments(&student.student_id)?;
    Ok(evaluate(requirements, &enrollments))
}

/// Evaluate a transcript against one department's requirements.
///
/// Pure: every input is explicit, and empty enrollment data degrades to
/// zero-credit totals rather than an error.
#[must_use]
pub fn evaluate(requirements: &Requirements, enrollments: &[Enrollment]) -> Analysis {
    let taken_names: HashSet<String> = enrollments
        .iter()
        .map(Enrollment::normalized_course_name)
        .collect();

    Analysis {
        summary: credit_summary(requirements, enrollments),
        by_classification: classification_statuses(requirements, enrollments),
        missing_required_courses: missing_required(requirements, &taken_names),
        rule_outcomes: requirements
            .detailed_requirements
            .iter()
            .map(|(name, rule)| evaluate_rule(name, rule, enrollments, &taken_names))
            .collect(),
    }
}

/// Truncate a fractional credit sum to whole credits.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_credits(credits: f32) -> u32 {
    credits.max(0.0) as u32
}

fn completed_credits(enrollments: &[Enrollment]) -> f32 {
    enrollments.iter().map(Enrollment::counted_credits).sum()
}

fn completed_credits_in(enrollments: &[Enrollment], classifications: &[String]) -> f32 {
    enrollments
        .iter()
        .filter(|e| classifications.contains(&e.classification))
        .map(Enrollment::counted_credits)
        .sum()
}

fn credit_summary(requirements: &Requirements, enrollments: &[Enrollment]) -> CreditSummary {
    let total_completed = whole_credits(completed_credits(enrollments));
    CreditSummary {
        total_required: requirements.total_credits,
        total_completed,
        total_missing: requirements.total_credits.saturating_sub(total_completed),
    }
}

fn classification_statuses(
    requirements: &Requirements,
    enrollments: &[Enrollment],
) -> Vec<ClassificationStatus> {
    requirements
        .classification_credits
        .iter()
        .map(|(classification, &required)| {
            let completed = whole_credits(
                enrollments
                    .iter()
                    .filter(|e| e.classification == *classification)
                    .map(Enrollment::counted_credits)
                    .sum(),
            );
            ClassificationStatus {
                classification: classification.clone(),
                required,
                completed,
                missing: required.saturating_sub(completed),
            }
        })
        .collect()
}

fn missing_required(requirements: &Requirements, taken_names: &HashSet<String>) -> Vec<String> {
    requirements
        .required_courses
        .iter()
        .filter(|name| !taken_names.contains(&normalize_name(name)))
        .cloned()
        .collect()
}

fn evaluate_rule(
    name: &str,
    rule: &Rule,
    enrollments: &[Enrollment],
    taken_names: &HashSet<String>,
) -> RuleOutcome {
    let mut outcome = RuleOutcome {
        name: name.to_string(),
        description: rule.description.clone(),
        satisfied: false,
        detail: None,
        missing_courses: Vec::new(),
        missing_areas: Vec::new(),
    };

    match &rule.spec {
        RuleSpec::CreditSum {
            classifications,
            required_credits,
        } => {
            let completed = whole_credits(completed_credits_in(enrollments, classifications));
            outcome.satisfied = completed >= *required_credits;
            outcome.detail = Some(format!("{completed} of {required_credits} credits completed"));
        }
        RuleSpec::TakeAll { courses } => {
            outcome.missing_courses = courses
                .iter()
                .filter(|course| !taken_names.contains(&normalize_name(course)))
                .cloned()
                .collect();
            outcome.satisfied = outcome.missing_courses.is_empty();
        }
        RuleSpec::TakeOneOrMore { courses } => {
            outcome.satisfied = courses
                .iter()
                .any(|course| taken_names.contains(&normalize_name(course)));
            if !outcome.satisfied {
                outcome.detail = Some("none of the listed courses taken yet".to_string());
            }
        }
        RuleSpec::AreaBased {
            areas,
            num_areas_required,
        } => {
            outcome.missing_areas = areas
                .iter()
                .filter(|(_, courses)| {
                    !courses
                        .iter()
                        .any(|course| taken_names.contains(&normalize_name(course)))
                })
                .map(|(area, _)| area.clone())
                .collect();
            let completed_areas = areas.len() - outcome.missing_areas.len();
            outcome.satisfied = completed_areas >= *num_areas_required;
            outcome.detail = Some(format!(
                "{completed_areas} of {num_areas_required} areas covered"
            ));
        }
    }

    outcome
}
