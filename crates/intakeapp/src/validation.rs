//! # Field Validation
//!
//! [`validate`] is a pure function of `(draft, step)`: it looks only at the leaves
//! the step owns and reports, for each of them, either a human-readable message
//! or nothing. It never fails and never mutates.
//!
//! | Step | Required |
//! |------|----------|
//! | Contact | `firstName`, `lastName`, `email` (must look like `local@domain.tld`) |
//! | Basics | `age`, `education` |
//! | Language | the four IELTS skill scores (`overall` is optional) |
//! | Work History | `title`, `employer`, `city`, `country` of the first entry |
//! | Interest, Review | nothing |
//!
//! "Required" means a non-empty string. The enumerated fields are constrained when
//! they are written (see [`crate::model::Draft::set`]), not here.

use crate::model::{Draft, Step};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Per-field outcome of validating one step.
///
/// Every field the step checks has an entry: `Some(message)` when it failed,
/// `None` when it passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Option<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&mut self, field: &str, message: Option<&str>) {
        self.0
            .insert(field.to_string(), message.map(|m| m.to_string()));
    }

    fn require(&mut self, field: &str, value: &str, message: &str) {
        self.check(field, value.is_empty().then_some(message));
    }

    /// True when no checked field carries a message.
    pub fn passes(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    /// The message recorded for `field`, if it failed.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|m| m.as_deref())
    }

    /// Whether `field` was checked at all.
    pub fn checked(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(field, msg)| msg.as_deref().map(|m| (field.as_str(), m)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn validate(draft: &Draft, step: Step) -> FieldErrors {
    let mut report = FieldErrors::new();

    match step {
        Step::Contact => {
            let contact = &draft.contact;
            report.require("firstName", &contact.first_name, "First name is required");
            report.require("lastName", &contact.last_name, "Last name is required");
            let email = if contact.email.is_empty() {
                Some("Email is required")
            } else if !EMAIL_SHAPE.is_match(&contact.email) {
                Some("Enter a valid email address")
            } else {
                None
            };
            report.check("email", email);
        }
        Step::Basics => {
            report.require("age", &draft.basics.age, "Age is required");
            report.require(
                "education",
                &draft.basics.education,
                "Education is required",
            );
        }
        Step::Language => {
            let lang = &draft.language;
            report.require(
                "ieltsListening",
                &lang.ielts_listening,
                "Listening score is required",
            );
            report.require(
                "ieltsReading",
                &lang.ielts_reading,
                "Reading score is required",
            );
            report.require(
                "ieltsWriting",
                &lang.ielts_writing,
                "Writing score is required",
            );
            report.require(
                "ieltsSpeaking",
                &lang.ielts_speaking,
                "Speaking score is required",
            );
        }
        Step::WorkHistory => {
            let entry = draft.primary_work();
            report.require("title", &entry.title, "Job title is required");
            report.require("employer", &entry.employer, "Employer is required");
            report.require("city", &entry.city, "City is required");
            report.require("country", &entry.country, "Country is required");
        }
        Step::Interest | Step::Review => {}
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkEntry;
    use crate::test_utils::complete_draft;

    #[test]
    fn test_complete_draft_passes_every_step() {
        let draft = complete_draft();
        for step in Step::ALL {
            let report = validate(&draft, step);
            assert!(report.passes(), "{:?} failed: {:?}", step, report);
        }
    }

    #[test]
    fn test_empty_draft_reports_each_required_field() {
        let draft = Draft::default();
        let expected: &[(Step, &[&str])] = &[
            (Step::Contact, &["firstName", "lastName", "email"]),
            (Step::Basics, &["age", "education"]),
            (
                Step::Language,
                &["ieltsListening", "ieltsReading", "ieltsWriting", "ieltsSpeaking"],
            ),
            (Step::WorkHistory, &["title", "employer", "city", "country"]),
        ];
        for (step, fields) in expected {
            let report = validate(&draft, *step);
            assert!(!report.passes());
            assert_eq!(report.failures().count(), fields.len(), "{:?}", step);
            for field in *fields {
                assert!(report.message(field).is_some(), "{} on {:?}", field, step);
            }
        }
    }

    #[test]
    fn test_steps_without_required_fields_pass_on_empty_draft() {
        let draft = Draft::default();
        assert!(validate(&draft, Step::Interest).passes());
        assert!(validate(&draft, Step::Review).passes());
        assert!(validate(&draft, Step::Review).is_empty());
    }

    #[test]
    fn test_single_missing_field_is_reported_alone() {
        let mut draft = complete_draft();
        draft.contact.last_name.clear();
        let report = validate(&draft, Step::Contact);
        assert_eq!(report.message("lastName"), Some("Last name is required"));
        assert_eq!(report.failures().count(), 1);
        assert!(report.checked("firstName"));
        assert_eq!(report.message("firstName"), None);
    }

    #[test]
    fn test_email_shape() {
        let mut draft = complete_draft();
        for bad in ["not-an-email", "a@b", "@b.co", "a b@c.de", "a@b."] {
            draft.contact.email = bad.to_string();
            let report = validate(&draft, Step::Contact);
            assert_eq!(
                report.message("email"),
                Some("Enter a valid email address"),
                "{}",
                bad
            );
        }
        for good in ["a@b.co", "first.last+tag@example.org"] {
            draft.contact.email = good.to_string();
            assert!(validate(&draft, Step::Contact).passes(), "{}", good);
        }
    }

    #[test]
    fn test_overall_score_is_optional() {
        let mut draft = complete_draft();
        draft.language.overall.clear();
        let report = validate(&draft, Step::Language);
        assert!(report.passes());
        assert!(!report.checked("overall"));
    }

    #[test]
    fn test_only_first_work_entry_is_checked() {
        let mut draft = complete_draft();
        draft.work.push(WorkEntry::default());
        assert!(validate(&draft, Step::WorkHistory).passes());

        draft.work.clear();
        let report = validate(&draft, Step::WorkHistory);
        assert_eq!(report.failures().count(), 4);
    }

    #[test]
    fn test_phone_and_marital_are_optional() {
        let mut draft = complete_draft();
        draft.contact.phone.clear();
        draft.basics.marital.clear();
        assert!(validate(&draft, Step::Contact).passes());
        assert!(validate(&draft, Step::Basics).passes());
    }
}
