//! # Records
//!
//! A [`Record`] is the flat, immutable form of one completed submission. It is what
//! the ledger stores and what becomes one spreadsheet row. Every column is always
//! present; optional answers that were left blank become empty strings.
//!
//! Only the first work entry is flattened. Additional entries stay in the draft
//! and are dropped at submission.

use crate::model::Draft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column headers, in sheet order. Matches [`Record::cells`].
pub const COLUMNS: [&str; 24] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "age",
    "education",
    "marital",
    "ieltsListening",
    "ieltsReading",
    "ieltsWriting",
    "ieltsSpeaking",
    "overall",
    "program",
    "notes",
    "workStart",
    "workEnd",
    "workTitle",
    "workEmployer",
    "workCity",
    "workCountry",
    "workState",
    "workCurrent",
    "submittedBy",
    "createdAt",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: String,
    pub education: String,
    pub marital: String,
    pub ielts_listening: String,
    pub ielts_reading: String,
    pub ielts_writing: String,
    pub ielts_speaking: String,
    pub overall: String,
    pub program: String,
    pub notes: String,
    pub work_start: String,
    pub work_end: String,
    pub work_title: String,
    pub work_employer: String,
    pub work_city: String,
    pub work_country: String,
    pub work_state: String,
    pub work_current: bool,
    /// Opaque identifier of whoever was signed in, empty when nobody was.
    #[serde(default)]
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Row values in [`COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.age.clone(),
            self.education.clone(),
            self.marital.clone(),
            self.ielts_listening.clone(),
            self.ielts_reading.clone(),
            self.ielts_writing.clone(),
            self.ielts_speaking.clone(),
            self.overall.clone(),
            self.program.clone(),
            self.notes.clone(),
            self.work_start.clone(),
            self.work_end.clone(),
            self.work_title.clone(),
            self.work_employer.clone(),
            self.work_city.clone(),
            self.work_country.clone(),
            self.work_state.clone(),
            self.work_current.to_string(),
            self.submitted_by.clone(),
            self.created_at.to_rfc3339(),
        ]
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Flatten `draft` into a record stamped with the current time.
pub fn assemble(draft: &Draft, submitted_by: Option<&str>) -> Record {
    assemble_at(draft, submitted_by, Utc::now())
}

/// Deterministic core of [`assemble`]. Does not validate.
pub fn assemble_at(draft: &Draft, submitted_by: Option<&str>, at: DateTime<Utc>) -> Record {
    let work = draft.primary_work();
    Record {
        first_name: draft.contact.first_name.clone(),
        last_name: draft.contact.last_name.clone(),
        email: draft.contact.email.clone(),
        phone: draft.contact.phone.clone(),
        age: draft.basics.age.clone(),
        education: draft.basics.education.clone(),
        marital: draft.basics.marital.clone(),
        ielts_listening: draft.language.ielts_listening.clone(),
        ielts_reading: draft.language.ielts_reading.clone(),
        ielts_writing: draft.language.ielts_writing.clone(),
        ielts_speaking: draft.language.ielts_speaking.clone(),
        overall: draft.language.overall.clone(),
        program: draft.interest.program.clone(),
        notes: draft.interest.notes.clone(),
        work_start: work.start,
        work_end: work.end,
        work_title: work.title,
        work_employer: work.employer,
        work_city: work.city,
        work_country: work.country,
        work_state: work.state,
        work_current: work.current,
        submitted_by: submitted_by.unwrap_or_default().to_string(),
        created_at: at,
    }
}
