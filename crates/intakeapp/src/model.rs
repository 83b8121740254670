//! # Domain Model: Draft, Steps and Field Paths
//!
//! The wizard collects answers into a single nested [`Draft`]. The draft is always
//! structurally complete: every section exists, every leaf is a string (or a bool
//! for `work[].current`), and `work` holds at least one entry. Loading a partial
//! JSON document fills the gaps with defaults instead of failing.
//!
//! ## Addressing Leaves
//!
//! Leaves are addressed with [`FieldPath`], a tagged union instead of a free-form
//! string path. The textual form is dotted and uses the same camelCase keys as the
//! persisted JSON:
//!
//! ```text
//! contact.firstName     basics.education     language.ieltsReading
//! interest.program      work.0.title         work.1.current
//! ```
//!
//! [`Draft::set`] replaces exactly one leaf. It never removes a branch. Writing to
//! `work.N.*` where `N` equals the current number of entries appends a blank
//! entry first; anything further out is rejected.
//!
//! ## Steps
//!
//! [`Step`] enumerates the six wizard pages in order. Index arithmetic is clamped
//! to `0..=5` by [`Step::next`] and [`Step::prev`].

use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const EDUCATION_LEVELS: &[&str] = &[
    "High School",
    "Diploma",
    "Bachelor's Degree",
    "Master's Degree",
    "Doctorate",
];

pub const MARITAL_STATUSES: &[&str] = &[
    "Single",
    "Married",
    "Common-Law",
    "Separated",
    "Divorced",
    "Widowed",
];

pub const PROGRAMS: &[&str] = &[
    "Express Entry",
    "Provincial Nominee Program",
    "Study Permit",
    "Work Permit",
    "Family Sponsorship",
    "Visitor Visa",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    pub age: String,
    pub education: String,
    pub marital: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub ielts_listening: String,
    pub ielts_reading: String,
    pub ielts_writing: String,
    pub ielts_speaking: String,
    pub overall: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Interest {
    pub program: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkEntry {
    pub start: String,
    pub end: String,
    pub title: String,
    pub employer: String,
    pub city: String,
    pub country: String,
    pub state: String,
    pub current: bool,
}

/// The in-progress, nested set of wizard answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub contact: Contact,
    pub basics: Basics,
    pub language: Language,
    pub interest: Interest,
    #[serde(deserialize_with = "deserialize_work")]
    pub work: Vec<WorkEntry>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            contact: Contact::default(),
            basics: Basics::default(),
            language: Language::default(),
            interest: Interest::default(),
            work: vec![WorkEntry::default()],
        }
    }
}

// An empty `work` array would break the "entry 0 always exists" invariant.
fn deserialize_work<'de, D>(deserializer: D) -> std::result::Result<Vec<WorkEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mut entries = Vec::<WorkEntry>::deserialize(deserializer)?;
    if entries.is_empty() {
        entries.push(WorkEntry::default());
    }
    Ok(entries)
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry the wizard validates and flattens.
    pub fn primary_work(&self) -> WorkEntry {
        self.work.first().cloned().unwrap_or_default()
    }

    /// Read a leaf as text. `None` only for a work index past the end.
    pub fn get(&self, path: &FieldPath) -> Option<String> {
        let value = match path {
            FieldPath::Contact(ContactField::FirstName) => &self.contact.first_name,
            FieldPath::Contact(ContactField::LastName) => &self.contact.last_name,
            FieldPath::Contact(ContactField::Email) => &self.contact.email,
            FieldPath::Contact(ContactField::Phone) => &self.contact.phone,
            FieldPath::Basics(BasicsField::Age) => &self.basics.age,
            FieldPath::Basics(BasicsField::Education) => &self.basics.education,
            FieldPath::Basics(BasicsField::Marital) => &self.basics.marital,
            FieldPath::Language(LanguageField::Listening) => &self.language.ielts_listening,
            FieldPath::Language(LanguageField::Reading) => &self.language.ielts_reading,
            FieldPath::Language(LanguageField::Writing) => &self.language.ielts_writing,
            FieldPath::Language(LanguageField::Speaking) => &self.language.ielts_speaking,
            FieldPath::Language(LanguageField::Overall) => &self.language.overall,
            FieldPath::Interest(InterestField::Program) => &self.interest.program,
            FieldPath::Interest(InterestField::Notes) => &self.interest.notes,
            FieldPath::Work { index, field } => {
                let entry = self.work.get(*index)?;
                return Some(match field {
                    WorkField::Start => entry.start.clone(),
                    WorkField::End => entry.end.clone(),
                    WorkField::Title => entry.title.clone(),
                    WorkField::Employer => entry.employer.clone(),
                    WorkField::City => entry.city.clone(),
                    WorkField::Country => entry.country.clone(),
                    WorkField::State => entry.state.clone(),
                    WorkField::Current => entry.current.to_string(),
                });
            }
        };
        Some(value.clone())
    }

    /// Replace one leaf. Enumerated fields only accept their listed choices
    /// (or the empty string, which clears them).
    pub fn set(&mut self, path: &FieldPath, value: &str) -> Result<()> {
        if let Some(choices) = path.choices() {
            if !value.is_empty() && !choices.contains(&value) {
                return Err(IntakeError::InvalidValue {
                    field: path.to_string(),
                    reason: format!("expected one of: {}", choices.join(", ")),
                });
            }
        }

        let slot = match path {
            FieldPath::Contact(f) => match f {
                ContactField::FirstName => &mut self.contact.first_name,
                ContactField::LastName => &mut self.contact.last_name,
                ContactField::Email => &mut self.contact.email,
                ContactField::Phone => &mut self.contact.phone,
            },
            FieldPath::Basics(f) => match f {
                BasicsField::Age => &mut self.basics.age,
                BasicsField::Education => &mut self.basics.education,
                BasicsField::Marital => &mut self.basics.marital,
            },
            FieldPath::Language(f) => match f {
                LanguageField::Listening => &mut self.language.ielts_listening,
                LanguageField::Reading => &mut self.language.ielts_reading,
                LanguageField::Writing => &mut self.language.ielts_writing,
                LanguageField::Speaking => &mut self.language.ielts_speaking,
                LanguageField::Overall => &mut self.language.overall,
            },
            FieldPath::Interest(f) => match f {
                InterestField::Program => &mut self.interest.program,
                InterestField::Notes => &mut self.interest.notes,
            },
            FieldPath::Work { index, field } => {
                let flag = match field {
                    WorkField::Current => Some(parse_flag(value).ok_or_else(|| {
                        IntakeError::InvalidValue {
                            field: path.to_string(),
                            reason: "expected true or false".to_string(),
                        }
                    })?),
                    _ => None,
                };
                let entry = self.work_entry_mut(*index, path)?;
                if let Some(flag) = flag {
                    entry.current = flag;
                    return Ok(());
                }
                match field {
                    WorkField::Start => &mut entry.start,
                    WorkField::End => &mut entry.end,
                    WorkField::Title => &mut entry.title,
                    WorkField::Employer => &mut entry.employer,
                    WorkField::City => &mut entry.city,
                    WorkField::Country => &mut entry.country,
                    WorkField::State => &mut entry.state,
                    WorkField::Current => unreachable!("flag handled above"),
                }
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    fn work_entry_mut(&mut self, index: usize, path: &FieldPath) -> Result<&mut WorkEntry> {
        if index == self.work.len() {
            self.work.push(WorkEntry::default());
        }
        let len = self.work.len();
        self.work
            .get_mut(index)
            .ok_or_else(|| IntakeError::InvalidValue {
                field: path.to_string(),
                reason: format!("work entries must be added in order (next index is {})", len),
            })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" | "" => Some(false),
        _ => None,
    }
}

/// The wizard pages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Contact,
    Basics,
    Language,
    WorkHistory,
    Interest,
    Review,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Contact,
        Step::Basics,
        Step::Language,
        Step::WorkHistory,
        Step::Interest,
        Step::Review,
    ];

    pub const FIRST: Step = Step::Contact;
    pub const LAST: Step = Step::Review;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    /// The following step, saturating at [`Step::LAST`].
    pub fn next(self) -> Step {
        Self::from_index(self.index() + 1).unwrap_or(Step::LAST)
    }

    /// The preceding step, saturating at [`Step::FIRST`].
    pub fn prev(self) -> Step {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Step::FIRST)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Contact => "Contact",
            Step::Basics => "Basics",
            Step::Language => "Language",
            Step::WorkHistory => "Work History",
            Step::Interest => "Interest",
            Step::Review => "Review",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::FIRST
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.title(), self.index() + 1, Self::ALL.len())
    }
}

/// What the draft slot holds: the answers plus the step to resume on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSnapshot {
    pub draft: Draft,
    pub step: Step,
}

// --- Field paths ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicsField {
    Age,
    Education,
    Marital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageField {
    Listening,
    Reading,
    Writing,
    Speaking,
    Overall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterestField {
    Program,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkField {
    Start,
    End,
    Title,
    Employer,
    City,
    Country,
    State,
    Current,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [Self::FirstName, Self::LastName, Self::Email, Self::Phone];

    pub fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl BasicsField {
    pub const ALL: [BasicsField; 3] = [Self::Age, Self::Education, Self::Marital];

    pub fn key(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Education => "education",
            Self::Marital => "marital",
        }
    }
}

impl LanguageField {
    pub const ALL: [LanguageField; 5] = [
        Self::Listening,
        Self::Reading,
        Self::Writing,
        Self::Speaking,
        Self::Overall,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Listening => "ieltsListening",
            Self::Reading => "ieltsReading",
            Self::Writing => "ieltsWriting",
            Self::Speaking => "ieltsSpeaking",
            Self::Overall => "overall",
        }
    }
}

impl InterestField {
    pub const ALL: [InterestField; 2] = [Self::Program, Self::Notes];

    pub fn key(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Notes => "notes",
        }
    }
}

impl WorkField {
    pub const ALL: [WorkField; 8] = [
        Self::Start,
        Self::End,
        Self::Title,
        Self::Employer,
        Self::City,
        Self::Country,
        Self::State,
        Self::Current,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Title => "title",
            Self::Employer => "employer",
            Self::City => "city",
            Self::Country => "country",
            Self::State => "state",
            Self::Current => "current",
        }
    }
}

/// Address of a single leaf in the [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Contact(ContactField),
    Basics(BasicsField),
    Language(LanguageField),
    Interest(InterestField),
    Work { index: usize, field: WorkField },
}

impl FieldPath {
    /// The leaf's own key, as used in validation reports.
    pub fn key(&self) -> &'static str {
        match self {
            FieldPath::Contact(f) => f.key(),
            FieldPath::Basics(f) => f.key(),
            FieldPath::Language(f) => f.key(),
            FieldPath::Interest(f) => f.key(),
            FieldPath::Work { field, .. } => field.key(),
        }
    }

    /// The wizard page that edits this leaf.
    pub fn step(&self) -> Step {
        match self {
            FieldPath::Contact(_) => Step::Contact,
            FieldPath::Basics(_) => Step::Basics,
            FieldPath::Language(_) => Step::Language,
            FieldPath::Work { .. } => Step::WorkHistory,
            FieldPath::Interest(_) => Step::Interest,
        }
    }

    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldPath::Basics(BasicsField::Education) => Some(EDUCATION_LEVELS),
            FieldPath::Basics(BasicsField::Marital) => Some(MARITAL_STATUSES),
            FieldPath::Interest(InterestField::Program) => Some(PROGRAMS),
            _ => None,
        }
    }

    /// Every addressable leaf for a draft with `work_entries` work entries.
    pub fn all(work_entries: usize) -> Vec<FieldPath> {
        let mut paths: Vec<FieldPath> = Vec::new();
        paths.extend(ContactField::ALL.iter().map(|f| FieldPath::Contact(*f)));
        paths.extend(BasicsField::ALL.iter().map(|f| FieldPath::Basics(*f)));
        paths.extend(LanguageField::ALL.iter().map(|f| FieldPath::Language(*f)));
        for index in 0..work_entries.max(1) {
            paths.extend(
                WorkField::ALL
                    .iter()
                    .map(|f| FieldPath::Work { index, field: *f }),
            );
        }
        paths.extend(InterestField::ALL.iter().map(|f| FieldPath::Interest(*f)));
        paths
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Contact(field) => write!(f, "contact.{}", field.key()),
            FieldPath::Basics(field) => write!(f, "basics.{}", field.key()),
            FieldPath::Language(field) => write!(f, "language.{}", field.key()),
            FieldPath::Interest(field) => write!(f, "interest.{}", field.key()),
            FieldPath::Work { index, field } => write!(f, "work.{}.{}", index, field.key()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || IntakeError::InvalidField(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();

        fn lookup<T: Copy>(all: &[T], key: impl Fn(T) -> &'static str, name: &str) -> Option<T> {
            all.iter().copied().find(|f| key(*f) == name)
        }

        match parts.as_slice() {
            ["contact", name] => lookup(&ContactField::ALL, ContactField::key, name)
                .map(FieldPath::Contact)
                .ok_or_else(invalid),
            ["basics", name] => lookup(&BasicsField::ALL, BasicsField::key, name)
                .map(FieldPath::Basics)
                .ok_or_else(invalid),
            ["language", name] => lookup(&LanguageField::ALL, LanguageField::key, name)
                .map(FieldPath::Language)
                .ok_or_else(invalid),
            ["interest", name] => lookup(&InterestField::ALL, InterestField::key, name)
                .map(FieldPath::Interest)
                .ok_or_else(invalid),
            ["work", index, name] => {
                let index: usize = index.parse().map_err(|_| invalid())?;
                let field = lookup(&WorkField::ALL, WorkField::key, name).ok_or_else(invalid)?;
                Ok(FieldPath::Work { index, field })
            }
            _ => Err(invalid()),
        }
    }
}
