use crate::model::{Draft, Step};
use crate::store::mem_backend::MemBackend;

/// A draft that passes validation on every step.
pub fn complete_draft() -> Draft {
    let mut draft = Draft::default();
    draft.contact.first_name = "Amara".into();
    draft.contact.last_name = "Okafor".into();
    draft.contact.email = "amara.okafor@example.com".into();
    draft.contact.phone = "+1 604 555 0142".into();
    draft.basics.age = "29".into();
    draft.basics.education = "Master's Degree".into();
    draft.basics.marital = "Single".into();
    draft.language.ielts_listening = "8".into();
    draft.language.ielts_reading = "7.5".into();
    draft.language.ielts_writing = "7".into();
    draft.language.ielts_speaking = "7.5".into();
    draft.language.overall = "7.5".into();
    draft.interest.program = "Express Entry".into();
    draft.interest.notes = "Prefers Vancouver".into();
    let work = &mut draft.work[0];
    work.start = "2019-03".into();
    work.title = "Data Analyst".into();
    work.employer = "Northwind".into();
    work.city = "Lagos".into();
    work.country = "Nigeria".into();
    work.state = "Lagos".into();
    work.current = true;
    draft
}

/// The same draft with a different email, to tell submissions apart.
pub fn complete_draft_with_email(email: &str) -> Draft {
    let mut draft = complete_draft();
    draft.contact.email = email.to_string();
    draft
}

/// Seed a memory backend with a draft sitting on `step`.
pub fn seeded_backend(draft: Draft, step: Step) -> MemBackend {
    use crate::model::DraftSnapshot;
    use crate::store::backend::DraftStorage;

    let backend = MemBackend::new();
    backend
        .save_draft(&DraftSnapshot { draft, step })
        .expect("memory backend accepts writes");
    backend
}
