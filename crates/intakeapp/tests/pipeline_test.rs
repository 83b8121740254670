use intakeapp::api::IntakeApi;
use intakeapp::commands::MessageLevel;
use intakeapp::export::{
    DirSink, DriveUploader, EnvToken, ExportService, RemoteDelivery, SkipReason,
};
use intakeapp::init::initialize;
use intakeapp::model::Step;
use intakeapp::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

const ANSWERS: &[(&str, &str)] = &[
    ("contact.firstName", "Mateo"),
    ("contact.lastName", "Silva"),
    ("contact.email", "mateo.silva@example.com"),
    ("basics.age", "41"),
    ("basics.education", "Doctorate"),
    ("basics.marital", "Married"),
    ("language.ieltsListening", "8.5"),
    ("language.ieltsReading", "8"),
    ("language.ieltsWriting", "7.5"),
    ("language.ieltsSpeaking", "8"),
    ("work.0.start", "2012-09"),
    ("work.0.title", "Professor"),
    ("work.0.employer", "Universidade"),
    ("work.0.city", "Porto Alegre"),
    ("work.0.country", "Brazil"),
    ("work.0.current", "true"),
    ("interest.program", "Express Entry"),
];

fn fs_api(dir: &TempDir) -> IntakeApi<FsBackend, FsBackend> {
    let backend = FsBackend::new(dir.path().join("data"));
    let service = ExportService::new(DirSink::new(dir.path().join("exports")));
    IntakeApi::new(backend.clone(), backend, service)
}

fn answer_everything(api: &mut IntakeApi<FsBackend, FsBackend>, email: &str) {
    for (path, value) in ANSWERS {
        api.update(path, value).unwrap();
    }
    api.update("contact.email", email).unwrap();
}

fn xlsx_count(dir: &std::path::Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .path()
                .extension()
                .is_some_and(|ext| ext == "xlsx")
        })
        .count()
}

#[tokio::test]
async fn test_resume_mid_wizard_then_submit() {
    let dir = TempDir::new().unwrap();
    {
        let mut api = fs_api(&dir);
        answer_everything(&mut api, "mateo.silva@example.com");
        api.advance();
        api.advance();
        assert_eq!(api.drafts().step(), Step::Language);
    }

    let mut api = fs_api(&dir);
    assert_eq!(api.drafts().step(), Step::Language);
    while api.drafts().step() != Step::Review {
        assert!(api.advance().passed());
    }
    let result = api.submit(None).await.unwrap();

    assert_eq!(result.step, Some(Step::Contact));
    assert!(!dir.path().join("data").join("draft.json").exists());
    assert_eq!(xlsx_count(&dir.path().join("exports")), 1);

    let reopened = fs_api(&dir);
    assert_eq!(reopened.ledger().len(), 1);
    assert_eq!(reopened.ledger().all()[0].program, "Express Entry");
    assert_eq!(reopened.drafts().step(), Step::Contact);
}

#[tokio::test]
async fn test_two_submissions_with_declined_upload() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let backend = FsBackend::new(data.clone());
    let service = ExportService::new(DirSink::new(data.join("exports"))).with_remote(
        EnvToken::new("INTAKE_PIPELINE_TEST_TOKEN_UNSET"),
        DriveUploader::new("http://127.0.0.1:9/upload"),
    );
    let mut api = IntakeApi::new(backend.clone(), backend, service);

    for email in ["one@example.com", "two@example.com"] {
        answer_everything(&mut api, email);
        for _ in 0..5 {
            api.advance();
        }
        let result = api.submit(None).await.unwrap();
        let report = result.export.as_ref().unwrap();
        assert_eq!(
            report.remote,
            RemoteDelivery::LocalOnly(SkipReason::CredentialDeclined)
        );
        assert!(report.local.path.exists());
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }

    let emails: Vec<_> = api
        .ledger()
        .all()
        .iter()
        .map(|r| r.email.clone())
        .collect();
    assert_eq!(emails, ["one@example.com", "two@example.com"]);
    assert_eq!(xlsx_count(&data.join("exports")), 2);
}

#[tokio::test]
async fn test_initialize_reads_config_from_data_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("intake.toml"),
        "export_on_submit = false\ncredential_source = \"none\"\nexport_dir = \"sheets\"\n",
    )
    .unwrap();

    let mut ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
    assert!(!ctx.config.export_on_submit);
    assert!(!ctx.api.export_service().remote_enabled());

    for (path, value) in ANSWERS {
        ctx.api.update(path, value).unwrap();
    }
    for _ in 0..5 {
        ctx.api.advance();
    }
    let submitted = ctx.api.submit(Some("desk-2")).await.unwrap();
    assert!(submitted.export.is_none());

    let exported = ctx.api.export().await.unwrap();
    let report = exported.export.unwrap();
    assert_eq!(report.local.rows, 1);
    assert!(report.local.path.starts_with(dir.path().join("sheets")));
    assert_eq!(report.remote, RemoteDelivery::LocalOnly(SkipReason::Disabled));
}
