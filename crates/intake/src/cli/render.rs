use colored::Colorize;
use intakeapp::commands::fields::FieldEntry;
use intakeapp::commands::{CmdMessage, CmdResult, MessageLevel};
use intakeapp::export::{ExportReport, RemoteDelivery};
use intakeapp::model::{Draft, FieldPath, Step};
use intakeapp::record::Record;
use intakeapp::validation::FieldErrors;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const KEY_WIDTH: usize = 26;
const MISSING: &str = "-";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_status(result: &CmdResult) {
    let step = result.step.unwrap_or_default();
    println!("{}", step.to_string().bold());
    let Some(draft) = &result.draft else {
        return;
    };

    if step == Step::Review {
        for section in &Step::ALL[..Step::LAST.index()] {
            println!();
            println!("{}", section.title().underline());
            print_step_fields(draft, *section, &result.errors);
        }
        println!();
        println!("{}", "Run `intake submit` to finish.".dimmed());
    } else {
        print_step_fields(draft, step, &result.errors);
    }
}

fn print_step_fields(draft: &Draft, step: Step, errors: &FieldErrors) {
    for path in FieldPath::all(draft.work.len())
        .into_iter()
        .filter(|p| p.step() == step)
    {
        let value = draft.get(&path).unwrap_or_default();
        let shown = if value.is_empty() {
            MISSING.dimmed()
        } else {
            truncate_to_width(&value, LINE_WIDTH - KEY_WIDTH).normal()
        };
        println!("  {} {}", pad_to_width(&path.to_string(), KEY_WIDTH), shown);

        // Only the first work entry is validated, and it shares keys with the rest.
        let reported = match path {
            FieldPath::Work { index, .. } => index == 0,
            _ => true,
        };
        if let Some(message) = errors.message(path.key()).filter(|_| reported) {
            println!("  {} {}", " ".repeat(KEY_WIDTH), message.red());
        }
    }
}

pub(super) fn print_fields(fields: &[FieldEntry]) {
    let mut current: Option<Step> = None;
    for field in fields {
        if current != Some(field.step) {
            if current.is_some() {
                println!();
            }
            println!("{}", field.step.title().bold());
            current = Some(field.step);
        }
        let choices = if field.choices.is_empty() {
            String::new()
        } else {
            format!("[{}]", field.choices.join(" | "))
        };
        println!(
            "  {} {}",
            pad_to_width(&field.path, KEY_WIDTH),
            choices.dimmed()
        );
    }
}

pub(super) fn print_records(records: &[Record]) {
    if records.is_empty() {
        return;
    }
    for (i, record) in records.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let name = truncate_to_width(&record.full_name(), 28);
        let email = truncate_to_width(&record.email, 34);
        let program = truncate_to_width(&record.program, 20);
        println!(
            "{}{}{}{}{}",
            idx.yellow(),
            pad_to_width(&name, 30),
            pad_to_width(&email, 36),
            pad_to_width(&program, 22),
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
    }
}

pub(super) fn print_export(report: &ExportReport) {
    println!(
        "{} {}",
        "Spreadsheet:".bold(),
        report.local.path.display()
    );
    match &report.remote {
        RemoteDelivery::Delivered { remote_id } => {
            println!("{} {}", "Remote copy:".bold(), remote_id.green());
        }
        RemoteDelivery::LocalOnly(reason) => {
            println!("{} {}", "Remote copy:".bold(), reason.to_string().dimmed());
        }
    }
}

pub(super) fn print_config(entries: &[(&'static str, String)]) {
    for (key, value) in entries {
        println!("{} = {}", key.bold(), value);
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let used = s.width();
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
