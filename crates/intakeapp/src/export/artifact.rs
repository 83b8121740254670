use crate::error::Result;
use crate::record::{Record, COLUMNS};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook};
use tracing::warn;
use uuid::Uuid;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Submissions";
/// Longest string an xlsx cell accepts, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// A serialized spreadsheet, ready to be written locally or uploaded.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Data rows, header excluded.
    pub rows: usize,
}

/// One sheet: a header row of column names, then one row per record in order.
pub fn build(records: &[Record], prefix: &str, at: DateTime<Utc>) -> Result<Artifact> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        for (col, name) in COLUMNS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *name, &header)?;
        }
        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            for (col, value) in record.cells().into_iter().enumerate() {
                let value = match fit_cell(&value) {
                    Some(cut) => {
                        warn!(
                            row,
                            column = COLUMNS[col],
                            limit = MAX_CELL_CHARS,
                            "cell truncated to fit the sheet"
                        );
                        cut
                    }
                    None => &value,
                };
                sheet.write_string(row, col as u16, value)?;
            }
        }
        sheet.set_freeze_panes(1, 0)?;
    }

    let bytes = workbook.save_to_buffer()?;
    Ok(Artifact {
        file_name: file_name(prefix, at),
        bytes,
        rows: records.len(),
    })
}

/// `<prefix>-<YYYY-MM-DD_HH-MM-SS>-<8 hex>.xlsx`; the suffix keeps two exports in
/// the same second apart.
/// The leading [`MAX_CELL_CHARS`] characters of `value`, or `None` when it already fits.
fn fit_cell(value: &str) -> Option<&str> {
    value
        .char_indices()
        .nth(MAX_CELL_CHARS)
        .map(|(end, _)| &value[..end])
}

pub fn file_name(prefix: &str, at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}.xlsx",
        sanitize_prefix(prefix),
        at.format("%Y-%m-%d_%H-%M-%S"),
        &suffix[..8]
    )
}

fn sanitize_prefix(name: &str) -> String {
    let clean: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if clean.is_empty() {
        "intake".to_string()
    } else {
        clean
    }
}
