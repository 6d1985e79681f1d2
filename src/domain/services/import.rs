use crate::domain::models::{
    enums::{DietaryPreference, RelationshipGroup},
    event::Event,
};
use crate::domain::ports::{GuestRepository, InvitationRepository};
use crate::domain::services::guest_service::{self, NewGuest};
use crate::error::AppError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Cursor;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

/// One parsed data row. `row` is 1-based and excludes the header line.
#[derive(Debug)]
pub struct ImportRow {
    pub row: usize,
    pub values: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ImportWarning {
    pub row: usize,
    pub name: String,
    pub warning: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
    pub warnings: Vec<ImportWarning>,
}

impl ImportReport {
    pub fn message(&self) -> String {
        format!(
            "יובאו {} אורחים ({} שורות דולגו, {} אזהרות)",
            self.imported,
            self.skipped.len(),
            self.warnings.len()
        )
    }
}

/// Parse an uploaded CSV or Excel file into header-keyed rows. The file
/// format libraries stay behind this boundary; the import engine below only
/// ever sees parsed rows.
pub fn parse_rows(filename: &str, bytes: &[u8], max_rows: usize) -> Result<Vec<ImportRow>, AppError> {
    let lower = filename.to_lowercase();
    let rows = if lower.ends_with(".csv") {
        parse_csv(bytes)?
    } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
        parse_excel(bytes)?
    } else {
        return Err(AppError::Validation(
            "פורמט קובץ לא נתמך — יש להעלות CSV או Excel".into(),
        ));
    };

    if rows.len() > max_rows {
        return Err(AppError::Validation(format!(
            "הקובץ גדול מדי — ניתן לייבא עד {max_rows} שורות"
        )));
    }
    Ok(rows)
}

fn check_required_columns(headers: &[String]) -> Result<(), AppError> {
    for required in ["name_hebrew", "phone"] {
        if !headers.iter().any(|h| h == required) {
            return Err(AppError::Validation(format!(
                "עמודת חובה חסרה בקובץ: {required}"
            )));
        }
    }
    Ok(())
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<ImportRow>, AppError> {
    // Excel exports often carry a UTF-8 BOM.
    let data = bytes.strip_prefix("\u{feff}".as_bytes()).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|_| AppError::Validation("קובץ CSV לא תקין".into()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    check_required_columns(&headers)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|_| AppError::Validation("קובץ CSV לא תקין".into()))?;
        let mut values = HashMap::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            let field = field.trim();
            if !field.is_empty() {
                values.insert(header.clone(), field.to_string());
            }
        }
        rows.push(ImportRow { row: idx + 1, values });
    }
    Ok(rows)
}

fn parse_excel(bytes: &[u8]) -> Result<Vec<ImportRow>, AppError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|_| AppError::Validation("קובץ Excel לא תקין".into()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Validation("קובץ Excel ריק".into()))?
        .map_err(|_| AppError::Validation("קובץ Excel לא תקין".into()))?;

    let mut row_iter = range.rows();
    let headers: Vec<String> = row_iter
        .next()
        .ok_or_else(|| AppError::Validation("קובץ Excel ריק".into()))?
        .iter()
        .map(|c| c.to_string().trim().to_lowercase())
        .collect();
    check_required_columns(&headers)?;

    let mut rows = Vec::new();
    for (idx, cells) in row_iter.enumerate() {
        let mut values = HashMap::new();
        for (header, cell) in headers.iter().zip(cells.iter()) {
            if let Some(value) = cell_to_string(cell) {
                values.insert(header.clone(), value);
            }
        }
        rows.push(ImportRow { row: idx + 1, values });
    }
    Ok(rows)
}

fn cell_to_string(cell: &Data) -> Option<String> {
    let s = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        // Phone columns come back as floats from spreadsheet tools.
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Row-by-row import. Every row is its own unit of work: a bad row is
/// recorded and the batch continues. Imported rows reuse the regular guest
/// creation path, invitation issuance included.
pub async fn run_import(
    guest_repo: &Arc<dyn GuestRepository>,
    invitation_repo: &Arc<dyn InvitationRepository>,
    app_base_url: &str,
    event: &Event,
    rows: Vec<ImportRow>,
) -> ImportReport {
    let mut report = ImportReport::default();

    for row in rows {
        let name_hebrew = match row.values.get("name_hebrew") {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                report.skipped.push(SkippedRow {
                    row: row.row,
                    reason: "חסר שם בעברית".into(),
                });
                continue;
            }
        };

        let phone = match row.values.get("phone") {
            Some(phone) if !phone.trim().is_empty() => phone.trim().to_string(),
            _ => {
                report.skipped.push(SkippedRow {
                    row: row.row,
                    reason: "חסר מספר טלפון".into(),
                });
                continue;
            }
        };

        let mut new_guest = NewGuest {
            name_hebrew: name_hebrew.clone(),
            name_transliteration: row.values.get("name_transliteration").cloned(),
            email: row.values.get("email").cloned(),
            phone: Some(phone),
            ..NewGuest::default()
        };

        if let Some(raw) = row.values.get("dietary_preference") {
            match DietaryPreference::from_str(raw) {
                Ok(pref) => new_guest.dietary_preference = pref,
                Err(()) => report.warnings.push(ImportWarning {
                    row: row.row,
                    name: name_hebrew.clone(),
                    warning: format!("העדפה תזונתית לא מוכרת ('{raw}') — הוגדרה כ'ללא'"),
                }),
            }
        }

        if let Some(raw) = row.values.get("relationship_group") {
            match RelationshipGroup::from_str(raw) {
                Ok(group) => new_guest.relationship_group = Some(group),
                Err(()) => report.warnings.push(ImportWarning {
                    row: row.row,
                    name: name_hebrew.clone(),
                    warning: format!("קבוצת יחסים לא מוכרת ('{raw}') — לא הוגדרה"),
                }),
            }
        }

        match guest_service::create_guest(
            guest_repo,
            invitation_repo,
            app_base_url,
            event,
            new_guest,
        )
        .await
        {
            Ok(_) => report.imported += 1,
            Err(AppError::Validation(reason)) => {
                report.skipped.push(SkippedRow { row: row.row, reason });
            }
            Err(e) => {
                error!("Import row {} failed: {:?}", row.row, e);
                report.skipped.push(SkippedRow {
                    row: row.row,
                    reason: "שגיאה בשמירת השורה".into(),
                });
            }
        }
    }

    info!(
        imported = report.imported,
        skipped = report.skipped.len(),
        warnings = report.warnings.len(),
        "Guest import finished for event {}",
        event.id
    );
    report
}
