use crate::api::dtos::responses::{ImportDetails, ImportResponse};
use crate::api::extractors::auth::AuthOrganizer;
use crate::domain::services::import;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// Bulk import from an uploaded CSV or Excel file. The upload is a single
/// multipart field named `file`; its filename decides the parser.
pub async fn import_guests(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(event_id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_owned(&organizer.id, &event_id)
        .await?
        .ok_or(AppError::NotFound("האירוע לא נמצא".into()))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("קובץ ההעלאה לא תקין".into()))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::Validation("חסר שם קובץ".into()))?
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::Validation("קובץ ההעלאה לא תקין".into()))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| AppError::Validation("לא צורף קובץ".into()))?;

    let rows = import::parse_rows(&filename, &bytes, state.config.import_max_rows)?;
    let report = import::run_import(
        &state.guest_repo,
        &state.invitation_repo,
        &state.config.app_base_url,
        &event,
        rows,
    )
    .await;

    Ok(Json(ImportResponse {
        message: report.message(),
        imported: report.imported,
        skipped: report.skipped.len(),
        warnings: report.warnings.len(),
        details: ImportDetails {
            skipped: report.skipped,
            warnings: report.warnings,
        },
    }))
}
