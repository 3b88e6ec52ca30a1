// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use regdesk_api::{ApiError, SuccessResponse};
use regdesk_model::{generate_unique_id, Report};
use regdesk_store::{client_basename, UploadName};
use tracing::{info, warn};

const FILE_FIELD: &str = "report_pdf";
const STORED_FILE_PREFIX: &str = "report";

/// Parts of an upload request, all checked before anything touches disk.
struct ReportUpload {
    client_filename: String,
    bytes: Vec<u8>,
    name: String,
    description: String,
}

async fn read_report_upload(mut multipart: Multipart) -> Result<ReportUpload, HttpError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut name = None;
    let mut description = None;
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some((filename, bytes.to_vec()));
            }
            "name" => name = Some(field.text().await?),
            "description" => description = Some(field.text().await?),
            _ => {}
        }
    }

    let (client_filename, bytes) =
        file.ok_or_else(|| ApiError::validation_failed(FILE_FIELD, "no file part"))?;
    if client_basename(&client_filename).is_none() {
        return Err(ApiError::validation_failed(FILE_FIELD, "no selected file").into());
    }
    Ok(ReportUpload {
        client_filename,
        bytes,
        name: name.ok_or_else(|| ApiError::missing_field("name"))?,
        description: description.ok_or_else(|| ApiError::missing_field("description"))?,
    })
}

pub(crate) async fn list_reports_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.reports).await?))
}

/// Stores the file as `<report_id>_<basename>` and appends its metadata.
/// A failed save removes the file again.
pub(crate) async fn create_report_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let multipart =
        multipart.map_err(|r| ApiError::validation_failed(FILE_FIELD, r.body_text()))?;
    let upload = read_report_upload(multipart).await?;
    let uploads = state.uploads.clone();
    let report = state
        .exclusive(move |store, ids| {
            let mut db = store.load()?;
            let file_id = generate_unique_id(STORED_FILE_PREFIX, ids, |candidate| {
                let stem = format!("{candidate}_");
                db.reports.iter().any(|r| r.filename.starts_with(&stem))
            })?;
            let stored = UploadName::for_record(&file_id, &upload.client_filename)?;
            uploads.write(&stored, &upload.bytes)?;

            let record = Report {
                id: String::new(),
                name: upload.name,
                description: upload.description,
                filename: stored.as_str().to_string(),
            };
            let created = match db.reports_mut().create(record, ids) {
                Ok(created) => created,
                Err(e) => {
                    uploads.remove(&stored);
                    return Err(e.into());
                }
            };
            if let Err(e) = store.save(&db) {
                uploads.remove(&stored);
                return Err(e.into());
            }
            Ok(created)
        })
        .await?;
    info!(
        report_id = %report.id,
        filename = %report.filename,
        "report stored"
    );
    Ok((StatusCode::CREATED, Json(report)))
}

/// Removes the record, then the file on a best-effort basis.
pub(crate) async fn delete_report_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let removed = state
        .mutate(move |db, _| Ok(db.reports_mut().delete(&id)?))
        .await?;
    match UploadName::parse(&removed.filename) {
        Ok(name) => {
            let uploads = state.uploads.clone();
            let deleted = tokio::task::spawn_blocking(move || uploads.remove(&name))
                .await
                .unwrap_or(false);
            if !deleted {
                warn!(filename = %removed.filename, "report file was not removed");
            }
        }
        Err(e) => warn!(filename = %removed.filename, error = %e, "report filename not removable"),
    }
    Ok(Json(SuccessResponse::ok()))
}

pub(crate) async fn serve_upload_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, HttpError> {
    let name = UploadName::parse(&filename)?;
    let uploads = state.uploads.clone();
    let lookup = name.clone();
    let bytes = tokio::task::spawn_blocking(move || uploads.read(&lookup))
        .await
        .map_err(|e| ApiError::internal(format!("upload read task failed: {e}")))??;
    let content_type = if name.is_pdf() {
        "application/pdf"
    } else {
        "application/octet-stream"
    };
    let mut resp = bytes.into_response();
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    Ok(resp)
}
