use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tokio::fs;
use tracing::{error, info};

use crate::conversion::run_conversion;
use crate::models::AppState;
use crate::storage::ScratchDir;
use crate::types::AppResult;
use crate::upload::{read_pdf_upload, UploadedPdf};
use crate::utils::filename::{content_disposition, sanitize_stem};

pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.storage.max_upload_bytes;

    Router::new()
        .route("/convert-pdf", post(convert_pdf))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// POST /convert-pdf - convert an uploaded PDF to .docx
async fn convert_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Response> {
    let mut multipart = multipart?;
    let UploadedPdf {
        filename,
        bytes: pdf_bytes,
    } = read_pdf_upload(&mut multipart).await?;

    let stem = sanitize_stem(&filename);
    let scratch = ScratchDir::allocate(state.config.storage.scratch_root.as_deref(), &stem)?;

    let outcome = convert_staged(&state, &scratch, &filename, &pdf_bytes).await;
    scratch.remove_input().await;

    let docx_bytes = match outcome {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(filename = %filename, error = %e, "Conversion failed");
            scratch.close().await;
            return Err(e);
        }
    };
    scratch.close().await;

    Ok(docx_response(&format!("{stem}.docx"), docx_bytes))
}

/// Stage the upload, run the converter and read back the document.
async fn convert_staged(
    state: &AppState,
    scratch: &ScratchDir,
    filename: &str,
    pdf_bytes: &[u8],
) -> AppResult<Vec<u8>> {
    scratch.stage_input(pdf_bytes).await?;

    info!(
        filename = %filename,
        bytes = pdf_bytes.len(),
        output = %scratch.output_path().display(),
        converter = state.converter.name(),
        "Converting PDF"
    );

    let size = run_conversion(
        state.converter.as_ref(),
        scratch.input_path(),
        scratch.output_path(),
    )
    .await?;

    info!(filename = %filename, bytes = size, "Conversion successful");

    Ok(fs::read(scratch.output_path()).await?)
}

/// The converted document as an attachment download.
fn docx_response(download_name: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, DOCX_MEDIA_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(download_name)),
        ],
        body,
    )
        .into_response()
}
