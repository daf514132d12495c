//! Upload validation
//!
//! Checks run in a fixed order: filename presence, then extension or
//! declared content type, then payload size. The payload is only read from
//! the request once the metadata checks have passed. Declared metadata is
//! trusted; the bytes are never sniffed.

use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;

use crate::types::{AppError, AppResult};
use crate::utils::filename::is_pdf;

/// Multipart field carrying the PDF.
pub const FILE_FIELD: &str = "file";

/// A validated upload, held in memory until it is staged.
#[derive(Debug)]
pub struct UploadedPdf {
    pub filename: String,
    pub bytes: Bytes,
}

/// Find the `file` field in a multipart body and validate it.
pub async fn read_pdf_upload(multipart: &mut Multipart) -> AppResult<UploadedPdf> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = check_metadata(field.file_name(), field.content_type())?;
        let bytes = field.bytes().await?;
        check_payload(&bytes)?;

        return Ok(UploadedPdf { filename, bytes });
    }

    Err(AppError::Http {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: format!("Field '{FILE_FIELD}' is required."),
    })
}

/// Validate the declared metadata of an uploaded file and return its filename.
pub fn check_metadata(filename: Option<&str>, content_type: Option<&str>) -> AppResult<String> {
    let filename = match filename {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::invalid_input("No filename provided.")),
    };

    if !is_pdf(filename, content_type.unwrap_or_default()) {
        return Err(AppError::invalid_input(format!(
            "Only PDF files are accepted. Received: {filename}"
        )));
    }

    Ok(filename.to_string())
}

pub fn check_payload(bytes: &[u8]) -> AppResult<()> {
    if bytes.is_empty() {
        return Err(AppError::invalid_input("Uploaded file is empty."));
    }
    Ok(())
}
