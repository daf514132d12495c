//! Filename handling for uploads and downloads.

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Byte budget for the stem. File name limits (NAME_MAX is 255 on Linux)
/// count bytes, and `<stem>.docx` has to fit.
const MAX_STEM_BYTES: usize = 200;

/// Used when nothing printable survives sanitization.
pub const FALLBACK_STEM: &str = "document";

/// Whether a declared filename or content type identifies a PDF.
pub fn is_pdf(filename: &str, content_type: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf") || content_type.to_lowercase().contains("pdf")
}

/// Stem of the last path component, with the final extension removed.
///
/// A leading dot does not start an extension, so `.pdf` is its own stem.
pub fn stem(filename: &str) -> &str {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Stem that is safe to use as a file name inside a scratch directory.
pub fn sanitize_stem(filename: &str) -> String {
    let cleaned: String = stem(filename)
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = truncate_to_bytes(cleaned.trim_matches(is_trimmed), MAX_STEM_BYTES)
        .trim_end_matches(is_trimmed);
    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_trimmed(c: char) -> bool {
    c == '.' || c.is_whitespace()
}

/// Longest prefix of `value` that fits in `max_bytes` without splitting a char.
fn truncate_to_bytes(value: &str, max_bytes: usize) -> &str {
    let end = value
        .char_indices()
        .map(|(idx, c)| idx + c.len_utf8())
        .take_while(|&end| end <= max_bytes)
        .last()
        .unwrap_or(0);
    &value[..end]
}

/// `Content-Disposition` value for an attachment download.
///
/// ASCII names go in a quoted `filename`; anything else uses the RFC 5987
/// `filename*` form.
pub fn content_disposition(filename: &str) -> String {
    let plain = filename.is_ascii()
        && !filename
            .chars()
            .any(|c| c.is_ascii_control() || c == '"' || c == '\\');
    if plain {
        format!("attachment; filename=\"{filename}\"")
    } else {
        format!("attachment; filename*=utf-8''{}", percent_encode(filename))
    }
}

fn percent_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}
