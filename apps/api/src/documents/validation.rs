use crate::errors::FieldError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// Multipart clients often send a generic type for any file; it is not held
/// against the upload.
const GENERIC_MIME_TYPE: &str = "application/octet-stream";

/// What the client told us about an uploaded file.
#[derive(Debug, Clone)]
pub struct UploadMeta<'a> {
    pub filename: &'a str,
    pub content_type: Option<&'a str>,
    pub size: usize,
}

/// Validates an upload before any decoding happens.
///
/// Rules, each reported against its own field:
/// - `filename`: present and not blank
/// - `file`: non-empty and at most `max_bytes`
/// - `extension`: one of `ALLOWED_EXTENSIONS` (case-insensitive)
/// - `content_type`: when given and not generic, one of `ALLOWED_MIME_TYPES`
pub fn validate_upload(meta: &UploadMeta<'_>, max_bytes: usize) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if meta.filename.trim().is_empty() {
        errors.push(FieldError::new("filename", "Filename is required"));
    } else {
        match extension(meta.filename) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => errors.push(FieldError::new(
                "extension",
                format!(
                    "File type not allowed. Allowed types: {}",
                    ALLOWED_EXTENSIONS
                        .iter()
                        .map(|e| format!(".{e}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )),
        }
    }

    if meta.size == 0 {
        errors.push(FieldError::new("file", "File is empty"));
    } else if meta.size > max_bytes {
        errors.push(FieldError::new(
            "file",
            format!(
                "File size {} bytes exceeds maximum allowed size of {} bytes",
                meta.size, max_bytes
            ),
        ));
    }

    if let Some(mime) = meta.content_type {
        let mime = mime.split(';').next().unwrap_or_default().trim().to_lowercase();
        if mime != GENERIC_MIME_TYPE && !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
            errors.push(FieldError::new(
                "content_type",
                format!("MIME type '{mime}' is not allowed"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}
