//! Document text extraction: uniform entry point over every supported format.
//!
//! Dispatch is by filename extension:
//! - `.pdf`  → best-effort page-description recovery (never fails)
//! - `.docx` → rich-text container decoding (fails on corruption)
//! - `.txt`  → strict UTF-8 decoding (fails on invalid sequences)

pub mod filters;
pub mod page_description;
pub mod rich_text;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use rich_text::{DocxDecoder, RichTextDecoder};

/// Errors surfaced to the immediate caller of text extraction.
///
/// Page-description recovery never produces one of these; an unreadable
/// PDF is reported as empty text instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    RichText,
    PageDescription,
}

impl DocumentFormat {
    /// Resolves the format from the filename's last extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let lowered = filename.to_lowercase();
        let extension = lowered.rsplit('.').next().unwrap_or_default();
        match extension {
            "pdf" => Ok(DocumentFormat::PageDescription),
            "docx" => Ok(DocumentFormat::RichText),
            "txt" => Ok(DocumentFormat::PlainText),
            other => Err(ExtractionError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Confidence in extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryQuality {
    /// Decoded by a well-defined format decoder.
    Full,
    /// Recovered heuristically from a page-description file.
    Partial,
    /// Nothing usable was found.
    Empty,
}

/// An uploaded document as handed over by the caller.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub declared_format: DocumentFormat,
    pub filename: String,
}

impl RawDocument {
    /// Builds a document whose format is declared by its filename extension.
    pub fn new(
        bytes: impl Into<Bytes>,
        filename: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let filename = filename.into();
        let declared_format = DocumentFormat::from_filename(&filename)?;
        Ok(Self {
            bytes: bytes.into(),
            declared_format,
            filename,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub recovery_quality: RecoveryQuality,
}

impl ExtractedText {
    fn new(text: String, quality_if_present: RecoveryQuality) -> Self {
        let recovery_quality = if text.trim().is_empty() {
            RecoveryQuality::Empty
        } else {
            quality_if_present
        };
        Self {
            text,
            recovery_quality,
        }
    }

    /// True when nothing was extracted. Callers must not treat this as a
    /// document that simply lists zero skills.
    pub fn is_empty(&self) -> bool {
        self.recovery_quality == RecoveryQuality::Empty
    }
}

/// Extracts text from raw bytes, dispatching on the filename's extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    let document = RawDocument::new(Bytes::copy_from_slice(bytes), filename)?;
    extract_document(&document).map(|extracted| extracted.text)
}

/// Extracts text from a document using the default DOCX decoder.
pub fn extract_document(document: &RawDocument) -> Result<ExtractedText, ExtractionError> {
    extract_document_with(&DocxDecoder, document)
}

/// Extracts text from a document with a caller-supplied rich-text decoder.
pub fn extract_document_with(
    decoder: &dyn RichTextDecoder,
    document: &RawDocument,
) -> Result<ExtractedText, ExtractionError> {
    let extracted = match document.declared_format {
        DocumentFormat::PageDescription => ExtractedText::new(
            page_description::recover_text(&document.bytes),
            RecoveryQuality::Partial,
        ),
        DocumentFormat::RichText => {
            ExtractedText::new(decoder.decode(&document.bytes)?, RecoveryQuality::Full)
        }
        DocumentFormat::PlainText => {
            ExtractedText::new(decode_plain_text(&document.bytes)?, RecoveryQuality::Full)
        }
    };

    if extracted.is_empty() {
        warn!(
            filename = %document.filename,
            format = ?document.declared_format,
            "no text extracted"
        );
    } else {
        debug!(
            filename = %document.filename,
            chars = extracted.text.chars().count(),
            quality = ?extracted.recovery_quality,
            "text extracted"
        );
    }
    Ok(extracted)
}

fn decode_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ExtractionError::Decode(format!("Invalid UTF-8 in plain text: {e}")))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}
