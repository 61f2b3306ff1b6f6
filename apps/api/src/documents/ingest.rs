use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::documents::models::{DocumentKind, DocumentRecord, ExtractionAdvisory};
use crate::extraction::{extract_document, DocumentFormat, ExtractionError, RawDocument};
use crate::skills::{extract_skills, SkillSet};

/// Below this many skills a page-description upload is flagged as only partly read.
const PROCESSED_SKILL_THRESHOLD: usize = 3;

/// Turns an uploaded file into a stored document record.
///
/// Algorithm:
/// 1. Extract text for the declared format (decode errors propagate)
/// 2. Extract skills, unless extraction recovered nothing
/// 3. For page-description uploads, attach an `ExtractionAdvisory`
///
/// CPU-bound; call from `spawn_blocking` inside request handlers.
pub fn build_document(
    kind: DocumentKind,
    document: &RawDocument,
) -> Result<DocumentRecord, ExtractionError> {
    let extracted = extract_document(document)?;

    let extracted_skills = if extracted.is_empty() {
        SkillSet::default()
    } else {
        extract_skills(&extracted.text)
    };

    let advisory = match document.declared_format {
        DocumentFormat::PageDescription => Some(advisory_for(extracted_skills.len())),
        DocumentFormat::RichText | DocumentFormat::PlainText => None,
    };

    if let Some(ExtractionAdvisory::ExtractionFailed) = advisory {
        warn!(
            filename = %document.filename,
            "No skills recovered from page-description upload"
        );
    }

    info!(
        kind = kind.label(),
        filename = %document.filename,
        skills = extracted_skills.len(),
        "Document processed"
    );

    Ok(DocumentRecord {
        id: Uuid::new_v4(),
        kind,
        filename: document.filename.clone(),
        content: extracted.text,
        extracted_skills,
        recovery_quality: extracted.recovery_quality,
        advisory,
        created_at: Utc::now(),
    })
}

pub fn advisory_for(skill_count: usize) -> ExtractionAdvisory {
    match skill_count {
        0 => ExtractionAdvisory::ExtractionFailed,
        n if n < PROCESSED_SKILL_THRESHOLD => {
            ExtractionAdvisory::PartiallyProcessed { skill_count: n }
        }
        n => ExtractionAdvisory::Processed { skill_count: n },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::RecoveryQuality;

    #[test]
    fn test_plain_text_document_has_no_advisory() {
        let raw = RawDocument::new(
            "We need a Senior Engineer with React, Node.js and AWS experience.".as_bytes().to_vec(),
            "jd.txt",
        )
        .unwrap();
        let record = build_document(DocumentKind::JobDescription, &raw).unwrap();

        assert_eq!(record.kind, DocumentKind::JobDescription);
        assert_eq!(record.recovery_quality, RecoveryQuality::Full);
        assert!(record.advisory.is_none());
        assert!(record.extracted_skills.contains_ignore_case("React"));
        assert!(record.extracted_skills.contains_ignore_case("AWS"));
    }

    #[test]
    fn test_unreadable_pdf_gets_failed_advisory() {
        let raw =
            RawDocument::new(b"%PDF-1.4 endobj stream xref endstream".to_vec(), "cv.pdf").unwrap();
        let record = build_document(DocumentKind::Cv, &raw).unwrap();

        assert_eq!(record.recovery_quality, RecoveryQuality::Empty);
        assert!(record.content.is_empty());
        assert!(record.extracted_skills.is_empty());
        assert_eq!(record.advisory, Some(ExtractionAdvisory::ExtractionFailed));
    }

    #[test]
    fn test_invalid_utf8_is_a_decode_error() {
        let raw = RawDocument::new(vec![0xff, 0xfe, 0xfd, 0x00, 0xc3], "cv.txt").unwrap();
        assert!(matches!(
            build_document(DocumentKind::Cv, &raw),
            Err(ExtractionError::Decode(_))
        ));
    }

    #[test]
    fn test_advisory_thresholds() {
        assert_eq!(advisory_for(0), ExtractionAdvisory::ExtractionFailed);
        assert_eq!(
            advisory_for(2),
            ExtractionAdvisory::PartiallyProcessed { skill_count: 2 }
        );
        assert_eq!(advisory_for(3), ExtractionAdvisory::Processed { skill_count: 3 });
    }

    #[test]
    fn test_advisory_serializes_with_status_tag() {
        let json = serde_json::to_value(advisory_for(1)).unwrap();
        assert_eq!(json["status"], "partially_processed");
        assert_eq!(json["skill_count"], 1);
    }
}
