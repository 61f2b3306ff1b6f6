//! Rich-text container decoding (DOCX).
//!
//! The container is a zip archive; body text lives in `word/document.xml` as
//! `w:t` runs grouped into `w:p` paragraphs. Unlike page-description recovery,
//! a corrupt container is a hard [`ExtractionError::Decode`].

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Decodes a rich-text container into raw text.
pub trait RichTextDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Default decoder for Office Open XML word-processing documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxDecoder;

impl RichTextDecoder for DocxDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::Decode(format!("Failed to read DOCX as ZIP: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| ExtractionError::Decode(format!("Invalid DOCX: missing {DOCUMENT_PART}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::Decode(format!("Failed to read {DOCUMENT_PART}: {e}")))?;

        document_text(&xml)
    }
}

/// Walks the document XML collecting text runs. Paragraphs and explicit
/// breaks become newlines, tab elements become tabs.
fn document_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut output = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => output.push('\t'),
                b"br" | b"cr" => output.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => output.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractionError::Decode(format!("Invalid DOCX text: {err}")))?;
                output.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Decode(format!(
                    "XML parse error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(output.trim_end().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    /// Builds a minimal DOCX archive whose body holds one paragraph per entry.
    pub(crate) fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_decodes_paragraphs() {
        let bytes = docx_fixture(&["Senior Rust Engineer", "Skills: Rust, Docker &amp; AWS"]);
        let text = DocxDecoder.decode(&bytes).unwrap();
        assert_eq!(text, "Senior Rust Engineer\nSkills: Rust, Docker & AWS");
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(document_text(xml).unwrap(), "A\tB\nC");
    }

    #[test]
    fn test_non_zip_is_decode_error() {
        let err = DocxDecoder.decode(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
    }

    #[test]
    fn test_zip_without_document_part_is_decode_error() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = DocxDecoder.decode(&bytes).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_PART));
    }
}
