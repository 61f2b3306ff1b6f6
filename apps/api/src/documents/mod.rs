//! Uploaded job descriptions and CVs: validation, ingestion, storage and
//! the HTTP handlers over them.

pub mod handlers;
pub mod ingest;
pub mod models;
pub mod store;
pub mod validation;

pub use models::{AnalysisRecord, AnalysisResult, DocumentKind, DocumentRecord, ExtractionAdvisory};
pub use store::{InMemoryStore, RecordStore};
