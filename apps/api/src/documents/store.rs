//! Keyed record storage for documents and analyses.
//!
//! The service talks to storage through the `RecordStore` trait only; the
//! in-process `InMemoryStore` is the default backend.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::documents::models::{AnalysisRecord, DocumentKind, DocumentRecord};
use crate::matching::rank_candidates;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_document(&self, record: DocumentRecord) -> Result<()>;

    async fn get_document(&self, kind: DocumentKind, id: Uuid) -> Result<Option<DocumentRecord>>;

    /// Newest first.
    async fn list_documents(&self, kind: DocumentKind) -> Result<Vec<DocumentRecord>>;

    /// Returns the documents of `kind` whose ids appear in `ids`, in `ids` order.
    /// Unknown ids are skipped.
    async fn find_documents(
        &self,
        kind: DocumentKind,
        ids: &[Uuid],
    ) -> Result<Vec<DocumentRecord>>;

    /// Returns false when nothing was deleted.
    async fn delete_document(&self, kind: DocumentKind, id: Uuid) -> Result<bool>;

    async fn insert_analyses(&self, records: Vec<AnalysisRecord>) -> Result<()>;

    /// Analyses for one requirement document, best score first.
    async fn list_analyses(&self, requirement_set_id: Uuid) -> Result<Vec<AnalysisRecord>>;

    /// Returns the number of analyses removed.
    async fn delete_analyses(&self, requirement_set_id: Uuid) -> Result<usize>;
}

#[derive(Default)]
struct Tables {
    documents: HashMap<Uuid, DocumentRecord>,
    // Insertion order is kept so equal scores list in the order they were stored.
    analyses: Vec<AnalysisRecord>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_document(&self, record: DocumentRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.documents.insert(record.id, record);
        Ok(())
    }

    async fn get_document(&self, kind: DocumentKind, id: Uuid) -> Result<Option<DocumentRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .get(&id)
            .filter(|doc| doc.kind == kind)
            .cloned())
    }

    async fn list_documents(&self, kind: DocumentKind) -> Result<Vec<DocumentRecord>> {
        let tables = self.tables.read().await;
        let mut docs: Vec<DocumentRecord> = tables
            .documents
            .values()
            .filter(|doc| doc.kind == kind)
            .cloned()
            .collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(docs)
    }

    async fn find_documents(
        &self,
        kind: DocumentKind,
        ids: &[Uuid],
    ) -> Result<Vec<DocumentRecord>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.documents.get(id))
            .filter(|doc| doc.kind == kind)
            .cloned()
            .collect())
    }

    async fn delete_document(&self, kind: DocumentKind, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let matches_kind = tables
            .documents
            .get(&id)
            .is_some_and(|doc| doc.kind == kind);
        if matches_kind {
            tables.documents.remove(&id);
        }
        Ok(matches_kind)
    }

    async fn insert_analyses(&self, records: Vec<AnalysisRecord>) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.analyses.extend(records);
        Ok(())
    }

    async fn list_analyses(&self, requirement_set_id: Uuid) -> Result<Vec<AnalysisRecord>> {
        let tables = self.tables.read().await;
        let analyses: Vec<AnalysisRecord> = tables
            .analyses
            .iter()
            .filter(|a| a.report.requirement_set_id == requirement_set_id)
            .cloned()
            .collect();
        Ok(rank_candidates(analyses))
    }

    async fn delete_analyses(&self, requirement_set_id: Uuid) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let before = tables.analyses.len();
        tables
            .analyses
            .retain(|a| a.report.requirement_set_id != requirement_set_id);
        Ok(before - tables.analyses.len())
    }
}
