use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extraction::RecoveryQuality;
use crate::matching::{MatchReport, Scored};
use crate::skills::SkillSet;

/// Which side of a match a document sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Requirement side.
    JobDescription,
    /// Candidate side.
    Cv,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::JobDescription => "Job description",
            DocumentKind::Cv => "CV",
        }
    }
}

/// User-facing note on how well a page-description upload was read.
/// Zero skills from a PDF is an advisory, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionAdvisory {
    ExtractionFailed,
    PartiallyProcessed { skill_count: usize },
    Processed { skill_count: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub filename: String,
    pub content: String,
    pub extracted_skills: SkillSet,
    pub recovery_quality: RecoveryQuality,
    pub advisory: Option<ExtractionAdvisory>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub report: MatchReport,
    pub created_at: DateTime<Utc>,
}

/// A stored analysis joined with the candidate document it scored.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub analysis: AnalysisRecord,
    pub cv: DocumentRecord,
}

impl Scored for AnalysisRecord {
    fn match_score(&self) -> u32 {
        self.report.match_score_percent
    }
}

impl Scored for AnalysisResult {
    fn match_score(&self) -> u32 {
        self.analysis.report.match_score_percent
    }
}
