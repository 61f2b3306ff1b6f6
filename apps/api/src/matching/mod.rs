//! Matching Engine: scores how well a candidate skill set covers a
//! requirement skill set.
//!
//! The published percentage counts direct, case-insensitive matches only. A
//! relevance bonus for topically adjacent candidate skills is computed into an
//! auxiliary score that is kept off the wire and out of the percentage.

pub mod ranking;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use ranking::{rank_candidates, top_candidates, Scored};

/// Bonus per candidate skill that shares a topical domain with the requirements.
const RELEVANCE_BONUS: f64 = 0.5;

/// Topical domains used for the relevance bonus, matched as lowercase substrings.
const TOPICAL_DOMAINS: &[(&str, &[&str])] = &[
    (
        "programming",
        &["javascript", "typescript", "python", "java", "c++", "c#", "go", "rust", "php", "ruby"],
    ),
    (
        "web",
        &["html", "css", "react", "vue", "angular", "node.js", "express", "django", "flask"],
    ),
    ("database", &["sql", "mysql", "postgresql", "mongodb", "redis", "oracle"]),
    ("cloud", &["aws", "azure", "google cloud", "gcp", "docker", "kubernetes"]),
    ("devops", &["git", "ci/cd", "jenkins", "gitlab", "github", "testing"]),
    ("design", &["ui", "ux", "figma", "sketch", "photoshop", "adobe"]),
    ("management", &["project", "agile", "scrum", "leadership", "communication"]),
    ("data", &["data", "analytics", "machine learning", "ai", "statistics"]),
];

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One entry per requirement skill, in requirement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub found_in_candidate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub requirement_set_id: Uuid,
    pub candidate_set_id: Uuid,
    pub match_score_percent: u32, // 0 – 100
    pub skill_matches: Vec<SkillMatch>,
    pub skill_gaps: Vec<String>,
    /// Direct matches plus relevance bonus. Reserved for ranking refinement;
    /// never reflected in `match_score_percent` and never serialized.
    #[serde(skip)]
    pub auxiliary_score: f64,
}

impl MatchReport {
    pub fn direct_match_count(&self) -> usize {
        self.skill_matches
            .iter()
            .filter(|m| m.found_in_candidate)
            .count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Pluggable scorer carried in `AppState` as `Arc<dyn MatchScorer>`.
pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        requirement_set_id: Uuid,
        requirements: &[String],
        candidate_set_id: Uuid,
        candidates: &[String],
    ) -> MatchReport;
}

/// Default scorer: direct skill overlap.
pub struct SkillOverlapScorer;

impl MatchScorer for SkillOverlapScorer {
    fn score(
        &self,
        requirement_set_id: Uuid,
        requirements: &[String],
        candidate_set_id: Uuid,
        candidates: &[String],
    ) -> MatchReport {
        score(requirement_set_id, requirements, candidate_set_id, candidates)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores a candidate skill set against a requirement skill set.
///
/// Algorithm:
/// 1. For each requirement (in order), test case-insensitive membership in
///    the candidate set; record a `SkillMatch`, and a gap when absent
/// 2. `match_score_percent = round(100 × direct / requirements)`, 0 when
///    there are no requirements
/// 3. `auxiliary_score = direct + relevance_bonus`
pub fn score(
    requirement_set_id: Uuid,
    requirements: &[String],
    candidate_set_id: Uuid,
    candidates: &[String],
) -> MatchReport {
    let candidate_keys: HashSet<String> = candidates.iter().map(|s| s.to_lowercase()).collect();

    let mut skill_matches = Vec::with_capacity(requirements.len());
    let mut skill_gaps = Vec::new();

    for skill in requirements {
        let found_in_candidate = candidate_keys.contains(&skill.to_lowercase());
        if !found_in_candidate {
            skill_gaps.push(skill.clone());
        }
        skill_matches.push(SkillMatch {
            skill: skill.clone(),
            found_in_candidate,
        });
    }

    let direct = skill_matches.iter().filter(|m| m.found_in_candidate).count();
    let match_score_percent = if requirements.is_empty() {
        0
    } else {
        (100.0 * direct as f64 / requirements.len() as f64).round() as u32
    };

    MatchReport {
        requirement_set_id,
        candidate_set_id,
        match_score_percent,
        skill_matches,
        skill_gaps,
        auxiliary_score: direct as f64 + relevance_bonus(requirements, candidates),
    }
}

/// Bonus for candidate skills outside the requirement set that fall in a
/// topical domain the requirement set also touches.
pub fn relevance_bonus(requirements: &[String], candidates: &[String]) -> f64 {
    let requirement_keys: HashSet<String> =
        requirements.iter().map(|s| s.to_lowercase()).collect();
    let touched: Vec<&[&str]> = TOPICAL_DOMAINS
        .iter()
        .map(|(_, keywords)| *keywords)
        .filter(|keywords| requirement_keys.iter().any(|r| in_domain(r, keywords)))
        .collect();

    let adjacent = candidates
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|c| !requirement_keys.contains(c))
        .filter(|c| touched.iter().any(|keywords| in_domain(c, keywords)))
        .count();

    adjacent as f64 * RELEVANCE_BONUS
}

fn in_domain(skill_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| skill_lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(skills: &[&str]) -> Vec<String> {
        skills.iter().map(|s| s.to_string()).collect()
    }

    fn run(requirements: &[&str], candidates: &[&str]) -> MatchReport {
        score(Uuid::nil(), &set(requirements), Uuid::nil(), &set(candidates))
    }

    #[test]
    fn test_two_of_three_rounds_to_67() {
        let report = run(&["React", "Node.js", "AWS"], &["React", "Python", "AWS"]);
        assert_eq!(report.match_score_percent, 67);
        assert_eq!(report.skill_gaps, vec!["Node.js"]);
        assert_eq!(report.direct_match_count(), 2);
    }

    #[test]
    fn test_matches_preserve_requirement_order() {
        let report = run(&["Zig", "Ada", "Go"], &["go"]);
        let order: Vec<&str> = report.skill_matches.iter().map(|m| m.skill.as_str()).collect();
        assert_eq!(order, vec!["Zig", "Ada", "Go"]);
        assert_eq!(report.skill_gaps, vec!["Zig", "Ada"]);
    }

    #[test]
    fn test_case_insensitive_membership() {
        let report = run(&["AWS"], &["aws"]);
        assert!(report.skill_matches[0].found_in_candidate);
        assert_eq!(report.match_score_percent, 100);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let report = run(&[], &["Rust", "Go"]);
        assert_eq!(report.match_score_percent, 0);
        assert!(report.skill_matches.is_empty());
        assert!(report.skill_gaps.is_empty());
    }

    #[test]
    fn test_identical_sets_score_100() {
        let skills = ["Docker", "Kubernetes", "Terraform"];
        let report = run(&skills, &skills);
        assert_eq!(report.match_score_percent, 100);
        assert!(report.skill_gaps.is_empty());
    }

    #[test]
    fn test_relevance_bonus_is_not_published() {
        // Python shares the "programming" domain with Rust, but the percentage
        // stays at direct matches only.
        let report = run(&["Rust", "Kafka"], &["Rust", "Python"]);
        assert_eq!(report.match_score_percent, 50);
        assert!((report.auxiliary_score - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_relevance_bonus_requires_shared_domain() {
        // Figma is design; the requirements only touch programming.
        assert_eq!(relevance_bonus(&set(&["Rust"]), &set(&["Figma"])), 0.0);
        assert_eq!(relevance_bonus(&set(&["Rust"]), &set(&["Java", "TypeScript"])), 1.0);
    }

    #[test]
    fn test_relevance_bonus_skips_direct_matches() {
        assert_eq!(relevance_bonus(&set(&["Rust"]), &set(&["rust"])), 0.0);
    }

    #[test]
    fn test_auxiliary_score_is_not_serialized() {
        let report = run(&["Rust"], &["Rust", "Go"]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("auxiliary_score").is_none());
        assert_eq!(json["match_score_percent"], 100);
        assert_eq!(json["skill_matches"][0]["found_in_candidate"], true);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let a = run(&["Rust", "Go", "AWS"], &["aws", "Python"]);
        let b = run(&["Rust", "Go", "AWS"], &["aws", "Python"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scorer_trait_delegates_to_score() {
        let id = Uuid::new_v4();
        let report = SkillOverlapScorer.score(id, &set(&["SQL"]), id, &set(&["sql"]));
        assert_eq!(report.match_score_percent, 100);
        assert_eq!(report.requirement_set_id, id);
    }
}
