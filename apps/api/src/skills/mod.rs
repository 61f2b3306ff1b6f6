//! Skill extraction: turns free text into a normalized, deduplicated, sorted
//! [`SkillSet`].
//!
//! Four stages feed one accumulator, in order:
//! 1. topical patterns (normalized)
//! 2. reference dictionary substrings (canonical form)
//! 3. parenthesized lists (taken as written)
//! 4. contextual phrases such as "proficient in …" (normalized)
//!
//! Deduplication is case-insensitive and the first-seen spelling wins.

pub mod vocabulary;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use vocabulary::{is_valid_skill, normalize_skill};
use vocabulary::{COMMON_SKILLS, SKILL_PATTERNS};

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("parenthetical pattern is valid"));

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;&/]").expect("separator pattern is valid"));

/// Lead-in phrases; the captured remainder runs to the end of the clause.
static CONTEXT_PHRASES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?i)\b(?:experienced|skilled|proficient|expert|knowledge|familiar)\s+(?:in|with|of)\s+([^.;\n]+)",
        )
        .expect("proficiency pattern is valid"),
        Regex::new(
            r"(?i)\b(?:experience|skills?|competencies|abilities|ability)(?:\s*:\s*|\s+includes?\s+)([^.;\n]+)",
        )
        .expect("inventory pattern is valid"),
    ]
});

// ────────────────────────────────────────────────────────────────────────────
// SkillSet
// ────────────────────────────────────────────────────────────────────────────

/// Lexicographically sorted skill tokens, unique ignoring case.
///
/// Every constructor enforces the invariant, including deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn contains_ignore_case(&self, skill: &str) -> bool {
        let wanted = skill.to_lowercase();
        self.0.iter().any(|s| s.to_lowercase() == wanted)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut acc = SkillAccumulator::default();
        for skill in iter {
            acc.insert(skill);
        }
        acc.finish()
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Default)]
struct SkillAccumulator {
    seen: HashSet<String>,
    skills: Vec<String>,
}

impl SkillAccumulator {
    fn insert(&mut self, skill: String) {
        if self.seen.insert(skill.to_lowercase()) {
            self.skills.push(skill);
        }
    }

    fn finish(self) -> SkillSet {
        let mut skills = self.skills;
        skills.sort();
        SkillSet(skills)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts the skill set mentioned in `text`. Pure; empty text yields an
/// empty set.
pub fn extract_skills(text: &str) -> SkillSet {
    let mut acc = SkillAccumulator::default();
    let lowered = text.to_lowercase();

    for pattern in SKILL_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            let skill = normalize_skill(found.as_str());
            if is_valid_skill(&skill) {
                acc.insert(skill);
            }
        }
    }
    let after_patterns = acc.skills.len();

    for skill in COMMON_SKILLS {
        if lowered.contains(&skill.to_lowercase()) {
            acc.insert(skill.to_string());
        }
    }
    let after_dictionary = acc.skills.len();

    for caps in PARENTHETICAL.captures_iter(text) {
        let group = caps.get(1).map_or("", |m| m.as_str());
        for piece in split_list(group) {
            if is_valid_skill(piece) {
                acc.insert(piece.to_string());
            }
        }
    }
    let after_parentheticals = acc.skills.len();

    for phrase in CONTEXT_PHRASES.iter() {
        for caps in phrase.captures_iter(text) {
            let remainder = caps.get(1).map_or("", |m| m.as_str());
            for piece in split_list(remainder) {
                let skill = normalize_skill(piece);
                if is_valid_skill(&skill) {
                    acc.insert(skill);
                }
            }
        }
    }

    debug!(
        patterns = after_patterns,
        dictionary = after_dictionary - after_patterns,
        parentheticals = after_parentheticals - after_dictionary,
        phrases = acc.skills.len() - after_parentheticals,
        "skills extracted"
    );

    acc.finish()
}

/// Splits a list on `, ; & /`, trimming pieces and dropping single characters.
fn split_list(list: &str) -> impl Iterator<Item = &str> {
    LIST_SEPARATOR
        .split(list)
        .map(str::trim)
        .filter(|piece| piece.chars().count() > 1)
}
