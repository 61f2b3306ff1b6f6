//! Shared text-quality predicates for page-description recovery.
//!
//! Every recovery strategy filters its fragments through these functions so the
//! notion of "meaningful text" stays identical across strategies.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Structural, font, encoding and generator-tool vocabulary that shows up as
/// readable ASCII inside page-description files but is never document content.
const STRUCTURAL_ARTIFACTS: &[&str] = &[
    "obj",
    "endobj",
    "stream",
    "endstream",
    "xref",
    "startxref",
    "trailer",
    "null",
    "false",
    "true",
    "r",
    "type",
    "subtype",
    "catalog",
    "pages",
    "page",
    "parent",
    "kids",
    "count",
    "root",
    "info",
    "resources",
    "contents",
    "mediabox",
    "rotate",
    "trans",
    "pagemode",
    "usenone",
    "procset",
    "pdf",
    "text",
    "imageb",
    "imagec",
    "imagei",
    "xobject",
    "filter",
    "flatedecode",
    "ascii85decode",
    "length",
    "font",
    "basefont",
    "fontdescriptor",
    "encoding",
    "winansiencoding",
    "helvetica",
    "subject",
    "title",
    "trapped",
    "producer",
    "creator",
    "creationdate",
    "moddate",
    "reportlab",
    "generated",
    "document",
    "digest",
    "anonymous",
    "unspecified",
    "http",
    "www",
];

/// Drawing and text-positioning operators of the page-description language.
pub(crate) const OPERATOR_TOKENS: &[&str] = &[
    "BT", "ET", "Tj", "TJ", "Td", "TD", "Tf", "Tm", "T*", "Tc", "Tw", "Tz", "TL", "Tr", "Ts",
    "cm", "re", "rg", "RG", "gs", "Do", "BI", "ID", "EI", "q", "Q", "f", "F", "S", "s", "n",
    "W", "B", "b", "h", "l", "m", "c", "v", "y", "w", "j", "J", "d", "i", "M", "k", "K", "g",
    "G",
];

/// Text-object operators. A block containing any of these is a content
/// stream, not prose.
const TEXT_OPERATORS: &[&str] = &["BT", "ET", "Tj", "TJ", "Td", "TD", "Tf", "Tm", "T*"];

static COORDINATE_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?\d+(?:\.\d+)?\s+-?\d+(?:\.\d+)?\s+-?\d+(?:\.\d+)?\s+-?\d+(?:\.\d+)?")
        .expect("coordinate pattern is valid")
});

static FONT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/F\d+(?:\s+\d+(?:\.\d+)?\s+Tf)?").expect("font reference pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Returns true when at least half of the alphabetic words in `text` are
/// structural vocabulary. Prose that merely mentions one such word survives.
pub fn is_structural_artifact(text: &str) -> bool {
    let words: Vec<String> = text
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    if words.is_empty() {
        return false;
    }
    let artifacts = words
        .iter()
        .filter(|w| STRUCTURAL_ARTIFACTS.contains(&w.as_str()))
        .count();
    artifacts * 2 >= words.len()
}

/// Decides whether a recovered fragment reads like document text.
///
/// Rejects fragments that are too short, contain no letters, consist of
/// structural vocabulary, look like hex dumps, look like random noise (high
/// distinct-character ratio) or are dominated by punctuation.
pub fn is_meaningful(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();

    if len < 3 {
        return false;
    }
    if !text.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    if is_structural_artifact(text) {
        return false;
    }
    if len > 4 && is_hex(text) {
        return false;
    }
    if len > 5 {
        let distinct: HashSet<char> = text.to_lowercase().chars().collect();
        if distinct.len() as f64 / len as f64 > 0.8 {
            return false;
        }
    }
    let special = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    special as f64 / len as f64 <= 0.3
}

/// Byte-scan variant: only the structural checks, no entropy heuristics.
pub fn passes_artifact_filter(text: &str) -> bool {
    !is_structural_artifact(text) && !is_numeric(text) && !is_hex(text)
}

/// True when the block already reads as prose and carries no text operators.
pub fn looks_like_prose(block: &str) -> bool {
    is_meaningful(block)
        && !block
            .split_whitespace()
            .any(|token| TEXT_OPERATORS.contains(&token))
}

/// Normalizes recovered text: collapses whitespace, strips coordinate
/// quadruples, font references and operator tokens, then drops standalone
/// tokens of two characters or fewer.
pub fn cleanup(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let without_coords = COORDINATE_QUAD.replace_all(&collapsed, " ");
    let without_fonts = FONT_REFERENCE.replace_all(&without_coords, " ");

    without_fonts
        .split_whitespace()
        .filter(|token| !OPERATOR_TOKENS.contains(token))
        .filter(|token| token.chars().count() > 2)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn is_operator(token: &str) -> bool {
    OPERATOR_TOKENS.contains(&token)
}

fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
