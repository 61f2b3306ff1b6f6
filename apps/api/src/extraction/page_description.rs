//! Best-effort text recovery for page-description (PDF) documents.
//!
//! No attempt is made to honor the full file format. Three independent
//! strategies run in a fixed order and the first one producing at least
//! [`MIN_RECOVERED_CHARS`] characters wins. When none does, recovery yields an
//! empty string: malformed or image-only files are a silent, valid outcome.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::filters::{
    cleanup, is_meaningful, is_operator, looks_like_prose, passes_artifact_filter,
};

/// Minimum output length for a strategy to count as successful.
pub const MIN_RECOVERED_CHARS: usize = 100;

/// Printable runs longer than this survive an interrupting binary byte.
const LONG_RUN: usize = 20;

/// Shortest byte-scan chunk worth keeping.
const MIN_CHUNK_LEN: usize = 5;

/// Upper bound on indirect content references followed per document.
const MAX_CONTENT_REFS: usize = 256;

/// Result of a single recovery strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Recovered(String),
    Insufficient,
}

impl Outcome {
    fn from_text(text: String) -> Self {
        if text.chars().count() >= MIN_RECOVERED_CHARS {
            Outcome::Recovered(text)
        } else {
            Outcome::Insufficient
        }
    }
}

type Strategy = fn(&[u8]) -> Outcome;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("structural_stream", structural_stream),
    ("byte_scan", byte_scan),
    ("content_object", content_object),
];

static STREAM_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\bstream\r?\n(.*?)\r?\n?endstream").expect("stream block pattern is valid")
});

static HEX_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f\s]+$").expect("hex block pattern is valid"));

static HEX_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[0-9A-Fa-f\s]*>").expect("hex string pattern is valid"));

static CONTENTS_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/Contents\s*(\[[^\]]*\]|\d+\s+\d+\s+R)").expect("contents pattern is valid")
});

static INDIRECT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+(\d+)\s+R").expect("reference pattern is valid"));

/// Recovers the best available plain text from a page-description buffer.
///
/// Never fails: returns an empty string when every strategy comes up short.
pub fn recover_text(bytes: &[u8]) -> String {
    for (name, strategy) in STRATEGIES {
        match strategy(bytes) {
            Outcome::Recovered(text) => {
                debug!(
                    strategy = *name,
                    chars = text.chars().count(),
                    "page-description text recovered"
                );
                return text;
            }
            Outcome::Insufficient => {
                debug!(strategy = *name, "strategy yielded insufficient text");
            }
        }
    }
    String::new()
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy 1: structural streams
// ────────────────────────────────────────────────────────────────────────────

/// Scans `stream … endstream` blocks, using each block as a hex payload, as
/// prose, or as a source of string literals. Literals outside blocks are
/// collected as well.
fn structural_stream(bytes: &[u8]) -> Outcome {
    let text = decode_permissive(bytes);
    let mut fragments: Vec<String> = Vec::new();

    for caps in STREAM_BLOCK.captures_iter(&text) {
        let block = caps.get(1).map_or("", |m| m.as_str()).trim();
        if block.is_empty() {
            continue;
        }
        // Hex payloads are checked first: a spaced hex dump can pass as prose.
        if HEX_BLOCK.is_match(block) {
            if let Some(decoded) = decode_hex_block(block).filter(|d| is_meaningful(d)) {
                fragments.push(decoded);
            }
        } else if looks_like_prose(block) {
            fragments.push(block.to_string());
        } else {
            fragments.extend(string_literals(block).into_iter().filter(|l| is_meaningful(l)));
        }
    }

    let outside = STREAM_BLOCK.replace_all(&text, " ");
    fragments.extend(
        string_literals(&outside)
            .into_iter()
            .filter(|l| is_meaningful(l)),
    );

    Outcome::from_text(cleanup(&fragments.join(" ")))
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy 2: printable byte runs
// ────────────────────────────────────────────────────────────────────────────

/// Collects printable ASCII runs. Line breaks and tabs end a run; any other
/// byte ends it only once it is longer than [`LONG_RUN`], and otherwise acts
/// as a word break. Zero bytes padding UTF-16 code units are skipped.
fn byte_scan(bytes: &[u8]) -> Outcome {
    let mut kept: Vec<String> = Vec::new();
    let mut chunk = String::new();

    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            32..=126 => chunk.push(byte as char),
            b'\n' | b'\r' | b'\t' => flush_chunk(&mut chunk, &mut kept),
            0 if is_code_unit_padding(bytes, i) => {}
            _ if chunk.len() > LONG_RUN => flush_chunk(&mut chunk, &mut kept),
            _ => {
                if !chunk.is_empty() && !chunk.ends_with(' ') {
                    chunk.push(' ');
                }
            }
        }
    }
    flush_chunk(&mut chunk, &mut kept);

    Outcome::from_text(cleanup(&kept.join(" ")))
}

/// A zero byte followed by a printable byte and another zero, as in
/// `\0S\0e` (UTF-16BE) or the middle of `S\0e\0` (UTF-16LE).
fn is_code_unit_padding(bytes: &[u8], i: usize) -> bool {
    matches!(bytes.get(i + 1), Some(32..=126)) && bytes.get(i + 2) == Some(&0)
}

fn flush_chunk(chunk: &mut String, kept: &mut Vec<String>) {
    let trimmed = chunk.trim();
    if trimmed.len() >= MIN_CHUNK_LEN && passes_artifact_filter(trimmed) {
        kept.push(trimmed.to_string());
    }
    chunk.clear();
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy 3: content objects
// ────────────────────────────────────────────────────────────────────────────

/// Follows `/Contents` references to their objects and pulls string literals
/// out of the referenced streams.
fn content_object(bytes: &[u8]) -> Outcome {
    let text = decode_permissive(bytes);
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut fragments: Vec<String> = Vec::new();

    let references = CONTENTS_ENTRY
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1))
        .flat_map(|entry| INDIRECT_REF.captures_iter(entry.as_str()))
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
            let generation = caps.get(2)?.as_str().parse::<u32>().ok()?;
            Some((number, generation))
        })
        .take(MAX_CONTENT_REFS);

    for reference in references {
        if !seen.insert(reference) {
            continue;
        }
        let Some(body) = resolve_stream(&text, reference) else {
            continue;
        };
        let body = HEX_STRING.replace_all(body, " ");
        let body = strip_operators(&body);
        fragments.extend(string_literals(&body).into_iter().filter(|l| is_meaningful(l)));
    }

    Outcome::from_text(fragments.join(" "))
}

/// Locates `N G obj … endobj` and returns its stream body, if any.
fn resolve_stream(text: &str, (number, generation): (u32, u32)) -> Option<&str> {
    let header = Regex::new(&format!(r"\b{number}\s+{generation}\s+obj\b")).ok()?;
    let start = header.find(text)?.end();
    let rest = &text[start..];
    let object = rest.find("endobj").map_or(rest, |end| &rest[..end]);
    STREAM_BLOCK
        .captures(object)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn strip_operators(body: &str) -> String {
    body.split_whitespace()
        .filter(|token| !is_operator(token))
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Low-level decoding helpers
// ────────────────────────────────────────────────────────────────────────────

/// Maps every byte to the code point of the same value, so no input is
/// rejected and byte offsets stay meaningful.
fn decode_permissive(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Decodes a whitespace-separated hex payload, keeping printable characters.
fn decode_hex_block(block: &str) -> Option<String> {
    let digits: Vec<u8> = block
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    if digits.is_empty() {
        return None;
    }
    let decoded: String = digits
        .chunks(2)
        .map(|pair| {
            let high = pair[0];
            let low = pair.get(1).copied().unwrap_or(0);
            let byte = (high << 4) | low;
            if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                ' '
            }
        })
        .collect();
    let trimmed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Extracts parenthesized string literals, honoring escapes and balanced
/// nested parentheses. An unterminated literal at end of input is dropped.
pub(crate) fn string_literals(text: &str) -> Vec<String> {
    let mut literals = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '(' {
            continue;
        }
        let mut depth = 1usize;
        let mut literal = String::new();
        let mut closed = false;

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => literal.push('\n'),
                    Some('r') => literal.push('\r'),
                    Some('t') => literal.push('\t'),
                    Some('b') | Some('f') => literal.push(' '),
                    Some('\n') | Some('\r') => {}
                    Some(d @ '0'..='7') => {
                        let mut value = d.to_digit(8).unwrap_or(0);
                        for _ in 0..2 {
                            match chars.peek().and_then(|n| n.to_digit(8)) {
                                Some(next) => {
                                    value = value * 8 + next;
                                    chars.next();
                                }
                                None => break,
                            }
                        }
                        literal.push(char::from((value & 0xFF) as u8));
                    }
                    Some(other) => literal.push(other),
                    None => break,
                },
                '(' => {
                    depth += 1;
                    literal.push(c);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        closed = true;
                        break;
                    }
                    literal.push(c);
                }
                _ => literal.push(c),
            }
        }

        if closed {
            literals.push(literal.trim().to_string());
        }
    }

    literals
}
