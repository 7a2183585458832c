//! Choice answer normalization
//!
//! Users answer choice questions in many shapes: bare labels (`"B,C"`,
//! `"b|c"`), the option texts themselves, or option texts still carrying a
//! label prefix (`"A. Paris"`). Everything here reduces to one canonical
//! form: the sorted, deduplicated label string (`"BC"`), so that two
//! answers can be compared with plain string equality.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MAX_CHOICE_OPTIONS;

/// Token separators: newline, comma (ASCII or full-width), ideographic
/// comma, pipe, semicolon (ASCII or full-width), slash.
static SPLIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\r,，、|；;/]+").expect("valid split regex"));

/// Label prefix on an option text: a single letter followed by an optional
/// separator such as `.`, `)`, `、`, `:`, `：` or `-`.
static OPTION_PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[A-Za-z]\s*(?:[.、:：-]|[)）])?\s*").expect("valid prefix regex")
});

/// Normalize raw answer text to a sorted label string such as `"BC"`.
///
/// Returns `None` if the input is empty or no token resolves to a valid
/// label. Pure and deterministic for a given `(answer, options)` pair.
pub fn normalize(answer: &str, options: Option<&[String]>) -> Option<String> {
    let text = answer.trim();
    if text.is_empty() {
        return None;
    }

    let tokens = split_tokens(text);
    let valid_labels = build_valid_labels(options);
    let option_text_map = build_option_text_map(options);

    let mut letters: Vec<char> = Vec::new();
    for token in tokens {
        let extracted = extract_letters_from_token(token, &valid_labels);
        if !extracted.is_empty() {
            letters.extend(extracted);
            continue;
        }

        if let Some(&label) = option_text_map.get(&token.to_lowercase()) {
            letters.push(label);
            continue;
        }

        let stripped = strip_option_prefix(token);
        if !stripped.is_empty() {
            if let Some(&label) = option_text_map.get(&stripped.to_lowercase()) {
                letters.push(label);
            }
        }
    }

    let filtered: BTreeSet<char> = letters
        .into_iter()
        .filter(|c| valid_labels.contains(c))
        .collect();
    if filtered.is_empty() {
        return None;
    }

    Some(filtered.into_iter().collect())
}

fn split_tokens(value: &str) -> Vec<&str> {
    let tokens: Vec<&str> = SPLIT_PATTERN
        .split(value)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        vec![value.trim()]
    } else {
        tokens
    }
}

/// Labels are positional: option 0 is "A", option 1 is "B", capped at 26.
/// With no option list the full alphabet is valid.
fn build_valid_labels(options: Option<&[String]>) -> HashSet<char> {
    let count = match options {
        Some(opts) if !opts.is_empty() => opts.len().min(MAX_CHOICE_OPTIONS),
        _ => MAX_CHOICE_OPTIONS,
    };
    ('A'..='Z').take(count).collect()
}

/// Map lowercased option texts (full, and with label prefixes stripped)
/// to their positional label. For duplicate full texts the last option
/// wins; for duplicate stripped texts the first wins.
fn build_option_text_map(options: Option<&[String]>) -> HashMap<String, char> {
    let mut mapping = HashMap::new();
    let Some(opts) = options else {
        return mapping;
    };
    for (index, raw) in opts.iter().enumerate().take(MAX_CHOICE_OPTIONS) {
        let label = (b'A' + index as u8) as char;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        mapping.insert(text.to_lowercase(), label);
        let stripped = strip_option_prefix(text);
        if !stripped.is_empty() {
            mapping.entry(stripped.to_lowercase()).or_insert(label);
        }
    }
    mapping
}

fn strip_option_prefix(value: &str) -> String {
    OPTION_PREFIX_PATTERN.replace(value, "").trim().to_string()
}

/// Try to read a token as a sequence of labels. A single letter must be a
/// valid label; a multi-letter run counts only if every letter is valid,
/// so option text like "Paris" is not mistaken for labels.
fn extract_letters_from_token(token: &str, valid_labels: &HashSet<char>) -> Vec<char> {
    let letters_only: Vec<char> = token
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .collect();
    if letters_only.is_empty() {
        return Vec::new();
    }

    if letters_only.len() == 1 {
        let letter = letters_only[0];
        if valid_labels.contains(&letter) {
            return vec![letter];
        }
        return Vec::new();
    }

    if letters_only.iter().any(|c| !valid_labels.contains(c)) {
        return Vec::new();
    }

    let mut ordered = Vec::new();
    for c in letters_only {
        if !ordered.contains(&c) {
            ordered.push(c);
        }
    }
    ordered
}
