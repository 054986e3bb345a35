//! In-place substitution of translation tokens into template source.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::extract::normalize;
use super::keys::FileKeys;
use super::parsers::html::Document;

/// Substitution produced nothing that can be written back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplacementError {
    #[error("no text node matched the extracted texts")]
    NoChange,
    #[error("replacement produced empty content")]
    EmptyOutput,
}

/// Result of a successful rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Number of text nodes replaced.
    pub replaced: usize,
    /// Keys whose text matched no single text node, in key order. Their text
    /// is spread over several nodes and stays in the template.
    pub unreplaced: Vec<String>,
}

/// The pipe expression that replaces a text.
pub fn translation_token(module: &str, key: &str) -> String {
    format!("{{{{ '{}.{}' | translate }}}}", module, key)
}

/// Replace every text node whose normalized content is one of the file's
/// texts with its translation token.
///
/// Texts are compared without surrounding whitespace, so a text written on
/// one line and the same text spread over indented lines share a key. Only
/// text nodes are touched; attributes, comments and the rest of the source
/// stay byte-identical, and the whitespace around each replaced text is kept.
pub fn rewrite_document(
    doc: &Document,
    keys: &FileKeys,
    module: &str,
) -> Result<Rewrite, ReplacementError> {
    let mut lookup: HashMap<&str, &str> = HashMap::with_capacity(keys.len());
    for (key, text) in keys.iter() {
        lookup.entry(text.trim()).or_insert(key);
    }
    let source = doc.source();

    let mut content = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut replaced = 0;
    let mut used: HashSet<&str> = HashSet::new();

    for id in doc.descendants() {
        let Some(raw) = doc.raw_text(id) else {
            continue;
        };
        let Some(&key) = lookup.get(normalize(raw).trim()) else {
            continue;
        };
        used.insert(key);

        let span = doc.span(id);
        let start = span.start + (raw.len() - raw.trim_start().len());
        let end = span.start + raw.trim_end().len();
        if start >= end {
            continue;
        }

        let token = translation_token(module, key);
        if source[start..end] == token {
            continue;
        }

        content.push_str(&source[cursor..start]);
        content.push_str(&token);
        cursor = end;
        replaced += 1;
    }
    content.push_str(&source[cursor..]);

    if replaced == 0 || content == source {
        return Err(ReplacementError::NoChange);
    }
    if content.trim().is_empty() {
        return Err(ReplacementError::EmptyOutput);
    }

    let unreplaced = keys
        .iter()
        .map(|(key, _)| key)
        .filter(|key| !used.contains(key))
        .map(str::to_string)
        .collect();

    Ok(Rewrite {
        content,
        replaced,
        unreplaced,
    })
}
