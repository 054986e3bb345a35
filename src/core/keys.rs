//! Translation key generation and path-derived identifiers.

use std::path::Path;

use indexmap::IndexMap;

/// How keys are built for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOptions {
    /// Minimum number of digits in the numeric suffix.
    pub padding: usize,
    /// Prefix keys with the module identifier (`AUTH_LOGIN_000`).
    pub module_prefixed: bool,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            padding: 3,
            module_prefixed: false,
        }
    }
}

/// Uppercase identifier for a path segment: the part before the first `.`,
/// with `-` replaced by `_`.
///
/// ```
/// use ngmig::core::keys::segment_identifier;
///
/// assert_eq!(segment_identifier("user-profile"), "USER_PROFILE");
/// assert_eq!(segment_identifier("shared.module.ts"), "SHARED");
/// ```
pub fn segment_identifier(segment: &str) -> String {
    let name = segment.split('.').next().unwrap_or_default();
    name.to_uppercase().replace('-', "_")
}

/// File identifier: the base name without its extension, uppercased, with
/// `-` and `.` replaced by `_`.
///
/// ```
/// use std::path::Path;
/// use ngmig::core::keys::file_id;
///
/// assert_eq!(file_id(Path::new("src/app/auth/login.component.html")), "LOGIN_COMPONENT");
/// assert_eq!(file_id(Path::new("nav-bar.html")), "NAV_BAR");
/// ```
pub fn file_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    stem.to_uppercase().replace(['-', '.'], "_")
}

/// Module identifier: the segment following the first `marker` directory in
/// the path, or an empty string when the path has no such segment.
///
/// A relative path is read as if resolved against the working directory, so a
/// marker in its leading segment counts: `app/auth/x.html` is in `AUTH`.
///
/// Both `/` and `\` separate segments so Windows-style paths resolve the same way.
pub fn module_id(path: &Path, marker: &str) -> String {
    let path = path.to_string_lossy();
    let segments: Vec<&str> = path.split(['/', '\\']).collect();

    segments
        .iter()
        .position(|segment| *segment == marker)
        .and_then(|index| segments.get(index + 1))
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment_identifier(segment))
        .unwrap_or_default()
}

/// Prefix shared by all keys of one file.
pub fn key_prefix(file_id: &str, module_id: &str, options: &KeyOptions) -> String {
    if options.module_prefixed && !module_id.is_empty() {
        format!("{}_{}", module_id, file_id)
    } else {
        file_id.to_string()
    }
}

/// `<prefix>_<index>` with the index zero-padded to `padding` digits. Indices
/// that need more digits are written in full.
pub fn format_key(prefix: &str, index: usize, padding: usize) -> String {
    format!("{}_{:0width$}", prefix, index, width = padding)
}

/// Keys assigned to the fragments of one file, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileKeys {
    entries: IndexMap<String, String>,
}

impl FileKeys {
    /// Number the distinct fragments from zero in the given order.
    ///
    /// Texts that differ only in leading or trailing whitespace are the same
    /// text: the first occurrence keeps the key and no index is skipped.
    pub fn generate(fragments: &[String], prefix: &str, padding: usize) -> Self {
        let mut entries: IndexMap<String, String> = IndexMap::with_capacity(fragments.len());
        for text in fragments {
            if entries.values().any(|existing| existing.trim() == text.trim()) {
                continue;
            }
            entries.insert(format_key(prefix, entries.len(), padding), text.clone());
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Key assigned to `text`, if any. Surrounding whitespace is ignored.
    pub fn key_for(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, value)| value.trim() == text.trim())
            .map(|(key, _)| key.as_str())
    }

    /// `(key, text)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
