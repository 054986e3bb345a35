//! Per-module aggregation of generated keys.

use indexmap::IndexMap;
use serde::Serialize;

use super::keys::FileKeys;

/// Key to text, in insertion order.
pub type ModuleTable = IndexMap<String, String>;

/// Module to table, in insertion order. This is the manifest shape.
pub type TranslationTable = IndexMap<String, ModuleTable>;

/// A key that already existed in a module with a different text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub module: String,
    pub key: String,
    pub previous: String,
    pub current: String,
}

/// All keys collected during one migration run, grouped by module.
///
/// Files without a module share the `""` bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationIndex {
    modules: TranslationTable,
}

impl TranslationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer a file's keys on top of the module's table.
    ///
    /// New keys are appended; an existing key takes the new text. Keys whose
    /// text changed are returned so the caller can report them.
    pub fn merge(&mut self, module: &str, keys: &FileKeys) -> Vec<KeyCollision> {
        if keys.is_empty() {
            return Vec::new();
        }

        let table = self.modules.entry(module.to_string()).or_default();
        let mut collisions = Vec::new();
        for (key, text) in keys.iter() {
            if let Some(previous) = table.insert(key.to_string(), text.to_string())
                && previous != text
            {
                collisions.push(KeyCollision {
                    module: module.to_string(),
                    key: key.to_string(),
                    previous,
                    current: text.to_string(),
                });
            }
        }
        collisions
    }

    pub fn module(&self, module: &str) -> Option<&ModuleTable> {
        self.modules.get(module)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Total number of keys across all modules.
    pub fn key_count(&self) -> usize {
        self.modules.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Flatten into the module → key → text structure written to the manifest.
    pub fn to_table(&self) -> TranslationTable {
        self.modules.clone()
    }
}
