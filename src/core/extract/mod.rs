//! Fragment extraction: walk, filter, deduplicate.
//!
//! The walker yields every translatable text in document order, the set keeps
//! first occurrences, and the reducer removes fragments that overlap a more
//! specific one.

pub mod filter;
pub mod reducer;
pub mod walker;

use indexmap::IndexSet;

use crate::core::parsers::html::Document;

pub use filter::{is_translatable, normalize, to_fragment};
pub use reducer::reduce_duplicates;
pub use walker::FragmentWalker;

/// All distinct translatable texts of a document, in order of first occurrence.
pub fn collect_fragments(doc: &Document) -> IndexSet<String> {
    FragmentWalker::new(doc).collect()
}

/// The fragments of a document that receive translation keys.
pub fn extract_fragments(doc: &Document) -> Vec<String> {
    reduce_duplicates(&collect_fragments(doc))
}
