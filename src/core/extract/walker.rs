//! Document-order walk producing candidate fragments.

use crate::core::parsers::html::{Descendants, Document};

use super::filter::to_fragment;

/// Lazy, single-pass iterator over the translatable fragments of a document.
///
/// Every element and text node is visited in document order; its text
/// content (newlines stripped) is yielded when it passes the translatability
/// filter. Comments, declarations and script/style content never contribute.
/// The same text may be yielded more than once.
pub struct FragmentWalker<'a> {
    doc: &'a Document,
    nodes: Descendants<'a>,
}

impl<'a> FragmentWalker<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            nodes: doc.descendants(),
        }
    }
}

impl Iterator for FragmentWalker<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for id in self.nodes.by_ref() {
            let Some(content) = self.doc.text_content(id) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }
            if let Some(fragment) = to_fragment(&content) {
                return Some(fragment);
            }
        }
        None
    }
}
