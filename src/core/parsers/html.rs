//! Lenient, span-preserving HTML template parser.
//!
//! The parser never fails: malformed markup degrades to text, unmatched end
//! tags are dropped and unclosed elements run to the end of the input. Every
//! node remembers its byte range in the source so callers can splice new
//! content back into the file without re-serializing the markup (Angular
//! templates use case-sensitive binding names like `[ngModel]` that a
//! normalizing serializer would destroy).

use std::ops::Range;

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic root spanning the whole source.
    Document,
    /// An element; the name is lowercased.
    Element { name: String },
    Text,
    /// Content of `<script>` or `<style>`.
    RawText,
    Comment,
    /// `<!DOCTYPE ...>`, `<?xml ...?>` and other `<!`/`<?` constructs.
    Declaration,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    span: Range<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Position within the parent's children.
    position: usize,
}

/// A parsed HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    nodes: Vec<NodeData>,
}

impl Document {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let nodes = Parser::new(&source).parse();
        Self { source, nodes }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Byte range of the node in the source.
    pub fn span(&self, id: NodeId) -> Range<usize> {
        self.nodes[id.0].span.clone()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.first().copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        let parent = node.parent?;
        self.nodes[parent.0].children.get(node.position + 1).copied()
    }

    /// The node following `id` in document order: its first child, else its
    /// next sibling, else the next sibling of the nearest ancestor that has one.
    pub fn next_in_document_order(&self, id: NodeId) -> Option<NodeId> {
        if let Some(child) = self.first_child(id) {
            return Some(child);
        }
        let mut current = id;
        loop {
            if let Some(sibling) = self.next_sibling(current) {
                return Some(sibling);
            }
            current = self.parent(current)?;
        }
    }

    /// Pre-order iterator over every node, starting with the root.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            next: Some(self.root()),
        }
    }

    /// Verbatim source of a text node.
    pub fn raw_text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text => Some(&self.source[self.span(id)]),
            _ => None,
        }
    }

    /// DOM-style `textContent`: the concatenated text of all descendant text
    /// nodes. `None` for nodes that carry no text (root, comments,
    /// declarations, raw text).
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        match self.kind(id) {
            NodeKind::Text => self.raw_text(id).map(str::to_string),
            NodeKind::Element { .. } => {
                let mut out = String::new();
                self.collect_text(id, &mut out);
                Some(out)
            }
            _ => None,
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            match self.kind(child) {
                NodeKind::Text => out.push_str(&self.source[self.span(child)]),
                NodeKind::Element { .. } => self.collect_text(child, out),
                _ => {}
            }
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

/// Iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.next_in_document_order(current);
        Some(current)
    }
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    nodes: Vec<NodeData>,
    /// Open elements; the root is always at the bottom.
    stack: Vec<NodeId>,
    text_start: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            nodes: Vec::new(),
            stack: Vec::new(),
            text_start: None,
        }
    }

    fn parse(mut self) -> Vec<NodeData> {
        let len = self.bytes.len();
        self.nodes.push(NodeData {
            kind: NodeKind::Document,
            span: 0..len,
            parent: None,
            children: Vec::new(),
            position: 0,
        });
        self.stack.push(NodeId(0));

        while self.pos < len {
            let byte = self.bytes[self.pos];
            match byte {
                b'<' if self.try_markup() => continue,
                b'{' if self.source[self.pos..].starts_with("{{") => {
                    // Interpolations are text even when they contain `<`.
                    self.text_start.get_or_insert(self.pos);
                    self.pos = self.source[self.pos + 2..]
                        .find("}}")
                        .map_or(len, |i| self.pos + 2 + i + 2);
                }
                _ => {
                    self.text_start.get_or_insert(self.pos);
                    self.pos += 1;
                }
            }
        }

        self.flush_text(len);
        while self.stack.len() > 1 {
            if let Some(id) = self.stack.pop() {
                self.nodes[id.0].span.end = len;
            }
        }
        self.nodes
    }

    fn try_markup(&mut self) -> bool {
        let start = self.pos;
        let len = self.bytes.len();
        let source = self.source;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            let end = rest[4..].find("-->").map_or(len, |i| start + 4 + i + 3);
            self.flush_text(start);
            self.push_node(NodeKind::Comment, start..end);
            self.pos = end;
            return true;
        }

        match self.bytes.get(start + 1) {
            Some(b'!' | b'?') => {
                let end = self.find_tag_end(start);
                self.flush_text(start);
                self.push_node(NodeKind::Declaration, start..end);
                self.pos = end;
                true
            }
            Some(b'/') => match self.bytes.get(start + 2) {
                Some(c) if c.is_ascii_alphabetic() => {
                    self.parse_end_tag();
                    true
                }
                _ => false,
            },
            Some(c) if c.is_ascii_alphabetic() => {
                self.parse_start_tag();
                true
            }
            _ => false,
        }
    }

    fn parse_start_tag(&mut self) {
        let start = self.pos;
        let len = self.bytes.len();
        self.flush_text(start);

        let name_end = self.scan_name(start + 1);
        let name = self.source[start + 1..name_end].to_ascii_lowercase();

        let mut i = name_end;
        let mut self_closing = false;
        while i < len {
            match self.bytes[i] {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' if self.bytes.get(i + 1) == Some(&b'>') => {
                    self_closing = true;
                    i += 2;
                    break;
                }
                quote @ (b'"' | b'\'') => {
                    i += 1;
                    while i < len && self.bytes[i] != quote {
                        i += 1;
                    }
                    i = (i + 1).min(len);
                }
                _ => i += 1,
            }
        }

        let is_void = VOID_ELEMENTS.contains(&name.as_str());
        let is_raw = RAW_TEXT_ELEMENTS.contains(&name.as_str());
        let id = self.push_node(NodeKind::Element { name: name.clone() }, start..i);

        if self_closing || is_void {
            self.pos = i;
        } else if is_raw {
            let closing = format!("</{}", name);
            let content_end = self.source[i..]
                .to_ascii_lowercase()
                .find(&closing)
                .map_or(len, |offset| i + offset);
            if content_end > i {
                self.stack.push(id);
                self.push_node(NodeKind::RawText, i..content_end);
                self.stack.pop();
            }
            let end = if content_end < len {
                self.find_tag_end(content_end)
            } else {
                len
            };
            self.nodes[id.0].span.end = end;
            self.pos = end;
        } else {
            self.stack.push(id);
            self.pos = i;
        }
    }

    fn parse_end_tag(&mut self) {
        let start = self.pos;
        let source = self.source;
        let name_end = self.scan_name(start + 2);
        let name = &source[start + 2..name_end];
        let end = self.find_tag_end(start);
        self.flush_text(start);

        let open = self.stack.iter().skip(1).rposition(|id| {
            matches!(&self.nodes[id.0].kind, NodeKind::Element { name: open } if open.eq_ignore_ascii_case(name))
        });

        if let Some(index) = open {
            // Skip the root when translating back to a stack index.
            let index = index + 1;
            while self.stack.len() > index + 1 {
                if let Some(id) = self.stack.pop() {
                    self.nodes[id.0].span.end = start;
                }
            }
            if let Some(id) = self.stack.pop() {
                self.nodes[id.0].span.end = end;
            }
        }
        self.pos = end;
    }

    fn scan_name(&self, from: usize) -> usize {
        let mut i = from;
        while i < self.bytes.len() {
            let c = self.bytes[i];
            if c.is_ascii_whitespace() || c == b'/' || c == b'>' {
                break;
            }
            i += 1;
        }
        i
    }

    /// Position just past the next `>` at or after `from`, or end of input.
    fn find_tag_end(&self, from: usize) -> usize {
        self.source[from..]
            .find('>')
            .map_or(self.bytes.len(), |i| from + i + 1)
    }

    fn flush_text(&mut self, end: usize) {
        if let Some(start) = self.text_start.take()
            && start < end
        {
            self.push_node(NodeKind::Text, start..end);
        }
    }

    fn push_node(&mut self, kind: NodeKind, span: Range<usize>) -> NodeId {
        let parent = self.stack.last().copied().unwrap_or(NodeId(0));
        let id = NodeId(self.nodes.len());
        let position = self.nodes[parent.0].children.len();
        self.nodes.push(NodeData {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
            position,
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}
