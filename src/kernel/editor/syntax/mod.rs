//! Syntax support (in-process): rule tables, parsing and highlighting helpers.

mod anchor;
mod js;
mod util;

use self::util::{is_comment_kind, is_regex_kind, is_string_kind};
use ropey::Rope;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use tree_sitter::{InputEdit, Language, Node, Parser, Point, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SyntaxColorGroup {
    Comment = 0,
    String = 1,
    Regex = 2,
    Keyword = 3,
    KeywordControl = 4,
    Type = 5,
    Number = 6,
    Function = 7,
    Macro = 8,
    Namespace = 9,
    Variable = 10,
    Constant = 11,
    Attribute = 12,
    Operator = 13,
    Tag = 14,
}

impl SyntaxColorGroup {
    pub const COUNT: usize = 15;
}

const _: () = assert!(SyntaxColorGroup::Tag as usize == SyntaxColorGroup::COUNT - 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HighlightKind {
    Comment = 0,
    String = 1,
    Regex = 2,
    Keyword = 3,
    KeywordControl = 4,
    KeywordOperator = 5,
    Type = 6,
    TypeBuiltin = 7,
    Number = 8,
    Boolean = 9,
    Function = 10,
    Method = 11,
    Macro = 12,
    Namespace = 13,
    Variable = 14,
    Parameter = 15,
    Property = 16,
    Constant = 17,
    Attribute = 18,
    Lifetime = 19,
    Operator = 20,
    Tag = 21,
    TagAttribute = 22,
}

impl HighlightKind {
    pub const COUNT: usize = 23;

    /// Tree traversal should skip the node's children when a highlight kind is a "leaf".
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::Comment | Self::String | Self::Regex | Self::Attribute
        )
    }

    pub const fn color_group(self) -> SyntaxColorGroup {
        match self {
            Self::Comment => SyntaxColorGroup::Comment,
            Self::String => SyntaxColorGroup::String,
            Self::Regex => SyntaxColorGroup::Regex,
            Self::Keyword | Self::KeywordOperator | Self::Boolean | Self::Lifetime => {
                SyntaxColorGroup::Keyword
            }
            Self::KeywordControl => SyntaxColorGroup::KeywordControl,
            Self::Type | Self::TypeBuiltin => SyntaxColorGroup::Type,
            Self::Number => SyntaxColorGroup::Number,
            Self::Function | Self::Method => SyntaxColorGroup::Function,
            Self::Macro => SyntaxColorGroup::Macro,
            Self::Namespace => SyntaxColorGroup::Namespace,
            Self::Variable | Self::Parameter | Self::Property => SyntaxColorGroup::Variable,
            Self::Constant => SyntaxColorGroup::Constant,
            Self::Attribute | Self::TagAttribute => SyntaxColorGroup::Attribute,
            Self::Operator => SyntaxColorGroup::Operator,
            Self::Tag => SyntaxColorGroup::Tag,
        }
    }
}

const _: () = assert!(HighlightKind::TagAttribute as usize == HighlightKind::COUNT - 1);

/// A highlighting rule table: a grammar plus the classifiers that map its nodes to
/// highlight kinds.
///
/// Tables are `static` items; modes hold `&'static HighlightRules` so every session
/// of a language shares one table.
pub struct HighlightRules {
    pub name: &'static str,
    grammar: fn() -> Language,
    classify: fn(Node<'_>, &Rope) -> Option<HighlightKind>,
    is_keyword: fn(&str) -> bool,
}

impl HighlightRules {
    pub fn grammar(&self) -> Language {
        (self.grammar)()
    }

    fn parser(&self) -> Option<Parser> {
        let mut parser = Parser::new();
        if let Err(err) = parser.set_language(self.grammar()) {
            tracing::warn!(rules = self.name, error = %err, "grammar rejected by parser");
            return None;
        }
        Some(parser)
    }
}

impl fmt::Debug for HighlightRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightRules")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub static JAVASCRIPT_HIGHLIGHT_RULES: HighlightRules = HighlightRules {
    name: "javascript",
    grammar: tree_sitter_javascript::language,
    classify: js::classify,
    is_keyword: js::is_keyword,
};

pub static ANCHOR_HIGHLIGHT_RULES: HighlightRules = HighlightRules {
    name: "anchor",
    grammar: tree_sitter_rust::language,
    classify: anchor::classify,
    is_keyword: anchor::is_keyword,
};

/// `start..end` are byte offsets within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: HighlightKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AbsHighlightSpan {
    start: usize,
    end: usize,
    kind: HighlightKind,
    depth: usize,
}

/// A parse failure reported by the grammar: an `ERROR` node or a node the parser had
/// to insert (`MISSING`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorNode {
    pub row: usize,
    pub column: usize,
    pub missing: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Comment,
    String,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralRange {
    pub kind: LiteralKind,
    pub start_byte: usize,
    pub end_byte: usize,
}

pub struct SyntaxDocument {
    rules: &'static HighlightRules,
    parser: Parser,
    tree: Tree,
}

impl SyntaxDocument {
    pub fn new(rules: &'static HighlightRules, rope: &Rope) -> Option<Self> {
        let mut parser = rules.parser()?;
        let tree = parse_rope(&mut parser, rope, None)?;
        Some(Self {
            rules,
            parser,
            tree,
        })
    }

    pub fn rules(&self) -> &'static HighlightRules {
        self.rules
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn reparse(&mut self, rope: &Rope) {
        if let Some(tree) = parse_rope(&mut self.parser, rope, None) {
            self.tree = tree;
        }
    }

    /// Apply a text replacement that has already been performed on `rope`.
    ///
    /// `start_char` is the char offset of the edit, `old_text` the removed text and
    /// `new_text` the inserted text.
    pub fn apply_edit(&mut self, rope: &Rope, start_char: usize, old_text: &str, new_text: &str) {
        let Some(edit) = build_input_edit(rope, start_char, old_text, new_text) else {
            self.reparse(rope);
            return;
        };

        self.tree.edit(&edit);
        match parse_rope(&mut self.parser, rope, Some(&self.tree)) {
            Some(tree) => self.tree = tree,
            None => self.reparse(rope),
        }
    }

    /// Whether the byte at `byte_offset` belongs to a string, comment or regex literal.
    pub fn is_in_string_or_comment(&self, byte_offset: usize) -> bool {
        self.literal_at(byte_offset).is_some()
    }

    /// The outermost string, comment or regex node holding the byte at `byte_offset`.
    pub fn literal_at(&self, byte_offset: usize) -> Option<LiteralRange> {
        let root = self.tree.root_node();
        // A one-byte range so a token that merely ends at `byte_offset` does not match.
        let end = byte_offset.saturating_add(1).min(root.end_byte()).max(byte_offset);
        let mut node = root.descendant_for_byte_range(byte_offset, end);
        let mut found = None;

        while let Some(current) = node {
            let kind = current.kind();
            let literal = if is_comment_kind(kind) {
                Some(LiteralKind::Comment)
            } else if is_regex_kind(kind) {
                Some(LiteralKind::Regex)
            } else if is_string_kind(kind) {
                Some(LiteralKind::String)
            } else {
                None
            };
            if let Some(kind) = literal {
                found = Some(LiteralRange {
                    kind,
                    start_byte: current.start_byte(),
                    end_byte: current.end_byte(),
                });
            }
            node = current.parent();
        }
        found
    }

    pub fn highlight_lines(
        &self,
        rope: &Rope,
        start_line: usize,
        end_line_exclusive: usize,
    ) -> Vec<Vec<HighlightSpan>> {
        let total_lines = rope.len_lines().max(1);
        let start_line = start_line.min(total_lines);
        let end_line_exclusive = end_line_exclusive.min(total_lines);
        if start_line >= end_line_exclusive {
            return Vec::new();
        }

        let range_start = rope.line_to_byte(start_line);
        let range_end = rope.line_to_byte(end_line_exclusive);
        let spans = collect_highlights(self.rules, &self.tree, rope, range_start, range_end);
        project_abs_spans_to_lines(rope, start_line, end_line_exclusive, &spans)
    }

    pub fn error_nodes(&self) -> Vec<SyntaxErrorNode> {
        collect_error_nodes(&self.tree)
    }
}

/// Highlight an arbitrary snippet.
///
/// Returns per-line highlight spans with offsets relative to each line start.
pub fn highlight_snippet(rules: &'static HighlightRules, text: &str) -> Vec<Vec<HighlightSpan>> {
    let rope = Rope::from_str(text);
    let total_lines = rope.len_lines().max(1);
    match SyntaxDocument::new(rules, &rope) {
        Some(doc) => doc.highlight_lines(&rope, 0, total_lines),
        None => vec![Vec::new(); total_lines],
    }
}

fn collect_error_nodes(tree: &Tree) -> Vec<SyntaxErrorNode> {
    let root = tree.root_node();
    if !root.has_error() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            out.push(SyntaxErrorNode {
                row: pos.row,
                column: pos.column,
                missing: node.is_missing().then(|| node.kind().to_string()),
            });
            if node.is_error() {
                continue;
            }
        }
        if !node.has_error() {
            continue;
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    out.sort_by(|a, b| a.row.cmp(&b.row).then(a.column.cmp(&b.column)));
    out
}

fn parse_rope(parser: &mut Parser, rope: &Rope, old_tree: Option<&Tree>) -> Option<Tree> {
    let mut cache = RopeChunkCache::new(rope);
    parser.parse_with(
        &mut |byte_offset, _| cache.bytes_from(byte_offset),
        old_tree,
    )
}

struct RopeChunkCache<'a> {
    rope: &'a Rope,
    chunk: &'a str,
    start: usize,
    end: usize,
}

impl<'a> RopeChunkCache<'a> {
    fn new(rope: &'a Rope) -> Self {
        Self {
            rope,
            chunk: "",
            start: 0,
            end: 0,
        }
    }

    fn bytes_from(&mut self, byte_offset: usize) -> &'a [u8] {
        if byte_offset >= self.rope.len_bytes() {
            return &[];
        }

        if byte_offset < self.start || byte_offset >= self.end {
            let (chunk, chunk_start, _, _) = self.rope.chunk_at_byte(byte_offset);
            self.chunk = chunk;
            self.start = chunk_start;
            self.end = chunk_start + chunk.len();
        }

        let rel = byte_offset.saturating_sub(self.start);
        &self.chunk.as_bytes()[rel..]
    }
}

fn build_input_edit(
    rope: &Rope,
    start_char: usize,
    old_text: &str,
    new_text: &str,
) -> Option<InputEdit> {
    if start_char > rope.len_chars() {
        return None;
    }

    let start_byte = rope.char_to_byte(start_char);
    let row = rope.char_to_line(start_char);
    let start_position = Point {
        row,
        column: start_byte.saturating_sub(rope.line_to_byte(row)),
    };

    Some(InputEdit {
        start_byte,
        old_end_byte: start_byte + old_text.len(),
        new_end_byte: start_byte + new_text.len(),
        start_position,
        old_end_position: advance_point(start_position, old_text),
        new_end_position: advance_point(start_position, new_text),
    })
}

fn advance_point(start: Point, text: &str) -> Point {
    let mut row = start.row;
    let mut col = start.column;

    for &b in text.as_bytes() {
        if b == b'\n' {
            row = row.saturating_add(1);
            col = 0;
        } else {
            col = col.saturating_add(1);
        }
    }

    Point { row, column: col }
}

fn merge_adjacent_spans(spans: &mut Vec<HighlightSpan>) {
    if spans.len() <= 1 {
        return;
    }

    let mut out: Vec<HighlightSpan> = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        if let Some(prev) = out.last_mut() {
            if prev.kind == span.kind && span.start <= prev.end {
                prev.end = prev.end.max(span.end);
                continue;
            }
        }
        out.push(span);
    }
    *spans = out;
}

fn project_abs_spans_to_lines(
    rope: &Rope,
    start_line: usize,
    end_line_exclusive: usize,
    spans: &[AbsHighlightSpan],
) -> Vec<Vec<HighlightSpan>> {
    let total_lines = rope.len_lines().max(1);
    let range_start = rope.line_to_byte(start_line);
    let range_end = rope.line_to_byte(end_line_exclusive);
    let mut per_line = vec![Vec::new(); end_line_exclusive - start_line];

    for span in spans {
        let span_start = span.start.max(range_start).min(range_end);
        let span_end = span.end.max(range_start).min(range_end);
        if span_start >= span_end {
            continue;
        }

        let first_line = rope.byte_to_line(span_start);
        let last_line = rope.byte_to_line(span_end.saturating_sub(1));
        let line_lo = first_line.max(start_line);
        let line_hi = last_line.min(end_line_exclusive.saturating_sub(1));

        for line in line_lo..=line_hi {
            let line_start = rope.line_to_byte(line);
            let line_end = rope.line_to_byte((line + 1).min(total_lines));

            let s = span_start.max(line_start);
            let e = span_end.min(line_end);
            if s >= e {
                continue;
            }

            per_line[line - start_line].push(HighlightSpan {
                start: s - line_start,
                end: e - line_start,
                kind: span.kind,
            });
        }
    }

    for line_spans in &mut per_line {
        merge_adjacent_spans(line_spans);
    }

    per_line
}

fn collect_highlights(
    rules: &HighlightRules,
    tree: &Tree,
    rope: &Rope,
    start_byte: usize,
    end_byte: usize,
) -> Vec<AbsHighlightSpan> {
    let root = tree.root_node();
    let mut stack = vec![(root, 0usize)];
    let mut spans = Vec::new();

    while let Some((node, depth)) = stack.pop() {
        let node_start = node.start_byte();
        let node_end = node.end_byte();

        if node_end <= start_byte || node_start >= end_byte {
            continue;
        }

        if let Some(kind) = classify_node(rules, node, rope) {
            spans.push(AbsHighlightSpan {
                start: node_start,
                end: node_end,
                kind,
                depth,
            });

            if kind.is_leaf() {
                continue;
            }
        }

        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push((child, depth.saturating_add(1)));
            }
        }
    }

    normalize_overlapping_highlight_spans(spans, start_byte, end_byte)
}

/// Flatten nested spans so that, at every byte, the deepest (then narrowest) span wins.
fn normalize_overlapping_highlight_spans(
    spans: Vec<AbsHighlightSpan>,
    start_byte: usize,
    end_byte: usize,
) -> Vec<AbsHighlightSpan> {
    if spans.is_empty() || start_byte >= end_byte {
        return Vec::new();
    }

    let mut active_keys = Vec::with_capacity(spans.len());
    let mut events = Vec::with_capacity(spans.len().saturating_mul(2));
    for (seq, span) in spans.into_iter().enumerate() {
        let clipped_start = span.start.max(start_byte);
        let clipped_end = span.end.min(end_byte);
        if clipped_start >= clipped_end {
            continue;
        }

        let id = active_keys.len();
        active_keys.push(ActiveSpanKey::from_span(span, seq));
        events.push(SpanEvent {
            pos: clipped_start,
            kind: SpanEventKind::Start,
            id,
        });
        events.push(SpanEvent {
            pos: clipped_end,
            kind: SpanEventKind::End,
            id,
        });
    }

    if events.is_empty() {
        return Vec::new();
    }

    events.sort_by(|a, b| {
        a.pos
            .cmp(&b.pos)
            .then_with(|| match (a.kind, b.kind) {
                (SpanEventKind::End, SpanEventKind::Start) => Ordering::Less,
                (SpanEventKind::Start, SpanEventKind::End) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then(a.id.cmp(&b.id))
    });

    let mut active: BTreeSet<ActiveSpanKey> = BTreeSet::new();
    let mut flattened: Vec<AbsHighlightSpan> = Vec::with_capacity(events.len() / 2);
    let mut prev_pos = events[0].pos;

    for event in events {
        if prev_pos < event.pos {
            if let Some(top) = active.iter().next_back() {
                flattened.push(AbsHighlightSpan {
                    start: prev_pos,
                    end: event.pos,
                    kind: top.kind,
                    depth: top.depth,
                });
            }
            prev_pos = event.pos;
        }

        let key = active_keys[event.id];
        match event.kind {
            SpanEventKind::Start => {
                active.insert(key);
            }
            SpanEventKind::End => {
                active.remove(&key);
            }
        }
    }

    merge_adjacent_abs_spans(&mut flattened);
    flattened
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanEventKind {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanEvent {
    pos: usize,
    kind: SpanEventKind,
    id: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveSpanKey {
    depth: usize,
    len: usize,
    start: usize,
    end: usize,
    seq: usize,
    kind: HighlightKind,
}

impl ActiveSpanKey {
    fn from_span(span: AbsHighlightSpan, seq: usize) -> Self {
        Self {
            depth: span.depth,
            len: span.end.saturating_sub(span.start),
            start: span.start,
            end: span.end,
            seq,
            kind: span.kind,
        }
    }
}

impl Ord for ActiveSpanKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.depth
            .cmp(&other.depth)
            .then_with(|| other.len.cmp(&self.len))
            .then_with(|| other.start.cmp(&self.start))
            .then_with(|| other.end.cmp(&self.end))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ActiveSpanKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn merge_adjacent_abs_spans(spans: &mut Vec<AbsHighlightSpan>) {
    if spans.len() <= 1 {
        return;
    }

    let mut out: Vec<AbsHighlightSpan> = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        if let Some(prev) = out.last_mut() {
            if prev.kind == span.kind && prev.depth == span.depth && span.start <= prev.end {
                prev.end = prev.end.max(span.end);
                continue;
            }
        }
        out.push(span);
    }
    *spans = out;
}

fn classify_node(rules: &HighlightRules, node: Node<'_>, rope: &Rope) -> Option<HighlightKind> {
    let kind = node.kind();

    if is_comment_kind(kind) {
        return Some(HighlightKind::Comment);
    }
    if is_regex_kind(kind) {
        return Some(HighlightKind::Regex);
    }
    if is_string_kind(kind) {
        return Some(HighlightKind::String);
    }
    if kind.contains("integer") || kind.contains("float") || kind.contains("number") {
        return Some(HighlightKind::Number);
    }
    if let Some(kind) = (rules.classify)(node, rope) {
        return Some(kind);
    }
    if matches!(kind, "primitive_type" | "predefined_type") {
        return Some(HighlightKind::TypeBuiltin);
    }
    if kind == "type_identifier" {
        return Some(HighlightKind::Type);
    }
    if matches!(
        kind,
        "attribute_item" | "inner_attribute_item" | "decorator"
    ) {
        return Some(HighlightKind::Attribute);
    }
    if kind == "lifetime" {
        return Some(HighlightKind::Lifetime);
    }
    // Named nodes with children (`function` expressions, `class` bodies) share their
    // kind with the keyword token; only tokens count as keywords.
    if node.child_count() == 0 && (rules.is_keyword)(kind) {
        return Some(HighlightKind::Keyword);
    }
    None
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/editor/syntax.rs"]
mod tests;
