//! Range-addressed parse-tree nodes.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// Anything that can slice the parsed input buffer.
///
/// Implemented by the runtime parser state; nodes take one wherever text is
/// materialized instead of holding a back-reference into the state.
pub trait DataSource {
    /// The text between `start` and `end`. Out-of-range boundaries are
    /// clamped to the buffer; an inverted range yields `""`.
    fn data(&self, start: usize, end: usize) -> String;
}

/// One node of the parse tree.
///
/// `name` is the rule identifier, or empty for the synthetic root. Children
/// are appended left to right as the parse proceeds and only ever removed
/// from the tail ([`Node::discard`], [`Node::cleanup`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub range: Region,
    pub name: String,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a childless node.
    pub fn new(name: impl Into<String>, range: Region) -> Self {
        Self {
            range,
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append `child` at the end of the children sequence.
    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Drop trailing children that extend past `pos`.
    ///
    /// Retains the longest prefix of children whose last member ends at or
    /// before `pos`; retains nothing if no child does.
    pub fn discard(&mut self, pos: usize) {
        let mut keep = 0;
        for i in (0..self.children.len()).rev() {
            if self.children[i].range.end <= pos {
                keep = i + 1;
                break;
            }
        }
        self.children.truncate(keep);
    }

    /// Detach the children falling inside `[pos, end)` into a new node.
    ///
    /// Three-way partition of the current children: those ending at or
    /// before `pos` stay in place; those starting after `end` are dropped
    /// entirely; the remainder become the children of the returned node,
    /// whose range is `[pos, end)`.
    ///
    /// A `pos` or `end` of exactly 0 means "unset" and is substituted with
    /// -1 for the boundary comparisons, so a real boundary at offset 0 is
    /// never mistaken for the marker. The returned node's range keeps the
    /// original values.
    pub fn cleanup(&mut self, pos: usize, end: usize) -> Node {
        let mut popped = Node::new("", Region::new(pos, end));

        let pos = if pos == 0 { -1 } else { pos as i64 };
        let end = if end == 0 { -1 } else { end as i64 };

        let count = self.children.len();
        let mut take_from = 0;
        let mut take_to = count;
        for i in (0..count).rev() {
            let r = self.children[i].range;
            if (r.end as i64) <= pos {
                take_from = i + 1;
                break;
            }
            if (r.begin as i64) > end {
                take_to = i;
            }
        }
        let take_to = take_to.max(take_from);

        let mut tail = self.children.split_off(take_from);
        tail.truncate(take_to - take_from);
        popped.children = tail;
        popped
    }

    /// Collapse single-child nodes whose child spans the same range.
    ///
    /// Applied bottom-up; idempotent.
    pub fn simplify(&mut self) {
        for child in &mut self.children {
            child.simplify();
        }
        if self.children.len() == 1 && self.children[0].range == self.range {
            if let Some(child) = self.children.pop() {
                *self = child;
            }
        }
    }

    /// Shift this node's range and all descendants for an edit of `delta`
    /// bytes at `position`. See [`Region::adjust`].
    pub fn adjust(&mut self, position: usize, delta: isize) {
        self.range.adjust(position, delta);
        for child in &mut self.children {
            child.adjust(position, delta);
        }
    }

    /// Widen this node's range to cover its children, bottom-up.
    ///
    /// Returns the resulting range. Used to repair ranges after structural
    /// edits.
    pub fn update_range(&mut self) -> Region {
        for child in &mut self.children {
            let r = child.update_range();
            self.range = self.range.cover(r);
        }
        self.range
    }

    /// Materialize this node's text from `src`.
    pub fn data(&self, src: &dyn DataSource) -> String {
        src.data(self.range.begin, self.range.end)
    }

    /// Indented rendering of this node and its subtree, one line per node.
    /// Leaf lines carry the node's text.
    pub fn dump(&self, src: &dyn DataSource) -> String {
        let mut out = String::new();
        self.format(&mut out, "", src);
        out
    }

    fn format(&self, out: &mut String, indent: &str, src: &dyn DataSource) {
        let _ = write!(
            out,
            "{indent}{}-{}: \"{}\"",
            self.range.begin, self.range.end, self.name
        );
        if self.children.is_empty() {
            let _ = writeln!(out, " - Data: \"{}\"", self.data(src));
            return;
        }
        out.push('\n');
        let deeper = format!("{indent}\t");
        for child in &self.children {
            child.format(out, &deeper, src);
        }
    }
}
