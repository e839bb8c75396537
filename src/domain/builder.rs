//! Stack-based hierarchy reconstruction from classified entries.

use tracing::{debug, trace};

use crate::domain::entities::{Entry, Node, Taxonomy};

/// Level of the synthetic root; below every real level, so it is never popped.
const ROOT_LEVEL: i64 = -1;

/// An entry that may still receive children, tagged with its level.
#[derive(Debug)]
struct OpenNode {
    level: i64,
    node: Node,
}

/// Builds a [`Taxonomy`] from entries fed in input order.
///
/// Each entry becomes a child of the most recent entry with a strictly smaller
/// level, regardless of how large the level gap is. The stack holds the chain of
/// open ancestors; an entry is moved into its parent's children when it is
/// closed, which happens before any later sibling is opened, so child order
/// follows input order.
#[derive(Debug)]
pub struct HierarchyBuilder {
    stack: Vec<OpenNode>,
    entries: usize,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![OpenNode {
                level: ROOT_LEVEL,
                node: Node::new("root"),
            }],
            entries: 0,
        }
    }

    /// Build a forest from an ordered sequence of entries.
    pub fn build(entries: impl IntoIterator<Item = Entry>) -> Taxonomy {
        let mut builder = Self::new();
        for entry in entries {
            builder.push(entry);
        }
        builder.finish()
    }

    /// Attach one entry under the nearest open entry with a smaller level.
    pub fn push(&mut self, entry: Entry) {
        let level = i64::from(entry.level);
        while self.stack.last().is_some_and(|top| top.level >= level) {
            self.close_top();
        }
        trace!(level, open = self.stack.len(), label = %entry.label, "attach");
        self.stack.push(OpenNode {
            level,
            node: Node::from(entry),
        });
        self.entries += 1;
    }

    /// Number of entries pushed so far.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Close every open entry and return the synthetic root's children.
    pub fn finish(mut self) -> Taxonomy {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let roots = self
            .stack
            .pop()
            .map(|root| root.node.children)
            .unwrap_or_default();
        debug!(entries = self.entries, roots = roots.len(), "hierarchy built");
        Taxonomy::new(roots)
    }

    fn close_top(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(closed) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.node.children.push(closed.node);
            }
        }
    }
}
