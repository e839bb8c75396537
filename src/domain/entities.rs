//! Domain entities: classified outline lines and the resulting taxonomy tree

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use termtree::Tree;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::NodePath;

/// Which outline marker produced an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `<digits> <label>`
    Numbered,
    /// Dot run, dots optionally separated by whitespace: `. . Label`
    Dotted { dots: usize },
    /// Leading spaces but no marker
    Indented { width: usize },
    /// No marker, no leading spaces
    Plain,
}

/// One classified, non-blank outline line.
///
/// Entries only live between the classifier and the builder. The `level`
/// drives attachment and is not part of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Inferred nesting depth (0 = top level)
    pub level: u32,
    /// Identifier from a numeric marker, top-level entries only
    pub code: Option<String>,
    /// Display text, never empty
    pub label: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn numbered(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            level: 0,
            code: Some(code.into()),
            label: label.into(),
            kind: EntryKind::Numbered,
        }
    }

    /// A dotted entry sits one level below its dot count: `.` is level 2.
    pub fn dotted(dots: usize, label: impl Into<String>) -> Self {
        let level = u32::try_from(dots).map_or(u32::MAX, |d| d.saturating_add(1));
        Self {
            level,
            code: None,
            label: label.into(),
            kind: EntryKind::Dotted { dots },
        }
    }

    pub fn indented(width: usize, label: impl Into<String>) -> Self {
        Self {
            level: 1,
            code: None,
            label: label.into(),
            kind: EntryKind::Indented { width },
        }
    }

    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            level: 1,
            code: None,
            label: label.into(),
            kind: EntryKind::Plain,
        }
    }
}

/// A node of the output taxonomy.
///
/// Serialized with the label under `name`, matching the existing viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "name")]
    pub label: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl From<Entry> for Node {
    fn from(entry: Entry) -> Self {
        Self {
            code: entry.code,
            label: entry.label,
            children: Vec::new(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.label),
            None => write!(f, "{}", self.label),
        }
    }
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            code: None,
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes on the longest path from this node down, this node included.
    pub fn depth(&self) -> usize {
        Walk::new(std::slice::from_ref(self))
            .map(|(depth, _)| depth)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        Walk::new(std::slice::from_ref(self)).count()
    }

    pub fn leaf_labels(&self) -> Vec<&str> {
        Walk::new(std::slice::from_ref(self))
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.label.as_str())
            .collect()
    }

    /// Copy of this subtree keeping `max_depth` levels (this node is level 1).
    fn truncated(&self, max_depth: usize) -> Self {
        let children = if max_depth > 1 {
            self.children
                .iter()
                .map(|child| child.truncated(max_depth - 1))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            code: self.code.clone(),
            label: self.label.clone(),
            children,
        }
    }

    fn to_termtree(&self, path: Option<NodePath>) -> Tree<String> {
        let text = match &path {
            Some(path) => format!("{} {}", path, self),
            None => self.to_string(),
        };
        let leaves = self
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| child.to_termtree(path.as_ref().map(|p| p.child(i))));
        Tree::new(text).with_leaves(leaves)
    }
}

/// Pre-order walk over a forest, yielding each node with its depth
/// (top level = 1). Uses an explicit stack, so tree depth is not limited by
/// the call stack.
struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: roots.iter().rev().map(|node| (1, node)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// The converted forest: top-level nodes in input order.
///
/// Serializes transparently as a JSON array of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    roots: Vec<Node>,
}

impl Taxonomy {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Node> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth of the deepest branch, top-level nodes counting as 1.
    pub fn depth(&self) -> usize {
        Walk::new(&self.roots)
            .map(|(depth, _)| depth)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        Walk::new(&self.roots).count()
    }

    pub fn leaf_count(&self) -> usize {
        Walk::new(&self.roots)
            .filter(|(_, node)| node.is_leaf())
            .count()
    }

    /// Number of nodes per depth, top level being depth 1.
    pub fn level_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for (depth, _) in Walk::new(&self.roots) {
            *counts.entry(depth).or_insert(0) += 1;
        }
        counts
    }

    /// Copy of the forest without nodes deeper than `max_depth`.
    ///
    /// A `max_depth` of 0 yields an empty forest.
    pub fn truncated(&self, max_depth: usize) -> Self {
        if max_depth == 0 {
            return Self::default();
        }
        Self {
            roots: self
                .roots
                .iter()
                .map(|root| root.truncated(max_depth))
                .collect(),
        }
    }

    /// Terminal rendering under `title`, optionally prefixing each node with its path.
    pub fn to_termtree(&self, title: impl Into<String>, with_paths: bool) -> Tree<String> {
        let leaves = self
            .roots
            .iter()
            .enumerate()
            .map(|(i, root)| root.to_termtree(with_paths.then(|| NodePath::top(i))));
        Tree::new(title.into()).with_leaves(leaves)
    }

    pub fn node(&self, path: &NodePath) -> DomainResult<&Node> {
        let (last, parent) = path.indices().split_last().ok_or(DomainError::EmptyPath)?;
        self.children(parent)
            .and_then(|siblings| siblings.get(*last))
            .ok_or_else(|| DomainError::NoSuchNode(path.clone()))
    }

    /// Replace the label of the node at `path`, keeping its code and children.
    pub fn rename(&mut self, path: &NodePath, label: &str) -> DomainResult<()> {
        let label = checked_label(label)?;
        let (last, parent) = path.indices().split_last().ok_or(DomainError::EmptyPath)?;
        let node = self
            .children_mut(parent)
            .and_then(|siblings| siblings.get_mut(*last))
            .ok_or_else(|| DomainError::NoSuchNode(path.clone()))?;
        node.label = label;
        Ok(())
    }

    /// Append `node` as the last child of `parent`, or as the last top-level
    /// node when `parent` is `None`. Returns the path of the added node.
    pub fn add_child(&mut self, parent: Option<&NodePath>, mut node: Node) -> DomainResult<NodePath> {
        node.label = checked_label(&node.label)?;
        let parent = parent.cloned().unwrap_or_default();
        let siblings = self
            .children_mut(parent.indices())
            .ok_or_else(|| DomainError::NoSuchNode(parent.clone()))?;
        siblings.push(node);
        Ok(parent.child(siblings.len() - 1))
    }

    /// Detach the node at `path` together with its subtree.
    pub fn remove(&mut self, path: &NodePath) -> DomainResult<Node> {
        let (last, parent) = path.indices().split_last().ok_or(DomainError::EmptyPath)?;
        match self.children_mut(parent) {
            Some(siblings) if *last < siblings.len() => Ok(siblings.remove(*last)),
            _ => Err(DomainError::NoSuchNode(path.clone())),
        }
    }

    /// Children of the node at `indices`; the roots for an empty slice.
    fn children(&self, indices: &[usize]) -> Option<&Vec<Node>> {
        let mut siblings = &self.roots;
        for &i in indices {
            siblings = &siblings.get(i)?.children;
        }
        Some(siblings)
    }

    fn children_mut(&mut self, indices: &[usize]) -> Option<&mut Vec<Node>> {
        let mut siblings = &mut self.roots;
        for &i in indices {
            siblings = &mut siblings.get_mut(i)?.children;
        }
        Some(siblings)
    }
}

fn checked_label(label: &str) -> DomainResult<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(DomainError::EmptyLabel);
    }
    Ok(label.to_string())
}
