//! Document node tree.
//!
//! Directive handlers insert typed [`Node`]s into a page's [`Document`].
//! Each inserted node leaves a marker in the preprocessed markdown; after the
//! page body is written, every marker is replaced with the node's rendering
//! for the current [`OutputTarget`].

use std::any::Any;
use std::fmt;

use crate::OutputTarget;

/// A typed element in the document tree.
///
/// Implementations carry the data a directive collected and know how to
/// render themselves for every output target. Lookup by concrete type goes
/// through [`Document::find_all`].
pub trait Node: Any + fmt::Debug + Send {
    /// Emit output when the renderer enters the node.
    fn visit(&self, target: OutputTarget, out: &mut String);

    /// Emit output when the renderer leaves the node.
    fn depart(&self, _target: OutputTarget, _out: &mut String) {}
}

/// Position of a node within its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const MARKER_PREFIX: &str = "<!-- fd:node:";
const MARKER_SUFFIX: &str = " -->";

/// Node tree of a single page.
#[derive(Debug)]
pub struct Document {
    name: String,
    target: OutputTarget,
    nodes: Vec<Box<dyn Node>>,
    /// Distinguishes this document's markers from identical author text.
    marker_nonce: u64,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new(name: impl Into<String>, target: OutputTarget) -> Self {
        Self {
            name: name.into(),
            target,
            nodes: Vec::new(),
            marker_nonce: 0,
        }
    }

    /// Page name (source path without extension).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target the document is being rendered for.
    #[must_use]
    pub fn target(&self) -> OutputTarget {
        self.target
    }

    /// Insert a node and return its id.
    pub fn insert(&mut self, node: Box<dyn Node>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Placeholder left in the markdown where node `id` was inserted.
    ///
    /// An HTML comment on its own line forms a standalone HTML block, so it
    /// reaches every writer untouched. The comment carries a per-document
    /// nonce, so a comment an author wrote is never mistaken for a marker.
    #[must_use]
    pub fn marker(&self, id: NodeId) -> String {
        format!("{MARKER_PREFIX}{}:{}{MARKER_SUFFIX}", self.marker_nonce, id.0)
    }

    /// Parse one of this document's markers back into a node id.
    #[must_use]
    pub fn marker_node(&self, s: &str) -> Option<NodeId> {
        let (nonce, id) = s
            .trim()
            .strip_prefix(MARKER_PREFIX)?
            .strip_suffix(MARKER_SUFFIX)?
            .split_once(':')?;
        if nonce.parse::<u64>().ok()? != self.marker_nonce {
            return None;
        }
        id.parse().ok().map(NodeId)
    }

    /// Pick a marker nonce whose markers cannot occur in `source`.
    ///
    /// Only takes effect before the first node is inserted.
    pub(crate) fn reserve_markers(&mut self, source: &str) {
        if !self.nodes.is_empty() {
            return;
        }
        self.marker_nonce = (0..=u64::MAX)
            .find(|nonce| !source.contains(&format!("fd:node:{nonce}:")))
            .unwrap_or_default();
    }

    /// Iterate over all nodes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &dyn Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), node.as_ref()))
    }

    /// All nodes of type `T`, in insertion order.
    pub fn find_all<T: Node>(&self) -> impl Iterator<Item = &T> {
        self.nodes
            .iter()
            .filter_map(|node| (node.as_ref() as &dyn Any).downcast_ref::<T>())
    }

    /// Whether the document holds at least one node of type `T`.
    #[must_use]
    pub fn contains<T: Node>(&self) -> bool {
        self.find_all::<T>().next().is_some()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
