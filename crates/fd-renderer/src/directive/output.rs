//! Directive output.

use crate::Node;

/// Result of a successful directive invocation.
///
/// ```
/// use fd_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::Empty;
/// assert!(output.is_empty());
/// ```
#[derive(Debug)]
pub enum DirectiveOutput {
    /// Insert a node into the document tree at the directive's position.
    Node(Box<dyn Node>),
    /// Remove the directive from the page without inserting anything.
    Empty,
    /// Leave the directive text in the page unchanged.
    Skip,
}

impl DirectiveOutput {
    /// Wrap a node for insertion.
    #[must_use]
    pub fn node(node: impl Node) -> Self {
        Self::Node(Box::new(node))
    }

    /// Whether the output removes the directive without a replacement.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
