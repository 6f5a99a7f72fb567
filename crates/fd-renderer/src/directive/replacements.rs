//! Batched string replacement for the post-render pass.

/// Collects `from -> to` pairs and applies them to a rendered body.
///
/// Node markers are collected here after the writer runs, then swapped for
/// the nodes' target-specific output in a single left-to-right pass:
/// replacement text is never searched again.
///
/// ```
/// use fd_renderer::directive::Replacements;
///
/// let mut body = "<p>a</p>\n<!-- fd:node:0:0 -->\n".to_owned();
/// let mut replacements = Replacements::new();
/// replacements.add("<!-- fd:node:0:0 -->", "<hr>");
/// replacements.apply(&mut body);
/// assert_eq!(body, "<p>a</p>\n<hr>\n");
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collector with room for `capacity` pairs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Register a replacement. Empty patterns are ignored.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if !from.is_empty() {
            self.items.push((from, to.into()));
        }
    }

    /// Apply all pairs to `text` in one pass, consuming the collector.
    ///
    /// At each step the earliest match wins; among matches at the same
    /// position, the longest pattern wins.
    pub fn apply(self, text: &mut String) {
        if self.items.is_empty() {
            return;
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text.as_str();
        while let Some((pos, len, to)) = self
            .items
            .iter()
            .filter_map(|(from, to)| rest.find(from.as_str()).map(|pos| (pos, from.len(), to)))
            .min_by_key(|&(pos, len, _)| (pos, std::cmp::Reverse(len)))
        {
            out.push_str(&rest[..pos]);
            out.push_str(to);
            rest = &rest[pos + len..];
        }
        out.push_str(rest);
        *text = out;
    }

    /// Whether no pairs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
