//! Marker node for an embedded topic.

use fd_renderer::{Node, OutputTarget};

/// Placeholder element the Discourse embed script fills in.
pub const PLACEHOLDER: &str = r#"<div id ="discourse-comments"></div>"#;

/// Request to embed one Discourse topic on a page.
///
/// Created by the `::discourse` directive; at most one per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscourseNode {
    topic_identifier: String,
}

impl DiscourseNode {
    pub(crate) fn new(topic_identifier: impl Into<String>) -> Self {
        Self {
            topic_identifier: topic_identifier.into(),
        }
    }

    /// Discourse topic id to embed.
    #[must_use]
    pub fn topic_identifier(&self) -> &str {
        &self.topic_identifier
    }
}

impl Node for DiscourseNode {
    // Only HTML pages get the embed script, so other targets get no placeholder.
    fn visit(&self, target: OutputTarget, out: &mut String) {
        if target.is_html_family() {
            out.push_str(PLACEHOLDER);
        }
    }
}
