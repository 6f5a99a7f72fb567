//! The `::discourse{topic_identifier="..."}` directive.

use fd_renderer::ExtensionError;
use fd_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, LeafDirective};

use crate::{DiscourseError, DiscourseNode};

/// Directive name.
pub const DIRECTIVE_NAME: &str = "discourse";

/// Required option naming the topic.
pub const TOPIC_IDENTIFIER: &str = "topic_identifier";

/// Handler for `::discourse`.
///
/// Inserts a [`DiscourseNode`] on HTML-family targets and nothing elsewhere.
#[derive(Debug, Default)]
pub struct DiscourseDirective;

impl LeafDirective for DiscourseDirective {
    fn name(&self) -> &str {
        DIRECTIVE_NAME
    }

    fn process(
        &mut self,
        args: DirectiveArgs,
        ctx: &DirectiveContext,
    ) -> Result<DirectiveOutput, ExtensionError> {
        let topic_identifier = args
            .get_non_empty(TOPIC_IDENTIFIER)
            .ok_or(DiscourseError::MissingTopicIdentifier)?;

        if !ctx.target.is_html_family() {
            tracing::debug!(
                location = %ctx.location(),
                target = %ctx.target,
                "Skipping ::discourse for non-HTML target"
            );
            return Ok(DirectiveOutput::Empty);
        }

        if ctx.document.contains::<DiscourseNode>() {
            return Err(DiscourseError::DuplicateDirective.into());
        }

        Ok(DirectiveOutput::node(DiscourseNode::new(topic_identifier)))
    }
}
