//! Directive preprocessing.
//!
//! Runs before pulldown-cmark: every leaf directive line outside code blocks
//! and HTML comments is dispatched to its handler, and nodes the handlers return are inserted
//! into the page's [`Document`].

use std::path::PathBuf;

use super::literal::LiteralTracker;
use super::parser::{ParsedDirective, parse_leaf_line};
use super::{DirectiveContext, DirectiveOutput, LeafDirective};
use crate::{Document, ExtensionError};

/// A handler failure, tagged with the directive's line.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct DirectiveError {
    /// Line of the failing directive (1-indexed).
    pub line: usize,
    /// Handler error.
    #[source]
    pub source: ExtensionError,
}

/// Preprocessor for one document.
///
/// ```
/// use fd_renderer::directive::DirectiveProcessor;
/// use fd_renderer::{Document, OutputTarget};
///
/// let mut processor = DirectiveProcessor::new(Document::new("index", OutputTarget::Html));
/// let output = processor.process("::unknown{a=1}\n").unwrap();
/// assert_eq!(output, "::unknown{a=1}\n");
/// assert_eq!(processor.warnings().len(), 1);
/// ```
pub struct DirectiveProcessor {
    document: Document,
    source_path: Option<PathBuf>,
    leaf_handlers: Vec<Box<dyn LeafDirective>>,
    literal: LiteralTracker,
    warnings: Vec<String>,
}

impl DirectiveProcessor {
    /// Create a processor that inserts nodes into `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            source_path: None,
            leaf_handlers: Vec::new(),
            literal: LiteralTracker::new(),
            warnings: Vec::new(),
        }
    }

    /// Set the source file path reported to handlers.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Register a leaf directive handler.
    #[must_use]
    pub fn with_leaf<D: LeafDirective + 'static>(self, handler: D) -> Self {
        self.with_boxed_leaf(Box::new(handler))
    }

    /// Register an already boxed leaf directive handler.
    #[must_use]
    pub fn with_boxed_leaf(mut self, handler: Box<dyn LeafDirective>) -> Self {
        self.leaf_handlers.push(handler);
        self
    }

    /// Preprocess markdown.
    ///
    /// Lines holding a handled directive are replaced by a node marker (or
    /// removed); unknown directives pass through unchanged with a warning.
    ///
    /// # Errors
    ///
    /// Returns the first handler error; the rest of the input is not processed.
    pub fn process(&mut self, input: &str) -> Result<String, DirectiveError> {
        self.document.reserve_markers(input);
        let mut output = String::with_capacity(input.len());
        let mut lines = input.lines().enumerate().peekable();

        while let Some((idx, line)) = lines.next() {
            if self.literal.is_literal(line) {
                output.push_str(line);
            } else if let Some(directive) = parse_leaf_line(line) {
                let replacement = self.dispatch(directive, idx + 1, line)?;
                output.push_str(&replacement);
            } else {
                output.push_str(line);
            }

            if lines.peek().is_some() || input.ends_with('\n') {
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn dispatch(
        &mut self,
        directive: ParsedDirective,
        line_num: usize,
        line: &str,
    ) -> Result<String, DirectiveError> {
        let ParsedDirective { name, args } = directive;
        let Some(idx) = self.leaf_handlers.iter().position(|h| h.name() == name) else {
            self.warnings
                .push(format!("line {line_num}: unknown directive ::{name}"));
            return Ok(line.to_owned());
        };

        let ctx = DirectiveContext {
            source_path: self.source_path.as_deref(),
            line: line_num,
            target: self.document.target(),
            document: &self.document,
        };
        let output = self.leaf_handlers[idx]
            .process(args, &ctx)
            .map_err(|source| DirectiveError {
                line: line_num,
                source,
            })?;

        Ok(match output {
            DirectiveOutput::Node(node) => {
                let id = self.document.insert(node);
                tracing::debug!(
                    page = self.document.name(),
                    directive = %name,
                    line = line_num,
                    "Inserted directive node"
                );
                self.document.marker(id)
            }
            DirectiveOutput::Empty => String::new(),
            DirectiveOutput::Skip => line.to_owned(),
        })
    }

    /// Document tree built so far.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the processor and return the document tree.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Warnings collected while processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directive::DirectiveArgs;
    use crate::{Node, OutputTarget};

    #[derive(Debug)]
    struct Badge(String);

    impl Node for Badge {
        fn visit(&self, _target: OutputTarget, out: &mut String) {
            out.push_str(&self.0);
        }
    }

    /// Inserts one badge per page; a second use is an error.
    struct BadgeDirective;

    impl LeafDirective for BadgeDirective {
        fn name(&self) -> &'static str {
            "badge"
        }

        fn process(
            &mut self,
            args: DirectiveArgs,
            ctx: &DirectiveContext,
        ) -> Result<DirectiveOutput, ExtensionError> {
            if ctx.document.contains::<Badge>() {
                return Err(ExtensionError::new("Badge error", "used twice"));
            }
            match args.get("text") {
                Some(text) => Ok(DirectiveOutput::node(Badge(text.to_owned()))),
                None => Ok(DirectiveOutput::Skip),
            }
        }
    }

    /// Drops itself from non-HTML output.
    struct HtmlOnly;

    impl LeafDirective for HtmlOnly {
        fn name(&self) -> &'static str {
            "html-only"
        }

        fn process(
            &mut self,
            _args: DirectiveArgs,
            ctx: &DirectiveContext,
        ) -> Result<DirectiveOutput, ExtensionError> {
            if ctx.target.is_html_family() {
                Ok(DirectiveOutput::node(Badge("html".to_owned())))
            } else {
                Ok(DirectiveOutput::Empty)
            }
        }
    }

    fn processor(target: OutputTarget) -> DirectiveProcessor {
        DirectiveProcessor::new(Document::new("page", target))
            .with_leaf(BadgeDirective)
            .with_leaf(HtmlOnly)
    }

    #[test]
    fn test_node_replaced_by_marker() {
        let mut processor = processor(OutputTarget::Html);
        let output = processor
            .process("# Title\n\n::badge{text=new}\n\nBody\n")
            .unwrap();

        assert_eq!(output, "# Title\n\n<!-- fd:node:0:0 -->\n\nBody\n");
        assert_eq!(processor.document().find_all::<Badge>().count(), 1);
    }

    #[test]
    fn test_no_directives_leaves_input() {
        let mut processor = processor(OutputTarget::Html);
        let input = "# Title\n\nJust text.";
        assert_eq!(processor.process(input).unwrap(), input);
        assert!(processor.into_document().is_empty());
    }

    #[test]
    fn test_handler_error_carries_line() {
        let mut processor = processor(OutputTarget::Html);
        let err = processor
            .process("::badge{text=a}\n\n::badge{text=b}\n")
            .unwrap_err();

        assert_eq!(err.line, 3);
        assert_eq!(err.source.message(), "used twice");
        assert_eq!(processor.document().len(), 1);
    }

    #[test]
    fn test_skip_passes_through() {
        let mut processor = processor(OutputTarget::Html);
        let output = processor.process("::badge").unwrap();
        assert_eq!(output, "::badge");
        assert!(processor.warnings().is_empty());
    }

    #[test]
    fn test_empty_removes_directive() {
        let mut processor = processor(OutputTarget::Text);
        let output = processor.process("a\n::html-only\nb\n").unwrap();
        assert_eq!(output, "a\n\nb\n");
        assert!(processor.document().is_empty());
    }

    #[test]
    fn test_directive_inside_fence_is_literal() {
        let mut processor = processor(OutputTarget::Html);
        let input = "```\n::badge{text=x}\n```\n";
        assert_eq!(processor.process(input).unwrap(), input);
        assert!(processor.document().is_empty());
    }

    #[test]
    fn test_directive_in_indented_code_is_literal() {
        let mut processor = processor(OutputTarget::Html);
        let input = "Usage:\n\n    ::badge{text=x}\n";
        assert_eq!(processor.process(input).unwrap(), input);
        assert!(processor.document().is_empty());
    }

    #[test]
    fn test_commented_out_directive_is_literal() {
        let mut processor = processor(OutputTarget::Html);
        let output = processor
            .process("<!--\n::badge{text=old}\n-->\n\n::badge{text=new}\n")
            .unwrap();

        assert_eq!(output, "<!--\n::badge{text=old}\n-->\n\n<!-- fd:node:0:0 -->\n");
        let badges: Vec<_> = processor.document().find_all::<Badge>().collect();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].0, "new");
    }

    #[test]
    fn test_marker_nonce_avoids_author_text() {
        let mut processor = processor(OutputTarget::Html);
        let output = processor
            .process("<!-- fd:node:0:0 -->\n\n::badge{text=x}\n")
            .unwrap();
        assert_eq!(output, "<!-- fd:node:0:0 -->\n\n<!-- fd:node:1:0 -->\n");
    }

    #[test]
    fn test_unknown_directive_warns() {
        let mut processor = processor(OutputTarget::Html).with_source_path("docs/page.md");
        let output = processor.process("::youtube[abc]").unwrap();
        assert_eq!(output, "::youtube[abc]");
        assert_eq!(processor.warnings(), ["line 1: unknown directive ::youtube"]);
    }
}
