//! Directive invocation context.

use std::path::Path;

use crate::{Document, OutputTarget};

/// What a directive handler can see about the page being rendered.
///
/// Handlers get read access to the document tree built so far, so they can
/// enforce constraints such as "at most one of my nodes per page".
pub struct DirectiveContext<'a> {
    /// Source file of the page, if it came from disk.
    pub source_path: Option<&'a Path>,
    /// Line of the directive (1-indexed).
    pub line: usize,
    /// Target the page is rendered for.
    pub target: OutputTarget,
    /// Document tree as built up to this directive.
    pub document: &'a Document,
}

impl DirectiveContext<'_> {
    /// Human-readable source location, e.g. `docs/guide.md:12`.
    #[must_use]
    pub fn location(&self) -> String {
        match self.source_path {
            Some(path) => format!("{}:{}", path.display(), self.line),
            None => format!("{}:{}", self.document.name(), self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_with_source_path() {
        let document = Document::new("guide", OutputTarget::Html);
        let ctx = DirectiveContext {
            source_path: Some(Path::new("docs/guide.md")),
            line: 12,
            target: OutputTarget::Html,
            document: &document,
        };
        assert_eq!(ctx.location(), "docs/guide.md:12");
    }

    #[test]
    fn test_location_falls_back_to_page_name() {
        let document = Document::new("guide", OutputTarget::Text);
        let ctx = DirectiveContext {
            source_path: None,
            line: 3,
            target: OutputTarget::Text,
            document: &document,
        };
        assert_eq!(ctx.location(), "guide:3");
    }
}
