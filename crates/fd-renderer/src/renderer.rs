//! Page rendering pipeline.

use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::directive::Replacements;
use crate::extension::Registry;
use crate::writer::write_body;
use crate::{Document, OutputTarget, RenderError};

/// Output of rendering one page.
#[derive(Debug)]
pub struct RenderedPage {
    /// Page name.
    pub name: String,
    /// Text of the first level-1 heading.
    pub title: Option<String>,
    /// Body in the target's format.
    pub body: String,
    /// Node tree built by the page's directives.
    pub document: Document,
    /// Non-fatal problems (unknown directives).
    pub warnings: Vec<String>,
}

/// Renders markdown pages for one output target.
///
/// The pipeline is: directive preprocessing (builds the [`Document`]),
/// pulldown-cmark parsing, the target writer, then replacement of node
/// markers with each node's `visit`/`depart` output.
///
/// ```
/// use fd_renderer::{OutputTarget, PageRenderer, Registry};
///
/// let registry = Registry::new();
/// let page = PageRenderer::new(&registry, OutputTarget::Html)
///     .render("index", None, "# Welcome\n\nHello.")
///     .unwrap();
/// assert_eq!(page.title.as_deref(), Some("Welcome"));
/// assert!(page.body.contains("<p>Hello.</p>"));
/// ```
pub struct PageRenderer<'r> {
    registry: &'r Registry,
    target: OutputTarget,
}

impl<'r> PageRenderer<'r> {
    /// Create a renderer using the directives in `registry`.
    #[must_use]
    pub fn new(registry: &'r Registry, target: OutputTarget) -> Self {
        Self { registry, target }
    }

    /// Target this renderer writes.
    #[must_use]
    pub fn target(&self) -> OutputTarget {
        self.target
    }

    /// Render one page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Directive`] if a directive handler fails.
    pub fn render(
        &self,
        name: &str,
        source_path: Option<&Path>,
        markdown: &str,
    ) -> Result<RenderedPage, RenderError> {
        let mut processor = self
            .registry
            .directive_processor(Document::new(name, self.target));
        if let Some(path) = source_path {
            processor = processor.with_source_path(path);
        }

        let preprocessed = processor
            .process(markdown)
            .map_err(|err| RenderError::Directive {
                page: name.to_owned(),
                line: err.line,
                source: err.source,
            })?;
        let warnings = processor.warnings().to_vec();
        let document = processor.into_document();

        let events: Vec<Event<'_>> = Parser::new_ext(&preprocessed, parser_options()).collect();
        let title = extract_title(&events);

        let mut body = String::with_capacity(preprocessed.len() * 3 / 2);
        write_body(&document, events.into_iter(), &mut body);

        let mut replacements = Replacements::with_capacity(document.len());
        for (id, node) in document.iter() {
            let mut rendered = String::new();
            node.visit(self.target, &mut rendered);
            node.depart(self.target, &mut rendered);
            replacements.add(document.marker(id), rendered);
        }
        replacements.apply(&mut body);

        tracing::debug!(
            page = name,
            target = %self.target,
            nodes = document.len(),
            "Rendered page"
        );

        Ok(RenderedPage {
            name: name.to_owned(),
            title,
            body,
            document,
            warnings,
        })
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Text of the first level-1 heading.
fn extract_title(events: &[Event<'_>]) -> Option<String> {
    let start = events.iter().position(|event| {
        matches!(
            event,
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            })
        )
    })?;

    let mut title = String::new();
    for event in &events[start + 1..] {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(text) | Event::Code(text) => title.push_str(text),
            Event::SoftBreak | Event::HardBreak => title.push(' '),
            _ => {}
        }
    }
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_owned())
}
