//! Target writers: turn pulldown-cmark events into a page body.
//!
//! HTML-family targets use pulldown-cmark's own HTML writer. Text and LaTeX
//! writers are deliberately small; they cover the block and inline elements
//! documentation pages use and drop raw HTML, except node markers, which
//! they copy through for the post-render pass.

mod latex;
mod text;

use pulldown_cmark::{Event, html};

use crate::{Document, OutputTarget};

/// Write `events` as the body of `document`.
pub(crate) fn write_body<'a>(
    document: &Document,
    events: impl Iterator<Item = Event<'a>>,
    out: &mut String,
) {
    match document.target() {
        OutputTarget::Html | OutputTarget::ReadTheDocs => html::push_html(out, events),
        OutputTarget::Latex => latex::LatexWriter::new(document, out).run(events),
        OutputTarget::Text => text::TextWriter::new(document, out).run(events),
    }
}

/// Copy a node marker into non-HTML output, dropping any other raw HTML.
fn push_marker(html: &str, document: &Document, out: &mut String) {
    if document.marker_node(html).is_some() {
        out.push_str(html.trim());
        out.push_str("\n\n");
    }
}
