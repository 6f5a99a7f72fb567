//! Page templates per output target.

use std::fmt::Write;

use fd_renderer::{OutputTarget, PageContext};

/// Wrap a page body in the target's page template.
///
/// HTML-family targets get a minimal HTML5 document titled
/// "{page title} - {project title}". Other targets get the body as is.
pub(crate) fn render_page(target: OutputTarget, page: &PageContext, project_title: &str) -> String {
    if !target.is_html_family() {
        return page.body.clone();
    }

    let title = match &page.title {
        Some(title) => format!("{title} - {project_title}"),
        None => project_title.to_owned(),
    };

    let mut html = String::with_capacity(page.body.len() + 256);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&title));
    html.push_str("</head>\n<body>\n");
    html.push_str(&page.body);
    if !page.body.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
