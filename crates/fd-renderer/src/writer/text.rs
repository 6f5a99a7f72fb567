//! Plain-text writer.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use super::push_marker;
use crate::Document;

pub(super) struct TextWriter<'o> {
    document: &'o Document,
    out: &'o mut String,
    /// Next ordinal per open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
    /// Heading text is buffered so it can be underlined.
    heading: Option<(HeadingLevel, String)>,
    links: Vec<String>,
    in_code_block: bool,
}

impl<'o> TextWriter<'o> {
    pub(super) fn new(document: &'o Document, out: &'o mut String) -> Self {
        Self {
            document,
            out,
            lists: Vec::new(),
            heading: None,
            links: Vec::new(),
            in_code_block: false,
        }
    }

    pub(super) fn run<'a>(mut self, events: impl Iterator<Item = Event<'a>>) {
        for event in events {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(text) if self.in_code_block => {
                    for line in text.lines() {
                        self.out.push_str("    ");
                        self.out.push_str(line);
                        self.out.push('\n');
                    }
                }
                Event::Text(text) | Event::Code(text) => self.push(&text),
                Event::SoftBreak => self.push(" "),
                Event::HardBreak => self.push("\n"),
                Event::Rule => self.out.push_str(&format!("{}\n\n", "-".repeat(40))),
                Event::Html(html) => push_marker(&html, self.document, self.out),
                _ => {}
            }
        }
    }

    fn push(&mut self, s: &str) {
        match &mut self.heading {
            Some((_, text)) => text.push_str(s),
            None => self.out.push_str(s),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => self.heading = Some((level, String::new())),
            Tag::List(first) => {
                if self.lists.is_empty() && !self.out.is_empty() && !self.out.ends_with("\n\n") {
                    self.out.push('\n');
                }
                self.lists.push(first);
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                self.out.push_str(&"  ".repeat(depth));
                match self.lists.last_mut() {
                    Some(Some(n)) => {
                        self.out.push_str(&format!("{n}. "));
                        *n += 1;
                    }
                    _ => self.out.push_str("* "),
                }
            }
            Tag::CodeBlock(kind) => {
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    self.out.push_str(&format!("[{lang}]\n"));
                }
            }
            Tag::Link { dest_url, .. } => self.links.push(dest_url.into_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                if let Some((level, text)) = self.heading.take() {
                    let underline = match level {
                        HeadingLevel::H1 => '=',
                        HeadingLevel::H2 => '-',
                        _ => '~',
                    };
                    let width = text.chars().count();
                    self.out.push_str(&text);
                    self.out.push('\n');
                    self.out
                        .push_str(&underline.to_string().repeat(width.max(1)));
                    self.out.push_str("\n\n");
                }
            }
            TagEnd::Paragraph => {
                self.out
                    .push_str(if self.lists.is_empty() { "\n\n" } else { "\n" });
            }
            TagEnd::Item => {
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.out.push('\n');
            }
            TagEnd::Link => {
                if let Some(url) = self.links.pop() {
                    self.push(&format!(" <{url}>"));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::Parser;

    use super::*;

    fn render(markdown: &str) -> String {
        let mut out = String::new();
        let document = Document::new("page", crate::OutputTarget::Text);
        TextWriter::new(&document, &mut out).run(Parser::new(markdown));
        out
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(render("# Guide\n\nHello *world*."), "Guide\n=====\n\nHello world.\n\n");
    }

    #[test]
    fn test_lists() {
        assert_eq!(render("- a\n- b\n"), "* a\n* b\n\n");
        assert_eq!(render("3. x\n4. y\n"), "3. x\n4. y\n\n");
    }

    #[test]
    fn test_code_block_indented() {
        assert_eq!(render("```\nlet x = 1;\n```\n"), "    let x = 1;\n\n");
    }

    #[test]
    fn test_link_url_appended() {
        assert_eq!(
            render("[forum](https://forum.example.com/)"),
            "forum <https://forum.example.com/>\n\n"
        );
    }

    #[test]
    fn test_raw_html_dropped_but_marker_kept() {
        let out = render("<div>x</div>\n\n<!-- fd:node:0:0 -->\n\n<!-- fd:node:5:0 -->\n");
        assert_eq!(out, "<!-- fd:node:0:0 -->\n\n");
    }
}
