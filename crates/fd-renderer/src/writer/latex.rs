//! LaTeX fragment writer for print output.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};

use super::push_marker;
use crate::Document;

pub(super) struct LatexWriter<'o> {
    document: &'o Document,
    out: &'o mut String,
    /// Environment to close per open list.
    lists: Vec<&'static str>,
    in_code_block: bool,
}

impl<'o> LatexWriter<'o> {
    pub(super) fn new(document: &'o Document, out: &'o mut String) -> Self {
        Self {
            document,
            out,
            lists: Vec::new(),
            in_code_block: false,
        }
    }

    pub(super) fn run<'a>(mut self, events: impl Iterator<Item = Event<'a>>) {
        for event in events {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(text) if self.in_code_block => self.out.push_str(&text),
                Event::Text(text) => escape_latex(&text, self.out),
                Event::Code(code) => {
                    self.out.push_str("\\texttt{");
                    escape_latex(&code, self.out);
                    self.out.push('}');
                }
                Event::SoftBreak => self.out.push('\n'),
                Event::HardBreak => self.out.push_str("\\\\\n"),
                Event::Rule => self.out.push_str("\\noindent\\rule{\\linewidth}{0.4pt}\n\n"),
                Event::Html(html) => push_marker(&html, self.document, self.out),
                _ => {}
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => self.out.push_str(match level {
                HeadingLevel::H1 => "\\section{",
                HeadingLevel::H2 => "\\subsection{",
                HeadingLevel::H3 => "\\subsubsection{",
                _ => "\\paragraph{",
            }),
            Tag::Emphasis => self.out.push_str("\\emph{"),
            Tag::Strong => self.out.push_str("\\textbf{"),
            Tag::BlockQuote(_) => self.out.push_str("\\begin{quote}\n"),
            Tag::List(first) => {
                let env = if first.is_some() { "enumerate" } else { "itemize" };
                self.out.push_str(&format!("\\begin{{{env}}}\n"));
                self.lists.push(env);
            }
            Tag::Item => self.out.push_str("\\item "),
            Tag::CodeBlock(_) => {
                self.in_code_block = true;
                self.out.push_str("\\begin{verbatim}\n");
            }
            Tag::Link { dest_url, .. } => {
                self.out.push_str("\\href{");
                self.out.push_str(&dest_url.replace('%', "\\%").replace('#', "\\#"));
                self.out.push_str("}{");
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => self.out.push_str("}\n\n"),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link => self.out.push('}'),
            TagEnd::Paragraph => {
                self.out
                    .push_str(if self.lists.is_empty() { "\n\n" } else { "\n" });
            }
            TagEnd::BlockQuote(_) => self.out.push_str("\\end{quote}\n\n"),
            TagEnd::Item => {
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
            }
            TagEnd::List(_) => {
                if let Some(env) = self.lists.pop() {
                    self.out.push_str(&format!("\\end{{{env}}}\n\n"));
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.out.push_str("\\end{verbatim}\n\n");
            }
            _ => {}
        }
    }
}

/// Escape LaTeX special characters.
fn escape_latex(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
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
        let document = Document::new("page", crate::OutputTarget::Latex);
        LatexWriter::new(&document, &mut out).run(Parser::new(markdown));
        out
    }

    #[test]
    fn test_heading_and_inline() {
        assert_eq!(
            render("# Intro\n\nUse **bold** and `a_b`."),
            "\\section{Intro}\n\nUse \\textbf{bold} and \\texttt{a\\_b}.\n\n"
        );
    }

    #[test]
    fn test_itemize() {
        assert_eq!(
            render("- one\n- two\n"),
            "\\begin{itemize}\n\\item one\n\\item two\n\\end{itemize}\n\n"
        );
    }

    #[test]
    fn test_verbatim_is_not_escaped() {
        assert_eq!(
            render("```\n50% & more\n```\n"),
            "\\begin{verbatim}\n50% & more\n\\end{verbatim}\n\n"
        );
    }

    #[test]
    fn test_escape_specials() {
        let mut out = String::new();
        escape_latex("100% {x} ~ ^", &mut out);
        assert_eq!(
            out,
            "100\\% \\{x\\} \\textasciitilde{} \\textasciicircum{}"
        );
    }

    #[test]
    fn test_marker_kept() {
        assert_eq!(render("<!-- fd:node:0:3 -->\n"), "<!-- fd:node:0:3 -->\n\n");
        assert_eq!(render("<!-- fd:node:7:3 -->\n"), "");
    }
}
