//! Literal-text tracking.
//!
//! Directive syntax is literal text, never dispatched to handlers, inside
//! fenced code blocks, indented code blocks and HTML comments.

/// Line-by-line literal context.
///
/// - A fence opens with three or more backticks or tildes and closes with a
///   line of the same character that is at least as long.
/// - An indented code block starts with a line indented four or more columns
///   that does not continue a paragraph, and runs until the next non-blank
///   line with less indentation. Lines indented that far inside list items
///   are treated the same way.
/// - An HTML comment runs from `<!--` to the next `-->`, possibly lines
///   later. Comment openers inside inline code spans are ignored.
#[derive(Debug)]
pub(crate) struct LiteralTracker {
    fence: Option<(char, usize)>,
    in_comment: bool,
    in_indented_code: bool,
    /// Whether the next line may start an indented code block.
    code_may_start: bool,
}

impl Default for LiteralTracker {
    fn default() -> Self {
        Self {
            fence: None,
            in_comment: false,
            in_indented_code: false,
            code_may_start: true,
        }
    }
}

impl LiteralTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed one line. Returns `true` if the line is literal text.
    pub(crate) fn is_literal(&mut self, line: &str) -> bool {
        if let Some(open) = self.fence {
            if closes_fence(line, open) {
                self.fence = None;
                self.code_may_start = true;
            }
            return true;
        }

        if self.in_comment {
            self.in_comment = comment_open_after(line, true);
            self.code_may_start = !self.in_comment;
            return true;
        }

        if line.trim().is_empty() {
            self.code_may_start = true;
            return self.in_indented_code;
        }

        if indentation(line) >= 4 && (self.in_indented_code || self.code_may_start) {
            self.in_indented_code = true;
            return true;
        }
        self.in_indented_code = false;

        let trimmed = line.trim_start();
        if let Some(run) = fence_run(trimmed) {
            self.fence = Some(run);
            return true;
        }

        if comment_open_after(line, false) {
            self.in_comment = true;
            return true;
        }

        self.code_may_start = trimmed.starts_with('#');
        false
    }
}

/// Leading run of three or more backticks or tildes.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == first).count();
    (len >= 3).then_some((first, len))
}

fn closes_fence(line: &str, (open_ch, open_len): (char, usize)) -> bool {
    let trimmed = line.trim_start();
    fence_run(trimmed).is_some_and(|(ch, len)| {
        ch == open_ch && len >= open_len && trimmed[len..].trim().is_empty()
    })
}

/// Indentation width in columns, with tabs advancing to the next multiple
/// of four.
fn indentation(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => break,
        }
    }
    width
}

/// Whether an HTML comment is still open at the end of `line`, given
/// whether one was open at its start.
fn comment_open_after(line: &str, mut open: bool) -> bool {
    let mut rest = line;
    loop {
        if open {
            match rest.find("-->") {
                Some(pos) => {
                    rest = &rest[pos + 3..];
                    open = false;
                }
                None => return true,
            }
        } else {
            let Some(pos) = next_comment_start(rest) else {
                return false;
            };
            rest = &rest[pos + 4..];
            open = true;
        }
    }
}

/// Byte offset of the next `<!--` outside inline code spans.
fn next_comment_start(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let run = backtick_run(&bytes[i..]);
            let after = i + run;
            // An unmatched run is literal backticks.
            i = match find_closing_run(&bytes[after..], run) {
                Some(end) => after + end + run,
                None => after,
            };
        } else if bytes[i..].starts_with(b"<!--") {
            return Some(i);
        } else {
            i += 1;
        }
    }
    None
}

/// Offset of a backtick run exactly `len` long.
fn find_closing_run(bytes: &[u8], len: usize) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let run = backtick_run(&bytes[i..]);
            if run == len {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

fn backtick_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b == b'`').count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn literal_lines(input: &str) -> Vec<bool> {
        let mut tracker = LiteralTracker::new();
        input.lines().map(|line| tracker.is_literal(line)).collect()
    }

    #[test]
    fn test_backtick_fence() {
        assert_eq!(
            literal_lines("```toml\n::discourse{topic_identifier=1}\n```\n::after"),
            vec![true, true, true, false]
        );
    }

    #[test]
    fn test_tilde_fence_not_closed_by_backticks() {
        assert_eq!(
            literal_lines("~~~\n```\n::x\n~~~~\n::y"),
            vec![true, true, true, true, false]
        );
    }

    #[test]
    fn test_shorter_run_or_info_string_does_not_close() {
        assert_eq!(literal_lines("````\n```\n::x"), vec![true, true, true]);
        assert_eq!(literal_lines("```\n```rust\n::x"), vec![true, true, true]);
    }

    #[test]
    fn test_inline_code_is_not_a_fence() {
        assert_eq!(literal_lines("``code``\n::x"), vec![false, false]);
    }

    #[test]
    fn test_indented_code_after_blank_line() {
        assert_eq!(
            literal_lines("Usage:\n\n    ::discourse{topic_identifier=\"123\"}\n\n\t::x\n::y"),
            vec![false, false, true, true, true, false]
        );
    }

    #[test]
    fn test_indented_code_at_document_start_and_after_heading() {
        assert_eq!(literal_lines("    ::x"), vec![true]);
        assert_eq!(literal_lines("# Title\n    ::x"), vec![false, true]);
    }

    #[test]
    fn test_indented_line_continuing_paragraph() {
        assert_eq!(literal_lines("Some text\n    ::x"), vec![false, false]);
    }

    #[test]
    fn test_indented_fence_is_code() {
        assert_eq!(literal_lines("    ```\n::x"), vec![true, false]);
    }

    #[test]
    fn test_multiline_comment() {
        assert_eq!(
            literal_lines("<!--\n::discourse{topic_identifier=\"1\"}\n-->\n\n::x"),
            vec![true, true, true, false, false]
        );
    }

    #[test]
    fn test_single_line_comment_closes() {
        assert_eq!(literal_lines("<!-- note -->\n::x"), vec![false, false]);
        assert_eq!(literal_lines("a <!-- b --> c <!-- d\n::x\ne -->"), vec![true, true, true]);
    }

    #[test]
    fn test_comment_reopened_on_closing_line() {
        assert_eq!(
            literal_lines("<!--\n--> <!--\n::x\n-->\n::y"),
            vec![true, true, true, true, false]
        );
    }

    #[test]
    fn test_comment_opener_in_code_span_ignored() {
        assert_eq!(literal_lines("Write `<!--` to comment.\n::x"), vec![false, false]);
        assert_eq!(literal_lines("``a ` <!--``\n::x"), vec![false, false]);
    }

    #[test]
    fn test_comment_opener_after_unmatched_backtick() {
        assert_eq!(literal_lines("a ` <!--\n::x"), vec![true, true]);
    }

    #[test]
    fn test_multibyte_text_before_comment() {
        assert_eq!(literal_lines("Привет `код` <!--\n::x\n-->"), vec![true, true, true]);
    }

    #[test]
    fn test_indentation_width() {
        assert_eq!(indentation("    x"), 4);
        assert_eq!(indentation("  \tx"), 4);
        assert_eq!(indentation("x"), 0);
    }
}
