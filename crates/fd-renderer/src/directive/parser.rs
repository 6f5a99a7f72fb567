//! Leaf directive syntax: `::name[content]{attrs}` on a line of its own.

use super::DirectiveArgs;

/// A leaf directive recognised on a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedDirective {
    pub name: String,
    pub args: DirectiveArgs,
}

/// Parse a line as a leaf directive.
///
/// The directive must fill the whole line (surrounding whitespace aside) and
/// start with exactly two colons. Returns `None` for anything else.
pub(crate) fn parse_leaf_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim();
    let after_colons = trimmed.strip_prefix("::")?;
    if after_colons.starts_with(':') {
        return None;
    }

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let (name, rest) = after_colons.split_at(name_end);
    if !is_valid_directive_name(name) {
        return None;
    }

    let (content, rest) = take_delimited(rest, '[', ']');
    let (attrs, rest) = take_delimited(rest, '{', '}');
    if !rest.trim().is_empty() {
        return None;
    }

    Some(ParsedDirective {
        name: name.to_owned(),
        args: DirectiveArgs::parse(content.unwrap_or_default(), attrs.unwrap_or_default()),
    })
}

/// Valid names contain only alphanumerics, hyphens and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Take a balanced `open ... close` group from the start of `s`.
///
/// Returns the inner text (if the group is present and closed) and the
/// remainder. An unclosed group is left in the remainder.
fn take_delimited(s: &str, open: char, close: char) -> (Option<&str>, &str) {
    if !s.starts_with(open) {
        return (None, s);
    }

    let mut depth = 0usize;
    for (idx, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (Some(&s[1..idx]), &s[idx + 1..]);
            }
        }
    }
    (None, s)
}
