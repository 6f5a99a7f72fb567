//! Directive argument parsing.
//!
//! Parses the `[content]{#id .class key="value"}` part of a directive.

use std::collections::BTreeMap;

/// Arguments of a directive invocation.
///
/// ```
/// use fd_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("", r#"#thread .wide topic_identifier="123""#);
/// assert_eq!(args.id.as_deref(), Some("thread"));
/// assert_eq!(args.classes, vec!["wide"]);
/// assert_eq!(args.get("topic_identifier"), Some("123"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Bracketed content (empty if absent).
    pub content: String,
    /// `#id` attribute.
    pub id: Option<String>,
    /// `.class` attributes, in source order.
    pub classes: Vec<String>,
    /// `key=value` options.
    pub attrs: BTreeMap<String, String>,
}

impl DirectiveArgs {
    /// Parse bracket content and the attribute string (without braces).
    #[must_use]
    pub fn parse(content: &str, attrs: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Self::default()
        };

        let mut rest = attrs.trim_start();
        while let Some(first) = rest.chars().next() {
            rest = match first {
                '#' => {
                    let (name, tail) = split_selector(&rest[1..]);
                    args.id = Some(name.to_owned());
                    tail
                }
                '.' => {
                    let (name, tail) = split_selector(&rest[1..]);
                    args.classes.push(name.to_owned());
                    tail
                }
                _ => match split_option(rest) {
                    Some((key, value, tail)) => {
                        args.attrs.insert(key.to_owned(), value.to_owned());
                        tail
                    }
                    None => &rest[first.len_utf8()..],
                },
            }
            .trim_start();
        }

        args
    }

    /// Option value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Option value by key, treating an empty value as absent.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }
}

/// Split an `#id` or `.class` name from the rest of the attribute string.
fn split_selector(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Split `key="value"`, `key='value'` or `key=value` from the attribute string.
///
/// Returns `(key, value, rest)`.
fn split_option(s: &str) -> Option<(&str, &str, &str)> {
    let (key, after) = s.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    match after.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let body = &after[1..];
            let close = body.find(quote)?;
            Some((key, &body[..close], &body[close + 1..]))
        }
        _ => {
            let end = after.find(char::is_whitespace).unwrap_or(after.len());
            Some((key, &after[..end], &after[end..]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let args = DirectiveArgs::parse("", "");
        assert_eq!(args, DirectiveArgs::default());
    }

    #[test]
    fn test_double_quoted_option() {
        let args = DirectiveArgs::parse("", r#"topic_identifier="123""#);
        assert_eq!(args.get("topic_identifier"), Some("123"));
    }

    #[test]
    fn test_single_quoted_option_with_spaces() {
        let args = DirectiveArgs::parse("", "title='Release notes'");
        assert_eq!(args.get("title"), Some("Release notes"));
    }

    #[test]
    fn test_unquoted_option() {
        let args = DirectiveArgs::parse("", "topic_identifier=42 height=300");
        assert_eq!(args.get("topic_identifier"), Some("42"));
        assert_eq!(args.get("height"), Some("300"));
    }

    #[test]
    fn test_id_and_compact_classes() {
        let args = DirectiveArgs::parse("", "#comments.wide.dark");
        assert_eq!(args.id.as_deref(), Some("comments"));
        assert_eq!(args.classes, vec!["wide", "dark"]);
    }

    #[test]
    fn test_get_non_empty() {
        let args = DirectiveArgs::parse("", r#"a="" b="  " c="x""#);
        assert_eq!(args.get("a"), Some(""));
        assert_eq!(args.get_non_empty("a"), None);
        assert_eq!(args.get_non_empty("b"), None);
        assert_eq!(args.get_non_empty("c"), Some("x"));
        assert_eq!(args.get_non_empty("missing"), None);
    }

    #[test]
    fn test_unterminated_quote_is_skipped() {
        let args = DirectiveArgs::parse("", r#"title="open"#);
        assert_eq!(args.get("title"), None);
    }
}
