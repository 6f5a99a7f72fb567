//! Output targets (builders).

use std::fmt;
use std::str::FromStr;

/// Output format a page is rendered to.
///
/// `Html` and `ReadTheDocs` form the HTML family: they produce HTML bodies
/// and are the only targets that receive page-context hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputTarget {
    /// Plain HTML pages.
    #[default]
    Html,
    /// HTML pages for Read the Docs hosting.
    ReadTheDocs,
    /// LaTeX fragments for print output.
    Latex,
    /// Plain text.
    Text,
}

impl OutputTarget {
    /// All known targets, in declaration order.
    pub const ALL: [Self; 4] = [Self::Html, Self::ReadTheDocs, Self::Latex, Self::Text];

    /// Builder name as written in configuration and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::ReadTheDocs => "readthedocs",
            Self::Latex => "latex",
            Self::Text => "text",
        }
    }

    /// Whether this target renders HTML.
    #[must_use]
    pub fn is_html_family(self) -> bool {
        matches!(self, Self::Html | Self::ReadTheDocs)
    }

    /// File extension for pages written by this target.
    #[must_use]
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Html | Self::ReadTheDocs => "html",
            Self::Latex => "tex",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown builder name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown builder '{0}' (expected one of: html, readthedocs, latex, text)")]
pub struct UnknownTargetError(pub String);

impl FromStr for OutputTarget {
    type Err = UnknownTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| UnknownTargetError(s.to_owned()))
    }
}
