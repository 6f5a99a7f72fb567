//! Discourse extension errors.

use fd_renderer::ExtensionError;

/// Error category reported for every discourse failure.
pub const ERROR_CATEGORY: &str = "Discourse option error";

/// Misuse of the `::discourse` directive or a bad `discourse_url`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscourseError {
    /// The directive has no usable `topic_identifier` option.
    #[error("No topic_identifier option found in ::discourse directive.")]
    MissingTopicIdentifier,

    /// The directive appears more than once in one page.
    #[error("::discourse directive found more than once in the same file.")]
    DuplicateDirective,

    /// A page uses the directive but `discourse_url` is unset or empty.
    #[error("::discourse directive found, but discourse_url is not set")]
    UrlNotSet,

    /// `discourse_url` is not an http(s) URL ending in a slash.
    #[error(
        "::discourse directive found, but discourse_url is not set properly \
         (must be a valid URL starting with http:// or https:// and ending with trailing slash): '{0}'"
    )]
    UrlMalformed(String),
}

impl From<DiscourseError> for ExtensionError {
    fn from(err: DiscourseError) -> Self {
        ExtensionError::new(ERROR_CATEGORY, err.to_string())
    }
}
