//! Renderer and extension error types.

/// Error raised by an extension (directive handler or page-context hook).
///
/// Extensions report every failure through this one type; the `category`
/// names the extension's error family and the `message` says what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category}: {message}")]
pub struct ExtensionError {
    category: &'static str,
    message: String,
}

impl ExtensionError {
    /// Create a new extension error.
    #[must_use]
    pub fn new(category: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Error family, e.g. `"Discourse option error"`.
    #[must_use]
    pub fn category(&self) -> &'static str {
        self.category
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error from rendering a single page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A directive handler rejected its invocation.
    #[error("{page}:{line}: {source}")]
    Directive {
        /// Page name.
        page: String,
        /// Line of the directive (1-indexed).
        line: usize,
        /// Handler error.
        #[source]
        source: ExtensionError,
    },
}
