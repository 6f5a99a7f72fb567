//! Discourse topic embedding for forumdocs.
//!
//! Authors add one directive to a page:
//!
//! ```markdown
//! ::discourse{topic_identifier="123"}
//! ```
//!
//! On HTML-family targets the directive becomes a placeholder
//! `<div id ="discourse-comments"></div>`, and after rendering the page gets
//! an inline script that points Discourse's embed loader at the topic. The
//! forum root comes from the `discourse_url` extension setting, which must be
//! an `http(s)` URL with a trailing slash:
//!
//! ```toml
//! [extensions]
//! discourse_url = "https://forum.example.com/"
//! ```
//!
//! The setting is only checked on pages that use the directive.

mod directive;
mod error;
mod hook;
mod node;

use fd_renderer::{Extension, ExtensionMetadata, Registry};

pub use directive::{DIRECTIVE_NAME, DiscourseDirective, TOPIC_IDENTIFIER};
pub use error::{DiscourseError, ERROR_CATEGORY};
pub use hook::{DiscourseHook, EMBED_SCRIPT_PATH, embed_script, validate_base_url};
pub use node::{DiscourseNode, PLACEHOLDER};

/// Extension configuration key holding the forum base URL.
pub const CONFIG_KEY: &str = "discourse_url";

/// Extension version reported to the host.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The discourse extension.
///
/// ```
/// use fd_discourse::DiscourseExtension;
/// use fd_renderer::Registry;
///
/// let mut registry = Registry::new();
/// let metadata = registry.load(&DiscourseExtension);
/// assert_eq!(metadata.version, fd_discourse::VERSION);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscourseExtension;

impl Extension for DiscourseExtension {
    fn name(&self) -> &'static str {
        "discourse"
    }

    fn setup(&self, registry: &mut Registry) -> ExtensionMetadata {
        registry.add_config_value(CONFIG_KEY, None);
        registry.add_directive(|| DiscourseDirective);
        registry.connect_page_context(DiscourseHook);
        ExtensionMetadata {
            version: VERSION.to_owned(),
        }
    }
}
