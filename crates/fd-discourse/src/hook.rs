//! Page-context hook that appends the Discourse embed script.

use std::sync::LazyLock;

use fd_renderer::{
    Document, ExtensionConfig, ExtensionError, OutputTarget, PageContext, PageContextHook,
};
use regex::Regex;

use crate::{CONFIG_KEY, DiscourseError, DiscourseNode};

/// `http(s)://`, no whitespace, trailing slash.
static BASE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+/$").expect("valid regex"));

/// Script path relative to the forum base URL.
pub const EMBED_SCRIPT_PATH: &str = "javascripts/embed.js";

/// Appends the embed script to HTML pages that contain a [`DiscourseNode`].
#[derive(Debug, Default)]
pub struct DiscourseHook;

impl PageContextHook for DiscourseHook {
    fn on_page_context(
        &self,
        target: OutputTarget,
        ctx: &mut PageContext,
        document: Option<&Document>,
        config: &ExtensionConfig,
    ) -> Result<(), ExtensionError> {
        if !target.is_html_family() {
            return Ok(());
        }
        let Some(document) = document.filter(|doc| doc.contains::<DiscourseNode>()) else {
            return Ok(());
        };

        let base_url = validate_base_url(config.get(CONFIG_KEY))?;
        for node in document.find_all::<DiscourseNode>() {
            ctx.body
                .push_str(&embed_script(base_url, node.topic_identifier()));
            tracing::debug!(
                page = %ctx.pagename,
                topic = node.topic_identifier(),
                "Appended Discourse embed script"
            );
        }
        Ok(())
    }
}

/// Check the configured forum URL.
///
/// # Errors
///
/// [`DiscourseError::UrlNotSet`] if unset or blank,
/// [`DiscourseError::UrlMalformed`] if it is not an http(s) URL ending in `/`.
pub fn validate_base_url(value: Option<&str>) -> Result<&str, DiscourseError> {
    let url = value
        .filter(|url| !url.is_empty())
        .ok_or(DiscourseError::UrlNotSet)?;
    if !BASE_URL.is_match(url) {
        return Err(DiscourseError::UrlMalformed(url.to_owned()));
    }
    Ok(url)
}

/// Inline script that configures `DiscourseEmbed` and loads the embed loader.
#[must_use]
pub fn embed_script(base_url: &str, topic_id: &str) -> String {
    format!(
        "<script type='text/javascript'>
DiscourseEmbed = {{ discourseUrl: '{base_url}', topicId: '{topic_id}' }};
(function() {{
    var d = document.createElement('script'); d.type = 'text/javascript'; d.async = true;
    d.src = DiscourseEmbed.discourseUrl + '{EMBED_SCRIPT_PATH}';
    (document.getElementsByTagName('head')[0] || document.getElementsByTagName('body')[0]).appendChild(d);
}})();
</script>",
        base_url = escape_js(base_url),
        topic_id = escape_js(topic_id),
    )
}

/// Escape a value for a single-quoted JavaScript string inside `<script>`.
fn escape_js(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '<' => out.push_str("\\x3c"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
