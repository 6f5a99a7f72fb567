//! Markdown page renderer for forumdocs.
//!
//! Pages are rendered for an [`OutputTarget`] (HTML, Read the Docs HTML,
//! LaTeX or plain text). Extensions plug in through the [`Registry`]:
//!
//! - **Directives** ([`directive::LeafDirective`]) run before markdown parsing
//!   and may insert typed [`Node`]s into the page's [`Document`].
//! - **Nodes** render themselves per target via [`Node::visit`] and
//!   [`Node::depart`].
//! - **Page-context hooks** ([`PageContextHook`]) run after the body is
//!   rendered and may rewrite it, with the declared configuration values in
//!   an [`ExtensionConfig`].
//!
//! # Example
//!
//! ```
//! use fd_renderer::{OutputTarget, PageRenderer, Registry};
//!
//! let registry = Registry::new();
//! let page = PageRenderer::new(&registry, OutputTarget::Text)
//!     .render("index", None, "# Hello\n\n**Bold** text")
//!     .unwrap();
//! assert_eq!(page.body, "Hello\n=====\n\nBold text\n\n");
//! ```

pub mod directive;
mod document;
mod error;
mod extension;
mod renderer;
mod target;
mod writer;

pub use document::{Document, Node, NodeId};
pub use error::{ExtensionError, RenderError};
pub use extension::{
    ConfigValue, Extension, ExtensionConfig, ExtensionMetadata, PageContext, PageContextHook,
    Registry,
};
pub use renderer::{PageRenderer, RenderedPage};
pub use target::{OutputTarget, UnknownTargetError};
