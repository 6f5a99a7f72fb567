//! Leaf directives for the `CommonMark` generic directive syntax.
//!
//! A leaf directive occupies a line of its own:
//!
//! ```text
//! ::name[content]{#id .class key="value"}
//! ```
//!
//! # Processing
//!
//! 1. **Preprocessing** ([`DirectiveProcessor::process`]): each directive line
//!    is handed to the registered [`LeafDirective`]. A handler may insert a
//!    typed node into the page's document tree, remove the line, leave it
//!    untouched, or fail the page with an [`ExtensionError`](crate::ExtensionError).
//!    Inserted nodes leave a marker line behind.
//!
//! 2. **Post-processing**: once the body is written, the renderer swaps every
//!    marker for the node's output using [`Replacements`].
//!
//! Lines inside fenced or indented code blocks and HTML comments are never
//! treated as directives.

mod args;
mod context;
mod leaf;
mod literal;
mod output;
mod parser;
mod processor;
mod replacements;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use leaf::LeafDirective;
pub use output::DirectiveOutput;
pub use processor::{DirectiveError, DirectiveProcessor};
pub use replacements::Replacements;
