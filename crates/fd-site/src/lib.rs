//! Static site builder for forumdocs.
//!
//! [`SiteBuilder`] renders every markdown page under the project's source
//! directory for the configured output target, runs the extensions'
//! page-context hooks, wraps each page in the target's template and writes
//! it to the output directory.

mod builder;
mod scanner;
mod template;

pub use builder::{BuildError, BuildSummary, SiteBuilder};
