//! Leaf directive trait.

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput};
use crate::ExtensionError;

/// Handler for leaf directives: `::name[content]{attrs}` on a line of its own.
///
/// A fresh handler is created for every document, so handlers may keep
/// per-document state in `&mut self`. Returning an error aborts rendering of
/// the page.
///
/// # Example
///
/// ```
/// use fd_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, LeafDirective};
/// use fd_renderer::{ExtensionError, Node, OutputTarget};
///
/// #[derive(Debug)]
/// struct Rule;
///
/// impl Node for Rule {
///     fn visit(&self, _target: OutputTarget, out: &mut String) {
///         out.push_str("<hr>");
///     }
/// }
///
/// struct RuleDirective;
///
/// impl LeafDirective for RuleDirective {
///     fn name(&self) -> &str { "rule" }
///
///     fn process(
///         &mut self,
///         _args: DirectiveArgs,
///         _ctx: &DirectiveContext,
///     ) -> Result<DirectiveOutput, ExtensionError> {
///         Ok(DirectiveOutput::node(Rule))
///     }
/// }
/// ```
pub trait LeafDirective: Send {
    /// Directive name matched against `::name`.
    fn name(&self) -> &str;

    /// Handle one invocation.
    fn process(
        &mut self,
        args: DirectiveArgs,
        ctx: &DirectiveContext,
    ) -> Result<DirectiveOutput, ExtensionError>;
}
