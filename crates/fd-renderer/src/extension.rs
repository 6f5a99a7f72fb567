//! Extension API.
//!
//! An [`Extension`] registers everything it contributes in
//! [`Extension::setup`]: configuration values it owns, directives, and hooks
//! on the page-context event. The [`Registry`] then hands out fresh directive
//! handlers per document and runs hooks per page.

use std::collections::BTreeMap;

use crate::directive::{DirectiveProcessor, LeafDirective};
use crate::{Document, ExtensionError, OutputTarget};

/// Version descriptor returned by [`Extension::setup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Extension version.
    pub version: String,
}

/// A pluggable set of directives, config values and hooks.
pub trait Extension {
    /// Extension name used in logs.
    fn name(&self) -> &str;

    /// Register the extension's contributions.
    fn setup(&self, registry: &mut Registry) -> ExtensionMetadata;
}

/// Rendered page handed to page-context hooks.
///
/// Hooks may append to or rewrite `body` before the page is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Page name (source path without extension).
    pub pagename: String,
    /// Page title, if the page has one.
    pub title: Option<String>,
    /// Rendered body markup.
    pub body: String,
}

/// Callback run once per page after its body is rendered.
pub trait PageContextHook: Send + Sync {
    /// Inspect the page tree and adjust the page context.
    ///
    /// `document` is `None` for pages that have no node tree.
    fn on_page_context(
        &self,
        target: OutputTarget,
        ctx: &mut PageContext,
        document: Option<&Document>,
        config: &ExtensionConfig,
    ) -> Result<(), ExtensionError>;
}

/// A configuration value declared by an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    /// Key under `[extensions]`.
    pub name: String,
    /// Value used when the project does not set the key.
    pub default: Option<String>,
}

/// Resolved values of every declared configuration key.
///
/// Built once per build from the project configuration and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionConfig {
    values: BTreeMap<String, Option<String>>,
}

impl ExtensionConfig {
    /// Value of a declared key, or `None` if unset or undeclared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name)?.as_deref()
    }

    /// Whether `name` was declared by some extension.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

type DirectiveFactory = Box<dyn Fn() -> Box<dyn LeafDirective> + Send + Sync>;

/// Everything registered by the loaded extensions.
#[derive(Default)]
pub struct Registry {
    extensions: Vec<(String, ExtensionMetadata)>,
    config_values: Vec<ConfigValue>,
    directives: Vec<(String, DirectiveFactory)>,
    page_context_hooks: Vec<Box<dyn PageContextHook>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an extension's setup and record its metadata.
    pub fn load<E: Extension + ?Sized>(&mut self, extension: &E) -> &ExtensionMetadata {
        let metadata = extension.setup(self);
        tracing::info!(
            extension = extension.name(),
            version = %metadata.version,
            "Loaded extension"
        );
        self.extensions.push((extension.name().to_owned(), metadata));
        &self.extensions[self.extensions.len() - 1].1
    }

    /// Declare a configuration value owned by the calling extension.
    pub fn add_config_value(&mut self, name: impl Into<String>, default: Option<&str>) {
        self.config_values.push(ConfigValue {
            name: name.into(),
            default: default.map(str::to_owned),
        });
    }

    /// Register a leaf directive. `make` builds one handler per document.
    pub fn add_directive<D, F>(&mut self, make: F)
    where
        D: LeafDirective + 'static,
        F: Fn() -> D + Send + Sync + 'static,
    {
        let name = make().name().to_owned();
        let factory: DirectiveFactory =
            Box::new(move || Box::new(make()) as Box<dyn LeafDirective>);
        self.directives.push((name, factory));
    }

    /// Connect a hook to the page-context event.
    pub fn connect_page_context<H: PageContextHook + 'static>(&mut self, hook: H) {
        self.page_context_hooks.push(Box::new(hook));
    }

    /// Loaded extensions with their metadata, in load order.
    #[must_use]
    pub fn extensions(&self) -> &[(String, ExtensionMetadata)] {
        &self.extensions
    }

    /// Declared configuration values.
    #[must_use]
    pub fn config_values(&self) -> &[ConfigValue] {
        &self.config_values
    }

    /// Names of the registered directives.
    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().map(|(name, _)| name.as_str())
    }

    /// Hooks connected to the page-context event, in registration order.
    #[must_use]
    pub fn page_context_hooks(&self) -> &[Box<dyn PageContextHook>] {
        &self.page_context_hooks
    }

    /// Build a directive processor with fresh handlers for `document`.
    #[must_use]
    pub fn directive_processor(&self, document: Document) -> DirectiveProcessor {
        self.directives
            .iter()
            .fold(DirectiveProcessor::new(document), |processor, (_, factory)| {
                processor.with_boxed_leaf(factory())
            })
    }

    /// Resolve declared configuration values against project settings.
    ///
    /// Declared keys take the project value if present, else their default.
    /// Project keys no extension declared are ignored with a warning.
    #[must_use]
    pub fn resolve_config(&self, settings: &BTreeMap<String, String>) -> ExtensionConfig {
        for key in settings.keys() {
            if !self.config_values.iter().any(|value| &value.name == key) {
                tracing::warn!(key = %key, "Unknown extension config value");
            }
        }

        let values = self
            .config_values
            .iter()
            .map(|value| {
                let resolved = settings
                    .get(&value.name)
                    .or(value.default.as_ref())
                    .cloned();
                (value.name.clone(), resolved)
            })
            .collect();
        ExtensionConfig { values }
    }

    /// Run every page-context hook, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first hook error.
    pub fn emit_page_context(
        &self,
        target: OutputTarget,
        ctx: &mut PageContext,
        document: Option<&Document>,
        config: &ExtensionConfig,
    ) -> Result<(), ExtensionError> {
        for hook in &self.page_context_hooks {
            hook.on_page_context(target, ctx, document, config)?;
        }
        Ok(())
    }
}
