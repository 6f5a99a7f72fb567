//! Site build driver.

use std::fs;
use std::path::PathBuf;

use fd_config::{Config, ProjectConfig};
use fd_renderer::{
    Extension, ExtensionConfig, ExtensionError, PageContext, PageRenderer, Registry, RenderError,
};

use crate::scanner::{self, SourcePage};
use crate::template;

/// Error returned by [`SiteBuilder::build`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Creating the output directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Reading a source page failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Source file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing an output page failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Output file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A directive failed while rendering a page.
    #[error("{0}")]
    Render(#[from] RenderError),
    /// A page-context hook failed.
    #[error("{page}: {source}")]
    Hook {
        /// Page name.
        page: String,
        #[source]
        source: ExtensionError,
    },
}

/// Result of a successful build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of pages written.
    pub pages: usize,
    /// Non-fatal problems, prefixed with the page name.
    pub warnings: Vec<String>,
}

/// Builds a documentation site from a project configuration.
pub struct SiteBuilder {
    project: ProjectConfig,
    registry: Registry,
    extension_config: ExtensionConfig,
}

impl SiteBuilder {
    /// Create a builder, loading `extensions` in order.
    ///
    /// Extension settings from `[extensions]` are resolved against the keys
    /// the extensions declare.
    #[must_use]
    pub fn new(config: &Config, extensions: &[&dyn Extension]) -> Self {
        let mut registry = Registry::new();
        for extension in extensions {
            registry.load(*extension);
        }
        let extension_config = registry.resolve_config(&config.extensions);

        Self {
            project: config.project.clone(),
            registry,
            extension_config,
        }
    }

    /// Extension registry used for the build.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render and write every page.
    ///
    /// Stops at the first failing page.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a page cannot be read, rendered, finished by
    /// a hook, or written.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let target = self.project.builder;
        let pages = scanner::scan(&self.project.source_dir);
        if pages.is_empty() {
            tracing::warn!(
                source_dir = %self.project.source_dir.display(),
                "No markdown pages found"
            );
        }

        fs::create_dir_all(&self.project.output_dir)?;

        let renderer = PageRenderer::new(&self.registry, target);
        let mut summary = BuildSummary::default();
        for page in &pages {
            self.build_page(&renderer, page, &mut summary)?;
        }

        tracing::info!(
            pages = summary.pages,
            warnings = summary.warnings.len(),
            target = %target,
            output_dir = %self.project.output_dir.display(),
            "Build finished"
        );
        Ok(summary)
    }

    fn build_page(
        &self,
        renderer: &PageRenderer<'_>,
        page: &SourcePage,
        summary: &mut BuildSummary,
    ) -> Result<(), BuildError> {
        let target = renderer.target();
        let markdown = fs::read_to_string(&page.path).map_err(|source| BuildError::Read {
            path: page.path.clone(),
            source,
        })?;

        let rendered = renderer.render(&page.name, Some(&page.path), &markdown)?;
        for warning in &rendered.warnings {
            tracing::warn!(page = %page.name, "{warning}");
            summary.warnings.push(format!("{}: {warning}", page.name));
        }

        let mut ctx = PageContext {
            pagename: rendered.name,
            title: rendered.title,
            body: rendered.body,
        };
        if target.is_html_family() {
            self.registry
                .emit_page_context(
                    target,
                    &mut ctx,
                    Some(&rendered.document),
                    &self.extension_config,
                )
                .map_err(|source| BuildError::Hook {
                    page: page.name.clone(),
                    source,
                })?;
        }

        let output = template::render_page(target, &ctx, &self.project.title);
        let path = self
            .project
            .output_dir
            .join(format!("{}.{}", page.name, target.file_extension()));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Write {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(&path, output).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(page = %page.name, path = %path.display(), "Wrote page");
        summary.pages += 1;
        Ok(())
    }
}
