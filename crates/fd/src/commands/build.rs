//! `fd build` command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use fd_config::{CliSettings, Config};
use fd_discourse::DiscourseExtension;
use fd_renderer::OutputTarget;
use fd_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover fd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output target: html, readthedocs, latex or text (overrides config).
    #[arg(short, long)]
    builder: Option<OutputTarget>,

    /// Discourse base URL, with trailing slash (overrides config).
    #[arg(long, env = "FD_DISCOURSE_URL")]
    discourse_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let mut extensions = BTreeMap::new();
        if let Some(url) = self.discourse_url {
            extensions.insert(fd_discourse::CONFIG_KEY.to_owned(), url);
        }
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            builder: self.builder,
            extensions,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");

        output.info(&format!("Source: {}", config.project.source_dir.display()));
        output.info(&format!("Output: {}", config.project.output_dir.display()));
        output.info(&format!("Builder: {}", config.project.builder));

        let builder = SiteBuilder::new(&config, &[&DiscourseExtension]);
        for (name, metadata) in builder.registry().extensions() {
            output.info(&format!("Extension: {name} {}", metadata.version));
        }
        let summary = builder.build()?;

        for warning in &summary.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        output.success(&format!(
            "Built {} page(s) to {}",
            summary.pages,
            config.project.output_dir.display()
        ));
        Ok(())
    }
}
