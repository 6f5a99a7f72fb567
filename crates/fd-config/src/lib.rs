//! Configuration management for forumdocs.
//!
//! Parses `fd.toml` with serde and discovers it in the current directory or
//! its parents. CLI settings are applied during load via [`CliSettings`].
//!
//! ```toml
//! [project]
//! source_dir = "docs"
//! output_dir = "_build"
//! builder = "html"
//! title = "My Project"
//!
//! [extensions]
//! discourse_url = "https://forum.example.com/"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `project.title` and every value under `[extensions]` support:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Extension values are not interpreted here. Each extension declares the
//! keys it owns and checks their values when it uses them.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fd_renderer::OutputTarget;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "fd.toml";

/// CLI settings that override configuration file values.
///
/// Only `Some` values (and present extension keys) override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the output target.
    pub builder: Option<OutputTarget>,
    /// Extension values set on the command line, e.g. `discourse_url`.
    pub extensions: BTreeMap<String, String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project section as written in TOML.
    #[serde(rename = "project")]
    project_raw: ProjectConfigRaw,
    /// Extension configuration values, keyed by name.
    pub extensions: BTreeMap<String, String>,

    /// Resolved project configuration (set after loading).
    #[serde(skip)]
    pub project: ProjectConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    builder: Option<String>,
    title: Option<String>,
}

/// Resolved project configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Directory scanned for markdown pages.
    pub source_dir: PathBuf,
    /// Directory the build writes into.
    pub output_dir: PathBuf,
    /// Output target.
    pub builder: OutputTarget,
    /// Project title, used in page titles.
    pub title: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

impl ProjectConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            source_dir: base.join("docs"),
            output_dir: base.join("_build"),
            builder: OutputTarget::default(),
            title: "Documentation".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`project.title`").
        field: String,
        /// Error message (e.g., "${`FORUM_URL`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `fd.toml` in the current directory and its parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// CLI settings are applied after path resolution and take precedence
    /// over file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the title is empty or the source
    /// and output directories coincide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "project.title cannot be empty".to_owned(),
            ));
        }
        if self.project.source_dir == self.project.output_dir {
            return Err(ConfigError::Validation(format!(
                "project.output_dir must differ from project.source_dir ({})",
                self.project.source_dir.display()
            )));
        }
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.project.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.project.output_dir.clone_from(output_dir);
        }
        if let Some(builder) = settings.builder {
            self.project.builder = builder;
        }
        for (key, value) in &settings.extensions {
            self.extensions.insert(key.clone(), value.clone());
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_from(&std::env::current_dir().ok()?)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            project_raw: ProjectConfigRaw::default(),
            extensions: BTreeMap::new(),
            project: ProjectConfig::with_base(base),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(title) = &self.project_raw.title {
            self.project_raw.title = Some(expand::expand_env(title, "project.title")?);
        }
        for (key, value) in &mut self.extensions {
            *value = expand::expand_env(value, &format!("extensions.{key}"))?;
        }
        Ok(())
    }

    /// Resolve the raw project section against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let raw = &self.project_raw;
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let builder = match raw.builder.as_deref() {
            Some(name) => name
                .parse::<OutputTarget>()
                .map_err(|e| ConfigError::Validation(format!("project.builder: {e}")))?,
            None => OutputTarget::default(),
        };

        self.project = ProjectConfig {
            source_dir: resolve(raw.source_dir.as_deref(), "docs"),
            output_dir: resolve(raw.output_dir.as_deref(), "_build"),
            builder,
            title: raw
                .title
                .clone()
                .unwrap_or_else(|| "Documentation".to_owned()),
        };
        Ok(())
    }
}
