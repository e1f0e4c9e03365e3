//! Configuration management for refdoc.
//!
//! Parses `refdoc.toml` configuration files with serde. Without a file the
//! defaults apply.
//!
//! Command-line style overrides can be applied during load via [`Overrides`].
//!
//! ## Example
//!
//! ```toml
//! namespace = "Acme\\Billing"
//!
//! [output]
//! base_path = "/ref"
//!
//! [api]
//! definition = "is_publicly_accessible"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override documented namespace.
    pub namespace: Option<String>,
    /// Override page base path.
    pub base_path: Option<String>,
    /// Override public API definition name.
    pub definition: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace to document (e.g. `Acme\Billing`).
    pub namespace: String,
    /// Output page layout.
    pub output: OutputConfig,
    /// Public API classification.
    pub api: ApiConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output page layout configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory of generated pages, rooted at `/`.
    pub base_path: String,
    /// File name of the API summary page inside `base_path`.
    pub summary_page: String,
    /// File name of the index page generated in every namespace directory.
    pub namespace_index: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_path: "/ref".to_owned(),
            summary_page: "api.md".to_owned(),
            namespace_index: "index.md".to_owned(),
        }
    }
}

/// Public API classification configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Public API definition name (see [`PublicApiKind`]).
    pub definition: String,
    /// Generate pages for every indexed class, not only the public API.
    pub all_classes: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            definition: PublicApiKind::HasTagApi.as_str().to_owned(),
            all_classes: false,
        }
    }
}

impl ApiConfig {
    /// Parse the configured definition name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPublicApiDefinition` for unrecognized names.
    pub fn kind(&self) -> Result<PublicApiKind, ConfigError> {
        self.definition.parse()
    }
}

/// Built-in public API definitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PublicApiKind {
    /// Elements explicitly tagged `@api` (classes inherit from tagged members).
    #[default]
    HasTagApi,
    /// Every user-defined public element not tagged `@internal`.
    IsPubliclyAccessible,
}

impl PublicApiKind {
    /// Canonical configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HasTagApi => "has_tag_api",
            Self::IsPubliclyAccessible => "is_publicly_accessible",
        }
    }
}

impl fmt::Display for PublicApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicApiKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "has_tag_api" | "HasTagApi" => Ok(Self::HasTagApi),
            "is_publicly_accessible" | "IsPubliclyAccessible" => Ok(Self::IsPubliclyAccessible),
            other => Err(ConfigError::UnknownPublicApiDefinition(other.to_owned())),
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
    /// Requested public API definition does not exist.
    #[error("Unknown public API definition: {0} (expected has_tag_api or is_publicly_accessible)")]
    UnknownPublicApiDefinition(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a field to be a plain markdown file name.
fn require_page_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains('/') || !value.ends_with(".md") {
        return Err(ConfigError::Validation(format!(
            "{field} must be a file name ending in .md"
        )));
    }
    Ok(())
}

/// Normalize a page directory: leading `/`, no trailing `/`, root is `/`.
fn normalize_base_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

impl Config {
    /// Create a default configuration documenting `namespace`.
    #[must_use]
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file with optional overrides.
    ///
    /// Without `config_path` the defaults are used. Overrides are applied
    /// before validation.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::read_file(path)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.output.base_path = normalize_base_path(&config.output.base_path);
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails or the configuration is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.output.base_path = normalize_base_path(&config.output.base_path);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(namespace) = &overrides.namespace {
            self.namespace.clone_from(namespace);
        }
        if let Some(base_path) = &overrides.base_path {
            self.output.base_path.clone_from(base_path);
        }
        if let Some(definition) = &overrides.definition {
            self.api.definition.clone_from(definition);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for invalid values and
    /// `ConfigError::UnknownPublicApiDefinition` for an unknown policy name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.namespace, "namespace")?;
        require_page_name(&self.output.summary_page, "output.summary_page")?;
        require_page_name(&self.output.namespace_index, "output.namespace_index")?;
        self.api.kind()?;
        Ok(())
    }

    /// Namespace without leading or trailing separators.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.namespace.trim_matches('\\')
    }

    /// Load configuration from a specific file.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
