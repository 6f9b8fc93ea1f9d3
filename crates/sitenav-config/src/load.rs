//! Configuration file loading.
//!
//! Reads a site configuration file into a raw value tree, resolves the
//! source directory relative to the file, and applies CLI overrides. The
//! format is chosen by extension: TOML, JSON or YAML.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ConfigError;
use crate::model::{ResolvedSiteModel, resolve};
use crate::raw::expect_str;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "sitenav.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override `basePath`.
    pub base_path: Option<String>,
    /// Override the source directory.
    pub source_dir: Option<PathBuf>,
}

/// Supported configuration file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parse file content into a raw value tree.
    ///
    /// # Errors
    ///
    /// Returns the format's parse error.
    pub fn parse(self, content: &str) -> Result<Value, ConfigError> {
        Ok(match self {
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        })
    }
}

/// Loaded, not yet resolved, site configuration.
#[derive(Debug)]
pub struct SiteConfigFile {
    /// Raw configuration tree.
    pub raw: Value,
    /// Absolute source directory for documents.
    pub source_dir: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
}

impl SiteConfigFile {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no file exists, and parse or type
    /// errors if the file cannot be read as a configuration.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config()
                .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))?,
        };

        let mut config = Self::load_from_file(&path)?;
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        Ok(config)
    }

    /// Build from an in-memory raw tree, resolving `srcDir` against `config_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Type` if `srcDir` is not a string.
    pub fn from_raw(raw: Value, config_path: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let src_dir = match raw.get("srcDir").filter(|v| !v.is_null()) {
            Some(value) => expect_str(value, "srcDir")?,
            None => ".",
        };
        let source_dir = normalize(&config_dir.join(src_dir));

        Ok(Self {
            raw,
            source_dir,
            config_path,
        })
    }

    /// Resolve the loaded configuration into a site model.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve(&self) -> Result<ResolvedSiteModel, ConfigError> {
        resolve(&self.raw)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_path) = &settings.base_path
            && let Value::Object(map) = &mut self.raw
        {
            map.insert("basePath".to_owned(), Value::from(base_path.as_str()));
        }
        if let Some(source_dir) = &settings.source_dir {
            self.source_dir.clone_from(source_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let format =
            Format::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;
        let raw = format.parse(&content)?;
        tracing::info!(path = %path.display(), ?format, "Loaded site configuration");
        Self::from_raw(raw, path.to_path_buf())
    }
}

/// Make a path absolute and drop `.` components.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };
    absolute
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
