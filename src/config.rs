use crate::cli::output::OutputFormat;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCAL_CONFIG_FILE: &str = ".spellfix.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Word list loaded before the session's own dictionary words.
    pub dictionary: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: bool,
    /// Check queries on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            format: OutputFormat::default(),
            color: true,
            parallel: false,
        }
    }
}

/// One config file; every key is optional and only present keys override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    dictionary: Option<PathBuf>,
    format: Option<OutputFormat>,
    color: Option<bool>,
    parallel: Option<bool>,
}

/// Values given on the command line; `None`/`false` leaves the file layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dictionary: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
    pub parallel: bool,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let config = Self::layered(
            Self::global_config_path().as_deref(),
            Path::new(LOCAL_CONFIG_FILE),
        )?;
        Ok(config.apply(overrides))
    }

    /// Defaults merged with the global and then the local file, when present.
    pub fn layered(global: Option<&Path>, local: &Path) -> Result<Self> {
        let mut config = Self::default();

        for path in global.into_iter().chain([local]) {
            if path.exists() {
                debug!(path = %path.display(), "reading config file");
                config = config.merge(Self::from_file(path)?);
            }
        }

        Ok(config)
    }

    fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(dictionary) = overrides.dictionary {
            self.dictionary = Some(dictionary);
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if overrides.no_color {
            self.color = false;
        }
        if overrides.parallel {
            self.parallel = true;
        }
        self
    }

    fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: ConfigFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // Word list paths are relative to the file that names them.
        if let (Some(dictionary), Some(parent)) = (&config.dictionary, path.parent()) {
            if dictionary.is_relative() {
                config.dictionary = Some(parent.join(dictionary));
            }
        }

        Ok(config)
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(dictionary) = file.dictionary {
            self.dictionary = Some(dictionary);
        }
        if let Some(format) = file.format {
            self.format = format;
        }
        if let Some(color) = file.color {
            self.color = color;
        }
        if let Some(parallel) = file.parallel {
            self.parallel = parallel;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
