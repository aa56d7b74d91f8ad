use crate::alphabet::{Alphabet, DEFAULT_SYMBOLS};
use crate::calibration::DEFAULT_FOLDS;
use crate::fuzzy::{self, DEFAULT_THRESHOLD};
use crate::matcher::Algorithm;
use crate::search::EngineConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub fuzzy: FuzzySettings,

    #[serde(default)]
    pub calibration: CalibrationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub algorithm: String,
    pub top_n: usize,
    pub parallel: bool,
    pub alphabet: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AhoCorasick.to_string(),
            top_n: 10,
            parallel: true,
            alphabet: DEFAULT_SYMBOLS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for FuzzySettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSettings {
    #[serde(default = "default_folds")]
    pub folds: usize,
}

fn default_folds() -> usize {
    DEFAULT_FOLDS
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            folds: default_folds(),
        }
    }
}

impl Config {
    /// Load from `explicit` when given, else from the first config file found.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_path(),
        };
        match path {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("cvscan/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".cvscan.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        let current_path = Path::new(".cvscan.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        None
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn algorithm(&self) -> crate::Result<Algorithm> {
        self.search.algorithm.parse()
    }

    pub fn engine_config(&self) -> crate::Result<EngineConfig> {
        Ok(EngineConfig {
            threshold: fuzzy::validate_threshold(self.fuzzy.threshold)?,
            parallel: self.search.parallel,
            alphabet: Alphabet::from(self.search.alphabet.as_str()),
        })
    }
}
