//! `obesity.toml` and artifact directory resolution.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use obesity_form::HeightUnit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "obesity.toml";
pub const ARTIFACTS_ENV: &str = "OBESITY_ARTIFACTS";
pub const DEFAULT_ARTIFACTS: &str = "artifacts";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<PathBuf>,
    pub form: FormConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub height_unit: HeightUnit,
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reads `explicit`, or `./obesity.toml` if it exists, or falls back to
    /// the defaults. An explicitly named file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(CONFIG_FILE);
                if !p.exists() {
                    log::debug!("no {CONFIG_FILE}, using defaults");
                    return Ok(Self::default());
                }
                p
            }
        };
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Artifact directory: command line, then environment, then file, then
    /// `artifacts`.
    pub fn resolve_artifacts(&self, cli: Option<&Path>, env: Option<OsString>) -> PathBuf {
        if let Some(dir) = cli {
            return dir.to_path_buf();
        }
        if let Some(dir) = env.filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        self.artifacts
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS))
    }
}
