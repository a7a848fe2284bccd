// Configuration sources layered on top of the built-in defaults
use crate::error::{ConfigError, Result};
use figment::providers::{Env, Format, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

/// Prefix of every environment override, e.g. `CARELOG_STORAGE__DATA_FILE`
pub const ENV_PREFIX: &str = "CARELOG_";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Files probed in the working directory when no path is given
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["carelog.yaml", "carelog.yml", "carelog.toml"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A YAML or TOML file, chosen by extension
    File { path: PathBuf, required: bool },
    /// `CARELOG_`-prefixed environment variables
    Env,
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: true,
        }
    }

    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: false,
        }
    }

    /// Merge this source over `figment`; later sources win.
    pub fn merge_into(&self, figment: Figment) -> Result<Figment> {
        match self {
            Self::File { path, required } => {
                if !path.exists() {
                    if *required {
                        return Err(ConfigError::SourceNotFound(path.clone()));
                    }
                    return Ok(figment);
                }
                tracing::debug!(path = %path.display(), "Loading configuration file");
                merge_file(figment, path)
            }
            Self::Env => Ok(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))),
        }
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("yaml" | "yml") => Ok(figment.merge(Yaml::file(path))),
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Sources for a load: the explicit file (required) or the first default file
/// found, followed by the environment.
pub fn default_sources(explicit: Option<&Path>) -> Vec<ConfigSource> {
    let file = match explicit {
        Some(path) => Some(ConfigSource::file(path)),
        None => DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.exists())
            .map(ConfigSource::optional_file),
    };

    file.into_iter().chain(std::iter::once(ConfigSource::Env)).collect()
}
