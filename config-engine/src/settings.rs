use crate::error::Result;
use crate::providers::{default_sources, ConfigSource};
use crate::validation;
use crypto::HasherConfig;
use database_layer::StoreConfig;
use figment::providers::Serialized;
use figment::Figment;
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete runtime configuration of a CareLog deployment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarelogSettings {
    pub storage: StoreConfig,
    pub security: HasherConfig,
    pub logging: LoggerConfig,
}

impl CarelogSettings {
    /// Load defaults, then the config file, then `CARELOG_` environment
    /// overrides, and validate the result.
    ///
    /// An explicit `path` must exist. Without one, `carelog.yaml`,
    /// `carelog.yml` or `carelog.toml` in the working directory is used when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(&default_sources(path))
    }

    /// Load from an explicit list of sources, lowest precedence first
    pub fn load_from(sources: &[ConfigSource]) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        for source in sources {
            figment = source.merge_into(figment)?;
        }

        let settings: Self = figment.extract()?;
        settings.validate()?;

        tracing::debug!(
            data_file = %settings.storage.data_file.display(),
            scheme = ?settings.security.scheme,
            "Configuration loaded"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}
