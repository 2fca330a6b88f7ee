use crate::core::convert::{Converter, Normalizer, REFERENCE_CURRENCY};
use crate::core::currency::CurrencyCode;
use crate::core::rates::RateTable;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_reference_currency() -> CurrencyCode {
    REFERENCE_CURRENCY
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_reference_currency")]
    pub reference_currency: CurrencyCode,
    /// Rates keyed `FROM-TO`, applied on top of the built-in table.
    #[serde(default)]
    pub rates: HashMap<String, f64>,
    /// Start from an empty table instead of the built-in one.
    #[serde(default)]
    pub replace_default_rates: bool,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_currency: REFERENCE_CURRENCY,
            rates: HashMap::new(),
            replace_default_rates: false,
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("app", "moneyconv", "moneyconv")
            .context("Could not determine project directories")
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn rate_table(&self) -> Result<RateTable> {
        let mut table = if self.replace_default_rates {
            RateTable::empty()
        } else {
            RateTable::default()
        };
        table
            .extend_from_pairs(&self.rates)
            .context("Invalid rates in config")?;
        Ok(table)
    }

    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::new(
            Converter::new(self.rate_table()?),
            self.reference_currency,
        ))
    }
}
