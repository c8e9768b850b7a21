use anyhow::{anyhow, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

use board::File;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Positions kept per game, the start position included.
    pub max_plies: usize,
    /// File whose pawns the bucket and fate classifiers follow.
    pub distinguished_file: File,
    /// Games where either side has fewer exposed observations are left out of a batch.
    pub min_exposure: usize,
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_plies == 0 {
            return Err(anyhow!("max_plies must be at least 1"));
        }

        Ok(())
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_plies: 24,
            distinguished_file: File::new(5),
            min_exposure: 64,
        }
    }
}

impl Config for AnalysisOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        let distinguished_file = match config.get("distinguished_file") {
            Some(value) => value
                .as_string()
                .ok_or_else(|| anyhow!("distinguished_file must be a file letter"))?
                .parse()?,
            None => defaults.distinguished_file,
        };

        let options = Self {
            max_plies: usize_option(config, "max_plies")?.unwrap_or(defaults.max_plies),
            distinguished_file,
            min_exposure: usize_option(config, "min_exposure")?.unwrap_or(defaults.min_exposure),
        };

        options.validate()?;

        Ok(options)
    }
}

fn usize_option(config: &ConfigLoader, name: &str) -> Result<Option<usize>> {
    config
        .get(name)
        .map(|v| {
            v.as_usize()
                .ok_or_else(|| anyhow!("{} must be a non-negative integer, got {:?}", name, v))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(doc: &str) -> Result<AnalysisOptions> {
        ConfigLoader::from_contents(doc, "spbts".to_string())?.load()
    }

    #[test]
    fn test_defaults_when_keys_missing() {
        let options = load("other { max_plies = 3 }").unwrap();

        assert_eq!(options, AnalysisOptions::default());
        assert_eq!(options.distinguished_file.letter(), 'f');
    }

    #[test]
    fn test_values_from_scope() {
        let options = load(
            r#"spbts {
                max_plies = 40
                distinguished_file = "c"
                min_exposure = 0
            }"#,
        )
        .unwrap();

        assert_eq!(options.max_plies, 40);
        assert_eq!(options.distinguished_file.letter(), 'c');
        assert_eq!(options.min_exposure, 0);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(load("spbts { max_plies = 0 }").is_err());
        assert!(load("spbts { max_plies = -4 }").is_err());
        assert!(load("spbts { distinguished_file = \"z\" }").is_err());
    }
}
