//! Game rule table loader.

use std::path::Path;

use arena_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// Loader for [`GameConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the rule table from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a rule table from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.starting_hp <= 0 {
            anyhow::bail!("starting_hp must be positive, got {}", config.starting_hp);
        }

        Ok(config)
    }

    /// The rule table bundled with the crate.
    pub fn embedded() -> LoadResult<GameConfig> {
        Self::parse(EMBEDDED_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_matches_defaults() {
        assert_eq!(ConfigLoader::embedded().unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config = ConfigLoader::parse("starting_hp = 20\nqueue_expiry_secs = 60\n").unwrap();

        assert_eq!(config.starting_hp, 20);
        assert_eq!(config.queue_expiry_secs, 60);
        assert_eq!(config.basic_attack_damage, GameConfig::DEFAULT_BASIC_ATTACK_DAMAGE);
    }

    #[test]
    fn rejects_non_positive_hp() {
        assert!(ConfigLoader::parse("starting_hp = 0").is_err());
    }
}
