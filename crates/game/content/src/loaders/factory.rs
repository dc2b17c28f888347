//! Content factory for loading arena data from a directory.

use std::path::PathBuf;

use arena_core::GameConfig;

use crate::loaders::{CatalogData, CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads arena content from an optional data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── powers.ron
/// ```
///
/// Files absent from the directory (or no directory at all) fall back to the
/// embedded defaults.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a factory reading from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Creates a factory that only serves embedded content.
    pub fn embedded() -> Self {
        Self { data_dir: None }
    }

    /// Load the rule table from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match self.existing("config.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => ConfigLoader::embedded(),
        }
    }

    /// Load the power catalog from `powers.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogData> {
        match self.existing("powers.ron") {
            Some(path) => CatalogLoader::load(&path),
            None => CatalogLoader::embedded(),
        }
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.as_ref()?.join(file);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "starting_hp = 15").unwrap();

        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap().starting_hp, 15);
        assert_eq!(
            factory.load_catalog().unwrap().powers.len(),
            CatalogLoader::embedded().unwrap().powers.len()
        );
    }

    #[test]
    fn embedded_factory_serves_defaults() {
        let factory = ContentFactory::embedded();
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }
}
