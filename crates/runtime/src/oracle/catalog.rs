//! [`arena_core::PowerCatalog`] backed by in-memory maps.
use std::collections::HashMap;

use arena_content::CatalogData;
use arena_core::{PowerCatalog, PowerDefinition, PowerId, Rarity, RarityId};

/// PowerCatalog implementation with static power and rarity definitions
pub struct CatalogOracleImpl {
    powers: HashMap<PowerId, PowerDefinition>,
    rarities: HashMap<RarityId, Rarity>,
}

impl CatalogOracleImpl {
    pub fn new() -> Self {
        Self {
            powers: HashMap::new(),
            rarities: HashMap::new(),
        }
    }

    /// Builds the oracle from a loaded content catalog.
    pub fn from_content(data: CatalogData) -> Self {
        let mut oracle = Self::new();
        for rarity in data.rarities {
            oracle.add_rarity(rarity);
        }
        for power in data.powers {
            oracle.add_power(power);
        }
        oracle
    }

    /// Add a power definition
    pub fn add_power(&mut self, power: PowerDefinition) {
        self.powers.insert(power.id, power);
    }

    /// Add a rarity tier
    pub fn add_rarity(&mut self, rarity: Rarity) {
        self.rarities.insert(rarity.id, rarity);
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }
}

impl Default for CatalogOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerCatalog for CatalogOracleImpl {
    fn power(&self, id: PowerId) -> Option<PowerDefinition> {
        self.powers.get(&id).cloned()
    }

    fn rarity(&self, id: RarityId) -> Option<Rarity> {
        self.rarities.get(&id).cloned()
    }

    fn powers(&self) -> Vec<PowerDefinition> {
        let mut powers: Vec<PowerDefinition> = self.powers.values().cloned().collect();
        powers.sort_by_key(|power| power.id);
        powers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_content::CatalogLoader;

    #[test]
    fn embedded_content_builds_a_spin_table() {
        let oracle = CatalogOracleImpl::from_content(CatalogLoader::embedded().unwrap());

        let table = oracle.spin_table();
        assert_eq!(table.len(), oracle.powers().len());
        assert!(
            table
                .windows(2)
                .all(|pair| pair[0].drop_chance <= pair[1].drop_chance)
        );
        assert_eq!(table[0].rarity_name, "Legendary");
    }
}
