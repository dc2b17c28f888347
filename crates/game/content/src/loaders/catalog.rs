//! Power catalog loader.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use arena_core::spin::{self, SpinCandidate};
use arena_core::{PowerDefinition, Rarity};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_CATALOG: &str = include_str!("../../data/powers.ron");

/// Catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    pub rarities: Vec<Rarity>,
    pub powers: Vec<PowerDefinition>,
}

/// Loader for the power catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<CatalogData> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<CatalogData> {
        let catalog: CatalogData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse power catalog RON: {}", e))?;
        validate(&catalog)?;
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn embedded() -> LoadResult<CatalogData> {
        Self::parse(EMBEDDED_CATALOG)
    }
}

fn validate(catalog: &CatalogData) -> LoadResult<()> {
    let mut rarity_ids = HashSet::new();
    for rarity in &catalog.rarities {
        if !rarity_ids.insert(rarity.id) {
            anyhow::bail!("duplicate rarity id {}", rarity.id.0);
        }
        if !(rarity.drop_chance >= 0.0 && rarity.drop_chance <= 100.0) {
            anyhow::bail!(
                "rarity {} has drop_chance {} outside 0..=100",
                rarity.name,
                rarity.drop_chance
            );
        }
    }

    let mut power_ids = HashSet::new();
    for power in &catalog.powers {
        if !power_ids.insert(power.id) {
            anyhow::bail!("duplicate power id {}", power.id);
        }
        if !rarity_ids.contains(&power.rarity_id) {
            anyhow::bail!(
                "power {} references unknown rarity {}",
                power.name,
                power.rarity_id.0
            );
        }
        if power.damage < 0 {
            anyhow::bail!("power {} has negative damage", power.name);
        }
    }

    let table = spin_table(catalog);
    if let Some(dead) = spin::unreachable(&table).first() {
        anyhow::bail!(
            "power {} can never be drawn: drop chances before it already reach {}",
            dead.power.name,
            spin::ROLL_RANGE
        );
    }

    Ok(())
}

/// The catalog's powers in spin order, each weighted by its rarity.
fn spin_table(catalog: &CatalogData) -> Vec<SpinCandidate> {
    let rarities: HashMap<_, _> = catalog.rarities.iter().map(|r| (r.id, r)).collect();
    let mut table: Vec<SpinCandidate> = catalog
        .powers
        .iter()
        .filter_map(|power| {
            let rarity = rarities.get(&power.rarity_id)?;
            Some(SpinCandidate {
                power: power.clone(),
                rarity_name: rarity.name.clone(),
                drop_chance: rarity.drop_chance,
            })
        })
        .collect();
    spin::sort_table(&mut table);
    table
}
