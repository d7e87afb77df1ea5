//! Ability specifications used to parameterize server-side casts.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Key of the storm strike entry shipped in the default data set.
pub const STORM_STRIKE: &str = "storm_strike";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbilitySpec {
    /// Display name surfaced to players.
    pub name: String,
    /// Item key the caster must hold for the cast to be allowed.
    pub focus_item: String,
    pub cooldown_ms: u64,
    pub strike_count: u32,
    pub strike_interval_ticks: u32,
    pub max_range_m: f32,
    pub damage_per_strike: f32,
}

impl AbilitySpec {
    /// Built-in storm strike tuning, used when no data file overrides it.
    pub fn storm_strike() -> Self {
        Self {
            name: "Storm Strike".to_string(),
            focus_item: "storm_sigil".to_string(),
            cooldown_ms: 60_000,
            strike_count: 3,
            strike_interval_ticks: 10,
            max_range_m: 50.0,
            damage_per_strike: 4.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbilitySpecDb {
    /// Map from ability key (e.g., "storm_strike") to spec
    pub abilities: HashMap<String, AbilitySpec>,
}

fn data_root() -> std::path::PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

impl AbilitySpecDb {
    pub fn load_default() -> Result<Self> {
        let path = data_root().join("config/abilities.toml");
        if path.is_file() {
            let txt = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let db: Self = toml::from_str(&txt).context("parse abilities TOML")?;
            Ok(db)
        } else {
            let mut db = Self::default();
            db.abilities
                .insert(STORM_STRIKE.to_string(), AbilitySpec::storm_strike());
            Ok(db)
        }
    }

    pub fn get(&self, key: &str) -> Option<&AbilitySpec> {
        self.abilities.get(key)
    }
}
