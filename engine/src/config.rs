use std::fmt;

use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

use crate::catalog::CatalogError;
use crate::constants::{COOLDOWN_MS, MAX_SPINS, MIN_SPINS, REVEAL_AFTER_MS};
use crate::outcome::{Outcome, Reward};

#[derive(Debug)]
pub enum ConfigError {
    Catalog(CatalogError),
    /// `min_spins` must not exceed `max_spins`.
    SpinRange { min_spins: u32, max_spins: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "invalid catalog: {}", e),
            Self::SpinRange { min_spins, max_spins } => {
                write!(f, "spin range {}..={} is empty", min_spins, max_spins)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatalogError> for ConfigError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

/// Host-supplied wheel configuration. Every field has a stock default, so a
/// JSON config may override just the parts it cares about.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WheelConfig {
    #[serde(default = "default_outcomes")]
    pub outcomes: Vec<Outcome>,
    #[serde(default = "default_min_spins")]
    pub min_spins: u32,
    #[serde(default = "default_max_spins")]
    pub max_spins: u32,
    #[serde(default = "default_reveal_after_ms")]
    pub reveal_after_ms: u64,
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            outcomes: default_outcomes(),
            min_spins: default_min_spins(),
            max_spins: default_max_spins(),
            reveal_after_ms: default_reveal_after_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

fn default_outcomes() -> Vec<Outcome> {
    DEFAULT_WHEEL.clone()
}

fn default_min_spins() -> u32 {
    MIN_SPINS
}

fn default_max_spins() -> u32 {
    MAX_SPINS
}

fn default_reveal_after_ms() -> u64 {
    REVEAL_AFTER_MS
}

fn default_cooldown_ms() -> u64 {
    COOLDOWN_MS
}

/// The stock daily wheel: eight equally-sized wedges whose weights sum to
/// 100, common prizes on top and the epic chest kept rare.
pub static DEFAULT_WHEEL: Lazy<Vec<Outcome>> = Lazy::new(|| {
    vec![
        Outcome::new("xp-small", "50 XP", Reward::Xp { amount: 50 }, 22.0)
            .with_style("#3B82F6", "⭐"),
        Outcome::new("coins-small", "100 Coins", Reward::Coins { amount: 100 }, 22.0)
            .with_style("#F59E0B", "🪙"),
        Outcome::new("xp-big", "250 XP", Reward::Xp { amount: 250 }, 14.0)
            .with_style("#6366F1", "🌟"),
        Outcome::new("coins-big", "500 Coins", Reward::Coins { amount: 500 }, 12.0)
            .with_style("#F97316", "💰"),
        Outcome::new("boost", "2x Boost", Reward::Multiplier { factor: 2.0 }, 10.0)
            .with_style("#A855F7", "⚡"),
        Outcome::new("mystery-item", "Mystery Item", Reward::Item { name: "Mystery Item".into() }, 9.0)
            .with_style("#EC4899", "🎁"),
        Outcome::new("chest-rare", "Rare Chest", Reward::Chest { name: "Rare Chest".into() }, 8.0)
            .with_style("#10B981", "🧰"),
        Outcome::new("chest-epic", "Epic Chest", Reward::Chest { name: "Epic Chest".into() }, 3.0)
            .with_style("#EF4444", "👑"),
    ]
});
