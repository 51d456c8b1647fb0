use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Deserialize};

use crate::catalog::OutcomeCatalog;
use crate::config::ConfigError;
use crate::constants::FULL_TURN_DEGREES;
use crate::outcome::Outcome;
use crate::rng::RandomSource;

#[derive(Debug)]
pub enum DrawError {
    /// Every weight in the catalog is zero, so no outcome can be selected.
    /// Picking index 0 here would silently bias results, so the host has to
    /// fix its configuration instead.
    DegenerateDistribution { total: f64 },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateDistribution { total } => {
                write!(f, "cannot draw from a catalog with total weight {}", total)
            }
        }
    }
}

impl std::error::Error for DrawError {}

/// Everything a renderer needs to present one finished draw: the prize, the
/// absolute angle the wheel must stop at, and how long to animate before the
/// result may be shown.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DrawResult {
    pub outcome: Outcome,
    /// Absolute rotation in degrees. Strictly increases across the lifetime
    /// of a session so the wheel always animates forward.
    pub target_rotation_degrees: f64,
    pub reveal_after_ms: u64,
}

/// Performs one fair weighted draw and computes the rotation that lands the
/// pointer on the winner.
///
/// The draw is fully determined before any animation starts; the rotation
/// and spin count are cosmetic and never feed back into selection.
pub struct DrawEngine {
    catalog: Arc<OutcomeCatalog>,
    min_spins: u32,
    max_spins: u32,
    reveal_after_ms: u64,
    rng: Box<dyn RandomSource>,
}

impl DrawEngine {
    pub fn new(
        catalog: Arc<OutcomeCatalog>,
        min_spins: u32,
        max_spins: u32,
        reveal_after_ms: u64,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        if min_spins > max_spins {
            return Err(ConfigError::SpinRange { min_spins, max_spins });
        }
        Ok(Self { catalog, min_spins, max_spins, reveal_after_ms, rng })
    }

    pub fn catalog(&self) -> &Arc<OutcomeCatalog> {
        &self.catalog
    }

    /// Draw one outcome and the rotation that presents it, continuing
    /// forward from `previous_rotation`.
    pub fn draw(&mut self, previous_rotation: f64) -> Result<DrawResult, DrawError> {
        let total = self.catalog.total_weight();
        if total <= 0.0 {
            return Err(DrawError::DegenerateDistribution { total });
        }

        let roll = self.rng.next_f64() * total;
        let winner = self.select(roll);
        let outcome = match self.catalog.get(winner) {
            Some(outcome) => outcome.clone(),
            // select() always returns an in-range index for a non-empty catalog
            None => return Err(DrawError::DegenerateDistribution { total }),
        };
        log::debug!(
            "draw rolled {:.4} of {:.4}, winner '{}' (wedge {})",
            roll,
            total,
            outcome.id,
            winner,
        );

        let target_angle = self.catalog.midpoint(winner);
        let spins = self.spin_count();
        let target_rotation_degrees =
            previous_rotation + f64::from(spins) * FULL_TURN_DEGREES + forward_to(previous_rotation, target_angle);

        Ok(DrawResult {
            outcome,
            target_rotation_degrees,
            reveal_after_ms: self.reveal_after_ms,
        })
    }

    /// Cumulative-distribution sampling: walk the outcomes in catalog order
    /// accumulating weight, and take the first wedge whose cumulative weight
    /// passes the roll. If floating-point drift leaves the roll unconsumed
    /// after the last wedge, the last wedge wins; the walk always terminates
    /// with a valid index.
    fn select(&self, roll: f64) -> usize {
        let mut cumulative = 0.0;
        for (index, outcome) in self.catalog.iter().enumerate() {
            cumulative += outcome.weight;
            if roll < cumulative {
                return index;
            }
        }
        self.catalog.len() - 1
    }

    /// Number of full rotations for this spin, uniform over the configured
    /// inclusive range. Affects presentation only, never the outcome.
    fn spin_count(&mut self) -> u32 {
        let span = f64::from(self.max_spins - self.min_spins + 1);
        let offset = (self.rng.next_f64() * span) as u32;
        (self.min_spins + offset).min(self.max_spins)
    }
}

/// Smallest strictly-positive forward rotation from `previous` that ends at
/// `target_angle` modulo a full turn. Lands in `(0, 360]`, so the wheel
/// keeps moving even when it is already parked on the target angle.
fn forward_to(previous: f64, target_angle: f64) -> f64 {
    let shortfall = (previous + FULL_TURN_DEGREES - target_angle).rem_euclid(FULL_TURN_DEGREES);
    FULL_TURN_DEGREES - shortfall
}
