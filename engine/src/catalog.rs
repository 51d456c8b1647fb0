use std::fmt;

use crate::constants::FULL_TURN_DEGREES;
use crate::outcome::Outcome;

#[derive(Debug)]
pub enum CatalogError {
    /// A wheel needs at least one wedge.
    EmptyCatalog,
    /// A weight was negative, NaN, or infinite.
    InvalidWeight { id: String, weight: f64 },
    /// Two outcomes share the same id.
    DuplicateId { id: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "catalog has no outcomes"),
            Self::InvalidWeight { id, weight } => {
                write!(f, "outcome '{}' has invalid weight {}", id, weight)
            }
            Self::DuplicateId { id } => write!(f, "outcome id '{}' appears more than once", id),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The ordered set of outcomes available to a draw. Order matters: it fixes
/// each outcome's wedge position on the wheel and therefore the angle the
/// pointer must land on.
///
/// Every wedge occupies an equal angular slice regardless of its weight.
/// Probability is governed purely by the weight used during selection, never
/// by wedge size, so designers can keep a visually balanced wheel while
/// making rare rewards rare.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeCatalog {
    outcomes: Vec<Outcome>,
}

impl OutcomeCatalog {
    pub fn new(outcomes: Vec<Outcome>) -> Result<Self, CatalogError> {
        if outcomes.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        for outcome in &outcomes {
            if !outcome.weight.is_finite() || outcome.weight < 0.0 {
                return Err(CatalogError::InvalidWeight {
                    id: outcome.id.clone(),
                    weight: outcome.weight,
                });
            }
        }
        for (index, outcome) in outcomes.iter().enumerate() {
            if outcomes[..index].iter().any(|other| other.id == outcome.id) {
                return Err(CatalogError::DuplicateId { id: outcome.id.clone() });
            }
        }
        Ok(Self { outcomes })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Outcome> {
        self.outcomes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }

    pub fn total_weight(&self) -> f64 {
        self.outcomes.iter().map(|outcome| outcome.weight).sum()
    }

    /// Angular size of one wedge.
    pub fn wedge_angle(&self) -> f64 {
        FULL_TURN_DEGREES / self.outcomes.len() as f64
    }

    /// Half-open angular range `[start, end)` of the wedge at `index`,
    /// following catalog order.
    pub fn angular_range(&self, index: usize) -> (f64, f64) {
        let wedge = self.wedge_angle();
        (index as f64 * wedge, (index + 1) as f64 * wedge)
    }

    /// Center angle of the wedge at `index`. Spins land here rather than on
    /// a wedge edge so the pointer never sits on an ambiguous boundary.
    pub fn midpoint(&self, index: usize) -> f64 {
        (index as f64 + 0.5) * self.wedge_angle()
    }

    /// Win probability of each outcome, normalized by the weight total.
    /// Returns all zeros when every weight is zero; such a catalog cannot
    /// be drawn from.
    pub fn odds(&self) -> Vec<f64> {
        let total = self.total_weight();
        if total <= 0.0 {
            return vec![0.0; self.outcomes.len()];
        }
        self.outcomes.iter().map(|outcome| outcome.weight / total).collect()
    }
}
