pub mod catalog;
pub mod config;
pub mod constants;
pub mod cooldown;
pub mod draw;
pub mod outcome;
pub mod rng;
pub mod session;

pub use crate::catalog::{CatalogError, OutcomeCatalog};
pub use crate::config::{ConfigError, WheelConfig, DEFAULT_WHEEL};
pub use crate::cooldown::{CooldownClock, ManualClock, MonotonicClock};
pub use crate::draw::{DrawEngine, DrawError, DrawResult};
pub use crate::outcome::{Outcome, Reward};
pub use crate::rng::{OsRandom, RandomSource, SeededRandom, SequenceRandom};
pub use crate::session::{BlockReason, SpinError, SpinSession, SpinState};
