use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Deserialize};

use crate::catalog::OutcomeCatalog;
use crate::config::{ConfigError, WheelConfig};
use crate::cooldown::CooldownClock;
use crate::draw::{DrawEngine, DrawError, DrawResult};
use crate::outcome::Outcome;
use crate::rng::RandomSource;

/// Where a session currently is in its spin cycle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    Spinning,
    Result,
}

/// Why a spin request was refused. Both cases are expected, recoverable
/// conditions meant for user feedback, not faults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockReason {
    OnCooldown { remaining_ms: u64 },
    AlreadyInProgress,
}

#[derive(Debug)]
pub enum SpinError {
    Blocked(BlockReason),
    /// The draw itself failed; the session stays idle.
    Draw(DrawError),
    /// `acknowledge` was called with no result waiting.
    NothingToAcknowledge,
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked(BlockReason::OnCooldown { remaining_ms }) => {
                write!(f, "spin blocked: {}ms of cooldown remaining", remaining_ms)
            }
            Self::Blocked(BlockReason::AlreadyInProgress) => {
                write!(f, "spin blocked: a spin is already in progress")
            }
            Self::Draw(e) => write!(f, "draw failed: {}", e),
            Self::NothingToAcknowledge => write!(f, "no result is waiting to be acknowledged"),
        }
    }
}

impl std::error::Error for SpinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Draw(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DrawError> for SpinError {
    fn from(err: DrawError) -> Self {
        Self::Draw(err)
    }
}

/// The state machine around one player's wheel.
///
/// Cycles `Idle -> Spinning -> Result -> Idle` forever; there is no terminal
/// state. The session owns its accumulated rotation so every spin continues
/// turning forward instead of snapping back, and it guarantees at most one
/// draw in flight or awaiting acknowledgment at a time.
///
/// All methods mutate synchronously. The host schedules `reveal` after the
/// presentation delay; nothing here suspends.
pub struct SpinSession {
    engine: DrawEngine,
    clock: Box<dyn CooldownClock>,
    cooldown_ms: u64,
    state: SpinState,
    accumulated_rotation: f64,
    pending: Option<DrawResult>,
}

impl SpinSession {
    pub fn new(engine: DrawEngine, clock: Box<dyn CooldownClock>, cooldown_ms: u64) -> Self {
        Self {
            engine,
            clock,
            cooldown_ms,
            state: SpinState::Idle,
            accumulated_rotation: 0.0,
            pending: None,
        }
    }

    /// Build a session straight from a host configuration, validating the
    /// catalog and spin range.
    pub fn from_config(
        config: WheelConfig,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn CooldownClock>,
    ) -> Result<Self, ConfigError> {
        let WheelConfig { outcomes, min_spins, max_spins, reveal_after_ms, cooldown_ms } = config;
        let catalog = Arc::new(OutcomeCatalog::new(outcomes)?);
        let engine = DrawEngine::new(catalog, min_spins, max_spins, reveal_after_ms, rng)?;
        Ok(Self::new(engine, clock, cooldown_ms))
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    /// Cooldown left on the external clock, mirrored for display.
    pub fn cooldown_remaining_ms(&self) -> u64 {
        self.clock.remaining_ms()
    }

    /// Total forward rotation applied over the session's lifetime.
    pub fn accumulated_rotation(&self) -> f64 {
        self.accumulated_rotation
    }

    pub fn catalog(&self) -> &Arc<OutcomeCatalog> {
        self.engine.catalog()
    }

    /// The finished draw, available once revealed and until acknowledged.
    pub fn last_result(&self) -> Option<&DrawResult> {
        match self.state {
            SpinState::Result => self.pending.as_ref(),
            _ => None,
        }
    }

    /// Start one spin. Valid only while idle with no cooldown left; the
    /// returned instructions tell the renderer where to stop the wheel and
    /// when the result may be shown.
    pub fn request_spin(&mut self) -> Result<&DrawResult, SpinError> {
        if self.state != SpinState::Idle {
            return Err(SpinError::Blocked(BlockReason::AlreadyInProgress));
        }
        let remaining_ms = self.clock.remaining_ms();
        if remaining_ms > 0 {
            return Err(SpinError::Blocked(BlockReason::OnCooldown { remaining_ms }));
        }

        // The draw settles everything before any animation starts; a failure
        // here leaves the session exactly as it was.
        let result = self.engine.draw(self.accumulated_rotation)?;
        log::info!(
            "spin started, stopping at {:.1} degrees, reveal in {}ms",
            result.target_rotation_degrees,
            result.reveal_after_ms,
        );
        self.accumulated_rotation = result.target_rotation_degrees;
        self.state = SpinState::Spinning;
        Ok(&*self.pending.insert(result))
    }

    /// Expose the already-determined result once the presentation delay has
    /// elapsed. No-op outside `Spinning`, so a late or duplicate callback
    /// from the host's scheduler is harmless.
    pub fn reveal(&mut self) -> Option<&Outcome> {
        if self.state != SpinState::Spinning || self.pending.is_none() {
            return None;
        }
        self.state = SpinState::Result;
        let outcome = self.pending.as_ref().map(|result| &result.outcome);
        if let Some(outcome) = outcome {
            log::info!("spin revealed: {}", outcome.label);
        }
        outcome
    }

    /// Claim the revealed result: hands the outcome to the host for
    /// crediting, clears it, re-arms the cooldown, and returns to idle.
    pub fn acknowledge(&mut self) -> Result<Outcome, SpinError> {
        if self.state != SpinState::Result {
            return Err(SpinError::NothingToAcknowledge);
        }
        let result = self.pending.take().ok_or(SpinError::NothingToAcknowledge)?;
        self.state = SpinState::Idle;
        self.clock.arm(self.cooldown_ms);
        log::info!(
            "result '{}' acknowledged, cooldown armed for {}ms",
            result.outcome.id,
            self.cooldown_ms,
        );
        Ok(result.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooldown::ManualClock;
    use crate::outcome::Reward;
    use crate::rng::{SeededRandom, SequenceRandom};

    fn config(weights: &[(&str, f64)], cooldown_ms: u64) -> WheelConfig {
        WheelConfig {
            outcomes: weights
                .iter()
                .map(|(id, weight)| Outcome::new(*id, *id, Reward::Xp { amount: 10 }, *weight))
                .collect(),
            min_spins: 5,
            max_spins: 8,
            reveal_after_ms: 4000,
            cooldown_ms,
        }
    }

    fn session(weights: &[(&str, f64)], cooldown_ms: u64) -> (SpinSession, ManualClock) {
        let clock = ManualClock::new();
        let session = SpinSession::from_config(
            config(weights, cooldown_ms),
            Box::new(SeededRandom::new(3)),
            Box::new(clock.clone()),
        )
        .unwrap();
        (session, clock)
    }

    #[test]
    fn test_full_cycle_returns_to_idle() {
        let (mut session, _clock) = session(&[("xp", 70.0), ("coins", 30.0)], 0);
        assert_eq!(session.state(), SpinState::Idle);
        assert!(session.last_result().is_none());

        let rotation = session.request_spin().unwrap().target_rotation_degrees;
        assert_eq!(session.state(), SpinState::Spinning);
        assert_eq!(session.accumulated_rotation(), rotation);
        // Result stays hidden while the wheel is still animating
        assert!(session.last_result().is_none());

        let revealed = session.reveal().unwrap().id.clone();
        assert_eq!(session.state(), SpinState::Result);
        assert_eq!(session.last_result().unwrap().outcome.id, revealed);

        let claimed = session.acknowledge().unwrap();
        assert_eq!(claimed.id, revealed);
        assert_eq!(session.state(), SpinState::Idle);
        assert!(session.last_result().is_none());
    }

    #[test]
    fn test_second_request_is_rejected_while_spinning() {
        let (mut session, _clock) = session(&[("xp", 100.0)], 0);
        assert!(session.request_spin().is_ok());
        let err = session.request_spin().unwrap_err();
        assert!(matches!(err, SpinError::Blocked(BlockReason::AlreadyInProgress)));
        assert_eq!(session.state(), SpinState::Spinning);
    }

    #[test]
    fn test_request_rejected_while_result_unclaimed() {
        let (mut session, _clock) = session(&[("xp", 100.0)], 0);
        session.request_spin().unwrap();
        session.reveal().unwrap();
        let err = session.request_spin().unwrap_err();
        assert!(matches!(err, SpinError::Blocked(BlockReason::AlreadyInProgress)));
    }

    #[test]
    fn test_cooldown_gates_next_spin() {
        let (mut session, clock) = session(&[("xp", 100.0)], 60_000);
        session.request_spin().unwrap();
        session.reveal().unwrap();
        session.acknowledge().unwrap();
        assert_eq!(session.cooldown_remaining_ms(), 60_000);

        let err = session.request_spin().unwrap_err();
        assert!(matches!(
            err,
            SpinError::Blocked(BlockReason::OnCooldown { remaining_ms: 60_000 })
        ));
        assert_eq!(session.state(), SpinState::Idle);

        clock.advance(60_000);
        assert!(session.request_spin().is_ok());
    }

    #[test]
    fn test_degenerate_catalog_leaves_session_idle() {
        let (mut session, _clock) = session(&[("a", 0.0), ("b", 0.0)], 0);
        let err = session.request_spin().unwrap_err();
        assert!(matches!(err, SpinError::Draw(DrawError::DegenerateDistribution { .. })));
        assert_eq!(session.state(), SpinState::Idle);
        assert_eq!(session.accumulated_rotation(), 0.0);
    }

    #[test]
    fn test_reveal_outside_spinning_is_noop() {
        let (mut session, _clock) = session(&[("xp", 100.0)], 0);
        assert!(session.reveal().is_none());
        session.request_spin().unwrap();
        session.reveal().unwrap();
        // A duplicate reveal callback must not disturb the result state
        assert!(session.reveal().is_none());
        assert_eq!(session.state(), SpinState::Result);
    }

    #[test]
    fn test_acknowledge_requires_a_result() {
        let (mut session, _clock) = session(&[("xp", 100.0)], 0);
        assert!(matches!(session.acknowledge(), Err(SpinError::NothingToAcknowledge)));
        session.request_spin().unwrap();
        assert!(matches!(session.acknowledge(), Err(SpinError::NothingToAcknowledge)));
        assert_eq!(session.state(), SpinState::Spinning);
    }

    #[test]
    fn test_rotation_accumulates_across_cycles() {
        let (mut session, _clock) = session(&[("a", 25.0), ("b", 25.0), ("c", 25.0), ("d", 25.0)], 0);
        let mut previous = 0.0;
        for _ in 0..25 {
            let rotation = session.request_spin().unwrap().target_rotation_degrees;
            assert!(rotation > previous);
            previous = rotation;
            session.reveal().unwrap();
            session.acknowledge().unwrap();
        }
    }

    #[test]
    fn test_scripted_draw_reaches_the_host_intact() {
        let clock = ManualClock::new();
        let rng = SequenceRandom::new(vec![0.80, 0.0]);
        let mut session = SpinSession::from_config(
            config(&[("xp", 70.0), ("coins", 25.0), ("chest", 5.0)], 0),
            Box::new(rng),
            Box::new(clock),
        )
        .unwrap();
        session.request_spin().unwrap();
        assert_eq!(session.reveal().unwrap().id, "coins");
        assert_eq!(session.acknowledge().unwrap().id, "coins");
    }
}
