use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use engine::{Outcome, SpinError, SpinSession, SpinState};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::info;

/// What the renderer hears from the service.
#[derive(Debug, Clone)]
pub enum WheelEvent {
    /// The wheel started turning; animate to this absolute angle and keep
    /// the result hidden until the delay elapses.
    SpinStarted {
        target_rotation_degrees: f64,
        reveal_after_ms: u64,
    },
    /// The presentation delay elapsed and the prize may be shown.
    ResultReady { outcome: Outcome },
}

/// Async shell around a [`SpinSession`].
///
/// The session itself is synchronous; this service adds the one async piece
/// the cycle needs, a one-shot reveal timer. The whole gate-draw-schedule
/// sequence runs under a single lock, so concurrent callers cannot get two
/// draws in flight. `dispose` cancels a pending reveal, which keeps a torn
/// down service from mutating the session afterwards.
pub struct SpinService {
    session: Arc<Mutex<SpinSession>>,
    events: UnboundedSender<WheelEvent>,
    reveal_task: Option<JoinHandle<()>>,
}

impl SpinService {
    /// Wrap a session and hand back the renderer's event stream.
    pub fn new(session: SpinSession) -> (Self, UnboundedReceiver<WheelEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let service = Self {
            session: Arc::new(Mutex::new(session)),
            events,
            reveal_task: None,
        };
        (service, receiver)
    }

    pub fn state(&self) -> SpinState {
        lock(&self.session).state()
    }

    pub fn cooldown_remaining_ms(&self) -> u64 {
        lock(&self.session).cooldown_remaining_ms()
    }

    /// Start a spin and schedule its reveal.
    pub fn request_spin(&mut self) -> Result<(), SpinError> {
        let (target_rotation_degrees, reveal_after_ms) = {
            let mut session = lock(&self.session);
            let result = session.request_spin()?;
            (result.target_rotation_degrees, result.reveal_after_ms)
        };

        let _ = self.events.send(WheelEvent::SpinStarted {
            target_rotation_degrees,
            reveal_after_ms,
        });

        let session = Arc::clone(&self.session);
        let events = self.events.clone();
        self.reveal_task = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(reveal_after_ms)).await;
            let outcome = lock(&session).reveal().cloned();
            if let Some(outcome) = outcome {
                info!("🎡 wheel stopped on '{}'", outcome.label);
                let _ = events.send(WheelEvent::ResultReady { outcome });
            }
        }));
        Ok(())
    }

    /// Claim the revealed prize. The caller credits the reward; the service
    /// only returns what was won.
    pub fn acknowledge(&mut self) -> Result<Outcome, SpinError> {
        lock(&self.session).acknowledge()
    }

    /// Cancel the pending reveal, if any. After this the wrapped session is
    /// no longer touched by background work.
    pub fn dispose(&mut self) {
        if let Some(task) = self.reveal_task.take() {
            task.abort();
        }
    }
}

impl Drop for SpinService {
    fn drop(&mut self) {
        self.dispose();
    }
}

// A poisoned lock would only mean another thread panicked mid-transition;
// the session data itself is always consistent, so keep serving.
fn lock(session: &Arc<Mutex<SpinSession>>) -> MutexGuard<'_, SpinSession> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{BlockReason, ManualClock, Outcome, Reward, SeededRandom, WheelConfig};

    fn test_config(reveal_after_ms: u64) -> WheelConfig {
        WheelConfig {
            outcomes: vec![
                Outcome::new("xp", "XP", Reward::Xp { amount: 10 }, 60.0),
                Outcome::new("coins", "Coins", Reward::Coins { amount: 5 }, 40.0),
            ],
            min_spins: 5,
            max_spins: 8,
            reveal_after_ms,
            cooldown_ms: 0,
        }
    }

    fn service(reveal_after_ms: u64) -> (SpinService, UnboundedReceiver<WheelEvent>) {
        let session = SpinSession::from_config(
            test_config(reveal_after_ms),
            Box::new(SeededRandom::new(8)),
            Box::new(ManualClock::new()),
        )
        .unwrap();
        SpinService::new(session)
    }

    #[tokio::test]
    async fn test_reveal_fires_and_result_is_claimable() {
        let (mut service, mut events) = service(10);
        service.request_spin().unwrap();

        let started = events.recv().await.unwrap();
        assert!(matches!(started, WheelEvent::SpinStarted { .. }));

        let ready = events.recv().await.unwrap();
        let outcome = match ready {
            WheelEvent::ResultReady { outcome } => outcome,
            other => panic!("unexpected event {:?}", other),
        };
        assert_eq!(service.state(), SpinState::Result);
        assert_eq!(service.acknowledge().unwrap().id, outcome.id);
        assert_eq!(service.state(), SpinState::Idle);
    }

    #[tokio::test]
    async fn test_dispose_cancels_pending_reveal() {
        let (mut service, mut events) = service(60_000);
        service.request_spin().unwrap();
        assert!(matches!(events.recv().await, Some(WheelEvent::SpinStarted { .. })));

        service.dispose();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The reveal never ran: still spinning, no result event queued
        assert_eq!(service.state(), SpinState::Spinning);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_concurrent_requests_yield_one_spin() {
        let (mut service, mut events) = service(10_000);
        assert!(service.request_spin().is_ok());
        let err = service.request_spin().unwrap_err();
        assert!(matches!(err, SpinError::Blocked(BlockReason::AlreadyInProgress)));

        // Exactly one start event was emitted
        assert!(matches!(events.recv().await, Some(WheelEvent::SpinStarted { .. })));
        assert!(events.try_recv().is_err());
    }
}
