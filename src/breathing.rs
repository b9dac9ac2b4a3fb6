//! Box-breathing exercise: four equal phases repeated while active.
//!
//! [`BreathingCycle`] is the pure state; [`BreathingTimer`] drives it on a
//! tokio interval and publishes every phase change on a channel.

use crate::constants::BREATHING_PHASE_MS;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    pub fn instruction(self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "دم بگیرید...",
            BreathingPhase::Hold => "نگه دارید...",
            BreathingPhase::Exhale => "بازدم کنید...",
        }
    }
}

/// Phase order within one breath.
pub const CYCLE: [BreathingPhase; 4] = [
    BreathingPhase::Inhale,
    BreathingPhase::Hold,
    BreathingPhase::Exhale,
    BreathingPhase::Hold,
];

/// Instruction shown while the exercise is not running.
pub const IDLE_INSTRUCTION: &str = "شروع کنید";

/// Phase bookkeeping for the exercise screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreathingCycle {
    active: bool,
    step: usize,
}

impl BreathingCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts from the first phase.
    pub fn start(&mut self) {
        self.active = true;
        self.step = 0;
    }

    /// Stops and resets to the first phase.
    pub fn stop(&mut self) {
        self.active = false;
        self.step = 0;
    }

    pub fn toggle(&mut self) {
        if self.active {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Current phase. Idle cycles rest on `Inhale`.
    pub fn phase(&self) -> BreathingPhase {
        CYCLE[self.step % CYCLE.len()]
    }

    pub fn instruction(&self) -> &'static str {
        if self.active {
            self.phase().instruction()
        } else {
            IDLE_INSTRUCTION
        }
    }

    /// Moves to the next phase. Ignored while idle.
    pub fn advance(&mut self) -> BreathingPhase {
        if self.active {
            self.step = (self.step + 1) % CYCLE.len();
        }
        self.phase()
    }
}

/// Background task emitting one phase every [`BREATHING_PHASE_MS`].
///
/// The first phase is sent immediately. The task ends, and the receiver sees
/// the channel close, as soon as the timer is stopped or dropped.
#[derive(Debug)]
pub struct BreathingTimer {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl BreathingTimer {
    /// Spawns the timer on the current tokio runtime.
    pub fn start() -> (Self, mpsc::UnboundedReceiver<BreathingPhase>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut cycle = BreathingCycle::new();
            cycle.start();
            let mut ticker = interval(Duration::from_millis(BREATHING_PHASE_MS));
            let mut first = true;

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        let phase = if first {
                            first = false;
                            cycle.phase()
                        } else {
                            cycle.advance()
                        };
                        if tx.send(phase).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Breathing timer stopped");
        });

        (
            Self {
                token,
                handle: Some(handle),
            },
            rx,
        )
    }

    /// Stops the timer and waits for the task to finish.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for BreathingTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_cycle() {
        let cycle = BreathingCycle::new();
        assert!(!cycle.is_active());
        assert_eq!(cycle.phase(), BreathingPhase::Inhale);
        assert_eq!(cycle.instruction(), "شروع کنید");
    }

    #[test]
    fn test_cycle_order_repeats() {
        let mut cycle = BreathingCycle::new();
        cycle.start();
        assert_eq!(cycle.instruction(), "دم بگیرید...");

        let phases: Vec<BreathingPhase> = (0..5).map(|_| cycle.advance()).collect();
        assert_eq!(
            phases,
            vec![
                BreathingPhase::Hold,
                BreathingPhase::Exhale,
                BreathingPhase::Hold,
                BreathingPhase::Inhale,
                BreathingPhase::Hold,
            ]
        );
    }

    #[test]
    fn test_stop_resets_to_inhale() {
        let mut cycle = BreathingCycle::new();
        cycle.toggle();
        cycle.advance();
        cycle.advance();
        cycle.toggle();

        assert!(!cycle.is_active());
        assert_eq!(cycle.phase(), BreathingPhase::Inhale);
        assert_eq!(cycle.advance(), BreathingPhase::Inhale);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_emits_first_phase_immediately_then_every_period() {
        let (timer, mut rx) = BreathingTimer::start();
        let started = tokio::time::Instant::now();

        assert_eq!(rx.recv().await, Some(BreathingPhase::Inhale));
        assert_eq!(started.elapsed(), Duration::ZERO);

        assert_eq!(rx.recv().await, Some(BreathingPhase::Hold));
        assert_eq!(rx.recv().await, Some(BreathingPhase::Exhale));
        assert_eq!(started.elapsed(), Duration::from_millis(2 * BREATHING_PHASE_MS));

        timer.stop().await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_timer_closes_channel() {
        let (timer, mut rx) = BreathingTimer::start();
        assert_eq!(rx.recv().await, Some(BreathingPhase::Inhale));

        drop(timer);
        assert_eq!(rx.recv().await, None);
    }
}
