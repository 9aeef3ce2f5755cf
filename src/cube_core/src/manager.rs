use crate::{
    Color, CoreState, CubeMap, Facelet, FaceletLedger, Turn,
    animation::{AnimationEvent, TurnTicket},
    links::LinkInferenceError,
};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};
use thiserror::Error;

pub const DEFAULT_DURATION_MS: f64 = 500.0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerError {
    #[error("No turn is in flight")]
    NothingInFlight,
    #[error("Turn ticket {0:?} is stale, the turn in flight is {1:?}")]
    StaleTicket(TurnTicket, TurnTicket),
}

struct InFlight {
    ticket: TurnTicket,
    turn: Turn,
}

struct ManagerInner {
    state: CoreState,
    queue: VecDeque<Turn>,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

/// Serializes turn requests against one cube.
///
/// Requests from any thread land in a FIFO queue. At most one turn is in
/// flight at a time. Without an animation channel every turn commits as
/// soon as it is dequeued. With one, each dequeued turn is announced as an
/// [`AnimationEvent::Start`] and only commits once the animator calls
/// [`CubeManager::complete_turn`].
pub struct CubeManager {
    inner: Mutex<ManagerInner>,
    animation: Option<Sender<AnimationEvent>>,
    duration_ms: f64,
}

impl CubeManager {
    /// A manager whose turns commit immediately.
    #[must_use]
    pub fn new(state: CoreState) -> Self {
        CubeManager {
            inner: Mutex::new(ManagerInner {
                state,
                queue: VecDeque::new(),
                in_flight: None,
                next_ticket: 0,
            }),
            animation: None,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    /// A manager whose turns are played out by whoever drains the
    /// returned receiver.
    #[must_use]
    pub fn with_animation(state: CoreState, duration_ms: f64) -> (Self, Receiver<AnimationEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut manager = CubeManager::new(state);
        manager.animation = Some(tx);
        manager.duration_ms = duration_ms;
        (manager, rx)
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    fn lock(&self) -> MutexGuard<'_, ManagerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues `turn`, starting it right away when nothing is in flight.
    pub fn turn(&self, turn: Turn) {
        self.turn_all([turn]);
    }

    pub fn turn_all(&self, turns: impl IntoIterator<Item = Turn>) {
        let mut inner = self.lock();
        for turn in turns {
            debug!(target: "manager", "Queued {turn}");
            inner.queue.push_back(turn);
            if inner.in_flight.is_some() {
                self.announce_queued(&mut inner, turn);
            }
        }
        if inner.in_flight.is_none() {
            self.start_next(&mut inner);
        }
    }

    /// Tells the animator that `turn` waits behind the turn in flight. If
    /// the animator has hung up, the turn in flight and the backlog are
    /// committed directly.
    fn announce_queued(&self, inner: &mut ManagerInner, turn: Turn) {
        let Some(tx) = &self.animation else {
            return;
        };
        let event = AnimationEvent::Queued {
            turn,
            pending: inner.queue.len(),
        };
        if tx.send(event).is_ok() {
            return;
        }

        if let Some(in_flight) = inner.in_flight.take() {
            warn!(target: "manager", "Animator is gone, committing {} directly", in_flight.turn);
            inner.state.apply_turn(in_flight.turn);
        }
        self.start_next(inner);
    }

    /// Commits the turn identified by `ticket` and starts the next queued
    /// one.
    pub fn complete_turn(&self, ticket: TurnTicket) -> Result<(), ManagerError> {
        let mut inner = self.lock();
        let in_flight = inner.in_flight.take().ok_or(ManagerError::NothingInFlight)?;
        if in_flight.ticket != ticket {
            let current = in_flight.ticket;
            inner.in_flight = Some(in_flight);
            return Err(ManagerError::StaleTicket(ticket, current));
        }

        inner.state.apply_turn(in_flight.turn);
        debug!(target: "manager", "Committed {}", in_flight.turn);
        self.start_next(&mut inner);
        Ok(())
    }

    /// Dequeues until a turn is handed to the animator or the queue is
    /// empty. Turns commit in place when there is nobody to animate them.
    fn start_next(&self, inner: &mut ManagerInner) {
        while let Some(turn) = inner.queue.pop_front() {
            let Some(tx) = &self.animation else {
                inner.state.apply_turn(turn);
                debug!(target: "manager", "Committed {turn}");
                continue;
            };

            let ticket = TurnTicket(inner.next_ticket);
            inner.next_ticket += 1;
            let event = AnimationEvent::Start {
                ticket,
                turn,
                rotations: inner.state.rotation_commands(turn),
                duration_ms: self.duration_ms,
            };
            // The channel is unbounded, so this never blocks while locked
            if tx.send(event).is_ok() {
                inner.in_flight = Some(InFlight { ticket, turn });
                return;
            }

            warn!(target: "manager", "Animator is gone, committing {turn} directly");
            inner.state.apply_turn(turn);
        }
    }

    /// Drops queued turns, abandons the turn in flight, and restores the
    /// solved cube.
    pub fn reset_state(&self) {
        let mut inner = self.lock();
        let dropped = inner.queue.len();
        inner.queue.clear();
        if let Some(in_flight) = inner.in_flight.take()
            && let Some(tx) = &self.animation
        {
            // A missing animator has nothing to cancel
            let _ = tx.send(AnimationEvent::Cancel {
                ticket: in_flight.ticket,
            });
        }
        inner.state.reset();
        info!(target: "manager", "Reset cube, dropped {dropped} queued turns");
    }

    /// Whether no turn is queued or in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        let inner = self.lock();
        inner.in_flight.is_none() && inner.queue.is_empty()
    }

    /// Turns queued behind the one in flight.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// A copy of the committed state.
    #[must_use]
    pub fn snapshot(&self) -> CoreState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn ledger(&self) -> FaceletLedger {
        self.lock().state.ledger().clone()
    }

    #[must_use]
    pub fn colors(&self) -> CubeMap<Color> {
        self.lock().state.ledger().colors()
    }

    pub fn set_colors(&self, colors: &CubeMap<Color>) {
        self.lock().state.ledger_mut().set_colors(colors);
    }

    pub fn fill(&self, color: Color) {
        self.lock().state.ledger_mut().fill(color);
    }

    #[must_use]
    pub fn trios(&self) -> CubeMap<Facelet> {
        self.lock().state.ledger().trios()
    }

    pub fn set_trios(&self, trios: &CubeMap<Facelet>) {
        self.lock().state.ledger_mut().set_trios(trios);
    }

    #[must_use]
    pub fn check_links(&self) -> bool {
        self.lock().state.ledger().check_links()
    }

    pub fn infer_links(&self) -> Result<(), LinkInferenceError> {
        self.lock().state.ledger_mut().infer_links()
    }

    /// Queues `count` turns drawn uniformly from the first `range` entries
    /// of [`Turn::ALL`] and returns them.
    pub fn randomize(&self, count: usize, range: usize, rng: &mut fastrand::Rng) -> Vec<Turn> {
        let choices = &Turn::ALL[..range.clamp(1, Turn::ALL.len())];
        let turns = (0..count)
            .filter_map(|_| rng.choice(choices).copied())
            .collect::<Vec<_>>();
        info!(target: "manager", "Scrambling with {}", Turn::format_sequence(&turns));
        self.turn_all(turns.iter().copied());
        turns
    }
}

impl Default for CubeManager {
    fn default() -> Self {
        CubeManager::new(CoreState::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    fn turns(text: &str) -> Vec<Turn> {
        Turn::parse_sequence(text).unwrap()
    }

    #[test_log::test]
    fn immediate_manager_commits_in_order() {
        let manager = CubeManager::default();
        let sequence = turns("X+ Y+ Z-'");
        manager.turn_all(sequence.iter().copied());
        assert!(manager.is_idle());

        let mut expected = FaceletLedger::solved();
        expected.apply_turns(&sequence);
        assert_eq!(manager.ledger(), expected);
        assert!(manager.check_links());
    }

    #[test_log::test]
    fn animated_turns_wait_for_completion() {
        let (manager, rx) = CubeManager::with_animation(CoreState::new(), 10.0);
        manager.turn_all(turns("X+ Y-"));
        assert_eq!(manager.pending(), 1);
        assert!(manager.ledger().is_solved());

        let Ok(AnimationEvent::Start { ticket, turn, rotations, duration_ms }) = rx.try_recv() else {
            panic!("expected a started turn");
        };
        assert_eq!(turn.to_string(), "X+");
        assert_eq!(rotations.len(), 30);
        assert_eq!(duration_ms, 10.0);
        assert!(rx.try_recv().is_err());

        manager.complete_turn(ticket).unwrap();
        assert_eq!(manager.ledger(), FaceletLedger::solved().turned(turn));
        assert_eq!(
            manager.complete_turn(ticket),
            Err(ManagerError::StaleTicket(ticket, TurnTicket(1)))
        );

        let Ok(AnimationEvent::Start { ticket, .. }) = rx.try_recv() else {
            panic!("expected the second turn");
        };
        manager.complete_turn(ticket).unwrap();
        assert!(manager.is_idle());
        assert_eq!(manager.complete_turn(ticket), Err(ManagerError::NothingInFlight));
    }

    #[test_log::test]
    fn reset_cancels_the_turn_in_flight() {
        let (manager, rx) = CubeManager::with_animation(CoreState::new(), 10.0);
        manager.turn_all(turns("Z+ Z+ Z+"));
        let Ok(AnimationEvent::Start { ticket, .. }) = rx.try_recv() else {
            panic!("expected a started turn");
        };
        manager.reset_state();
        assert_eq!(rx.try_recv(), Ok(AnimationEvent::Cancel { ticket }));
        assert!(manager.is_idle());
        assert_eq!(manager.complete_turn(ticket), Err(ManagerError::NothingInFlight));
        assert!(manager.ledger().is_solved());
    }

    #[test_log::test]
    fn dropped_animator_falls_back_to_immediate() {
        let (manager, rx) = CubeManager::with_animation(CoreState::new(), 10.0);
        drop(rx);
        manager.turn_all(turns("X- X-"));
        assert!(manager.is_idle());
        let x_minus = "X-".parse().unwrap();
        assert_eq!(manager.ledger(), FaceletLedger::solved().turned(x_minus).turned(x_minus));
    }

    #[test_log::test]
    fn turns_behind_the_one_in_flight_are_announced() {
        let (manager, rx) = CubeManager::with_animation(CoreState::new(), 10.0);
        manager.turn("X+".parse().unwrap());
        manager.turn("Y+".parse().unwrap());
        manager.turn("Z+".parse().unwrap());
        assert!(matches!(rx.try_recv(), Ok(AnimationEvent::Start { .. })));
        assert_eq!(
            rx.try_recv(),
            Ok(AnimationEvent::Queued {
                turn: "Y+".parse().unwrap(),
                pending: 1
            })
        );
        assert_eq!(
            rx.try_recv(),
            Ok(AnimationEvent::Queued {
                turn: "Z+".parse().unwrap(),
                pending: 2
            })
        );
    }

    #[test_log::test]
    fn animator_hanging_up_mid_turn_commits_the_backlog() {
        let (manager, rx) = CubeManager::with_animation(CoreState::new(), 10.0);
        let x_plus = "X+".parse().unwrap();
        let y_plus = "Y+".parse().unwrap();
        manager.turn(x_plus);
        let Ok(AnimationEvent::Start { ticket, .. }) = rx.try_recv() else {
            panic!("expected a started turn");
        };
        drop(rx);

        manager.turn(y_plus);
        assert!(manager.is_idle());
        assert_eq!(manager.pending(), 0);
        assert_eq!(
            manager.ledger(),
            FaceletLedger::solved().turned(x_plus).turned(y_plus)
        );
        assert_eq!(manager.complete_turn(ticket), Err(ManagerError::NothingInFlight));
    }

    #[test_log::test]
    fn animator_thread_drains_concurrent_requests() {
        let (manager, rx) = CubeManager::with_animation(CoreState::new(), 0.0);
        let manager = Arc::new(manager);
        let animator = {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let mut completed = 0;
                while completed < 8 {
                    if let AnimationEvent::Start { ticket, .. } = rx.recv().unwrap() {
                        manager.complete_turn(ticket).unwrap();
                        completed += 1;
                    }
                }
            })
        };

        let requesters = (0..4)
            .map(|_| {
                let manager = Arc::clone(&manager);
                thread::spawn(move || {
                    manager.turn("Y+".parse().unwrap());
                    manager.turn("Y+".parse().unwrap());
                })
            })
            .collect::<Vec<_>>();
        for requester in requesters {
            requester.join().unwrap();
        }
        animator.join().unwrap();

        // Eight quarter turns of one face bring it back around
        assert!(manager.is_idle());
        assert!(manager.ledger().is_solved());
        assert!(manager.snapshot().cores_home());
    }

    #[test]
    fn randomize_uses_the_requested_range() {
        let manager = CubeManager::default();
        let mut rng = fastrand::Rng::with_seed(7);
        let scramble = manager.randomize(25, 2, &mut rng);
        assert_eq!(scramble.len(), 25);
        assert!(scramble.iter().all(|turn| turn.face() == crate::AxisDirection::XPos));
        assert!(manager.check_links());
    }

    #[test]
    fn painting_clears_links() {
        let manager = CubeManager::default();
        manager.fill(Color::GRAY);
        assert!(manager.colors().iter().all(|(_, _, &color)| color == Color::GRAY));
        assert!(manager.trios().iter().all(|(_, _, facelet)| facelet.source.is_none()));
        manager.set_trios(&FaceletLedger::solved().trios());
        assert!(manager.ledger().is_solved());
        manager.set_colors(&crate::default_colors());
        assert!(manager.infer_links().is_ok());
        assert!(manager.ledger().is_solved());
    }
}
