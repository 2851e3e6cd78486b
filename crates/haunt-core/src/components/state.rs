//! Session State
//!
//! The one object every agent shares for session-wide coordination: the
//! hunter registry, the live-hunter counter and the termination flag. All
//! three sit behind a single lock so that "decrement, then decide whether the
//! session is over" is one atomic step.

use std::sync::{Arc, Mutex};
use thiserror::Error;

use haunt_events::EvidenceKind;

use super::agent::{Hunter, HunterId};
use super::room::RoomId;
use crate::sync::lock;

/// The hunter registry is already at its configured capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("hunter registry is full ({capacity} hunters)")]
pub struct RegistryFull {
    pub capacity: usize,
}

#[derive(Debug)]
struct Roster {
    hunters: Vec<Arc<Hunter>>,
    capacity: usize,
    /// Hunters that have not been scared or bored away
    live: usize,
    /// Set once, never cleared
    game_over: bool,
}

/// Session-wide coordination state
#[derive(Debug)]
pub struct SessionState {
    roster: Mutex<Roster>,
}

impl SessionState {
    pub fn new(capacity: usize) -> Self {
        Self {
            roster: Mutex::new(Roster {
                hunters: Vec::with_capacity(capacity),
                capacity,
                live: 0,
                game_over: false,
            }),
        }
    }

    /// Create and register a hunter; its ID is its registry index
    pub fn register(
        &self,
        name: impl Into<String>,
        equipment: EvidenceKind,
        room: RoomId,
    ) -> Result<Arc<Hunter>, RegistryFull> {
        let mut roster = lock(&self.roster);
        if roster.hunters.len() >= roster.capacity {
            return Err(RegistryFull {
                capacity: roster.capacity,
            });
        }

        let hunter = Arc::new(Hunter::new(
            HunterId(roster.hunters.len()),
            name,
            equipment,
            room,
        ));
        roster.hunters.push(Arc::clone(&hunter));
        roster.live += 1;
        Ok(hunter)
    }

    pub fn hunter(&self, id: HunterId) -> Option<Arc<Hunter>> {
        lock(&self.roster).hunters.get(id.0).cloned()
    }

    pub fn hunters(&self) -> Vec<Arc<Hunter>> {
        lock(&self.roster).hunters.clone()
    }

    pub fn live_hunters(&self) -> usize {
        lock(&self.roster).live
    }

    pub fn is_over(&self) -> bool {
        lock(&self.roster).game_over
    }

    /// True if the session is over or nobody is left to haunt
    pub fn should_stop(&self) -> bool {
        let roster = lock(&self.roster);
        roster.game_over || roster.live == 0
    }

    /// Set the termination flag. Returns true for the caller that set it.
    pub fn end(&self) -> bool {
        let mut roster = lock(&self.roster);
        let first = !roster.game_over;
        roster.game_over = true;
        first
    }

    /// Record a hunter walking out, returning how many remain.
    ///
    /// The last hunter out ends the session in the same critical section.
    pub fn hunter_left(&self) -> usize {
        let mut roster = lock(&self.roster);
        roster.live = roster.live.saturating_sub(1);
        if roster.live == 0 {
            roster.game_over = true;
        }
        roster.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_registry_is_capped() {
        let state = SessionState::new(2);
        let a = state.register("A", EvidenceKind::Emf, RoomId(0)).unwrap();
        let b = state.register("B", EvidenceKind::Sound, RoomId(0)).unwrap();

        assert_eq!(a.id(), HunterId(0));
        assert_eq!(b.id(), HunterId(1));
        assert_eq!(
            state.register("C", EvidenceKind::Temperature, RoomId(0)).unwrap_err(),
            RegistryFull { capacity: 2 }
        );
        assert_eq!(state.live_hunters(), 2);
        assert_eq!(state.hunters().len(), 2);
        assert_eq!(state.hunter(HunterId(1)).unwrap().name(), "B");
    }

    #[test]
    fn test_termination_flag_is_set_once() {
        let state = SessionState::new(1);
        assert!(!state.is_over());
        assert!(state.end());
        assert!(!state.end());
        assert!(state.is_over());
    }

    #[test]
    fn test_last_hunter_out_ends_session() {
        let state = SessionState::new(2);
        state.register("A", EvidenceKind::Emf, RoomId(0)).unwrap();
        state.register("B", EvidenceKind::Sound, RoomId(0)).unwrap();

        assert_eq!(state.hunter_left(), 1);
        assert!(!state.is_over());
        assert!(!state.should_stop());

        assert_eq!(state.hunter_left(), 0);
        assert!(state.is_over());
        assert!(state.should_stop());
    }

    #[test]
    fn test_concurrent_departures_end_session_exactly_once() {
        let state = Arc::new(SessionState::new(8));
        for i in 0..8 {
            state
                .register(format!("H{}", i), EvidenceKind::Emf, RoomId(0))
                .unwrap();
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                thread::spawn(move || state.hunter_left())
            })
            .collect();
        let mut remaining: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        remaining.sort_unstable();

        // Every decrement observed a distinct count
        assert_eq!(remaining, (0..8).collect::<Vec<_>>());
        assert_eq!(state.live_hunters(), 0);
        assert!(state.is_over());
    }
}
