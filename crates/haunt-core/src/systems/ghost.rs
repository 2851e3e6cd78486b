//! Ghost System
//!
//! Each tick the ghost gets bored or is entertained by hunters, then idles,
//! leaves evidence, or drifts to a neighboring room.

use rand::rngs::SmallRng;
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use haunt_events::{EventKind, ExitReason};

use crate::components::agent::Ghost;
use crate::components::evidence::emitted_kind;
use crate::components::house::House;
use crate::components::room::Room;
use crate::config::Limits;
use crate::events::EventLogger;
use crate::systems::Tick;

/// Ghost actions, chosen uniformly each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostAction {
    Idle,
    Emit,
    Move,
}

impl GhostAction {
    pub const ALL: [GhostAction; 3] = [GhostAction::Idle, GhostAction::Emit, GhostAction::Move];
}

/// Drives one ghost through the house
pub struct GhostAgent {
    ghost: Arc<Ghost>,
    house: Arc<House>,
    limits: Limits,
    interval: Duration,
    logger: Arc<EventLogger>,
    rng: SmallRng,
}

impl GhostAgent {
    pub fn new(
        ghost: Arc<Ghost>,
        house: Arc<House>,
        limits: Limits,
        interval: Duration,
        logger: Arc<EventLogger>,
        rng: SmallRng,
    ) -> Self {
        Self {
            ghost,
            house,
            limits,
            interval,
            logger,
            rng,
        }
    }

    pub fn ghost(&self) -> &Arc<Ghost> {
        &self.ghost
    }

    /// Thread entry point. Ticks until the ghost exits.
    pub fn run(mut self) -> ExitReason {
        loop {
            if let Tick::Exit(reason) = self.tick() {
                return reason;
            }
            thread::sleep(self.interval);
        }
    }

    /// Advance the ghost by one tick
    pub fn tick(&mut self) -> Tick {
        if self.house.state().should_stop() {
            self.house.state().end();
            return self.exit(ExitReason::Forced);
        }

        if self.sense() {
            return self.exit(ExitReason::Bored);
        }

        let action = GhostAction::ALL[self.rng.gen_range(0..GhostAction::ALL.len())];
        self.act(action);
        Tick::Continue
    }

    /// Update boredom from the current room. Returns true once it maxes out.
    fn sense(&mut self) -> bool {
        let room = self.ghost.room();
        let haunting = self.house.room(room).is_some_and(Room::has_hunters);

        let mut status = self.ghost.status_mut();
        if haunting {
            status.boredom = 0;
        } else {
            status.boredom += 1;
        }
        status.boredom >= self.limits.boredom_max
    }

    /// Carry out an action. Returns false if it had no effect.
    pub fn act(&mut self, action: GhostAction) -> bool {
        let current = self.ghost.room();
        let Some(room) = self.house.room(current) else {
            tracing::warn!(room = %current, "ghost is in an unknown room");
            return false;
        };

        match action {
            GhostAction::Idle => false,
            GhostAction::Emit => {
                let kind = emitted_kind(self.ghost.class(), &mut self.rng);
                room.leave_evidence(kind);
                tracing::debug!(evidence = %kind, room = room.name(), "ghost left evidence");
                self.logger.log(EventKind::GhostEvidence {
                    evidence: kind,
                    room: room.name().to_string(),
                });
                true
            }
            GhostAction::Move => {
                // Never walk away from a hunter
                if room.has_hunters() {
                    return false;
                }
                let Some(next) = self.house.random_neighbor(current, &mut self.rng) else {
                    return false;
                };
                if !self.house.move_ghost(current, next) {
                    return false;
                }
                self.ghost.status_mut().room = next;

                let name = self.house.room_name(next);
                tracing::debug!(room = name, "ghost moved");
                self.logger.log(EventKind::GhostMove {
                    room: name.to_string(),
                });
                true
            }
        }
    }

    fn exit(&mut self, reason: ExitReason) -> Tick {
        self.ghost.status_mut().exit = Some(reason);
        if reason == ExitReason::Bored {
            self.house.state().end();
            self.house.remove_ghost(self.ghost.room());
        }

        tracing::info!(class = %self.ghost.class(), %reason, "ghost exited");
        self.logger.log(EventKind::GhostExit { reason });
        Tick::Exit(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::room::RoomId;
    use crate::setup::agents::{spawn_ghost, spawn_hunter};
    use crate::setup::house::{build_house, van};
    use haunt_events::{EvidenceKind, GhostClass};
    use rand::SeedableRng;

    fn setup(ghost_room: &str, limits: Limits) -> (Arc<House>, GhostAgent, Arc<EventLogger>) {
        let house = Arc::new(build_house(4));
        let start = house.room_by_name(ghost_room).unwrap().id();
        let ghost = spawn_ghost(&house, GhostClass::Banshee, start).unwrap();
        spawn_hunter(&house, "Ray", EvidenceKind::Emf, van(&house)).unwrap();

        let logger = Arc::new(EventLogger::memory());
        let agent = GhostAgent::new(
            ghost,
            Arc::clone(&house),
            limits,
            Duration::ZERO,
            Arc::clone(&logger),
            SmallRng::seed_from_u64(7),
        );
        (house, agent, logger)
    }

    #[test]
    fn test_bored_ghost_ends_session() {
        let limits = Limits {
            fear_max: 10,
            boredom_max: 1,
        };
        let (house, mut agent, logger) = setup("Kitchen", limits);

        assert_eq!(agent.tick(), Tick::Exit(ExitReason::Bored));
        assert!(house.state().is_over());
        assert!(!house.room_by_name("Kitchen").unwrap().has_ghost());
        assert_eq!(agent.ghost().exit(), Some(ExitReason::Bored));

        let events = logger.events();
        assert_eq!(
            events.last().unwrap().kind,
            EventKind::GhostExit {
                reason: ExitReason::Bored
            }
        );
    }

    #[test]
    fn test_boredom_counts_up_and_resets() {
        let (house, mut agent, _) = setup("Kitchen", Limits::default());

        assert!(!agent.sense());
        assert!(!agent.sense());
        assert_eq!(agent.ghost().boredom(), 2);

        // A hunter walks in
        let kitchen = house.room_by_name("Kitchen").unwrap().id();
        house.place_hunter(crate::components::agent::HunterId(9), kitchen);
        assert!(!agent.sense());
        assert_eq!(agent.ghost().boredom(), 0);
    }

    #[test]
    fn test_forced_exit_when_session_over() {
        let (house, mut agent, _) = setup("Kitchen", Limits::default());
        house.state().end();

        assert_eq!(agent.tick(), Tick::Exit(ExitReason::Forced));
        assert_eq!(agent.ghost().exit(), Some(ExitReason::Forced));
        assert_eq!(agent.ghost().boredom(), 0);
    }

    #[test]
    fn test_forced_exit_when_no_hunters_remain() {
        let (house, mut agent, _) = setup("Kitchen", Limits::default());
        house.state().hunter_left();

        assert_eq!(agent.tick(), Tick::Exit(ExitReason::Forced));
        assert!(house.state().is_over());
    }

    #[test]
    fn test_emit_leaves_signature_evidence() {
        let (house, mut agent, logger) = setup("Garage", Limits::default());

        for _ in 0..10 {
            assert!(agent.act(GhostAction::Emit));
        }

        let garage = house.room_by_name("Garage").unwrap();
        let evidence = garage.evidence();
        assert_eq!(evidence.len(), 10);
        assert!(evidence.iter().all(|kind| GhostClass::Banshee.leaves(*kind)));
        assert_eq!(logger.event_count(), 10);
    }

    #[test]
    fn test_move_goes_to_neighbor() {
        let (house, mut agent, logger) = setup("Kitchen", Limits::default());
        let kitchen = house.room_by_name("Kitchen").unwrap().id();

        assert!(agent.act(GhostAction::Move));

        let now = agent.ghost().room();
        assert!(house.are_adjacent(kitchen, now));
        assert!(house.room(now).unwrap().has_ghost());
        assert!(!house.room(kitchen).unwrap().has_ghost());
        assert!(matches!(logger.events()[0].kind, EventKind::GhostMove { .. }));
    }

    #[test]
    fn test_ghost_stays_with_hunter() {
        let (house, mut agent, _) = setup("Van", Limits::default());

        for _ in 0..20 {
            assert!(!agent.act(GhostAction::Move));
        }
        assert_eq!(agent.ghost().room(), RoomId(0));
        assert!(house.room(RoomId(0)).unwrap().has_ghost());
    }

    #[test]
    fn test_idle_does_nothing() {
        let (house, mut agent, logger) = setup("Kitchen", Limits::default());
        assert!(!agent.act(GhostAction::Idle));
        assert_eq!(logger.event_count(), 0);
        assert!(house.room_by_name("Kitchen").unwrap().evidence().is_empty());
    }
}
