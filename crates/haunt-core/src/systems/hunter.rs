//! Hunter System
//!
//! Each tick a hunter is frightened or bored by its surroundings, then moves,
//! collects evidence with its equipment, or reviews what the team has found.

use rand::rngs::SmallRng;
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use haunt_events::{CollectResult, EventKind, ExitReason, ReviewResult};

use crate::components::agent::Hunter;
use crate::components::evidence::{SubmitError, Verdict};
use crate::components::house::House;
use crate::components::room::Room;
use crate::config::Limits;
use crate::events::EventLogger;
use crate::systems::Tick;

/// Hunter actions, chosen uniformly each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunterAction {
    Move,
    Collect,
    Review,
}

impl HunterAction {
    pub const ALL: [HunterAction; 3] = [
        HunterAction::Move,
        HunterAction::Collect,
        HunterAction::Review,
    ];
}

/// Drives one hunter through the house
pub struct HunterAgent {
    hunter: Arc<Hunter>,
    house: Arc<House>,
    limits: Limits,
    interval: Duration,
    logger: Arc<EventLogger>,
    rng: SmallRng,
}

impl HunterAgent {
    pub fn new(
        hunter: Arc<Hunter>,
        house: Arc<House>,
        limits: Limits,
        interval: Duration,
        logger: Arc<EventLogger>,
        rng: SmallRng,
    ) -> Self {
        Self {
            hunter,
            house,
            limits,
            interval,
            logger,
            rng,
        }
    }

    pub fn hunter(&self) -> &Arc<Hunter> {
        &self.hunter
    }

    /// Thread entry point. Ticks until the hunter exits.
    pub fn run(mut self) -> ExitReason {
        loop {
            if let Tick::Exit(reason) = self.tick() {
                return reason;
            }
            thread::sleep(self.interval);
        }
    }

    /// Advance the hunter by one tick
    pub fn tick(&mut self) -> Tick {
        if self.house.state().is_over() {
            return self.exit(ExitReason::Forced);
        }

        if let Some(reason) = self.sense() {
            return self.exit(reason);
        }

        if self.house.state().should_stop() {
            self.house.state().end();
            return self.exit(ExitReason::Forced);
        }

        let action = HunterAction::ALL[self.rng.gen_range(0..HunterAction::ALL.len())];
        self.act(action)
    }

    /// Update fear and boredom from the current room.
    ///
    /// Fear is checked before boredom when both max out on the same tick.
    fn sense(&mut self) -> Option<ExitReason> {
        let room = self.hunter.room();
        let haunted = self.house.room(room).is_some_and(Room::has_ghost);

        let mut status = self.hunter.status_mut();
        if haunted {
            status.fear += 1;
            status.boredom = 0;
        } else {
            status.boredom += 1;
        }

        if status.fear >= self.limits.fear_max {
            Some(ExitReason::Scared)
        } else if status.boredom >= self.limits.boredom_max {
            Some(ExitReason::Bored)
        } else {
            None
        }
    }

    /// Carry out an action
    pub fn act(&mut self, action: HunterAction) -> Tick {
        match action {
            HunterAction::Move => {
                self.move_on();
                Tick::Continue
            }
            HunterAction::Collect => {
                self.collect();
                Tick::Continue
            }
            HunterAction::Review => self.review(),
        }
    }

    fn move_on(&mut self) {
        let current = self.hunter.room();
        let Some(next) = self.house.random_neighbor(current, &mut self.rng) else {
            return;
        };
        if !self.house.move_hunter(self.hunter.id(), current, next) {
            return;
        }
        self.hunter.status_mut().room = next;

        let name = self.house.room_name(next);
        tracing::debug!(hunter = self.hunter.name(), room = name, "hunter moved");
        self.logger.log(EventKind::HunterMove {
            hunter: self.hunter.name().to_string(),
            room: name.to_string(),
        });
    }

    /// Look for evidence the equipment can detect and hand it in
    fn collect(&mut self) -> Option<CollectResult> {
        let current = self.hunter.room();
        let room = self.house.room(current)?;
        let kind = room.find_evidence(self.hunter.equipment())?;

        let result = match self.house.submit_evidence(kind) {
            Ok(_) => CollectResult::Collected,
            Err(SubmitError::Duplicate(_)) => CollectResult::Duplicate,
            Err(SubmitError::Full) => CollectResult::Full,
        };

        tracing::info!(
            hunter = self.hunter.name(),
            evidence = %kind,
            room = room.name(),
            ?result,
            "hunter collected evidence"
        );
        self.logger.log(EventKind::HunterCollect {
            hunter: self.hunter.name().to_string(),
            evidence: kind,
            room: room.name().to_string(),
            result,
        });
        Some(result)
    }

    fn review(&mut self) -> Tick {
        let Some(ghost) = self.house.ghost() else {
            tracing::warn!(hunter = self.hunter.name(), "nothing to review: no ghost in the house");
            return Tick::Continue;
        };

        let verdict = self.house.review(ghost.class());
        let result = if verdict.is_match() {
            ReviewResult::Sufficient
        } else {
            ReviewResult::Insufficient
        };

        tracing::info!(hunter = self.hunter.name(), ?verdict, "hunter reviewed evidence");
        self.logger.log(EventKind::HunterReview {
            hunter: self.hunter.name().to_string(),
            result,
            identified: verdict.identified(),
        });

        match verdict {
            Verdict::Match(_) => {
                self.house.state().end();
                self.exit(ExitReason::Victory)
            }
            Verdict::Insufficient | Verdict::Mismatch { .. } => Tick::Continue,
        }
    }

    /// Leave the session and the room.
    ///
    /// Only scared and bored hunters count against the live total.
    fn exit(&mut self, reason: ExitReason) -> Tick {
        let room = {
            let mut status = self.hunter.status_mut();
            status.exit = Some(reason);
            status.room
        };
        self.house.remove_hunter(self.hunter.id(), room);

        if reason.is_departure() {
            let remaining = self.house.state().hunter_left();
            tracing::info!(hunter = self.hunter.name(), %reason, remaining, "hunter left the house");
        } else {
            tracing::info!(hunter = self.hunter.name(), %reason, "hunter exited");
        }

        self.logger.log(EventKind::HunterExit {
            hunter: self.hunter.name().to_string(),
            reason,
        });
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

    struct Fixture {
        house: Arc<House>,
        agent: HunterAgent,
        logger: Arc<EventLogger>,
    }

    fn setup(class: GhostClass, ghost_room: &str, equipment: EvidenceKind, limits: Limits) -> Fixture {
        let house = Arc::new(build_house(4));
        let start = house.room_by_name(ghost_room).unwrap().id();
        spawn_ghost(&house, class, start).unwrap();
        let hunter = spawn_hunter(&house, "Ray", equipment, van(&house)).unwrap();

        let logger = Arc::new(EventLogger::memory());
        let agent = HunterAgent::new(
            hunter,
            Arc::clone(&house),
            limits,
            Duration::ZERO,
            Arc::clone(&logger),
            SmallRng::seed_from_u64(11),
        );
        Fixture {
            house,
            agent,
            logger,
        }
    }

    fn last_kind(logger: &EventLogger) -> EventKind {
        logger.events().pop().unwrap().kind
    }

    #[test]
    fn test_scared_hunter_leaves_house() {
        let limits = Limits {
            fear_max: 1,
            boredom_max: 100,
        };
        let Fixture {
            house,
            mut agent,
            logger,
        } = setup(GhostClass::Phantom, "Van", EvidenceKind::Emf, limits);

        assert_eq!(agent.tick(), Tick::Exit(ExitReason::Scared));
        assert_eq!(agent.hunter().fear(), 1);
        assert_eq!(house.state().live_hunters(), 0);
        assert!(house.state().is_over());
        assert!(house.occupants(RoomId(0)).is_empty());
        assert_eq!(
            last_kind(&logger),
            EventKind::HunterExit {
                hunter: "Ray".into(),
                reason: ExitReason::Scared
            }
        );
    }

    #[test]
    fn test_bored_hunter_leaves_house() {
        let limits = Limits {
            fear_max: 10,
            boredom_max: 1,
        };
        let Fixture { house, mut agent, .. } =
            setup(GhostClass::Phantom, "Kitchen", EvidenceKind::Emf, limits);

        assert_eq!(agent.tick(), Tick::Exit(ExitReason::Bored));
        assert_eq!(agent.hunter().exit(), Some(ExitReason::Bored));
        assert_eq!(house.state().live_hunters(), 0);
    }

    #[test]
    fn test_fear_wins_over_boredom() {
        let limits = Limits {
            fear_max: 1,
            boredom_max: 1,
        };
        let Fixture { mut agent, .. } = setup(GhostClass::Phantom, "Van", EvidenceKind::Emf, limits);
        assert_eq!(agent.tick(), Tick::Exit(ExitReason::Scared));
    }

    #[test]
    fn test_ghost_resets_boredom() {
        let Fixture { mut agent, .. } =
            setup(GhostClass::Phantom, "Van", EvidenceKind::Emf, Limits::default());
        agent.hunter().status_mut().boredom = 42;

        assert_eq!(agent.sense(), None);
        assert_eq!(agent.hunter().boredom(), 0);
        assert_eq!(agent.hunter().fear(), 1);
    }

    #[test]
    fn test_forced_exit_when_session_over() {
        let Fixture {
            house, mut agent, ..
        } = setup(GhostClass::Phantom, "Kitchen", EvidenceKind::Emf, Limits::default());
        house.state().end();

        assert_eq!(agent.tick(), Tick::Exit(ExitReason::Forced));
        // Forced hunters leave their room but still count as remaining
        assert_eq!(house.state().live_hunters(), 1);
        assert!(house.occupants(RoomId(0)).is_empty());
        assert_eq!(agent.hunter().room(), RoomId(0));
        assert_eq!(agent.hunter().boredom(), 0);
    }

    #[test]
    fn test_review_identifies_phantom() {
        let Fixture {
            house,
            mut agent,
            logger,
        } = setup(GhostClass::Phantom, "Kitchen", EvidenceKind::Sound, Limits::default());
        for kind in GhostClass::Phantom.signature() {
            house.submit_evidence(kind).unwrap();
        }

        assert_eq!(agent.act(HunterAction::Review), Tick::Exit(ExitReason::Victory));
        assert!(house.state().is_over());
        assert_eq!(house.state().live_hunters(), 1);
        assert!(house.occupants(RoomId(0)).is_empty());

        let events = logger.events();
        assert_eq!(
            events[0].kind,
            EventKind::HunterReview {
                hunter: "Ray".into(),
                result: ReviewResult::Sufficient,
                identified: Some(GhostClass::Phantom),
            }
        );
        assert_eq!(events[1].kind.exit_reason(), Some(ExitReason::Victory));
    }

    #[test]
    fn test_review_with_partial_evidence_continues() {
        let Fixture {
            house,
            mut agent,
            logger,
        } = setup(GhostClass::Phantom, "Kitchen", EvidenceKind::Sound, Limits::default());
        house.submit_evidence(EvidenceKind::Sound).unwrap();

        assert_eq!(agent.act(HunterAction::Review), Tick::Continue);
        assert!(!house.state().is_over());
        assert_eq!(
            last_kind(&logger),
            EventKind::HunterReview {
                hunter: "Ray".into(),
                result: ReviewResult::Insufficient,
                identified: None,
            }
        );
    }

    #[test]
    fn test_collect_finds_equipment_evidence() {
        let Fixture {
            house, mut agent, ..
        } = setup(GhostClass::Banshee, "Kitchen", EvidenceKind::Emf, Limits::default());
        let van_room = house.room(RoomId(0)).unwrap();

        // Nothing to find yet
        assert_eq!(agent.collect(), None);

        van_room.leave_evidence(EvidenceKind::Sound);
        assert_eq!(agent.collect(), None);

        van_room.leave_evidence(EvidenceKind::Emf);
        assert_eq!(agent.collect(), Some(CollectResult::Collected));
        assert_eq!(house.evidence(), vec![EvidenceKind::Emf]);
    }

    #[test]
    fn test_collect_duplicate_is_rejected() {
        let Fixture {
            house,
            mut agent,
            logger,
        } = setup(GhostClass::Banshee, "Kitchen", EvidenceKind::Emf, Limits::default());
        house.submit_evidence(EvidenceKind::Emf).unwrap();
        house.room(RoomId(0)).unwrap().leave_evidence(EvidenceKind::Emf);

        assert_eq!(agent.collect(), Some(CollectResult::Duplicate));
        assert_eq!(house.evidence().len(), 1);
        assert!(matches!(
            last_kind(&logger),
            EventKind::HunterCollect {
                result: CollectResult::Duplicate,
                ..
            }
        ));
    }

    #[test]
    fn test_move_updates_occupancy() {
        let Fixture {
            house,
            mut agent,
            logger,
        } = setup(GhostClass::Banshee, "Kitchen", EvidenceKind::Emf, Limits::default());
        let id = agent.hunter().id();

        assert_eq!(agent.act(HunterAction::Move), Tick::Continue);

        // The van's only neighbor is the hallway
        let hallway = house.room_by_name("Hallway").unwrap().id();
        assert_eq!(agent.hunter().room(), hallway);
        assert!(house.occupants(RoomId(0)).is_empty());
        assert_eq!(house.occupants(hallway), vec![id]);
        assert_eq!(
            last_kind(&logger),
            EventKind::HunterMove {
                hunter: "Ray".into(),
                room: "Hallway".into()
            }
        );
    }
}
