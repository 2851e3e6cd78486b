//! House Components
//!
//! The house owns the room arena, the hunters' evidence collection and the
//! session state. Room topology is fixed once [`HouseBuilder::build`] runs.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use haunt_events::{EvidenceKind, GhostClass};

use super::agent::{Ghost, HunterId};
use super::evidence::{EvidenceCollection, SubmitError, Verdict};
use super::room::{Occupancy, Room, RoomId};
use super::state::SessionState;
use crate::sync::lock;

/// Builds the room graph before any agent runs
#[derive(Debug, Default)]
pub struct HouseBuilder {
    rooms: Vec<Room>,
}

impl HouseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room, returning its ID
    pub fn add_room(&mut self, name: impl Into<String>) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(Room::new(id, name));
        id
    }

    /// Add an undirected edge between two rooms
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || a.0 >= self.rooms.len() || b.0 >= self.rooms.len() {
            tracing::warn!(%a, %b, "ignoring invalid room connection");
            return false;
        }
        self.rooms[a.0].add_adjacent(b);
        self.rooms[b.0].add_adjacent(a);
        true
    }

    pub fn find(&self, name: &str) -> Option<RoomId> {
        self.rooms.iter().find(|r| r.name() == name).map(Room::id)
    }

    /// Freeze the topology
    pub fn build(self, hunter_capacity: usize) -> House {
        House {
            rooms: self.rooms,
            evidence: Mutex::new(EvidenceCollection::new()),
            state: SessionState::new(hunter_capacity),
            ghost: OnceLock::new(),
        }
    }
}

/// The haunted house
#[derive(Debug)]
pub struct House {
    rooms: Vec<Room>,
    evidence: Mutex<EvidenceCollection>,
    state: SessionState,
    ghost: OnceLock<Arc<Ghost>>,
}

impl House {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name() == name)
    }

    pub fn room_name(&self, id: RoomId) -> &str {
        self.room(id).map(Room::name).unwrap_or("<unknown room>")
    }

    /// Adjacent rooms; empty for an unknown room
    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        self.room(id).map(Room::adjacent).unwrap_or(&[])
    }

    pub fn are_adjacent(&self, a: RoomId, b: RoomId) -> bool {
        self.room(a).map(|r| r.is_adjacent_to(b)).unwrap_or(false)
    }

    /// Hunters currently in a room
    pub fn occupants(&self, id: RoomId) -> Vec<HunterId> {
        self.room(id).map(Room::occupants).unwrap_or_default()
    }

    /// A uniformly chosen neighbor of `id`
    pub fn random_neighbor<R: Rng + ?Sized>(&self, id: RoomId, rng: &mut R) -> Option<RoomId> {
        self.neighbors(id).choose(rng).copied()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn ghost(&self) -> Option<&Arc<Ghost>> {
        self.ghost.get()
    }

    /// Install the session's only ghost; fails if one is already present
    pub(crate) fn install_ghost(&self, ghost: Arc<Ghost>) -> Result<(), Arc<Ghost>> {
        self.ghost.set(ghost)
    }

    /// Lock two distinct rooms' occupancy in ascending ID order.
    ///
    /// Guards come back as `(a, b)` whatever order they were taken in.
    fn lock_pair<'a>(
        a: &'a Room,
        b: &'a Room,
    ) -> (MutexGuard<'a, Occupancy>, MutexGuard<'a, Occupancy>) {
        if a.id() < b.id() {
            let first = a.occupancy();
            let second = b.occupancy();
            (first, second)
        } else {
            let first = b.occupancy();
            let second = a.occupancy();
            (second, first)
        }
    }

    /// Put a hunter into a room without removing it from anywhere
    pub fn place_hunter(&self, hunter: HunterId, room: RoomId) -> bool {
        match self.room(room) {
            Some(r) => r.occupancy().insert_hunter(hunter),
            None => {
                tracing::warn!(%hunter, %room, "cannot place hunter in unknown room");
                false
            }
        }
    }

    /// Take a hunter out of a room (it is leaving the house)
    pub fn remove_hunter(&self, hunter: HunterId, room: RoomId) -> bool {
        match self.room(room) {
            Some(r) => r.occupancy().remove_hunter(hunter),
            None => {
                tracing::warn!(%hunter, %room, "cannot remove hunter from unknown room");
                false
            }
        }
    }

    /// Atomically move a hunter between two rooms.
    ///
    /// Returns false, changing nothing, if either room is unknown or the
    /// hunter is not in `from`.
    pub fn move_hunter(&self, hunter: HunterId, from: RoomId, to: RoomId) -> bool {
        let (Some(source), Some(destination)) = (self.room(from), self.room(to)) else {
            tracing::warn!(%hunter, %from, %to, "cannot move hunter through unknown room");
            return false;
        };
        if from == to {
            return source.occupancy().contains(hunter);
        }

        let (mut src, mut dst) = Self::lock_pair(source, destination);
        if !src.remove_hunter(hunter) {
            tracing::warn!(%hunter, room = source.name(), "hunter is not in its source room");
            return false;
        }
        dst.insert_hunter(hunter);
        true
    }

    pub fn place_ghost(&self, room: RoomId) -> bool {
        match self.room(room) {
            Some(r) => {
                r.occupancy().set_ghost(true);
                true
            }
            None => {
                tracing::warn!(%room, "cannot place ghost in unknown room");
                false
            }
        }
    }

    pub fn remove_ghost(&self, room: RoomId) -> bool {
        match self.room(room) {
            Some(r) => {
                let mut occupancy = r.occupancy();
                let was_there = occupancy.has_ghost();
                occupancy.set_ghost(false);
                was_there
            }
            None => {
                tracing::warn!(%room, "cannot remove ghost from unknown room");
                false
            }
        }
    }

    /// Atomically move the ghost between two rooms
    pub fn move_ghost(&self, from: RoomId, to: RoomId) -> bool {
        let (Some(source), Some(destination)) = (self.room(from), self.room(to)) else {
            tracing::warn!(%from, %to, "cannot move ghost through unknown room");
            return false;
        };
        if from == to {
            return source.has_ghost();
        }

        let (mut src, mut dst) = Self::lock_pair(source, destination);
        if !src.has_ghost() {
            tracing::warn!(room = source.name(), "ghost is not in its source room");
            return false;
        }
        src.set_ghost(false);
        dst.set_ghost(true);
        true
    }

    /// Submit evidence to the hunters' shared collection
    pub fn submit_evidence(&self, kind: EvidenceKind) -> Result<usize, SubmitError> {
        lock(&self.evidence).submit(kind)
    }

    /// Snapshot of the collected evidence in submission order
    pub fn evidence(&self) -> Vec<EvidenceKind> {
        lock(&self.evidence).kinds().to_vec()
    }

    /// Review the collected evidence against the actual ghost class
    pub fn review(&self, actual: GhostClass) -> Verdict {
        lock(&self.evidence).verdict(actual)
    }
}
