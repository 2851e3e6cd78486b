//! Room Components
//!
//! A room is a node of the house graph. It owns who is currently inside it
//! and the evidence the ghost has left there.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use haunt_events::EvidenceKind;

use super::agent::HunterId;
use crate::sync::lock;

/// Stable index of a room in the house arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Who is inside a room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    hunters: BTreeSet<HunterId>,
    ghost: bool,
}

impl Occupancy {
    pub fn has_hunters(&self) -> bool {
        !self.hunters.is_empty()
    }

    pub fn has_ghost(&self) -> bool {
        self.ghost
    }

    pub fn contains(&self, hunter: HunterId) -> bool {
        self.hunters.contains(&hunter)
    }

    pub fn hunters(&self) -> impl Iterator<Item = HunterId> + '_ {
        self.hunters.iter().copied()
    }

    pub(crate) fn insert_hunter(&mut self, hunter: HunterId) -> bool {
        self.hunters.insert(hunter)
    }

    pub(crate) fn remove_hunter(&mut self, hunter: HunterId) -> bool {
        self.hunters.remove(&hunter)
    }

    pub(crate) fn set_ghost(&mut self, present: bool) {
        self.ghost = present;
    }
}

/// A room in the house
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    name: String,
    /// Adjacent room IDs, fixed once the house is built
    adjacent: Vec<RoomId>,
    occupancy: Mutex<Occupancy>,
    /// Ghost-authored, append-only; may hold duplicates
    evidence: Mutex<Vec<EvidenceKind>>,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            adjacent: Vec::new(),
            occupancy: Mutex::new(Occupancy::default()),
            evidence: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adjacent(&self) -> &[RoomId] {
        &self.adjacent
    }

    pub fn is_adjacent_to(&self, other: RoomId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Adds a one-way edge; the house builder adds the reverse edge too.
    pub(crate) fn add_adjacent(&mut self, other: RoomId) {
        if !self.adjacent.contains(&other) {
            self.adjacent.push(other);
        }
    }

    /// Snapshot of the hunters currently in the room
    pub fn occupants(&self) -> Vec<HunterId> {
        lock(&self.occupancy).hunters().collect()
    }

    pub fn has_hunters(&self) -> bool {
        lock(&self.occupancy).has_hunters()
    }

    pub fn has_ghost(&self) -> bool {
        lock(&self.occupancy).has_ghost()
    }

    pub(crate) fn occupancy(&self) -> MutexGuard<'_, Occupancy> {
        lock(&self.occupancy)
    }

    /// Append a piece of evidence, returning the new log length
    pub fn leave_evidence(&self, kind: EvidenceKind) -> usize {
        let mut log = lock(&self.evidence);
        log.push(kind);
        log.len()
    }

    /// First entry in the evidence log matching `kind`
    pub fn find_evidence(&self, kind: EvidenceKind) -> Option<EvidenceKind> {
        lock(&self.evidence).iter().copied().find(|entry| *entry == kind)
    }

    /// Snapshot of the evidence log in the order it was left
    pub fn evidence(&self) -> Vec<EvidenceKind> {
        lock(&self.evidence).clone()
    }
}
