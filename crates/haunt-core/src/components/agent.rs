//! Agent Components
//!
//! Records for the ghost and the hunters. Each record is shared between the
//! agent's own thread, which is the only writer of its status, and the
//! orchestrator, which reads it once every thread has joined.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use haunt_events::{EvidenceKind, ExitReason, GhostClass, GhostSummary, HunterSummary};

use super::room::RoomId;
use crate::sync::lock;

/// Unique identifier for a hunter: its index in the hunter registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HunterId(pub usize);

impl fmt::Display for HunterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hunter#{}", self.0)
    }
}

/// Mutable part of a hunter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunterStatus {
    pub room: RoomId,
    pub fear: u32,
    pub boredom: u32,
    pub exit: Option<ExitReason>,
}

/// A ghost hunter
#[derive(Debug)]
pub struct Hunter {
    id: HunterId,
    name: String,
    /// The one evidence kind this hunter's equipment detects
    equipment: EvidenceKind,
    status: Mutex<HunterStatus>,
}

impl Hunter {
    pub fn new(id: HunterId, name: impl Into<String>, equipment: EvidenceKind, room: RoomId) -> Self {
        Self {
            id,
            name: name.into(),
            equipment,
            status: Mutex::new(HunterStatus {
                room,
                fear: 0,
                boredom: 0,
                exit: None,
            }),
        }
    }

    pub fn id(&self) -> HunterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn equipment(&self) -> EvidenceKind {
        self.equipment
    }

    /// Copy of the current status
    pub fn status(&self) -> HunterStatus {
        *lock(&self.status)
    }

    pub fn room(&self) -> RoomId {
        lock(&self.status).room
    }

    pub fn fear(&self) -> u32 {
        lock(&self.status).fear
    }

    pub fn boredom(&self) -> u32 {
        lock(&self.status).boredom
    }

    pub fn exit(&self) -> Option<ExitReason> {
        lock(&self.status).exit
    }

    pub fn is_active(&self) -> bool {
        self.exit().is_none()
    }

    pub(crate) fn status_mut(&self) -> MutexGuard<'_, HunterStatus> {
        lock(&self.status)
    }

    pub fn summary(&self) -> HunterSummary {
        let status = self.status();
        HunterSummary {
            name: self.name.clone(),
            equipment: self.equipment,
            fear: status.fear,
            boredom: status.boredom,
            exit: status.exit,
        }
    }
}

/// Mutable part of the ghost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostStatus {
    pub room: RoomId,
    pub boredom: u32,
    pub exit: Option<ExitReason>,
}

/// The ghost haunting the house
#[derive(Debug)]
pub struct Ghost {
    class: GhostClass,
    status: Mutex<GhostStatus>,
}

impl Ghost {
    pub fn new(class: GhostClass, room: RoomId) -> Self {
        Self {
            class,
            status: Mutex::new(GhostStatus {
                room,
                boredom: 0,
                exit: None,
            }),
        }
    }

    pub fn class(&self) -> GhostClass {
        self.class
    }

    pub fn status(&self) -> GhostStatus {
        *lock(&self.status)
    }

    pub fn room(&self) -> RoomId {
        lock(&self.status).room
    }

    pub fn boredom(&self) -> u32 {
        lock(&self.status).boredom
    }

    pub fn exit(&self) -> Option<ExitReason> {
        lock(&self.status).exit
    }

    pub(crate) fn status_mut(&self) -> MutexGuard<'_, GhostStatus> {
        lock(&self.status)
    }

    /// Summary with the room resolved to its name by the caller
    pub fn summary(&self, room_name: impl Into<String>) -> GhostSummary {
        let status = self.status();
        GhostSummary {
            class: self.class,
            room: room_name.into(),
            boredom: status.boredom,
            exit: status.exit,
        }
    }
}
