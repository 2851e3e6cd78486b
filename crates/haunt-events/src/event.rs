//! Event Types
//!
//! Records emitted at every agent transition point: initialization, movement,
//! evidence, collection, review and exit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::evidence::{EvidenceKind, GhostClass};

/// Generate an event ID from a sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}

/// Why an agent left the session.
///
/// These are normal state-machine outcomes, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Fear reached its maximum
    Scared,
    /// Boredom reached its maximum
    Bored,
    /// The collected evidence identified the ghost
    Victory,
    /// Another agent ended the session
    Forced,
}

impl ExitReason {
    /// Returns true if the agent walked out on its own (scared or bored).
    pub fn is_departure(self) -> bool {
        matches!(self, ExitReason::Scared | ExitReason::Bored)
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::Scared => write!(f, "scared"),
            ExitReason::Bored => write!(f, "bored"),
            ExitReason::Victory => write!(f, "victory"),
            ExitReason::Forced => write!(f, "forced"),
        }
    }
}

/// Result of a hunter trying to submit a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectResult {
    Collected,
    Duplicate,
    Full,
}

/// Result of a hunter reviewing the collected evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewResult {
    Sufficient,
    Insufficient,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    HunterInit {
        hunter: String,
        equipment: EvidenceKind,
    },
    HunterMove {
        hunter: String,
        room: String,
    },
    HunterCollect {
        hunter: String,
        evidence: EvidenceKind,
        room: String,
        result: CollectResult,
    },
    HunterReview {
        hunter: String,
        result: ReviewResult,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identified: Option<GhostClass>,
    },
    HunterExit {
        hunter: String,
        reason: ExitReason,
    },
    GhostInit {
        class: GhostClass,
        room: String,
    },
    GhostMove {
        room: String,
    },
    GhostEvidence {
        evidence: EvidenceKind,
        room: String,
    },
    GhostExit {
        reason: ExitReason,
    },
}

impl EventKind {
    /// Name of the hunter involved, if a hunter produced the event.
    pub fn hunter(&self) -> Option<&str> {
        match self {
            EventKind::HunterInit { hunter, .. }
            | EventKind::HunterMove { hunter, .. }
            | EventKind::HunterCollect { hunter, .. }
            | EventKind::HunterReview { hunter, .. }
            | EventKind::HunterExit { hunter, .. } => Some(hunter),
            _ => None,
        }
    }

    /// Returns true if the event was produced by the ghost.
    pub fn is_ghost(&self) -> bool {
        self.hunter().is_none()
    }

    /// The exit reason, if this is an exit event.
    pub fn exit_reason(&self) -> Option<ExitReason> {
        match self {
            EventKind::HunterExit { reason, .. } | EventKind::GhostExit { reason } => {
                Some(*reason)
            }
            _ => None,
        }
    }
}

/// A logged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (e.g., "evt_00000042")
    pub event_id: String,
    /// Position in the session's event stream
    pub sequence: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    pub fn new(sequence: u64, kind: EventKind) -> Self {
        Self {
            event_id: generate_event_id(sequence),
            sequence,
            kind,
        }
    }
}
