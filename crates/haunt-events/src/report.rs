//! Session Report
//!
//! Final tally of a finished session, read after every agent has joined.

use serde::{Deserialize, Serialize};

use crate::event::ExitReason;
use crate::evidence::{EvidenceKind, GhostClass};

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "winner", rename_all = "snake_case")]
pub enum Outcome {
    /// Every hunter was scared or bored out of the house
    GhostWins,
    /// A hunter's review identified the ghost
    HuntersWin { identified: GhostClass },
    /// The ghost got bored and left before either side won
    GhostBored,
}

/// A hunter's final state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterSummary {
    pub name: String,
    pub equipment: EvidenceKind,
    pub fear: u32,
    pub boredom: u32,
    pub exit: Option<ExitReason>,
}

/// The ghost's final state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostSummary {
    pub class: GhostClass,
    pub room: String,
    pub boredom: u32,
    pub exit: Option<ExitReason>,
}

/// Everything the orchestrator reports once the session is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Seed the session was set up with
    pub seed: u64,
    pub hunters: Vec<HunterSummary>,
    pub ghost: GhostSummary,
    /// Evidence in submission order
    pub evidence: Vec<EvidenceKind>,
    /// Hunters still in the house when the session ended
    pub hunters_remaining: usize,
    pub outcome: Outcome,
    /// Number of events logged during the session
    pub event_count: u64,
}

impl SessionReport {
    /// Hunters that left with the given exit reason.
    pub fn hunters_with_exit(&self, reason: ExitReason) -> impl Iterator<Item = &HunterSummary> {
        self.hunters
            .iter()
            .filter(move |h| h.exit == Some(reason))
    }
}
