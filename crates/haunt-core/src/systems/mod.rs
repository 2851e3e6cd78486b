//! Agent Systems
//!
//! The ghost and hunter state machines. Each agent runs on its own thread and
//! advances one tick at a time until it reaches an exit.

pub mod ghost;
pub mod hunter;

pub use ghost::{GhostAction, GhostAgent};
pub use hunter::{HunterAction, HunterAgent};

use haunt_events::ExitReason;

/// What an agent does after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Exit(ExitReason),
}
