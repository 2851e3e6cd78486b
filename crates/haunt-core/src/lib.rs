//! Haunted House Simulation Library
//!
//! One ghost and a team of hunters, each on its own thread, share a house
//! of thirteen rooms. The ghost leaves evidence; the hunters collect it
//! until they can name the ghost, or until fear or boredom drives one side
//! out.

pub mod components;
pub mod config;
pub mod events;
pub mod output;
pub mod session;
pub mod setup;
pub mod systems;

mod sync;

pub use components::*;
pub use config::{ConfigError, SessionConfig};
pub use events::EventLogger;
pub use session::{run_session, Session, SessionError};
pub use systems::{GhostAgent, HunterAgent, Tick};

// Re-export setup functions explicitly to avoid module name conflicts
pub use setup::{build_house, spawn_ghost, spawn_hunter, SpawnError};

pub use haunt_events::{
    EventKind, EvidenceKind, ExitReason, GhostClass, Outcome, SessionReport,
};
