//! Shared data types for the haunted house simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the simulation crate and anything that reads
//! its event logs or reports.

pub mod event;
pub mod evidence;
pub mod report;

// Re-export evidence types
pub use evidence::{EvidenceKind, GhostClass, ParseGhostClassError, MAX_EVIDENCE};

// Re-export event types
pub use event::{generate_event_id, CollectResult, Event, EventKind, ExitReason, ReviewResult};

// Re-export report types
pub use report::{GhostSummary, HunterSummary, Outcome, SessionReport};
