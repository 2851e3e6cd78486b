//! Event System
//!
//! Recording of agent transitions.

pub mod logger;

pub use logger::EventLogger;
