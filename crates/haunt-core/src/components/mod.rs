//! Shared World Components
//!
//! Rooms, agents, evidence and the session-wide coordination state.
//!
//! # Locking
//!
//! Every lock guards a single concern and critical sections never nest
//! across concerns:
//!
//! - each room has one lock for its occupancy and one for its evidence log;
//! - a two-room move takes both occupancy locks in ascending [`RoomId`] order;
//! - the global evidence collection has one lock;
//! - the hunter registry, live-hunter counter and termination flag share the
//!   one [`SessionState`] lock;
//! - each agent's own status has a lock only its thread writes to.

pub mod agent;
pub mod evidence;
pub mod house;
pub mod room;
pub mod state;

pub use agent::*;
pub use evidence::*;
pub use house::*;
pub use room::*;
pub use state::*;
