//! Session Setup
//!
//! House construction and agent spawning.

pub mod agents;
pub mod house;

pub use agents::*;
pub use house::*;
