//! Agent Setup
//!
//! Places the ghost and the hunters in the house before any thread starts.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

use haunt_events::{EvidenceKind, GhostClass};

use crate::components::agent::{Ghost, Hunter};
use crate::components::house::House;
use crate::components::room::RoomId;
use crate::components::state::RegistryFull;

/// Errors placing an agent in the house
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error(transparent)]
    RegistryFull(#[from] RegistryFull),
    #[error("the house is already haunted")]
    GhostExists,
    #[error("no such room: {0}")]
    UnknownRoom(RoomId),
}

/// Put the session's ghost in `start_room`
pub fn spawn_ghost(
    house: &House,
    class: GhostClass,
    start_room: RoomId,
) -> Result<Arc<Ghost>, SpawnError> {
    if house.room(start_room).is_none() {
        return Err(SpawnError::UnknownRoom(start_room));
    }

    let ghost = Arc::new(Ghost::new(class, start_room));
    house
        .install_ghost(Arc::clone(&ghost))
        .map_err(|_| SpawnError::GhostExists)?;
    house.place_ghost(start_room);

    tracing::info!(%class, room = house.room_name(start_room), "ghost initialized");
    Ok(ghost)
}

/// Register a hunter and put it in `start_room`
pub fn spawn_hunter(
    house: &House,
    name: &str,
    equipment: EvidenceKind,
    start_room: RoomId,
) -> Result<Arc<Hunter>, SpawnError> {
    if house.room(start_room).is_none() {
        return Err(SpawnError::UnknownRoom(start_room));
    }

    let hunter = house.state().register(name, equipment, start_room)?;
    house.place_hunter(hunter.id(), start_room);

    tracing::info!(hunter = name, %equipment, "hunter initialized");
    Ok(hunter)
}

/// A uniformly chosen ghost class
pub fn random_ghost_class<R: Rng + ?Sized>(rng: &mut R) -> GhostClass {
    GhostClass::ALL[rng.gen_range(0..GhostClass::ALL.len())]
}

/// Distinct equipment for `count` hunters.
///
/// There are only four kinds of equipment, so at most four hunters get one.
pub fn assign_equipment<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<EvidenceKind> {
    let mut kinds = EvidenceKind::ALL.to_vec();
    kinds.shuffle(rng);
    kinds.truncate(count);
    kinds
}

/// Names used when the caller supplies fewer than `count`
pub fn default_hunter_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Hunter {}", i)).collect()
}
