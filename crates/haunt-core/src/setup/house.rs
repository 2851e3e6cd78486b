//! House Setup
//!
//! Creates the fixed 13-room house and its connectivity.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::house::{House, HouseBuilder};
use crate::components::room::RoomId;

/// Where every hunter starts
pub const VAN: &str = "Van";

/// Room names in arena order; the van is always `RoomId(0)`
pub const ROOM_NAMES: [&str; 13] = [
    VAN,
    "Hallway",
    "Master Bedroom",
    "Boy's Bedroom",
    "Bathroom",
    "Basement",
    "Basement Hallway",
    "Right Storage Room",
    "Left Storage Room",
    "Kitchen",
    "Living Room",
    "Garage",
    "Utility Room",
];

/// Undirected connections between rooms
pub const CONNECTIONS: [(&str, &str); 12] = [
    (VAN, "Hallway"),
    ("Hallway", "Master Bedroom"),
    ("Hallway", "Boy's Bedroom"),
    ("Hallway", "Bathroom"),
    ("Hallway", "Kitchen"),
    ("Hallway", "Basement"),
    ("Basement", "Basement Hallway"),
    ("Basement Hallway", "Right Storage Room"),
    ("Basement Hallway", "Left Storage Room"),
    ("Kitchen", "Living Room"),
    ("Kitchen", "Garage"),
    ("Garage", "Utility Room"),
];

/// Build the house with room for `hunter_capacity` hunters
pub fn build_house(hunter_capacity: usize) -> House {
    let mut builder = HouseBuilder::new();
    for name in ROOM_NAMES {
        builder.add_room(name);
    }

    for (a, b) in CONNECTIONS {
        if let (Some(a), Some(b)) = (builder.find(a), builder.find(b)) {
            builder.connect(a, b);
        }
    }

    builder.build(hunter_capacity)
}

/// The van's ID
pub fn van(house: &House) -> RoomId {
    house.room_by_name(VAN).map(|r| r.id()).unwrap_or(RoomId(0))
}

/// A uniformly chosen room other than the van
pub fn random_room_excluding_van<R: Rng + ?Sized>(house: &House, rng: &mut R) -> RoomId {
    let van = van(house);
    let candidates: Vec<RoomId> = house
        .rooms()
        .iter()
        .map(|r| r.id())
        .filter(|id| *id != van)
        .collect();
    candidates.choose(rng).copied().unwrap_or(van)
}

/// Output the room graph as JSON for verification
pub fn house_to_json(house: &House) -> String {
    let rooms: Vec<_> = house
        .rooms()
        .iter()
        .map(|room| {
            serde_json::json!({
                "id": room.id().0,
                "name": room.name(),
                "adjacent": room
                    .adjacent()
                    .iter()
                    .map(|id| house.room_name(*id))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&rooms).unwrap_or_else(|_| "[]".to_string())
}
