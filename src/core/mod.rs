//! Core engine types: players, card ids, coordinates, rules, actions, RNG,
//! and the error taxonomy.
//!
//! Everything here is a leaf: no type in `core` knows about the board, the
//! game state machine, or the wire protocol.

pub mod action;
pub mod config;
pub mod coord;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{Action, ActionRecord, Placement};
pub use config::GameRules;
pub use coord::{Coord, Geometry};
pub use entity::{EntityAllocator, EntityId};
pub use error::{EngineError, Rejection, RulesError};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
