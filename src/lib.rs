//! # grid-ccg
//!
//! Authoritative rules engine for a two-player card game on a fixed grid.
//! Both players first deploy units in secret (the blind stage), then take
//! turns playing cards, moving units, and triggering abilities until one side
//! has no units left.
//!
//! ## Design Principles
//!
//! 1. **Single source of truth**: clients predict optimistically, the engine
//!    decides. Every action is checked by a side-effect-free `can_*`
//!    predicate that names its reason for refusing.
//!
//! 2. **One path onto the board**: all placements go through
//!    `Game::put_card`, all strength changes through `Game::take_damage`.
//!
//! 3. **Configuration is a value**: board geometry, limits, and the card
//!    catalog live in a `GameRules` owned by the game. No global tables.
//!
//! ## Architecture
//!
//! - **Closed effect set**: effects are an enum resolved through one
//!   `resolve(game, source, args)` contract, grouped so simultaneous damage
//!   settles together.
//!
//! - **Explicit stage machine**: `Stage` with a transition table; the turn
//!   model allows one play, move-point-bounded moves, and one active per turn,
//!   ended by an explicit skip.
//!
//! - **Anti-cheat ids**: a played card takes one of the player's reserved
//!   ids; clients never invent ids.
//!
//! ## Modules
//!
//! - `core`: Players, card ids, coordinates, rules, actions, RNG, errors
//! - `cards`: Card templates, instances, and the catalog
//! - `board`: One-card-per-cell occupancy
//! - `effects`: Effect shapes, targeting, and resolution
//! - `rules`: Stage state machine
//! - `game`: The authoritative engine
//! - `catalog`: The standard card set
//! - `protocol`: JSON wire messages
//! - `session`: Drives a game from wire messages for two connected players

pub mod board;
pub mod cards;
pub mod catalog;
pub mod core;
pub mod effects;
pub mod game;
pub mod protocol;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Coord, EngineError, EntityId, GameRng, GameRules, Geometry, Placement,
    PlayerId, PlayerMap, Rejection, RulesError,
};

pub use crate::cards::{CardCatalog, CardInstance, CardTemplate, ProtoId};

pub use crate::board::Board;

pub use crate::effects::{EffectBinding, EffectKind, EffectSpec, TargetKind, TriggerPoint};

pub use crate::rules::{GameResult, Stage};

pub use crate::game::{Game, GameEvent, Player};

pub use crate::protocol::{ClientMessage, ProtocolError, ServerMessage};

pub use crate::session::{Envelope, GameSession, Outcome, SessionBuilder, Verdict};
