//! Effect system for card abilities.
//!
//! - `EffectKind`: closed set of effect shapes (area, beam, nearest heal,
//!   designate, barrage), each resolved through the same contract
//! - `EffectSpec`: catalog description of an effect binding
//! - `EffectBinding`: live binding attached to a card, with its argument bag
//! - Targeting helpers that compute which cells and units a shape touches
//!
//! Effects fire at three trigger points: a player-triggered `Active`, and
//! `StartOfTurn`/`EndOfTurn` passives that run automatically while their
//! card stays on the board.

mod effect;
mod resolver;
mod targeting;

pub use effect::{BindingId, EffectArgs, EffectBinding, EffectKind, EffectSpec, TriggerPoint};
pub use targeting::{area_cells, beam_cells, nearest_units, validate_targets, TargetKind};

pub(crate) use resolver::fire;
