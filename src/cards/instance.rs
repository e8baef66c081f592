//! Card instances - runtime card state.
//!
//! A `CardInstance` exists from the moment its owner plays it until it dies
//! or is lifted back to hand. The `Game` owns the canonical id -> instance
//! registry.

use serde::{Deserialize, Serialize};

use super::definition::{CardTemplate, ProtoId};
use crate::core::{Coord, EntityId, PlayerId};
use crate::effects::BindingId;

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: EntityId,

    pub proto: ProtoId,

    pub owner: PlayerId,

    /// Current strength. Never observed at or below zero once damage
    /// resolution has finished: such a card is removed immediately.
    pub strength: i32,

    /// Board position. `None` while the card is in limbo (created but not yet
    /// put, or lifted).
    pub position: Option<Coord>,

    pub active: Option<BindingId>,
    pub start_of_turn: Option<BindingId>,
    pub end_of_turn: Option<BindingId>,
}

impl CardInstance {
    /// Create an instance at the template's base strength, off the board.
    #[must_use]
    pub fn new(id: EntityId, owner: PlayerId, template: &CardTemplate) -> Self {
        Self {
            id,
            proto: template.id,
            owner,
            strength: template.base_strength,
            position: None,
            active: None,
            start_of_turn: None,
            end_of_turn: None,
        }
    }

    #[must_use]
    pub fn on_board(&self) -> bool {
        self.position.is_some()
    }

    /// Subtract `amount` from strength (a negative amount heals, unclamped).
    /// Returns the new strength.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        self.strength = self.strength.saturating_sub(amount);
        self.strength
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.strength <= 0
    }

    /// All live bindings attached to this card.
    pub fn binding_ids(&self) -> impl Iterator<Item = BindingId> {
        [self.active, self.start_of_turn, self.end_of_turn]
            .into_iter()
            .flatten()
    }
}
