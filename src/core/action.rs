//! Action representation.
//!
//! An `Action` is one validated-then-applied player intent, expressed in the
//! canonical board frame. The session translates wire messages into actions;
//! the game records every applied action as an `ActionRecord`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::coord::Coord;
use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::ProtoId;

/// One card leaving the hand for the board: the reserved id it spends, the
/// template it comes from, and the destination cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub card: EntityId,
    pub proto: ProtoId,
    pub at: Coord,
}

impl Placement {
    #[must_use]
    pub const fn new(card: EntityId, proto: ProtoId, at: Coord) -> Self {
        Self { card, proto, at }
    }
}

/// A complete player action.
///
/// ## Example
///
/// ```
/// use grid_ccg::core::{Action, Coord, EntityId};
///
/// let step = Action::MoveCard { card: EntityId(4), to: Coord::new(2, 3) };
/// assert_eq!(step.name(), "moveCard");
/// assert_eq!(step.card(), Some(EntityId(4)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Deploy units and signal completion of the blind stage, atomically.
    FinishBlindStage { placements: SmallVec<[Placement; 4]> },
    PlayCard(Placement),
    MoveCard { card: EntityId, to: Coord },
    Activate { card: EntityId, targets: SmallVec<[Coord; 2]> },
    /// Lift a blind-stage unit back into the hand.
    ReturnToHand { card: EntityId },
    Skip,
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::FinishBlindStage { .. } => "doneWithBlindStage",
            Action::PlayCard(_) => "playCard",
            Action::MoveCard { .. } => "moveCard",
            Action::Activate { .. } => "active",
            Action::ReturnToHand { .. } => "returnToHand",
            Action::Skip => "skip",
        }
    }

    /// The single card this action is about, if any.
    #[must_use]
    pub fn card(&self) -> Option<EntityId> {
        match self {
            Action::PlayCard(p) => Some(p.card),
            Action::MoveCard { card, .. }
            | Action::Activate { card, .. }
            | Action::ReturnToHand { card } => Some(*card),
            Action::FinishBlindStage { .. } | Action::Skip => None,
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,

    pub action: Action,

    /// Turn number when the action was taken. Zero during the blind stage.
    pub turn: u32,

    /// Position in the game's overall action sequence.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
