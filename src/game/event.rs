//! Game events.
//!
//! The engine appends an event for every observable state change. Events are
//! informational: presentation layers drain them to animate a resolution, and
//! `GroupStarted`/`GroupEnded` bracket damage that happens simultaneously.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::ProtoId;
use crate::core::{Coord, EntityId, PlayerId};
use crate::effects::{EffectKind, TriggerPoint};
use crate::rules::GameResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CardPlaced {
        card: EntityId,
        owner: PlayerId,
        proto: ProtoId,
        at: Coord,
    },
    CardMoved {
        card: EntityId,
        from: Coord,
        to: Coord,
    },
    /// A card left the board without dying (returned to hand).
    CardLifted { card: EntityId, from: Coord },
    GroupStarted,
    GroupEnded,
    /// `amount` is negative for heals.
    Damaged {
        card: EntityId,
        amount: i32,
        strength: i32,
    },
    Died { card: EntityId, at: Coord },
    Fatigue {
        player: PlayerId,
        card: Option<EntityId>,
        amount: i32,
    },
    EffectFired {
        card: EntityId,
        kind: EffectKind,
        trigger: TriggerPoint,
    },
    TargetsDesignated {
        card: EntityId,
        targets: SmallVec<[Coord; 2]>,
    },
    BlindStageOver { first: PlayerId },
    TurnStarted { player: PlayerId, turn: u32 },
    GameOver(GameResult),
}
