//! Error taxonomy.
//!
//! - [`Rejection`]: an illegal action. Expected and recoverable; the action is
//!   simply not applied.
//! - [`EngineError`]: what engine operations return. Either a rejection or an
//!   invariant violation, which means the authoritative state can no longer be
//!   trusted to match what clients believe.
//! - [`RulesError`]: a bad rules/catalog configuration.

use thiserror::Error;

use super::{Coord, EntityId};
use crate::cards::ProtoId;

/// Named reason for refusing an action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("coordinates {0} are outside the board")]
    OutOfBounds(Coord),
    #[error("cell {0} is outside the player's own half")]
    OutsideOwnHalf(Coord),
    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),
    #[error("cell {0} appears more than once in the deployment")]
    DuplicateCell(Coord),
    #[error("card template {0} is not in the player's hand")]
    NotInHand(ProtoId),
    #[error("card template {0} does not exist")]
    UnknownProto(ProtoId),
    #[error("id {0} is not one of the player's reserved ids")]
    TicketNotReserved(EntityId),
    #[error("id {0} appears more than once in the deployment")]
    DuplicateTicket(EntityId),
    #[error("{0} does not exist")]
    UnknownCard(EntityId),
    #[error("{0} belongs to the other player")]
    NotOwner(EntityId),
    #[error("{0} is not on the board")]
    NotOnBoard(EntityId),
    #[error("it is not the player's turn")]
    NotYourTurn,
    #[error("a card has already been played this turn")]
    AlreadyPlayed,
    #[error("the blind stage allows at most {limit} units")]
    BlindStageLimit { limit: usize },
    #[error("the player has already finished the blind stage")]
    AlreadyReady,
    #[error("the blind stage is over")]
    NotInBlindStage,
    #[error("the action is not available during the blind stage")]
    InBlindStage,
    #[error("no move points left")]
    NoMovePoints,
    #[error("destination {to} is not adjacent to {from}")]
    NotAdjacent { from: Coord, to: Coord },
    #[error("{0} has no active ability")]
    NoActive(EntityId),
    #[error("an active ability has already been used this turn")]
    AlreadyUsedActive,
    #[error("{0} moved this turn and cannot use its active ability")]
    MovedThisTurn(EntityId),
    #[error("{0} used its active ability this turn and cannot move")]
    ActivatedThisTurn(EntityId),
    #[error("expected {expected} targets, got {got}")]
    WrongTargetCount { expected: usize, got: usize },
    #[error("target {0} is not valid for this ability")]
    InvalidTarget(Coord),
    #[error("the game is over")]
    GameOver,
}

impl Rejection {
    /// Does this rejection point at a malformed or fabricated payload rather
    /// than an ordinary out-of-turn or out-of-resources attempt?
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Rejection::UnknownProto(_)
                | Rejection::UnknownCard(_)
                | Rejection::TicketNotReserved(_)
                | Rejection::DuplicateTicket(_)
        )
    }
}

/// Error returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("invariant violated: {detail}")]
    Invariant { detail: String },
}

impl EngineError {
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant {
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            EngineError::Rejected(r) => Some(r),
            EngineError::Invariant { .. } => None,
        }
    }
}

/// Configuration failure.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },
    #[error("own halves of height {own_height} do not fit a board of height {height}")]
    OwnHalvesOverlap { own_height: i32, height: i32 },
    #[error("max move points {max} is below the per-turn grant {per_turn}")]
    MovePointCap { per_turn: u32, max: u32 },
    #[error("reserved id pool {reserved} cannot cover a blind deployment of {units}")]
    TicketPoolTooSmall { reserved: usize, units: usize },
    #[error("card template {0} is defined twice")]
    DuplicateProto(ProtoId),
    #[error("card template {0} has non-positive base strength")]
    NonPositiveStrength(ProtoId),
    #[error("card template {proto} has effect radius {radius} out of range")]
    EffectRadius { proto: ProtoId, radius: i32 },
    #[error("card template {proto} has effect amount {amount} out of range")]
    EffectAmount { proto: ProtoId, amount: i32 },
    #[error("card template {0} designates targets but has no barrage to receive them")]
    MissingCompanion(ProtoId),
    #[error("cannot parse TOML rules: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot parse JSON rules: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_violation_classification() {
        assert!(Rejection::UnknownCard(EntityId(9)).is_protocol_violation());
        assert!(Rejection::UnknownProto(ProtoId(9)).is_protocol_violation());
        assert!(!Rejection::NotYourTurn.is_protocol_violation());
        assert!(!Rejection::CellOccupied(Coord::new(0, 0)).is_protocol_violation());
    }

    #[test]
    fn test_rejection_converts_into_engine_error() {
        let err: EngineError = Rejection::NoMovePoints.into();
        assert_eq!(err.rejection(), Some(&Rejection::NoMovePoints));
        assert_eq!(err.to_string(), "rejected: no move points left");

        let inv = EngineError::invariant("board points at a missing card");
        assert!(inv.rejection().is_none());
    }
}
