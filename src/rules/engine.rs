//! Stage state machine.
//!
//! A game moves through three kinds of stage:
//!
//! ```text
//! Blind --BlindStageComplete{first}--> Turn(first)
//! Turn(p) --TurnEnded--> Turn(p.other())
//! Turn(p) --Eliminated(result)--> Over(result)
//! ```
//!
//! Every other (stage, trigger) pair is illegal. `Blind` is left exactly
//! once and `Over` is terminal, so "in blind stage" and "game over" are both
//! monotonic.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Both boards emptied by the same resolution.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Current stage of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Simultaneous hidden deployment. No player has the turn.
    Blind,
    /// The given player has the turn.
    Turn(PlayerId),
    Over(GameResult),
}

/// Event that moves the stage machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageTrigger {
    /// Both players have finished deploying; `first` takes the first turn.
    BlindStageComplete { first: PlayerId },
    /// The player holding the turn ended it.
    TurnEnded,
    /// A board emptied.
    Eliminated(GameResult),
}

impl Stage {
    /// The stage `trigger` leads to, or `None` if the transition is illegal.
    #[must_use]
    pub fn next(self, trigger: StageTrigger) -> Option<Stage> {
        match (self, trigger) {
            (Stage::Blind, StageTrigger::BlindStageComplete { first }) => Some(Stage::Turn(first)),
            (Stage::Turn(player), StageTrigger::TurnEnded) => Some(Stage::Turn(player.other())),
            (Stage::Turn(_), StageTrigger::Eliminated(result)) => Some(Stage::Over(result)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_blind(self) -> bool {
        self == Stage::Blind
    }

    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, Stage::Over(_))
    }

    /// Whose turn it is. `None` during the blind stage and after game over.
    #[must_use]
    pub fn turn(self) -> Option<PlayerId> {
        match self {
            Stage::Turn(player) => Some(player),
            Stage::Blind | Stage::Over(_) => None,
        }
    }

    #[must_use]
    pub fn result(self) -> Option<GameResult> {
        match self {
            Stage::Over(result) => Some(result),
            Stage::Blind | Stage::Turn(_) => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Blind => write!(f, "blind stage"),
            Stage::Turn(player) => write!(f, "turn of {player}"),
            Stage::Over(GameResult::Winner(player)) => write!(f, "game over, {player} won"),
            Stage::Over(GameResult::Draw) => write!(f, "game over, draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        let turn = Stage::Blind
            .next(StageTrigger::BlindStageComplete { first: PlayerId::P2 })
            .unwrap();
        assert_eq!(turn, Stage::Turn(PlayerId::P2));

        let turn = turn.next(StageTrigger::TurnEnded).unwrap();
        assert_eq!(turn.turn(), Some(PlayerId::P1));

        let over = turn
            .next(StageTrigger::Eliminated(GameResult::Winner(PlayerId::P1)))
            .unwrap();
        assert!(over.is_over());
        assert!(over.result().unwrap().is_winner(PlayerId::P1));
    }

    #[test]
    fn test_illegal_transitions() {
        assert_eq!(Stage::Blind.next(StageTrigger::TurnEnded), None);
        assert_eq!(
            Stage::Blind.next(StageTrigger::Eliminated(GameResult::Draw)),
            None
        );
        assert_eq!(
            Stage::Turn(PlayerId::P1).next(StageTrigger::BlindStageComplete { first: PlayerId::P1 }),
            None
        );

        let over = Stage::Over(GameResult::Draw);
        assert_eq!(over.next(StageTrigger::TurnEnded), None);
        assert_eq!(over.next(StageTrigger::Eliminated(GameResult::Draw)), None);
    }

    #[test]
    fn test_draw_has_no_winner() {
        assert!(!GameResult::Draw.is_winner(PlayerId::P1));
        assert!(!GameResult::Draw.is_winner(PlayerId::P2));
        assert_eq!(Stage::Over(GameResult::Draw).turn(), None);
    }
}
