//! Wire messages.
//!
//! Every message is a JSON object whose `message` field names its kind.
//! Coordinates are always in the frame of the player sending or receiving
//! the message; the session converts them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::ProtoId;
use crate::core::{Coord, EntityId, GameRules};

/// `(id, protoID, x, y)` as sent in deployment lists.
pub type PlayedCard = (EntityId, ProtoId, i32, i32);

/// Messages a client sends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "camelCase")]
pub enum ClientMessage {
    DoneWithBlindStage {
        played: Vec<PlayedCard>,
    },
    PlayCard {
        #[serde(alias = "cardId")]
        id: EntityId,
        #[serde(rename = "protoID", alias = "protoId")]
        proto: ProtoId,
        x: i32,
        y: i32,
    },
    MoveCard {
        #[serde(alias = "cardId")]
        id: EntityId,
        x: i32,
        y: i32,
    },
    Active {
        #[serde(alias = "cardId")]
        id: EntityId,
        #[serde(default)]
        targets: Vec<Coord>,
    },
    ReturnToHand {
        #[serde(alias = "cardId")]
        id: EntityId,
    },
    Skip,
    RequestSync,
}

/// Messages the server sends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "camelCase")]
pub enum ServerMessage {
    GameStarted {
        rules: GameRules,
        hand: Vec<ProtoId>,
        #[serde(rename = "nextIds")]
        next_ids: Vec<EntityId>,
        #[serde(rename = "opponentHandSize")]
        opponent_hand_size: usize,
    },
    /// Fresh reserved ids, after a play spent some.
    NextIds {
        ids: Vec<EntityId>,
    },
    OpponentPlayedCard {
        id: EntityId,
        #[serde(rename = "protoID")]
        proto: ProtoId,
        x: i32,
        y: i32,
    },
    OpponentMovedCard {
        id: EntityId,
        x: i32,
        y: i32,
    },
    OpponentActivated {
        id: EntityId,
        targets: Vec<Coord>,
    },
    OpponentSkipped,
    BlindStageOver {
        #[serde(rename = "otherPlayerPlayed")]
        other_player_played: Vec<PlayedCard>,
        #[serde(rename = "myTurn")]
        my_turn: bool,
        #[serde(rename = "movePoints")]
        move_points: u32,
    },
    GameOver {
        won: bool,
        draw: bool,
    },
    Desync {
        reason: String,
    },
    FullSync(FullSync),
}

/// Complete snapshot of one player's view of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSync {
    pub rules: GameRules,
    pub board: Vec<SyncedUnit>,
    pub in_blind_stage: bool,
    pub my_turn: bool,
    pub game_over: bool,
    pub me: SyncedSelf,
    pub opponent: SyncedOpponent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedUnit {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub mine: bool,
    pub proto: ProtoId,
    pub strength: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedSelf {
    pub hand: Vec<ProtoId>,
    pub next_ids: Vec<EntityId>,
    pub move_points: u32,
    pub fatigue: i32,
    pub played_this_turn: bool,
    pub used_active: bool,
    pub units_moved: Vec<EntityId>,
    pub ready: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedOpponent {
    pub hand_size: usize,
    pub move_points: u32,
    pub fatigue: i32,
    pub ready: bool,
}

/// A frame that could not be decoded or encoded.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ClientMessage {
    /// Decode one inbound frame.
    pub fn parse(frame: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(frame)?)
    }
}

impl ServerMessage {
    /// Encode for the wire.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The message kind, as it appears in the `message` field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::GameStarted { .. } => "gameStarted",
            ServerMessage::NextIds { .. } => "nextIds",
            ServerMessage::OpponentPlayedCard { .. } => "opponentPlayedCard",
            ServerMessage::OpponentMovedCard { .. } => "opponentMovedCard",
            ServerMessage::OpponentActivated { .. } => "opponentActivated",
            ServerMessage::OpponentSkipped => "opponentSkipped",
            ServerMessage::BlindStageOver { .. } => "blindStageOver",
            ServerMessage::GameOver { .. } => "gameOver",
            ServerMessage::Desync { .. } => "desync",
            ServerMessage::FullSync(_) => "fullSync",
        }
    }
}
