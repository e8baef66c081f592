//! JSON wire protocol between clients and the session.

mod messages;

pub use messages::{
    ClientMessage, FullSync, PlayedCard, ProtocolError, ServerMessage, SyncedOpponent,
    SyncedSelf, SyncedUnit,
};
