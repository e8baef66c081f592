//! Per-game session: drives a `Game` from wire messages.
//!
//! The session owns everything that depends on who is on the other end of
//! the connection: the 180° frame rotation for player 2, hiding blind-stage
//! deployments, replenishing reserved ids, and turning engine failures into
//! `desync` notices. What is legal and what happens stays in the engine.

mod adapter;

pub use adapter::{Envelope, GameSession, Outcome, SessionBuilder, SessionError, Verdict};
