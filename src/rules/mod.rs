//! Stage and turn structure.
//!
//! The turn model is flattened: during a turn the player may play one card,
//! make as many single-step moves as their move points allow, and use one
//! active ability, in any order. The turn ends only on an explicit skip.

pub mod engine;

pub use engine::{GameResult, Stage, StageTrigger};
