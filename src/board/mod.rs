//! The game board.
//!
//! A fixed `width x height` grid holding at most one card per cell. Each
//! player owns the `own_height` rows at their end of the board, which bound
//! where they may deploy and move during the blind stage.

mod grid;

pub use grid::Board;
