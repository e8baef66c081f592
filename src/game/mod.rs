//! The authoritative game engine.
//!
//! - `state`: the `Game` value and its primitives (`put_card`, `take_damage`,
//!   damage groups)
//! - `validate`: side-effect-free `can_*` legality predicates
//! - `actions`: the mutating player actions, each validated first
//! - `turn`: reveal, turn entry and exit, fatigue, trigger firing
//! - `event`: the event log presentation layers drain
//!
//! ## Flow
//!
//! ```text
//! apply(player, action)
//!   -> can_*            (Rejection, nothing changed)
//!   -> mutate           (put_card / take_damage / fire bindings)
//!   -> settle           (elimination check after the outermost group)
//!   -> record history
//! ```

mod actions;
mod event;
mod player;
mod state;
mod turn;
mod validate;

pub use event::GameEvent;
pub use player::Player;
pub use state::Game;
