//! Card instance identification.
//!
//! Every card that reaches the board gets a unique `EntityId`. Ids are never
//! invented by clients: the game hands each player a pool of reserved ids
//! ("tickets") and a play is only accepted when it spends one of them.
//!
//! ```
//! use grid_ccg::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::default();
//! assert_eq!(alloc.alloc(), EntityId(1));
//! assert_eq!(alloc.alloc(), EntityId(2));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Monotonic id source, one per game.
///
/// Ids start at 1 so that `0` never names a card on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityAllocator {
    /// Allocate a fresh id.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `alloc` will return.
    #[must_use]
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}
