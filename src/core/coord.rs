//! Board coordinates and geometry.
//!
//! The canonical frame has `(0, 0)` in the bottom-left corner as seen by
//! player 1. Player 2 sees the board rotated by 180°, so every coordinate that
//! crosses the wire for player 2 goes through [`Geometry::to_player_frame`] /
//! [`Geometry::from_player_frame`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A cell on the board. Coordinates may be out of bounds; use
/// [`Geometry::contains`] before trusting one that came from a client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Board dimensions plus the depth of each player's own half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
    pub own_height: i32,
}

impl Geometry {
    #[must_use]
    pub const fn new(width: i32, height: i32, own_height: i32) -> Self {
        Self {
            width,
            height,
            own_height,
        }
    }

    /// Is the coordinate on the board?
    #[must_use]
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.width && c.y < self.height
    }

    /// Linearized cell index (`y * width + x`), `None` when out of bounds.
    #[must_use]
    pub fn index(&self, c: Coord) -> Option<usize> {
        self.contains(c)
            .then(|| (c.y * self.width + c.x) as usize)
    }

    /// Inverse of [`Geometry::index`].
    #[must_use]
    pub fn coord(&self, index: usize) -> Coord {
        let index = index as i32;
        Coord::new(index % self.width, index / self.width)
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// All cells in linear index order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cell_count()).map(move |i| self.coord(i))
    }

    /// Canonical rows belonging to a player's own half.
    #[must_use]
    pub fn own_rows(&self, player: PlayerId) -> Range<i32> {
        if player.is_player2() {
            (self.height - self.own_height)..self.height
        } else {
            0..self.own_height
        }
    }

    /// Is the (canonical) coordinate inside the player's own half?
    #[must_use]
    pub fn in_own_half(&self, player: PlayerId, c: Coord) -> bool {
        self.contains(c) && self.own_rows(player).contains(&c.y)
    }

    /// Row delta pointing from the player's side toward the opponent.
    #[must_use]
    pub fn forward(&self, player: PlayerId) -> i32 {
        if player.is_player2() {
            -1
        } else {
            1
        }
    }

    /// Map a canonical coordinate into the player's own frame.
    ///
    /// Off-board coordinates come back unchanged, so a client value can never
    /// overflow the rotation and stays off the board either way.
    #[must_use]
    pub fn to_player_frame(&self, player: PlayerId, c: Coord) -> Coord {
        if player.is_player2() && self.contains(c) {
            Coord::new(self.width - 1 - c.x, self.height - 1 - c.y)
        } else {
            c
        }
    }

    /// Map a coordinate in the player's own frame to the canonical frame.
    ///
    /// The 180° rotation is an involution, so this is the same mapping as
    /// [`Geometry::to_player_frame`].
    #[must_use]
    pub fn from_player_frame(&self, player: PlayerId, c: Coord) -> Coord {
        self.to_player_frame(player, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom() -> Geometry {
        Geometry::new(7, 6, 3)
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Coord::new(3, 3).manhattan(Coord::new(3, 4)), 1);
        assert_eq!(Coord::new(0, 0).manhattan(Coord::new(2, -3)), 5);
        assert_eq!(Coord::new(1, 1).manhattan(Coord::new(1, 1)), 0);
    }

    #[test]
    fn test_bounds_and_index() {
        let g = geom();
        assert!(g.contains(Coord::new(0, 0)));
        assert!(g.contains(Coord::new(6, 5)));
        assert!(!g.contains(Coord::new(7, 0)));
        assert!(!g.contains(Coord::new(0, -1)));

        assert_eq!(g.index(Coord::new(2, 1)), Some(9));
        assert_eq!(g.coord(9), Coord::new(2, 1));
        assert_eq!(g.index(Coord::new(-1, 0)), None);
        assert_eq!(g.cells().count(), 42);
    }

    #[test]
    fn test_own_halves_are_mirrored() {
        let g = geom();
        assert_eq!(g.own_rows(PlayerId::P1), 0..3);
        assert_eq!(g.own_rows(PlayerId::P2), 3..6);
        assert!(g.in_own_half(PlayerId::P1, Coord::new(4, 2)));
        assert!(!g.in_own_half(PlayerId::P1, Coord::new(4, 3)));
        assert!(g.in_own_half(PlayerId::P2, Coord::new(0, 5)));
        assert_eq!(g.forward(PlayerId::P1), 1);
        assert_eq!(g.forward(PlayerId::P2), -1);
    }

    #[test]
    fn test_frame_rotation() {
        let g = geom();
        let c = Coord::new(1, 0);

        assert_eq!(g.to_player_frame(PlayerId::P1, c), c);
        assert_eq!(g.to_player_frame(PlayerId::P2, c), Coord::new(5, 5));
        assert_eq!(
            g.from_player_frame(PlayerId::P2, g.to_player_frame(PlayerId::P2, c)),
            c
        );
    }

    /// Off-board values pass through the rotation untouched, extremes included.
    #[test]
    fn test_frame_rotation_leaves_off_board_alone() {
        let g = geom();
        for c in [
            Coord::new(i32::MIN, 0),
            Coord::new(0, i32::MIN),
            Coord::new(i32::MAX, i32::MAX),
            Coord::new(7, 0),
            Coord::new(-1, 5),
        ] {
            assert_eq!(g.from_player_frame(PlayerId::P2, c), c);
            assert!(!g.contains(g.from_player_frame(PlayerId::P2, c)));
        }
    }
}
