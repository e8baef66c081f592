//! Board occupancy.
//!
//! The `Board` is a sparse map from linearized cell index to the card on that
//! cell, plus the reverse map from card to cell. `place` is the only way a card
//! gets onto a cell, and it refuses occupied destinations, so no two cards can
//! ever share a cell.

use rustc_hash::FxHashMap;

use crate::core::{Coord, EntityId, Geometry, Rejection};

/// One-card-per-cell occupancy map.
///
/// ## Usage
///
/// ```
/// use grid_ccg::board::Board;
/// use grid_ccg::core::{Coord, EntityId, Geometry};
///
/// let mut board = Board::new(Geometry::new(7, 6, 3));
///
/// board.place(EntityId(1), Coord::new(2, 1)).unwrap();
/// assert_eq!(board.get(Coord::new(2, 1)), Some(EntityId(1)));
///
/// // Moving frees the previous cell.
/// board.place(EntityId(1), Coord::new(2, 2)).unwrap();
/// assert_eq!(board.get(Coord::new(2, 1)), None);
///
/// assert!(board.place(EntityId(2), Coord::new(2, 2)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    geometry: Geometry,

    /// Cell index -> card on that cell.
    cells: FxHashMap<usize, EntityId>,

    /// Card -> cell index.
    locations: FxHashMap<EntityId, usize>,
}

impl Board {
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            cells: FxHashMap::default(),
            locations: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The card on a cell. `None` for empty or out-of-bounds cells.
    #[must_use]
    pub fn get(&self, at: Coord) -> Option<EntityId> {
        self.geometry
            .index(at)
            .and_then(|i| self.cells.get(&i).copied())
    }

    /// Is the cell on the board and free?
    #[must_use]
    pub fn is_free(&self, at: Coord) -> bool {
        self.geometry.contains(at) && self.get(at).is_none()
    }

    #[must_use]
    pub fn position_of(&self, card: EntityId) -> Option<Coord> {
        self.locations.get(&card).map(|&i| self.geometry.coord(i))
    }

    #[must_use]
    pub fn contains_card(&self, card: EntityId) -> bool {
        self.locations.contains_key(&card)
    }

    /// Put a card on a cell, freeing the cell it occupied before (if any).
    ///
    /// Returns the previous position.
    pub fn place(&mut self, card: EntityId, at: Coord) -> Result<Option<Coord>, Rejection> {
        let index = self.geometry.index(at).ok_or(Rejection::OutOfBounds(at))?;
        if self.cells.contains_key(&index) {
            return Err(Rejection::CellOccupied(at));
        }

        let previous = self.remove(card);
        self.cells.insert(index, card);
        self.locations.insert(card, index);
        Ok(previous)
    }

    /// Take a card off the board. Returns where it was.
    pub fn remove(&mut self, card: EntityId) -> Option<Coord> {
        let index = self.locations.remove(&card)?;
        self.cells.remove(&index);
        Some(self.geometry.coord(index))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in linear index order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, EntityId)> + '_ {
        let mut occupied: Vec<_> = self.cells.iter().map(|(&i, &id)| (i, id)).collect();
        occupied.sort_unstable_by_key(|&(i, _)| i);
        occupied
            .into_iter()
            .map(move |(i, id)| (self.geometry.coord(i), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(Geometry::new(7, 6, 3))
    }

    #[test]
    fn test_place_and_lookup() {
        let mut board = board();

        assert_eq!(board.place(EntityId(1), Coord::new(0, 0)), Ok(None));
        assert_eq!(board.place(EntityId(2), Coord::new(6, 5)), Ok(None));

        assert_eq!(board.len(), 2);
        assert_eq!(board.position_of(EntityId(2)), Some(Coord::new(6, 5)));
        assert!(board.contains_card(EntityId(1)));
        assert!(!board.is_free(Coord::new(0, 0)));
        assert!(board.is_free(Coord::new(1, 0)));
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_bounds() {
        let mut board = board();
        board.place(EntityId(1), Coord::new(3, 3)).unwrap();

        assert_eq!(
            board.place(EntityId(2), Coord::new(3, 3)),
            Err(Rejection::CellOccupied(Coord::new(3, 3)))
        );
        assert_eq!(
            board.place(EntityId(2), Coord::new(7, 0)),
            Err(Rejection::OutOfBounds(Coord::new(7, 0)))
        );
        assert!(!board.contains_card(EntityId(2)));
    }

    #[test]
    fn test_move_frees_previous_cell() {
        let mut board = board();
        board.place(EntityId(1), Coord::new(1, 1)).unwrap();

        let previous = board.place(EntityId(1), Coord::new(1, 2)).unwrap();

        assert_eq!(previous, Some(Coord::new(1, 1)));
        assert_eq!(board.get(Coord::new(1, 1)), None);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut board = board();
        board.place(EntityId(5), Coord::new(2, 4)).unwrap();

        assert_eq!(board.remove(EntityId(5)), Some(Coord::new(2, 4)));
        assert_eq!(board.remove(EntityId(5)), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut board = board();
        board.place(EntityId(3), Coord::new(0, 2)).unwrap();
        board.place(EntityId(1), Coord::new(5, 0)).unwrap();
        board.place(EntityId(2), Coord::new(1, 1)).unwrap();

        let ids: Vec<_> = board.iter().map(|(_, id)| id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(2), EntityId(3)]);
    }
}
