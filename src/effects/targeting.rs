//! Target selection.
//!
//! Two concerns live here: validating cells a player picked for a targeted
//! active (`TargetKind`), and computing which cells or units an effect shape
//! touches (`area_cells`, `beam_cells`, `nearest_units`). The helpers are pure
//! functions of the board, so they can also drive client-side previews.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Coord, EntityId, Geometry, PlayerId, Rejection};

/// What kind of cell a targeting step accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetKind {
    /// Any in-bounds cell, occupied or not.
    AnyField,
}

impl TargetKind {
    #[must_use]
    pub fn accepts(self, geometry: &Geometry, at: Coord) -> bool {
        match self {
            TargetKind::AnyField => geometry.contains(at),
        }
    }
}

/// Check picked cells against the target kinds, one cell per kind.
pub fn validate_targets(
    kinds: &[TargetKind],
    targets: &[Coord],
    geometry: &Geometry,
) -> Result<(), Rejection> {
    if kinds.len() != targets.len() {
        return Err(Rejection::WrongTargetCount {
            expected: kinds.len(),
            got: targets.len(),
        });
    }
    for (kind, &at) in kinds.iter().zip(targets) {
        if !kind.accepts(geometry, at) {
            return Err(Rejection::InvalidTarget(at));
        }
    }
    Ok(())
}

/// In-bounds cells of the square of `radius` around `center`, column by
/// column. Out-of-bounds cells are skipped.
#[must_use]
pub fn area_cells(center: Coord, radius: i32, geometry: &Geometry) -> Vec<Coord> {
    let mut cells = Vec::new();
    for x in (center.x - radius)..=(center.x + radius) {
        for y in (center.y - radius)..=(center.y + radius) {
            let c = Coord::new(x, y);
            if geometry.contains(c) {
                cells.push(c);
            }
        }
    }
    cells
}

/// Cells straight ahead of `origin` in the owner's forward direction, nearest
/// first, up to the board edge. `origin` itself is not included.
pub fn beam_cells(
    origin: Coord,
    owner: PlayerId,
    geometry: &Geometry,
) -> impl Iterator<Item = Coord> + '_ {
    let dy = geometry.forward(owner);
    (1..)
        .map(move |step| origin.offset(0, dy * step))
        .take_while(move |&c| geometry.contains(c))
}

/// All units tied for the smallest Manhattan distance to `origin`, excluding
/// `source` itself. Empty when `source` is alone on the board.
#[must_use]
pub fn nearest_units(board: &Board, source: EntityId, origin: Coord) -> Vec<EntityId> {
    let mut best = u32::MAX;
    let mut nearest = Vec::new();

    for (at, id) in board.iter() {
        if id == source {
            continue;
        }
        let dist = origin.manhattan(at);
        if dist < best {
            best = dist;
            nearest.clear();
            nearest.push(id);
        } else if dist == best {
            nearest.push(id);
        }
    }
    nearest
}
