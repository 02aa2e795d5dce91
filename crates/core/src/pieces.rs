//! Pieces module - tetromino geometry table
//!
//! Every shape sits in a 4x4 box whose top-left corner is the piece origin, so
//! all offsets are non-negative. Rotation is a plain table lookup: there is no
//! kick search, a rotation that collides is simply rejected by the caller.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin, as (column, row)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Shapes indexed by `[PieceKind::index()][Rotation::index()]`
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [[(1, 0), (2, 0), (1, 1), (2, 1)]; 4],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Get the mino offsets for a piece kind and rotation
pub fn cell_offsets(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Absolute board cells of a piece with its box origin at `(col, row)`
///
/// This is the only place piece cells are derived; movement, rotation,
/// collision and rendering all go through it.
#[inline]
pub fn cells_at(kind: PieceKind, rotation: Rotation, (col, row): (i8, i8)) -> PieceShape {
    cell_offsets(kind, rotation).map(|(dx, dy)| (col + dx, row + dy))
}

/// Shape of a freshly spawned piece
pub fn spawn_shape(kind: PieceKind) -> PieceShape {
    cell_offsets(kind, Rotation::North)
}
