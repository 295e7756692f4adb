//! Piece catalog - static shape table
//!
//! Every shape kind owns an ordered list of rotation variants. A variant is
//! four `(dx, dy)` offsets measured from the piece anchor, with `dy` growing
//! downward. Rotation advances to the next variant and wraps around; there is
//! no wall-kick correction, so a rotation into an occupied cell simply fails.

use crate::types::{ShapeKind, SPAWN_COLUMN};

/// Offset of a single block relative to the piece anchor
pub type BlockOffset = (i8, i8);

/// One rotation variant - exactly four block offsets
pub type Variant = [BlockOffset; 4];

/// Static definition shared by every piece of a kind
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub kind: ShapeKind,
    /// Rotation variants, cycled in order
    pub variants: &'static [Variant],
    /// Anchor row used when the shape spawns
    pub spawn_row: i8,
}

impl ShapeDefinition {
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Variant for an arbitrary rotation index (taken modulo the variant count)
    pub fn variant(&self, rotation: usize) -> &'static Variant {
        &self.variants[rotation % self.variants.len()]
    }

    /// Whether rotating this shape can ever change its footprint
    pub fn rotates(&self) -> bool {
        self.variants.len() > 1
    }

    /// Anchor column and row of a freshly spawned piece
    pub fn spawn_anchor(&self) -> (i8, i8) {
        (SPAWN_COLUMN, self.spawn_row)
    }
}

/// Get the static definition of a shape kind
pub fn definition(kind: ShapeKind) -> &'static ShapeDefinition {
    match kind {
        ShapeKind::I => &I_SHAPE,
        ShapeKind::J => &J_SHAPE,
        ShapeKind::L => &L_SHAPE,
        ShapeKind::O => &O_SHAPE,
        ShapeKind::S => &S_SHAPE,
        ShapeKind::T => &T_SHAPE,
        ShapeKind::Z => &Z_SHAPE,
    }
}

/// Get the block offsets of a kind at a rotation index
pub fn get_variant(kind: ShapeKind, rotation: usize) -> &'static Variant {
    definition(kind).variant(rotation)
}

// I and S reach one row above their anchor, so they spawn one row lower
// to keep every block inside the interior.
const I_SHAPE: ShapeDefinition = ShapeDefinition {
    kind: ShapeKind::I,
    variants: &[
        // vertical
        [(0, -1), (0, 0), (0, 1), (0, 2)],
        // horizontal
        [(-1, 0), (0, 0), (1, 0), (2, 0)],
    ],
    spawn_row: 2,
};

const J_SHAPE: ShapeDefinition = ShapeDefinition {
    kind: ShapeKind::J,
    variants: &[
        [(0, 0), (0, 1), (0, 2), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 0)],
        [(1, 0), (1, 1), (1, 2), (0, 0)],
        [(0, 0), (0, 1), (1, 0), (2, 0)],
    ],
    spawn_row: 1,
};

const L_SHAPE: ShapeDefinition = ShapeDefinition {
    kind: ShapeKind::L,
    variants: &[
        [(1, 0), (1, 1), (1, 2), (0, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(0, 2), (0, 1), (0, 0), (1, 0)],
        [(0, 1), (1, 1), (2, 1), (0, 0)],
    ],
    spawn_row: 1,
};

const O_SHAPE: ShapeDefinition = ShapeDefinition {
    kind: ShapeKind::O,
    variants: &[[(0, 0), (1, 0), (0, 1), (1, 1)]],
    spawn_row: 1,
};

const S_SHAPE: ShapeDefinition = ShapeDefinition {
    kind: ShapeKind::S,
    variants: &[
        [(0, 0), (-1, 0), (-1, -1), (-2, -1)],
        [(-1, 0), (-1, -1), (0, -1), (0, -2)],
    ],
    spawn_row: 2,
};

const T_SHAPE: ShapeDefinition = ShapeDefinition {
    kind: ShapeKind::T,
    variants: &[
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (0, 1)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (1, 1), (1, 2), (2, 1)],
    ],
    spawn_row: 1,
};

const Z_SHAPE: ShapeDefinition = ShapeDefinition {
    kind: ShapeKind::Z,
    variants: &[
        [(0, 0), (-1, 0), (-1, 1), (-2, 1)],
        [(-1, 0), (-1, 1), (0, 1), (0, 2)],
    ],
    spawn_row: 1,
};
