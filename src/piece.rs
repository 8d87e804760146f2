/*!
This module implements the shape templates and runtime piece instances.
*/

use crate::Side;

/// One of the seven immutable four-cell shape templates.
///
/// A template is a fixed set of relative cell offsets shared by all four
/// rotations; rotated offsets are computed, not stored.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Four cells as one big square; `██`.
    O = 0,
    /// Four cells in a straight line; `▄▄▄▄`.
    I = 1,
    /// Four cells snaking like an 'S'; `▄█▀`.
    S = 2,
    /// Four cells snaking like a 'Z'; `▀█▄`.
    Z = 3,
    /// Four cells in a 'T'-junction; `▄█▄`.
    T = 4,
    /// Four cells in an 'L'; `▄▄█`.
    L = 5,
    /// Four cells in a 'J'; `█▄▄`.
    J = 6,
}

impl Shape {
    /// All `Shape` enum variants in order.
    ///
    /// Note that `Shape::VARIANTS[s as usize] == s` always holds.
    pub const VARIANTS: [Self; 7] = {
        use Shape::*;
        [O, I, S, Z, T, L, J]
    };

    /// The unrotated cell offsets of the template.
    pub const fn base_offsets(self) -> [(i32, i32); 4] {
        match self {
            Shape::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Shape::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
            Shape::S => [(0, 0), (1, 0), (1, 1), (2, 1)],
            Shape::Z => [(1, 0), (2, 0), (0, 1), (1, 1)],
            Shape::T => [(0, 0), (1, 0), (2, 0), (1, 1)],
            Shape::L => [(0, 0), (1, 0), (2, 0), (2, 1)],
            Shape::J => [(0, 0), (1, 0), (2, 0), (0, 1)],
        }
    }

    /// The cell offsets after `rotation` clockwise quarter turns.
    ///
    /// Each turn maps `(dx, dy)` to `(dy, -dx)` and renormalizes so the
    /// smallest offsets are zero again; the result is a pure transform of
    /// the template with no shape distortion.
    pub fn offsets(self, rotation: u8) -> [(i32, i32); 4] {
        let mut offsets = self.base_offsets();
        for _ in 0..rotation % 4 {
            for cell in &mut offsets {
                *cell = (cell.1, -cell.0);
            }
            let min_x = offsets.iter().map(|c| c.0).min().unwrap_or(0);
            let min_y = offsets.iter().map(|c| c.1).min().unwrap_or(0);
            for cell in &mut offsets {
                cell.0 -= min_x;
                cell.1 -= min_y;
            }
        }
        offsets
    }
}

/// A shape instance in play: template, rotation index, and owning side.
///
/// The instance is created when a side is due a new piece and consumed
/// when its cells are committed into the board for good.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    shape: Shape,
    rotation: u8,
    owner: Side,
    offsets: [(i32, i32); 4],
}

impl Piece {
    /// Creates an unrotated instance of `shape` for `owner`.
    pub fn new(shape: Shape, owner: Side) -> Self {
        Self {
            shape,
            rotation: 0,
            owner,
            offsets: shape.base_offsets(),
        }
    }

    /// The shape template this instance was created from.
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// The current rotation index in `0..4`.
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Which side holds this piece.
    pub const fn owner(&self) -> Side {
        self.owner
    }

    /// The cached relative offsets at the current rotation.
    pub const fn offsets(&self) -> [(i32, i32); 4] {
        self.offsets
    }

    /// Advances the rotation index modulo 4 and recomputes the cached
    /// offsets.
    ///
    /// Rotation always succeeds; whether the rotated piece fits the board
    /// is checked separately at placement time, so a piece may be
    /// momentarily invalid until the falling loop re-resolves it.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 4;
        self.offsets = self.shape.offsets(self.rotation);
    }

    /// The absolute board cells of the piece anchored at `(x, y)`.
    ///
    /// Columns wrap modulo `width`. Player pieces extend downward from
    /// their anchor, enemy pieces upward — the two sides' mirrored
    /// vertical conventions.
    pub fn cells(&self, width: u32, x: u32, y: i32) -> [(u32, i32); 4] {
        let w = width as i64;
        self.offsets.map(|(dx, dy)| {
            let cx = (x as i64 + dx as i64).rem_euclid(w) as u32;
            let cy = match self.owner {
                Side::Player => y - dy,
                Side::Enemy => y + dy,
            };
            (cx, cy)
        })
    }
}
