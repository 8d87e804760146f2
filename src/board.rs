/*!
This module implements the shared playing grid both sides place into.
*/

use crate::{Cell, Direction, Piece, Side};

/// The shared two-dimensional playing grid.
///
/// Cells are stored row-major with **row `0` as the bottom row**: player
/// pieces spawn at row `height - 1` and fall toward row `0`, enemy pieces
/// spawn at row `0` and rise. Column indices wrap modulo `width` for all
/// lateral movement; vertical indices are bounded.
///
/// The grid is two-layered: `cells` holds permanent [`commit`]ted
/// ownership, `staged` holds the transient falling-piece previews that the
/// match controller wipes and re-issues every tick. Within a tick, later
/// writes to the same cell win.
///
/// [`commit`]: Board::commit
#[derive(Eq, PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    staged: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height >= 2, "degenerate board dimensions");
        let n = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; n],
            staged: vec![None; n],
        }
    }

    /// Number of columns.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Canonicalizes a possibly-negative or overlarge column index.
    pub const fn wrap_x(&self, x: i64) -> u32 {
        let w = self.width as i64;
        (x.rem_euclid(w)) as u32
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// The committed cell at the given position. The column wraps; rows
    /// outside the board read as empty.
    pub fn cell(&self, x: i64, y: i32) -> Cell {
        if y < 0 || y >= self.height as i32 {
            return None;
        }
        let x = self.wrap_x(x);
        self.cells[self.index(x, y as u32)]
    }

    /// The staged (preview) cell at the given position.
    pub fn staged_cell(&self, x: i64, y: i32) -> Cell {
        if y < 0 || y >= self.height as i32 {
            return None;
        }
        let x = self.wrap_x(x);
        self.staged[self.index(x, y as u32)]
    }

    /// Row-major view of the committed grid (for rendering).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major view of the preview layer (for rendering).
    pub fn staged(&self) -> &[Cell] {
        &self.staged
    }

    /// Directly sets a committed cell. The column wraps; rows outside the
    /// board are ignored. Intended for hosts setting up scenarios.
    pub fn set_cell(&mut self, x: i64, y: i32, cell: Cell) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x = self.wrap_x(x);
        let i = self.index(x, y as u32);
        self.cells[i] = cell;
    }

    /// Checks whether `piece` anchored at `(x, y)` collides with nothing.
    ///
    /// Every absolute cell must lie within vertical bounds (the column
    /// wraps, so horizontal never fails) and must not be committed to the
    /// opposing side. Same-side overlap is permitted, which lets a falling
    /// piece coexist with its own previous preview and with its own side's
    /// settled cells.
    ///
    /// This doubles as the one-row-ahead probe deciding whether a piece
    /// advances or commits.
    pub fn is_placement_valid(&self, piece: &Piece, x: u32, y: i32) -> bool {
        piece.cells(self.width, x, y).iter().all(|&(cx, cy)| {
            cy >= 0
                && cy < self.height as i32
                && self.cell(cx as i64, cy) != Some(piece.owner().opponent())
        })
    }

    /// Permanently writes `piece`'s cells into the grid.
    ///
    /// No validity re-check happens here; the caller must have probed with
    /// [`Board::is_placement_valid`]. This and line clearing are the only
    /// mutators of the committed layer.
    pub fn commit(&mut self, piece: &Piece, x: u32, y: i32) {
        let owner = piece.owner();
        for (cx, cy) in piece.cells(self.width, x, y) {
            self.set_cell(cx as i64, cy, Some(owner));
        }
    }

    /// Writes `piece`'s cells into the transient preview layer.
    ///
    /// Previews represent a falling piece's current resting guess; the
    /// match controller wipes the layer with [`Board::clear_stage`] and
    /// re-stages every tick until the piece truly settles. A later stage
    /// or commit at the same cell within a tick wins.
    pub fn stage(&mut self, piece: &Piece, x: u32, y: i32) {
        let owner = piece.owner();
        for (cx, cy) in piece.cells(self.width, x, y) {
            if cy >= 0 && cy < self.height as i32 {
                let cx = self.wrap_x(cx as i64);
                let i = self.index(cx, cy as u32);
                self.staged[i] = Some(owner);
            }
        }
    }

    /// Wipes the preview layer. Committed cells are untouched.
    pub fn clear_stage(&mut self) {
        self.staged.fill(None);
    }

    /// Empties `row` iff every committed cell in it is occupied.
    ///
    /// Returns whether the row was actually cleared; a partially occupied
    /// row is a no-op.
    pub fn clear_line(&mut self, row: u32) -> bool {
        if row >= self.height {
            return false;
        }
        let start = self.index(0, row);
        let end = start + self.width as usize;
        if self.cells[start..end].iter().any(|c| c.is_none()) {
            return false;
        }
        self.cells[start..end].fill(None);
        true
    }

    /// Wipes both layers. Issued once when a match reaches its result.
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
        self.staged.fill(None);
    }

    /// The row on which `side`'s pieces (and losses) originate.
    pub const fn spawn_row(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.height - 1,
            Side::Enemy => 0,
        }
    }

    /// Whether `side` has been overrun: an opposing-owned cell has reached
    /// `side`'s spawn row. Governs match termination.
    pub fn is_side_lost(&self, side: Side) -> bool {
        let row = self.spawn_row(side);
        let start = self.index(0, row);
        let end = start + self.width as usize;
        self.cells[start..end]
            .iter()
            .any(|&c| c == Some(side.opponent()))
    }

    /// Scans laterally from `from_x` in `direction` (wrapping, at most one
    /// full board width) and returns the first "through" column: one where
    /// no opposing-owned cell obstructs `side`'s full vertical travel
    /// path. Own cells never block their side, consistent with
    /// [`Board::is_placement_valid`].
    ///
    /// Used only by enemy targeting to find breakthrough gaps.
    pub fn find_through(&self, from_x: u32, direction: Direction, side: Side) -> Option<u32> {
        let foe = side.opponent();
        for i in 0..self.width as i64 {
            let x = self.wrap_x(from_x as i64 + direction.step() * i);
            let open = (0..self.height as i32).all(|y| self.cell(x as i64, y) != Some(foe));
            if open {
                return Some(x);
            }
        }
        None
    }

    /// Whether the position counts as `side`'s territory: committed cells
    /// by ownership, empty cells by home half (player: upper, enemy:
    /// lower). Drives the enemy-intrusion score bonus.
    pub fn pos_belongs(&self, x: i64, y: i32, side: Side) -> bool {
        match self.cell(x, y) {
            Some(owner) => owner == side,
            None => match side {
                Side::Player => y >= (self.height / 2) as i32,
                Side::Enemy => y < (self.height / 2) as i32,
            },
        }
    }

    /// The row a battler of `side` rests on in column `x`.
    ///
    /// Player battlers stand on top of the committed pile (gravity points
    /// down), enemy battlers cling beneath it (mirrored gravity). An empty
    /// column yields the board-centre rows `height/2` and `height/2 - 1`
    /// respectively, which is where the battlers spawn.
    pub fn surface_row(&self, x: i64, side: Side) -> i32 {
        let h = self.height as i32;
        match side {
            Side::Player => {
                let top = (0..h).rev().find(|&y| self.cell(x, y).is_some());
                match top {
                    Some(y) => (y + 1).min(h - 1),
                    None => h / 2,
                }
            }
            Side::Enemy => {
                let bottom = (0..h).find(|&y| self.cell(x, y).is_some());
                match bottom {
                    Some(y) => (y - 1).max(0),
                    None => h / 2 - 1,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn piece(owner: Side) -> Piece {
        Piece::new(Shape::O, owner)
    }

    #[test]
    fn wrap_canonicalizes_columns() {
        let board = Board::new(10, 20);
        assert_eq!(board.wrap_x(-1), 9);
        assert_eq!(board.wrap_x(10), 0);
        assert_eq!(board.wrap_x(25), 5);
    }

    #[test]
    fn placement_is_wrap_equivalent() {
        let mut board = Board::new(10, 20);
        let p = piece(Side::Player);
        board.commit(&p, 9, 10);
        // O is two cells wide; the second column wrapped onto column 0.
        assert_eq!(board.cell(9, 10), Some(Side::Player));
        assert_eq!(board.cell(0, 10), Some(Side::Player));
        assert!(board.is_placement_valid(&p, 19, 10));
    }

    #[test]
    fn placement_rejects_vertical_out_of_bounds() {
        let board = Board::new(10, 20);
        let p = piece(Side::Player);
        // O extends one row below its anchor for the player side.
        assert!(!board.is_placement_valid(&p, 4, 0));
        assert!(board.is_placement_valid(&p, 4, 1));
        assert!(!board.is_placement_valid(&p, 4, 20));
        assert!(board.is_placement_valid(&p, 4, 19));
    }

    #[test]
    fn placement_rejects_opposing_cells_only() {
        let mut board = Board::new(10, 20);
        board.set_cell(4, 10, Some(Side::Enemy));
        let own = piece(Side::Enemy);
        let foe = piece(Side::Player);
        assert!(board.is_placement_valid(&own, 4, 10));
        assert!(!board.is_placement_valid(&foe, 4, 10));
    }

    #[test]
    fn stage_is_transient_and_last_writer_wins() {
        let mut board = Board::new(10, 20);
        let enemy = piece(Side::Enemy);
        let player = piece(Side::Player);
        board.stage(&enemy, 3, 5);
        board.stage(&player, 3, 6);
        // Rows 5/6 overlap between the two stages; the later write won.
        assert_eq!(board.staged_cell(3, 5), Some(Side::Player));
        assert_eq!(board.cell(3, 5), None);
        board.clear_stage();
        assert_eq!(board.staged_cell(3, 5), None);
    }

    #[test]
    fn commit_survives_stage_wipe() {
        let mut board = Board::new(10, 20);
        let p = piece(Side::Player);
        board.stage(&p, 3, 5);
        board.commit(&p, 3, 5);
        board.clear_stage();
        assert_eq!(board.cell(3, 5), Some(Side::Player));
        assert_eq!(board.cell(3, 4), Some(Side::Player));
    }

    #[test]
    fn clear_line_noop_until_full() {
        let mut board = Board::new(10, 20);
        for x in 0..9 {
            board.set_cell(x, 10, Some(Side::Player));
        }
        assert!(!board.clear_line(10));
        assert_eq!(board.cell(0, 10), Some(Side::Player));

        board.set_cell(9, 10, Some(Side::Enemy));
        assert!(board.clear_line(10));
        for x in 0..10 {
            assert_eq!(board.cell(x, 10), None);
        }
    }

    #[test]
    fn clear_line_touches_only_its_row() {
        let mut board = Board::new(10, 20);
        for x in 0..10 {
            board.set_cell(x, 10, Some(Side::Player));
            board.set_cell(x, 11, Some(Side::Player));
        }
        board.set_cell(0, 11, None);
        assert!(board.clear_line(10));
        assert_eq!(board.cell(1, 11), Some(Side::Player));
    }

    #[test]
    fn side_lost_on_spawn_row_breach() {
        let mut board = Board::new(10, 20);
        assert!(!board.is_side_lost(Side::Player));
        board.set_cell(5, 19, Some(Side::Enemy));
        assert!(board.is_side_lost(Side::Player));
        assert!(!board.is_side_lost(Side::Enemy));
        board.set_cell(5, 0, Some(Side::Player));
        assert!(board.is_side_lost(Side::Enemy));
        // Own cells on the own spawn row are not a loss.
        let mut board = Board::new(10, 20);
        board.set_cell(5, 19, Some(Side::Player));
        assert!(!board.is_side_lost(Side::Player));
    }

    #[test]
    fn find_through_scans_in_direction_with_wrap() {
        let mut board = Board::new(10, 20);
        // Obstruct every column except 2 and 8.
        for x in 0..10 {
            if x != 2 && x != 8 {
                board.set_cell(x, 10, Some(Side::Player));
            }
        }
        assert_eq!(board.find_through(5, Direction::Right, Side::Enemy), Some(8));
        assert_eq!(board.find_through(5, Direction::Left, Side::Enemy), Some(2));
        // Scanning left from column 0 wraps before reaching column 2.
        assert_eq!(board.find_through(0, Direction::Left, Side::Enemy), Some(8));
    }

    #[test]
    fn find_through_none_when_every_column_obstructed() {
        let mut board = Board::new(10, 20);
        for x in 0..10 {
            board.set_cell(x, 10, Some(Side::Player));
        }
        assert_eq!(board.find_through(0, Direction::Right, Side::Enemy), None);
        // The same cells never obstruct their own side.
        assert_eq!(board.find_through(0, Direction::Right, Side::Player), Some(0));
    }

    #[test]
    fn surfaces_default_to_board_centre() {
        let board = Board::new(10, 20);
        assert_eq!(board.surface_row(4, Side::Player), 10);
        assert_eq!(board.surface_row(4, Side::Enemy), 9);
    }

    #[test]
    fn surfaces_follow_the_pile() {
        let mut board = Board::new(10, 20);
        board.set_cell(4, 12, Some(Side::Player));
        board.set_cell(4, 8, Some(Side::Enemy));
        assert_eq!(board.surface_row(4, Side::Player), 13);
        assert_eq!(board.surface_row(4, Side::Enemy), 7);
    }

    #[test]
    fn territory_falls_back_to_home_half() {
        let mut board = Board::new(10, 20);
        assert!(board.pos_belongs(3, 15, Side::Player));
        assert!(board.pos_belongs(3, 4, Side::Enemy));
        assert!(!board.pos_belongs(3, 15, Side::Enemy));
        board.set_cell(3, 15, Some(Side::Enemy));
        assert!(board.pos_belongs(3, 15, Side::Enemy));
    }
}
