/*!
# Gridclash Engine

`gridclash_engine` is an implementation of a two-sided falling-block battle:
a player and an AI-driven enemy drop multi-cell pieces onto a shared,
horizontally wrapping grid. Player pieces fall from the top row, enemy
pieces rise from the bottom row, full midline rows are periodically wiped,
and a side loses once opposing cells breach its spawn row.

The engine is single-threaded and tick-driven: the host calls
[`Match::tick`] once per logical frame with the frame's time delta and the
player's input intents, then renders from the read-only state accessors.

# Examples

```
use gridclash_engine::*;

let mut game = Match::builder().seed(42).build();
game.start();

// One 16ms frame in which the player holds nothing.
game.tick(0.016, InputFrame::default());

// One frame in which the player shifts the falling piece left and rotates it.
game.tick(
    0.016,
    InputFrame { shift: Some(Direction::Left), rotate: true, soft_drop: false },
);

// Read most recent state; this is how a UI knows how to render the board.
let board = game.board();
assert_eq!(game.state(), MatchState::Placing);
```
*/

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod ai;
pub mod battler;
pub mod board;
mod match_builder;
mod match_update;
pub mod piece;
pub mod piece_source;

use rand_chacha::ChaCha12Rng;

pub use battler::Battler;
pub use board::Board;
pub use match_builder::MatchBuilder;
pub use piece::{Piece, Shape};
pub use piece_source::PieceSource;

/// The internal RNG used by a match.
pub type MatchRng = ChaCha12Rng;

/// One of the two competing ownership domains on the board.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The human-driven side. Its pieces spawn at the top row and fall.
    Player = 0,
    /// The AI-driven side. Its pieces spawn at the bottom row and rise.
    Enemy = 1,
}

impl Side {
    /// Both `Side` enum variants in order.
    ///
    /// Note that `Side::VARIANTS[s as usize] == s` always holds.
    pub const VARIANTS: [Self; 2] = [Side::Player, Side::Enemy];

    /// The side this side is fighting.
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// A single addressable grid cell: empty, or owned by one side.
///
/// Cells carry no identity beyond ownership and are overwritten freely.
pub type Cell = Option<Side>;

/// Horizontal facing of a [`Battler`], also used for lateral scan direction.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Toward smaller column indices (with wrap-around).
    Left,
    /// Toward larger column indices (with wrap-around).
    Right,
}

impl Direction {
    /// The column delta of one step in this direction.
    pub const fn step(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// The opposite direction.
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The authoritative state machine value of a [`Match`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchState {
    /// No match is running yet; only [`Match::start`] leaves this state.
    #[default]
    Idle,
    /// A match was just started; the first tick spawns the piece queue.
    Start,
    /// The falling/placement loop with an active player piece.
    Placing,
    /// The player's piece just committed; the next tick requeues.
    Placed,
    /// The match ended. Terminal until an external [`Match::start`].
    Result,
}

/// How a finished match came out, from the player's point of view.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The enemy's spawn row was breached by player cells.
    Win,
    /// The player's spawn row was breached by enemy cells.
    Lose,
}

/// The player's input intents for one tick.
///
/// The engine reads no device directly; whatever input layer the host has
/// must be folded into one of these per frame.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputFrame {
    /// Lateral move intent for the falling piece, wrapped at the edges.
    pub shift: Option<Direction>,
    /// Rotate the falling piece a quarter turn clockwise.
    pub rotate: bool,
    /// Drop the falling piece to rest immediately (freeze-gated).
    pub soft_drop: bool,
}

/// Tick-local events returned by [`Match::tick`].
///
/// These can be used to more easily render visual/audio feedback; the
/// engine itself never acts on them.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feedback {
    /// A fresh piece entered play for the given side.
    PieceSpawned {
        /// Which side the piece belongs to.
        side: Side,
    },
    /// A piece was permanently committed into the board.
    PieceCommitted {
        /// Which side committed.
        side: Side,
        /// Anchor column of the committed piece.
        column: u32,
        /// Anchor row of the committed piece.
        row: i32,
    },
    /// A full row was wiped on a clear tick.
    LineCleared {
        /// The row that was emptied.
        row: u32,
    },
    /// A battler was crushed by a committed cell.
    BattlerHurt {
        /// Which side's battler was hurt.
        side: Side,
    },
    /// The match reached a terminal result; the board has been wiped.
    MatchEnded {
        /// How the match came out.
        outcome: Outcome,
    },
}

/// Tunable parameters of a match, fixed at build time.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// Number of board columns (lateral indices wrap modulo this).
    pub width: u32,
    /// Number of board rows. Row `0` is the bottom row.
    pub height: u32,
    /// Seconds between enemy AI decision ticks at match start.
    pub initial_ai_speed: f32,
    /// Seconds between midline clear ticks at match start.
    pub initial_clear_speed: f32,
    /// Seconds per falling row at match start.
    pub initial_fall_speed: f32,
    /// Cooldown governing the player's soft drop and the enemy's placement.
    pub freeze_duration: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            initial_ai_speed: 1.5,
            initial_clear_speed: 10.0,
            initial_fall_speed: 1.5,
            freeze_duration: 2.0,
        }
    }
}

/// Main struct representing one battle simulation.
///
/// Construct with [`Match::builder`], call [`Match::start`], then drive it
/// with [`Match::tick`] once per frame.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    /// The configuration the match was built with.
    pub config: Configuration,
    /// External pause flag. While set, [`Match::tick`] is a no-op.
    pub pause: bool,
    pub(crate) state: MatchState,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) score: i64,
    pub(crate) board: Board,
    pub(crate) actor: Battler,
    pub(crate) enemy: Battler,
    pub(crate) current: Option<Piece>,
    pub(crate) next: Option<Piece>,
    pub(crate) enemy_piece: Option<Piece>,
    pub(crate) falling_x: u32,
    pub(crate) falling_y: i32,
    pub(crate) enemy_fall_x: u32,
    pub(crate) enemy_fall_y: i32,
    pub(crate) ai_timer: f32,
    pub(crate) clear_timer: f32,
    pub(crate) fall_timer: f32,
    pub(crate) freeze_timer: f32,
    pub(crate) enemy_freeze_timer: f32,
    pub(crate) ai_speed: f32,
    pub(crate) clear_speed: f32,
    pub(crate) fall_speed: f32,
    pub(crate) rng: MatchRng,
    pub(crate) piece_source: PieceSource,
}

impl Match {
    /// Creates a blank new template representing a yet-to-be-started
    /// [`Match`] ready for configuration.
    pub fn builder() -> MatchBuilder {
        MatchBuilder::default()
    }

    /// Read accessor for the authoritative state machine value.
    pub const fn state(&self) -> MatchState {
        self.state
    }

    /// Whether the match has reached a terminal result, and which one.
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The current total score, clamped non-negative.
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Read accessor for the shared grid (for rendering).
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable accessor for the shared grid.
    ///
    /// The engine never needs this itself; it exists so hosts can seed
    /// handicaps, puzzles or other prepared positions before play.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Read accessor for the player's battler.
    pub const fn actor(&self) -> &Battler {
        &self.actor
    }

    /// Read accessor for the enemy battler.
    pub const fn enemy(&self) -> &Battler {
        &self.enemy
    }

    /// The player's active falling piece, if one is in play.
    pub const fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// The queued "next" piece preview.
    pub const fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// The enemy's active rising piece, if one is in play.
    pub const fn enemy_piece(&self) -> Option<&Piece> {
        self.enemy_piece.as_ref()
    }

    /// Anchor position of the player's falling piece.
    pub const fn falling_position(&self) -> (u32, i32) {
        (self.falling_x, self.falling_y)
    }

    /// Anchor position of the enemy's rising piece.
    pub const fn enemy_falling_position(&self) -> (u32, i32) {
        (self.enemy_fall_x, self.enemy_fall_y)
    }

    /// The current enemy decision interval in seconds.
    pub const fn ai_speed(&self) -> f32 {
        self.ai_speed
    }

    /// The current clear-tick interval in seconds.
    pub const fn clear_speed(&self) -> f32 {
        self.clear_speed
    }

    /// The current per-row fall interval in seconds.
    pub const fn fall_speed(&self) -> f32 {
        self.fall_speed
    }
}
