/*!
This module implements the per-side battler entities walking the grid.
*/

use crate::{Board, Direction, Side};

/// Seconds between lateral walking steps of a grounded battler.
const WALK_INTERVAL: f32 = 0.5;
/// Seconds a battler stays in the hurt state after being crushed.
const HURT_DURATION: f32 = 1.0;
/// Health lost when a committed cell lands on the battler.
const CRUSH_DAMAGE: i32 = 10;
/// Score awarded per tick while the enemy battler sits on foreign ground.
const INTRUSION_BONUS: i64 = 5;
/// A wall of at least this height makes a walking battler turn around.
const TURN_WALL: i32 = 2;

/// A side's tracked walking/falling entity.
///
/// One instance exists per side for the whole match; only its position and
/// health mutate. Both variants share one physics implementation with a
/// per-side sign: the player battler stands on top of the committed pile
/// and falls downward, the enemy battler clings beneath it and "falls"
/// upward.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battler {
    /// Which ownership domain the battler belongs to.
    pub belong: Side,
    /// Current column.
    pub x: u32,
    /// Current row.
    pub y: i32,
    /// Current facing, used for walking and the AI's lateral scans.
    pub direction: Direction,
    /// Remaining health.
    pub health: i32,
    /// Signed health change applied during the last update.
    pub health_delta: i32,
    hurt_left: f32,
    walk_elapsed: f32,
}

impl Battler {
    /// Spawns `side`'s battler at its board-centre-derived position.
    pub fn spawn(side: Side, board: &Board) -> Self {
        let x = board.width() / 2;
        Self {
            belong: side,
            x,
            y: board.surface_row(x as i64, side),
            direction: match side {
                Side::Player => Direction::Right,
                Side::Enemy => Direction::Left,
            },
            health: 100,
            health_delta: 0,
            hurt_left: 0.0,
            walk_elapsed: 0.0,
        }
    }

    /// The column one directional step ahead, wrapped.
    pub fn next_x(&self, width: u32) -> u32 {
        let w = width as i64;
        (self.x as i64 + self.direction.step()).rem_euclid(w) as u32
    }

    /// Signed distance from the battler's feet to the surface one column
    /// ahead, oriented so that positive means a rising obstruction for
    /// this side and negative means a chasm.
    pub fn next_wall(&self, board: &Board) -> i32 {
        let surface = board.surface_row(self.next_x(board.width()) as i64, self.belong);
        match self.belong {
            Side::Player => surface - self.y,
            Side::Enemy => self.y - surface,
        }
    }

    /// The row the battler would settle on after one forward step; the
    /// enemy's is the mirror of the player's.
    pub fn next_y(&self, board: &Board) -> i32 {
        match self.belong {
            Side::Player => self.y + self.next_wall(board),
            Side::Enemy => self.y - self.next_wall(board),
        }
    }

    /// Whether the battler is in its hurt transient state.
    pub fn is_hurt(&self) -> bool {
        self.hurt_left > 0.0
    }

    /// Advances the battler by one tick: hurt decay, crush check, gravity
    /// toward the side's surface, and grounded walking with direction
    /// flips at walls.
    ///
    /// Returns whether the battler was crushed this tick (for feedback).
    pub fn update(&mut self, delta: f32, board: &Board) -> bool {
        self.health_delta = 0;
        self.hurt_left = (self.hurt_left - delta).max(0.0);

        // A committed cell at the battler's position buries it.
        let crushed = board.cell(self.x as i64, self.y).is_some();
        if crushed {
            self.health -= CRUSH_DAMAGE;
            self.health_delta = -CRUSH_DAMAGE;
            self.hurt_left = HURT_DURATION;
        }

        let surface = board.surface_row(self.x as i64, self.belong);
        if crushed {
            self.y = surface;
        } else {
            // Settle one row per tick; pile growth pushes immediately.
            match self.belong {
                Side::Player => {
                    if self.y > surface {
                        self.y -= 1;
                    } else if self.y < surface {
                        self.y = surface;
                    }
                }
                Side::Enemy => {
                    if self.y < surface {
                        self.y += 1;
                    } else if self.y > surface {
                        self.y = surface;
                    }
                }
            }
        }

        self.walk_elapsed += delta;
        let grounded = self.y == board.surface_row(self.x as i64, self.belong);
        if grounded && !self.is_hurt() && self.walk_elapsed >= WALK_INTERVAL {
            self.walk_elapsed = 0.0;
            if self.next_wall(board) >= TURN_WALL {
                self.direction = self.direction.flipped();
            } else {
                self.x = self.next_x(board.width());
            }
        }

        crushed
    }

    /// Enemy-side scoring hook: the player is awarded points per tick
    /// while the enemy battler occupies a cell not belonging to its side.
    pub fn intrusion_bonus(&self, board: &Board) -> i64 {
        if self.belong == Side::Enemy && !board.pos_belongs(self.x as i64, self.y, Side::Enemy) {
            INTRUSION_BONUS
        } else {
            0
        }
    }
}
