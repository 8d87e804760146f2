/*!
This module implements the enemy's column targeting.
*/

use crate::{Battler, Board, Side};

/// A forward wall at least this high makes the enemy hold its column.
const WALL_BLOCK: i32 = 2;
/// A forward drop deeper than this reads as a chasm worth advancing past.
const WALL_CHASM: i32 = -2;

/// Computes the column the enemy wants its piece over, one decision tick
/// at a time.
///
/// The rules form a strict priority cascade; the first match wins:
/// 1. a through column exists laterally — break through it;
/// 2. the enemy battler is hurt — hold;
/// 3. a chasm ahead (`wall < -2`) — advance to the projected next column;
/// 4. an imminent obstruction (`wall ≥ 2`) — hold;
/// 5. otherwise mirror the player battler's projected next column.
///
/// Deterministic by construction; no weights, no randomness.
pub fn find_target_column(board: &Board, enemy: &Battler, actor: &Battler) -> u32 {
    if let Some(through) = board.find_through(enemy.x, enemy.direction, Side::Enemy) {
        return through;
    }

    if enemy.is_hurt() {
        return enemy.x;
    }

    let wall = enemy.next_wall(board);
    if wall < WALL_CHASM {
        return enemy.next_x(board.width());
    }
    if wall >= WALL_BLOCK {
        return enemy.x;
    }

    actor.next_x(board.width())
}
