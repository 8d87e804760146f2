/*!
This module handles what happens when [`Match::tick`] is called.
*/

use crate::{ai, Battler, Feedback, InputFrame, Match, MatchState, Outcome, Piece, Side};

/// Per-tick decrement applied to all three speed parameters.
const SPEED_DECAY: f32 = 0.002;
/// Floor of the enemy decision interval.
const AI_SPEED_FLOOR: f32 = 0.25;
/// Floor of the clear-tick interval.
const CLEAR_SPEED_FLOOR: f32 = 5.0;
/// Floor of the per-row fall interval.
const FALL_SPEED_FLOOR: f32 = 0.25;

impl Match {
    /// Starts (or restarts) the match from any state.
    ///
    /// Resets score, result, timers and speeds, wipes the board, and
    /// respawns both battlers. The next [`Match::tick`] spawns the piece
    /// queue and enters the placement loop.
    pub fn start(&mut self) {
        self.state = MatchState::Start;
        self.outcome = None;
        self.score = 0;
        self.ai_timer = 0.0;
        self.clear_timer = 0.0;
        self.fall_timer = 0.0;
        self.freeze_timer = 0.0;
        self.enemy_freeze_timer = 0.0;
        self.ai_speed = self.config.initial_ai_speed;
        self.clear_speed = self.config.initial_clear_speed;
        self.fall_speed = self.config.initial_fall_speed;
        self.board.clear_all();
        self.actor = Battler::spawn(Side::Player, &self.board);
        self.enemy = Battler::spawn(Side::Enemy, &self.board);
        self.current = None;
        self.next = None;
        self.enemy_piece = None;
        self.falling_x = self.actor.x;
        self.falling_y = self.config.height as i32 - 1;
        self.enemy_fall_x = self.actor.x;
        self.enemy_fall_y = 0;
    }

    /// The main function used to advance the match state by one frame.
    ///
    /// `delta` is the host's frame time delta in seconds; `input` carries
    /// the player's intents for this frame. All mutation happens
    /// synchronously within this call.
    ///
    /// While [`Match::pause`] is set, the match has a result, or
    /// [`Match::start`] has not been called yet, this is a no-op.
    ///
    /// Returns the [`Feedback`] events caused by this tick, in order.
    pub fn tick(&mut self, delta: f32, input: InputFrame) -> Vec<Feedback> {
        if self.pause || self.outcome.is_some() || self.state == MatchState::Idle {
            return Vec::new();
        }
        let mut feedback = Vec::new();

        // Previews are re-issued from scratch every tick.
        self.board.clear_stage();

        match self.state {
            MatchState::Start => {
                self.falling_x = self.actor.x;
                self.enemy_fall_x = self.actor.x;
                self.requeue(&mut feedback);
            }
            MatchState::Placed => self.requeue(&mut feedback),
            _ => {}
        }

        if self.state == MatchState::Placing {
            self.update_player(delta, input, &mut feedback);
            self.update_falling(delta);
        }

        self.update_battlers(delta, &mut feedback);
        self.update_enemy(delta, &mut feedback);
        self.update_clears(delta, &mut feedback);

        if self.update_result(&mut feedback) {
            return feedback;
        }

        self.update_speeds();
        self.update_score();
        feedback
    }

    /// Swap-and-refill of the player piece queue: the queued "next" piece
    /// (or a fresh one) becomes current, a fresh piece is queued, and the
    /// falling row resets to the top.
    fn requeue(&mut self, feedback: &mut Vec<Feedback>) {
        self.current = Some(
            self.next
                .take()
                .unwrap_or_else(|| self.generate(Side::Player)),
        );
        self.next = Some(self.generate(Side::Player));
        self.falling_y = self.config.height as i32 - 1;
        self.state = MatchState::Placing;
        feedback.push(Feedback::PieceSpawned { side: Side::Player });
    }

    fn generate(&mut self, owner: Side) -> Piece {
        let shape = self
            .piece_source
            .with_rng(&mut self.rng)
            .next()
            .expect("piece source ran out before match end");
        Piece::new(shape, owner)
    }

    /// Applies the player's intents to the active piece, then either
    /// commits it (one-row-ahead probe failed, or a freeze-gated soft
    /// drop) or stages its preview for this tick.
    fn update_player(&mut self, delta: f32, input: InputFrame, feedback: &mut Vec<Feedback>) {
        self.freeze_timer += delta;

        let mut piece = self
            .current
            .take()
            .expect("no active piece; call start() first");

        if let Some(direction) = input.shift {
            self.falling_x = self
                .board
                .wrap_x(self.falling_x as i64 + direction.step());
        }
        if input.rotate {
            piece.rotate();
        }

        let drop = input.soft_drop && self.freeze_timer >= self.config.freeze_duration;
        if drop {
            self.freeze_timer = 0.0;
            // Drop straight to rest and commit there.
            while self
                .board
                .is_placement_valid(&piece, self.falling_x, self.falling_y - 1)
            {
                self.falling_y -= 1;
            }
        }

        if drop
            || !self
                .board
                .is_placement_valid(&piece, self.falling_x, self.falling_y - 1)
        {
            self.board.commit(&piece, self.falling_x, self.falling_y);
            self.state = MatchState::Placed;
            feedback.push(Feedback::PieceCommitted {
                side: Side::Player,
                column: self.falling_x,
                row: self.falling_y,
            });
        } else {
            self.board.stage(&piece, self.falling_x, self.falling_y);
            self.current = Some(piece);
        }
    }

    /// Advances the shared fall timer; both sides' falling rows step in
    /// mirrored directions when it fires.
    fn update_falling(&mut self, delta: f32) {
        self.fall_timer += delta;
        if self.fall_timer >= self.fall_speed {
            self.fall_timer = 0.0;
            self.falling_y -= 1;
            self.enemy_fall_y += 1;
        }
    }

    fn update_battlers(&mut self, delta: f32, feedback: &mut Vec<Feedback>) {
        if self.actor.update(delta, &self.board) {
            feedback.push(Feedback::BattlerHurt { side: Side::Player });
        }
        if self.enemy.update(delta, &self.board) {
            feedback.push(Feedback::BattlerHurt { side: Side::Enemy });
        }
        self.score += self.enemy.intrusion_bonus(&self.board);
    }

    /// The enemy's cycle: keep a rising piece in play, step its column
    /// toward the AI target once per decision tick, place it when arrived
    /// (and off freeze cooldown), and otherwise probe/stage like the
    /// player's falling loop.
    fn update_enemy(&mut self, delta: f32, feedback: &mut Vec<Feedback>) {
        if self.enemy_piece.is_none() {
            self.enemy_piece = Some(self.generate(Side::Enemy));
            self.enemy_fall_y = 0;
            feedback.push(Feedback::PieceSpawned { side: Side::Enemy });
        }

        self.ai_timer += delta;
        self.enemy_freeze_timer += delta;

        if self.ai_timer >= self.ai_speed {
            self.ai_timer = 0.0;

            let target = ai::find_target_column(&self.board, &self.enemy, &self.actor);
            let dist = target as i64 - self.enemy_fall_x as i64;
            let step = if dist > 0 { 1 } else { -1 };
            self.enemy_fall_x = self.board.wrap_x(self.enemy_fall_x as i64 + step);

            if self.enemy_fall_x == target
                && self.enemy_freeze_timer >= self.config.freeze_duration / 2.0
            {
                self.enemy_freeze_timer = 0.0;
                if let Some(piece) = self.enemy_piece.take() {
                    // Rise straight to rest and commit there.
                    while self.board.is_placement_valid(
                        &piece,
                        self.enemy_fall_x,
                        self.enemy_fall_y + 1,
                    ) {
                        self.enemy_fall_y += 1;
                    }
                    self.commit_enemy(piece, feedback);
                }
            }
        }

        let Some(piece) = self.enemy_piece.take() else {
            return;
        };
        if !self
            .board
            .is_placement_valid(&piece, self.enemy_fall_x, self.enemy_fall_y + 1)
        {
            self.commit_enemy(piece, feedback);
        } else {
            self.board
                .stage(&piece, self.enemy_fall_x, self.enemy_fall_y);
            self.enemy_piece = Some(piece);
        }
    }

    /// Enemy commits never gate the state machine; only player commits do.
    fn commit_enemy(&mut self, piece: Piece, feedback: &mut Vec<Feedback>) {
        self.board
            .commit(&piece, self.enemy_fall_x, self.enemy_fall_y);
        feedback.push(Feedback::PieceCommitted {
            side: Side::Enemy,
            column: self.enemy_fall_x,
            row: self.enemy_fall_y,
        });
    }

    /// On each clear tick both designated midline rows are checked,
    /// unconditionally; partially filled rows are no-ops.
    fn update_clears(&mut self, delta: f32, feedback: &mut Vec<Feedback>) {
        self.clear_timer += delta;
        if self.clear_timer >= self.clear_speed {
            self.clear_timer = 0.0;
            let mid = self.config.height >> 1;
            for row in [mid, mid - 1] {
                if self.board.clear_line(row) {
                    feedback.push(Feedback::LineCleared { row });
                }
            }
        }
    }

    /// Loss check with the fixed tie-break: player-loss is evaluated
    /// before enemy-loss, so a simultaneous breach reads as `Lose`.
    ///
    /// Returns whether the match just ended; the board is wiped exactly
    /// once, here.
    fn update_result(&mut self, feedback: &mut Vec<Feedback>) -> bool {
        if self.board.is_side_lost(Side::Player) {
            self.outcome = Some(Outcome::Lose);
        } else if self.board.is_side_lost(Side::Enemy) {
            self.outcome = Some(Outcome::Win);
        }

        if let Some(outcome) = self.outcome {
            self.board.clear_all();
            self.state = MatchState::Result;
            feedback.push(Feedback::MatchEnded { outcome });
            true
        } else {
            false
        }
    }

    /// Difficulty ramp: all three intervals shrink every tick down to
    /// their floors.
    fn update_speeds(&mut self) {
        if self.ai_speed > AI_SPEED_FLOOR {
            self.ai_speed = (self.ai_speed - SPEED_DECAY).max(AI_SPEED_FLOOR);
        }
        if self.clear_speed > CLEAR_SPEED_FLOOR {
            self.clear_speed = (self.clear_speed - SPEED_DECAY).max(CLEAR_SPEED_FLOOR);
        }
        if self.fall_speed > FALL_SPEED_FLOOR {
            self.fall_speed = (self.fall_speed - SPEED_DECAY).max(FALL_SPEED_FLOOR);
        }
    }

    /// Base score trickle scales with the AI ramp and never goes negative.
    fn update_score(&mut self) {
        self.score += (1.0 / self.ai_speed * 3.0).round() as i64;
        self.score = self.score.max(0);
    }
}
