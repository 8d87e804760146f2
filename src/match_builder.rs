/*!
This module handles creation / initialization / building of [`Match`]es.
*/

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::{
    Battler, Board, Configuration, Match, MatchRng, MatchState, PieceSource, Side,
};

/// This builder exposes the ability to configure a new [`Match`] to
/// varying degrees.
///
/// Generally speaking, you'll first call [`MatchBuilder::new`] or
/// [`Match::builder`], then chain calls to methods to set each field, then
/// call [`MatchBuilder::build`]. The `MatchBuilder` is not used up and its
/// configuration can be re-used to initialize more [`Match`]es.
#[derive(PartialEq, Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchBuilder {
    /// The configuration options that will be set for the match.
    pub config: Configuration,
    /// The value to seed the match's PRNG with.
    pub seed: Option<u64>,
    /// The method (and internal state) of shape generation used.
    pub piece_source: Option<PieceSource>,
}

impl MatchBuilder {
    /// Creates a blank new template representing a yet-to-be-started
    /// [`Match`] ready for configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Match`] with the information specified by `self`.
    ///
    /// The match comes up in [`MatchState::Idle`]; call [`Match::start`]
    /// to begin play.
    pub fn build(&self) -> Match {
        let config = self.config;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let board = Board::new(config.width, config.height);
        let actor = Battler::spawn(Side::Player, &board);
        let enemy = Battler::spawn(Side::Enemy, &board);
        let falling_x = actor.x;

        Match {
            pause: false,
            state: MatchState::Idle,
            outcome: None,
            score: 0,
            actor,
            enemy,
            current: None,
            next: None,
            enemy_piece: None,
            falling_x,
            falling_y: config.height as i32 - 1,
            enemy_fall_x: falling_x,
            enemy_fall_y: 0,
            ai_timer: 0.0,
            clear_timer: 0.0,
            fall_timer: 0.0,
            freeze_timer: 0.0,
            enemy_freeze_timer: 0.0,
            ai_speed: config.initial_ai_speed,
            clear_speed: config.initial_clear_speed,
            fall_speed: config.initial_fall_speed,
            rng: MatchRng::seed_from_u64(seed),
            piece_source: self.piece_source.clone().unwrap_or_default(),
            board,
            config,
        }
    }

    /// Sets the [`Configuration`] that will be used by the [`Match`].
    pub fn config(&mut self, x: Configuration) -> &mut Self {
        self.config = x;
        self
    }

    /// Number of board columns.
    pub fn width(&mut self, x: u32) -> &mut Self {
        self.config.width = x;
        self
    }
    /// Number of board rows.
    pub fn height(&mut self, x: u32) -> &mut Self {
        self.config.height = x;
        self
    }
    /// Seconds between enemy AI decision ticks at match start.
    pub fn initial_ai_speed(&mut self, x: f32) -> &mut Self {
        self.config.initial_ai_speed = x;
        self
    }
    /// Seconds between midline clear ticks at match start.
    pub fn initial_clear_speed(&mut self, x: f32) -> &mut Self {
        self.config.initial_clear_speed = x;
        self
    }
    /// Seconds per falling row at match start.
    pub fn initial_fall_speed(&mut self, x: f32) -> &mut Self {
        self.config.initial_fall_speed = x;
        self
    }
    /// Cooldown governing soft drops and enemy placements.
    pub fn freeze_duration(&mut self, x: f32) -> &mut Self {
        self.config.freeze_duration = x;
        self
    }

    /// The value to seed the match's PRNG with.
    pub fn seed(&mut self, x: u64) -> &mut Self {
        self.seed = Some(x);
        self
    }
    /// The method (and internal state) of shape generation used.
    pub fn piece_source(&mut self, x: PieceSource) -> &mut Self {
        self.piece_source = Some(x);
        self
    }
}
