//! Match ownership: entities, score, phase and collaborators
//!
//! `MatchSimulator` owns both paddles, the ball and the score. The power-up
//! engine and the bot only ever see the pieces they act on.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ai::AiController;
use super::clock::{Clock, SystemClock};
use super::powerups::{AbilityKind, EffectTargets, PowerUpEngine};
use super::state::{Ball, Color, MatchPhase, Paddle, Score, Side};
use crate::consts::*;
use crate::settings::{ConfigError, Settings};

/// A single Pong match
pub struct MatchSimulator<C: Clock = SystemClock> {
    pub(super) settings: Settings,
    pub(super) clock: C,
    pub(super) rng: Pcg32,
    pub(super) field_width: f32,
    pub(super) field_height: f32,
    pub(super) phase: MatchPhase,
    pub(super) paddles: [Paddle; 2],
    pub(super) ball: Ball,
    pub(super) score: Score,
    pub(super) powerups: PowerUpEngine,
    /// Present only against the bot
    pub(super) ai: Option<AiController>,
    /// Abilities in force for the current match
    pub(super) abilities: BTreeSet<AbilityKind>,
}

impl<C: Clock> MatchSimulator<C> {
    /// Create an idle match on the standard field
    ///
    /// Settings are validated here; everything downstream assumes they hold.
    pub fn new(settings: Settings, clock: C, seed: u64) -> Result<Self, ConfigError> {
        Self::with_field(settings, clock, seed, FIELD_WIDTH, FIELD_HEIGHT)
    }

    /// Create an idle match on a custom-sized field
    pub fn with_field(
        settings: Settings,
        clock: C,
        seed: u64,
        field_width: f32,
        field_height: f32,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let ai = settings
            .mode
            .has_bot()
            .then(|| AiController::new(settings.difficulty));
        let abilities = settings.abilities.clone();
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            field_width,
            field_height,
            phase: MatchPhase::Idle,
            paddles: [
                Paddle::new(Side::Player, field_width, field_height),
                Paddle::new(Side::Opponent, field_width, field_height),
            ],
            ball: Ball::new(field_width, field_height, settings.ball_speed),
            score: Score::new(),
            powerups: PowerUpEngine::new(),
            ai,
            abilities,
            settings,
            clock,
        })
    }

    /// Begin a fresh match, abandoning any match in progress
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.phase = MatchPhase::Running;
        self.score = Score::new();
        self.paddles = [
            Paddle::new(Side::Player, self.field_width, self.field_height),
            Paddle::new(Side::Opponent, self.field_width, self.field_height),
        ];
        self.powerups.reset();
        if let Some(ai) = &mut self.ai {
            ai.reset(now);
        }
        self.abilities = self.settings.match_abilities(&mut self.rng);
        self.reset_ball();

        log::info!(
            "Match started: {:?}, first to {}, abilities {:?}",
            self.settings.mode,
            self.settings.winning_score.label(),
            self.abilities
        );
    }

    /// Use an ability for `side` right now
    ///
    /// Returns false when the request is refused: the match is not running,
    /// the ability is not enabled, the bot owns that side, or the ability is
    /// gated by its cooldown or an effect already in force.
    pub fn activate(&mut self, side: Side, kind: AbilityKind) -> bool {
        let now = self.clock.now();
        self.activate_at(side, kind, now)
    }

    pub(super) fn activate_at(&mut self, side: Side, kind: AbilityKind, now: f64) -> bool {
        if !self.phase.is_running() || !self.abilities.contains(&kind) || self.is_bot(side) {
            return false;
        }
        let mut fx = EffectTargets {
            paddles: &mut self.paddles,
            ball: &mut self.ball,
            field_height: self.field_height,
        };
        self.powerups.activate(side, kind, now, &mut fx)
    }

    /// Whether the bot controls `side`
    pub fn is_bot(&self, side: Side) -> bool {
        side == Side::Opponent && self.ai.is_some()
    }

    /// Centre the ball with a fresh random heading at the initial speed
    pub(super) fn reset_ball(&mut self) {
        let dir_x = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let dir_y = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.reset(
            self.field_width,
            self.field_height,
            self.settings.ball_speed,
            dir_x,
            dir_y,
        );
        if !self.powerups.any_active(AbilityKind::Stealth) {
            self.ball.color = Color::DEFAULT;
        }
    }

    /// Shrink-on-score: the scored-against paddle loses height
    pub(super) fn shrink_paddle(&mut self, side: Side) {
        if !self.settings.paddle_shrink {
            return;
        }
        let multiplier = self.powerups.height_multiplier(side);
        let paddle = &mut self.paddles[side.index()];
        paddle.base_height = (paddle.base_height - PADDLE_SHRINK_RATE).max(MIN_PADDLE_HEIGHT);
        paddle.apply_height_multiplier(multiplier, self.field_height);
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn winner(&self) -> Option<Side> {
        self.phase.winner()
    }

    /// End-of-match banner, if the match is over
    pub fn winner_message(&self) -> Option<&'static str> {
        self.winner().map(|side| match side {
            Side::Player => "Player 1 Wins!",
            Side::Opponent if self.ai.is_some() => "Computer Wins!",
            Side::Opponent => "Player 2 Wins!",
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn field_size(&self) -> (f32, f32) {
        (self.field_width, self.field_height)
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn powerups(&self) -> &PowerUpEngine {
        &self.powerups
    }

    pub fn ai(&self) -> Option<&AiController> {
        self.ai.as_ref()
    }

    /// Abilities usable in the current match
    pub fn abilities(&self) -> &BTreeSet<AbilityKind> {
        &self.abilities
    }

    /// Current move speed of `side`'s paddle, with power-up multipliers
    pub fn paddle_speed(&self, side: Side) -> f32 {
        let base = match &self.ai {
            Some(ai) if side == Side::Opponent => ai.difficulty().speed(),
            _ => PADDLE_SPEED,
        };
        base * self.powerups.speed_multiplier(side)
    }

    /// Mutable ball access for scripted setups (tests, demos)
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    /// Mutable paddle access for scripted setups (tests, demos)
    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }
}
