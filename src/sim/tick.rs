//! Per-frame simulation step
//!
//! One call to `update()` advances the match by one tick. The order of the
//! stages is fixed: abilities, paddles, ball, paddle hits, scoring, bot
//! targeting, power-up expiry, win check.

use super::clock::Clock;
use super::collision::{ball_hits_paddle, bounce_off_walls, scoring_side};
use super::powerups::{AbilityKind, EffectTargets};
use super::simulator::MatchSimulator;
use super::state::{MatchPhase, Side};
use crate::consts::*;

/// One side's controls for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideInput {
    /// Move-up held
    pub up: bool,
    /// Move-down held
    pub down: bool,
    /// Abilities pressed since the previous tick
    pub abilities: Vec<AbilityKind>,
}

impl SideInput {
    pub fn up() -> Self {
        Self {
            up: true,
            ..Default::default()
        }
    }

    pub fn down() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }

    pub fn with_ability(mut self, kind: AbilityKind) -> Self {
        self.abilities.push(kind);
        self
    }
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub player: SideInput,
    /// Ignored when the bot plays the opponent side
    pub opponent: SideInput,
}

impl TickInput {
    pub fn side(&self, side: Side) -> &SideInput {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

impl<C: Clock> MatchSimulator<C> {
    /// Advance the match by one tick (no-op unless running)
    pub fn update(&mut self, input: &TickInput) {
        if !self.phase.is_running() {
            return;
        }
        let now = self.clock.now();

        for side in Side::ALL {
            for &kind in &input.side(side).abilities {
                self.activate_at(side, kind, now);
            }
        }

        self.move_paddles(input);
        self.advance_ball();

        if let Some(scorer) = scoring_side(&self.ball, self.field_width) {
            self.score_point(scorer);
        }

        if let Some(ai) = &mut self.ai {
            ai.retarget(&self.ball, now, &mut self.rng);
        }

        let mut fx = EffectTargets {
            paddles: &mut self.paddles,
            ball: &mut self.ball,
            field_height: self.field_height,
        };
        self.powerups.update(now, &mut fx);

        self.check_winner();
    }

    /// Human paddles follow their keys, the bot paddle follows its target
    fn move_paddles(&mut self, input: &TickInput) {
        for side in Side::ALL {
            let speed = self.paddle_speed(side);
            let field_height = self.field_height;
            if self.is_bot(side) {
                if let Some(ai) = &self.ai {
                    ai.steer(&mut self.paddles[side.index()], self.powerups.speed_multiplier(side), field_height);
                }
                continue;
            }
            let controls = input.side(side);
            let paddle = &mut self.paddles[side.index()];
            if controls.up {
                paddle.move_by(-speed, field_height);
            }
            if controls.down {
                paddle.move_by(speed, field_height);
            }
        }
    }

    /// Integrate, bounce off the walls and resolve paddle hits
    fn advance_ball(&mut self) {
        self.ball.pos += self.ball.vel;
        bounce_off_walls(&mut self.ball, self.field_height);

        for side in Side::ALL {
            if !ball_hits_paddle(&self.ball, &self.paddles[side.index()], side) {
                continue;
            }
            self.ball.vel.x = -self.ball.vel.x;
            if self.powerups.take_powershot(side) {
                self.ball.vel *= POWERSHOT_MULTIPLIER;
                log::debug!("{:?} powershot, ball velocity {:?}", side, self.ball.vel);
            } else {
                self.ball.accelerate(BALL_SPEED_INCREASE);
            }
        }
    }

    /// Award a point (unless capped), shrink the loser's paddle, re-serve
    fn score_point(&mut self, scorer: Side) {
        if self.score.award(scorer, self.settings.winning_score.cap()) {
            self.shrink_paddle(scorer.rival());
            log::debug!(
                "{:?} scores: {} - {}",
                scorer,
                self.score.player,
                self.score.opponent
            );
        }
        self.reset_ball();
    }

    fn check_winner(&mut self) {
        let Some(cap) = self.settings.winning_score.cap() else {
            return;
        };
        if let Some(winner) = self.score.winner(cap) {
            self.phase = MatchPhase::Finished { winner };
            log::info!(
                "Match over: {:?} wins {} - {}",
                winner,
                self.score.player,
                self.score.opponent
            );
        }
    }
}
