//! Read-only match view for renderers
//!
//! Taken after `update()` returns. Everything a frontend needs to draw a
//! frame and the HUD, with no access back into the simulator.

use glam::Vec2;
use serde::Serialize;

use super::clock::Clock;
use super::powerups::AbilityKind;
use super::simulator::MatchSimulator;
use super::state::{Color, MatchPhase, Score, Side};

/// A drawable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectView {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
}

/// HUD cooldown ring for one enabled ability
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbilityRing {
    pub side: Side,
    pub kind: AbilityKind,
    pub name: &'static str,
    /// 0 just used, 1 ready
    pub progress: f32,
    pub ready: bool,
    /// Effect in force on this side
    pub active: bool,
}

/// Frame state of a match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub time: f64,
    pub field: Vec2,
    pub phase: MatchPhase,
    pub paddles: [RectView; 2],
    pub ball: RectView,
    pub score: Score,
    pub winner_message: Option<&'static str>,
    /// Rings per side (player first), enabled abilities in menu order
    pub rings: [Vec<AbilityRing>; 2],
}

impl MatchSnapshot {
    pub fn rings(&self, side: Side) -> &[AbilityRing] {
        &self.rings[side.index()]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<C: Clock> MatchSimulator<C> {
    /// Capture the current frame
    pub fn snapshot(&self) -> MatchSnapshot {
        let now = self.clock.now();
        let paddle_view = |side: Side| {
            let paddle = &self.paddles[side.index()];
            RectView {
                pos: paddle.pos,
                size: Vec2::new(paddle.width, paddle.height),
                color: paddle.color,
            }
        };
        let rings_for = |side: Side| -> Vec<AbilityRing> {
            self.abilities
                .iter()
                .map(|&kind| {
                    let progress = self.powerups.cooldown_progress(side, kind, now);
                    AbilityRing {
                        side,
                        kind,
                        name: kind.name(),
                        progress,
                        ready: progress >= 1.0,
                        active: self.powerups.is_active(side, kind),
                    }
                })
                .collect()
        };

        MatchSnapshot {
            time: now,
            field: Vec2::new(self.field_width, self.field_height),
            phase: self.phase,
            paddles: [paddle_view(Side::Player), paddle_view(Side::Opponent)],
            ball: RectView {
                pos: self.ball.pos,
                size: Vec2::splat(self.ball.size),
                color: self.ball.color,
            },
            score: self.score,
            winner_message: self.winner_message(),
            rings: [rings_for(Side::Player), rings_for(Side::Opponent)],
        }
    }
}
