//! Collision detection for axis-aligned rectangles
//!
//! Paddles and the ball are both treated as boxes. Overlap uses half-open
//! intervals, so boxes that only touch along an edge do not collide.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap test: `a.min < b.max && a.max > b.min` on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Check whether the ball strikes `side`'s paddle this tick
///
/// The ball must overlap the paddle and be travelling toward it. A ball that
/// was already turned around is still inside the paddle for a tick or two and
/// must not be reflected back.
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    let approaching = match side {
        Side::Player => ball.vel.x < 0.0,
        Side::Opponent => ball.vel.x > 0.0,
    };
    approaching && ball.rect().overlaps(&paddle.rect())
}

/// Reflect vertical velocity if the ball touches the top or bottom edge
///
/// No positional correction is applied. Returns true on a bounce.
pub fn bounce_off_walls(ball: &mut Ball, field_height: f32) -> bool {
    if ball.pos.y <= 0.0 || ball.pos.y + ball.size >= field_height {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// The side that scores if the ball has left the field horizontally
pub fn scoring_side(ball: &Ball, field_width: f32) -> Option<Side> {
    if ball.pos.x <= 0.0 {
        Some(Side::Opponent)
    } else if ball.pos.x + ball.size >= field_width {
        Some(Side::Player)
    } else {
        None
    }
}
