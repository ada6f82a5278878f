//! Match state and core entity types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// One of the two sides of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, always human
    Player,
    /// Right paddle, human or bot depending on mode
    Opponent,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    /// Index into per-side tables
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    #[inline]
    pub fn rival(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Packed 0xRRGGBB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FF_FF);
    pub const BLACK: Color = Color(0x00_00_00);
    pub const BLUE: Color = Color(0x00_64_FF);

    /// Default paddle and ball colour
    pub const DEFAULT: Color = Color::WHITE;
    /// Ball colour while stealth is in force (matches the field background)
    pub const STEALTH: Color = Color::BLACK;
    /// Paddle tint while slowed
    pub const SLOWED: Color = Color::BLUE;
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Constructed, `start()` not called yet
    Idle,
    /// Active gameplay
    Running,
    /// A side reached the winning score
    Finished { winner: Side },
}

impl MatchPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, MatchPhase::Running)
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchPhase::Finished { winner } => Some(*winner),
            _ => None,
        }
    }
}

/// A paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    /// Displayed height (base height with active size effects applied)
    pub height: f32,
    /// Height after score shrink, without power-up effects
    pub base_height: f32,
    pub color: Color,
}

impl Paddle {
    /// Create a paddle for `side`, vertically centred on the field
    pub fn new(side: Side, field_width: f32, field_height: f32) -> Self {
        let x = match side {
            Side::Player => PADDLE_MARGIN,
            Side::Opponent => field_width - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self {
            pos: Vec2::new(x, field_height / 2.0 - PADDLE_HEIGHT / 2.0),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            base_height: PADDLE_HEIGHT,
            color: Color::DEFAULT,
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Keep the paddle fully inside `[0, field_height]`
    pub fn clamp_to_field(&mut self, field_height: f32) {
        let max_y = (field_height - self.height).max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }

    /// Move vertically by `dy` and clamp
    pub fn move_by(&mut self, dy: f32, field_height: f32) {
        self.pos.y += dy;
        self.clamp_to_field(field_height);
    }

    /// Move toward a target centre line, at most `max_step` this tick
    pub fn move_toward(&mut self, target_center_y: f32, max_step: f32, field_height: f32) {
        let delta = target_center_y - self.center_y();
        if delta == 0.0 {
            return;
        }
        self.move_by(delta.clamp(-max_step, max_step), field_height);
    }

    /// Place the paddle's centre at `center_y`, clamped to the field
    pub fn snap_center_to(&mut self, center_y: f32, field_height: f32) {
        self.pos.y = center_y - self.height / 2.0;
        self.clamp_to_field(field_height);
    }

    /// Set the displayed height as `base_height * multiplier`
    pub fn apply_height_multiplier(&mut self, multiplier: f32, field_height: f32) {
        self.height = self.base_height * multiplier;
        self.clamp_to_field(field_height);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the ball's bounding square
    pub pos: Vec2,
    pub size: f32,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub color: Color,
    /// Per-axis speed scalar; a normal paddle hit sets `|vel.x| = |vel.y| = speed`
    pub speed: f32,
}

impl Ball {
    pub fn new(field_width: f32, field_height: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(field_width / 2.0, field_height / 2.0),
            size: BALL_SIZE,
            vel: Vec2::new(speed, speed),
            color: Color::DEFAULT,
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    /// Return to centre at `speed`, heading in the given signs
    pub fn reset(&mut self, field_width: f32, field_height: f32, speed: f32, dir_x: f32, dir_y: f32) {
        self.pos = Vec2::new(field_width / 2.0, field_height / 2.0);
        self.speed = speed;
        self.vel = Vec2::new(speed * dir_x.signum(), speed * dir_y.signum());
    }

    /// Scale the speed scalar and rebuild velocity, keeping each axis's sign
    pub fn accelerate(&mut self, factor: f32) {
        self.speed *= factor;
        let dir_x = if self.vel.x > 0.0 { 1.0 } else { -1.0 };
        let dir_y = if self.vel.y > 0.0 { 1.0 } else { -1.0 };
        self.vel = Vec2::new(self.speed * dir_x, self.speed * dir_y);
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Award a point unless the side already sits at `cap`
    ///
    /// Returns true if the score changed.
    pub fn award(&mut self, side: Side, cap: Option<u32>) -> bool {
        let points = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        if cap.is_some_and(|cap| *points >= cap) {
            return false;
        }
        *points += 1;
        true
    }

    /// The side that has reached `cap`, player checked first
    pub fn winner(&self, cap: u32) -> Option<Side> {
        if self.player >= cap {
            Some(Side::Player)
        } else if self.opponent >= cap {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}
