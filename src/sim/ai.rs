//! Bot opponent
//!
//! The bot re-reads the ball's height at most once per reaction delay, adds
//! a random aiming error, and steers its paddle centre toward that target.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};

/// Bot difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Ultra,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Ultra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Ultra => "ULTRA",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "ultra" => Some(Difficulty::Ultra),
            _ => None,
        }
    }

    /// Difficulty for a menu key ('1'..='4')
    pub fn from_menu_key(key: char) -> Option<Self> {
        let digit = key.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Base paddle speed in pixels per tick
    pub fn speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 4.0,
            Difficulty::Medium => 6.0,
            Difficulty::Hard => 8.0,
            Difficulty::Ultra => 10.0,
        }
    }

    /// Minimum seconds between target updates
    pub fn reaction_delay(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.15,
            Difficulty::Hard => 0.05,
            Difficulty::Ultra => 0.0,
        }
    }

    /// Maximum aiming error in pixels (either direction)
    pub fn prediction_error(&self) -> f32 {
        match self {
            Difficulty::Easy => 100.0,
            Difficulty::Medium => 50.0,
            Difficulty::Hard => 20.0,
            Difficulty::Ultra => 5.0,
        }
    }
}

/// Target tracking for the bot paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiController {
    difficulty: Difficulty,
    target_y: Option<f32>,
    last_update: f64,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            target_y: None,
            last_update: 0.0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn target_y(&self) -> Option<f32> {
        self.target_y
    }

    /// Drop the current target (new match)
    pub fn reset(&mut self, now: f64) {
        self.target_y = None;
        self.last_update = now;
    }

    /// Re-aim at the ball if there is no target or the reaction delay has passed
    ///
    /// Returns true if the target changed.
    pub fn retarget<R: Rng>(&mut self, ball: &Ball, now: f64, rng: &mut R) -> bool {
        let due = now - self.last_update >= self.difficulty.reaction_delay();
        if self.target_y.is_some() && !due {
            return false;
        }
        let error = self.difficulty.prediction_error();
        self.target_y = Some(ball.pos.y + rng.random_range(-error..=error));
        self.last_update = now;
        true
    }

    /// Move the paddle one tick toward the target
    pub fn steer(&self, paddle: &mut Paddle, speed_multiplier: f32, field_height: f32) {
        let Some(target) = self.target_y else {
            return;
        };
        let speed = self.difficulty.speed() * speed_multiplier;
        paddle.move_toward(target, speed, field_height);
    }
}
