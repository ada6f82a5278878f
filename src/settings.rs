//! Match settings
//!
//! Chosen in the menus before a match and persisted as JSON between runs.

use std::collections::BTreeSet;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{INITIAL_BALL_SPEED, MAX_ENABLED_ABILITIES};
use crate::sim::{AbilityKind, Difficulty};

/// Who controls the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Human vs computer
    #[default]
    VsBot,
    /// Two humans on one keyboard
    TwoPlayer,
}

impl GameMode {
    pub fn has_bot(&self) -> bool {
        *self == GameMode::VsBot
    }
}

/// Points needed to win a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinningScore {
    Points(u32),
    /// Endless match
    Unbounded,
}

impl Default for WinningScore {
    fn default() -> Self {
        WinningScore::Points(10)
    }
}

impl WinningScore {
    /// Score limits offered in the menu, keyed '1'..='8'
    pub const OPTIONS: [WinningScore; 8] = [
        WinningScore::Points(1),
        WinningScore::Points(2),
        WinningScore::Points(5),
        WinningScore::Points(10),
        WinningScore::Points(15),
        WinningScore::Points(20),
        WinningScore::Points(50),
        WinningScore::Unbounded,
    ];

    pub fn from_menu_key(key: char) -> Option<Self> {
        let digit = key.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(|i| Self::OPTIONS.get(i).copied())
    }

    /// The finite cap, if any
    pub fn cap(&self) -> Option<u32> {
        match self {
            WinningScore::Points(points) => Some(*points),
            WinningScore::Unbounded => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            WinningScore::Points(points) => points.to_string(),
            WinningScore::Unbounded => "∞".to_string(),
        }
    }
}

/// A settings combination the simulator cannot run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least one ability must be enabled")]
    NoAbilities,
    #[error("at most {max} abilities may be enabled, got {count}")]
    TooManyAbilities { count: usize, max: usize },
    #[error("initial ball speed must be positive and finite, got {0}")]
    InvalidBallSpeed(f32),
    #[error("winning score must be at least 1 point")]
    ZeroWinningScore,
}

/// Failure reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub mode: GameMode,
    /// Initial per-axis ball speed (pixels per tick)
    pub ball_speed: f32,
    pub winning_score: WinningScore,
    /// Bot tier; ignored in two-player mode
    pub difficulty: Difficulty,
    /// Shrink the scored-against paddle on every point
    pub paddle_shrink: bool,
    /// Enabled abilities (1 to 3)
    pub abilities: BTreeSet<AbilityKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::VsBot,
            ball_speed: INITIAL_BALL_SPEED,
            winning_score: WinningScore::default(),
            difficulty: Difficulty::Medium,
            paddle_shrink: true,
            abilities: [AbilityKind::SizeUp, AbilityKind::SpeedUp, AbilityKind::Reverse]
                .into_iter()
                .collect(),
        }
    }
}

impl Settings {
    /// Two-player settings with everything else at defaults
    pub fn two_player() -> Self {
        Self {
            mode: GameMode::TwoPlayer,
            ..Self::default()
        }
    }

    /// Check the preconditions the simulator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.abilities.is_empty() {
            return Err(ConfigError::NoAbilities);
        }
        if self.abilities.len() > MAX_ENABLED_ABILITIES {
            return Err(ConfigError::TooManyAbilities {
                count: self.abilities.len(),
                max: MAX_ENABLED_ABILITIES,
            });
        }
        if !self.ball_speed.is_finite() || self.ball_speed <= 0.0 {
            return Err(ConfigError::InvalidBallSpeed(self.ball_speed));
        }
        if self.winning_score == WinningScore::Points(0) {
            return Err(ConfigError::ZeroWinningScore);
        }
        Ok(())
    }

    pub fn is_enabled(&self, kind: AbilityKind) -> bool {
        self.abilities.contains(&kind)
    }

    /// Menu toggle: remove if enabled, add if there is room
    ///
    /// Returns whether the ability is enabled afterwards.
    pub fn toggle_ability(&mut self, kind: AbilityKind) -> bool {
        if self.abilities.remove(&kind) {
            return false;
        }
        if self.abilities.len() < MAX_ENABLED_ABILITIES {
            self.abilities.insert(kind);
            return true;
        }
        false
    }

    /// Abilities in force for a match
    ///
    /// Against the bot both sides get exactly three: the selection is topped
    /// up with random picks from the disabled abilities.
    pub fn match_abilities<R: Rng>(&self, rng: &mut R) -> BTreeSet<AbilityKind> {
        let mut abilities = self.abilities.clone();
        if !self.mode.has_bot() {
            return abilities;
        }
        let mut available: Vec<AbilityKind> = AbilityKind::ALL
            .into_iter()
            .filter(|kind| !abilities.contains(kind))
            .collect();
        while abilities.len() < MAX_ENABLED_ABILITIES && !available.is_empty() {
            let pick = available.swap_remove(rng.random_range(0..available.len()));
            abilities.insert(pick);
        }
        abilities
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.abilities.len(), 3);
        assert!(settings.mode.has_bot());
        assert_eq!(Settings::two_player().validate(), Ok(()));
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = Settings::default();
        settings.abilities.clear();
        assert_eq!(settings.validate(), Err(ConfigError::NoAbilities));

        let mut settings = Settings::default();
        settings.abilities = AbilityKind::ALL.into_iter().take(4).collect();
        assert_eq!(
            settings.validate(),
            Err(ConfigError::TooManyAbilities { count: 4, max: 3 })
        );

        let mut settings = Settings::default();
        settings.ball_speed = 0.0;
        assert_eq!(settings.validate(), Err(ConfigError::InvalidBallSpeed(0.0)));

        let mut settings = Settings::default();
        settings.winning_score = WinningScore::Points(0);
        assert_eq!(settings.validate(), Err(ConfigError::ZeroWinningScore));
    }

    #[test]
    fn test_toggle_respects_limit() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_ability(AbilityKind::Chaos));
        assert!(!settings.is_enabled(AbilityKind::Chaos));

        assert!(!settings.toggle_ability(AbilityKind::SizeUp));
        assert!(settings.toggle_ability(AbilityKind::Chaos));
        assert!(settings.is_enabled(AbilityKind::Chaos));
        assert_eq!(settings.abilities.len(), 3);
    }

    #[test]
    fn test_bot_mode_fills_to_three() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut settings = Settings::default();
        settings.abilities = [AbilityKind::Stealth].into_iter().collect();

        for _ in 0..20 {
            let abilities = settings.match_abilities(&mut rng);
            assert_eq!(abilities.len(), 3);
            assert!(abilities.contains(&AbilityKind::Stealth));
        }
    }

    #[test]
    fn test_two_player_keeps_selection() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut settings = Settings::two_player();
        settings.abilities = [AbilityKind::Pinpoint].into_iter().collect();
        assert_eq!(settings.match_abilities(&mut rng), settings.abilities);
    }

    #[test]
    fn test_score_options() {
        assert_eq!(WinningScore::from_menu_key('1'), Some(WinningScore::Points(1)));
        assert_eq!(WinningScore::from_menu_key('4'), Some(WinningScore::Points(10)));
        assert_eq!(WinningScore::from_menu_key('8'), Some(WinningScore::Unbounded));
        assert_eq!(WinningScore::from_menu_key('9'), None);
        assert_eq!(WinningScore::Unbounded.cap(), None);
        assert_eq!(WinningScore::Unbounded.label(), "∞");
    }

    #[test]
    fn test_json_round_trip_and_rejection() {
        let mut settings = Settings::two_player();
        settings.winning_score = WinningScore::Unbounded;
        settings.difficulty = Difficulty::Ultra;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);

        let bad = json.replace("\"ball_speed\": 10.0", "\"ball_speed\": -1.0");
        assert!(matches!(
            Settings::from_json(&bad),
            Err(SettingsError::Invalid(ConfigError::InvalidBallSpeed(_)))
        ));
        assert!(matches!(Settings::from_json("{"), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("chaotic_pong_missing_settings.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("chaotic_pong_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.paddle_shrink = false;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
