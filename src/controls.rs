//! Keyboard bindings and per-tick input
//!
//! Keys are named the way browsers report `KeyboardEvent.key` ("w",
//! "ArrowUp", "/"). Single-character keys match case-insensitively so a held
//! Shift does not swallow a press.

use std::collections::HashSet;

use crate::sim::{AbilityKind, SideInput, TickInput};

/// Movement and ability keys for one side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: &'static str,
    pub down: &'static str,
    /// Indexed by `AbilityKind::index()`
    pub abilities: [&'static str; AbilityKind::COUNT],
}

impl KeyBindings {
    /// Left paddle
    pub fn player_default() -> Self {
        Self {
            up: "w",
            down: "s",
            abilities: ["q", "e", "a", "d", "2", "3", "4", "5"],
        }
    }

    /// Right paddle (two-player mode)
    pub fn opponent_default() -> Self {
        Self {
            up: "ArrowUp",
            down: "ArrowDown",
            abilities: ["ArrowLeft", "ArrowRight", "/", ".", "'", ";", "l", "k"],
        }
    }

    /// Ability bound to `key`, if any
    pub fn ability_for(&self, key: &str) -> Option<AbilityKind> {
        let key = normalize(key);
        AbilityKind::ALL
            .into_iter()
            .find(|kind| normalize(self.abilities[kind.index()]) == key)
    }

    /// HUD label for the key that fires `kind`
    pub fn label(&self, kind: AbilityKind) -> String {
        match self.abilities[kind.index()] {
            "ArrowLeft" => "←".to_string(),
            "ArrowRight" => "→".to_string(),
            "ArrowUp" => "↑".to_string(),
            "ArrowDown" => "↓".to_string(),
            key => key.to_uppercase(),
        }
    }

    fn is_up(&self, key: &str) -> bool {
        normalize(self.up) == key
    }

    fn is_down(&self, key: &str) -> bool {
        normalize(self.down) == key
    }
}

fn normalize(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Held keys plus presses not yet handed to the simulator
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
    pressed: Vec<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; auto-repeat while held is ignored
    pub fn key_down(&mut self, key: &str) {
        let key = normalize(key);
        if self.held.insert(key.clone()) {
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&normalize(key));
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&normalize(key))
    }

    /// Build this tick's input and consume the pending presses
    pub fn take_input(&mut self, player: &KeyBindings, opponent: &KeyBindings) -> TickInput {
        let pressed = std::mem::take(&mut self.pressed);
        TickInput {
            player: self.side_input(player, &pressed),
            opponent: self.side_input(opponent, &pressed),
        }
    }

    fn side_input(&self, bindings: &KeyBindings, pressed: &[String]) -> SideInput {
        SideInput {
            up: self.held.iter().any(|key| bindings.is_up(key)),
            down: self.held.iter().any(|key| bindings.is_down(key)),
            abilities: pressed
                .iter()
                .filter_map(|key| bindings.ability_for(key))
                .collect(),
        }
    }
}
