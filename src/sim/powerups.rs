//! Power-up engine: activation gating, effects and expiry
//!
//! Each side owns one `PowerUpState` per ability. Self abilities record their
//! effect on the activating side; Slow-down and Chaos are debuffs, so the
//! activator's slot holds the cooldown timestamp while the rival's slot holds
//! the active flag.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Color, Paddle, Side};
use crate::consts::*;

/// The eight abilities, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    SizeUp,
    SpeedUp,
    Reverse,
    SlowDown,
    Chaos,
    Powershot,
    Stealth,
    Pinpoint,
}

/// Which side an ability's state and effect land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityTarget {
    /// The activating side
    Own,
    /// The activating side's rival
    Rival,
}

impl AbilityTarget {
    pub fn resolve(self, activator: Side) -> Side {
        match self {
            AbilityTarget::Own => activator,
            AbilityTarget::Rival => activator.rival(),
        }
    }
}

/// Static description of an ability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilitySpec {
    pub kind: AbilityKind,
    pub cooldown: f64,
    /// `None` for instant and one-shot abilities
    pub duration: Option<f64>,
    pub target: AbilityTarget,
}

impl AbilityKind {
    pub const COUNT: usize = 8;

    pub const ALL: [AbilityKind; AbilityKind::COUNT] = [
        AbilityKind::SizeUp,
        AbilityKind::SpeedUp,
        AbilityKind::Reverse,
        AbilityKind::SlowDown,
        AbilityKind::Chaos,
        AbilityKind::Powershot,
        AbilityKind::Stealth,
        AbilityKind::Pinpoint,
    ];

    /// Index into per-ability tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> AbilitySpec {
        let (cooldown, duration, target) = match self {
            AbilityKind::SizeUp => (SIZE_UP_COOLDOWN, Some(SIZE_UP_DURATION), AbilityTarget::Own),
            AbilityKind::SpeedUp => (SPEED_UP_COOLDOWN, Some(SPEED_UP_DURATION), AbilityTarget::Own),
            AbilityKind::Reverse => (REVERSE_COOLDOWN, None, AbilityTarget::Own),
            AbilityKind::SlowDown => (SLOW_COOLDOWN, Some(SLOW_DURATION), AbilityTarget::Rival),
            AbilityKind::Chaos => (CHAOS_COOLDOWN, Some(CHAOS_DURATION), AbilityTarget::Rival),
            AbilityKind::Powershot => (POWERSHOT_COOLDOWN, None, AbilityTarget::Own),
            AbilityKind::Stealth => (STEALTH_COOLDOWN, Some(STEALTH_DURATION), AbilityTarget::Own),
            AbilityKind::Pinpoint => (PINPOINT_COOLDOWN, None, AbilityTarget::Own),
        };
        AbilitySpec {
            kind: self,
            cooldown,
            duration,
            target,
        }
    }

    /// Whether activation sets an `active` flag (timed effect or pending charge)
    pub fn holds_state(self) -> bool {
        self.spec().duration.is_some() || self == AbilityKind::Powershot
    }

    pub fn name(self) -> &'static str {
        match self {
            AbilityKind::SizeUp => "Size-up",
            AbilityKind::SpeedUp => "Speed-up",
            AbilityKind::Reverse => "Reverse",
            AbilityKind::SlowDown => "Slow-down",
            AbilityKind::Chaos => "Chaos",
            AbilityKind::Powershot => "Powershot",
            AbilityKind::Stealth => "Stealth",
            AbilityKind::Pinpoint => "Pinpoint",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AbilityKind::SizeUp => "Increase paddle size by 50%",
            AbilityKind::SpeedUp => "Double paddle speed",
            AbilityKind::Reverse => "Reverse ball direction",
            AbilityKind::SlowDown => "Slow opponent by 30%",
            AbilityKind::Chaos => "Make opponent 400% faster but 25% smaller",
            AbilityKind::Powershot => "Triple ball speed on next paddle hit",
            AbilityKind::Stealth => "Turn ball black for 2 seconds",
            AbilityKind::Pinpoint => "Align paddle with ball position",
        }
    }

    /// Menu key ('1'..='8')
    pub fn menu_key(self) -> char {
        (b'1' + self as u8) as char
    }

    pub fn from_menu_key(key: char) -> Option<Self> {
        let digit = key.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Bookkeeping for one ability on one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpState {
    /// Effect in force (or Powershot charge pending)
    pub active: bool,
    /// When the current effect started
    pub activated_at: Option<f64>,
    /// Last accepted activation by this side, for cooldown gating
    pub last_activated_at: Option<f64>,
}

/// The entities an ability may touch
pub struct EffectTargets<'a> {
    pub paddles: &'a mut [Paddle; 2],
    pub ball: &'a mut Ball,
    pub field_height: f32,
}

impl EffectTargets<'_> {
    fn paddle(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }
}

/// Per-side ability state table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpEngine {
    states: [[PowerUpState; AbilityKind::COUNT]; 2],
}

impl PowerUpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every activation and effect
    pub fn reset(&mut self) {
        self.states = Default::default();
    }

    pub fn state(&self, side: Side, kind: AbilityKind) -> &PowerUpState {
        &self.states[side.index()][kind.index()]
    }

    fn state_mut(&mut self, side: Side, kind: AbilityKind) -> &mut PowerUpState {
        &mut self.states[side.index()][kind.index()]
    }

    /// Whether `kind`'s effect is currently in force on `side`
    pub fn is_active(&self, side: Side, kind: AbilityKind) -> bool {
        self.state(side, kind).active
    }

    pub fn any_active(&self, kind: AbilityKind) -> bool {
        Side::ALL.iter().any(|&side| self.is_active(side, kind))
    }

    pub fn powershot_ready(&self, side: Side) -> bool {
        self.is_active(side, AbilityKind::Powershot)
    }

    /// Consume `side`'s Powershot charge, returning whether one was pending
    pub fn take_powershot(&mut self, side: Side) -> bool {
        let state = self.state_mut(side, AbilityKind::Powershot);
        std::mem::replace(&mut state.active, false)
    }

    /// Seconds until `side` may use `kind` again
    pub fn cooldown_remaining(&self, side: Side, kind: AbilityKind, now: f64) -> f64 {
        match self.state(side, kind).last_activated_at {
            Some(last) => (kind.spec().cooldown - (now - last)).max(0.0),
            None => 0.0,
        }
    }

    /// Cooldown progress in `[0, 1]`, 1 meaning ready
    pub fn cooldown_progress(&self, side: Side, kind: AbilityKind, now: f64) -> f32 {
        match self.state(side, kind).last_activated_at {
            Some(last) => ((now - last) / kind.spec().cooldown).clamp(0.0, 1.0) as f32,
            None => 1.0,
        }
    }

    /// Move-speed multiplier for `side`: speed-up, then slow-down, then chaos
    pub fn speed_multiplier(&self, side: Side) -> f32 {
        let mut multiplier = 1.0;
        if self.is_active(side, AbilityKind::SpeedUp) {
            multiplier *= SPEED_UP_MULTIPLIER;
        }
        if self.is_active(side, AbilityKind::SlowDown) {
            multiplier *= SLOW_MULTIPLIER;
        }
        if self.is_active(side, AbilityKind::Chaos) {
            multiplier *= CHAOS_SPEED_MULTIPLIER;
        }
        multiplier
    }

    /// Displayed-height multiplier for `side`
    pub fn height_multiplier(&self, side: Side) -> f32 {
        let mut multiplier = 1.0;
        if self.is_active(side, AbilityKind::SizeUp) {
            multiplier *= SIZE_UP_MULTIPLIER;
        }
        if self.is_active(side, AbilityKind::Chaos) {
            multiplier *= CHAOS_SIZE_MULTIPLIER;
        }
        multiplier
    }

    /// Request `kind` for `side` at `now`
    ///
    /// Rejections (effect already in force, cooldown running) change nothing
    /// and return false.
    pub fn activate(&mut self, side: Side, kind: AbilityKind, now: f64, fx: &mut EffectTargets<'_>) -> bool {
        let spec = kind.spec();
        let target = spec.target.resolve(side);

        if self.is_active(target, kind) {
            return false;
        }
        if let Some(last) = self.state(side, kind).last_activated_at {
            if now - last < spec.cooldown {
                return false;
            }
        }

        self.state_mut(side, kind).last_activated_at = Some(now);
        if kind.holds_state() {
            let state = self.state_mut(target, kind);
            state.active = true;
            state.activated_at = Some(now);
        }
        self.apply(kind, target, fx);

        log::debug!("{:?} activated {} on {:?} at {:.2}s", side, kind.name(), target, now);
        true
    }

    /// Expire timed effects whose duration has elapsed
    pub fn update(&mut self, now: f64, fx: &mut EffectTargets<'_>) {
        for side in Side::ALL {
            for kind in AbilityKind::ALL {
                let Some(duration) = kind.spec().duration else {
                    continue;
                };
                let state = self.state_mut(side, kind);
                let elapsed = state.activated_at.map_or(f64::INFINITY, |start| now - start);
                if state.active && elapsed >= duration {
                    state.active = false;
                    self.revert(kind, side, fx);
                    log::debug!("{} expired on {:?} at {:.2}s", kind.name(), side, now);
                }
            }
        }
    }

    /// Immediate effect of an accepted activation on `target`
    fn apply(&self, kind: AbilityKind, target: Side, fx: &mut EffectTargets<'_>) {
        let field_height = fx.field_height;
        match kind {
            AbilityKind::SizeUp => {
                let multiplier = self.height_multiplier(target);
                fx.paddle(target).apply_height_multiplier(multiplier, field_height);
            }
            // Read live from the active flag
            AbilityKind::SpeedUp | AbilityKind::Powershot => {}
            AbilityKind::Reverse => {
                fx.ball.vel = -fx.ball.vel;
            }
            AbilityKind::SlowDown => {
                fx.paddle(target).color = Color::SLOWED;
            }
            AbilityKind::Chaos => {
                let multiplier = self.height_multiplier(target);
                fx.paddle(target).apply_height_multiplier(multiplier, field_height);
            }
            AbilityKind::Stealth => {
                fx.ball.color = Color::STEALTH;
            }
            AbilityKind::Pinpoint => {
                let ball_y = fx.ball.pos.y;
                fx.paddle(target).snap_center_to(ball_y, field_height);
            }
        }
    }

    /// Undo an expired effect on `side`, respecting effects still in force
    fn revert(&self, kind: AbilityKind, side: Side, fx: &mut EffectTargets<'_>) {
        let field_height = fx.field_height;
        match kind {
            AbilityKind::SizeUp | AbilityKind::Chaos => {
                let multiplier = self.height_multiplier(side);
                fx.paddle(side).apply_height_multiplier(multiplier, field_height);
            }
            AbilityKind::SlowDown => {
                fx.paddle(side).color = Color::DEFAULT;
            }
            AbilityKind::Stealth => {
                if !self.any_active(AbilityKind::Stealth) {
                    fx.ball.color = Color::DEFAULT;
                }
            }
            AbilityKind::SpeedUp | AbilityKind::Reverse | AbilityKind::Powershot | AbilityKind::Pinpoint => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    struct Fixture {
        paddles: [Paddle; 2],
        ball: Ball,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                paddles: [
                    Paddle::new(Side::Player, FIELD_WIDTH, FIELD_HEIGHT),
                    Paddle::new(Side::Opponent, FIELD_WIDTH, FIELD_HEIGHT),
                ],
                ball: Ball::new(FIELD_WIDTH, FIELD_HEIGHT, INITIAL_BALL_SPEED),
            }
        }

        fn targets(&mut self) -> EffectTargets<'_> {
            EffectTargets {
                paddles: &mut self.paddles,
                ball: &mut self.ball,
                field_height: FIELD_HEIGHT,
            }
        }
    }

    #[test]
    fn test_first_activation_is_free() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Player, AbilityKind::Reverse, 0.0, &mut fx.targets()));
        assert_eq!(
            engine.state(Side::Player, AbilityKind::Reverse).last_activated_at,
            Some(0.0)
        );
    }

    #[test]
    fn test_cooldown_rejects_silently() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Player, AbilityKind::Reverse, 1.0, &mut fx.targets()));
        let vel = fx.ball.vel;
        let before = engine.clone();

        assert!(!engine.activate(Side::Player, AbilityKind::Reverse, 30.9, &mut fx.targets()));
        assert_eq!(fx.ball.vel, vel);
        assert_eq!(engine.states, before.states);

        assert!(engine.activate(Side::Player, AbilityKind::Reverse, 31.0, &mut fx.targets()));
        assert_eq!(fx.ball.vel, -vel);
    }

    #[test]
    fn test_cooldowns_are_per_side() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Player, AbilityKind::Pinpoint, 0.0, &mut fx.targets()));
        assert!(engine.activate(Side::Opponent, AbilityKind::Pinpoint, 0.0, &mut fx.targets()));
    }

    #[test]
    fn test_size_up_expires_to_base_height() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Player, AbilityKind::SizeUp, 0.0, &mut fx.targets()));
        assert_eq!(fx.paddles[0].height, PADDLE_HEIGHT * 1.5);

        engine.update(4.99, &mut fx.targets());
        assert!(engine.is_active(Side::Player, AbilityKind::SizeUp));
        assert_eq!(fx.paddles[0].height, PADDLE_HEIGHT * 1.5);

        engine.update(5.0, &mut fx.targets());
        assert!(!engine.is_active(Side::Player, AbilityKind::SizeUp));
        assert_eq!(fx.paddles[0].height, PADDLE_HEIGHT);
    }

    #[test]
    fn test_slow_down_targets_rival() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Player, AbilityKind::SlowDown, 0.0, &mut fx.targets()));

        assert!(engine.is_active(Side::Opponent, AbilityKind::SlowDown));
        assert!(!engine.is_active(Side::Player, AbilityKind::SlowDown));
        assert_eq!(engine.speed_multiplier(Side::Opponent), SLOW_MULTIPLIER);
        assert_eq!(engine.speed_multiplier(Side::Player), 1.0);
        assert_eq!(fx.paddles[1].color, Color::SLOWED);
        assert_eq!(fx.paddles[0].color, Color::DEFAULT);

        // Cooldown is recorded on the activator
        assert!(engine.state(Side::Player, AbilityKind::SlowDown).last_activated_at.is_some());
        assert!(engine.state(Side::Opponent, AbilityKind::SlowDown).last_activated_at.is_none());

        engine.update(5.0, &mut fx.targets());
        assert_eq!(engine.speed_multiplier(Side::Opponent), 1.0);
        assert_eq!(fx.paddles[1].color, Color::DEFAULT);
    }

    #[test]
    fn test_slow_down_each_direction_independent() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Player, AbilityKind::SlowDown, 0.0, &mut fx.targets()));
        assert!(engine.activate(Side::Opponent, AbilityKind::SlowDown, 1.0, &mut fx.targets()));
        assert!(engine.is_active(Side::Player, AbilityKind::SlowDown));
    }

    #[test]
    fn test_chaos_shrinks_and_speeds_rival() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Opponent, AbilityKind::Chaos, 0.0, &mut fx.targets()));
        assert_eq!(fx.paddles[0].height, PADDLE_HEIGHT * CHAOS_SIZE_MULTIPLIER);
        assert_eq!(engine.speed_multiplier(Side::Player), CHAOS_SPEED_MULTIPLIER);

        engine.update(3.0, &mut fx.targets());
        assert_eq!(fx.paddles[0].height, PADDLE_HEIGHT);
        assert_eq!(engine.speed_multiplier(Side::Player), 1.0);
    }

    #[test]
    fn test_speed_multipliers_compose() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        engine.activate(Side::Player, AbilityKind::SpeedUp, 0.0, &mut fx.targets());
        engine.activate(Side::Opponent, AbilityKind::SlowDown, 0.0, &mut fx.targets());
        engine.activate(Side::Opponent, AbilityKind::Chaos, 0.0, &mut fx.targets());
        let expected = SPEED_UP_MULTIPLIER * SLOW_MULTIPLIER * CHAOS_SPEED_MULTIPLIER;
        assert!((engine.speed_multiplier(Side::Player) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_size_up_and_chaos_stack_on_height() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        engine.activate(Side::Player, AbilityKind::SizeUp, 0.0, &mut fx.targets());
        engine.activate(Side::Opponent, AbilityKind::Chaos, 1.0, &mut fx.targets());
        let both = PADDLE_HEIGHT * SIZE_UP_MULTIPLIER * CHAOS_SIZE_MULTIPLIER;
        assert!((fx.paddles[0].height - both).abs() < 1e-4);

        // Chaos ends first, size-up still in force
        engine.update(4.0, &mut fx.targets());
        assert!((fx.paddles[0].height - PADDLE_HEIGHT * SIZE_UP_MULTIPLIER).abs() < 1e-4);

        engine.update(5.0, &mut fx.targets());
        assert_eq!(fx.paddles[0].height, PADDLE_HEIGHT);
    }

    #[test]
    fn test_stealth_peer_precedence() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        engine.activate(Side::Player, AbilityKind::Stealth, 0.0, &mut fx.targets());
        engine.activate(Side::Opponent, AbilityKind::Stealth, 1.0, &mut fx.targets());
        assert_eq!(fx.ball.color, Color::STEALTH);

        // Player's stealth ends, opponent's is still running
        engine.update(2.0, &mut fx.targets());
        assert_eq!(fx.ball.color, Color::STEALTH);

        engine.update(3.0, &mut fx.targets());
        assert_eq!(fx.ball.color, Color::DEFAULT);
    }

    #[test]
    fn test_powershot_charge_is_one_shot() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert!(engine.activate(Side::Player, AbilityKind::Powershot, 0.0, &mut fx.targets()));
        assert!(engine.powershot_ready(Side::Player));

        // Charge never expires on its own
        engine.update(100.0, &mut fx.targets());
        assert!(engine.powershot_ready(Side::Player));

        assert!(engine.take_powershot(Side::Player));
        assert!(!engine.take_powershot(Side::Player));
    }

    #[test]
    fn test_pending_powershot_blocks_reactivation() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        engine.activate(Side::Player, AbilityKind::Powershot, 0.0, &mut fx.targets());
        assert!(!engine.activate(Side::Player, AbilityKind::Powershot, 20.0, &mut fx.targets()));
        engine.take_powershot(Side::Player);
        assert!(engine.activate(Side::Player, AbilityKind::Powershot, 20.0, &mut fx.targets()));
    }

    #[test]
    fn test_pinpoint_snaps_and_clamps() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        fx.ball.pos = Vec2::new(600.0, 300.0);
        engine.activate(Side::Opponent, AbilityKind::Pinpoint, 0.0, &mut fx.targets());
        assert_eq!(fx.paddles[1].center_y(), 300.0);

        fx.ball.pos.y = 5.0;
        engine.activate(Side::Player, AbilityKind::Pinpoint, 0.0, &mut fx.targets());
        assert_eq!(fx.paddles[0].pos.y, 0.0);
    }

    #[test]
    fn test_cooldown_progress() {
        let mut fx = Fixture::new();
        let mut engine = PowerUpEngine::new();
        assert_eq!(engine.cooldown_progress(Side::Player, AbilityKind::SizeUp, 0.0), 1.0);
        engine.activate(Side::Player, AbilityKind::SizeUp, 0.0, &mut fx.targets());
        assert_eq!(engine.cooldown_progress(Side::Player, AbilityKind::SizeUp, 5.0), 0.5);
        assert_eq!(engine.cooldown_remaining(Side::Player, AbilityKind::SizeUp, 5.0), 5.0);
        assert_eq!(engine.cooldown_progress(Side::Player, AbilityKind::SizeUp, 12.0), 1.0);
        assert_eq!(engine.cooldown_remaining(Side::Player, AbilityKind::SizeUp, 12.0), 0.0);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(AbilityKind::from_menu_key('1'), Some(AbilityKind::SizeUp));
        assert_eq!(AbilityKind::from_menu_key('8'), Some(AbilityKind::Pinpoint));
        assert_eq!(AbilityKind::from_menu_key('0'), None);
        assert_eq!(AbilityKind::from_menu_key('9'), None);
        for kind in AbilityKind::ALL {
            assert_eq!(AbilityKind::from_menu_key(kind.menu_key()), Some(kind));
        }
    }
}
