//! Match simulation module
//!
//! All gameplay logic lives here. This module stays free of I/O:
//! - Time comes from an injected `Clock`
//! - Randomness comes from a seeded RNG
//! - Rendering reads `MatchSimulator::snapshot()` after `update()` returns

pub mod ai;
pub mod clock;
pub mod collision;
pub mod powerups;
pub mod simulator;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ai::{AiController, Difficulty};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{Rect, ball_hits_paddle};
pub use powerups::{AbilityKind, AbilitySpec, AbilityTarget, EffectTargets, PowerUpEngine, PowerUpState};
pub use simulator::MatchSimulator;
pub use snapshot::{AbilityRing, MatchSnapshot, RectView};
pub use state::{Ball, Color, MatchPhase, Paddle, Score, Side};
pub use tick::{SideInput, TickInput};
