//! Chaotic Pong headless runner
//!
//! Plays one match between a scripted left paddle and the bot on a manual
//! clock, logging the result. Usage:
//!
//! ```text
//! chaotic-pong [settings.json] [max_ticks]
//! ```

#[cfg(not(target_arch = "wasm32"))]
use chaotic_pong::{
    Settings,
    sim::{Clock, ManualClock, MatchSimulator, Side, SideInput, TickInput},
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SETTINGS_PATH: &str = "chaotic_pong_settings.json";
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 10;
/// Fixed frame step (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const TICK_SECONDS: f64 = 1.0 / 60.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chaotic Pong (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let max_ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(ticks)) => ticks,
        Some(Err(e)) => {
            log::warn!("Invalid tick limit ({}), using {}", e, DEFAULT_MAX_TICKS);
            DEFAULT_MAX_TICKS
        }
        None => DEFAULT_MAX_TICKS,
    };

    let settings = Settings::load(std::path::Path::new(&settings_path));
    let clock = ManualClock::new(0.0);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut sim = match MatchSimulator::new(settings, clock.clone(), seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Cannot start match: {}", e);
            std::process::exit(1);
        }
    };
    sim.start();

    let mut ticks = 0;
    while sim.is_running() && ticks < max_ticks {
        let input = TickInput {
            player: scripted_player(&sim, ticks),
            opponent: SideInput::default(),
        };
        sim.update(&input);
        clock.advance(TICK_SECONDS);
        ticks += 1;

        if ticks % 600 == 0 {
            let score = sim.score();
            log::debug!("t={:.0}s score {}-{}", clock.now(), score.player, score.opponent);
        }
    }

    let score = sim.score();
    match sim.winner_message() {
        Some(message) => log::info!("{} ({}-{} after {} ticks)", message, score.player, score.opponent, ticks),
        None => log::info!(
            "Stopped after {} ticks without a winner ({}-{})",
            ticks,
            score.player,
            score.opponent
        ),
    }
    println!("{}-{}", score.player, score.opponent);
}

/// Follow the ball and fire every enabled ability whenever it is ready
#[cfg(not(target_arch = "wasm32"))]
fn scripted_player(sim: &MatchSimulator<ManualClock>, tick: u64) -> SideInput {
    let paddle = sim.paddle(Side::Player);
    let ball = sim.ball();
    let ball_center = ball.pos.y + ball.size / 2.0;
    let delta = ball_center - paddle.center_y();

    let mut input = SideInput {
        up: delta < -paddle.height / 4.0,
        down: delta > paddle.height / 4.0,
        abilities: Vec::new(),
    };
    // Spread requests out so the log stays readable
    if tick % 30 == 0 {
        input.abilities = sim.abilities().iter().copied().collect();
    }
    input
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Nothing to run headless in the browser
}
