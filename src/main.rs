//! Headless runner
//!
//! Plays a short scripted run (hold right, hop every so often) through the
//! real frame loop and prints the last frame as text.
//!
//! Usage: brick-dash [settings.json] [frames]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use brick_dash::renderer::AsciiSurface;
    use brick_dash::sim::GameEvent;
    use brick_dash::{Action, GameLoop, Settings};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings_path = args.iter().find(|a| a.ends_with(".json"));
    let frames: u32 = args
        .iter()
        .find_map(|a| a.parse().ok())
        .unwrap_or(600);

    let settings = Settings::load(settings_path.map(Path::new));
    log::info!("Brick Dash (headless) starting, {frames} frames");

    let mut game = GameLoop::new(settings);
    let mut surface = AsciiSurface::new();
    let mut coins = 0u32;
    let mut stomps = 0u32;

    game.start();
    game.handle_input(Action::Confirm, true);
    game.handle_input(Action::MoveRight, true);
    game.handle_input(Action::Run, true);

    for frame in 0..frames {
        // Hold jump for a third of every second
        game.handle_input(Action::Jump, frame % 60 < 20);
        game.frame(f64::from(frame) * 16.0, &mut surface);

        for event in &game.state.events {
            match event {
                GameEvent::Coin => coins += 1,
                GameEvent::Stomp => stomps += 1,
                _ => {}
            }
        }
    }
    game.stop();

    print!("{surface}");
    let hud = game.state.hud();
    println!(
        "world {}  score {}  coins {}  lives {}  time {}  phase {:?}",
        hud.level_name, hud.score, hud.coins, hud.lives, hud.time, game.state.phase
    );
    println!("coin events {coins}, stomps {stomps}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives GameLoop directly
}
