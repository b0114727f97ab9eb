//! Lobshot entry point
//!
//! On wasm32 the page drives `platform::web::WebGame`; this binary is only
//! built to satisfy the compiler there. Natively it plays one demo round
//! headlessly and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lobshot::audio::SilentAudio;
    use lobshot::consts::*;
    use lobshot::persistence::Stores;
    use lobshot::platform;
    use lobshot::sim::{GameEvent, Vector2D, solve_aim};
    use lobshot::Game;

    /// One simulated frame
    const FRAME_MS: f64 = 16.0;
    /// Give up after this many shots
    const MAX_SHOTS: usize = 200;

    platform::init_logging();
    log::info!("Lobshot (native) starting...");
    log::info!("Native mode runs a headless demo round - serve the wasm build for the game");

    let mut now = platform::now_ms();
    let mut game = Game::new(Stores::in_memory(), Box::new(SilentAudio::default()), now as u64, now);

    for shot in 1..=MAX_SHOTS {
        let Some(target) = game.targets().targets().last().cloned() else {
            break;
        };
        let start = Vector2D::new(LAUNCH_X, game.config().ground_height);
        let Some(aim) = solve_aim(game.config(), start, &target, CANVAS_WIDTH) else {
            log::warn!("No shot reaches target {} at ({:.0}, {:.0})", target.id, target.x, target.y);
            break;
        };
        log::debug!(
            "Shot {shot}: target {} angle={} power={} (~{} ticks)",
            target.id,
            aim.angle,
            aim.power,
            aim.ticks
        );

        game.set_angle(aim.angle);
        game.set_power(aim.power);
        game.fire(now);

        while game.is_flying() {
            now += FRAME_MS;
            for event in game.tick(now) {
                match event {
                    GameEvent::TargetHit { target_id, points, hit_time, .. } => {
                        log::info!("Hit target {target_id} for {points} points after {hit_time:.2}s");
                    }
                    GameEvent::Miss { cause, position } => {
                        log::info!("Missed ({cause:?}) at ({:.0}, {:.0})", position.x, position.y);
                    }
                    GameEvent::RoundComplete { summary, achievements } => {
                        log::info!(
                            "Round complete: score={} high={} best combo={} accuracy={}%",
                            summary.final_score,
                            summary.high_score,
                            summary.best_combo,
                            summary.stats.accuracy
                        );
                        for achievement in achievements {
                            log::info!("{} {}", achievement.emoji(), achievement.title());
                        }
                    }
                    GameEvent::Sound { .. } => {}
                }
            }
        }

        if game.last_summary().is_some() {
            break;
        }
    }

    if game.last_summary().is_none() {
        log::warn!("Demo round ended with {} targets left", game.targets().len());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start
}
