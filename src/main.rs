//! Lane Rush entry point
//!
//! The browser host drives the wasm build (see `lane_rush::wasm_init`).
//! Natively this runs a short scripted session against the core: an
//! end-to-end exercise of the public API with logging, standing in for the
//! display-synchronized host.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use lane_rush::highscore::FileScoreStore;
    use lane_rush::input::Dir;
    use lane_rush::{DeviceProfile, Game, InputBuffer, Renderer, Services, Settings, Snapshot};

    /// Headless stand-in for the drawing surface
    #[derive(Default)]
    struct LogRenderer {
        frames: u32,
    }

    impl Renderer for LogRenderer {
        fn draw(&mut self, snapshot: &Snapshot<'_>) {
            self.frames += 1;
            if snapshot.flash_active {
                log::debug!(
                    "frame {}: flash on, shake {:?}",
                    self.frames,
                    snapshot.shake_offset
                );
            }
        }
    }

    env_logger::init();
    log::info!("Lane Rush (native) starting...");

    let mut services = Services::null();
    services.store = Box::new(FileScoreStore::new("lane-rush-highscore.json"));
    let mut game = Game::new(DeviceProfile::desktop(), 0xC0FFEE, Settings::load(), services);

    game.start();
    let mut renderer = LogRenderer::default();
    let mut input = InputBuffer::new();
    input.press(Dir::Right);

    let mut ticks = 0u32;
    while ticks < 3600 {
        let sample = input.sample();
        let keep_going = game.tick(&sample);
        game.draw(&mut renderer);
        if !keep_going {
            break;
        }
        ticks += 1;
        match ticks {
            600 => {
                input.release(Dir::Right);
                input.press(Dir::Left);
            }
            1200 => {
                input.release(Dir::Left);
                input.swipe(Vec2::new(0.0, -80.0));
            }
            2000 => input.swipe(Vec2::new(120.0, 10.0)),
            _ => {}
        }
    }

    let snap = game.snapshot();
    log::info!("stopped after {ticks} ticks in phase {:?}", game.phase());
    match serde_json::to_string(&snap) {
        Ok(json) => log::debug!("final snapshot: {json}"),
        Err(e) => log::warn!("snapshot serialization failed: {e}"),
    }
    println!(
        "score {} / level {} / lives {} / best {} / {} km/h",
        game.state().score,
        game.state().level,
        game.state().lives,
        game.high_score(),
        snap.speedometer_kmh()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm entry point is `lane_rush::wasm_init`; nothing to do here.
}
