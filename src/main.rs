//! Air Hockey entry point
//!
//! Runs a headless demo match between two scripted players at 60 fps.
//!
//! Usage: `air-hockey [settings.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use air_hockey::Settings;
    use air_hockey::renderer::NullRenderer;
    use air_hockey::sim::{Match, Stat, Winner};

    env_logger::init();
    log::info!("Air Hockey (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let mut game = Match::new(settings);
    let mut stat = Stat::default();
    let mut renderer = NullRenderer;

    for _ in 0..frames {
        let keys = demo::autopilot(game.field());
        let winner = game.step(&stat, &keys, &mut renderer);
        if winner != Winner::None {
            stat.record(winner);
            log::info!("Score: blue {} - red {}", stat.blue, stat.red);
            game.soft_reset();
        }
    }

    println!("Final score: blue {} - red {}", stat.blue, stat.red);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the product
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use air_hockey::platform::{HeldKeys, Key};
    use air_hockey::sim::{Color, Field};

    /// Dead zone so bats settle instead of twitching around the target
    const SLACK: f32 = 4.0;

    struct Controls {
        left: Key,
        right: Key,
        up: Key,
        down: Key,
        swap: Key,
    }

    const BLUE: Controls = Controls {
        left: Key::A,
        right: Key::D,
        up: Key::W,
        down: Key::S,
        swap: Key::F,
    };
    const RED: Controls = Controls {
        left: Key::Left,
        right: Key::Right,
        up: Key::Up,
        down: Key::Down,
        swap: Key::K,
    };

    /// Both sides hand control to whichever bat is closer to the puck and
    /// drive it at the puck from their own goal's side
    pub fn autopilot(field: &Field) -> HeldKeys {
        let mut keys = HeldKeys::new();
        drive(field, Color::Blue, &BLUE, &mut keys);
        drive(field, Color::Red, &RED, &mut keys);
        keys
    }

    fn drive(field: &Field, color: Color, controls: &Controls, keys: &mut HeldKeys) {
        let puck = field.puck.body.pos;
        let active = field.active(color);
        let mine = field.bat(color, active).body.pos;
        let other = field.bat(color, active.other()).body.pos;
        if other.distance(puck) + 2.0 * SLACK < mine.distance(puck) {
            keys.press(controls.swap);
        }

        // Aim slightly behind the puck so hits send it toward the far goal
        let behind = match color {
            Color::Blue => -field.puck.radius(),
            Color::Red => field.puck.radius(),
        };
        let target = puck + glam::Vec2::new(behind, 0.0);
        let to = target - mine;
        if to.x < -SLACK {
            keys.press(controls.left);
        } else if to.x > SLACK {
            keys.press(controls.right);
        }
        if to.y < -SLACK {
            keys.press(controls.up);
        } else if to.y > SLACK {
            keys.press(controls.down);
        }
    }
}
