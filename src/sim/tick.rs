//! Per-frame simulation step
//!
//! One call to `Match::step` is one rendered frame: wind, bat steering, then a
//! fixed number of physics substeps so a fast puck cannot jump through a bat.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::{Board, Color};
use super::collision::{reflect_off_bat, reflect_off_board, uncollide};
use super::state::{Field, Stat, Winner};
use crate::Settings;
use crate::platform::{Clock, Key, KeyState, SystemClock};
use crate::renderer::{FrameView, Renderer, ScoreLayout};

/// Direction keys per side
const BLUE_MOVES: [(Key, Vec2); 4] = [
    (Key::A, Vec2::NEG_X),
    (Key::D, Vec2::X),
    (Key::W, Vec2::NEG_Y),
    (Key::S, Vec2::Y),
];
const RED_MOVES: [(Key, Vec2); 4] = [
    (Key::Left, Vec2::NEG_X),
    (Key::Right, Vec2::X),
    (Key::Up, Vec2::NEG_Y),
    (Key::Down, Vec2::Y),
];

/// A live match: owns the table, the wind RNG and the frame clock
#[derive(Debug)]
pub struct Match<C: Clock = SystemClock> {
    settings: Settings,
    field: Field,
    rng: Pcg32,
    clock: C,
    /// When the wind last changed
    wind_ms: u64,
    /// Start of the previous rendered frame
    prev_ms: u64,
    /// Swap keys as seen last frame, for edge detection
    prev_blue_swap: bool,
    prev_red_swap: bool,
}

impl Match<SystemClock> {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, SystemClock::new())
    }
}

impl<C: Clock> Match<C> {
    pub fn with_clock(settings: Settings, mut clock: C) -> Self {
        assert!(settings.substeps > 0, "a frame needs at least one substep");
        assert!(
            settings.bat_mass > 0.0 && settings.puck_mass > 0.0,
            "masses must be positive, got bat {} puck {}",
            settings.bat_mass,
            settings.puck_mass
        );
        assert!(settings.bat_push >= 0.0, "negative bat push {}", settings.bat_push);
        assert!(settings.frame_ms >= 0.0, "negative frame time {}", settings.frame_ms);
        let now = clock.now_ms();
        Self {
            field: Field::new(Board::default(), &settings),
            rng: Pcg32::seed_from_u64(settings.seed),
            clock,
            wind_ms: now,
            prev_ms: now,
            prev_blue_swap: false,
            prev_red_swap: false,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Copy of the whole table state
    pub fn snapshot(&self) -> Field {
        self.field.clone()
    }

    /// Put every piece back on its spot after a goal
    ///
    /// The swap-key edge state is kept: it mirrors keys that may still be held.
    pub fn soft_reset(&mut self) {
        self.field = Field::new(self.field.board.clone(), &self.settings);
        let now = self.clock.now_ms();
        self.wind_ms = now;
        self.prev_ms = now;
        log::debug!("Soft reset at {} ms", now);
    }

    /// Advance one frame
    ///
    /// Returns as soon as a goal is scored, without drawing. Otherwise the frame
    /// is rendered and the call blocks until `frame_ms` has passed since it began.
    pub fn step<K: KeyState + ?Sized>(
        &mut self,
        stat: &Stat,
        keys: &K,
        renderer: &mut dyn Renderer,
    ) -> Winner {
        let cur_ms = self.clock.now_ms();

        let winner = self.simulate(cur_ms, keys);
        if winner != Winner::None {
            return winner;
        }

        renderer.render(&self.frame_view(stat));

        self.limit_frame_rate(cur_ms);
        self.prev_ms = cur_ms;

        Winner::None
    }

    /// Physics for the frame ending at `cur_ms`, no rendering or pacing
    pub fn simulate<K: KeyState + ?Sized>(&mut self, cur_ms: u64, keys: &K) -> Winner {
        let delta_ms = cur_ms.saturating_sub(self.prev_ms) as f32;

        if cur_ms.saturating_sub(self.wind_ms) > self.settings.wind_period_ms {
            self.wind_ms = cur_ms;
            self.field.wind.reroll(&mut self.rng);
            log::debug!("Wind rate now {:.3}", self.field.wind.rate());
        }
        let gust = self.field.wind.impulse(delta_ms);
        self.field.puck.body.add_velocity(gust);

        self.handle_swaps(keys);
        self.steer(Color::Blue, &BLUE_MOVES, keys);
        self.steer(Color::Red, &RED_MOVES, keys);

        let dt = self.settings.substep_ms(delta_ms);
        for _ in 0..self.settings.substeps {
            let winner = self.substep(dt);
            if winner != Winner::None {
                log::info!("Goal! {:?} scores", winner);
                return winner;
            }
        }

        Winner::None
    }

    /// One physics slice: move, check goals, reflect, de-penetrate
    pub fn substep(&mut self, dt: f32) -> Winner {
        let Field {
            board,
            bats,
            puck,
            active_red,
            active_blue,
            ..
        } = &mut self.field;

        bats[Field::bat_index(Color::Blue, *active_blue)].body.step(dt);
        bats[Field::bat_index(Color::Red, *active_red)].body.step(dt);
        puck.body.step(dt);

        for defender in [Color::Blue, Color::Red] {
            if board.does_puck_collide_with_goal(defender, puck) {
                return Winner::scored_against(defender);
            }
        }

        for bat in bats.iter() {
            reflect_off_bat(puck, bat, self.settings.bat_push);
        }
        reflect_off_board(puck, board);

        uncollide(bats, puck, board, &self.settings);

        Winner::None
    }

    /// Toggle a side's active bat on the press edge of its swap key
    fn handle_swaps<K: KeyState + ?Sized>(&mut self, keys: &K) {
        let blue = keys.is_triggered(Key::F);
        let red = keys.is_triggered(Key::K);
        if blue && !self.prev_blue_swap {
            self.field.swap_active(Color::Blue);
        }
        if red && !self.prev_red_swap {
            self.field.swap_active(Color::Red);
        }
        self.prev_blue_swap = blue;
        self.prev_red_swap = red;
    }

    /// Stop both bats of a side, then push the active one per held key
    fn steer<K: KeyState + ?Sized>(&mut self, color: Color, moves: &[(Key, Vec2)], keys: &K) {
        for bat in self.field.bats.iter_mut().filter(|b| b.color() == color) {
            bat.body.set_velocity(Vec2::ZERO);
        }
        let impulse = self.settings.bat_key_impulse;
        let bat = self.field.active_bat_mut(color);
        for (key, dir) in moves {
            if keys.is_triggered(*key) {
                bat.body.add_velocity(*dir * impulse);
            }
        }
    }

    fn frame_view<'a>(&'a self, stat: &'a Stat) -> FrameView<'a> {
        FrameView {
            board: &self.field.board,
            bats: &self.field.bats,
            puck: &self.field.puck,
            wind: &self.field.wind,
            stat,
            scores: ScoreLayout::for_board(&self.field.board),
        }
    }

    /// Block until at least `frame_ms` has passed since `frame_start`
    fn limit_frame_rate(&mut self, frame_start: u64) {
        loop {
            let elapsed = self.clock.now_ms().saturating_sub(frame_start) as f32;
            let remaining = self.settings.frame_ms - elapsed;
            if remaining <= 0.0 {
                break;
            }
            self.clock.sleep_ms(remaining.ceil() as u64);
        }
    }
}
