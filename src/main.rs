//! SIDESCROLL: a small fixed-timestep platformer runtime
//!
//! Entities are bags of composable traits, levels are layer pipelines,
//! and the simulation always steps at 1/60s regardless of frame rate.
//! This binary wires the runtime to macroquad: keyboard in, colored
//! boxes out, one RON level loaded from assets/levels/.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod audio;
mod game;
mod input;
mod math;
mod render;
mod world;

use macroquad::prelude::{get_time, next_frame, Conf};

use audio::NullAudio;
use game::traits::{Fallout, FalloutAction, Gravity, Jump, Patrol, PlayerController, Velocity, Walk};
use game::{Camera, Clock, DashboardLayer, Entity, EntityFactory, Events, FixedTimer, GameContext};
use input::InputState;
use math::Size;
use render::ScreenSurface;
use world::{build_level, load_level_file};

const VIEW_WIDTH: f32 = 512.0;
const VIEW_HEIGHT: f32 = 480.0;

const PLAYER_WALK_SPEED: f32 = 120.0;
const PLAYER_JUMP_SPEED: f32 = 380.0;
const WALKER_SPEED: f32 = 40.0;

/// Wall clock for the fixed timer, backed by macroquad's frame time
struct FrameClock;

impl Clock for FrameClock {
    fn sample(&mut self) -> Option<f64> {
        Some(get_time())
    }
}

/// Register the standard entity kinds.
///
/// Trait order is update order: intent traits (walk, jump, patrol)
/// write velocity, gravity adds to it, velocity integrates position,
/// fallout checks the result.
fn build_factory(gravity: f32, fallout_line: f32) -> EntityFactory {
    let mut factory = EntityFactory::new();

    factory.register("player", move || {
        let mut e = Entity::new("player");
        e.state_mut().size = Size::new(14.0, 16.0);
        e.add_trait(Box::new(Walk::new(PLAYER_WALK_SPEED)));
        e.add_trait(Box::new(Jump::new(PLAYER_JUMP_SPEED)));
        e.add_trait(Box::new(Gravity::new(gravity)));
        e.add_trait(Box::new(Velocity));
        e.add_trait(Box::new(Fallout::new(fallout_line, FalloutAction::Report)));
        e
    });

    factory.register("walker", move || {
        let mut e = Entity::new("walker");
        e.state_mut().size = Size::new(16.0, 16.0);
        e.add_trait(Box::new(Patrol::new(WALKER_SPEED)));
        e.add_trait(Box::new(Gravity::new(gravity)));
        e.add_trait(Box::new(Velocity));
        e.add_trait(Box::new(Fallout::new(fallout_line, FalloutAction::Remove)));
        e
    });

    factory
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("SIDESCROLL v{}", VERSION),
        window_width: VIEW_WIDTH as i32,
        window_height: VIEW_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let file = match load_level_file("assets/levels/1-1.ron") {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to load level: {}", e);
            return;
        }
    };

    // The fallout line sits one screen below the tile grid
    let fallout_line = file.rows.len() as f32 * file.tile_size + VIEW_HEIGHT;
    let factory = build_factory(file.gravity, fallout_line);

    let viewport = Size::new(VIEW_WIDTH, VIEW_HEIGHT);
    let mut loaded = match build_level(&file, &factory, viewport) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to build level: {}", e);
            return;
        }
    };

    // The player and its controller env are inserted by hand so the
    // driver keeps the handle for input and the camera
    let player_id = {
        let mut player = match factory.create("player") {
            Some(p) => p,
            None => {
                eprintln!("Entity factory has no player");
                return;
            }
        };
        player.state_mut().pos = loaded.player_start;
        loaded.level.stage_mut().insert(player)
    };
    {
        let mut env = Entity::new("player-env");
        let mut controller = PlayerController::new(player_id);
        controller.checkpoint = loaded.player_start;
        env.add_trait(Box::new(controller));
        loaded.level.stage_mut().insert(env);
    }

    loaded.level.push_layer(Box::new(DashboardLayer::new(file.name.as_str())));

    let mut camera = Camera::new(viewport, loaded.camera_bounds);
    let mut input = InputState::new();
    let mut surface = ScreenSurface;
    let mut audio = NullAudio;
    let mut events = Events::new();

    let mut clock = FrameClock;
    let mut timer = FixedTimer::default();
    if let Err(e) = timer.start(&mut clock) {
        eprintln!("Failed to start timer: {}", e);
        return;
    }

    loop {
        input.poll();
        if let Some(player) = loaded.level.stage_mut().entity_mut(player_id) {
            input.apply(player);
        }

        let level = &mut loaded.level;
        let result = timer.tick(&mut clock, |dt| {
            let mut ctx = GameContext::new(dt, &mut audio, &mut events);
            level.update(&mut ctx)
        });
        if let Err(e) = result {
            // A failed step leaves the remaining accumulated time
            // queued; report it and keep the game running
            eprintln!("Step failed: {}", e);
        }

        if let Some(player) = loaded.level.stage().entity(player_id) {
            camera.follow(player.state().pos);
        }

        loaded.level.draw(&mut surface, &camera);
        next_frame().await;
    }
}
