//! Headless симуляция SIDEARM
//!
//! Игрок против ranged + melee врага, input по скрипту, без рендера.
//!
//! Usage: sidearm_simulation [--config <path.ron>] [--rapier] [--ticks <n>]

use std::path::PathBuf;

use bevy::prelude::*;
use thiserror::Error;

use sidearm_simulation::config::EnemyConfig;
use sidearm_simulation::spawn::{spawn_enemy, spawn_obstacle, spawn_player_with_camera};
use sidearm_simulation::{
    advance_tick, create_headless_app, init_logger, log_error, log_info, Enemy, GameConfig, Health,
    PlayerInput, Projectile, RapierHostPlugin,
};

const DEFAULT_TICKS: usize = 600;

#[derive(Debug, Error)]
enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("invalid tick count: {0}")]
    InvalidTicks(String),

    #[error("unknown argument: {0}")]
    Unknown(String),
}

#[derive(Debug, Default)]
struct RunOptions {
    config_path: Option<PathBuf>,
    rapier: bool,
    ticks: Option<usize>,
}

impl RunOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut options = RunOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or(ArgsError::MissingValue("--config"))?;
                    options.config_path = Some(PathBuf::from(path));
                }
                "--ticks" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--ticks"))?;
                    let ticks = value.parse().map_err(|_| ArgsError::InvalidTicks(value))?;
                    options.ticks = Some(ticks);
                }
                "--rapier" => options.rapier = true,
                _ => return Err(ArgsError::Unknown(arg)),
            }
        }

        Ok(options)
    }
}

/// Скриптованный input игрока на тик
fn scripted_input(tick: usize, input: &mut PlayerInput) {
    // Стреляем каждые полсекунды
    input.fire_requested |= tick % 30 == 0;
    input.jump_requested |= tick == 120;

    input.movement = match tick {
        200..=259 => Vec2::new(1.0, 0.0),
        260..=319 => Vec2::new(-1.0, 0.0),
        _ => Vec2::ZERO,
    };
    input.sprint = (260..=319).contains(&tick);
}

fn main() {
    init_logger();

    let options = match RunOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            log_error(&format!("{err}"));
            std::process::exit(2);
        }
    };

    let config = match &options.config_path {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("{}: {err}", path.display()));
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let ticks = options.ticks.unwrap_or(DEFAULT_TICKS);
    log_info(&format!(
        "Starting SIDEARM headless simulation ({} ticks, backend: {})",
        ticks,
        if options.rapier { "rapier" } else { "headless" }
    ));

    let mut app = create_headless_app(config.clone());
    if options.rapier {
        app.add_plugins(RapierHostPlugin);
    }
    app.finish();
    app.cleanup();
    // Startup schedules (rapier context, пол)
    app.update();

    let world = app.world_mut();
    let player = {
        let mut commands = world.commands();
        let (player, _camera) = spawn_player_with_camera(&mut commands, &config, Vec3::ZERO);
        spawn_enemy(&mut commands, &config, &config.enemy, Vec3::new(0.0, 0.0, -12.0), player);
        spawn_enemy(&mut commands, &config, &EnemyConfig::melee(), Vec3::new(6.0, 0.0, -3.0), player);
        spawn_obstacle(&mut commands, Vec3::new(-4.0, 1.5, -6.0), Vec3::new(1.0, 1.5, 1.0));
        player
    };
    world.flush();

    for tick in 0..ticks {
        if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
            scripted_input(tick, &mut input);
        }

        advance_tick(&mut app);
        // Transform propagation (GlobalTransform для rapier)
        app.world_mut().run_schedule(PostUpdate);

        if tick % 60 == 0 {
            log_info(&format!("Tick {}: {}", tick, summary(&mut app, player)));
        }
    }

    log_info(&format!("Simulation complete: {}", summary(&mut app, player)));
}

fn summary(app: &mut App, player: Entity) -> String {
    let world = app.world_mut();

    let player_health = world
        .get::<Health>(player)
        .map(|health| format!("{}/{}", health.current, health.max))
        .unwrap_or_else(|| "despawned".to_string());

    let enemies = world
        .query_filtered::<&Health, With<Enemy>>()
        .iter(world)
        .filter(|health| health.is_alive())
        .count();

    let projectiles = world.query::<&Projectile>().iter(world).count();

    format!(
        "player HP {}, enemies alive {}, projectiles in flight {}",
        player_health, enemies, projectiles
    )
}
