//! Combat integration tests
//!
//! Полные сценарии через SimulationPlugin (headless backend):
//! - игрок убивает ranged врага тремя hitscan выстрелами
//! - снаряд врага ранит игрока
//! - melee враг убивает игрока, после чего становится Idle
//! - камера догоняет игрока, "вперёд" уводит игрока от камеры
//! - инварианты Health на длинном прогоне

use bevy::prelude::*;
use sidearm_simulation::config::{EnemyConfig, PlayerConfig, WeaponConfig};
use sidearm_simulation::spawn::{
    spawn_enemy, spawn_follow_camera, spawn_obstacle, spawn_player, spawn_player_with_camera,
};
use sidearm_simulation::test_support::{spawn_with, step, step_seconds};
use sidearm_simulation::*;

fn died_count(app: &App) -> usize {
    app.world()
        .resource::<Events<EntityDied>>()
        .iter_current_update_events()
        .count()
}

fn hold_fire(app: &mut App, player: Entity, seconds: f32) {
    let ticks = test_support::ticks_for(app, seconds);
    for _ in 0..ticks {
        if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
            input.fire_requested = true;
        }
        step(app);
    }
}

/// Test: 3 hitscan попадания убивают врага (maxHealth = 3), затем despawn через 0.5 сек
#[test]
fn test_player_kills_ranged_enemy_with_three_shots() {
    let config = GameConfig::default();
    let mut app = create_headless_app(config.clone());

    let player = spawn_with(&mut app, |commands| spawn_player(commands, &config, Vec3::ZERO, None));
    let enemy = spawn_with(&mut app, |commands| {
        spawn_enemy(commands, &config, &config.enemy, Vec3::new(0.0, 0.0, -12.0), player)
    });

    // fire_rate 0.5 → выстрелы в ~0.02, ~0.52, ~1.02 сек
    hold_fire(&mut app, player, 1.2);

    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);
    assert!(app.world().get::<Dead>(enemy).is_some());
    assert_eq!(died_count(&app), 1);

    // Дальнейшие выстрелы проходят сквозь мертвого (нет hurtbox) и не плодят смертей
    hold_fire(&mut app, player, 0.3);
    assert_eq!(died_count(&app), 1);

    step_seconds(&mut app, 0.5);
    assert!(app.world().get_entity(enemy).is_err());
    assert!(app.world().get::<Dead>(player).is_none());
}

/// Test: снаряд врага попадает в игрока ровно один раз
#[test]
fn test_enemy_projectile_damages_player() {
    let config = GameConfig::default();
    let mut app = create_headless_app(config.clone());

    let player = spawn_with(&mut app, |commands| spawn_player(commands, &config, Vec3::ZERO, None));
    spawn_with(&mut app, |commands| {
        spawn_enemy(commands, &config, &config.enemy, Vec3::new(0.0, 0.0, -8.0), player)
    });

    // Первый выстрел (t≈0) уходит мимо: враг ещё не развернулся.
    // Второй (t≈2.02) летит в игрока 0.36 сек.
    step_seconds(&mut app, 3.0);

    let health = app.world().get::<Health>(player).unwrap();
    assert_eq!(health.current, health.max - 1);
}

/// Test: projectile strategy, стена между стрелком и врагом
#[test]
fn test_projectile_stopped_by_obstacle() {
    let config = GameConfig {
        player_weapon: WeaponConfig {
            kind: WeaponKind::Projectile,
            ..WeaponConfig::pistol()
        },
        ..GameConfig::default()
    };
    let mut app = create_headless_app(config.clone());

    let player = spawn_with(&mut app, |commands| spawn_player(commands, &config, Vec3::ZERO, None));
    // Враг вне detection range: стоит на месте
    let enemy = spawn_with(&mut app, |commands| {
        spawn_enemy(commands, &config, &config.enemy, Vec3::new(0.0, 0.0, -20.0), player)
    });
    spawn_with(&mut app, |commands| {
        spawn_obstacle(commands, Vec3::new(0.0, 1.5, -6.0), Vec3::new(2.0, 1.5, 0.5))
    });

    hold_fire(&mut app, player, 0.1);
    step_seconds(&mut app, 2.0);

    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 3);
    let in_flight = app
        .world_mut()
        .query::<&Projectile>()
        .iter(app.world())
        .count();
    assert_eq!(in_flight, 0);
}

/// Test: melee враг добивает игрока, цель исчезает → враг Idle
#[test]
fn test_melee_enemy_kills_player_then_idles() {
    let config = GameConfig {
        player: PlayerConfig {
            max_health: 2,
            ..PlayerConfig::default()
        },
        ..GameConfig::default()
    };
    let mut app = create_headless_app(config.clone());

    let player = spawn_with(&mut app, |commands| spawn_player(commands, &config, Vec3::ZERO, None));
    let enemy = spawn_with(&mut app, |commands| {
        spawn_enemy(commands, &config, &EnemyConfig::melee(), Vec3::new(0.0, 0.0, -3.0), player)
    });

    // Удары в ~0.35 и ~1.35 сек
    step_seconds(&mut app, 1.6);
    assert!(app.world().get::<Dead>(player).is_some());

    // Мертвый игрок не реагирует на input
    let position = app.world().get::<Transform>(player).unwrap().translation;
    app.world_mut().get_mut::<PlayerInput>(player).unwrap().movement = Vec2::new(0.0, 1.0);
    step(&mut app);
    assert_eq!(app.world().get::<Transform>(player).unwrap().translation, position);

    step_seconds(&mut app, 1.0);
    assert!(app.world().get_entity(player).is_err());
    assert_eq!(*app.world().get::<AIState>(enemy).unwrap(), AIState::Idle);
}

/// Test: камера догоняет игрока и сохраняет offset
#[test]
fn test_camera_follows_player() {
    let config = GameConfig::default();
    let mut app = create_headless_app(config.clone());

    let (player, camera) =
        spawn_with(&mut app, |commands| spawn_player_with_camera(commands, &config, Vec3::ZERO));

    app.world_mut().get_mut::<PlayerInput>(player).unwrap().movement = Vec2::new(0.0, 1.0);
    step_seconds(&mut app, 1.0);

    let player_position = app.world().get::<Transform>(player).unwrap().translation;
    let camera_position = app.world().get::<Transform>(camera).unwrap().translation;
    let offset = Vec3::new(0.0, 2.0, 10.0);
    // Игрок ушёл вперёд, камера отстаёт (lag)
    assert!(player_position.z < -4.0);
    assert!(camera_position.z > player_position.z + offset.z);

    app.world_mut().get_mut::<PlayerInput>(player).unwrap().movement = Vec2::ZERO;
    step_seconds(&mut app, 2.0);

    let player_position = app.world().get::<Transform>(player).unwrap().translation;
    let camera_position = app.world().get::<Transform>(camera).unwrap().translation;
    assert!(camera_position.abs_diff_eq(player_position + offset, 1e-2));
    assert!(app.world().get::<Inert>(camera).is_none());
}

/// Test: камера без цели → Inert, позиция не меняется
#[test]
fn test_camera_without_target_is_inert() {
    let config = GameConfig::default();
    let mut app = create_headless_app(config.clone());

    let ghost = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(ghost);
    let camera = spawn_with(&mut app, |commands| {
        spawn_follow_camera(commands, &config, ghost, Vec3::ZERO)
    });

    step(&mut app);

    assert!(app.world().get::<Inert>(camera).is_some());
}

/// Test: камера стартует позади игрока и смотрит на него, "вперёд" уводит игрока от камеры
#[test]
fn test_forward_input_moves_player_away_from_camera() {
    let config = GameConfig::default();
    let mut app = create_headless_app(config.clone());

    let (player, camera) =
        spawn_with(&mut app, |commands| spawn_player_with_camera(commands, &config, Vec3::ZERO));

    let camera_transform = *app.world().get::<Transform>(camera).unwrap();
    assert!(camera_transform.translation.z > 0.0);
    let view = camera_transform.forward().as_vec3();
    assert!(view.z < 0.0 && view.y < 0.0, "view = {}", view);

    let start_distance = camera_transform.translation.xz().length();

    app.world_mut().get_mut::<PlayerInput>(player).unwrap().movement = Vec2::new(0.0, 1.0);
    step_seconds(&mut app, 0.5);

    let player_position = app.world().get::<Transform>(player).unwrap().translation;
    let camera_transform = *app.world().get::<Transform>(camera).unwrap();
    assert!(player_position.z < -2.0, "player z = {}", player_position.z);
    assert!(player_position.x.abs() < 1e-4);

    let to_player = player_position - camera_transform.translation;
    assert!(to_player.xz().length() > start_distance);
    // Игрок остаётся в поле зрения
    assert!(to_player.dot(camera_transform.forward().as_vec3()) > 0.0);
}

/// Test: health инварианты на полном сценарии (игрок + 2 врага, 10 сек)
#[test]
fn test_health_invariants_full_scenario() {
    let config = GameConfig::default();
    let mut app = create_headless_app(config.clone());

    let (player, _) =
        spawn_with(&mut app, |commands| spawn_player_with_camera(commands, &config, Vec3::ZERO));
    spawn_with(&mut app, |commands| {
        spawn_enemy(commands, &config, &config.enemy, Vec3::new(0.0, 0.0, -12.0), player);
        spawn_enemy(commands, &config, &EnemyConfig::melee(), Vec3::new(6.0, 0.0, -3.0), player);
    });

    for tick in 0..600 {
        if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
            input.fire_requested = tick % 30 == 0;
        }
        step(&mut app);

        let world = app.world_mut();
        let mut query = world.query::<(&Health, Has<Dead>)>();
        for (health, dead) in query.iter(world) {
            assert!(health.current <= health.max, "tick {}: health above max", tick);
            // Dead ⇔ HP == 0
            assert_eq!(dead, health.is_dead(), "tick {}: dead marker mismatch", tick);
        }
    }
}
