//! Tests for enemy behavior and reference validation.

use bevy::prelude::*;

use crate::ai::systems::within_melee_reach;
use crate::ai::AIState;
use crate::combat::{Dead, TriggerPulled};
use crate::components::{Actor, Affiliation, Health, Inert, ReferenceError};
use crate::config::{EnemyAttackKind, EnemyConfig, GameConfig};
use crate::create_headless_app;
use crate::physics::Hurtbox;
use crate::spawn::spawn_enemy;
use crate::test_support::{spawn_with, step, step_seconds};

const EPS: f32 = 0.01;

fn setup() -> (App, Entity) {
    let mut app = create_headless_app(GameConfig::default());
    let player = app
        .world_mut()
        .spawn((
            Actor::new(Affiliation::Player),
            Health::new(100),
            Transform::default(),
            Hurtbox::default(),
        ))
        .id();
    (app, player)
}

fn enemy_at(app: &mut App, enemy: &EnemyConfig, position: Vec3, target: Entity) -> Entity {
    let config = app.world().resource::<GameConfig>().clone();
    spawn_with(app, |commands| spawn_enemy(commands, &config, enemy, position, target))
}

fn triggers(app: &App) -> usize {
    app.world()
        .resource::<Events<TriggerPulled>>()
        .iter_current_update_events()
        .count()
}

#[test]
fn test_beyond_detection_range_does_nothing() {
    let (mut app, player) = setup();
    let start = Vec3::new(0.0, 0.0, -(15.0 + EPS));
    let enemy = enemy_at(&mut app, &EnemyConfig::default(), start, player);

    step(&mut app);

    let transform = app.world().get::<Transform>(enemy).unwrap();
    assert_eq!(transform.translation, start);
    assert_eq!(transform.rotation, Quat::IDENTITY);
    assert_eq!(*app.world().get::<AIState>(enemy).unwrap(), AIState::Idle);
    assert_eq!(triggers(&app), 0);
}

#[test]
fn test_inside_attack_range_attacks_without_moving() {
    let (mut app, player) = setup();
    let start = Vec3::new(0.0, 0.0, -(10.0 - EPS));
    let enemy = enemy_at(&mut app, &EnemyConfig::default(), start, player);

    step(&mut app);

    let transform = app.world().get::<Transform>(enemy).unwrap();
    assert_eq!(transform.translation, start);
    // Поворачивается к цели
    assert_ne!(transform.rotation, Quat::IDENTITY);
    assert_eq!(*app.world().get::<AIState>(enemy).unwrap(), AIState::Attacking);
    assert_eq!(triggers(&app), 1);
}

#[test]
fn test_chasing_moves_toward_target_horizontally() {
    let (mut app, player) = setup();
    let start = Vec3::new(12.0, 0.0, 0.0);
    let enemy = enemy_at(&mut app, &EnemyConfig::default(), start, player);

    step(&mut app);

    let position = app.world().get::<Transform>(enemy).unwrap().translation;
    let expected = start - Vec3::X * 3.0 / 60.0;
    assert!(position.abs_diff_eq(expected, 1e-5), "{}", position);
    assert_eq!(*app.world().get::<AIState>(enemy).unwrap(), AIState::Chasing);
    assert_eq!(triggers(&app), 0);
}

#[test]
fn test_chasing_ignores_height_difference() {
    let (mut app, player) = setup();
    let start = Vec3::new(0.0, 3.0, -12.0);
    let enemy = enemy_at(&mut app, &EnemyConfig::default(), start, player);

    step(&mut app);

    let position = app.world().get::<Transform>(enemy).unwrap().translation;
    assert_eq!(position.y, 3.0);
    assert!((position.z - (-12.0 + 3.0 / 60.0)).abs() < 1e-5);
}

#[test]
fn test_melee_enemy_stops_at_stand_off_and_strikes() {
    let (mut app, player) = setup();
    let enemy = enemy_at(&mut app, &EnemyConfig::melee(), Vec3::new(0.0, 0.0, -4.0), player);

    step_seconds(&mut app, 3.0);

    // Внутри attack_range (2.0) продолжает сближение до stand-off (1.5)
    let position = app.world().get::<Transform>(enemy).unwrap().translation;
    let distance = position.length();
    assert!((distance - 1.5).abs() < 1e-3, "distance = {}", distance);

    // Дошёл за ~0.83 сек, удары в ~0.85, 1.85, 2.85 сек (melee_rate = 1.0)
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 97);
    // Melee не пользуется оружием
    assert_eq!(triggers(&app), 0);
}

#[test]
fn test_melee_enemy_with_wide_attack_range_closes_in_before_striking() {
    let (mut app, player) = setup();
    let melee = EnemyConfig {
        attack: EnemyAttackKind::Melee,
        ..EnemyConfig::default()
    };
    assert!(GameConfig {
        enemy: melee.clone(),
        ..GameConfig::default()
    }
    .validate()
    .is_ok());

    // attack_range = 10: сразу Attacking, но до цели 9 м
    let enemy = enemy_at(&mut app, &melee, Vec3::new(0.0, 0.0, -9.0), player);

    step_seconds(&mut app, 2.0);

    let distance = app.world().get::<Transform>(enemy).unwrap().translation.length();
    assert!((distance - 3.0).abs() < 1e-3, "distance = {}", distance);
    assert_eq!(*app.world().get::<AIState>(enemy).unwrap(), AIState::Attacking);
    // Издалека не бьёт
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 100);

    // 7.5 м при 3 m/s = 2.5 сек, затем удары в ~2.52 и ~3.52 сек
    step_seconds(&mut app, 2.0);

    let distance = app.world().get::<Transform>(enemy).unwrap().translation.length();
    assert!((distance - 1.5).abs() < 1e-3, "distance = {}", distance);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 98);
}

#[test]
fn test_melee_reach_uses_horizontal_distance() {
    assert!(within_melee_reach(Vec3::new(0.0, 0.0, -1.5), 1.5));
    assert!(within_melee_reach(Vec3::new(0.0, 5.0, -1.505), 1.5));
    assert!(!within_melee_reach(Vec3::new(0.0, 0.0, -1.6), 1.5));
}

#[test]
fn test_dead_target_makes_enemy_idle() {
    let (mut app, player) = setup();
    app.world_mut().entity_mut(player).insert(Dead);
    let start = Vec3::new(0.0, 0.0, -5.0);
    let enemy = enemy_at(&mut app, &EnemyConfig::default(), start, player);

    step(&mut app);

    assert_eq!(app.world().get::<Transform>(enemy).unwrap().translation, start);
    assert_eq!(*app.world().get::<AIState>(enemy).unwrap(), AIState::Idle);
    assert_eq!(triggers(&app), 0);
}

#[test]
fn test_missing_target_marks_enemy_inert() {
    let (mut app, _) = setup();
    let ghost = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(ghost);

    let start = Vec3::new(0.0, 0.0, -5.0);
    let enemy = enemy_at(&mut app, &EnemyConfig::default(), start, ghost);

    step(&mut app);

    let inert = app.world().get::<Inert>(enemy).unwrap();
    assert_eq!(inert.0, ReferenceError::TargetNotFound(ghost));
    assert_eq!(app.world().get::<Transform>(enemy).unwrap().translation, start);
}

#[test]
fn test_ranged_enemy_without_weapon_is_inert() {
    let (mut app, player) = setup();
    let enemy = enemy_at(&mut app, &EnemyConfig::default(), Vec3::new(0.0, 0.0, -5.0), player);
    app.world_mut().entity_mut(enemy).remove::<crate::combat::Weapon>();

    step(&mut app);

    let inert = app.world().get::<Inert>(enemy).unwrap();
    assert_eq!(inert.0, ReferenceError::WeaponNotAssigned);
    assert_eq!(triggers(&app), 0);
}

#[test]
fn test_ranged_enemy_without_fire_point_is_inert() {
    let (mut app, player) = setup();
    let config = GameConfig {
        enemy_weapon: crate::config::WeaponConfig {
            fire_point: None,
            ..crate::config::WeaponConfig::enemy_launcher()
        },
        ..GameConfig::default()
    };
    let enemy = spawn_with(&mut app, |commands| {
        spawn_enemy(commands, &config, &config.enemy, Vec3::new(0.0, 0.0, -5.0), player)
    });

    step(&mut app);

    let inert = app.world().get::<Inert>(enemy).unwrap();
    assert_eq!(inert.0, ReferenceError::FirePointNotAssigned);
}
