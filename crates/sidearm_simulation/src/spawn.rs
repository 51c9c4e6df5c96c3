//! Spawn helpers: собирают акторов из `GameConfig`
//!
//! Ссылки (цель врага, камера игрока) передаются явно: никакого поиска по тегам.

use bevy::prelude::*;

use crate::ai::EnemyAi;
use crate::camera::CameraFollow;
use crate::combat::{TracerLine, Weapon, WeaponKind};
use crate::components::{Actor, Affiliation, Enemy, Health, Player};
use crate::config::{EnemyAttackKind, EnemyConfig, GameConfig, WeaponConfig};
use crate::physics::{Hurtbox, Obstacle};
use crate::player::{PlayerController, Stamina};

fn weapon_bundle(config: &GameConfig, weapon: &WeaponConfig) -> (Weapon, Option<TracerLine>) {
    let tracer = (weapon.kind == WeaponKind::Hitscan).then(TracerLine::default);
    (Weapon::from_config(weapon, &config.projectile), tracer)
}

/// Игрок с оружием `player_weapon` (камера опциональна)
pub fn spawn_player(
    commands: &mut Commands,
    config: &GameConfig,
    position: Vec3,
    camera: Option<Entity>,
) -> Entity {
    let (weapon, tracer) = weapon_bundle(config, &config.player_weapon);

    let mut entity_commands = commands.spawn((
        Player,
        Actor::new(Affiliation::Player),
        Health::new(config.player.max_health),
        Transform::from_translation(position),
        PlayerController::from_config(camera, &config.player),
        Stamina::from_config(&config.player),
        Hurtbox::standing(config.world.actor_radius, config.world.actor_height),
        weapon,
    ));

    if let Some(tracer) = tracer {
        entity_commands.insert(tracer);
    }

    entity_commands.id()
}

/// Стартовая поза камеры: `target + offset`, взгляд на цель
///
/// Offset постоянный, поэтому ориентация не меняется и basis движения игрока
/// остаётся тем же на всём следовании.
pub fn follow_camera_transform(target_position: Vec3, offset: Vec3) -> Transform {
    Transform::from_translation(target_position + offset).looking_at(target_position, Vec3::Y)
}

fn follow_camera_bundle(config: &GameConfig, target: Entity, target_position: Vec3) -> (CameraFollow, Transform) {
    let follow = CameraFollow::from_config(target, &config.camera);
    let start = follow_camera_transform(target_position, follow.offset);
    (follow, start)
}

/// Камера, следующая за `target` (стартует сразу в `target_position + offset`, смотрит на цель)
pub fn spawn_follow_camera(
    commands: &mut Commands,
    config: &GameConfig,
    target: Entity,
    target_position: Vec3,
) -> Entity {
    commands
        .spawn(follow_camera_bundle(config, target, target_position))
        .id()
}

/// Игрок + камера, ссылающиеся друг на друга
///
/// Возвращает `(player, camera)`.
pub fn spawn_player_with_camera(
    commands: &mut Commands,
    config: &GameConfig,
    position: Vec3,
) -> (Entity, Entity) {
    let camera = commands.spawn_empty().id();
    let player = spawn_player(commands, config, position, Some(camera));

    commands
        .entity(camera)
        .insert(follow_camera_bundle(config, player, position));

    (player, camera)
}

/// Враг с целью `target`
///
/// Ranged враг получает оружие `enemy_weapon`, melee: без оружия.
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &GameConfig,
    enemy: &EnemyConfig,
    position: Vec3,
    target: Entity,
) -> Entity {
    let mut entity_commands = commands.spawn((
        Enemy,
        Actor::new(Affiliation::Enemy),
        Health::new(enemy.max_health),
        Transform::from_translation(position),
        EnemyAi::from_config(target, enemy),
        Hurtbox::standing(config.world.actor_radius, config.world.actor_height),
    ));

    if enemy.attack == EnemyAttackKind::Ranged {
        let (weapon, tracer) = weapon_bundle(config, &config.enemy_weapon);
        entity_commands.insert(weapon);
        if let Some(tracer) = tracer {
            entity_commands.insert(tracer);
        }
    }

    entity_commands.id()
}

/// Статичная стена/препятствие
pub fn spawn_obstacle(commands: &mut Commands, position: Vec3, half_extents: Vec3) -> Entity {
    commands
        .spawn((Obstacle { half_extents }, Transform::from_translation(position)))
        .id()
}
