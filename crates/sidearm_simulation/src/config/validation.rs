//! Validation rules для `GameConfig`

use super::{CameraConfig, ConfigError, EnemyAttackKind, EnemyConfig, GameConfig, WeaponConfig};

pub(super) fn validate(config: &GameConfig) -> Result<(), ConfigError> {
    let player = &config.player;
    positive_int("player.max_health", player.max_health)?;
    positive("player.walk_speed", player.walk_speed)?;
    positive("player.sprint_speed", player.sprint_speed)?;
    positive("player.crouch_speed", player.crouch_speed)?;
    positive("player.max_stamina", player.max_stamina)?;
    positive("player.sprint_drain_rate", player.sprint_drain_rate)?;
    positive("player.stamina_recovery_rate", player.stamina_recovery_rate)?;
    positive("player.rotation_speed", player.rotation_speed)?;
    positive("player.jump_height", player.jump_height)?;
    // Гравитация направлена вниз: проверяем модуль
    positive("player.gravity (magnitude of negative value)", -player.gravity)?;

    validate_weapon(&PLAYER_WEAPON, &config.player_weapon)?;
    validate_weapon(&ENEMY_WEAPON, &config.enemy_weapon)?;
    validate_enemy(&config.enemy)?;

    let projectile = &config.projectile;
    positive("projectile.lifespan", projectile.lifespan)?;
    positive_int("projectile.damage", projectile.damage)?;
    positive("projectile.radius", projectile.radius)?;

    validate_camera(&config.camera)?;

    positive("world.actor_radius", config.world.actor_radius)?;
    positive("world.actor_height", config.world.actor_height)?;

    Ok(())
}

/// Имена полей для сообщений об ошибках (секции оружия разделяют одну структуру)
struct WeaponFields {
    fire_rate: &'static str,
    damage: &'static str,
    projectile_speed: &'static str,
    range: &'static str,
    line_display_time: &'static str,
}

const PLAYER_WEAPON: WeaponFields = WeaponFields {
    fire_rate: "player_weapon.fire_rate",
    damage: "player_weapon.damage",
    projectile_speed: "player_weapon.projectile_speed",
    range: "player_weapon.range",
    line_display_time: "player_weapon.line_display_time",
};

const ENEMY_WEAPON: WeaponFields = WeaponFields {
    fire_rate: "enemy_weapon.fire_rate",
    damage: "enemy_weapon.damage",
    projectile_speed: "enemy_weapon.projectile_speed",
    range: "enemy_weapon.range",
    line_display_time: "enemy_weapon.line_display_time",
};

fn validate_weapon(fields: &WeaponFields, weapon: &WeaponConfig) -> Result<(), ConfigError> {
    positive(fields.fire_rate, weapon.fire_rate)?;
    positive_int(fields.damage, weapon.damage)?;
    positive(fields.projectile_speed, weapon.projectile_speed)?;
    positive(fields.range, weapon.range)?;
    positive(fields.line_display_time, weapon.line_display_time)?;
    Ok(())
}

fn validate_enemy(enemy: &EnemyConfig) -> Result<(), ConfigError> {
    positive_int("enemy.max_health", enemy.max_health)?;
    positive("enemy.detection_range", enemy.detection_range)?;
    positive("enemy.attack_range", enemy.attack_range)?;
    positive("enemy.move_speed", enemy.move_speed)?;
    positive("enemy.rotation_speed", enemy.rotation_speed)?;
    not_above(
        "enemy.attack_range",
        enemy.attack_range,
        "enemy.detection_range",
        enemy.detection_range,
    )?;

    if enemy.attack == EnemyAttackKind::Melee {
        positive_int("enemy.melee_damage", enemy.melee_damage)?;
        positive("enemy.melee_rate", enemy.melee_rate)?;
        positive("enemy.melee_stand_off", enemy.melee_stand_off)?;
        // Иначе враг остановится вне радиуса удара и никогда не атакует
        not_above(
            "enemy.melee_stand_off",
            enemy.melee_stand_off,
            "enemy.attack_range",
            enemy.attack_range,
        )?;
    }

    Ok(())
}

fn validate_camera(camera: &CameraConfig) -> Result<(), ConfigError> {
    positive("camera.smooth_speed", camera.smooth_speed)?;
    not_above("camera.smooth_speed", camera.smooth_speed, "1.0", 1.0)?;

    if camera.use_bounds {
        for (axis, index) in [('x', 0), ('y', 1)] {
            let (min, max) = (camera.min_bounds[index], camera.max_bounds[index]);
            if min > max {
                return Err(ConfigError::InvertedBounds { axis, min, max });
            }
        }
    }

    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN тоже отклоняем (сравнение с NaN всегда false)
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn positive_int(field: &'static str, value: u32) -> Result<(), ConfigError> {
    positive(field, value as f32)
}

fn not_above(
    field: &'static str,
    value: f32,
    limit_field: &'static str,
    limit: f32,
) -> Result<(), ConfigError> {
    if value <= limit {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            limit_field,
            limit,
        })
    }
}
