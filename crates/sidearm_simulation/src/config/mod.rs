//! Game configuration (data-driven tuning)
//!
//! Все параметры акторов (скорости, дальности, rate, HP, урон): внешние данные,
//! не захардкоженная логика. Формат: RON (`assets/config.ron` или любой путь).
//!
//! Политика валидации: любые rate/damage/health/speed/range/lifespan должны быть
//! строго положительными; неверный конфиг отклоняется при загрузке (`ConfigError`).
//! `GameConfig::default()` всегда валиден.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::combat::WeaponKind;

mod validation;


#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} = {value} must not exceed {limit_field} = {limit}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        limit_field: &'static str,
        limit: f32,
    },

    #[error("camera bounds are inverted on the {axis} axis (min {min} > max {max})")]
    InvertedBounds { axis: char, min: f32, max: f32 },
}

/// Полный конфиг симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub player_weapon: WeaponConfig,
    pub enemy: EnemyConfig,
    pub enemy_weapon: WeaponConfig,
    pub projectile: ProjectileConfig,
    pub camera: CameraConfig,
    pub world: WorldConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            player_weapon: WeaponConfig::pistol(),
            enemy: EnemyConfig::default(),
            enemy_weapon: WeaponConfig::enemy_launcher(),
            projectile: ProjectileConfig::default(),
            camera: CameraConfig::default(),
            world: WorldConfig::default(),
        }
    }
}

impl GameConfig {
    /// Парсит RON и сразу валидирует
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Читает RON файл и валидирует
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: u32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    pub rotation_speed: f32,
    /// Запас выносливости для спринта
    pub max_stamina: f32,
    /// Расход выносливости в секунду спринта
    pub sprint_drain_rate: f32,
    /// Восстановление в секунду без спринта
    pub stamina_recovery_rate: f32,
    /// Пиковая высота прыжка (метры)
    pub jump_height: f32,
    /// Ускорение свободного падения (отрицательное, m/s²)
    pub gravity: f32,
    /// Vertical velocity на земле (держит контроллер прижатым к полу)
    pub grounded_bias: f32,
    /// Поворачивать персонажа по направлению движения
    pub face_movement: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            walk_speed: 5.0,
            sprint_speed: 8.0,
            crouch_speed: 2.5,
            rotation_speed: 10.0,
            max_stamina: 100.0,
            sprint_drain_rate: 10.0,
            stamina_recovery_rate: 5.0,
            jump_height: 1.5,
            gravity: -9.81,
            grounded_bias: -2.0,
            face_movement: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub kind: WeaponKind,
    /// Секунды между выстрелами
    pub fire_rate: f32,
    /// Урон hitscan попадания (projectile урон: в `ProjectileConfig`)
    pub damage: u32,
    pub projectile_speed: f32,
    /// Дальность hitscan луча (метры)
    pub range: f32,
    /// Сколько секунд виден tracer line
    pub line_display_time: f32,
    /// Fire point в локальных координатах владельца (None = не назначен)
    pub fire_point: Option<[f32; 3]>,
}

impl WeaponConfig {
    pub fn pistol() -> Self {
        Self {
            kind: WeaponKind::Hitscan,
            fire_rate: 0.5,
            damage: 1,
            projectile_speed: 20.0,
            range: 50.0,
            line_display_time: 0.05,
            fire_point: Some([0.0, 1.5, -0.8]),
        }
    }

    pub fn enemy_launcher() -> Self {
        Self {
            kind: WeaponKind::Projectile,
            fire_rate: 2.0,
            ..Self::pistol()
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self::pistol()
    }
}

/// Стратегия атаки врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyAttackKind {
    /// Стреляет из своего оружия (`enemy_weapon`)
    #[default]
    Ranged,
    /// Бьёт вплотную, урон напрямую в Health цели
    Melee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: u32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub attack: EnemyAttackKind,
    pub melee_damage: u32,
    /// Секунды между melee ударами
    pub melee_rate: f32,
    /// На каком расстоянии от цели останавливается melee враг
    pub melee_stand_off: f32,
}

impl EnemyConfig {
    /// Preset для melee врага (attack_range = дистанция удара)
    pub fn melee() -> Self {
        Self {
            attack: EnemyAttackKind::Melee,
            attack_range: 2.0,
            ..Self::default()
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            detection_range: 15.0,
            attack_range: 10.0,
            move_speed: 3.0,
            rotation_speed: 5.0,
            attack: EnemyAttackKind::Ranged,
            melee_damage: 1,
            melee_rate: 1.0,
            melee_stand_off: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Время жизни снаряда (секунды)
    pub lifespan: f32,
    pub damage: u32,
    /// Радиус коллайдера снаряда (метры)
    pub radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            lifespan: 3.0,
            damage: 1,
            radius: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Смещение от цели; +Z: позади игрока (forward = -Z)
    pub offset: [f32; 3],
    /// Доля пути до цели за тик (0, 1]; меньше: плавнее
    pub smooth_speed: f32,
    pub use_bounds: bool,
    pub min_bounds: [f32; 2],
    pub max_bounds: [f32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 2.0, 10.0],
            smooth_speed: 0.125,
            use_bounds: false,
            min_bounds: [-20.0, -10.0],
            max_bounds: [50.0, 20.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Высота плоскости пола для headless movement resolution
    pub ground_height: f32,
    /// Полуширина hurtbox акторов (XZ)
    pub actor_radius: f32,
    /// Рост актора (hurtbox от ступней вверх)
    pub actor_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ground_height: 0.0,
            actor_radius: 0.5,
            actor_height: 2.0,
        }
    }
}
