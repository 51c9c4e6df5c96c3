//! Player controller components
//!
//! Input: polled state, а не callbacks: `PlayerInput` заполняется keyboard mapper'ом
//! (или тестом/скриптом), fixed-tick системы читают и потребляют запросы.

use bevy::prelude::*;

use crate::config::PlayerConfig;
use crate::physics::CharacterMotor;

/// Начальная вертикальная скорость прыжка: `sqrt(h * 2 * |g|)`
///
/// При постоянной гравитации пик траектории ровно `jump_height`.
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (jump_height * 2.0 * gravity.abs()).sqrt()
}

/// Параметры игрока + ссылка на камеру (basis для движения)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(PlayerInput, CharacterMotor, Stamina)]
pub struct PlayerController {
    /// None: движение в world basis
    pub camera: Option<Entity>,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    pub rotation_speed: f32,
    pub jump_height: f32,
    pub gravity: f32,
    pub grounded_bias: f32,
    pub face_movement: bool,
}

impl PlayerController {
    pub fn from_config(camera: Option<Entity>, config: &PlayerConfig) -> Self {
        Self {
            camera,
            walk_speed: config.walk_speed,
            sprint_speed: config.sprint_speed,
            crouch_speed: config.crouch_speed,
            rotation_speed: config.rotation_speed,
            jump_height: config.jump_height,
            gravity: config.gravity,
            grounded_bias: config.grounded_bias,
            face_movement: config.face_movement,
        }
    }

    pub fn jump_velocity(&self) -> f32 {
        jump_velocity(self.jump_height, self.gravity)
    }

    /// Crouch важнее sprint
    pub fn speed(&self, sprint: bool, crouch: bool) -> f32 {
        if crouch {
            self.crouch_speed
        } else if sprint {
            self.sprint_speed
        } else {
            self.walk_speed
        }
    }
}

/// Текущее состояние input игрока
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// x: вправо, y: вперёд (относительно камеры), длина ≤ 1 не требуется
    pub movement: Vec2,
    pub sprint: bool,
    pub crouch: bool,
    /// Latched: сбрасывается системой прыжка
    pub jump_requested: bool,
    /// Latched: сбрасывается системой стрельбы
    pub fire_requested: bool,
}

/// Доля `max`, после которой выдохшийся игрок снова может бежать
pub const SPRINT_RESUME_FRACTION: f32 = 0.2;

/// Выносливость для спринта
///
/// Тратится только пока игрок реально бежит (sprint + движение, без crouch),
/// в остальное время восстанавливается. На нуле игрок выдыхается и переходит
/// на шаг, пока запас не вернётся выше `SPRINT_RESUME_FRACTION`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    /// units/sec во время спринта
    pub drain_rate: f32,
    /// units/sec без спринта
    pub recovery_rate: f32,
    pub exhausted: bool,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl Stamina {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            current: config.max_stamina,
            max: config.max_stamina,
            drain_rate: config.sprint_drain_rate,
            recovery_rate: config.stamina_recovery_rate,
            exhausted: false,
        }
    }

    pub fn can_sprint(&self) -> bool {
        !self.exhausted && self.current > 0.0
    }

    /// Один тик: возвращает, бежит ли игрок в этом тике
    pub fn tick(&mut self, wants_sprint: bool, delta: f32) -> bool {
        let sprinting = wants_sprint && self.can_sprint();

        if sprinting {
            self.current = (self.current - self.drain_rate * delta).max(0.0);
            if self.current <= 0.0 {
                self.exhausted = true;
            }
        } else {
            self.current = (self.current + self.recovery_rate * delta).min(self.max);
            if self.exhausted && self.current >= self.max * SPRINT_RESUME_FRACTION {
                self.exhausted = false;
            }
        }

        sprinting
    }
}
