//! Enemy AI components (perception ranges, attack strategy, derived state).

use bevy::prelude::*;

use crate::combat::RateGate;
use crate::config::{EnemyAttackKind, EnemyConfig};

/// AI состояние (derived)
///
/// Пересчитывается КАЖДЫЙ тик из дистанции до цели, ничего не хранит между тиками.
/// Компонент нужен только наблюдателям (UI, тесты, debug).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Цель вне detection range (или её нет)
    #[default]
    Idle,
    /// attack_range < d ≤ detection_range: поворот + движение к цели
    Chasing,
    /// d ≤ attack_range: поворот + атака
    Attacking,
}

/// Классификация дистанции (чистая функция)
pub fn classify(distance: f32, detection_range: f32, attack_range: f32) -> AIState {
    if distance > detection_range {
        AIState::Idle
    } else if distance > attack_range {
        AIState::Chasing
    } else {
        AIState::Attacking
    }
}

/// Стратегия атаки
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum EnemyAttack {
    /// Нажимает на спуск своего `Weapon` (rate gate оружия = attack rate)
    Ranged,
    /// Прямой урон цели, останавливается на `stand_off` от неё
    Melee {
        damage: u32,
        stand_off: f32,
        gate: RateGate,
    },
}

/// Enemy controller
///
/// Цель передаётся при spawn (dependency injection вместо поиска по тегу).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(AIState)]
pub struct EnemyAi {
    pub target: Entity,
    pub detection_range: f32,
    pub attack_range: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub attack: EnemyAttack,
}

impl EnemyAi {
    pub fn from_config(target: Entity, config: &EnemyConfig) -> Self {
        let attack = match config.attack {
            EnemyAttackKind::Ranged => EnemyAttack::Ranged,
            EnemyAttackKind::Melee => EnemyAttack::Melee {
                damage: config.melee_damage,
                stand_off: config.melee_stand_off,
                gate: RateGate::new(config.melee_rate),
            },
        };

        Self {
            target,
            detection_range: config.detection_range,
            attack_range: config.attack_range,
            move_speed: config.move_speed,
            rotation_speed: config.rotation_speed,
            attack,
        }
    }

    pub fn classify(&self, distance: f32) -> AIState {
        classify(distance, self.detection_range, self.attack_range)
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self.attack, EnemyAttack::Ranged)
    }
}
