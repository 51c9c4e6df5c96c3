//! One-shot проверка ссылок врага при spawn
//!
//! Missing target/weapon/fire point → ошибка в лог ОДИН раз + `Inert`.

use bevy::prelude::*;

use crate::ai::EnemyAi;
use crate::combat::Weapon;
use crate::components::{mark_inert, Health, Inert, ReferenceError};

/// Проверяет ссылки врага (только что добавленные `EnemyAi`)
pub fn validate_enemy_references(
    mut commands: Commands,
    enemies: Query<(Entity, &EnemyAi, Option<&Weapon>), (Added<EnemyAi>, Without<Inert>)>,
    targets: Query<(), (With<Transform>, With<Health>)>,
) {
    for (entity, ai, weapon) in enemies.iter() {
        if let Some(error) = missing_reference(ai, weapon, targets.contains(ai.target)) {
            mark_inert(&mut commands, entity, "Enemy", error);
        }
    }
}

/// Первая отсутствующая ссылка (None: всё на месте)
pub fn missing_reference(ai: &EnemyAi, weapon: Option<&Weapon>, target_exists: bool) -> Option<ReferenceError> {
    if !target_exists {
        return Some(ReferenceError::TargetNotFound(ai.target));
    }

    // Melee врагу оружие не нужно
    if !ai.is_ranged() {
        return None;
    }

    match weapon {
        None => Some(ReferenceError::WeaponNotAssigned),
        Some(weapon) if weapon.fire_point.is_none() => Some(ReferenceError::FirePointNotAssigned),
        Some(_) => None,
    }
}
