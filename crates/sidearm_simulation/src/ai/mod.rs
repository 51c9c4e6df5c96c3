//! Enemy AI module
//!
//! Двухпороговый controller (detection_range / attack_range), состояние
//! пересчитывается каждый тик. Две стратегии атаки: ranged (через Weapon) и melee.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{classify, AIState, EnemyAi, EnemyAttack};

/// AI Plugin
///
/// Порядок выполнения (SimulationSet::Ai):
/// 1. validate_enemy_references: missing ссылки → Inert (один раз)
/// 2. enemy_behavior: поворот, движение, атака
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EnemyAi>().register_type::<AIState>();

        app.add_systems(
            FixedUpdate,
            (systems::validate_enemy_references, systems::enemy_behavior)
                .chain()
                .in_set(SimulationSet::Ai),
        );
    }
}
