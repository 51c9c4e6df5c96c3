//! Physics host layer
//!
//! Симуляция не делает "настоящую" физику сама: она просит host:
//! - movement resolution (translation → grounded)
//! - ray cast / overlap queries (nearest hit)
//! - contact events для снарядов
//!
//! Два backend'а:
//! - `Headless` (default): плоскость пола + bounding volumes из `bevy::math::bounding`
//! - `Rapier`: `RapierHostPlugin` (bevy_rapier3d), headless системы отключаются

use bevy::prelude::*;

use crate::SimulationSet;

pub mod motor;
pub mod queries;
pub mod rapier_bridge;

#[cfg(test)]
mod queries_tests;

pub use motor::{resolve_character_motion, CharacterMotor, GroundPlane};
pub use queries::{CollisionWorld, Hurtbox, Obstacle, RayHit};
pub use rapier_bridge::RapierHostPlugin;

/// Кто отвечает за collision detection и movement resolution
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsBackend {
    #[default]
    Headless,
    Rapier,
}

/// Run condition: headless backend активен
pub fn headless_backend(backend: Res<PhysicsBackend>) -> bool {
    *backend == PhysicsBackend::Headless
}

/// Run condition: rapier backend активен
pub fn rapier_backend(backend: Res<PhysicsBackend>) -> bool {
    *backend == PhysicsBackend::Rapier
}

/// Physics host plugin (headless backend)
///
/// Регистрирует motion resolution в `SimulationSet::Motion`; при rapier backend
/// система выключена run condition'ом.
pub struct PhysicsHostPlugin;

impl Plugin for PhysicsHostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsBackend>()
            .init_resource::<GroundPlane>()
            .register_type::<CharacterMotor>()
            .register_type::<Hurtbox>()
            .register_type::<Obstacle>();

        app.add_systems(
            FixedUpdate,
            resolve_character_motion
                .run_if(headless_backend)
                .in_set(SimulationSet::Motion),
        );
    }
}
