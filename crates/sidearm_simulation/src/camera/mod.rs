//! Follow camera (lag-smoothed, optional XY bounds)
//!
//! Запускается ПОСЛЕ движения игрока (`SimulationSet::Camera`), читает итоговую позицию.
//! Сглаживание: доля пути за тик (не frame-rate independent, fixed tick это компенсирует).

use bevy::prelude::*;

use crate::components::{mark_inert, Inert, ReferenceError};
use crate::config::CameraConfig;
use crate::SimulationSet;

/// XY clamp (глубина Z не ограничивается)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CameraBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl CameraBounds {
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.min.x, self.max.x),
            position.y.clamp(self.min.y, self.max.y),
            position.z,
        )
    }
}

/// Камера следует за `target` со смещением `offset`
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct CameraFollow {
    pub target: Entity,
    pub offset: Vec3,
    /// Доля пути до желаемой позиции за тик, (0, 1]
    pub smooth_speed: f32,
    pub bounds: Option<CameraBounds>,
}

impl CameraFollow {
    pub fn from_config(target: Entity, config: &CameraConfig) -> Self {
        let bounds = config.use_bounds.then(|| CameraBounds {
            min: Vec2::from_array(config.min_bounds),
            max: Vec2::from_array(config.max_bounds),
        });

        Self {
            target,
            offset: Vec3::from_array(config.offset),
            smooth_speed: config.smooth_speed,
            bounds,
        }
    }

    /// Следующая позиция камеры: lerp к `target + offset`, затем clamp
    pub fn next_position(&self, current: Vec3, target: Vec3) -> Vec3 {
        let desired = target + self.offset;
        let smoothed = current.lerp(desired, self.smooth_speed);

        match &self.bounds {
            Some(bounds) => bounds.clamp(smoothed),
            None => smoothed,
        }
    }
}

/// Система: камера без цели → Inert (один раз)
pub fn validate_camera_references(
    mut commands: Commands,
    cameras: Query<(Entity, &CameraFollow), (Added<CameraFollow>, Without<Inert>)>,
    targets: Query<(), With<Transform>>,
) {
    for (entity, follow) in cameras.iter() {
        if !targets.contains(follow.target) {
            mark_inert(
                &mut commands,
                entity,
                "Camera",
                ReferenceError::CameraTargetNotFound(follow.target),
            );
        }
    }
}

/// Система: следование за целью
///
/// Цель удалена после spawn (смерть игрока): камера просто остаётся на месте.
pub fn follow_target(
    mut cameras: Query<(&mut Transform, &CameraFollow), Without<Inert>>,
    targets: Query<&Transform, Without<CameraFollow>>,
) {
    for (mut transform, follow) in cameras.iter_mut() {
        let Ok(target) = targets.get(follow.target) else {
            continue;
        };

        transform.translation = follow.next_position(transform.translation, target.translation);
    }
}

/// Camera Plugin
pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraFollow>();

        app.add_systems(
            FixedUpdate,
            (validate_camera_references, follow_target)
                .chain()
                .in_set(SimulationSet::Camera),
        );
    }
}
