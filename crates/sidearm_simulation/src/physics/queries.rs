//! Headless collision queries (ray cast + sphere overlap)
//!
//! Коллайдеры:
//! - `Hurtbox`: AABB актора (от ступней вверх), поворот не учитываем (yaw-only акторы)
//! - `Obstacle`: статичная геометрия (стены), AABB вокруг Transform
//!
//! Sensor (trigger) коллайдеры и мертвые акторы в queries не участвуют.

use bevy::ecs::system::SystemParam;
use bevy::math::bounding::{Aabb3d, BoundingSphere, IntersectsVolume, RayCast3d};
use bevy::prelude::*;
use bevy_rapier3d::prelude::Sensor;

use crate::combat::Dead;

/// Hurtbox актора (в координатах владельца)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    /// Центр относительно Transform (обычно половина роста вверх)
    pub center_offset: Vec3,
    pub half_extents: Vec3,
}

impl Hurtbox {
    /// Стоячий актор: ширина 2*radius, высота height, origin в ступнях
    pub fn standing(radius: f32, height: f32) -> Self {
        Self {
            center_offset: Vec3::Y * (height * 0.5),
            half_extents: Vec3::new(radius, height * 0.5, radius),
        }
    }

    pub fn aabb(&self, position: Vec3) -> Aabb3d {
        Aabb3d::new(position + self.center_offset, self.half_extents)
    }

    pub fn center(&self, position: Vec3) -> Vec3 {
        position + self.center_offset
    }
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self::standing(0.5, 2.0)
    }
}

/// Статичное препятствие (блокирует лучи и снаряды)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Obstacle {
    pub half_extents: Vec3,
}

impl Obstacle {
    pub fn aabb(&self, position: Vec3) -> Aabb3d {
        Aabb3d::new(position, self.half_extents)
    }
}

/// Ближайшее попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Точка на луче: origin + direction * distance
pub fn ray_point(origin: Vec3, direction: Dir3, distance: f32) -> Vec3 {
    origin + direction.as_vec3() * distance
}

/// Ray vs AABB (None если промах или дальше `max_distance`)
pub fn ray_vs_aabb(origin: Vec3, direction: Dir3, max_distance: f32, aabb: &Aabb3d) -> Option<f32> {
    RayCast3d::new(origin, direction, max_distance).aabb_intersection_at(aabb)
}

/// Sphere vs AABB overlap
pub fn sphere_overlaps_aabb(center: Vec3, radius: f32, aabb: &Aabb3d) -> bool {
    BoundingSphere::new(center, radius).intersects(aabb)
}

/// SystemParam: все коллайдеры, видимые headless queries
#[derive(SystemParam)]
pub struct CollisionWorld<'w, 's> {
    hurtboxes: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static Hurtbox),
        (Without<Sensor>, Without<Dead>),
    >,
    obstacles: Query<'w, 's, (Entity, &'static Transform, &'static Obstacle), Without<Sensor>>,
}

impl CollisionWorld<'_, '_> {
    /// Ray cast: ближайший hurtbox/obstacle вдоль луча (кроме `ignore`)
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        ignore: Option<Entity>,
    ) -> Option<RayHit> {
        let actors = self
            .hurtboxes
            .iter()
            .filter(|(entity, ..)| Some(*entity) != ignore)
            .filter_map(|(entity, transform, hurtbox)| {
                let aabb = hurtbox.aabb(transform.translation);
                ray_vs_aabb(origin, direction, max_distance, &aabb).map(|distance| (entity, distance))
            });

        let walls = self
            .obstacles
            .iter()
            .filter(|(entity, ..)| Some(*entity) != ignore)
            .filter_map(|(entity, transform, obstacle)| {
                let aabb = obstacle.aabb(transform.translation);
                ray_vs_aabb(origin, direction, max_distance, &aabb).map(|distance| (entity, distance))
            });

        actors
            .chain(walls)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, distance)| RayHit {
                entity,
                distance,
                point: ray_point(origin, direction, distance),
            })
    }

    /// Sphere overlap: ближайший (по центру) коллайдер, пересекающий сферу
    pub fn overlap_sphere(&self, center: Vec3, radius: f32, ignore: Option<Entity>) -> Option<Entity> {
        let actors = self
            .hurtboxes
            .iter()
            .filter(|(entity, ..)| Some(*entity) != ignore)
            .filter(|(_, transform, hurtbox)| {
                sphere_overlaps_aabb(center, radius, &hurtbox.aabb(transform.translation))
            })
            .map(|(entity, transform, hurtbox)| {
                (entity, hurtbox.center(transform.translation).distance_squared(center))
            });

        let walls = self
            .obstacles
            .iter()
            .filter(|(entity, ..)| Some(*entity) != ignore)
            .filter(|(_, transform, obstacle)| {
                sphere_overlaps_aabb(center, radius, &obstacle.aabb(transform.translation))
            })
            .map(|(entity, transform, _)| (entity, transform.translation.distance_squared(center)));

        actors
            .chain(walls)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    }
}
