//! Tests for headless collision queries.

use bevy::prelude::*;

use super::queries::{ray_point, ray_vs_aabb, sphere_overlaps_aabb, Hurtbox, Obstacle};

#[test]
fn test_ray_hits_standing_hurtbox() {
    let hurtbox = Hurtbox::standing(0.5, 2.0);
    let aabb = hurtbox.aabb(Vec3::new(0.0, 0.0, -10.0));

    // Луч на высоте 1.5m вдоль -Z
    let hit = ray_vs_aabb(Vec3::new(0.0, 1.5, 0.0), Dir3::NEG_Z, 50.0, &aabb);
    let distance = hit.expect("ray should hit");
    assert!((distance - 9.5).abs() < 1e-4, "distance = {}", distance);
}

#[test]
fn test_ray_misses_beyond_range() {
    let aabb = Hurtbox::standing(0.5, 2.0).aabb(Vec3::new(0.0, 0.0, -60.0));
    assert!(ray_vs_aabb(Vec3::new(0.0, 1.5, 0.0), Dir3::NEG_Z, 50.0, &aabb).is_none());
}

#[test]
fn test_ray_misses_above_head() {
    let aabb = Hurtbox::standing(0.5, 2.0).aabb(Vec3::new(0.0, 0.0, -10.0));
    assert!(ray_vs_aabb(Vec3::new(0.0, 3.0, 0.0), Dir3::NEG_Z, 50.0, &aabb).is_none());
}

#[test]
fn test_miss_endpoint_is_origin_plus_range() {
    let origin = Vec3::new(1.0, 1.5, 2.0);
    let end = ray_point(origin, Dir3::NEG_Z, 50.0);
    assert_eq!(end, Vec3::new(1.0, 1.5, -48.0));
}

#[test]
fn test_sphere_overlap_obstacle() {
    let wall = Obstacle {
        half_extents: Vec3::new(5.0, 2.0, 0.5),
    };
    let aabb = wall.aabb(Vec3::new(0.0, 2.0, -5.0));

    assert!(sphere_overlaps_aabb(Vec3::new(0.0, 1.5, -4.4), 0.2, &aabb));
    assert!(!sphere_overlaps_aabb(Vec3::new(0.0, 1.5, -3.0), 0.2, &aabb));
}
