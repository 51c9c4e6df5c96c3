//! Общие kinematic helpers (yaw facing, horizontal plane)
//!
//! Акторы вращаются только вокруг Y: pitch/roll никогда не меняются.

use bevy::prelude::*;

/// Проекция на горизонтальную плоскость (y = 0)
pub fn flatten(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Yaw rotation, при которой forward (-Z) смотрит вдоль `direction` (XZ)
///
/// None если направление вырождено (цель прямо над/под актором).
pub fn yaw_towards(direction: Vec3) -> Option<Quat> {
    let flat = flatten(direction);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }

    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Плавный поворот к направлению: slerp на долю `speed * delta` (clamp до 1)
pub fn turn_towards(transform: &mut Transform, direction: Vec3, speed: f32, delta: f32) {
    let Some(target) = yaw_towards(direction) else {
        return;
    };

    let t = (speed * delta).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(target, t);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_towards_points_forward_along_direction() {
        for direction in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z, Vec3::new(3.0, 5.0, -4.0)] {
            let rotation = yaw_towards(direction).unwrap();
            let forward = rotation * Vec3::NEG_Z;
            assert!(forward.abs_diff_eq(flatten(direction).normalize(), 1e-5), "{direction}");
        }
    }

    #[test]
    fn test_yaw_towards_degenerate_direction() {
        assert!(yaw_towards(Vec3::Y * 3.0).is_none());
        assert!(yaw_towards(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_turn_towards_full_step_snaps() {
        let mut transform = Transform::default();
        turn_towards(&mut transform, Vec3::X, 60.0, 1.0 / 60.0);
        assert!(transform.forward().as_vec3().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_turn_towards_partial_step() {
        let mut transform = Transform::default();
        turn_towards(&mut transform, Vec3::X, 5.0, 1.0 / 60.0);
        let forward = transform.forward().as_vec3();
        // Повернулся, но не до конца
        assert!(forward.x > 0.0 && forward.x < 1.0);
        assert!(forward.y.abs() < 1e-6);
    }
}
