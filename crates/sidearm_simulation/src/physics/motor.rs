//! Character motor: "host movement resolution call"
//!
//! Player systems пишут `requested_translation` (horizontal + vertical за тик),
//! backend применяет его и сообщает `grounded`.
//!
//! Headless: пол: бесконечная плоскость `GroundPlane`, стены не учитываются.

use bevy::prelude::*;

use crate::combat::Dead;

/// Состояние кинематического персонажа
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CharacterMotor {
    /// Вертикальная скорость (m/s), интегрируется player gravity системой
    pub vertical_velocity: f32,
    /// Смещение за текущий тик (метры), обнуляется после resolution
    pub requested_translation: Vec3,
    /// Стоит ли персонаж на полу (результат последней resolution)
    pub grounded: bool,
}

/// Высота пола для headless resolution
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GroundPlane {
    pub height: f32,
}

/// Чистая функция resolution: новая позиция + grounded
pub fn resolve_against_ground(position: Vec3, translation: Vec3, ground: f32) -> (Vec3, bool) {
    let mut next = position + translation;

    if next.y <= ground {
        next.y = ground;
        (next, true)
    } else {
        (next, false)
    }
}

/// Система: headless movement resolution
pub fn resolve_character_motion(
    mut query: Query<(&mut Transform, &mut CharacterMotor), Without<Dead>>,
    ground: Res<GroundPlane>,
) {
    for (mut transform, mut motor) in query.iter_mut() {
        let (next, grounded) =
            resolve_against_ground(transform.translation, motor.requested_translation, ground.height);

        transform.translation = next;
        motor.grounded = grounded;
        motor.requested_translation = Vec3::ZERO;
    }
}
