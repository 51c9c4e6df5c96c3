//! Player controller systems (FixedUpdate)
//!
//! Порядок за тик:
//! 1. validate_player_references: одноразовая диагностика ссылок
//! 2. player_jump / player_fire: потребление latched запросов
//! 3. apply_gravity → player_movement: запрос смещения в CharacterMotor
//!
//! Resolution (grounded) делает physics backend в `SimulationSet::Motion`.

use bevy::prelude::*;

use crate::combat::{Dead, TriggerPulled, Weapon};
use crate::components::ReferenceError;
use crate::movement::{flatten, turn_towards};
use crate::physics::CharacterMotor;
use crate::player::{PlayerController, PlayerInput, Stamina};

/// Проверяет ссылки только что заспавненного игрока
///
/// В отличие от врага игрок НЕ становится Inert: без оружия он всё ещё ходит и прыгает,
/// выстрелы просто ничего не делают. Пропавшая камера → world basis.
pub fn validate_player_references(
    mut players: Query<(Entity, &mut PlayerController, Option<&Weapon>), Added<PlayerController>>,
    cameras: Query<(), With<Transform>>,
) {
    for (entity, mut controller, weapon) in players.iter_mut() {
        match weapon {
            None => report(entity, ReferenceError::WeaponNotAssigned),
            Some(weapon) if weapon.fire_point.is_none() => {
                report(entity, ReferenceError::FirePointNotAssigned)
            }
            Some(_) => {}
        }

        if let Some(camera) = controller.camera {
            if !cameras.contains(camera) {
                report(entity, ReferenceError::CameraTargetNotFound(camera));
                controller.camera = None;
            }
        }
    }
}

fn report(entity: Entity, error: ReferenceError) {
    crate::log_error(&format!("Player {:?}: {}", entity, error));
}

/// Система: прыжок (только с земли)
pub fn player_jump(
    mut players: Query<(&PlayerController, &mut PlayerInput, &mut CharacterMotor), Without<Dead>>,
) {
    for (controller, mut input, mut motor) in players.iter_mut() {
        if !input.jump_requested {
            continue;
        }

        input.jump_requested = false;
        if motor.grounded {
            motor.vertical_velocity = controller.jump_velocity();
        }
    }
}

/// Система: fire → `TriggerPulled` (мертвые не стреляют)
pub fn player_fire(
    mut players: Query<(Entity, &mut PlayerInput), (With<PlayerController>, Without<Dead>)>,
    mut triggers: EventWriter<TriggerPulled>,
) {
    for (entity, mut input) in players.iter_mut() {
        if input.fire_requested {
            input.fire_requested = false;
            triggers.write(TriggerPulled { shooter: entity });
        }
    }
}

/// Гравитация за один тик
///
/// На земле и падаем → `grounded_bias` (прижимает к полу), в воздухе → v += g * dt.
pub fn integrate_gravity(velocity: f32, grounded: bool, gravity: f32, grounded_bias: f32, delta: f32) -> f32 {
    if grounded {
        if velocity < 0.0 {
            grounded_bias
        } else {
            velocity
        }
    } else {
        velocity + gravity * delta
    }
}

/// Система: вертикальная скорость
pub fn apply_gravity(
    mut players: Query<(&PlayerController, &mut CharacterMotor), Without<Dead>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (controller, mut motor) in players.iter_mut() {
        motor.vertical_velocity = integrate_gravity(
            motor.vertical_velocity,
            motor.grounded,
            controller.gravity,
            controller.grounded_bias,
            delta,
        );
    }
}

/// Горизонтальное направление из input в basis камеры (XZ, нормализовано)
///
/// Без камеры: forward = -Z, right = +X.
pub fn camera_relative_direction(input: Vec2, camera: Option<&Transform>) -> Vec3 {
    let (forward, right) = match camera {
        Some(camera) => (
            flatten(camera.forward().as_vec3()).normalize_or_zero(),
            flatten(camera.right().as_vec3()).normalize_or_zero(),
        ),
        None => (Vec3::NEG_Z, Vec3::X),
    };

    (right * input.x + forward * input.y).normalize_or_zero()
}

/// Система: горизонтальное движение + поворот, итог → `CharacterMotor`
///
/// Sprint ограничен `Stamina`; crouch отменяет sprint.
pub fn player_movement(
    mut players: Query<
        (&PlayerController, &PlayerInput, &mut Stamina, &mut Transform, &mut CharacterMotor),
        Without<Dead>,
    >,
    cameras: Query<&Transform, Without<PlayerController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (controller, input, mut stamina, mut transform, mut motor) in players.iter_mut() {
        let camera = controller.camera.and_then(|camera| cameras.get(camera).ok());
        let direction = camera_relative_direction(input.movement, camera);

        let wants_sprint = input.sprint && !input.crouch && direction != Vec3::ZERO;
        let sprinting = stamina.tick(wants_sprint, delta);

        let horizontal = direction * controller.speed(sprinting, input.crouch);
        let velocity = horizontal + Vec3::Y * motor.vertical_velocity;
        motor.requested_translation = velocity * delta;

        if controller.face_movement && direction != Vec3::ZERO {
            turn_towards(&mut transform, direction, controller.rotation_speed, delta);
        }
    }
}
