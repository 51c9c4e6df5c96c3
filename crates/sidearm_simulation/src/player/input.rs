//! Keyboard/mouse → `PlayerInput` (PreUpdate)
//!
//! Работает только если host добавил InputPlugin; headless runner и тесты
//! пишут `PlayerInput` напрямую.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::player::{PlayerController, PlayerInput};

/// Раскладка клавиш
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub sprint: KeyCode,
    pub crouch: KeyCode,
    pub jump: KeyCode,
    pub fire: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            sprint: KeyCode::ShiftLeft,
            crouch: KeyCode::ControlLeft,
            jump: KeyCode::Space,
            fire: MouseButton::Left,
        }
    }
}

fn axis(keys: &ButtonInput<KeyCode>, negative: KeyCode, positive: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(positive) {
        value += 1.0;
    }
    if keys.pressed(negative) {
        value -= 1.0;
    }
    value
}

/// Система: опрос клавиатуры/мыши
///
/// Jump/fire: latch (OR): несколько кадров без fixed тика не теряют нажатие.
pub fn map_keyboard_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    bindings: Res<KeyBindings>,
    mut players: Query<&mut PlayerInput, (With<PlayerController>, Without<Dead>)>,
) {
    let Some(keys) = keys else {
        return;
    };

    let fire_pressed = mouse.is_some_and(|mouse| mouse.just_pressed(bindings.fire));

    for mut input in players.iter_mut() {
        input.movement = Vec2::new(
            axis(&keys, bindings.left, bindings.right),
            axis(&keys, bindings.back, bindings.forward),
        );
        input.sprint = keys.pressed(bindings.sprint);
        input.crouch = keys.pressed(bindings.crouch);
        input.jump_requested |= keys.just_pressed(bindings.jump);
        input.fire_requested |= fire_pressed;
    }
}
