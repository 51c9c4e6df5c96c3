//! Player controller module
//!
//! Input polling (PreUpdate) → jump/fire requests → gravity → camera-relative
//! movement → CharacterMotor. Стрельба идёт через тот же `TriggerPulled`, что и у AI.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod components;
pub mod input;
pub mod systems;


pub use components::{jump_velocity, PlayerController, PlayerInput, Stamina, SPRINT_RESUME_FRACTION};
pub use input::{map_keyboard_input, KeyBindings};

/// Player Plugin
///
/// - PreUpdate: map_keyboard_input (если есть ButtonInput)
/// - SimulationSet::Input: validate → jump → fire
/// - SimulationSet::Player: gravity → movement
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .register_type::<PlayerController>()
            .register_type::<PlayerInput>()
            .register_type::<Stamina>();

        app.add_systems(PreUpdate, input::map_keyboard_input)
            .add_systems(
                FixedUpdate,
                (
                    systems::validate_player_references,
                    systems::player_jump,
                    systems::player_fire,
                )
                    .chain()
                    .in_set(SimulationSet::Input),
            )
            .add_systems(
                FixedUpdate,
                (systems::apply_gravity, systems::player_movement)
                    .chain()
                    .in_set(SimulationSet::Player),
            );
    }
}
