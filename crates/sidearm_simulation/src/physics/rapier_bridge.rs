//! Rapier host bridge (опциональный backend)
//!
//! Заменяет headless resolution/contact detection на bevy_rapier3d:
//! - акторы: KinematicPositionBased + KinematicCharacterController (grounded из output)
//! - снаряды: kinematic ball + COLLISION_EVENTS → `ProjectileContact`
//! - obstacles: Fixed cuboid
//!
//! Collision groups (битовые маски):
//! - GROUP_2: Actors
//! - GROUP_3: Environment (пол, стены)
//! - GROUP_4: Projectiles: НЕ коллидируют друг с другом

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;
use bevy_rapier3d::prelude::*;

use crate::combat::{Dead, Projectile, ProjectileContact};
use crate::components::Player;
use crate::physics::{CharacterMotor, GroundPlane, Hurtbox, Obstacle, PhysicsBackend};
use crate::SimulationSet;

pub const LAYER_ACTORS: Group = Group::GROUP_2;
pub const LAYER_ENVIRONMENT: Group = Group::GROUP_3;
pub const LAYER_PROJECTILES: Group = Group::GROUP_4;

/// Actors collide with Actors + Environment + Projectiles
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_ACTORS, LAYER_ACTORS | LAYER_ENVIRONMENT | LAYER_PROJECTILES)
}

/// Environment collides with everything
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_ENVIRONMENT, Group::ALL)
}

/// Projectiles collide with Actors + Environment
pub fn projectile_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_PROJECTILES, LAYER_ACTORS | LAYER_ENVIRONMENT)
}

/// Полуразмер плиты пола по XZ (метры)
const GROUND_HALF_EXTENT: f32 = 500.0;
const GROUND_THICKNESS: f32 = 0.1;

/// Plugin: rapier как host physics
///
/// Ставит `PhysicsBackend::Rapier`: headless motion/contact системы выключаются run conditions.
pub struct RapierHostPlugin;

impl Plugin for RapierHostPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PhysicsBackend::Rapier);

        if !app.is_plugin_added::<bevy::transform::TransformPlugin>() {
            app.add_plugins(bevy::transform::TransformPlugin);
        }

        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_schedule(FixedUpdate));

        // Rapier step между нашим motion и AI
        app.configure_sets(
            FixedUpdate,
            (
                PhysicsSet::SyncBackend,
                PhysicsSet::StepSimulation,
                PhysicsSet::Writeback,
            )
                .after(SimulationSet::Motion)
                .before(SimulationSet::Ai),
        );

        app.add_systems(Startup, spawn_ground)
            .add_systems(
                FixedUpdate,
                (attach_actor_bodies, attach_projectile_bodies, attach_obstacle_bodies)
                    .in_set(SimulationSet::Input),
            )
            .add_systems(
                FixedUpdate,
                drive_character_controllers.in_set(SimulationSet::Motion),
            )
            .add_systems(
                FixedUpdate,
                read_character_outputs
                    .after(PhysicsSet::Writeback)
                    .before(SimulationSet::Ai),
            )
            .add_systems(
                FixedUpdate,
                forward_collision_events
                    .in_set(SimulationSet::Projectiles)
                    .before(crate::combat::projectile::resolve_projectile_contacts),
            )
            .add_systems(
                FixedUpdate,
                disable_dead_bodies
                    .after(SimulationSet::Death)
                    .before(SimulationSet::Camera),
            );
    }
}

/// Startup: плита пола на высоте `GroundPlane`
fn spawn_ground(mut commands: Commands, ground: Res<GroundPlane>) {
    commands.spawn((
        Transform::from_xyz(0.0, ground.height - GROUND_THICKNESS, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(GROUND_HALF_EXTENT, GROUND_THICKNESS, GROUND_HALF_EXTENT),
        environment_groups(),
    ));
}

/// Hurtbox → kinematic collider (игрок дополнительно получает character controller)
fn attach_actor_bodies(
    mut commands: Commands,
    actors: Query<(Entity, &Hurtbox, Has<Player>), Added<Hurtbox>>,
) {
    for (entity, hurtbox, is_player) in actors.iter() {
        let half = hurtbox.half_extents;
        let collider = Collider::compound(vec![(
            hurtbox.center_offset,
            Quat::IDENTITY,
            Collider::cuboid(half.x, half.y, half.z),
        )]);

        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((RigidBody::KinematicPositionBased, collider, actor_groups()));

        if is_player {
            entity_commands.insert(KinematicCharacterController {
                filter_groups: Some(actor_groups()),
                ..default()
            });
        }
    }
}

fn attach_projectile_bodies(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile), Added<Projectile>>,
) {
    for (entity, projectile) in projectiles.iter() {
        commands.entity(entity).insert((
            RigidBody::KinematicPositionBased,
            Collider::ball(projectile.radius),
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default()
                | ActiveCollisionTypes::KINEMATIC_KINEMATIC
                | ActiveCollisionTypes::KINEMATIC_STATIC,
            projectile_groups(),
        ));
    }
}

fn attach_obstacle_bodies(
    mut commands: Commands,
    obstacles: Query<(Entity, &Obstacle), Added<Obstacle>>,
) {
    for (entity, obstacle) in obstacles.iter() {
        let half = obstacle.half_extents;
        commands.entity(entity).insert((
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y, half.z),
            environment_groups(),
        ));
    }
}

/// Motor request → KinematicCharacterController.translation
fn drive_character_controllers(
    mut characters: Query<(&mut CharacterMotor, &mut KinematicCharacterController), Without<Dead>>,
) {
    for (mut motor, mut controller) in characters.iter_mut() {
        controller.translation = Some(motor.requested_translation);
        motor.requested_translation = Vec3::ZERO;
    }
}

/// KinematicCharacterControllerOutput → grounded
fn read_character_outputs(
    mut characters: Query<(&mut CharacterMotor, &KinematicCharacterControllerOutput)>,
) {
    for (mut motor, output) in characters.iter_mut() {
        motor.grounded = output.grounded;
    }
}

/// Мертвые акторы больше не участвуют в коллизиях
fn disable_dead_bodies(mut commands: Commands, dead: Query<Entity, (Added<Dead>, With<Collider>)>) {
    for entity in dead.iter() {
        commands.entity(entity).insert(ColliderDisabled);
    }
}

/// Rapier `CollisionEvent::Started` → `ProjectileContact`
///
/// Sensor коллайдеры не считаются контактом.
fn forward_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    projectiles: Query<(), With<Projectile>>,
    sensors: Query<(), With<Sensor>>,
    mut contacts: EventWriter<ProjectileContact>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(first, second, _) = *event else {
            continue;
        };

        let (projectile, other) = if projectiles.contains(first) {
            (first, second)
        } else if projectiles.contains(second) {
            (second, first)
        } else {
            continue;
        };

        if sensors.contains(other) {
            continue;
        }

        contacts.write(ProjectileContact { projectile, other });
    }
}
