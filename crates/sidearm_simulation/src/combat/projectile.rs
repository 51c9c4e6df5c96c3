//! Projectile lifecycle
//!
//! Снаряд живёт в ECS целиком:
//! 1. `spawn_projectile`: создаётся оружием в fire point, летит по forward
//! 2. `expire_projectiles`: despawn по истечении lifespan
//! 3. `move_projectiles`: интеграция velocity (headless замена host physics)
//! 4. `detect_projectile_contacts`: headless collision (rapier backend шлёт contacts сам)
//! 5. `resolve_projectile_contacts`: урон только противоположной стороне, despawn на ЛЮБОМ контакте
//!
//! Один снаряд = максимум одно применение урона.

use bevy::prelude::*;

use crate::combat::{DamageIntent, DamageSource, Dead};
use crate::components::{Actor, Affiliation};
use crate::physics::CollisionWorld;

/// Параметры снаряда, которые оружие передаёт при spawn
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ProjectileSpec {
    pub lifespan: f32,
    pub damage: u32,
    pub radius: f32,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            lifespan: 3.0,
            damage: 1,
            radius: 0.2,
        }
    }
}

/// Снаряд в полёте
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Кто выстрелил (для предотвращения self-hit)
    pub shooter: Entity,
    /// Чья пуля: определяет валидные цели
    pub affiliation: Affiliation,
    pub damage: u32,
    pub radius: f32,
    /// Секунды до принудительного удаления
    pub remaining: f32,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Скорость снаряда (m/s, world space)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ProjectileMotion {
    pub velocity: Vec3,
}

/// Event: снаряд коснулся не-trigger коллайдера
#[derive(Event, Debug, Clone)]
pub struct ProjectileContact {
    pub projectile: Entity,
    pub other: Entity,
}

/// Spawn helper: снаряд в `origin`, летит вдоль `direction`
pub fn spawn_projectile(
    commands: &mut Commands,
    shooter: Entity,
    affiliation: Affiliation,
    origin: Vec3,
    direction: Dir3,
    speed: f32,
    spec: ProjectileSpec,
) -> Entity {
    commands
        .spawn((
            Projectile {
                shooter,
                affiliation,
                damage: spec.damage,
                radius: spec.radius,
                remaining: spec.lifespan,
            },
            ProjectileMotion {
                velocity: direction.as_vec3() * speed,
            },
            Transform::from_translation(origin).looking_to(direction, Vec3::Y),
        ))
        .id()
}

/// Система: lifespan countdown
pub fn expire_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut projectile) in projectiles.iter_mut() {
        projectile.remaining -= delta;
        if projectile.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}

/// Система: velocity → position
pub fn move_projectiles(
    mut projectiles: Query<(&mut Transform, &ProjectileMotion), With<Projectile>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, motion) in projectiles.iter_mut() {
        transform.translation += motion.velocity * delta;
    }
}

/// Система: headless contact detection (sphere vs hurtboxes/obstacles)
///
/// Максимум один contact на снаряд за тик (ближайший коллайдер).
pub fn detect_projectile_contacts(
    projectiles: Query<(Entity, &Transform, &Projectile)>,
    collision: CollisionWorld,
    mut contacts: EventWriter<ProjectileContact>,
) {
    for (entity, transform, projectile) in projectiles.iter() {
        // Уже удалён expire_projectiles в этом тике
        if projectile.is_expired() {
            continue;
        }

        if let Some(other) =
            collision.overlap_sphere(transform.translation, projectile.radius, Some(projectile.shooter))
        {
            contacts.write(ProjectileContact {
                projectile: entity,
                other,
            });
        }
    }
}

/// Система: contact → урон (если цель противник) + despawn снаряда
pub fn resolve_projectile_contacts(
    mut commands: Commands,
    mut contacts: EventReader<ProjectileContact>,
    projectiles: Query<&Projectile>,
    actors: Query<&Actor, Without<Dead>>,
    mut damage: EventWriter<DamageIntent>,
) {
    let mut consumed: Vec<Entity> = Vec::new();

    for contact in contacts.read() {
        if consumed.contains(&contact.projectile) {
            continue;
        }

        let Ok(projectile) = projectiles.get(contact.projectile) else {
            continue;
        };

        // Не бьем самого себя (rapier может прислать contact со стрелком)
        if projectile.is_expired() || contact.other == projectile.shooter {
            continue;
        }

        consumed.push(contact.projectile);

        if let Ok(target) = actors.get(contact.other) {
            if projectile.affiliation.opposes(target.affiliation) {
                damage.write(DamageIntent {
                    attacker: projectile.shooter,
                    target: contact.other,
                    amount: projectile.damage,
                    source: DamageSource::Projectile,
                });
            }
        }

        commands.entity(contact.projectile).despawn();
    }
}
