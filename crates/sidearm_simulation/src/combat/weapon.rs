//! Weapon: один контракт "нажать на спуск", две стратегии
//!
//! Pipeline:
//! - Player input / enemy AI → `TriggerPulled { shooter }`
//! - `fire_weapons`: Dead/Inert стрелки игнорируются → rate gate → стратегия
//!   - `Projectile`: spawn снаряда в fire point, velocity = forward * speed
//!   - `Hitscan`: ray cast до `range`, урон только противнику, tracer line
//! - Каждый успешный выстрел → `WeaponFired` (звук/VFX hook)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::hitscan::{trace_hitscan, TracerLine};
use crate::combat::projectile::{spawn_projectile, ProjectileSpec};
use crate::combat::{DamageIntent, DamageSource, Dead, RateGate};
use crate::components::{Actor, Inert};
use crate::config::{ProjectileConfig, WeaponConfig};
use crate::physics::CollisionWorld;

/// Стратегия выстрела
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Физический снаряд
    Projectile,
    /// Мгновенный луч
    #[default]
    Hitscan,
}

/// Оружие актора (живёт на entity стрелка)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub kind: WeaponKind,
    /// Урон hitscan попадания
    pub damage: u32,
    /// Точка вылета в локальных координатах владельца (None = не назначена)
    pub fire_point: Option<Vec3>,
    pub gate: RateGate,
    pub projectile_speed: f32,
    pub range: f32,
    pub line_display_time: f32,
    pub projectile: ProjectileSpec,
}

impl Weapon {
    pub fn from_config(weapon: &WeaponConfig, projectile: &ProjectileConfig) -> Self {
        Self {
            kind: weapon.kind,
            damage: weapon.damage,
            fire_point: weapon.fire_point.map(Vec3::from_array),
            gate: RateGate::new(weapon.fire_rate),
            projectile_speed: weapon.projectile_speed,
            range: weapon.range,
            line_display_time: weapon.line_display_time,
            projectile: ProjectileSpec {
                lifespan: projectile.lifespan,
                damage: projectile.damage,
                radius: projectile.radius,
            },
        }
    }

    /// World-space точка вылета и направление (forward владельца)
    pub fn muzzle(&self, owner: &Transform) -> Option<(Vec3, Dir3)> {
        let local = self.fire_point?;
        Some((owner.transform_point(local), owner.forward()))
    }
}

/// Event: актор нажал на спуск (Shoot)
#[derive(Event, Debug, Clone)]
pub struct TriggerPulled {
    pub shooter: Entity,
}

/// Event: выстрел состоялся (после rate gate)
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub kind: WeaponKind,
    pub origin: Vec3,
    pub direction: Dir3,
}

/// Система: TriggerPulled → выстрел
pub fn fire_weapons(
    mut commands: Commands,
    mut pulls: EventReader<TriggerPulled>,
    mut shooters: Query<
        (&Transform, &Actor, &mut Weapon, Option<&mut TracerLine>),
        (Without<Dead>, Without<Inert>),
    >,
    targets: Query<&Actor, Without<Dead>>,
    collision: CollisionWorld,
    mut damage: EventWriter<DamageIntent>,
    mut fired: EventWriter<WeaponFired>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for pull in pulls.read() {
        // Мертвый, inert или без оружия: тихий no-op
        let Ok((transform, actor, mut weapon, tracer)) = shooters.get_mut(pull.shooter) else {
            continue;
        };

        // Fire point не назначен: уже залогировано при spawn
        let Some((origin, direction)) = weapon.muzzle(transform) else {
            continue;
        };

        if !weapon.gate.try_trigger(now) {
            continue;
        }

        match weapon.kind {
            WeaponKind::Projectile => {
                spawn_projectile(
                    &mut commands,
                    pull.shooter,
                    actor.affiliation,
                    origin,
                    direction,
                    weapon.projectile_speed,
                    weapon.projectile,
                );
            }
            WeaponKind::Hitscan => {
                let trace = trace_hitscan(&collision, pull.shooter, origin, direction, weapon.range);

                if let Some(hit) = trace.hit {
                    let hostile = targets
                        .get(hit.entity)
                        .is_ok_and(|target| actor.affiliation.opposes(target.affiliation));

                    if hostile {
                        damage.write(DamageIntent {
                            attacker: pull.shooter,
                            target: hit.entity,
                            amount: weapon.damage,
                            source: DamageSource::Hitscan,
                        });
                    }
                }

                if let Some(mut tracer) = tracer {
                    tracer.show(origin, trace.end, now + weapon.line_display_time);
                }
            }
        }

        crate::log(&format!(
            "{:?} {:?} fired {:?} from {:.2}",
            actor.affiliation, pull.shooter, weapon.kind, origin
        ));

        fired.write(WeaponFired {
            shooter: pull.shooter,
            kind: weapon.kind,
            origin,
            direction,
        });
    }
}
