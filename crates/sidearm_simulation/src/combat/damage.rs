//! Damage + death pipeline
//!
//! Получение урона реализовано как `DamageIntent` event:
//! - weapons/projectiles/melee AI пишут intent
//! - `apply_damage` применяет к Health (мертвые цели игнорируются)
//! - `EntityDied` генерируется ровно один раз на актора
//! - `handle_deaths` ставит `Dead` marker и планирует despawn через 0.5 сек
//!
//! Повторный урон и повторная смерть: тихие no-op (guard checks, не ошибки).

use bevy::prelude::*;

use crate::components::{Actor, DamageOutcome, Health};
use crate::physics::CharacterMotor;

/// Задержка между смертью и удалением entity (death feedback)
pub const DEATH_DESPAWN_DELAY: f32 = 0.5;

/// Откуда пришёл урон
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DamageSource {
    Projectile,
    Hitscan,
    Melee,
}

/// Event: кто-то хочет нанести урон цели
#[derive(Event, Debug, Clone)]
pub struct DamageIntent {
    pub attacker: Entity,
    pub target: Entity,
    pub amount: u32,
    pub source: DamageSource,
}

/// Событие: урон нанесен (для UI, звуков, эффектов)
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub source: DamageSource,
    pub remaining_health: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health дошло до 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Монотонный (никогда не снимается). Все gameplay системы фильтруют `Without<Dead>`:
/// нет input, движения, атак и collision response.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Отложенный despawn (секунды до удаления)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    pub remaining: f32,
}

/// Система: применение DamageIntent к Health
pub fn apply_damage(
    mut intents: EventReader<DamageIntent>,
    mut targets: Query<(&mut Health, Option<&Actor>), Without<Dead>>,
    mut damage_dealt: EventWriter<DamageDealt>,
    mut entity_died: EventWriter<EntityDied>,
) {
    for intent in intents.read() {
        // Цель уже мертва или удалена: тихий no-op
        let Ok((mut health, actor)) = targets.get_mut(intent.target) else {
            continue;
        };

        let outcome = health.take_damage(intent.amount);
        if outcome == DamageOutcome::Ignored {
            continue;
        }

        let target_died = outcome == DamageOutcome::Killed;

        crate::log(&format!(
            "{:?} {:?} took {} damage ({:?}). HP remaining: {}",
            actor.map(|a| a.affiliation),
            intent.target,
            intent.amount,
            intent.source,
            health.current
        ));

        damage_dealt.write(DamageDealt {
            attacker: intent.attacker,
            target: intent.target,
            damage: intent.amount,
            source: intent.source,
            remaining_health: health.current,
            target_died,
        });

        if target_died {
            entity_died.write(EntityDied {
                entity: intent.target,
                killer: Some(intent.attacker),
            });
        }
    }
}

/// Система: обработка смерти
///
/// Ставит `Dead`, гасит движение, планирует despawn через `DEATH_DESPAWN_DELAY`.
pub fn handle_deaths(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut motors: Query<&mut CharacterMotor>,
    actors: Query<&Actor>,
) {
    for event in deaths.read() {
        if let Ok(mut motor) = motors.get_mut(event.entity) {
            motor.vertical_velocity = 0.0;
            motor.requested_translation = Vec3::ZERO;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert((
                Dead,
                DespawnAfter {
                    remaining: DEATH_DESPAWN_DELAY,
                },
            ));
        }

        let affiliation = actors.get(event.entity).ok().map(|a| a.affiliation);
        crate::log_info(&format!(
            "💀 {:?} {:?} destroyed (killer: {:?})",
            affiliation, event.entity, event.killer
        ));
    }
}

/// Система: удаление entity по истечении `DespawnAfter`
pub fn despawn_after_timeout(
    mut commands: Commands,
    mut query: Query<(Entity, &mut DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut despawn) in query.iter_mut() {
        despawn.remaining -= delta;
        if despawn.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
