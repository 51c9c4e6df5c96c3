//! Enemy behavior: perception → decision → action (каждый тик)
//!
//! - Idle: цель дальше detection_range (или мертва/удалена) → ничего
//! - Chasing: поворот к цели + движение (ranged: прямо к цели, melee: до stand-off точки)
//! - Attacking: поворот к цели + атака (ranged: TriggerPulled, melee: DamageIntent по rate gate)
//!
//! Melee внутри attack_range продолжает сближение до stand-off и бьёт только
//! с дистанции удара (`stand_off + MELEE_REACH_TOLERANCE` по горизонтали).
//!
//! Враги двигают Transform напрямую (без character motor), только по XZ.

use bevy::prelude::*;

use crate::ai::{AIState, EnemyAi, EnemyAttack};
use crate::combat::{DamageIntent, DamageSource, Dead, TriggerPulled};
use crate::components::{Enemy, Inert};
use crate::movement::{flatten, turn_towards};

/// Допуск дистанции удара melee (метры)
pub const MELEE_REACH_TOLERANCE: f32 = 0.01;

/// Достаёт ли melee удар до цели (горизонтальная дистанция)
pub fn within_melee_reach(to_target: Vec3, stand_off: f32) -> bool {
    flatten(to_target).length() <= stand_off + MELEE_REACH_TOLERANCE
}

/// Смещение за тик в сторону цели
///
/// Ranged: полный шаг `move_speed * delta` по горизонтали.
/// Melee: не ближе `stand_off` к цели (без перелёта).
pub fn chase_step(to_target: Vec3, attack: &EnemyAttack, move_speed: f32, delta: f32) -> Vec3 {
    let flat = flatten(to_target);
    let direction = flat.normalize_or_zero();
    let step = move_speed * delta;

    match attack {
        EnemyAttack::Ranged => direction * step,
        EnemyAttack::Melee { stand_off, .. } => {
            let remaining = (flat.length() - stand_off).max(0.0);
            direction * step.min(remaining)
        }
    }
}

/// Система: enemy AI tick
pub fn enemy_behavior(
    mut enemies: Query<
        (Entity, &mut Transform, &mut EnemyAi, &mut AIState),
        (With<Enemy>, Without<Dead>, Without<Inert>),
    >,
    targets: Query<&Transform, (Without<Dead>, Without<EnemyAi>)>,
    mut triggers: EventWriter<TriggerPulled>,
    mut damage: EventWriter<DamageIntent>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let now = time.elapsed_secs();

    for (entity, mut transform, mut ai, mut state) in enemies.iter_mut() {
        // Цель мертва или удалена: стоим
        let Ok(target_transform) = targets.get(ai.target) else {
            *state = AIState::Idle;
            continue;
        };

        let to_target = target_transform.translation - transform.translation;
        let next_state = ai.classify(to_target.length());
        if *state != next_state {
            *state = next_state;
        }

        if next_state == AIState::Idle {
            continue;
        }

        turn_towards(&mut transform, to_target, ai.rotation_speed, delta);

        if next_state == AIState::Chasing {
            transform.translation += chase_step(to_target, &ai.attack, ai.move_speed, delta);
            continue;
        }

        let target = ai.target;
        let approach = chase_step(to_target, &ai.attack, ai.move_speed, delta);
        match &mut ai.attack {
            EnemyAttack::Ranged => {
                triggers.write(TriggerPulled { shooter: entity });
            }
            EnemyAttack::Melee {
                damage: amount,
                stand_off,
                gate,
            } => {
                if !within_melee_reach(to_target, *stand_off) {
                    transform.translation += approach;
                } else if gate.try_trigger(now) {
                    damage.write(DamageIntent {
                        attacker: entity,
                        target,
                        amount: *amount,
                        source: DamageSource::Melee,
                    });
                }
            }
        }
    }
}
