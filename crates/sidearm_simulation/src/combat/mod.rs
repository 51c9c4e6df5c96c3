//! Combat module
//!
//! ECS ответственность:
//! - Weapons: rate gate, projectile/hitscan стратегии
//! - Projectiles: lifecycle, contact → damage
//! - Damage: Health, death, отложенный despawn
//!
//! Events: TriggerPulled → WeaponFired, ProjectileContact → DamageIntent → DamageDealt/EntityDied

use bevy::prelude::*;

use crate::physics::headless_backend;
use crate::SimulationSet;

pub mod damage;
pub mod hitscan;
pub mod projectile;
pub mod rate_gate;
pub mod weapon;


// Re-export основных типов
pub use damage::{
    DamageDealt, DamageIntent, DamageSource, Dead, DespawnAfter, EntityDied, DEATH_DESPAWN_DELAY,
};
pub use hitscan::TracerLine;
pub use projectile::{Projectile, ProjectileContact, ProjectileMotion, ProjectileSpec};
pub use rate_gate::RateGate;
pub use weapon::{TriggerPulled, Weapon, WeaponFired, WeaponKind};

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate, 60Hz):
/// 1. Weapons: hide_tracers → fire_weapons
/// 2. Projectiles: expire → move → detect (headless) → resolve
/// 3. Damage: apply_damage
/// 4. Death: handle_deaths → despawn_after_timeout
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<TriggerPulled>()
            .add_event::<WeaponFired>()
            .add_event::<ProjectileContact>()
            .add_event::<DamageIntent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.register_type::<Weapon>()
            .register_type::<TracerLine>()
            .register_type::<Projectile>()
            .register_type::<ProjectileMotion>()
            .register_type::<DespawnAfter>();

        app.add_systems(
            FixedUpdate,
            (hitscan::hide_tracers, weapon::fire_weapons)
                .chain()
                .in_set(SimulationSet::Weapons),
        )
        .add_systems(
            FixedUpdate,
            (
                projectile::expire_projectiles,
                projectile::move_projectiles,
                projectile::detect_projectile_contacts.run_if(headless_backend),
                projectile::resolve_projectile_contacts,
            )
                .chain()
                .in_set(SimulationSet::Projectiles),
        )
        .add_systems(
            FixedUpdate,
            damage::apply_damage.in_set(SimulationSet::Damage),
        )
        .add_systems(
            FixedUpdate,
            (damage::handle_deaths, damage::despawn_after_timeout)
                .chain()
                .in_set(SimulationSet::Death),
        );
    }
}
