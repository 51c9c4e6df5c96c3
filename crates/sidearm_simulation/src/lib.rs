//! SIDEARM Simulation Core
//!
//! Headless ECS-симуляция шутера на Bevy 0.16:
//! - Health/Damage (Dead marker, отложенный despawn)
//! - Weapons: projectile + hitscan стратегии за одним rate-gated контрактом
//! - Enemy AI (ranged/melee), Player controller, Follow camera
//!
//! Все gameplay системы: FixedUpdate (60Hz), порядок задаёт `SimulationSet`.
//! Host physics: встроенный headless backend или `RapierHostPlugin`.

use bevy::prelude::*;

// Публичные модули
pub mod ai;
pub mod camera;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod player;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AIState, EnemyAi, EnemyAttack};
pub use camera::{CameraBounds, CameraFollow, CameraFollowPlugin};
pub use combat::{
    CombatPlugin, DamageDealt, DamageIntent, DamageSource, Dead, DespawnAfter, EntityDied, Projectile,
    ProjectileContact, RateGate, TracerLine, TriggerPulled, Weapon, WeaponFired, WeaponKind,
};
pub use components::*;
pub use config::{ConfigError, GameConfig};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
};
pub use physics::{CharacterMotor, GroundPlane, Hurtbox, Obstacle, PhysicsBackend, PhysicsHostPlugin, RapierHostPlugin};
pub use player::{PlayerController, PlayerInput, PlayerPlugin};

/// Порядок фаз внутри одного fixed тика
///
/// Camera всегда последняя: читает позицию игрока ПОСЛЕ motion resolution.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Одноразовая валидация ссылок + потребление input запросов
    Input,
    /// Гравитация и движение игрока (запрос в CharacterMotor)
    Player,
    /// Movement resolution (host physics)
    Motion,
    /// Enemy AI
    Ai,
    /// TriggerPulled → выстрелы
    Weapons,
    /// Снаряды: lifespan, движение, контакты
    Projectiles,
    /// DamageIntent → Health
    Damage,
    /// Dead marker, despawn
    Death,
    /// Follow camera
    Camera,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `GameConfig` берётся из world (если вставлен до plugin'а), иначе defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(GroundPlane {
                height: config.world.ground_height,
            })
            .insert_resource(config);

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Input,
                SimulationSet::Player,
                SimulationSet::Motion,
                SimulationSet::Ai,
                SimulationSet::Weapons,
                SimulationSet::Projectiles,
                SimulationSet::Damage,
                SimulationSet::Death,
                SimulationSet::Camera,
            )
                .chain(),
        );

        app.register_type::<Actor>().register_type::<Health>();

        // Подсистемы
        app.add_plugins((
            PhysicsHostPlugin,
            CombatPlugin,
            AIPlugin,
            PlayerPlugin,
            CameraFollowPlugin,
        ));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(config: GameConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Один fixed тик симуляции (без реального времени)
///
/// `app.update()` зависит от wall clock (и первый кадр имеет нулевую delta),
/// поэтому `Time<Fixed>` двигается вручную ровно на один timestep.
pub fn advance_tick(app: &mut App) {
    let world = app.world_mut();
    let timestep = world.resource::<Time<Fixed>>().timestep();
    world.resource_mut::<Time<Fixed>>().advance_by(timestep);
    world.run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

/// Детерминированные helpers для тестов
#[doc(hidden)]
pub mod test_support {
    use bevy::prelude::*;

    /// Один fixed тик
    pub fn step(app: &mut App) {
        super::advance_tick(app);
    }

    pub fn step_n(app: &mut App, ticks: usize) {
        for _ in 0..ticks {
            step(app);
        }
    }

    /// Сколько тиков покрывает `seconds` (округление вверх)
    pub fn ticks_for(app: &App, seconds: f32) -> usize {
        let timestep = app.world().resource::<Time<Fixed>>().timestep().as_secs_f32();
        // Погрешность f32: 0.05 / (1/60) не должно превращаться в 4 тика
        ((seconds / timestep) - 1e-3).ceil().max(0.0) as usize
    }

    pub fn step_seconds(app: &mut App, seconds: f32) {
        let ticks = ticks_for(app, seconds);
        step_n(app, ticks);
    }

    /// Текущее время симуляции (`Time<Fixed>::elapsed_secs`)
    pub fn now(app: &App) -> f32 {
        app.world().resource::<Time<Fixed>>().elapsed_secs()
    }

    /// Применяет отложенные Commands spawn helper'ов
    pub fn spawn_with<R>(app: &mut App, spawn: impl FnOnce(&mut Commands) -> R) -> R {
        let world = app.world_mut();
        let result = {
            let mut commands = world.commands();
            spawn(&mut commands)
        };
        world.flush();
        result
    }
}
