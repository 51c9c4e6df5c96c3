//! Missing-reference диагностика
//!
//! Если у актора/камеры нет обязательной ссылки (target, weapon, fire point),
//! ошибка логируется ОДИН раз и entity получает `Inert`: зависимое поведение
//! выключено навсегда (без паники, без retry).

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("target actor {0:?} not found (entity has no Transform/Health)")]
    TargetNotFound(Entity),

    #[error("no weapon assigned")]
    WeaponNotAssigned,

    #[error("weapon has no fire point assigned")]
    FirePointNotAssigned,

    #[error("camera target {0:?} not found")]
    CameraTargetNotFound(Entity),
}

/// Marker: поведение entity выключено из-за missing reference
#[derive(Component, Debug, Clone)]
pub struct Inert(pub ReferenceError);

/// Логирует ошибку и помечает entity как `Inert`
pub fn mark_inert(commands: &mut Commands, entity: Entity, owner: &str, error: ReferenceError) {
    crate::log_error(&format!("{} {:?}: {}, behavior disabled", owner, entity, error));

    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands.insert(Inert(error));
    }
}
