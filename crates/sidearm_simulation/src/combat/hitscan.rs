//! Hitscan: мгновенный луч + короткоживущий tracer line
//!
//! Tracer: только состояние (start/end/visible), рендер вне симуляции.

use bevy::prelude::*;

use crate::physics::queries::ray_point;
use crate::physics::{CollisionWorld, RayHit};

/// Видимая линия выстрела (hitscan feedback)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TracerLine {
    pub start: Vec3,
    pub end: Vec3,
    pub visible: bool,
    /// Абсолютное время скрытия (`Time<Fixed>::elapsed_secs`)
    pub hide_at: f32,
}

impl TracerLine {
    pub fn show(&mut self, start: Vec3, end: Vec3, hide_at: f32) {
        self.start = start;
        self.end = end;
        self.visible = true;
        self.hide_at = hide_at;
    }
}

/// Результат hitscan луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitscanTrace {
    /// Куда рисовать линию: точка попадания или `origin + dir * range`
    pub end: Vec3,
    pub hit: Option<RayHit>,
}

/// Луч из fire point вдоль forward, стрелок исключён
pub fn trace_hitscan(
    collision: &CollisionWorld,
    shooter: Entity,
    origin: Vec3,
    direction: Dir3,
    range: f32,
) -> HitscanTrace {
    match collision.cast_ray(origin, direction, range, Some(shooter)) {
        Some(hit) => HitscanTrace {
            end: hit.point,
            hit: Some(hit),
        },
        None => HitscanTrace {
            end: ray_point(origin, direction, range),
            hit: None,
        },
    }
}

/// Система: прячет tracer по истечении `line_display_time`
pub fn hide_tracers(mut tracers: Query<&mut TracerLine>, time: Res<Time<Fixed>>) {
    let now = time.elapsed_secs();

    for mut tracer in tracers.iter_mut() {
        if tracer.visible && now >= tracer.hide_at {
            tracer.visible = false;
        }
    }
}
