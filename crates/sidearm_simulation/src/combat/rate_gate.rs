//! Rate gate: timestamp cooldown для fire/attack
//!
//! Инвариант: действие срабатывает только если `now >= next_ready_at`,
//! после срабатывания `next_ready_at = now + interval`.
//! `now`: монотонное время симуляции (`Time<Fixed>::elapsed_secs`).

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RateGate {
    /// Секунды между срабатываниями (> 0, проверяется конфигом)
    pub interval: f32,
    /// Абсолютное время, с которого можно сработать снова
    pub next_ready_at: f32,
}

impl RateGate {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            next_ready_at: 0.0,
        }
    }

    pub fn is_ready(&self, now: f32) -> bool {
        now >= self.next_ready_at
    }

    /// Пытается сработать; true: действие разрешено и cooldown запущен
    pub fn try_trigger(&mut self, now: f32) -> bool {
        if !self.is_ready(now) {
            return false;
        }

        self.next_ready_at = now + self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_trigger_is_immediate() {
        let mut gate = RateGate::new(0.5);
        assert!(gate.try_trigger(0.0));
        assert_eq!(gate.next_ready_at, 0.5);
    }

    #[test]
    fn test_two_triggers_within_interval_fire_once() {
        let mut gate = RateGate::new(0.5);
        assert!(gate.try_trigger(1.0));
        assert!(!gate.try_trigger(1.2));
        assert!(!gate.try_trigger(1.49));
        // Неудачная попытка не сдвигает cooldown
        assert_eq!(gate.next_ready_at, 1.5);
    }

    #[test]
    fn test_trigger_again_after_interval() {
        let mut gate = RateGate::new(0.5);
        assert!(gate.try_trigger(1.0));
        assert!(gate.try_trigger(1.5));
        assert!(gate.try_trigger(2.25));
        assert_eq!(gate.next_ready_at, 2.75);
    }
}
