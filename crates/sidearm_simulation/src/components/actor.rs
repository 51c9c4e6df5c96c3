//! Базовые компоненты акторов: Actor, Affiliation, Health

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Сторона конфликта (заменяет теги "Player"/"Enemy")
///
/// Определяет кого можно ранить: урон проходит только по противоположной стороне.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum Affiliation {
    #[default]
    Player,
    Enemy,
}

impl Affiliation {
    /// Может ли сторона `self` наносить урон стороне `other`
    pub fn opposes(self, other: Affiliation) -> bool {
        self != other
    }
}

/// Актор (игрок, враг): базовый компонент для живых существ
///
/// Автоматически добавляет Health и Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Actor {
    pub affiliation: Affiliation,
}

impl Actor {
    pub fn new(affiliation: Affiliation) -> Self {
        Self { affiliation }
    }
}

/// Marker: entity управляется игроком (input), а не AI
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker: entity управляется enemy AI
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

/// Результат `Health::take_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Актор уже мертв: ничего не изменилось
    Ignored,
    /// Урон применён, актор жив
    Wounded,
    /// Урон применён, HP дошло до нуля (возвращается ровно один раз)
    Killed,
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, max > 0 (проверяется при загрузке конфига).
/// `current == 0`: терминальное состояние, дальнейший урон игнорируется.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }

        self.current = self.current.saturating_sub(amount);

        if self.is_dead() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        assert_eq!(health.take_damage(30), DamageOutcome::Wounded);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        assert_eq!(health.take_damage(100), DamageOutcome::Killed); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_damage_after_death_is_ignored() {
        let mut health = Health::new(1);
        assert_eq!(health.take_damage(1), DamageOutcome::Killed);

        let before = health;
        assert_eq!(health.take_damage(5), DamageOutcome::Ignored);
        assert_eq!(health, before);
    }

    #[test]
    fn test_three_hits_kill_three_hp_enemy() {
        let mut health = Health::new(3);

        assert_eq!(health.take_damage(1), DamageOutcome::Wounded);
        assert_eq!(health.take_damage(1), DamageOutcome::Wounded);
        assert!(health.is_alive());

        assert_eq!(health.take_damage(1), DamageOutcome::Killed);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_affiliation_opposes() {
        assert!(Affiliation::Player.opposes(Affiliation::Enemy));
        assert!(Affiliation::Enemy.opposes(Affiliation::Player));
        assert!(!Affiliation::Player.opposes(Affiliation::Player));
        assert!(!Affiliation::Enemy.opposes(Affiliation::Enemy));
    }
}
