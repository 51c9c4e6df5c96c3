//! Tests for enemy AI components.

use bevy::prelude::*;

use super::enemy::{classify, AIState, EnemyAi, EnemyAttack};
use crate::config::EnemyConfig;

const EPS: f32 = 1e-3;

#[test]
fn test_classify_thresholds() {
    assert_eq!(classify(15.0 + EPS, 15.0, 10.0), AIState::Idle);
    assert_eq!(classify(15.0, 15.0, 10.0), AIState::Chasing);
    assert_eq!(classify(10.0 + EPS, 15.0, 10.0), AIState::Chasing);
    assert_eq!(classify(10.0, 15.0, 10.0), AIState::Attacking);
    assert_eq!(classify(0.0, 15.0, 10.0), AIState::Attacking);
}

#[test]
fn test_ai_state_default_is_idle() {
    assert_eq!(AIState::default(), AIState::Idle);
}

#[test]
fn test_from_config_ranged() {
    let ai = EnemyAi::from_config(Entity::PLACEHOLDER, &EnemyConfig::default());
    assert!(ai.is_ranged());
    assert_eq!(ai.detection_range, 15.0);
    assert_eq!(ai.attack_range, 10.0);
}

#[test]
fn test_from_config_melee() {
    let ai = EnemyAi::from_config(Entity::PLACEHOLDER, &EnemyConfig::melee());
    match ai.attack {
        EnemyAttack::Melee {
            damage,
            stand_off,
            gate,
        } => {
            assert_eq!(damage, 1);
            assert_eq!(stand_off, 1.5);
            assert_eq!(gate.interval, 1.0);
        }
        EnemyAttack::Ranged => panic!("expected melee attack"),
    }
    assert_eq!(ai.attack_range, 2.0);
}
