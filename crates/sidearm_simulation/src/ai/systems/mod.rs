//! AI systems

pub mod behavior;
pub mod validation;

#[cfg(test)]
mod behavior_tests;

// Re-export all systems
pub use behavior::*;
pub use validation::*;
