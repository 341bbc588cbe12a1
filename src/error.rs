// src/error.rs
//
// Errors raised while turning settings into an AnimationConfig

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("confetti needs at least one kind")]
    NoKinds,
    #[error("confetti needs at least one color")]
    NoColors,
    #[error("particle count must be greater than zero")]
    NoParticles,
    #[error("confetti size must be a positive number, got {0}")]
    InvalidSize(f32),
}
