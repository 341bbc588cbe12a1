// src/lib.rs
//
// confettivis: a confetti cannon.
// `animation` is the host-agnostic core; `render`, `controllers` and
// `config` are what the nannou binary needs to put it on screen.

pub mod animation;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod render;

pub use animation::{AnimationConfig, CannonSettings, ConfettiCannon, TriggerCounter};
pub use error::ConfigError;
pub use models::{ColorToken, ConfettiKind, ShapeTag};
