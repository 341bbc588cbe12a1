// src/animation/animation_config.rs
//
// CannonSettings is what a caller (or config.toml) asks for.
// AnimationConfig is the validated, derived form every particle of a burst
// reads from. It never changes after construction.

use crate::error::ConfigError;
use crate::models::{ColorToken, ConfettiKind, Palette, Visual};
use serde::{Deserialize, Serialize};

// length units per second
const EXPLOSION_SPEED: f32 = 1300.0;
const RAIN_SPEED: f32 = 200.0;

pub const DEFAULT_OPENING_ANGLE: f32 = 60.0;
pub const DEFAULT_CLOSING_ANGLE: f32 = 120.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonSettings {
    pub particle_count: usize,
    pub kinds: Vec<ConfettiKind>,
    pub colors: Vec<ColorToken>,
    pub confetti_size: f32,
    pub rain_height: f32,
    pub fades_out: bool,
    pub opacity: f32,
    pub opening_angle: f32,
    pub closing_angle: f32,
    pub explosion_radius: f32,
    pub repetitions: u32,
    pub repetition_interval: f32,
}

impl Default for CannonSettings {
    fn default() -> Self {
        Self {
            particle_count: 20,
            kinds: ConfettiKind::default_kinds(),
            colors: ColorToken::default_colors(),
            confetti_size: 10.0,
            rain_height: 600.0,
            fades_out: true,
            opacity: 1.0,
            opening_angle: DEFAULT_OPENING_ANGLE,
            closing_angle: DEFAULT_CLOSING_ANGLE,
            explosion_radius: 300.0,
            repetitions: 0,
            repetition_interval: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub particle_count: usize,
    pub palette: Palette,
    pub particle_size: f32,
    pub fall_distance: f32,
    pub fades_out: bool,
    pub max_opacity: f32,
    pub opening_angle: f32,
    pub closing_angle: f32,
    pub explosion_radius: f32,
    pub repetitions: u32,
    pub repetition_interval: f32,
    explosion_duration: f32,
    fall_duration: f32,
}

impl AnimationConfig {
    pub fn new(settings: &CannonSettings) -> Result<Self, ConfigError> {
        if settings.kinds.is_empty() {
            return Err(ConfigError::NoKinds);
        }
        if settings.colors.is_empty() {
            return Err(ConfigError::NoColors);
        }
        if settings.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !(settings.confetti_size.is_finite() && settings.confetti_size > 0.0) {
            return Err(ConfigError::InvalidSize(settings.confetti_size));
        }
        let palette =
            Palette::cross(&settings.kinds, &settings.colors).ok_or(ConfigError::NoKinds)?;

        let fall_distance = non_negative(settings.rain_height);
        let explosion_radius = non_negative(settings.explosion_radius);
        let max_opacity = if settings.opacity.is_finite() {
            settings.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };

        Ok(Self {
            particle_count: settings.particle_count,
            palette,
            particle_size: settings.confetti_size,
            fall_distance,
            fades_out: settings.fades_out,
            max_opacity,
            opening_angle: normalize_angle(settings.opening_angle, DEFAULT_OPENING_ANGLE),
            closing_angle: normalize_angle(settings.closing_angle, DEFAULT_CLOSING_ANGLE),
            explosion_radius,
            repetitions: settings.repetitions,
            repetition_interval: non_negative(settings.repetition_interval),
            explosion_duration: explosion_radius / EXPLOSION_SPEED,
            fall_duration: (fall_distance + explosion_radius) / RAIN_SPEED,
        })
    }

    pub fn explosion_duration(&self) -> f32 {
        self.explosion_duration
    }

    pub fn fall_duration(&self) -> f32 {
        self.fall_duration
    }

    // nominal time from spawn until the burst counts as finished
    pub fn animation_duration(&self) -> f32 {
        self.explosion_duration + self.fall_duration
    }

    pub fn visuals(&self) -> &[Visual] {
        self.palette.visuals()
    }

    pub fn arc_wraps(&self) -> bool {
        self.opening_angle > self.closing_angle
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// Degrees in [0, 360] pass through untouched so that 0..360 stays a full circle.
fn normalize_angle(degrees: f32, fallback: f32) -> f32 {
    if !degrees.is_finite() {
        fallback
    } else if (0.0..=360.0).contains(&degrees) {
        degrees
    } else {
        degrees.rem_euclid(360.0)
    }
}
