// src/animation/lifecycle.rs
//
// A single confetti piece and the phases it moves through.
//
// Idle -> Exploding -> Falling -> Settled
//
// Phase changes are driven from outside by timers; the particle only
// reports when the next timer is due. Position and opacity are layered
// transitions: the fall is added on top of the still-running explosion.

use super::motion_planner::ParticlePlan;
use super::transition::{Spin, Transition};
use super::{AnimationConfig, EasingType};
use crate::models::Visual;
use nannou::prelude::{vec2, Vec2};

// the x spin stops after this many turns, the z spin never does
const SPIN_X_CYCLES: u32 = 10;
// the rain starts this fraction of the explosion duration after spawn
const RAIN_DELAY_FACTOR: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticlePhase {
    Idle,
    Exploding,
    Falling,
    Settled,
}

/// Everything a renderer needs to draw one particle at one instant.
#[derive(Debug, Clone, Copy)]
pub struct ParticleFrame<'a> {
    pub visual: &'a Visual,
    pub size: f32,
    // screen space, +y down, relative to the cannon origin
    pub offset: Vec2,
    pub opacity: f32,
    // radians
    pub rotation_x: f32,
    pub rotation_z: f32,
    // unit coordinates of the z spin pivot inside the piece
    pub anchor: Vec2,
    pub phase: ParticlePhase,
}

#[derive(Debug, Clone)]
pub struct Particle {
    plan: ParticlePlan,
    phase: ParticlePhase,
    explosion_offset: Transition<Vec2>,
    explosion_opacity: Transition<f32>,
    fall_offset: Option<Transition<Vec2>>,
    fall_opacity: Option<Transition<f32>>,
    spin_x: Option<Spin>,
    spin_z: Option<Spin>,
    completion_reported: bool,
}

impl Particle {
    pub fn new(plan: ParticlePlan) -> Self {
        Self {
            plan,
            phase: ParticlePhase::Idle,
            explosion_offset: Transition::settled(Vec2::ZERO, 0.0),
            explosion_opacity: Transition::settled(0.0, 0.0),
            fall_offset: None,
            fall_opacity: None,
            spin_x: None,
            spin_z: None,
            completion_reported: false,
        }
    }

    /// Idle -> Exploding. Returns the time the fall should begin.
    pub fn explode(&mut self, config: &AnimationConfig, now: f32) -> Option<f32> {
        if self.phase != ParticlePhase::Idle {
            return None;
        }
        let duration = self.plan.explosion_duration;
        self.explosion_offset = Transition::new(
            Vec2::ZERO,
            self.plan.target_offset(),
            now,
            duration,
            EasingType::EXPLOSION,
        );
        self.explosion_opacity =
            Transition::new(0.0, config.max_opacity, now, duration, EasingType::EXPLOSION);
        self.spin_x = Some(Spin::new(
            self.plan.spin_x_period,
            self.plan.spin_x_direction,
            Some(SPIN_X_CYCLES),
            now,
        ));
        self.spin_z = Some(Spin::new(
            self.plan.spin_z_period,
            self.plan.spin_z_direction,
            None,
            now,
        ));
        self.phase = ParticlePhase::Exploding;

        Some(now + RAIN_DELAY_FACTOR * config.explosion_duration())
    }

    /// Exploding -> Falling. Returns the time the particle settles.
    pub fn fall(&mut self, config: &AnimationConfig, now: f32) -> Option<f32> {
        if self.phase != ParticlePhase::Exploding {
            return None;
        }
        let duration = config.fall_duration();
        let target_opacity = if config.fades_out {
            0.0
        } else {
            config.max_opacity
        };
        self.fall_offset = Some(Transition::new(
            Vec2::ZERO,
            vec2(0.0, config.fall_distance),
            now,
            duration,
            EasingType::FALL,
        ));
        self.fall_opacity = Some(Transition::new(
            0.0,
            target_opacity - config.max_opacity,
            now,
            duration,
            EasingType::FALL,
        ));
        self.phase = ParticlePhase::Falling;

        Some(now + duration)
    }

    /// Falling -> Settled. Returns false if the particle was not falling.
    pub fn settle(&mut self) -> bool {
        if self.phase != ParticlePhase::Falling {
            return false;
        }
        self.phase = ParticlePhase::Settled;
        true
    }

    // Counted once per particle by the owning burst.
    pub(crate) fn report_completion(&mut self) -> bool {
        if self.completion_reported {
            return false;
        }
        self.completion_reported = true;
        true
    }

    pub fn phase(&self) -> ParticlePhase {
        self.phase
    }

    pub fn plan(&self) -> &ParticlePlan {
        &self.plan
    }

    pub fn is_settled(&self) -> bool {
        self.phase == ParticlePhase::Settled
    }

    pub fn offset_at(&self, time: f32) -> Vec2 {
        let fall = self
            .fall_offset
            .map(|t| t.value_at(time))
            .unwrap_or(Vec2::ZERO);
        self.explosion_offset.value_at(time) + fall
    }

    pub fn opacity_at(&self, time: f32) -> f32 {
        let fall = self.fall_opacity.map(|t| t.value_at(time)).unwrap_or(0.0);
        (self.explosion_opacity.value_at(time) + fall).clamp(0.0, 1.0)
    }

    pub fn frame(&self, config: &AnimationConfig, time: f32) -> ParticleFrame<'_> {
        ParticleFrame {
            visual: &self.plan.visual,
            size: config.particle_size,
            offset: self.offset_at(time),
            opacity: self.opacity_at(time),
            rotation_x: self.spin_x.map(|s| s.angle_at(time)).unwrap_or(0.0),
            rotation_z: self.spin_z.map(|s| s.angle_at(time)).unwrap_or(0.0),
            anchor: Vec2::splat(self.plan.spin_anchor),
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{CannonSettings, MotionPlanner};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle_with(settings: &CannonSettings, seed: u64) -> (AnimationConfig, Particle) {
        let config = AnimationConfig::new(settings).unwrap();
        let plan = MotionPlanner::new(&config).plan(&mut StdRng::seed_from_u64(seed));
        (config, Particle::new(plan))
    }

    #[test]
    fn test_phases_in_order() {
        let (config, mut particle) = particle_with(&CannonSettings::default(), 1);
        assert_eq!(particle.phase(), ParticlePhase::Idle);

        // no skipping ahead
        assert_eq!(particle.fall(&config, 0.0), None);
        assert!(!particle.settle());

        let fall_at = particle.explode(&config, 1.0).unwrap();
        assert!((fall_at - (1.0 + 0.1 * config.explosion_duration())).abs() < 1e-6);
        assert_eq!(particle.phase(), ParticlePhase::Exploding);
        assert_eq!(particle.explode(&config, 1.0), None);

        let settle_at = particle.fall(&config, fall_at).unwrap();
        assert!((settle_at - (fall_at + 4.5)).abs() < 1e-5);
        assert_eq!(particle.phase(), ParticlePhase::Falling);

        assert!(particle.settle());
        assert!(particle.is_settled());
        assert!(!particle.settle());
    }

    #[test]
    fn test_explosion_reaches_target() {
        let (config, mut particle) = particle_with(&CannonSettings::default(), 2);
        particle.explode(&config, 0.0);

        assert_eq!(particle.opacity_at(0.0), 0.0);
        assert_eq!(particle.offset_at(0.0), Vec2::ZERO);

        let end = particle.plan().explosion_duration;
        let target = particle.plan().target_offset();
        assert!((particle.offset_at(end) - target).length() < 1e-3);
        assert_eq!(particle.opacity_at(end), 1.0);
    }

    #[test]
    fn test_fall_adds_rain_and_fades() {
        let (config, mut particle) = particle_with(&CannonSettings::default(), 3);
        let fall_at = particle.explode(&config, 0.0).unwrap();
        let settle_at = particle.fall(&config, fall_at).unwrap();
        particle.settle();

        let target = particle.plan().target_offset();
        let rest = particle.offset_at(settle_at + 1.0);
        assert!((rest.x - target.x).abs() < 1e-3);
        assert!((rest.y - (target.y + 600.0)).abs() < 1e-2);
        assert_eq!(particle.opacity_at(settle_at), 0.0);
    }

    #[test]
    fn test_no_fade_keeps_opacity() {
        let settings = CannonSettings {
            fades_out: false,
            opacity: 0.6,
            ..CannonSettings::default()
        };
        let (config, mut particle) = particle_with(&settings, 4);
        let fall_at = particle.explode(&config, 0.0).unwrap();
        let settle_at = particle.fall(&config, fall_at).unwrap();
        assert!((particle.opacity_at(settle_at) - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_frame_carries_visual_and_spin() {
        let (config, mut particle) = particle_with(&CannonSettings::default(), 5);
        let idle = particle.frame(&config, 0.0);
        assert_eq!(idle.rotation_x, 0.0);
        assert_eq!(idle.phase, ParticlePhase::Idle);

        particle.explode(&config, 0.0);
        let frame = particle.frame(&config, 0.3);
        assert_eq!(frame.size, 10.0);
        assert_eq!(frame.visual, &particle.plan().visual);
        assert!(frame.rotation_z != 0.0);
        assert!(frame.anchor == Vec2::ZERO || frame.anchor == Vec2::ONE);
    }

    #[test]
    fn test_completion_reported_once() {
        let (_, mut particle) = particle_with(&CannonSettings::default(), 6);
        assert!(particle.report_completion());
        assert!(!particle.report_completion());
    }
}
