// src/animation/motion_planner.rs
//
// Rolls the dice for one particle: what it looks like, where it flies,
// how fast it spins. Pure apart from the random source it is handed.

use super::AnimationConfig;
use crate::models::Visual;
use nannou::prelude::{vec2, Vec2};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

// fixed head start added to every explosion
pub const EXPLOSION_BASE_DURATION: f32 = 0.2;
// jitter is k / 2100 seconds for k in 0..=999
const JITTER_STEPS: u32 = 999;
const JITTER_DIVISOR: f32 = 2100.0;
const DISTANCE_FLOOR: f32 = 0.01;
const DISTANCE_EXPONENT: f32 = 2.0 / 7.0;
pub const SPIN_PERIOD_RANGE: RangeInclusive<f32> = 0.501..=2.201;

#[derive(Debug, Clone)]
pub struct ParticlePlan {
    pub visual: Visual,
    // +1.0 or -1.0
    pub spin_x_direction: f32,
    pub spin_z_direction: f32,
    pub spin_x_period: f32,
    pub spin_z_period: f32,
    // 0.0 or 1.0, used for both anchor coordinates of the z spin
    pub spin_anchor: f32,
    pub angle: f32,
    pub distance: f32,
    pub jitter: f32,
    // base + config explosion duration + jitter
    pub explosion_duration: f32,
}

impl ParticlePlan {
    /// Screen-space destination of the explosion, +y pointing down.
    pub fn target_offset(&self) -> Vec2 {
        let radians = self.angle.to_radians();
        vec2(
            self.distance * radians.cos(),
            -self.distance * radians.sin(),
        )
    }
}

pub struct MotionPlanner<'a> {
    config: &'a AnimationConfig,
}

impl<'a> MotionPlanner<'a> {
    pub fn new(config: &'a AnimationConfig) -> Self {
        Self { config }
    }

    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticlePlan {
        let config = self.config;
        let visual = config
            .visuals()
            .choose(rng)
            .cloned()
            // AnimationConfig guarantees a non-empty palette
            .unwrap_or_else(|| config.visuals()[0].clone());
        let jitter = sample_jitter(rng);

        ParticlePlan {
            visual,
            spin_x_direction: sample_direction(rng),
            spin_z_direction: sample_direction(rng),
            spin_x_period: rng.gen_range(SPIN_PERIOD_RANGE),
            spin_z_period: rng.gen_range(SPIN_PERIOD_RANGE),
            spin_anchor: rng.gen_range(0.0_f32..=1.0).round(),
            angle: sample_angle(config.opening_angle, config.closing_angle, rng),
            distance: sample_distance(config.explosion_radius, rng),
            jitter,
            explosion_duration: EXPLOSION_BASE_DURATION + config.explosion_duration() + jitter,
        }
    }
}

pub fn sample_direction<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Uniform over the arc from `opening` to `closing`, in degrees.
/// When `opening > closing` the arc runs through 0/360.
pub fn sample_angle<R: Rng + ?Sized>(opening: f32, closing: f32, rng: &mut R) -> f32 {
    if opening <= closing {
        rng.gen_range(opening..=closing)
    } else {
        rng.gen_range(opening..=closing + 360.0) % 360.0
    }
}

pub fn sample_distance<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> f32 {
    let u: f32 = rng.gen_range(DISTANCE_FLOOR..=1.0);
    radius * u.powf(DISTANCE_EXPONENT)
}

pub fn sample_jitter<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0..=JITTER_STEPS) as f32 / JITTER_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::CannonSettings;
    use crate::models::{ColorToken, ConfettiKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 2000;

    #[test]
    fn test_angle_within_plain_arc() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..SAMPLES {
            let angle = sample_angle(60.0, 120.0, &mut rng);
            assert!((60.0..=120.0).contains(&angle), "angle {}", angle);
        }
    }

    #[test]
    fn test_angle_within_wrapping_arc() {
        let mut rng = StdRng::seed_from_u64(11);
        let (opening, closing) = (300.0, 60.0);
        let mut crossed_zero = false;
        for _ in 0..SAMPLES {
            let angle = sample_angle(opening, closing, &mut rng);
            assert!((0.0..360.0).contains(&angle), "angle {}", angle);

            let unwrapped = if angle < opening { angle + 360.0 } else { angle };
            assert!(
                unwrapped >= opening - 1e-3 && unwrapped <= closing + 360.0 + 1e-3,
                "unwrapped {}",
                unwrapped
            );
            if angle < closing {
                crossed_zero = true;
            }
        }
        assert!(crossed_zero);
    }

    #[test]
    fn test_degenerate_arc() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_angle(90.0, 90.0, &mut rng), 90.0);
    }

    #[test]
    fn test_distance_bounds_and_bias() {
        let mut rng = StdRng::seed_from_u64(5);
        let radius = 300.0;
        let mut distances: Vec<f32> = (0..SAMPLES)
            .map(|_| sample_distance(radius, &mut rng))
            .collect();
        for d in &distances {
            assert!(*d > 0.0 && *d <= radius, "distance {}", d);
        }
        // the floor keeps the closest piece at 0.01^(2/7) of the radius
        let floor = radius * DISTANCE_FLOOR.powf(DISTANCE_EXPONENT);
        assert!(distances.iter().all(|d| *d >= floor - 1e-3));

        // u^(2/7) pushes the bulk of the pieces out towards the rim
        distances.sort_by(|a, b| a.total_cmp(b));
        let median = distances[SAMPLES / 2];
        assert!(median > 0.75 * radius && median < 0.9 * radius, "median {}", median);
    }

    #[test]
    fn test_zero_radius_never_moves() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(sample_distance(0.0, &mut rng), 0.0);
    }

    #[test]
    fn test_jitter_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..SAMPLES {
            let jitter = sample_jitter(&mut rng);
            assert!((0.0..=999.0 / 2100.0).contains(&jitter));
        }
    }

    #[test]
    fn test_plan_fields() {
        let settings = CannonSettings {
            kinds: vec![ConfettiKind::Text("x".to_string())],
            colors: vec![ColorToken::Mint],
            ..CannonSettings::default()
        };
        let config = AnimationConfig::new(&settings).unwrap();
        let planner = MotionPlanner::new(&config);
        let mut rng = StdRng::seed_from_u64(42);

        let mut saw_both_directions = (false, false);
        for _ in 0..200 {
            let plan = planner.plan(&mut rng);
            assert_eq!(plan.visual.kind, ConfettiKind::Text("x".to_string()));
            assert_eq!(plan.visual.color, ColorToken::Mint);
            assert!(SPIN_PERIOD_RANGE.contains(&plan.spin_x_period));
            assert!(SPIN_PERIOD_RANGE.contains(&plan.spin_z_period));
            assert!(plan.spin_anchor == 0.0 || plan.spin_anchor == 1.0);
            assert!(plan.spin_x_direction.abs() == 1.0);
            let expected = EXPLOSION_BASE_DURATION + config.explosion_duration() + plan.jitter;
            assert!((plan.explosion_duration - expected).abs() < 1e-6);
            if plan.spin_z_direction > 0.0 {
                saw_both_directions.0 = true;
            } else {
                saw_both_directions.1 = true;
            }
        }
        assert_eq!(saw_both_directions, (true, true));
    }

    #[test]
    fn test_target_offset_points_up_for_ninety_degrees() {
        let config = AnimationConfig::new(&CannonSettings::default()).unwrap();
        let mut plan = MotionPlanner::new(&config).plan(&mut StdRng::seed_from_u64(1));
        plan.angle = 90.0;
        plan.distance = 100.0;
        let offset = plan.target_offset();
        assert!(offset.x.abs() < 1e-3);
        assert!((offset.y + 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_plan() {
        let config = AnimationConfig::new(&CannonSettings::default()).unwrap();
        let planner = MotionPlanner::new(&config);
        let a = planner.plan(&mut StdRng::seed_from_u64(99));
        let b = planner.plan(&mut StdRng::seed_from_u64(99));
        assert_eq!(a.visual, b.visual);
        assert_eq!(a.angle, b.angle);
        assert_eq!(a.distance, b.distance);
    }
}
