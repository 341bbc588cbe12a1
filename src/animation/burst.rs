// src/animation/burst.rs
//
// One firing of the cannon: N particles launched together.
//
// Completion is deliberately nominal. A single timer set at
// `animation_duration` after spawn counts every particle as done, even if a
// jittered particle is still on screen. The burst is then finished.

use super::lifecycle::{Particle, ParticleFrame};
use super::{AnimationConfig, MotionPlanner};
use log::debug;
use rand::Rng;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstTimerKind {
    Fall(usize),
    Settle(usize),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstTimer {
    pub due: f32,
    pub kind: BurstTimerKind,
}

#[derive(Debug, Default, PartialEq)]
pub struct BurstProgress {
    pub follow_up: Option<BurstTimer>,
    // true only on the call that finished the burst
    pub finished: bool,
}

#[derive(Debug)]
pub struct Burst {
    id: usize,
    config: Rc<AnimationConfig>,
    particles: Vec<Particle>,
    started_at: f32,
    completed: usize,
    finished: bool,
}

impl Burst {
    /// Builds and launches every particle. The returned timers must be fed
    /// back through `handle_timer` when they come due.
    pub fn start<R: Rng + ?Sized>(
        id: usize,
        config: Rc<AnimationConfig>,
        now: f32,
        rng: &mut R,
    ) -> (Self, Vec<BurstTimer>) {
        let planner = MotionPlanner::new(&config);
        let mut particles = Vec::with_capacity(config.particle_count);
        let mut timers = Vec::with_capacity(config.particle_count + 1);

        for index in 0..config.particle_count {
            let mut particle = Particle::new(planner.plan(rng));
            if let Some(due) = particle.explode(&config, now) {
                timers.push(BurstTimer {
                    due,
                    kind: BurstTimerKind::Fall(index),
                });
            }
            particles.push(particle);
        }

        // once per burst, after every particle exists
        timers.push(BurstTimer {
            due: now + config.animation_duration(),
            kind: BurstTimerKind::Complete,
        });

        debug!(
            "Burst {} launched {} particles at {:.3}s",
            id,
            particles.len(),
            now
        );

        let burst = Self {
            id,
            config,
            particles,
            started_at: now,
            completed: 0,
            finished: false,
        };
        (burst, timers)
    }

    pub fn handle_timer(&mut self, kind: BurstTimerKind, at: f32) -> BurstProgress {
        match kind {
            BurstTimerKind::Fall(index) => {
                let config = &self.config;
                let follow_up = self
                    .particles
                    .get_mut(index)
                    .and_then(|particle| particle.fall(config, at))
                    .map(|due| BurstTimer {
                        due,
                        kind: BurstTimerKind::Settle(index),
                    });
                BurstProgress {
                    follow_up,
                    finished: false,
                }
            }
            BurstTimerKind::Settle(index) => {
                if let Some(particle) = self.particles.get_mut(index) {
                    particle.settle();
                }
                BurstProgress::default()
            }
            BurstTimerKind::Complete => BurstProgress {
                follow_up: None,
                finished: self.complete_all(at),
            },
        }
    }

    fn complete_all(&mut self, at: f32) -> bool {
        for particle in self.particles.iter_mut() {
            if particle.report_completion() {
                self.completed += 1;
            }
        }
        if self.finished || self.completed < self.particles.len() {
            return false;
        }
        self.finished = true;
        debug!(
            "Burst {} finished at {:.3}s ({:.3}s after launch)",
            self.id,
            at,
            at - self.started_at
        );
        true
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    pub fn started_at(&self) -> f32 {
        self.started_at
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frames(&self, time: f32) -> impl Iterator<Item = ParticleFrame<'_>> + '_ {
        self.particles
            .iter()
            .map(move |particle| particle.frame(&self.config, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{CannonSettings, ParticlePhase};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Drives a burst's timers in due order up to `until`.
    fn run_until(burst: &mut Burst, timers: &mut Vec<BurstTimer>, until: f32) -> usize {
        let mut finished_signals = 0;
        loop {
            timers.sort_by(|a, b| a.due.total_cmp(&b.due));
            if timers.first().map_or(true, |t| t.due > until) {
                return finished_signals;
            }
            let timer = timers.remove(0);
            let progress = burst.handle_timer(timer.kind, timer.due);
            if progress.finished {
                finished_signals += 1;
            }
            timers.extend(progress.follow_up);
        }
    }

    fn start_default(seed: u64) -> (Burst, Vec<BurstTimer>) {
        let config = Rc::new(AnimationConfig::new(&CannonSettings::default()).unwrap());
        Burst::start(0, config, 0.0, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_start_creates_all_particles() {
        let (burst, timers) = start_default(1);
        assert_eq!(burst.particles().len(), 20);
        assert!(burst
            .particles()
            .iter()
            .all(|p| p.phase() == ParticlePhase::Exploding));
        // one fall per particle plus one completion
        assert_eq!(timers.len(), 21);
        let completes: Vec<_> = timers
            .iter()
            .filter(|t| t.kind == BurstTimerKind::Complete)
            .collect();
        assert_eq!(completes.len(), 1);
        assert!((completes[0].due - 4.7308).abs() < 1e-3);
    }

    #[test]
    fn test_angles_stay_in_default_arc() {
        let (burst, _) = start_default(2);
        for particle in burst.particles() {
            let angle = particle.plan().angle;
            assert!((60.0..=120.0).contains(&angle), "angle {}", angle);
        }
    }

    #[test]
    fn test_finishes_once_at_nominal_duration() {
        let (mut burst, mut timers) = start_default(3);

        assert_eq!(run_until(&mut burst, &mut timers, 4.7), 0);
        assert!(!burst.is_finished());
        assert_eq!(burst.completed_count(), 0);

        assert_eq!(run_until(&mut burst, &mut timers, 4.74), 1);
        assert!(burst.is_finished());
        assert_eq!(burst.completed_count(), 20);

        // a stray second completion does not finish it again
        let again = burst.handle_timer(BurstTimerKind::Complete, 5.0);
        assert!(!again.finished);
        assert_eq!(burst.completed_count(), 20);
    }

    #[test]
    fn test_every_particle_settles_in_time() {
        let (mut burst, mut timers) = start_default(4);
        run_until(&mut burst, &mut timers, 5.2);
        assert!(timers.is_empty());
        assert!(burst.particles().iter().all(|p| p.is_settled()));
        for frame in burst.frames(5.2) {
            assert_eq!(frame.opacity, 0.0);
        }
    }

    #[test]
    fn test_unknown_particle_index_is_ignored() {
        let (mut burst, _) = start_default(5);
        assert_eq!(
            burst.handle_timer(BurstTimerKind::Fall(99), 1.0),
            BurstProgress::default()
        );
        assert_eq!(
            burst.handle_timer(BurstTimerKind::Settle(99), 1.0),
            BurstProgress::default()
        );
    }
}
