// src/animation/transition.rs
//
// The reference animation facility.
// A Transition moves one property from a start value to a target over a
// fixed duration. It holds no clock of its own: callers sample it with
// whatever time the host frame loop reports.

use super::EasingType;
use nannou::prelude::Vec2;
use std::f32::consts::TAU;

pub trait Interpolate: Copy {
    fn interpolate(self, target: Self, amount: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, target: Self, amount: f32) -> Self {
        self + (target - self) * amount
    }
}

impl Interpolate for Vec2 {
    fn interpolate(self, target: Self, amount: f32) -> Self {
        self + (target - self) * amount
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Transition<T> {
    from: T,
    to: T,
    start_time: f32,
    duration: f32,
    easing: EasingType,
}

impl<T: Interpolate> Transition<T> {
    pub fn new(from: T, to: T, start_time: f32, duration: f32, easing: EasingType) -> Self {
        Self {
            from,
            to,
            start_time,
            duration: duration.max(0.0),
            easing,
        }
    }

    // a transition that is already at rest
    pub fn settled(value: T, time: f32) -> Self {
        Self::new(value, value, time, 0.0, EasingType::Linear)
    }

    pub fn value_at(&self, time: f32) -> T {
        if time <= self.start_time {
            return if self.duration == 0.0 && time == self.start_time {
                self.to
            } else {
                self.from
            };
        }
        if self.is_complete(time) {
            return self.to;
        }
        let progress = (time - self.start_time) / self.duration;
        self.from.interpolate(self.to, self.easing.apply(progress))
    }

    pub fn is_complete(&self, time: f32) -> bool {
        time >= self.end_time()
    }

    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }
}

/// A continuous linear rotation, in radians.
/// `cycles` of `None` spins until the particle is dropped.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    period: f32,
    direction: f32,
    cycles: Option<u32>,
    start_time: f32,
}

impl Spin {
    pub fn new(period: f32, direction: f32, cycles: Option<u32>, start_time: f32) -> Self {
        Self {
            period,
            direction: direction.signum(),
            cycles,
            start_time,
        }
    }

    pub fn angle_at(&self, time: f32) -> f32 {
        if self.period <= 0.0 {
            return 0.0;
        }
        let elapsed = (time - self.start_time).max(0.0);
        let turns = elapsed / self.period;
        if let Some(cycles) = self.cycles {
            // a finished finite spin rests on a whole turn
            if turns >= cycles as f32 {
                return 0.0;
            }
        }
        turns.fract() * TAU * self.direction
    }
}
