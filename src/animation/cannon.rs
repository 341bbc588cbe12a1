// src/animation/cannon.rs
//
// The ConfettiCannon watches a trigger counter and turns every increase into
// `repetitions + 1` staggered bursts. It owns the timers for everything it
// launches and releases bursts once they report finished.
//
// Call `update` once per frame with the host clock.

use super::burst::{Burst, BurstTimer, BurstTimerKind};
use super::lifecycle::ParticleFrame;
use super::scheduler::Scheduler;
use super::{AnimationConfig, CannonSettings};
use crate::error::ConfigError;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A shared integer the host writes and the cannon reads.
/// Clones point at the same cell.
#[derive(Debug, Clone, Default)]
pub struct TriggerCounter(Rc<Cell<i64>>);

impl TriggerCounter {
    pub fn new(value: i64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> i64 {
        self.0.get()
    }

    pub fn set(&self, value: i64) {
        self.0.set(value);
    }

    pub fn increment(&self) -> i64 {
        let value = self.0.get().saturating_add(1);
        self.0.set(value);
        value
    }

    pub fn decrement(&self) -> i64 {
        let value = self.0.get().saturating_sub(1);
        self.0.set(value);
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CannonEvent {
    Spawn { trigger: i64, repetition: u32 },
    Burst { burst: usize, kind: BurstTimerKind },
}

impl CannonEvent {
    fn burst_id(&self) -> Option<usize> {
        match self {
            CannonEvent::Burst { burst, .. } => Some(*burst),
            CannonEvent::Spawn { .. } => None,
        }
    }
}

pub struct ConfettiCannon<R: Rng = StdRng> {
    trigger: TriggerCounter,
    config: Rc<AnimationConfig>,
    scheduler: Scheduler<CannonEvent>,
    rng: R,
    ready: bool,
    now: f32,
    // last raw value read from the trigger
    last_seen: i64,
    // highest value that has been accepted; only values above it fire
    high_water: i64,
    // one entry per burst ever launched, flipped by later triggers
    slots: Vec<bool>,
    finished_count: usize,
    // live bursts, oldest first; ids run from finished_count upwards
    bursts: VecDeque<Burst>,
}

impl ConfettiCannon<StdRng> {
    pub fn new(trigger: TriggerCounter, settings: &CannonSettings) -> Result<Self, ConfigError> {
        Self::with_rng(trigger, settings, StdRng::from_entropy())
    }
}

impl<R: Rng> ConfettiCannon<R> {
    pub fn with_rng(
        trigger: TriggerCounter,
        settings: &CannonSettings,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let config = AnimationConfig::new(settings)?;
        let initial = trigger.get();
        Ok(Self {
            trigger,
            config: Rc::new(config),
            scheduler: Scheduler::new(),
            rng,
            ready: false,
            now: 0.0,
            last_seen: initial,
            high_water: initial.max(0),
            slots: Vec::new(),
            finished_count: 0,
            bursts: VecDeque::new(),
        })
    }

    /// Marks the cannon ready. Counter changes seen before this are
    /// remembered but never fire.
    pub fn activate(&mut self) {
        if !self.ready {
            debug!("Cannon activated at trigger value {}", self.last_seen);
        }
        self.ready = true;
    }

    /// Stops the cannon: pending spawns and in-flight bursts are dropped.
    pub fn deactivate(&mut self) {
        self.ready = false;
        self.scheduler.cancel_all();
        self.finished_count = self.slots.len();
        self.bursts.clear();
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Reads the trigger, then runs every timer due by `now`.
    pub fn update(&mut self, now: f32) {
        self.now = now;
        self.sync_trigger();

        while let Some((due, event)) = self.scheduler.pop_due(now) {
            self.dispatch(event, due);
        }
    }

    /// Observes the counter right away if it moved since the last read.
    /// Hosts that change the counter several times per frame call this
    /// after each change so no increase is merged into the next one.
    pub fn sync_trigger(&mut self) -> usize {
        let value = self.trigger.get();
        if value == self.last_seen {
            return 0;
        }
        self.observe(value)
    }

    /// Handles a trigger change to `value` and returns the number of spawns
    /// scheduled. Decreases, repeats of an earlier value and 0 are ignored.
    pub fn observe(&mut self, value: i64) -> usize {
        self.last_seen = value;

        if value <= self.high_water {
            debug!(
                "Ignoring trigger value {} (highest so far {})",
                value, self.high_water
            );
            return 0;
        }
        self.high_water = value;

        if !self.ready {
            debug!("Trigger value {} seen before activation", value);
            return 0;
        }

        let spawns = self.config.repetitions + 1;
        for repetition in 0..spawns {
            let due = self.now + repetition as f32 * self.config.repetition_interval;
            self.scheduler.schedule_at(
                due,
                CannonEvent::Spawn {
                    trigger: value,
                    repetition,
                },
            );
        }
        spawns as usize
    }

    fn dispatch(&mut self, event: CannonEvent, at: f32) {
        match event {
            CannonEvent::Spawn {
                trigger,
                repetition,
            } => self.spawn(trigger, repetition, at),
            CannonEvent::Burst { burst, kind } => self.advance_burst(burst, kind, at),
        }
    }

    fn spawn(&mut self, trigger: i64, repetition: u32, at: f32) {
        self.slots.push(false);
        let id = self.slots.len() - 1;

        // Best-effort correlation of trigger value and slot index.
        // Only slots that existed before this append can be flipped.
        if trigger > 0 && (trigger as usize) < self.slots.len() {
            let index = trigger as usize - 1;
            self.slots[index] = !self.slots[index];
        }

        let (burst, timers) = Burst::start(id, Rc::clone(&self.config), at, &mut self.rng);
        for timer in timers {
            self.schedule_burst_timer(id, timer);
        }
        self.bursts.push_back(burst);

        info!(
            "Burst {} spawned for trigger {} (repetition {}) at {:.3}s",
            id, trigger, repetition, at
        );
    }

    fn schedule_burst_timer(&mut self, burst: usize, timer: BurstTimer) {
        self.scheduler.schedule_at(
            timer.due,
            CannonEvent::Burst {
                burst,
                kind: timer.kind,
            },
        );
    }

    fn advance_burst(&mut self, id: usize, kind: BurstTimerKind, at: f32) {
        let Some(burst) = self.bursts.iter_mut().find(|b| b.id() == id) else {
            return;
        };
        let progress = burst.handle_timer(kind, at);
        if let Some(timer) = progress.follow_up {
            self.schedule_burst_timer(id, timer);
        }
        if progress.finished {
            self.finished_count += 1;
            self.release_finished();
        }
    }

    // Drops every burst below the finished low-water mark, timers included.
    fn release_finished(&mut self) {
        while let Some(front) = self.bursts.front() {
            if front.id() >= self.finished_count {
                break;
            }
            let id = front.id();
            self.bursts.pop_front();
            let dropped = self
                .scheduler
                .cancel_where(|event| event.burst_id() == Some(id));
            debug!("Released burst {} ({} timers dropped)", id, dropped);
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn trigger(&self) -> &TriggerCounter {
        &self.trigger
    }

    pub fn slots(&self) -> &[bool] {
        &self.slots
    }

    pub fn finished_count(&self) -> usize {
        self.finished_count
    }

    pub fn live_bursts(&self) -> impl Iterator<Item = &Burst> {
        self.bursts.iter()
    }

    pub fn live_burst_count(&self) -> usize {
        self.bursts.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Frames for every live particle, sampled at the last update time.
    pub fn frames(&self) -> impl Iterator<Item = ParticleFrame<'_>> + '_ {
        let now = self.now;
        self.bursts.iter().flat_map(move |burst| burst.frames(now))
    }
}
