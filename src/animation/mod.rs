pub mod animation_config;
pub mod burst;
pub mod cannon;
pub mod easing;
pub mod lifecycle;
pub mod motion_planner;
pub mod scheduler;
pub mod transition;

pub use animation_config::{AnimationConfig, CannonSettings};
pub use burst::{Burst, BurstProgress, BurstTimer, BurstTimerKind};
pub use cannon::{ConfettiCannon, TriggerCounter};
pub use easing::EasingType;
pub use lifecycle::{Particle, ParticleFrame, ParticlePhase};
pub use motion_planner::{MotionPlanner, ParticlePlan};
pub use scheduler::Scheduler;
pub use transition::{Interpolate, Spin, Transition};
