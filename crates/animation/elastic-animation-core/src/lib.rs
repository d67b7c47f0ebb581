//! Elastic Animation Core (host-agnostic)
//!
//! Frame-driven animation primitives: a start/stop-able [`Animator`] driven once per
//! display refresh, a [`DurationAnimator`] that maps elapsed time onto eased progress,
//! a free-running [`LinearAnimator`], cubic-bezier easing [`Curve`]s and generic range
//! mapping helpers. Hosts supply the time source and call [`Animator::frame`] on every
//! refresh; nothing here spawns threads or timers.

pub mod clock;
pub mod curve;
pub mod duration;
pub mod error;
pub mod linear;
pub mod range;

// Re-exports for consumers (controllers and adapters)
pub use clock::{Animator, FrameClock, ManualTime, SystemTime, TimeSource, FRAMES_PER_SECOND};
pub use curve::{ControlPoint, CubicBezier, Curve};
pub use duration::{check_duration, AnimationCompleted, DurationAnimator, DurationTicker};
pub use error::AnimationError;
pub use linear::{LinearAnimator, LinearTicker};
pub use range::{value_between, AnimatableRange, Interpolate};
