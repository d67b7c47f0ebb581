//! Duration animator: an animator with a fixed time frame.
//!
//! Progress is `elapsed / duration`, unbounded above, passed through an optional timing
//! curve before reaching the tick callback. Reaching raw progress 1.0 stops the animator
//! (or restarts it when repeating). Every stop, natural or not, delivers one final tick
//! followed by the completion callback.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::clock::{Animator, FrameClock, TimeSource};
use crate::curve::Curve;
use crate::error::AnimationError;

/// Per-tick callback receiving the animator and its eased progress.
pub type DurationTicker = Box<dyn FnMut(&DurationAnimator, f64)>;
/// Completion callback; `true` when the animation ran its full duration.
pub type AnimationCompleted = Box<dyn FnMut(bool)>;

/// Reject durations an animator cannot meaningfully run for.
pub fn check_duration(seconds: f64) -> Result<(), AnimationError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidDuration { seconds })
    }
}

pub struct DurationAnimator {
    clock: FrameClock,
    /// Seconds the animation should play for.
    duration: f64,
    curve: Option<Curve>,
    /// Time source reading when the animation was (re)started.
    started_at: Option<f64>,
    ticker: Option<DurationTicker>,
    completed: Option<AnimationCompleted>,
    repeats: bool,
}

impl DurationAnimator {
    /// A non-positive or non-finite `duration` completes on the first tick.
    pub fn new(time: Rc<dyn TimeSource>, duration: f64) -> Self {
        Self {
            clock: FrameClock::new(time),
            duration,
            curve: None,
            started_at: None,
            ticker: None,
            completed: None,
            repeats: false,
        }
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn on_tick<F>(mut self, ticker: F) -> Self
    where
        F: FnMut(&DurationAnimator, f64) + 'static,
    {
        self.ticker = Some(Box::new(ticker));
        self
    }

    pub fn then<F>(mut self, completed: F) -> Self
    where
        F: FnMut(bool) + 'static,
    {
        self.completed = Some(Box::new(completed));
        self
    }

    pub fn repeating(mut self, repeats: bool) -> Self {
        self.repeats = repeats;
        self
    }

    pub fn set_repeats(&mut self, repeats: bool) {
        self.repeats = repeats;
    }

    pub fn repeats(&self) -> bool {
        self.repeats
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn curve(&self) -> Option<Curve> {
        self.curve
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// Elapsed time over duration; 0.0 when not started.
    pub fn raw_progress(&self) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        if check_duration(self.duration).is_err() {
            return 1.0;
        }
        (self.clock.now() - started_at) / self.duration
    }

    /// Raw progress passed through the timing curve.
    pub fn progress(&self) -> f64 {
        self.ease(self.raw_progress())
    }

    /// Stop immediately followed by start, with a fresh start timestamp.
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    #[inline]
    fn ease(&self, raw: f64) -> f64 {
        match &self.curve {
            Some(curve) => curve.value_at(raw),
            None => raw,
        }
    }

    fn emit_tick(&mut self, progress: f64) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker(self, progress);
            self.ticker = Some(ticker);
        }
    }

    fn emit_completed(&mut self, completed: bool) {
        if let Some(callback) = self.completed.as_mut() {
            callback(completed);
        }
    }
}

impl Animator for DurationAnimator {
    fn clock(&self) -> &FrameClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    fn on_start(&mut self) {
        self.started_at = Some(self.clock.now());
    }

    fn on_stop(&mut self) {
        let raw = self.raw_progress();
        let progress = self.ease(raw);
        self.emit_tick(progress);
        trace!(raw, completed = raw >= 1.0, "duration animator stopped");
        self.emit_completed(raw >= 1.0);
        self.started_at = None;
    }

    fn tick(&mut self) {
        if self.started_at.is_none() {
            return;
        }
        let raw = self.raw_progress();
        let progress = self.ease(raw);
        self.emit_tick(progress);
        if raw >= 1.0 {
            if self.repeats {
                self.restart();
            } else {
                self.stop();
            }
        }
    }
}

impl fmt::Debug for DurationAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurationAnimator")
            .field("clock", &self.clock)
            .field("duration", &self.duration)
            .field("curve", &self.curve)
            .field("started_at", &self.started_at)
            .field("repeats", &self.repeats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTime;

    #[test]
    fn progress_is_zero_before_start() {
        let time = ManualTime::new();
        time.set(10.0);
        let animator = DurationAnimator::new(Rc::new(time), 1.0);
        assert_eq!(animator.raw_progress(), 0.0);
        assert!(animator.started_at().is_none());
    }

    #[test]
    fn raw_progress_is_unbounded() {
        let time = ManualTime::new();
        let mut animator = DurationAnimator::new(Rc::new(time.clone()), 0.5);
        animator.start();
        time.advance(1.5);
        assert_eq!(animator.raw_progress(), 3.0);
    }

    #[test]
    fn degenerate_duration_completes_on_first_frame() {
        let time = ManualTime::new();
        let mut animator = DurationAnimator::new(Rc::new(time), 0.0);
        animator.start();
        assert!(animator.frame());
        assert!(!animator.is_running());
        assert!(check_duration(0.0).is_err());
        assert!(check_duration(f64::NAN).is_err());
        assert!(check_duration(0.3).is_ok());
    }
}
