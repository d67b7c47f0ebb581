//! Frame clock: start/stop bookkeeping shared by every animator, plus time sources.
//!
//! There is no display link here. The host calls [`Animator::frame`] once per display
//! refresh (nominally [`FRAMES_PER_SECOND`]) and the animator ticks only while running.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Nominal refresh rate hosts are expected to drive frames at.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Monotonic time in seconds.
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Debug)]
pub struct SystemTime {
    origin: instant::Instant,
}

impl SystemTime {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for SystemTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Explicitly advanced time. Clones share the same timeline, so a host (or a test)
/// can keep one handle and give another to the animators.
#[derive(Clone, Debug, Default)]
pub struct ManualTime {
    seconds: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    pub fn advance(&self, dt: f64) {
        self.seconds.set(self.seconds.get() + dt);
    }

    /// Advance by one nominal frame.
    pub fn advance_frame(&self) {
        self.advance(FrameClock::frame_interval());
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}

/// State every animator carries: where time comes from, whether it is running and how
/// many frames it has ticked.
pub struct FrameClock {
    time: Rc<dyn TimeSource>,
    running: bool,
    frames: u64,
}

impl FrameClock {
    pub fn new(time: Rc<dyn TimeSource>) -> Self {
        Self {
            time,
            running: false,
            frames: 0,
        }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.time.now()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames ticked since construction.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn time_source(&self) -> Rc<dyn TimeSource> {
        Rc::clone(&self.time)
    }

    /// Seconds between two nominal frames.
    #[inline]
    pub fn frame_interval() -> f64 {
        1.0 / f64::from(FRAMES_PER_SECOND)
    }
}

impl fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameClock")
            .field("now", &self.now())
            .field("running", &self.running)
            .field("frames", &self.frames)
            .finish()
    }
}

/// A start/stop-able per-frame callback driver.
///
/// Implementors expose their [`FrameClock`] and override [`Animator::tick`]; lifecycle
/// and frame dispatch are provided. Overlapping starts on one instance are not
/// guarded beyond the running flag.
pub trait Animator {
    fn clock(&self) -> &FrameClock;
    fn clock_mut(&mut self) -> &mut FrameClock;

    /// Runs before the running flag flips on.
    fn on_start(&mut self) {}

    /// Runs after the running flag flips off.
    fn on_stop(&mut self) {}

    /// Per-frame work. Every animator must override this.
    fn tick(&mut self) {
        unimplemented!("Animator::tick is not implemented for this animator")
    }

    fn is_running(&self) -> bool {
        self.clock().is_running()
    }

    fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.on_start();
        self.clock_mut().running = true;
    }

    fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.clock_mut().running = false;
        self.on_stop();
    }

    /// Display-refresh entry point. Returns whether a tick was delivered.
    fn frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.clock_mut().frames += 1;
        self.tick();
        true
    }
}
