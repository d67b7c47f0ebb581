//! Untimed animator: keeps ticking until stopped. Useful for timers and cycles that
//! don't know up front how long they need to run.

use std::fmt;
use std::rc::Rc;

use crate::clock::{Animator, FrameClock, TimeSource};

pub type LinearTicker = Box<dyn FnMut(&LinearAnimator)>;

pub struct LinearAnimator {
    clock: FrameClock,
    started_at: Option<f64>,
    ticks: u64,
    ticker: Option<LinearTicker>,
}

impl LinearAnimator {
    pub fn new(time: Rc<dyn TimeSource>) -> Self {
        Self {
            clock: FrameClock::new(time),
            started_at: None,
            ticks: 0,
            ticker: None,
        }
    }

    pub fn on_tick<F>(mut self, ticker: F) -> Self
    where
        F: FnMut(&LinearAnimator) + 'static,
    {
        self.ticker = Some(Box::new(ticker));
        self
    }

    /// Seconds since the current run started; 0.0 while stopped.
    pub fn elapsed(&self) -> f64 {
        self.started_at
            .map(|started_at| self.clock.now() - started_at)
            .unwrap_or(0.0)
    }

    /// Ticks delivered during the current run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Animator for LinearAnimator {
    fn clock(&self) -> &FrameClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    fn on_start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.ticks = 0;
    }

    fn on_stop(&mut self) {
        self.started_at = None;
    }

    fn tick(&mut self) {
        self.ticks += 1;
        if let Some(mut ticker) = self.ticker.take() {
            ticker(self);
            self.ticker = Some(ticker);
        }
    }
}

impl fmt::Debug for LinearAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearAnimator")
            .field("clock", &self.clock)
            .field("started_at", &self.started_at)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
