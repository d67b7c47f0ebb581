use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use elastic_animation_core::{
    Animator, Curve, DurationAnimator, FrameClock, LinearAnimator, ManualTime, TimeSource,
};

#[derive(Default)]
struct Log {
    ticks: Vec<f64>,
    running_during_tick: Vec<bool>,
    completions: Vec<bool>,
}

fn recording_animator(time: &ManualTime, duration: f64) -> (DurationAnimator, Rc<RefCell<Log>>) {
    let log = Rc::new(RefCell::new(Log::default()));
    let tick_log = Rc::clone(&log);
    let done_log = Rc::clone(&log);
    let animator = DurationAnimator::new(Rc::new(time.clone()), duration)
        .on_tick(move |animator, progress| {
            let mut log = tick_log.borrow_mut();
            log.ticks.push(progress);
            log.running_during_tick.push(animator.is_running());
        })
        .then(move |completed| done_log.borrow_mut().completions.push(completed));
    (animator, log)
}

#[test]
fn start_then_stop_delivers_one_tick_and_a_cancelled_completion() {
    let time = ManualTime::new();
    let (mut animator, log) = recording_animator(&time, 0.3);

    animator.start();
    animator.stop();

    let log = log.borrow();
    assert_eq!(log.ticks, vec![0.0]);
    assert_eq!(log.completions, vec![false]);
    assert!(!animator.is_running());
    assert!(animator.started_at().is_none());
}

#[test]
fn natural_completion_reports_true() {
    let time = ManualTime::new();
    let (mut animator, log) = recording_animator(&time, 0.5);
    animator.start();

    let mut frames = 0;
    while animator.is_running() && frames < 100 {
        time.advance(0.125);
        animator.frame();
        frames += 1;
    }

    let log = log.borrow();
    assert!(!animator.is_running());
    assert_eq!(log.completions, vec![true]);
    // Four running ticks plus the final tick from stop.
    assert_eq!(log.ticks.len(), 5);
    assert_eq!(log.running_during_tick.last(), Some(&false));
    assert!(log.running_during_tick[..4].iter().all(|r| *r));
    assert_abs_diff_eq!(log.ticks[0], 0.25, epsilon = 1e-9);
    assert_abs_diff_eq!(*log.ticks.last().unwrap(), 1.0, epsilon = 1e-9);
}

#[test]
fn eased_progress_goes_through_the_curve() {
    let time = ManualTime::new();
    let (animator, log) = recording_animator(&time, 1.0);
    let mut animator = animator.with_curve(Curve::EaseIn);
    animator.start();
    time.advance(0.5);
    animator.frame();

    assert_abs_diff_eq!(animator.raw_progress(), 0.5, epsilon = 1e-12);
    let eased = log.borrow().ticks[0];
    assert_abs_diff_eq!(eased, Curve::EaseIn.value_at(0.5), epsilon = 1e-12);
    assert!(eased < 0.5);
}

#[test]
fn repeating_animator_restarts_with_a_fresh_timestamp() {
    let time = ManualTime::new();
    let (animator, log) = recording_animator(&time, 0.5);
    let mut animator = animator.repeating(true);
    animator.start();
    assert_eq!(animator.started_at(), Some(0.0));

    time.advance(0.6);
    animator.frame();

    assert!(animator.is_running());
    assert_eq!(animator.started_at(), Some(0.6));
    assert_eq!(log.borrow().completions, vec![true]);

    // External stop never restarts, even for repeating animators.
    time.advance(0.1);
    animator.stop();
    assert!(!animator.is_running());
    assert_eq!(log.borrow().completions, vec![true, false]);
}

#[test]
fn starting_twice_keeps_the_original_timestamp() {
    let time = ManualTime::new();
    let (mut animator, _log) = recording_animator(&time, 1.0);
    animator.start();
    time.advance(0.2);
    animator.start();
    assert_eq!(animator.started_at(), Some(0.0));

    animator.stop();
    animator.stop();
    assert!(!animator.frame(), "stopped animators do not tick");
}

#[derive(Default)]
struct Hooks {
    starts: usize,
    stops: usize,
    running_seen_by_start: Option<bool>,
    running_seen_by_stop: Option<bool>,
}

struct CountingAnimator {
    clock: FrameClock,
    hooks: Hooks,
    ticks: usize,
}

impl Animator for CountingAnimator {
    fn clock(&self) -> &FrameClock {
        &self.clock
    }
    fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
    fn on_start(&mut self) {
        self.hooks.starts += 1;
        self.hooks.running_seen_by_start = Some(self.is_running());
    }
    fn on_stop(&mut self) {
        self.hooks.stops += 1;
        self.hooks.running_seen_by_stop = Some(self.is_running());
    }
    fn tick(&mut self) {
        self.ticks += 1;
    }
}

#[test]
fn lifecycle_hooks_fire_once_per_transition() {
    let mut animator = CountingAnimator {
        clock: FrameClock::new(Rc::new(ManualTime::new())),
        hooks: Hooks::default(),
        ticks: 0,
    };

    animator.start();
    animator.start();
    assert!(animator.frame());
    assert!(animator.frame());
    animator.stop();
    animator.stop();
    assert!(!animator.frame());

    assert_eq!(animator.hooks.starts, 1);
    assert_eq!(animator.hooks.stops, 1);
    assert_eq!(animator.hooks.running_seen_by_start, Some(false));
    assert_eq!(animator.hooks.running_seen_by_stop, Some(false));
    assert_eq!(animator.ticks, 2);
    assert_eq!(animator.clock().frames(), 2);
}

struct Bare {
    clock: FrameClock,
}

impl Animator for Bare {
    fn clock(&self) -> &FrameClock {
        &self.clock
    }
    fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}

#[test]
#[should_panic(expected = "Animator::tick")]
fn default_tick_is_an_unimplemented_fault() {
    let mut bare = Bare {
        clock: FrameClock::new(Rc::new(ManualTime::new())),
    };
    bare.start();
    bare.frame();
}

#[test]
fn linear_animator_ticks_until_stopped() {
    let time = ManualTime::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut animator = LinearAnimator::new(Rc::new(time.clone()))
        .on_tick(move |animator| sink.borrow_mut().push((animator.ticks(), animator.elapsed())));

    animator.start();
    for _ in 0..3 {
        time.advance_frame();
        animator.frame();
    }
    animator.stop();
    time.advance_frame();
    animator.frame();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2].0, 3);
    assert_abs_diff_eq!(seen[2].1, 3.0 * FrameClock::frame_interval(), epsilon = 1e-12);
    assert_eq!(animator.elapsed(), 0.0);
    assert!(time.now() > 0.0);
}
