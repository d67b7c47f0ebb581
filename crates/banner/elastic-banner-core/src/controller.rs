//! BannerController: reconciles scroll samples into header geometry and orchestrates the
//! open/close transitions.
//!
//! Ownership: the controller keeps its state in `Rc<RefCell<BannerShared>>` and holds the
//! active animator outside of it, so animator callbacks (which hold a `Weak` to the
//! shared state) can borrow it while the controller ticks. At any moment exactly one
//! writer owns the header frame and the inset: sample reconciliation when idle, the
//! active transition otherwise.

use std::cell::RefCell;
use std::rc::Rc;

use elastic_animation_core::{Animator, DurationAnimator, TimeSource};
use tracing::{debug, trace, warn};

use crate::config::BannerConfig;
use crate::container::{ScrollContainer, Subscription};
use crate::geometry::Frame;
use crate::outputs::BannerEvent;
use crate::sample::{ContainerChange, ScrollSample};
use crate::state::{BannerState, TransitionKind};
use crate::target::RefreshableTarget;
use crate::transition::{self, AnimationSnapshot, TransitionPlan};

/// What reconciling one sample asked of the controller.
#[derive(Copy, Clone, Debug, PartialEq)]
enum SampleOutcome {
    Ignored,
    Applied,
    /// The user let go past the desired height; open from this height, placed where
    /// the releasing sample put it.
    Released {
        from_height: f64,
        sample: ScrollSample,
    },
}

pub(crate) struct BannerShared<C, T> {
    cfg: BannerConfig,
    container: Option<C>,
    target: Option<T>,
    state: BannerState,
    in_flight: Option<TransitionKind>,
    header: Frame,
    /// Inset currently added on behalf of the header; zero while Closed.
    inset_contribution: f64,
    was_dragging: bool,
    /// Pull distance seen on the last dragging sample.
    last_drag_offset: f64,
    events: Vec<BannerEvent>,
}

impl<C: ScrollContainer, T: RefreshableTarget> BannerShared<C, T> {
    fn new(cfg: BannerConfig) -> Self {
        Self {
            cfg,
            container: None,
            target: None,
            state: BannerState::Closed,
            in_flight: None,
            header: Frame::ZERO,
            inset_contribution: 0.0,
            was_dragging: false,
            last_drag_offset: 0.0,
            events: Vec::new(),
        }
    }

    fn set_state(&mut self, next: BannerState) {
        if self.state == next {
            return;
        }
        debug!(from = ?self.state, to = ?next, "banner state changed");
        self.events.push(BannerEvent::StateChanged {
            from: self.state,
            to: next,
        });
        self.state = next;
    }

    /// Add the target's view to the container with a zero frame.
    fn attach_header(&mut self) {
        let (Some(container), Some(target)) = (self.container.as_mut(), self.target.as_ref())
        else {
            return;
        };
        let view = target.view();
        container.set_subview_frame(view, Frame::ZERO);
        container.add_subview(view);
        self.header = Frame::ZERO;
    }

    /// Replace the target, moving the header view in the container. An open header is
    /// re-seated at the new target's desired height.
    fn swap_target(&mut self, target: T) -> Option<T> {
        let previous = self.target.take();
        if let (Some(previous), Some(container)) = (previous.as_ref(), self.container.as_mut()) {
            container.remove_subview(previous.view());
        }
        self.target = Some(target);
        self.attach_header();
        if self.state.is_open() {
            self.repin_open();
        }
        previous
    }

    /// Make the inset carry exactly the current target's desired height.
    fn repin_open(&mut self) {
        let Some(desired) = self.desired_height() else {
            self.collapse();
            return;
        };
        let Some(container) = self.container.as_mut() else {
            return;
        };
        let top = container.content_inset_top();
        container.set_content_inset_top(top - self.inset_contribution + desired);
        self.inset_contribution = desired;
        let sample = container.sample();
        self.place_header(&sample, sample.actual_offset().max(desired), desired);
        debug!(desired, "open header re-seated for new target");
    }

    /// Withdraw the header's inset contribution and return to Closed without animating.
    fn collapse(&mut self) {
        if let Some(container) = self.container.as_mut() {
            let top = container.content_inset_top();
            container.set_content_inset_top(top - self.inset_contribution);
        }
        self.inset_contribution = 0.0;
        self.set_state(BannerState::Closed);
    }

    fn desired_height(&self) -> Option<f64> {
        let desired = self.target.as_ref()?.desired_height();
        if desired > 0.0 {
            Some(desired)
        } else {
            warn!(desired, "refreshable target reported a non-positive desired height");
            None
        }
    }

    /// Place the header at the top of the visible area with `height` and report the
    /// expansion ratio.
    fn place_header(&mut self, sample: &ScrollSample, height: f64, desired: f64) {
        let (Some(container), Some(target)) = (self.container.as_mut(), self.target.as_mut())
        else {
            return;
        };
        let height = height.max(0.0);
        let frame = Frame::new(
            0.0,
            sample.header_origin_y(),
            sample.container_width,
            height,
        );
        container.set_subview_frame(target.view(), frame);
        target.expanded(height / desired);
        self.header = frame;
    }

    fn apply_sample(&mut self, sample: &ScrollSample) -> SampleOutcome {
        if !sample.is_observable() {
            trace!("container hidden or not interactive; sample ignored");
            return SampleOutcome::Ignored;
        }

        let actual = sample.actual_offset();
        let released = self.was_dragging && !sample.is_dragging;
        if sample.is_dragging {
            self.last_drag_offset = actual;
        }
        self.was_dragging = sample.is_dragging;

        if self.container.is_none() {
            return SampleOutcome::Ignored;
        }
        let Some(desired) = self.desired_height() else {
            return SampleOutcome::Ignored;
        };
        if let Some(kind) = self.in_flight {
            trace!(%kind, "transition in flight owns header geometry");
            return SampleOutcome::Ignored;
        }

        match self.state {
            BannerState::Open => {
                // Sticky: may grow past the desired height, never shrinks below it.
                self.place_header(sample, actual.max(desired), desired);
                SampleOutcome::Applied
            }
            BannerState::Closed => {
                self.place_header(sample, actual.max(0.0), desired);
                if released && self.last_drag_offset >= desired {
                    SampleOutcome::Released {
                        from_height: self.last_drag_offset,
                        sample: *sample,
                    }
                } else {
                    SampleOutcome::Applied
                }
            }
            BannerState::Relaxing => SampleOutcome::Ignored,
        }
    }

    fn prepare_open(&mut self, release: Option<(f64, ScrollSample)>) -> Option<TransitionPlan> {
        if self.state != BannerState::Closed || self.in_flight.is_some() {
            debug!(state = ?self.state, "begin_refreshing ignored");
            return None;
        }
        let desired = self.desired_height()?;
        let suppress_bounce = self.cfg.suppress_bounce;
        let start = release.map_or(self.header.height, |(height, _)| height);
        let (Some(container), Some(target)) = (self.container.as_mut(), self.target.as_ref())
        else {
            debug!("begin_refreshing ignored: controller not installed");
            return None;
        };
        let view = target.view();

        let snapshot = AnimationSnapshot {
            baseline_inset_top: container.content_inset_top(),
        };
        let restore_bounces = if suppress_bounce {
            let prior = container.bounces();
            container.set_bounces(false);
            Some(prior)
        } else {
            None
        };
        container.bring_subview_to_front(view);
        let sample = match release {
            Some((_, sample)) => sample,
            None => container.sample(),
        };
        let frame = Frame::new(
            0.0,
            sample.header_origin_y(),
            sample.container_width,
            start,
        );
        container.set_subview_frame(view, frame);
        self.header = frame;

        self.in_flight = Some(TransitionKind::Open);
        self.set_state(BannerState::Relaxing);
        self.events.push(BannerEvent::TransitionStarted {
            kind: TransitionKind::Open,
            from_height: start,
            to_height: desired,
        });
        debug!(from = start, to = desired, "open transition started");
        Some(TransitionPlan::open(snapshot, start, desired, restore_bounces))
    }

    fn prepare_close(&mut self) -> Option<TransitionPlan> {
        if self.state != BannerState::Open || self.in_flight.is_some() {
            debug!(state = ?self.state, in_flight = ?self.in_flight, "end_refreshing ignored");
            return None;
        }
        let desired = self.desired_height()?;
        let start = self.header.height;
        let (Some(container), Some(target)) = (self.container.as_mut(), self.target.as_mut())
        else {
            debug!("end_refreshing ignored: controller not installed");
            return None;
        };

        target.end_refreshing();
        let snapshot = AnimationSnapshot {
            baseline_inset_top: container.content_inset_top() - self.inset_contribution,
        };
        container.bring_subview_to_front(target.view());

        self.in_flight = Some(TransitionKind::Close);
        self.events.push(BannerEvent::TransitionStarted {
            kind: TransitionKind::Close,
            from_height: start,
            to_height: 0.0,
        });
        debug!(from = start, "close transition started");
        Some(TransitionPlan::close(snapshot, start, desired))
    }

    /// One transition tick: inset = baseline + height, header = height.
    pub(crate) fn apply_transition_height(&mut self, plan: &TransitionPlan, height: f64) {
        let height = height.max(0.0);
        let Some(container) = self.container.as_mut() else {
            return;
        };
        container.set_content_inset_top(plan.snapshot.baseline_inset_top + height);
        self.inset_contribution = height;
        let sample = container.sample();
        self.place_header(&sample, height, plan.desired_height);
    }

    /// Pin terminal geometry and settle the state, whether or not the animator ran its
    /// full duration.
    pub(crate) fn finish_transition(&mut self, plan: &TransitionPlan, completed: bool) {
        self.apply_transition_height(plan, plan.terminal_height());
        if let (Some(prior), Some(container)) = (plan.restore_bounces, self.container.as_mut()) {
            container.set_bounces(prior);
        }
        self.in_flight = None;
        match plan.kind {
            TransitionKind::Open => {
                self.set_state(BannerState::Open);
                if let Some(target) = self.target.as_mut() {
                    target.begin_refreshing();
                }
            }
            TransitionKind::Close => self.set_state(BannerState::Closed),
        }
        self.events.push(BannerEvent::TransitionFinished {
            kind: plan.kind,
            completed,
        });
        debug!(kind = %plan.kind, completed, "transition finished");
    }
}

/// Pull-to-refresh controller attached to one container and one refreshable target.
///
/// Hosts call [`BannerController::frame`] on every display refresh. Container changes
/// queue up on the controller's subscription and are reconciled, in arrival order, by
/// [`BannerController::sync`] (which `frame` calls first).
pub struct BannerController<C, T> {
    shared: Rc<RefCell<BannerShared<C, T>>>,
    time: Rc<dyn TimeSource>,
    subscription: Option<Subscription>,
    transition: Option<DurationAnimator>,
}

impl<C, T> BannerController<C, T>
where
    C: ScrollContainer + 'static,
    T: RefreshableTarget + 'static,
{
    pub fn new(cfg: BannerConfig, time: Rc<dyn TimeSource>) -> Self {
        Self {
            shared: Rc::new(RefCell::new(BannerShared::new(cfg))),
            time,
            subscription: None,
            transition: None,
        }
    }

    pub fn with_target(mut self, target: T) -> Self {
        self.set_target(target);
        self
    }

    pub fn config(&self) -> BannerConfig {
        self.shared.borrow().cfg.clone()
    }

    pub fn state(&self) -> BannerState {
        self.shared.borrow().state
    }

    pub fn transition_in_flight(&self) -> Option<TransitionKind> {
        self.shared.borrow().in_flight
    }

    pub fn is_installed(&self) -> bool {
        self.shared.borrow().container.is_some()
    }

    /// Last frame written to the header view.
    pub fn header_frame(&self) -> Frame {
        self.shared.borrow().header
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<BannerEvent> {
        std::mem::take(&mut self.shared.borrow_mut().events)
    }

    pub fn inspect_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.shared.borrow().target.as_ref().map(f)
    }

    pub fn inspect_container<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        self.shared.borrow().container.as_ref().map(f)
    }

    /// Replace the refreshable target. The old header view leaves the container and the
    /// new one joins it with a zero frame. Any running transition is stopped first.
    ///
    /// While Open the header stays open: the inset and header are re-seated at the new
    /// target's desired height (or collapse to Closed when it has none).
    pub fn set_target(&mut self, target: T) -> Option<T> {
        self.cancel_transition();
        self.shared.borrow_mut().swap_target(target)
    }

    /// Attach to `container`: subscribe to its changes, add the header view and reconcile
    /// the initial values. Returns the previously installed container, if any.
    pub fn install(&mut self, mut container: C) -> Option<C> {
        let previous = self.uninstall();
        let subscription = Subscription::attach(&mut container);
        {
            let mut shared = self.shared.borrow_mut();
            shared.container = Some(container);
            shared.attach_header();
        }
        debug!(token = ?subscription.token(), "banner controller installed");
        self.subscription = Some(subscription);
        self.sync();
        previous
    }

    /// Detach from the container. A running transition is stopped first, which pins its
    /// terminal geometry. An open header is then collapsed: the target is told to stop
    /// refreshing and the container gets its inset back without the header's share.
    pub fn uninstall(&mut self) -> Option<C> {
        self.cancel_transition();
        let subscription = self.subscription.take();
        let mut shared = self.shared.borrow_mut();
        if shared.container.is_none() {
            return None;
        }
        if shared.state.is_open() {
            if let Some(target) = shared.target.as_mut() {
                target.end_refreshing();
            }
        }
        shared.collapse();
        let mut container = shared.container.take()?;
        if let Some(subscription) = subscription {
            container.unobserve(subscription.token());
        }
        if let Some(target) = shared.target.as_ref() {
            container.remove_subview(target.view());
        }
        shared.header = Frame::ZERO;
        shared.was_dragging = false;
        debug!("banner controller uninstalled");
        Some(container)
    }

    /// Reconcile every queued container change in arrival order.
    pub fn sync(&mut self) {
        while let Some(change) = self.subscription.as_ref().and_then(Subscription::try_next) {
            self.handle_change(change);
        }
    }

    /// Reconcile one change. Hosts that push changes directly (rather than through the
    /// container subscription) call this.
    pub fn handle_change(&mut self, change: ContainerChange) {
        trace!(kind = ?change.kind, offset = change.sample.vertical_offset, "container change");
        let outcome = self.shared.borrow_mut().apply_sample(&change.sample);
        if let SampleOutcome::Released { from_height, sample } = outcome {
            self.launch(TransitionKind::Open, Some((from_height, sample)), None);
        }
    }

    /// Display-refresh entry point: reconcile queued changes, then tick the transition.
    pub fn frame(&mut self) {
        self.sync();
        if let Some(animator) = self.transition.as_mut() {
            animator.frame();
            if !animator.is_running() {
                self.transition = None;
            }
        }
    }

    /// Open the header programmatically. Returns `false` (and does nothing) when already
    /// relaxing or open, or when not installed.
    pub fn begin_refreshing(&mut self) -> bool {
        self.launch(TransitionKind::Open, None, None)
    }

    /// [`BannerController::begin_refreshing`] with a hook run after the open transition
    /// completes. The hook is dropped unrun when the call is ignored. It runs inside
    /// [`BannerController::frame`] and must not re-enter the controller.
    pub fn begin_refreshing_then<F>(&mut self, hook: F) -> bool
    where
        F: FnOnce() + 'static,
    {
        self.launch(TransitionKind::Open, None, Some(Box::new(hook)))
    }

    /// Close the header. Returns `false` (and does nothing) unless open and idle.
    pub fn end_refreshing(&mut self) -> bool {
        self.launch(TransitionKind::Close, None, None)
    }

    fn launch(
        &mut self,
        kind: TransitionKind,
        release: Option<(f64, ScrollSample)>,
        hook: Option<Box<dyn FnOnce()>>,
    ) -> bool {
        let (plan, cfg) = {
            let mut shared = self.shared.borrow_mut();
            let plan = match kind {
                TransitionKind::Open => shared.prepare_open(release),
                TransitionKind::Close => shared.prepare_close(),
            };
            (plan, *shared.cfg.transition(kind))
        };
        let Some(plan) = plan else {
            return false;
        };

        let mut animator = transition::animator_for(
            plan,
            Rc::downgrade(&self.shared),
            Rc::clone(&self.time),
            &cfg,
            hook,
        );
        animator.start();
        self.transition = Some(animator);
        true
    }

    fn cancel_transition(&mut self) {
        if let Some(mut animator) = self.transition.take() {
            animator.stop();
        }
    }
}

impl<C, T> std::fmt::Debug for BannerController<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("BannerController")
            .field("state", &shared.state)
            .field("in_flight", &shared.in_flight)
            .field("header", &shared.header)
            .field("installed", &shared.container.is_some())
            .field("transition", &self.transition)
            .finish()
    }
}
