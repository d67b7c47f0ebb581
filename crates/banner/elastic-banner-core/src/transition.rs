//! Open/close transition plans and the animators that play them.
//!
//! A plan is fixed when the transition starts: the inset baseline, the height range to
//! travel and its direction. The animator's tick maps eased progress onto that range and
//! writes header height and inset; completion pins the terminal geometry.

use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::{Rc, Weak};

use elastic_animation_core::{AnimatableRange, DurationAnimator, TimeSource};
use serde::{Deserialize, Serialize};

use crate::config::TransitionCfg;
use crate::container::ScrollContainer;
use crate::controller::BannerShared;
use crate::state::TransitionKind;
use crate::target::RefreshableTarget;

/// Container inset captured at the instant a transition begins.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSnapshot {
    /// Inset top without the header's contribution; ticks add the current height.
    pub baseline_inset_top: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPlan {
    pub kind: TransitionKind,
    pub snapshot: AnimationSnapshot,
    pub range: RangeInclusive<f64>,
    /// Travel from the range's upper bound to its lower bound.
    pub reversed: bool,
    pub desired_height: f64,
    /// Bounce setting to restore on completion, when it was suppressed.
    pub restore_bounces: Option<bool>,
}

impl TransitionPlan {
    /// Ease from `start_height` to `desired_height`, whichever side it starts on.
    pub fn open(
        snapshot: AnimationSnapshot,
        start_height: f64,
        desired_height: f64,
        restore_bounces: Option<bool>,
    ) -> Self {
        Self {
            kind: TransitionKind::Open,
            snapshot,
            range: start_height.min(desired_height)..=start_height.max(desired_height),
            reversed: start_height > desired_height,
            desired_height,
            restore_bounces,
        }
    }

    /// Shrink from `start_height` to zero.
    pub fn close(snapshot: AnimationSnapshot, start_height: f64, desired_height: f64) -> Self {
        Self {
            kind: TransitionKind::Close,
            snapshot,
            range: 0.0..=start_height.max(0.0),
            reversed: true,
            desired_height,
            restore_bounces: None,
        }
    }

    #[inline]
    pub fn value_at(&self, progress: f64) -> f64 {
        self.range.value_at(progress, self.reversed)
    }

    pub fn start_height(&self) -> f64 {
        self.value_at(0.0)
    }

    pub fn terminal_height(&self) -> f64 {
        match self.kind {
            TransitionKind::Open => self.desired_height,
            TransitionKind::Close => 0.0,
        }
    }
}

/// Build the animator for `plan`. Callbacks hold a weak reference to the controller
/// state and do nothing once it is gone.
pub(crate) fn animator_for<C, T>(
    plan: TransitionPlan,
    shared: Weak<RefCell<BannerShared<C, T>>>,
    time: Rc<dyn TimeSource>,
    cfg: &TransitionCfg,
    hook: Option<Box<dyn FnOnce()>>,
) -> DurationAnimator
where
    C: ScrollContainer + 'static,
    T: RefreshableTarget + 'static,
{
    let tick_plan = plan.clone();
    let tick_shared = shared.clone();
    let mut hook = hook;

    DurationAnimator::new(time, cfg.duration)
        .with_curve(cfg.curve)
        .on_tick(move |_, progress| {
            if let Some(shared) = tick_shared.upgrade() {
                let height = tick_plan.value_at(progress);
                shared.borrow_mut().apply_transition_height(&tick_plan, height);
            }
        })
        .then(move |completed| {
            if let Some(shared) = shared.upgrade() {
                shared.borrow_mut().finish_transition(&plan, completed);
            }
            if let Some(hook) = hook.take() {
                hook();
            }
        })
}
