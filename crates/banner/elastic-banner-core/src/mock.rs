//! In-memory container and target for tests and headless hosts.
//!
//! [`MockScrollView`] is a cheap handle: clones share state, so a test keeps one handle
//! to drive scrolling while the controller owns another.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::container::{ChangeSink, ObserverToken, ScrollContainer};
use crate::geometry::{Frame, ViewId};
use crate::sample::{ChangeKind, ScrollSample};
use crate::target::{Expandable, RefreshableTarget};

#[derive(Debug)]
struct MockScrollState {
    vertical_offset: f64,
    safe_top_inset: f64,
    width: f64,
    content_height: f64,
    dragging: bool,
    interactive: bool,
    hidden: bool,
    inset_top: f64,
    bounces: bool,
    subviews: Vec<ViewId>,
    frames: HashMap<ViewId, Frame>,
    inset_history: Vec<f64>,
    observers: Vec<(ObserverToken, ChangeSink)>,
    next_token: u32,
}

impl Default for MockScrollState {
    fn default() -> Self {
        Self {
            vertical_offset: 0.0,
            safe_top_inset: 0.0,
            width: 375.0,
            content_height: 0.0,
            dragging: false,
            interactive: true,
            hidden: false,
            inset_top: 0.0,
            bounces: true,
            subviews: Vec::new(),
            frames: HashMap::new(),
            inset_history: Vec::new(),
            observers: Vec::new(),
            next_token: 0,
        }
    }
}

impl MockScrollState {
    fn sample(&self) -> ScrollSample {
        ScrollSample {
            vertical_offset: self.vertical_offset,
            safe_top_inset: self.safe_top_inset,
            container_width: self.width,
            is_dragging: self.dragging,
            is_interactive: self.interactive,
            is_visible: !self.hidden,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockScrollView {
    state: Rc<RefCell<MockScrollState>>,
}

impl MockScrollView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_safe_top_inset(self, inset: f64) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.safe_top_inset = inset;
            state.vertical_offset = -inset;
        }
        self
    }

    pub fn with_width(self, width: f64) -> Self {
        self.state.borrow_mut().width = width;
        self
    }

    fn notify(&self, kind: ChangeKind) {
        let (sample, sinks) = {
            let state = self.state.borrow();
            let sinks: Vec<_> = state.observers.iter().map(|(t, s)| (*t, s.clone())).collect();
            (state.sample(), sinks)
        };
        let dead: Vec<ObserverToken> = sinks
            .into_iter()
            .filter(|(_, sink)| !sink.notify(kind, sample))
            .map(|(token, _)| token)
            .collect();
        if !dead.is_empty() {
            self.state
                .borrow_mut()
                .observers
                .retain(|(token, _)| !dead.contains(token));
        }
    }

    fn set_offset(&self, vertical_offset: f64) {
        self.state.borrow_mut().vertical_offset = vertical_offset;
        self.notify(ChangeKind::ContentOffset);
    }

    // Host-side drivers

    pub fn begin_drag(&self) {
        self.state.borrow_mut().dragging = true;
        self.notify(ChangeKind::ContentOffset);
    }

    /// Drag the content down so that `pulled` points show below the safe area.
    pub fn pull_to(&self, pulled: f64) {
        let safe_top = self.state.borrow().safe_top_inset;
        self.set_offset(-(pulled + safe_top));
    }

    /// Let go without moving.
    pub fn release(&self) {
        self.state.borrow_mut().dragging = false;
        self.notify(ChangeKind::ContentOffset);
    }

    pub fn scroll_to(&self, vertical_offset: f64) {
        self.set_offset(vertical_offset);
    }

    pub fn set_content_height(&self, height: f64) {
        self.state.borrow_mut().content_height = height;
        self.notify(ChangeKind::ContentSize);
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.state.borrow_mut().hidden = hidden;
    }

    pub fn set_interactive(&self, interactive: bool) {
        self.state.borrow_mut().interactive = interactive;
    }

    // Inspection

    pub fn content_inset(&self) -> f64 {
        self.state.borrow().inset_top
    }

    pub fn is_bouncing(&self) -> bool {
        self.state.borrow().bounces
    }

    pub fn frame_of(&self, view: ViewId) -> Option<Frame> {
        self.state.borrow().frames.get(&view).copied()
    }

    pub fn subviews(&self) -> Vec<ViewId> {
        self.state.borrow().subviews.clone()
    }

    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Every inset written, oldest first.
    pub fn inset_history(&self) -> Vec<f64> {
        self.state.borrow().inset_history.clone()
    }
}

impl ScrollContainer for MockScrollView {
    fn sample(&self) -> ScrollSample {
        self.state.borrow().sample()
    }

    fn content_inset_top(&self) -> f64 {
        self.state.borrow().inset_top
    }

    fn set_content_inset_top(&mut self, top: f64) {
        let mut state = self.state.borrow_mut();
        state.inset_top = top;
        state.inset_history.push(top);
    }

    fn bounces(&self) -> bool {
        self.state.borrow().bounces
    }

    fn set_bounces(&mut self, bounces: bool) {
        self.state.borrow_mut().bounces = bounces;
    }

    fn add_subview(&mut self, view: ViewId) {
        let mut state = self.state.borrow_mut();
        if !state.subviews.contains(&view) {
            state.subviews.push(view);
        }
    }

    fn remove_subview(&mut self, view: ViewId) {
        let mut state = self.state.borrow_mut();
        state.subviews.retain(|v| *v != view);
        state.frames.remove(&view);
    }

    fn bring_subview_to_front(&mut self, view: ViewId) {
        let mut state = self.state.borrow_mut();
        if let Some(pos) = state.subviews.iter().position(|v| *v == view) {
            let view = state.subviews.remove(pos);
            state.subviews.push(view);
        }
    }

    fn set_subview_frame(&mut self, view: ViewId, frame: Frame) {
        self.state.borrow_mut().frames.insert(view, frame);
    }

    fn observe(&mut self, sink: ChangeSink) -> ObserverToken {
        let (token, sample) = {
            let mut state = self.state.borrow_mut();
            let token = ObserverToken(state.next_token);
            state.next_token += 1;
            state.observers.push((token, sink.clone()));
            (token, state.sample())
        };
        sink.notify_initial(sample);
        token
    }

    fn unobserve(&mut self, token: ObserverToken) {
        self.state
            .borrow_mut()
            .observers
            .retain(|(t, _)| *t != token);
    }
}

/// Calls received by a [`RecordingTarget`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetLog {
    pub expansions: Vec<f64>,
    pub begin_refreshing: u32,
    pub end_refreshing: u32,
}

/// Target that records every call. Clones share the log and the desired height.
#[derive(Clone, Debug)]
pub struct RecordingTarget {
    view: ViewId,
    desired_height: Rc<Cell<f64>>,
    log: Rc<RefCell<TargetLog>>,
}

impl RecordingTarget {
    pub fn new(view: ViewId, desired_height: f64) -> Self {
        Self {
            view,
            desired_height: Rc::new(Cell::new(desired_height)),
            log: Rc::default(),
        }
    }

    pub fn set_desired_height(&self, height: f64) {
        self.desired_height.set(height);
    }

    pub fn log(&self) -> TargetLog {
        self.log.borrow().clone()
    }

    pub fn last_expansion(&self) -> Option<f64> {
        self.log.borrow().expansions.last().copied()
    }
}

impl Expandable for RecordingTarget {
    fn expanded(&mut self, delta: f64) {
        self.log.borrow_mut().expansions.push(delta);
    }
}

impl RefreshableTarget for RecordingTarget {
    fn view(&self) -> ViewId {
        self.view
    }

    fn desired_height(&self) -> f64 {
        self.desired_height.get()
    }

    fn begin_refreshing(&mut self) {
        self.log.borrow_mut().begin_refreshing += 1;
    }

    fn end_refreshing(&mut self) {
        self.log.borrow_mut().end_refreshing += 1;
    }
}
