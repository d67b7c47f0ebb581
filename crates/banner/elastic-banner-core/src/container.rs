//! The scrollable container contract and its change subscription.
//!
//! Containers push [`ContainerChange`]s into every registered [`ChangeSink`]; the
//! controller owns the receiving end and drains it in arrival order.

use std::sync::mpsc::{channel, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::geometry::{Frame, ViewId};
use crate::sample::{ChangeKind, ContainerChange, ScrollSample};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObserverToken(pub u32);

/// Sending half handed to a container by [`ScrollContainer::observe`].
#[derive(Clone, Debug)]
pub struct ChangeSink {
    sender: Sender<ContainerChange>,
}

impl ChangeSink {
    /// Queue a change. Returns `false` once the observer has gone away, at which point
    /// the container may drop the sink.
    pub fn notify(&self, kind: ChangeKind, sample: ScrollSample) -> bool {
        self.sender.send(ContainerChange { kind, sample }).is_ok()
    }

    /// Deliver the current offset and content size, as required at subscription time.
    pub fn notify_initial(&self, sample: ScrollSample) -> bool {
        self.notify(ChangeKind::ContentOffset, sample) && self.notify(ChangeKind::ContentSize, sample)
    }
}

/// A live observation of one container.
#[derive(Debug)]
pub struct Subscription {
    token: ObserverToken,
    receiver: Receiver<ContainerChange>,
}

impl Subscription {
    /// Register a new observer on `container`.
    pub fn attach<C: ScrollContainer + ?Sized>(container: &mut C) -> Self {
        let (sender, receiver) = channel();
        let token = container.observe(ChangeSink { sender });
        Self { token, receiver }
    }

    pub fn token(&self) -> ObserverToken {
        self.token
    }

    /// Next queued change, if any.
    pub fn try_next(&self) -> Option<ContainerChange> {
        self.receiver.try_recv().ok()
    }
}

/// A scrollable container hosting the header view.
pub trait ScrollContainer {
    /// Current scroll state.
    fn sample(&self) -> ScrollSample;

    fn content_inset_top(&self) -> f64;
    fn set_content_inset_top(&mut self, top: f64);

    /// Elastic overscroll.
    fn bounces(&self) -> bool;
    fn set_bounces(&mut self, bounces: bool);

    fn add_subview(&mut self, view: ViewId);
    fn remove_subview(&mut self, view: ViewId);
    fn bring_subview_to_front(&mut self, view: ViewId);
    fn set_subview_frame(&mut self, view: ViewId, frame: Frame);

    /// Start reporting offset and content-size changes to `sink`. Implementations must
    /// immediately report the current values (see [`ChangeSink::notify_initial`]).
    fn observe(&mut self, sink: ChangeSink) -> ObserverToken;
    fn unobserve(&mut self, token: ObserverToken);
}
