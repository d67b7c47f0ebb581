//! Semantic events recorded by the controller.
//!
//! Geometry is written straight into the container and target; events only describe
//! lifecycle milestones so hosts can log or react to them after a frame.

use serde::{Deserialize, Serialize};

use crate::state::{BannerState, TransitionKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BannerEvent {
    StateChanged {
        from: BannerState,
        to: BannerState,
    },
    TransitionStarted {
        kind: TransitionKind,
        from_height: f64,
        to_height: f64,
    },
    TransitionFinished {
        kind: TransitionKind,
        /// `false` when the animator was stopped before its duration elapsed.
        completed: bool,
    },
}
