//! Elastic Banner Core
//!
//! A pull-to-refresh / elastic header controller. [`BannerController`] reconciles scroll
//! samples from a [`ScrollContainer`] into header geometry for a [`RefreshableTarget`],
//! and drives the open/close transitions with frame-driven duration animators.
//!
//! Lifecycle: `Closed` (header follows the pull) → release past the desired height →
//! `Relaxing` (open transition running) → `Open` (header sticky at the desired height)
//! → `end_refreshing()` → close transition → `Closed`.

pub mod config;
pub mod container;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod mock;
pub mod outputs;
pub mod sample;
pub mod state;
pub mod target;
pub mod transition;

// Re-exports for hosts
pub use config::{BannerConfig, TransitionCfg};
pub use container::{ChangeSink, ObserverToken, ScrollContainer, Subscription};
pub use controller::BannerController;
pub use error::BannerError;
pub use geometry::{Frame, ViewId};
pub use outputs::BannerEvent;
pub use sample::{ChangeKind, ContainerChange, ScrollSample};
pub use state::{BannerState, TransitionKind};
pub use target::{Expandable, RefreshableTarget};
pub use transition::{AnimationSnapshot, TransitionPlan};

pub use elastic_animation_core::{Curve, ManualTime, SystemTime, TimeSource};
