//! Errors surfaced while configuring a controller. Runtime misuse (triggering a
//! transition in the wrong state) is a silent no-op, not an error.

use elastic_animation_core::AnimationError;
use thiserror::Error;

use crate::state::TransitionKind;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BannerError {
    #[error("banner config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid {transition} transition: {source}")]
    InvalidTransition {
        transition: TransitionKind,
        #[source]
        source: AnimationError,
    },
}
