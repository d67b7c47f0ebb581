use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerState {
    /// Header follows the pull; initial state.
    #[default]
    Closed,
    /// Open transition in flight; scroll samples trigger nothing.
    Relaxing,
    /// Header pinned at its desired height with the inset applied.
    Open,
}

impl BannerState {
    #[inline]
    pub fn is_open(&self) -> bool {
        *self == BannerState::Open
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Open,
    Close,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKind::Open => f.write_str("open"),
            TransitionKind::Close => f.write_str("close"),
        }
    }
}
