//! Controller configuration.

use serde::{Deserialize, Serialize};

use elastic_animation_core::{check_duration, Curve};

use crate::error::BannerError;
use crate::state::TransitionKind;

/// Timing of one transition.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionCfg {
    /// Seconds.
    pub duration: f64,
    pub curve: Curve,
}

impl Default for TransitionCfg {
    fn default() -> Self {
        Self {
            duration: 0.3,
            curve: Curve::EaseInEaseOut,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub open: TransitionCfg,
    pub close: TransitionCfg,
    /// Turn the container's elastic bounce off while the open transition runs.
    pub suppress_bounce: bool,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            open: TransitionCfg::default(),
            close: TransitionCfg::default(),
            suppress_bounce: true,
        }
    }
}

impl BannerConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, BannerError> {
        let cfg: BannerConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), BannerError> {
        for kind in [TransitionKind::Open, TransitionKind::Close] {
            let transition = self.transition(kind);
            check_duration(transition.duration)
                .and_then(|_| transition.curve.validate())
                .map_err(|source| BannerError::InvalidTransition {
                    transition: kind,
                    source,
                })?;
        }
        Ok(())
    }

    pub fn transition(&self, kind: TransitionKind) -> &TransitionCfg {
        match kind {
            TransitionKind::Open => &self.open,
            TransitionKind::Close => &self.close,
        }
    }
}
