//! Scroll samples and the typed change events that carry them.

use serde::{Deserialize, Serialize};

/// Container state captured when an offset or content-size change is reported.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollSample {
    /// Content offset along y; negative while the content is pulled down.
    pub vertical_offset: f64,
    pub safe_top_inset: f64,
    pub container_width: f64,
    pub is_dragging: bool,
    pub is_interactive: bool,
    pub is_visible: bool,
}

impl ScrollSample {
    /// How far the content is pulled below its resting point. This is the height the
    /// header should occupy while it follows the pull.
    #[inline]
    pub fn actual_offset(&self) -> f64 {
        -self.vertical_offset - self.safe_top_inset
    }

    /// y that pins the header to the top of the visible area.
    #[inline]
    pub fn header_origin_y(&self) -> f64 {
        self.safe_top_inset + self.vertical_offset
    }

    /// Samples from hidden or non-interactive containers are ignored.
    #[inline]
    pub fn is_observable(&self) -> bool {
        self.is_interactive && self.is_visible
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    ContentOffset,
    ContentSize,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerChange {
    pub kind: ChangeKind,
    pub sample: ScrollSample,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(vertical_offset: f64, safe_top_inset: f64) -> ScrollSample {
        ScrollSample {
            vertical_offset,
            safe_top_inset,
            container_width: 320.0,
            is_dragging: false,
            is_interactive: true,
            is_visible: true,
        }
    }

    #[test]
    fn pull_distance_accounts_for_safe_area() {
        // Resting under a 44pt safe area the offset is -44: nothing pulled.
        let resting = sample(-44.0, 44.0);
        assert_eq!(resting.actual_offset(), 0.0);
        assert_eq!(resting.header_origin_y(), 0.0);

        let pulled = sample(-144.0, 44.0);
        assert_eq!(pulled.actual_offset(), 100.0);
        assert_eq!(pulled.header_origin_y(), -100.0);
    }

    #[test]
    fn hidden_or_disabled_containers_are_not_observable() {
        let mut s = sample(0.0, 0.0);
        assert!(s.is_observable());
        s.is_visible = false;
        assert!(!s.is_observable());
        s.is_visible = true;
        s.is_interactive = false;
        assert!(!s.is_observable());
    }
}
