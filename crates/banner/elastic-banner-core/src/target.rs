//! Host-implemented header contracts.

use crate::geometry::ViewId;

/// Notified with expansion progress: header height over desired height. The delta may
/// exceed 1.0 while the header is pulled past its desired height but never drops below
/// zero.
pub trait Expandable {
    fn expanded(&mut self, delta: f64);
}

/// A header that can be pulled open to trigger a refresh.
pub trait RefreshableTarget: Expandable {
    fn view(&self) -> ViewId;
    fn desired_height(&self) -> f64;

    /// Called once the open transition has completed.
    fn begin_refreshing(&mut self);
    /// Called when the close transition starts.
    fn end_refreshing(&mut self);
}
