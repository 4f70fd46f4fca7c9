//! Hand tracker error types.

use thiserror::Error;

/// Failures reported across the tracker boundary. None of these stop the
/// simulation; a frame that sees one behaves as if no hand were in view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// The consuming side of the bridge has been dropped.
    #[error("hand tracker bridge disconnected")]
    Disconnected,

    /// The inference backend failed to produce a result for a frame.
    #[error("hand inference failed: {0}")]
    Inference(String),
}
