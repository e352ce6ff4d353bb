//! Error types for blend-tree construction.

use serde::{Deserialize, Serialize};

/// Invalid-configuration faults caught when a tree is built. The per-frame
/// path is infallible by contract and has no error channel.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BlendError {
    /// A blend node with no children has nothing to blend.
    #[error("a blend action needs at least one child action")]
    NoChildren,

    /// Track keyframe shape mismatch.
    #[error("track has {times} time stamps for {frames} frames")]
    TrackLengthMismatch { times: usize, frames: usize },

    /// Track time stamps must be non-decreasing.
    #[error("track time stamps must be non-decreasing")]
    UnorderedTrack,
}
