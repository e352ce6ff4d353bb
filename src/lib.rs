//! Blend-tree core for real-time pose animation (engine-agnostic).
//!
//! This crate defines the pose [`Transform`] and its weighted blend, the
//! [`BlendableAction`] capability shared by every pose source, the
//! [`BlendSpace`] policy contract with a linear-axis implementation, the
//! keyframe leaf [`ClipAction`], and the core [`BlendAction`] node that
//! combines two active children per tick into one pose per target.

pub mod action;
pub mod blend;
pub mod blend_space;
pub mod clip;
pub mod error;
pub mod interp;
pub mod target;
pub mod transform;

// Re-exports for consumers (adapters)
pub use action::{BlendableAction, PoseCollector};
pub use blend::{BlendAction, BlendMode};
pub use blend_space::{ActiveSources, BlendSpace, LinearBlendSpace, SpaceView};
pub use clip::{ClipAction, TransformTrack};
pub use error::BlendError;
pub use target::{HasLocalTransform, TargetHandle};
pub use transform::Transform;
