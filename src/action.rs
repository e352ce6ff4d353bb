//! Capability traits shared by every pose-producing action.

use crate::target::TargetHandle;
use crate::transform::Transform;

/// Receiver for per-target pose contributions.
///
/// A parent blend node hands one of these to each active child for the
/// duration of a single `advance` call, so the child's output is aggregated
/// by the parent instead of being written straight onto the targets.
pub trait PoseCollector {
    /// Report one target's contribution at the given blend weight.
    ///
    /// Panics if `target` was not part of any child's target set when the
    /// collecting blend node was built: that is a construction-time
    /// invariant violation, not a recoverable condition.
    fn collect_transform(&mut self, target: &TargetHandle, transform: &Transform, weight: f32);
}

/// A time-varying pose source: a sampled clip, a nested blend node, or any
/// other producer of per-target transforms.
pub trait BlendableAction {
    /// Duration of this action's playback range.
    fn length(&self) -> f32;

    /// Blend weight assigned by the owning blend node for the current tick.
    fn weight(&self) -> f32;
    fn set_weight(&mut self, weight: f32);

    /// Top-level cross-fade weight applied when this action is the root of
    /// its tree and writes targets directly. Defaults to 1 (verbatim write).
    fn transition_weight(&self) -> f32;
    fn set_transition_weight(&mut self, weight: f32);

    /// Every target this action animates.
    fn targets(&self) -> Vec<TargetHandle>;

    /// Advance to local `time`. With a collector, per-target output is
    /// reported into it at this action's assigned weight; without one, the
    /// action is the root of its tree and applies output to the targets
    /// directly, cross-faded by its transition weight.
    ///
    /// Returns whether `time` is still inside this action's playback range.
    fn advance(&mut self, time: f32, collector: Option<&mut (dyn PoseCollector + '_)>) -> bool;
}

/// Write `transform` onto `target`, cross-fading from the target's current
/// pose when `transition_weight` is below one.
pub(crate) fn apply_to_target(target: &TargetHandle, transform: &Transform, transition_weight: f32) {
    if transition_weight == 1.0 {
        target.set_local_transform(*transform);
    } else {
        let current = target.local_transform();
        target.set_local_transform(current.interpolate(transform, transition_weight));
    }
}
