//! Blend-space policies: which two children are active, and at what weight.

use serde::{Deserialize, Serialize};

/// Selection produced by a [`BlendSpace`] for one tick: the indices of the
/// two active children and the blend weight between them. Indices may be
/// equal; the weight is the second child's share.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveSources {
    pub first: usize,
    pub second: usize,
    pub weight: f32,
}

/// Read-only view of the owning blend node, handed to the policy each tick.
pub struct SpaceView<'a> {
    lengths: &'a [f32],
}

impl<'a> SpaceView<'a> {
    pub(crate) fn new(lengths: &'a [f32]) -> Self {
        Self { lengths }
    }

    pub fn child_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn child_length(&self, index: usize) -> Option<f32> {
        self.lengths.get(index).copied()
    }
}

/// Policy deciding, each tick, which pair of children a blend node combines
/// and how strongly the second one contributes.
pub trait BlendSpace {
    /// Called once at the start of every tick of the owning node.
    fn select(&mut self, view: &SpaceView<'_>) -> ActiveSources;

    /// Externally supplied control value (axis position, speed fraction, …).
    fn set_value(&mut self, value: f32);
}

/// Maps a control value on a linear axis onto the two nearest children,
/// spacing the children evenly across `[min, max]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearBlendSpace {
    min: f32,
    max: f32,
    value: f32,
}

impl LinearBlendSpace {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            value: min,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

impl BlendSpace for LinearBlendSpace {
    fn select(&mut self, view: &SpaceView<'_>) -> ActiveSources {
        let count = view.child_count();
        if count < 2 || self.max <= self.min {
            return ActiveSources {
                first: 0,
                second: 0,
                weight: 1.0,
            };
        }
        let step = (self.max - self.min) / (count - 1) as f32;
        let scaled = ((self.value - self.min) / step).clamp(0.0, (count - 1) as f32);
        let first = (scaled.floor() as usize).min(count - 2);
        ActiveSources {
            first,
            second: first + 1,
            weight: (scaled - first as f32).clamp(0.0, 1.0),
        }
    }

    fn set_value(&mut self, value: f32) {
        self.value = value;
    }
}
