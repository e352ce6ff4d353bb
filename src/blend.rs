//! Two-way blend node: combines the two active children selected by a
//! [`BlendSpace`] into one aggregated pose per target.

use hashbrown::HashMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::action::{apply_to_target, BlendableAction, PoseCollector};
use crate::blend_space::{BlendSpace, SpaceView};
use crate::error::BlendError;
use crate::target::TargetHandle;
use crate::transform::Transform;

/// Temporal semantics for children whose lengths differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Scale each child's clock by a fixed length ratio so all children
    /// finish together.
    Stretch,
    /// Let each child run an independent accumulating clock, restarting
    /// when it reaches the end of its own range.
    #[default]
    Loop,
}

/// Blend node over N children, two of which are active on any given tick.
///
/// The first active child always contributes at full weight and the second
/// is blended on top at the blend-space weight, per target. Aggregated
/// buffers are either forwarded to an outer collector (when this node is
/// itself a child of another blend) or written onto the targets.
pub struct BlendAction {
    children: Vec<Box<dyn BlendableAction>>,
    child_lengths: Vec<f32>,
    blend_space: Box<dyn BlendSpace>,
    blend_mode: BlendMode,
    first_active: usize,
    second_active: usize,
    blend_weight: f32,
    last_time: f32,
    // In stretch mode this holds per-child time factors, in loop mode the
    // per-child elapsed time.
    time_data: Vec<f32>,
    targets: HashMap<TargetHandle, Transform>,
    length: f32,
    weight: f32,
    transition_weight: f32,
}

impl BlendAction {
    /// Build a blend node in the default [`BlendMode::Loop`].
    pub fn new(
        blend_space: Box<dyn BlendSpace>,
        children: Vec<Box<dyn BlendableAction>>,
    ) -> Result<Self, BlendError> {
        Self::with_mode(blend_space, BlendMode::default(), children)
    }

    /// Build a blend node with an explicit temporal mode.
    ///
    /// The node's length is the maximum child length, and its target set is
    /// the union of every child's targets (shared targets get one buffer).
    /// In stretch mode the per-child time factors are fixed here and do not
    /// track later changes to a child's own length.
    pub fn with_mode(
        blend_space: Box<dyn BlendSpace>,
        blend_mode: BlendMode,
        children: Vec<Box<dyn BlendableAction>>,
    ) -> Result<Self, BlendError> {
        if children.is_empty() {
            return Err(BlendError::NoChildren);
        }

        let child_lengths: Vec<f32> = children.iter().map(|c| c.length()).collect();
        let length = child_lengths.iter().fold(0.0_f32, |acc, l| acc.max(*l));

        let mut targets: HashMap<TargetHandle, Transform> = HashMap::new();
        for child in &children {
            for target in child.targets() {
                targets.entry(target).or_default();
            }
        }

        let time_data = match blend_mode {
            BlendMode::Stretch => child_lengths
                .iter()
                .map(|l| {
                    if *l > 0.0 && length > 0.0 {
                        l / length
                    } else {
                        1.0
                    }
                })
                .collect(),
            BlendMode::Loop => vec![0.0; children.len()],
        };

        debug!(
            "blend action: {} children, {} targets, mode {:?}, length {}",
            children.len(),
            targets.len(),
            blend_mode,
            length
        );

        Ok(Self {
            children,
            child_lengths,
            blend_space,
            blend_mode,
            first_active: 0,
            second_active: 0,
            blend_weight: 0.0,
            last_time: 0.0,
            time_data,
            targets,
            length,
            weight: 1.0,
            transition_weight: 1.0,
        })
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn blend_space(&self) -> &dyn BlendSpace {
        self.blend_space.as_ref()
    }

    /// Mutable access to the policy, e.g. to push a new control value.
    pub fn blend_space_mut(&mut self) -> &mut dyn BlendSpace {
        self.blend_space.as_mut()
    }

    /// Index of the child advanced at full weight this tick.
    pub fn first_active_index(&self) -> usize {
        self.first_active
    }

    /// Index of the child blended on top this tick.
    pub fn second_active_index(&self) -> usize {
        self.second_active
    }

    /// Advance one active child and aggregate its contributions.
    ///
    /// `last` marks the final contributor of the tick: its contributions
    /// complete each target's buffer, which is then routed onward.
    fn advance_child(
        &mut self,
        index: usize,
        time: f32,
        weight: f32,
        last: bool,
        outer: Option<&mut (dyn PoseCollector + '_)>,
    ) {
        let local_time = match self.blend_mode {
            BlendMode::Stretch => time * self.time_data[index],
            BlendMode::Loop => {
                self.time_data[index] += time - self.last_time;
                self.time_data[index]
            }
        };

        let child = &mut self.children[index];
        child.set_weight(weight);
        let mut collector = BlendCollector {
            buffers: &mut self.targets,
            last,
            outer,
            own_weight: self.weight,
            transition_weight: self.transition_weight,
        };
        let in_range = child.advance(local_time, Some(&mut collector));

        // A looping child that ran past its range restarts on its own clock.
        if self.blend_mode == BlendMode::Loop && !in_range {
            trace!("child {index} wrapped at local time {local_time}");
            self.time_data[index] = 0.0;
        }
    }
}

impl BlendableAction for BlendAction {
    fn length(&self) -> f32 {
        self.length
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    fn transition_weight(&self) -> f32 {
        self.transition_weight
    }

    fn set_transition_weight(&mut self, weight: f32) {
        self.transition_weight = weight;
    }

    fn targets(&self) -> Vec<TargetHandle> {
        self.targets.keys().cloned().collect()
    }

    fn advance(&mut self, time: f32, mut collector: Option<&mut (dyn PoseCollector + '_)>) -> bool {
        let time = time.max(0.0);

        let selection = self.blend_space.select(&SpaceView::new(&self.child_lengths));
        self.first_active = selection.first;
        self.second_active = selection.second;
        self.blend_weight = selection.weight;

        // Only advance the first child when the second is not fully dominant.
        if self.blend_weight < 1.0 {
            self.advance_child(self.first_active, time, 1.0, false, collector.as_deref_mut());
            if self.blend_weight == 0.0 {
                // The second child contributes nothing this tick, so whatever
                // the first child aggregated must still reach the output.
                for (target, transform) in &self.targets {
                    deliver(
                        target,
                        transform,
                        collector.as_deref_mut(),
                        self.weight,
                        self.transition_weight,
                    );
                }
            }
        }

        self.advance_child(
            self.second_active,
            time,
            self.blend_weight,
            true,
            collector.as_deref_mut(),
        );

        self.last_time = time;
        time < self.length
    }
}

/// Route a completed target buffer onward: into the outer collector when
/// this node is nested, otherwise onto the target itself.
fn deliver(
    target: &TargetHandle,
    transform: &Transform,
    outer: Option<&mut (dyn PoseCollector + '_)>,
    own_weight: f32,
    transition_weight: f32,
) {
    match outer {
        Some(sink) => sink.collect_transform(target, transform, own_weight),
        None => apply_to_target(target, transform, transition_weight),
    }
}

/// Collector installed on the two active children for the duration of one
/// `advance` call. Child contributions land in the owning node's buffers;
/// buffers completed by the final contributor are routed onward.
struct BlendCollector<'a, 'o> {
    buffers: &'a mut HashMap<TargetHandle, Transform>,
    last: bool,
    outer: Option<&'a mut (dyn PoseCollector + 'o)>,
    own_weight: f32,
    transition_weight: f32,
}

impl PoseCollector for BlendCollector<'_, '_> {
    fn collect_transform(&mut self, target: &TargetHandle, transform: &Transform, weight: f32) {
        let buffer = match self.buffers.get_mut(target) {
            Some(buffer) => buffer,
            None => panic!("{target:?} was not registered when the blend action was built"),
        };

        if weight == 1.0 {
            *buffer = *transform;
        } else if weight > 0.0 {
            *buffer = buffer.interpolate(transform, weight);
        }

        if self.last {
            deliver(
                target,
                buffer,
                self.outer.as_deref_mut(),
                self.own_weight,
                self.transition_weight,
            );
        }
    }
}
