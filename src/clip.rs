//! Sampled-pose leaf: fixed transform keyframes per target.

use serde::{Deserialize, Serialize};

use crate::action::{apply_to_target, BlendableAction, PoseCollector};
use crate::error::BlendError;
use crate::target::TargetHandle;
use crate::transform::Transform;

/// Ordered transform keyframes for a single target.
///
/// Sampling holds the first/last frame outside the keyed range and blends
/// linearly (NLERP for rotation) inside a segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformTrack {
    times: Vec<f32>,
    frames: Vec<Transform>,
}

impl TransformTrack {
    pub fn new(times: Vec<f32>, frames: Vec<Transform>) -> Result<Self, BlendError> {
        if times.len() != frames.len() {
            return Err(BlendError::TrackLengthMismatch {
                times: times.len(),
                frames: frames.len(),
            });
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(BlendError::UnorderedTrack);
        }
        Ok(Self { times, frames })
    }

    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Sample the track at `time`.
    pub fn sample(&self, time: f32) -> Transform {
        let n = self.times.len();
        match n {
            0 => Transform::IDENTITY,
            1 => self.frames[0],
            _ => {
                if time <= self.times[0] {
                    return self.frames[0];
                }
                if time >= self.times[n - 1] {
                    return self.frames[n - 1];
                }
                // Linear scan (could be optimized to binary search if needed)
                for i in 0..(n - 1) {
                    let t0 = self.times[i];
                    let t1 = self.times[i + 1];
                    if time >= t0 && time <= t1 {
                        let denom = (t1 - t0).max(f32::EPSILON);
                        let local = ((time - t0) / denom).clamp(0.0, 1.0);
                        return self.frames[i].interpolate(&self.frames[i + 1], local);
                    }
                }
                self.frames[n - 1]
            }
        }
    }
}

/// Leaf action driving one or more targets from keyframe tracks.
pub struct ClipAction {
    tracks: Vec<(TargetHandle, TransformTrack)>,
    length: f32,
    weight: f32,
    transition_weight: f32,
}

impl ClipAction {
    /// Length is the longest track duration.
    pub fn new(tracks: Vec<(TargetHandle, TransformTrack)>) -> Self {
        let length = tracks
            .iter()
            .map(|(_, track)| track.duration())
            .fold(0.0_f32, f32::max);
        Self {
            tracks,
            length,
            weight: 1.0,
            transition_weight: 1.0,
        }
    }
}

impl BlendableAction for ClipAction {
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
        self.tracks.iter().map(|(target, _)| target.clone()).collect()
    }

    fn advance(&mut self, time: f32, mut collector: Option<&mut (dyn PoseCollector + '_)>) -> bool {
        let time = time.max(0.0);
        for (target, track) in &self.tracks {
            let transform = track.sample(time);
            match collector.as_deref_mut() {
                Some(sink) => sink.collect_transform(target, &transform, self.weight),
                None => apply_to_target(target, &transform, self.transition_weight),
            }
        }
        time < self.length
    }
}
