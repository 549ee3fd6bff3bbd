//! Ordered frame history with a current-frame cursor.
//!
//! The store owns the recorded snapshot sequence and the cursor that playback
//! and stats read from. Navigation is saturating: stepping past either end
//! reports failure and leaves the cursor where it was, so scrubbing never
//! wraps across history bounds.

use posetrace_core::{PoseSnapshot, RigPose};

/// Ordered sequence of pose snapshots plus the current-frame cursor.
///
/// Invariant: `current < frame_count()` whenever the store is non-empty.
/// Appending always moves the cursor to the new last frame ("record and jump
/// to now"). Frame indices are stable; the only bulk mutation is `load`.
#[derive(Clone, Debug, Default)]
pub struct PoseHistory {
    frames: Vec<PoseSnapshot>,
    current: usize,
}

impl PoseHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Cursor position, or `None` while the store is empty.
    pub fn current_index(&self) -> Option<usize> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    /// Append a snapshot and move the cursor to it.
    pub fn append(&mut self, snapshot: PoseSnapshot) {
        self.frames.push(snapshot);
        self.current = self.frames.len() - 1;
        tracing::trace!(frame = self.current, "recorded frame");
    }

    /// Record the current state of a rig as a new frame.
    pub fn record(&mut self, rig: &RigPose) {
        self.append(PoseSnapshot::capture(rig));
    }

    /// The snapshot at `index`, or `None` when out of range.
    pub fn frame(&self, index: usize) -> Option<&PoseSnapshot> {
        self.frames.get(index)
    }

    /// The snapshot under the cursor, or `None` while empty.
    pub fn current_frame(&self) -> Option<&PoseSnapshot> {
        self.frames.get(self.current)
    }

    /// Advance the cursor by one frame. Returns false at the last frame.
    pub fn step_forward(&mut self) -> bool {
        if self.current + 1 < self.frames.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor back one frame. Returns false at frame zero.
    pub fn step_back(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor to frame zero. No-op on an empty store.
    pub fn go_to_start(&mut self) {
        self.current = 0;
    }

    /// Write the positions stored at `index` onto the rig.
    ///
    /// Entities absent from the snapshot keep their current position. No-op
    /// when `index` is out of range.
    pub fn apply_frame(&self, index: usize, rig: &mut RigPose) {
        let Some(frame) = self.frames.get(index) else {
            return;
        };

        for (name, pos) in rig.iter_mut() {
            if let Some(stored) = frame.get(name) {
                *pos = stored;
            }
        }
    }

    /// Write the frame under the cursor onto the rig.
    pub fn apply_current(&self, rig: &mut RigPose) {
        self.apply_frame(self.current, rig);
    }

    /// An independent copy of the full frame sequence.
    pub fn export(&self) -> Vec<PoseSnapshot> {
        self.frames.clone()
    }

    /// Replace the entire sequence and reset the cursor to frame zero.
    ///
    /// Snapshot key uniqueness is guaranteed by `PoseSnapshot` construction;
    /// callers deserializing external data own that contract.
    pub fn load(&mut self, frames: Vec<PoseSnapshot>) {
        tracing::debug!(frames = frames.len(), "loading frame history");
        self.frames = frames;
        self.current = 0;
    }
}
