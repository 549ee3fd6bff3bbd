//! Playback control over a frame history.
//!
//! The player owns the history and the live rig it writes frames onto, and
//! drives autoplay from host-supplied tick deltas. There is no implicit
//! scheduling: the host calls `tick(dt)` at whatever cadence it runs, and the
//! accumulator turns that into whole frame steps at the configured rate.

use crate::history::PoseHistory;
use posetrace_core::RigPose;

/// Slowest allowed playback rate, frames per second.
pub const MIN_SPEED_HZ: f32 = 5.0;
/// Fastest allowed playback rate, frames per second.
pub const MAX_SPEED_HZ: f32 = 20.0;

/// Autoplay direction through the frame history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Backward,
}

/// Playback state machine over a `PoseHistory`.
///
/// Two states, `Playing` and `Paused`. While playing, `tick` accumulates
/// elapsed time and consumes it in whole `1 / speed_hz` intervals, moving the
/// cursor one frame per consumed interval and writing the resulting snapshot
/// onto the rig. Reaching either end of history pauses playback; it never
/// loops or reverses on its own.
#[derive(Debug)]
pub struct PosePlayer {
    history: PoseHistory,
    rig: RigPose,
    playing: bool,
    direction: PlayDirection,
    speed_hz: f32,
    elapsed: f32,
    frame_changed: bool,
}

impl PosePlayer {
    /// Create a paused player at 10 fps, forward.
    pub fn new(history: PoseHistory, rig: RigPose) -> Self {
        Self {
            history,
            rig,
            playing: false,
            direction: PlayDirection::Forward,
            speed_hz: 10.0,
            elapsed: 0.0,
            frame_changed: false,
        }
    }

    pub fn history(&self) -> &PoseHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut PoseHistory {
        &mut self.history
    }

    pub fn rig(&self) -> &RigPose {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut RigPose {
        &mut self.rig
    }

    /// Swap in a freshly generated rig, keeping the recorded history.
    ///
    /// Returns the previous rig.
    pub fn rebind(&mut self, rig: RigPose) -> RigPose {
        tracing::debug!(entities = rig.len(), "rebinding player to new rig");
        std::mem::replace(&mut self.rig, rig)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    pub fn speed_hz(&self) -> f32 {
        self.speed_hz
    }

    pub fn current_index(&self) -> Option<usize> {
        self.history.current_index()
    }

    pub fn frame_count(&self) -> usize {
        self.history.frame_count()
    }

    /// Start autoplay. Idempotent.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Halt autoplay. Idempotent; takes effect before the next tick.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Set the playback rate in frames per second, clamped to
    /// [`MIN_SPEED_HZ`, `MAX_SPEED_HZ`]. The tick accumulator is untouched.
    pub fn set_speed(&mut self, hz: f32) {
        self.speed_hz = hz.clamp(MIN_SPEED_HZ, MAX_SPEED_HZ);
    }

    /// Change autoplay direction without altering the play/pause state.
    pub fn set_direction(&mut self, direction: PlayDirection) {
        self.direction = direction;
    }

    /// Advance autoplay by `dt` seconds of host time.
    ///
    /// Only effective while playing over a non-empty history. When the
    /// accumulated time reaches one frame interval the accumulator resets and
    /// the cursor takes a single step in the current direction; a failed step
    /// means the history boundary was reached and playback pauses there.
    pub fn tick(&mut self, dt: f32) {
        if !self.playing || self.history.is_empty() {
            return;
        }

        self.elapsed += dt;
        if self.elapsed < 1.0 / self.speed_hz {
            return;
        }
        self.elapsed = 0.0;

        let advanced = match self.direction {
            PlayDirection::Forward => self.history.step_forward(),
            PlayDirection::Backward => self.history.step_back(),
        };

        if advanced {
            self.history.apply_current(&mut self.rig);
            self.frame_changed = true;
        } else {
            tracing::debug!(
                frame = self.history.current_index(),
                "reached history boundary, pausing"
            );
            self.playing = false;
        }
    }

    /// Single manual step forward; works while paused or playing.
    pub fn step_forward(&mut self) {
        if self.history.step_forward() {
            self.history.apply_current(&mut self.rig);
            self.frame_changed = true;
        }
    }

    /// Single manual step back; works while paused or playing.
    pub fn step_back(&mut self) {
        if self.history.step_back() {
            self.history.apply_current(&mut self.rig);
            self.frame_changed = true;
        }
    }

    /// Jump to frame zero and apply it to the rig. No-op on empty history.
    pub fn go_to_start(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history.go_to_start();
        self.history.apply_current(&mut self.rig);
        self.frame_changed = true;
    }

    /// Consume the frame-changed flag.
    ///
    /// Returns true once after any operation that moved the cursor and wrote
    /// the rig, then resets. Presentation layers poll this to decide whether
    /// to redraw.
    pub fn take_frame_changed(&mut self) -> bool {
        std::mem::take(&mut self.frame_changed)
    }
}
