//! Posetrace Replay Engine
//!
//! Frame-history storage and playback for recorded rig poses:
//!
//! - **History**: ordered snapshot sequence with a bounds-checked cursor,
//!   bulk load/export, and frame application onto a live rig
//! - **Playback**: a paused/playing state machine driven by host tick
//!   deltas, with direction, clamped speed, and automatic pause at either
//!   end of history
//! - **Stats**: pairwise distance extremes per frame and per-pair distance
//!   ranges over a trailing frame window
//!
//! # Example
//!
//! ```rust
//! use posetrace_core::{PoseSnapshot, RigPose, Vec3};
//! use posetrace_replay::{PoseHistory, PosePlayer};
//!
//! let mut rig = RigPose::from_pairs(vec![("Torso", Vec3::ZERO)]).unwrap();
//! let mut history = PoseHistory::new();
//! history.record(&rig);
//! rig.set("Torso", Vec3::new(0.0, 1.0, 0.0));
//! history.record(&rig);
//!
//! let mut player = PosePlayer::new(history, rig);
//! player.go_to_start();
//! player.play();
//! player.tick(0.1); // one frame at the default 10 fps
//! assert_eq!(player.current_index(), Some(1));
//! ```

pub mod history;
pub mod player;
pub mod stats;

pub use history::PoseHistory;
pub use player::{PlayDirection, PosePlayer, MAX_SPEED_HZ, MIN_SPEED_HZ};
pub use stats::{pairwise_extremes, windowed_extremes, DistanceRange, PairExtremes};
