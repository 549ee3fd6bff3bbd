//! Text reports for the current frame and windowed distance stats.

use posetrace_replay::{pairwise_extremes, windowed_extremes, PosePlayer};
use std::fmt::Write;

/// Window sizes (in frames) reported for each tracked pair.
const STAT_WINDOWS: [usize; 3] = [1, 5, 10];

/// Render the playback state, current-frame positions, and pairwise
/// extremes. Empty histories produce an empty report.
pub fn frame_report(player: &PosePlayer) -> String {
    let Some(index) = player.current_index() else {
        return String::new();
    };
    let Some(frame) = player.history().frame(index) else {
        return String::new();
    };

    let mut out = String::new();
    let state = if player.is_playing() {
        "Playing"
    } else {
        "Paused"
    };
    let _ = writeln!(out, "{state}");
    let _ = writeln!(out, "Frame {} / {}", index + 1, player.frame_count());
    let _ = writeln!(out);

    for name in player.rig().names() {
        if let Some(pos) = frame.get(name) {
            let _ = writeln!(out, "{name}: ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z);
        }
    }

    match pairwise_extremes(frame) {
        Some(extremes) => {
            let _ = writeln!(
                out,
                "\nMin: {:.2} between {} & {}",
                extremes.min, extremes.min_pair.0, extremes.min_pair.1
            );
            let _ = writeln!(
                out,
                "Max: {:.2} between {} & {}",
                extremes.max, extremes.max_pair.0, extremes.max_pair.1
            );
        }
        None => {
            let _ = writeln!(out, "\nPairwise distances: n/a");
        }
    }

    out
}

/// Render arm and leg distance ranges over the trailing stat windows.
pub fn stats_report(player: &PosePlayer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Arm Distances");
    write_pair_section(&mut out, player, "LeftArm", "RightArm");
    let _ = writeln!(out);
    let _ = writeln!(out, "Leg Distances");
    write_pair_section(&mut out, player, "LeftLeg", "RightLeg");
    out
}

fn write_pair_section(out: &mut String, player: &PosePlayer, a: &str, b: &str) {
    for window in STAT_WINDOWS {
        let line = match windowed_extremes(player.history(), a, b, window) {
            Some(range) => format!("min {:.2}, max {:.2}", range.min, range.max),
            None => "n/a".to_string(),
        };
        let _ = writeln!(out, "{window}f: {line}");
    }
}
