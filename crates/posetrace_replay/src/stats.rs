//! Derived distance statistics over recorded frames.
//!
//! Pure reads over a snapshot or a history; nothing here is cached or stored.
//! Queries with insufficient data return `None` rather than a silent zero.

use crate::history::PoseHistory;
use posetrace_core::PoseSnapshot;

/// Min/max pairwise distances within a single snapshot, with the entity
/// pairs achieving them.
#[derive(Clone, Debug, PartialEq)]
pub struct PairExtremes {
    pub min: f32,
    pub min_pair: (String, String),
    pub max: f32,
    pub max_pair: (String, String),
}

/// Min/max of one entity pair's distance across a frame window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceRange {
    pub min: f32,
    pub max: f32,
}

/// All-pairs distance extremes for one snapshot.
///
/// Pairs enumerate in lexicographic name order so tie-breaking is
/// deterministic: the first pair reaching an extreme keeps it. Returns `None`
/// when the snapshot holds fewer than two entities.
pub fn pairwise_extremes(snapshot: &PoseSnapshot) -> Option<PairExtremes> {
    let mut names: Vec<&str> = snapshot.names().collect();
    if names.len() < 2 {
        return None;
    }
    names.sort_unstable();

    let mut result: Option<PairExtremes> = None;
    for i in 0..names.len() {
        for j in (i + 1)..names.len() {
            let (a, b) = (names[i], names[j]);
            // Both lookups succeed: the names came from this snapshot.
            let Some(pos_a) = snapshot.get(a) else { continue };
            let Some(pos_b) = snapshot.get(b) else { continue };
            let dist = pos_a.distance(pos_b);

            match &mut result {
                None => {
                    result = Some(PairExtremes {
                        min: dist,
                        min_pair: (a.to_string(), b.to_string()),
                        max: dist,
                        max_pair: (a.to_string(), b.to_string()),
                    });
                }
                Some(extremes) => {
                    if dist < extremes.min {
                        extremes.min = dist;
                        extremes.min_pair = (a.to_string(), b.to_string());
                    }
                    if dist > extremes.max {
                        extremes.max = dist;
                        extremes.max_pair = (a.to_string(), b.to_string());
                    }
                }
            }
        }
    }
    result
}

/// Distance range between two named entities over the trailing window.
///
/// The window covers frames `[current - window_size + 1, current]`, clipped
/// at frame zero. Only frames recording both entities contribute; `None`
/// when no frame in the window does, when the store is empty, or when
/// `window_size` is zero.
pub fn windowed_extremes(
    history: &PoseHistory,
    name_a: &str,
    name_b: &str,
    window_size: usize,
) -> Option<DistanceRange> {
    if window_size == 0 {
        return None;
    }
    let current = history.current_index()?;
    let start = current.saturating_sub(window_size - 1);

    let mut range: Option<DistanceRange> = None;
    for index in start..=current {
        let Some(frame) = history.frame(index) else {
            continue;
        };
        let (Some(pos_a), Some(pos_b)) = (frame.get(name_a), frame.get(name_b)) else {
            continue;
        };
        let dist = pos_a.distance(pos_b);

        range = Some(match range {
            None => DistanceRange {
                min: dist,
                max: dist,
            },
            Some(r) => DistanceRange {
                min: r.min.min(dist),
                max: r.max.max(dist),
            },
        });
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use posetrace_core::Vec3;

    fn snap(pairs: Vec<(&str, Vec3)>) -> PoseSnapshot {
        PoseSnapshot::from_pairs(pairs).unwrap()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_pairwise_extremes_three_entities() {
        // dist(A,B) = 3, dist(A,C) = 4, dist(B,C) = 5
        let snapshot = snap(vec![
            ("A", Vec3::new(0.0, 0.0, 0.0)),
            ("B", Vec3::new(3.0, 0.0, 0.0)),
            ("C", Vec3::new(0.0, 4.0, 0.0)),
        ]);

        let extremes = pairwise_extremes(&snapshot).unwrap();
        assert!(approx(extremes.min, 3.0));
        assert_eq!(extremes.min_pair, ("A".to_string(), "B".to_string()));
        assert!(approx(extremes.max, 5.0));
        assert_eq!(extremes.max_pair, ("B".to_string(), "C".to_string()));
    }

    #[test]
    fn test_pairwise_extremes_needs_two_entities() {
        assert_eq!(pairwise_extremes(&snap(vec![])), None);
        assert_eq!(pairwise_extremes(&snap(vec![("A", Vec3::ZERO)])), None);
    }

    #[test]
    fn test_pairwise_extremes_tie_break_is_lexicographic() {
        // All three points are pairwise equidistant in x, so every pair ties.
        // Insertion order is scrambled; enumeration must still be by name.
        let snapshot = snap(vec![
            ("C", Vec3::new(2.0, 0.0, 0.0)),
            ("A", Vec3::new(0.0, 0.0, 0.0)),
            ("B", Vec3::new(1.0, 0.0, 0.0)),
        ]);

        let extremes = pairwise_extremes(&snapshot).unwrap();
        // (A,B) is enumerated first among the distance-1 pairs.
        assert_eq!(extremes.min_pair, ("A".to_string(), "B".to_string()));
        // (A,C) is the unique distance-2 pair.
        assert_eq!(extremes.max_pair, ("A".to_string(), "C".to_string()));
    }

    #[test]
    fn test_windowed_extremes_trailing_window() {
        // Pair distances per frame: 2, 5, 3. Window of 2 at the last frame
        // sees only the 5 and the 3.
        let mut history = PoseHistory::new();
        for d in [2.0f32, 5.0, 3.0] {
            history.append(snap(vec![
                ("LeftArm", Vec3::ZERO),
                ("RightArm", Vec3::new(d, 0.0, 0.0)),
            ]));
        }

        let range = windowed_extremes(&history, "LeftArm", "RightArm", 2).unwrap();
        assert!(approx(range.min, 3.0));
        assert!(approx(range.max, 5.0));

        // A window larger than the history clips at frame zero.
        let range = windowed_extremes(&history, "LeftArm", "RightArm", 10).unwrap();
        assert!(approx(range.min, 2.0));
        assert!(approx(range.max, 5.0));
    }

    #[test]
    fn test_windowed_extremes_follows_cursor() {
        let mut history = PoseHistory::new();
        for d in [2.0f32, 5.0, 3.0] {
            history.append(snap(vec![
                ("A", Vec3::ZERO),
                ("B", Vec3::new(d, 0.0, 0.0)),
            ]));
        }
        history.step_back();

        // Cursor on the middle frame: window of 2 sees distances 2 and 5.
        let range = windowed_extremes(&history, "A", "B", 2).unwrap();
        assert!(approx(range.min, 2.0));
        assert!(approx(range.max, 5.0));
    }

    #[test]
    fn test_windowed_extremes_skips_frames_missing_an_entity() {
        let mut history = PoseHistory::new();
        history.append(snap(vec![
            ("A", Vec3::ZERO),
            ("B", Vec3::new(7.0, 0.0, 0.0)),
        ]));
        history.append(snap(vec![("A", Vec3::ZERO)]));

        // The current frame lacks B, so only frame 0 contributes.
        let range = windowed_extremes(&history, "A", "B", 2).unwrap();
        assert!(approx(range.min, 7.0));
        assert!(approx(range.max, 7.0));

        // A window covering only the incomplete frame has no data.
        assert_eq!(windowed_extremes(&history, "A", "B", 1), None);
    }

    #[test]
    fn test_windowed_extremes_empty_store_or_zero_window() {
        let history = PoseHistory::new();
        assert_eq!(windowed_extremes(&history, "A", "B", 5), None);

        let mut history = PoseHistory::new();
        history.append(snap(vec![("A", Vec3::ZERO), ("B", Vec3::ONE)]));
        assert_eq!(windowed_extremes(&history, "A", "B", 0), None);
    }
}
