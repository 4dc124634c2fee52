//! Turns a finished session into a tap or a set of wipe directions.

use crate::config::Settings;
use crate::model::{FingerArrays, WipeDirection, WipeResult};

pub const TAP_MAX_TRAVEL_PX: f64 = 15.0;
pub const TAP_MAX_DURATION_MS: f64 = 100.0;
/// Floor for non-positive durations so the speed formula never divides by zero.
pub const MIN_DURATION_MS: f64 = 0.001;

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Tap,
    Wipe {
        /// Fired in order; may be empty (only `wipeMoveEnd` follows).
        directions: Vec<WipeDirection>,
        result: WipeResult,
    },
}

/// Speed scalar from mean travel and duration: distance over squared time, scaled,
/// clamped to 1..=5 and then truncated.
pub fn speed(ax: f64, ay: f64, duration_ms: f64) -> u8 {
    let ms = effective_duration(duration_ms);
    let s = ((ax + ay) * 60.0) / (ms / 6.0 * ms);
    s.clamp(1.0, 5.0) as u8
}

pub fn effective_duration(duration_ms: f64) -> f64 {
    if duration_ms > 0.0 {
        duration_ms
    } else {
        MIN_DURATION_MS
    }
}

pub fn is_tap(settings: &Settings, fingers: usize, ax: f64, ay: f64, duration_ms: f64) -> bool {
    settings.tap_to_click
        && fingers == 1
        && ax < TAP_MAX_TRAVEL_PX
        && ay < TAP_MAX_TRAVEL_PX
        && effective_duration(duration_ms) < TAP_MAX_DURATION_MS
}

/// Directional dispatch. The horizontal and vertical checks are independent, so a
/// vertically dominant diagonal yields both a diagonal and a vertical wipe.
pub fn directions(settings: &Settings, dx: f64, dy: f64) -> Vec<WipeDirection> {
    let ax = dx.abs();
    let ay = dy.abs();
    let right = dx > 0.0;
    let down = dy > 0.0;
    let mut out = Vec::with_capacity(2);

    if ax >= settings.move_x {
        if settings.allow_diagonal && ay >= settings.move_y {
            out.push(match (right, down) {
                (true, true) => WipeDirection::DownRight,
                (true, false) => WipeDirection::UpRight,
                (false, true) => WipeDirection::DownLeft,
                (false, false) => WipeDirection::UpLeft,
            });
        } else if ax >= ay {
            out.push(if right {
                WipeDirection::Right
            } else {
                WipeDirection::Left
            });
        }
    }

    if ay >= settings.move_y && ay > ax {
        out.push(if down {
            WipeDirection::Down
        } else {
            WipeDirection::Up
        });
    }

    out
}

/// Classifies a completed gesture from its mean displacement.
pub fn classify(
    settings: &Settings,
    (dx, dy): (f64, f64),
    finger_count: usize,
    duration_ms: f64,
    fingers: FingerArrays,
) -> Outcome {
    let ax = dx.abs();
    let ay = dy.abs();
    if is_tap(settings, finger_count, ax, ay, duration_ms) {
        return Outcome::Tap;
    }
    Outcome::Wipe {
        directions: directions(settings, dx, dy),
        result: WipeResult {
            speed: speed(ax, ay, duration_ms),
            x: ax,
            y: ay,
            fingers,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag() -> Settings {
        Settings { allow_diagonal: true, ..Settings::default() }
    }

    #[test]
    fn speed_stays_in_range() {
        let cases = [
            (0.0, 1.0),
            (0.0, 0.0),
            (1.0, 1e9),
            (500.0, 1.0),
            (100.0, 200.0),
            (3000.0, -5.0),
        ];
        for (d, ms) in cases {
            let s = speed(d, d, ms);
            assert!((1..=5).contains(&s), "speed {s} for {d} px over {ms} ms");
        }
    }

    #[test]
    fn speed_clamps_before_truncating() {
        // 6000 / (33.3 * 200) = 0.9 -> clamped up to 1
        assert_eq!(speed(100.0, 0.0, 200.0), 1);
        // 300 * 60 / (100 / 6 * 100) = 10.8 -> 5
        assert_eq!(speed(300.0, 0.0, 100.0), 5);
        // 45 * 60 / (60 / 6 * 60) = 4.5 -> 4
        assert_eq!(speed(45.0, 0.0, 60.0), 4);
    }

    #[test]
    fn zero_duration_is_fastest() {
        assert_eq!(speed(50.0, 0.0, 0.0), 5);
    }

    #[test]
    fn horizontal_by_sign() {
        let s = Settings::default();
        assert_eq!(directions(&s, 100.0, 0.0), vec![WipeDirection::Right]);
        assert_eq!(directions(&s, -41.0, 20.0), vec![WipeDirection::Left]);
        assert!(directions(&s, 39.0, 0.0).is_empty());
    }

    #[test]
    fn vertical_needs_strict_dominance() {
        let s = Settings::default();
        assert_eq!(directions(&s, 0.0, 80.0), vec![WipeDirection::Down]);
        assert_eq!(directions(&s, 10.0, -50.0), vec![WipeDirection::Up]);
        // equal travel goes horizontal only
        assert_eq!(directions(&s, 50.0, 50.0), vec![WipeDirection::Right]);
    }

    #[test]
    fn diagonal_quadrants() {
        let s = diag();
        assert_eq!(directions(&s, 50.0, 50.0), vec![WipeDirection::DownRight]);
        assert_eq!(directions(&s, 50.0, -50.0), vec![WipeDirection::UpRight]);
        assert_eq!(directions(&s, -50.0, 50.0), vec![WipeDirection::DownLeft]);
        assert_eq!(directions(&s, -50.0, -50.0), vec![WipeDirection::UpLeft]);
    }

    #[test]
    fn diagonal_with_vertical_dominance_also_fires_vertical() {
        // Kept fallthrough: the diagonal fires from the horizontal check, then the
        // vertical check fires on its own because ay > ax.
        let s = diag();
        assert_eq!(
            directions(&s, 45.0, -90.0),
            vec![WipeDirection::UpRight, WipeDirection::Up]
        );
    }

    #[test]
    fn axis_checks_exclusive_without_diagonals() {
        let s = Settings { move_x: 10.0, move_y: 10.0, ..Settings::default() };
        assert_eq!(directions(&s, 30.0, 60.0), vec![WipeDirection::Down]);
        assert_eq!(directions(&s, 60.0, 30.0), vec![WipeDirection::Right]);
    }

    #[test]
    fn tap_requires_single_short_still_touch() {
        let s = Settings { tap_to_click: true, ..Settings::default() };
        assert!(is_tap(&s, 1, 3.0, 4.0, 50.0));
        assert!(!is_tap(&s, 2, 3.0, 4.0, 50.0));
        assert!(!is_tap(&s, 1, 15.0, 0.0, 50.0));
        assert!(!is_tap(&s, 1, 0.0, 0.0, 100.0));
        assert!(!is_tap(&Settings::default(), 1, 0.0, 0.0, 10.0));
    }

    #[test]
    fn classify_builds_result_from_mean() {
        let out = classify(&Settings::default(), (-60.0, 5.0), 1, 200.0, FingerArrays::default());
        match out {
            Outcome::Wipe { directions, result } => {
                assert_eq!(directions, vec![WipeDirection::Left]);
                assert_eq!(result.x, 60.0);
                assert_eq!(result.y, 5.0);
                assert_eq!(result.speed, 1);
            }
            Outcome::Tap => panic!("expected a wipe"),
        }
    }
}
