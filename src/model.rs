//! Payload types handed to gesture callbacks.
//! Field names serialize in camelCase so results can cross into JS unchanged.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Raw per-finger positions, indexed by first-contact order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerArrays {
    pub start_x: Vec<f64>,
    pub start_y: Vec<f64>,
    pub cur_x: Vec<f64>,
    pub cur_y: Vec<f64>,
}

impl FingerArrays {
    pub fn len(&self) -> usize {
        self.start_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_x.is_empty()
    }

    /// Mean horizontal travel across fingers; what a drag-to-slide consumer wants.
    pub fn mean_dx(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.cur_x.iter().zip(&self.start_x).map(|(c, s)| c - s).sum();
        sum / self.len() as f64
    }
}

/// Result of a classified wipe, also sent with `wipeMoveEnd`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WipeResult {
    /// 1 (slow) ..= 5 (fast).
    pub speed: u8,
    /// Absolute mean horizontal travel in pixels.
    pub x: f64,
    /// Absolute mean vertical travel in pixels.
    pub y: f64,
    #[serde(flatten)]
    pub fingers: FingerArrays,
}

/// Sent with `wipeMove` and `wipeMoveCancel`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    #[serde(flatten)]
    pub fingers: FingerArrays,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// Native pinch/rotate passthrough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureResult {
    #[serde(flatten)]
    pub fingers: FingerArrays,
    pub scale: f64,
    pub rotation: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WipeDirection {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl WipeDirection {
    /// Callback name as exposed to JS consumers.
    pub fn event_name(self) -> &'static str {
        match self {
            WipeDirection::Left => "wipeLeft",
            WipeDirection::Right => "wipeRight",
            WipeDirection::Up => "wipeUp",
            WipeDirection::Down => "wipeDown",
            WipeDirection::UpLeft => "wipeUpLeft",
            WipeDirection::UpRight => "wipeUpRight",
            WipeDirection::DownLeft => "wipeDownLeft",
            WipeDirection::DownRight => "wipeDownRight",
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            WipeDirection::UpLeft
                | WipeDirection::UpRight
                | WipeDirection::DownLeft
                | WipeDirection::DownRight
        )
    }
}
