// Per-target touch session: everything the tracker knows about the interaction in progress.
use crate::model::{FingerArrays, Point};

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct FingerState {
    pub start_x: f64,
    pub start_y: f64,
    pub cur_x: f64,
    pub cur_y: f64,
}

impl FingerState {
    pub fn at(p: Point) -> Self {
        Self {
            start_x: p.x,
            start_y: p.y,
            cur_x: p.x,
            cur_y: p.y,
        }
    }

    pub fn dx(&self) -> f64 {
        self.cur_x - self.start_x
    }

    pub fn dy(&self) -> f64 {
        self.cur_y - self.start_y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchSession<T> {
    pub fingers: Vec<FingerState>,
    /// Fingers currently down. Zeroed on end while positions are kept for classification.
    pub touching: usize,
    pub ever_seen: usize,
    /// Event timestamp (ms) of the first contact.
    pub started_at: Option<f64>,
    pub tracking: bool,
    /// A native gesture took over; moves and end must not classify. Only observable
    /// until the cancel that follows resets the session.
    pub suppressed: bool,
    pub last_target: Option<T>,
    /// Floored mean of the touching fingers' current positions.
    pub center: Option<Point>,
}

impl<T> Default for TouchSession<T> {
    fn default() -> Self {
        Self {
            fingers: Vec::new(),
            touching: 0,
            ever_seen: 0,
            started_at: None,
            tracking: false,
            suppressed: false,
            last_target: None,
            center: None,
        }
    }
}

impl<T> TouchSession<T> {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records touches at index `touching..` as new fingers. Returns how many joined.
    pub fn add_fingers(&mut self, touches: &[Point]) -> usize {
        let before = self.touching;
        for p in touches.iter().skip(self.touching) {
            self.push_finger(*p);
        }
        self.touching - before
    }

    fn push_finger(&mut self, p: Point) {
        self.fingers.push(FingerState::at(p));
        self.touching += 1;
        self.ever_seen += 1;
    }

    /// Marks the first contact of a session. Only the first call per session has any effect.
    pub fn begin(&mut self, now: f64, target: Option<T>) -> bool {
        if self.tracking {
            return false;
        }
        self.started_at = Some(now);
        self.tracking = true;
        self.last_target = target;
        true
    }

    /// Applies a move report: known slots update their current position, slots past
    /// `touching` join now with their start taken from this report.
    pub fn apply_move(&mut self, touches: &[Point]) {
        for (i, p) in touches.iter().enumerate() {
            if i >= self.touching {
                self.push_finger(*p);
            } else if let Some(f) = self.fingers.get_mut(i) {
                f.cur_x = p.x;
                f.cur_y = p.y;
            }
        }
        if !touches.is_empty() {
            let n = touches.len() as f64;
            let sx: f64 = touches.iter().map(|p| p.x).sum();
            let sy: f64 = touches.iter().map(|p| p.y).sum();
            self.center = Some(Point::new((sx / n).floor(), (sy / n).floor()));
        }
    }

    /// Mean displacement over every finger that took part, lifted ones included.
    pub fn mean_displacement(&self) -> Option<(f64, f64)> {
        let n = self.ever_seen.min(self.fingers.len());
        if n == 0 {
            return None;
        }
        let (sx, sy) = self.fingers[..n]
            .iter()
            .fold((0.0, 0.0), |(ax, ay), f| (ax + f.dx(), ay + f.dy()));
        Some((sx / self.ever_seen as f64, sy / self.ever_seen as f64))
    }

    pub fn arrays(&self) -> FingerArrays {
        FingerArrays {
            start_x: self.fingers.iter().map(|f| f.start_x).collect(),
            start_y: self.fingers.iter().map(|f| f.start_y).collect(),
            cur_x: self.fingers.iter().map(|f| f.cur_x).collect(),
            cur_y: self.fingers.iter().map(|f| f.cur_y).collect(),
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.tracking && self.fingers.is_empty()
    }
}
