pub mod touch;

pub use touch::{FingerState, TouchSession};
