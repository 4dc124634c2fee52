//! Multi-touch wipe and tap recognition for web targets.
//!
//! The platform-neutral core (`tracker`, `classify`, `state`) is driven through the
//! [`InputEvent`] trait; the `dom` module binds it to `web_sys` touch and gesture events.

pub mod classify;
pub mod config;
pub mod dom;
pub mod model;
pub mod state;
pub mod tracker;
pub mod util;

pub use config::{GestureConfig, Handler, Handlers, Settings};
pub use dom::{is_registered, register, unregister, BindError, Binding, DomInput};
pub use model::{FingerArrays, GestureResult, MoveResult, Point, WipeDirection, WipeResult};
pub use tracker::{GestureTracker, InputEvent};
