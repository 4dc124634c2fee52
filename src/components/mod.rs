pub mod app;
pub mod gesture_log;
pub mod slide_deck;
