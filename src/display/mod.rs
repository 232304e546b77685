// src/display/mod.rs
//! Display mode state machine and the frames handed to the render sink

pub mod frame;
pub mod state;

pub use frame::{DisplayFrame, DisplaySink};
pub use state::{DisplayMode, ViewState};
