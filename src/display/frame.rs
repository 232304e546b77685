// src/display/frame.rs
//! Structured frames handed to the display sink

use super::state::{DisplayMode, ViewState};
use crate::fault::ErrorCode;
use crate::hal::Channel;

/// One rendered screen's worth of values.
///
/// The sink decides placement and formatting; the frame carries only what
/// each mode shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayFrame {
    /// Per-channel `(volts, phase degrees)` summary for all four channels.
    Normal { channels: [(f64, f64); 4] },
    /// Single-channel detail.
    Focus {
        channel: Channel,
        frequency_hz: f64,
        volts: f64,
        phase_degrees: f64,
    },
    /// Two-line error screen: "Error <code>" / "<message>".
    Error {
        code: ErrorCode,
        message: &'static str,
    },
    /// Remote-access banner.
    Remote,
}

impl DisplayFrame {
    /// Build the frame for the view's current non-error mode.
    ///
    /// The error screen is assembled by the caller, which owns the fault
    /// queue consumption that goes with it.
    pub fn from_view(view: &ViewState) -> DisplayFrame {
        match view.mode() {
            DisplayMode::Focus(channel) => DisplayFrame::Focus {
                channel,
                frequency_hz: view.frequency(),
                volts: view.volts(channel),
                phase_degrees: view.phase(channel),
            },
            DisplayMode::Remote => DisplayFrame::Remote,
            // The error screen without a queue to pop falls back to the
            // summary, matching a forced error mode with nothing pending.
            DisplayMode::Normal | DisplayMode::Error => DisplayFrame::Normal {
                channels: [
                    (view.volts(Channel::Ch1), view.phase(Channel::Ch1)),
                    (view.volts(Channel::Ch2), view.phase(Channel::Ch2)),
                    (view.volts(Channel::Ch3), view.phase(Channel::Ch3)),
                    (view.volts(Channel::Ch4), view.phase(Channel::Ch4)),
                ],
            },
        }
    }
}

/// Sink consuming frames for rendering, e.g. the character LCD driver or a
/// test recorder.
pub trait DisplaySink {
    /// Render one frame.
    fn render(&mut self, frame: &DisplayFrame);
}
