// src/display/state.rs
//! Display mode state machine and cached view values

use crate::config::constants::frequency::DEFAULT_DDS_FREQUENCY_HZ;
use crate::hal::Channel;

// Cached values are kept as reduced integers, matching the resolution the
// panel can actually show.
const VOLTS_SCALE: f64 = 10.0;
const PHASE_SCALE: f64 = 100.0;

/// Screen currently owned by the local display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// All-channel voltage/phase summary.
    Normal,
    /// Single-channel detail view.
    Focus(Channel),
    /// Dedicated error screen for a pending fault.
    Error,
    /// Remote-access banner; periodic refreshes are suppressed.
    Remote,
}

/// Mode state machine plus the reduced-precision value cache the display
/// renders from.
#[derive(Debug, Clone)]
pub struct ViewState {
    mode: DisplayMode,
    last_mode: DisplayMode,
    needs_redraw: bool,
    volts_decivolts: [i32; 4],
    phase_centidegrees: [i32; 4],
    frequency_hz: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Fresh state: `Normal` mode, zeroed channels, default frequency.
    pub fn new() -> Self {
        Self {
            mode: DisplayMode::Normal,
            last_mode: DisplayMode::Normal,
            needs_redraw: false,
            volts_decivolts: [0; 4],
            phase_centidegrees: [0; 4],
            frequency_hz: DEFAULT_DDS_FREQUENCY_HZ,
        }
    }

    /// Reset to the startup state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Most recent non-error mode, restored after an error screen.
    pub fn last_mode(&self) -> DisplayMode {
        self.last_mode
    }

    /// Explicit mode change: remembers the prior state as `last_mode`
    /// unless the display is currently on the error screen, and always
    /// requests a redraw.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.needs_redraw = true;
        if self.mode != DisplayMode::Error {
            self.last_mode = self.mode;
        }
        self.mode = mode;
    }

    /// Ask for a repaint without changing mode.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Consume the pending-redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Cache a channel's voltage, reduced to tenths of a volt.
    pub fn set_volts(&mut self, channel: Channel, volts: f64) {
        self.volts_decivolts[channel.index()] = (volts * VOLTS_SCALE).round() as i32;
    }

    /// Cached voltage for a channel in volts.
    pub fn volts(&self, channel: Channel) -> f64 {
        f64::from(self.volts_decivolts[channel.index()]) / VOLTS_SCALE
    }

    /// Cache a channel's phase, reduced to hundredths of a degree.
    pub fn set_phase(&mut self, channel: Channel, degrees: f64) {
        self.phase_centidegrees[channel.index()] = (degrees * PHASE_SCALE).round() as i32;
    }

    /// Cached phase for a channel, presented in [0, 360) for the panel.
    pub fn phase(&self, channel: Channel) -> f64 {
        let degrees = f64::from(self.phase_centidegrees[channel.index()]) / PHASE_SCALE;
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }

    /// Cache the drive frequency.
    pub fn set_frequency(&mut self, frequency_hz: f64) {
        self.frequency_hz = frequency_hz;
    }

    /// Cached drive frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency_hz
    }
}
