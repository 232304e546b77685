// src/config/constants.rs
//! System-wide configuration constants

/// DDS drive frequency limits and defaults
pub mod frequency {
    pub const DEFAULT_DDS_FREQUENCY_HZ: f64 = 50_000.0;
    pub const MAX_DDS_FREQUENCY_HZ: f64 = 100_000.0;
}

/// Pattern engine constants
pub mod pattern {
    /// Pattern period the amplitude and phase calibration was characterized
    /// against.
    pub const DEFAULT_PATTERN_PERIOD: u16 = 0x8FFF;
}

/// Remote protocol constants
pub mod protocol {
    pub const DEFAULT_IDENTITY: &str = "AWG Instruments,AWG-1104,4CH-DDS,0.1.0";
}
