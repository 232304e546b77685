// src/hal/registers.rs
//! Register address map for the waveform-generator chip
//!
//! Only the registers the control core touches directly are named here; chip
//! bring-up writes the rest through the raw register commands.

use super::types::Channel;

/// Pattern period register.
pub const PAT_PERIOD: u16 = 0x0029;

/// Wave-select value configuring a channel's DDS sine output.
pub const WAV_SINE: u16 = 0x3131;

// Channel 1 owns the highest address in each per-channel bank.
const DIGITAL_GAIN: [u16; 4] = [0x0035, 0x0034, 0x0033, 0x0032];
const DDS_PHASE: [u16; 4] = [0x0043, 0x0042, 0x0041, 0x0040];
const WAV_CONFIG: [u16; 4] = [0x0027, 0x0026, 0x0025, 0x0024];

/// Digital gain register holding a channel's amplitude tuning word.
pub fn gain_register(channel: Channel) -> u16 {
    DIGITAL_GAIN[channel.index()]
}

/// DDS phase offset register for a channel.
pub fn phase_register(channel: Channel) -> u16 {
    DDS_PHASE[channel.index()]
}

/// Waveform-select register for a channel.
pub fn wave_config_register(channel: Channel) -> u16 {
    WAV_CONFIG[channel.index()]
}
