// src/hal/traits.rs
//! Collaborator trait for the waveform-generator chip

use crate::fault::HardwareFault;

/// Register-level interface to the external waveform-generator chip.
///
/// Register pokes are infallible at this layer (the bus driver below retries
/// or latches a chip-side fault); faults the chip detects are surfaced
/// post hoc by [`WaveformGenerator::update_pattern`], after the attempted
/// operation may already have partially applied.
pub trait WaveformGenerator {
    /// Write a 16-bit value to a register.
    fn write_register(&mut self, addr: u16, value: u16);

    /// Read a 16-bit register value.
    fn read_register(&mut self, addr: u16) -> u16;

    /// Current DDS drive frequency in Hz.
    fn dds_frequency(&self) -> f64;

    /// Program the DDS drive frequency in Hz.
    fn set_dds_frequency(&mut self, frequency_hz: f64);

    /// Latch pending register values into the running pattern, returning any
    /// fault the chip reported while applying them.
    fn update_pattern(&mut self) -> Result<(), HardwareFault>;

    /// Begin pattern generation.
    fn start_pattern(&mut self);

    /// Halt pattern generation.
    fn stop_pattern(&mut self);

    /// Reset the register file to power-on defaults.
    fn reset_registers(&mut self);
}
