// src/hal/simulator.rs
//! In-memory waveform generator for tests, benches and demos
//!
//! Models just enough of the chip for the control core: a sparse register
//! file, the DDS frequency, the pattern run state, and injectable chip
//! faults that surface on the next pattern update. Every register write is
//! also appended to a log so tests can assert exactly what reached the
//! hardware.

use super::traits::WaveformGenerator;
use crate::config::constants::frequency::DEFAULT_DDS_FREQUENCY_HZ;
use crate::fault::HardwareFault;
use std::collections::HashMap;

/// Simulated register-level generator.
#[derive(Debug, Default)]
pub struct SimulatedGenerator {
    registers: HashMap<u16, u16>,
    frequency_hz: f64,
    pattern_running: bool,
    injected_fault: Option<HardwareFault>,
    write_log: Vec<(u16, u16)>,
}

impl SimulatedGenerator {
    /// New simulator at the instrument's default drive frequency.
    pub fn new() -> Self {
        Self {
            frequency_hz: DEFAULT_DDS_FREQUENCY_HZ,
            ..Self::default()
        }
    }

    /// Arrange for the next [`WaveformGenerator::update_pattern`] to report
    /// a chip fault.
    pub fn inject_fault(&mut self, fault: HardwareFault) {
        self.injected_fault = Some(fault);
    }

    /// Every `(addr, value)` write since construction, in order.
    pub fn write_log(&self) -> &[(u16, u16)] {
        &self.write_log
    }

    /// Drop the recorded writes, keeping register contents.
    pub fn clear_write_log(&mut self) {
        self.write_log.clear();
    }

    /// Whether pattern generation is currently running.
    pub fn pattern_running(&self) -> bool {
        self.pattern_running
    }
}

impl WaveformGenerator for SimulatedGenerator {
    fn write_register(&mut self, addr: u16, value: u16) {
        self.registers.insert(addr, value);
        self.write_log.push((addr, value));
    }

    fn read_register(&mut self, addr: u16) -> u16 {
        self.registers.get(&addr).copied().unwrap_or(0)
    }

    fn dds_frequency(&self) -> f64 {
        self.frequency_hz
    }

    fn set_dds_frequency(&mut self, frequency_hz: f64) {
        self.frequency_hz = frequency_hz;
    }

    fn update_pattern(&mut self) -> Result<(), HardwareFault> {
        match self.injected_fault.take() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn start_pattern(&mut self) {
        self.pattern_running = true;
    }

    fn stop_pattern(&mut self) {
        self.pattern_running = false;
    }

    fn reset_registers(&mut self) {
        self.registers.clear();
        self.frequency_hz = DEFAULT_DDS_FREQUENCY_HZ;
        self.pattern_running = false;
        self.injected_fault = None;
    }
}
