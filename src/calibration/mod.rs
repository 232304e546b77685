// src/calibration/mod.rs
//! Calibrated conversions between requested outputs and register words
//!
//! The amplitude model maps a requested output voltage, for a given channel
//! at the current drive frequency, onto the signed 16-bit tuning word the
//! chip's digital gain register expects. The fit is rational: a per-segment
//! frequency polynomial in the denominator, voltage and final offsets from
//! the same segment. Phase conversions live in [`phase`].

pub mod phase;
mod tables;

use crate::hal::Channel;
use crate::utils::numeric::{order_of_magnitude, pow10};
use tables::{
    AMP_COEFFS, AMP_THRESHOLDS_DECIVOLTS, FINAL_OFFSET, FIT_SCALE_EXPONENT, ORDER_WINDOW,
    POLY_TERMS, SEGMENTS_PER_CHANNEL, TERM_EXPONENTS, VOLTAGE_OFFSET,
};
use thiserror::Error;

/// Rejected conversion input; the caller must not write to hardware.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationError {
    /// Voltage outside the calibrated envelope.
    #[error("voltage {requested} V outside calibrated range [{min} V, {max} V]")]
    VoltageOutOfRange {
        requested: f64,
        min: f64,
        max: f64,
    },
    /// The fit is undefined at non-positive drive frequencies.
    #[error("drive frequency {0} Hz is not positive")]
    FrequencyNotPositive(f64),
}

/// Per-channel amplitude calibration model.
///
/// Holds the fitted coefficient tables; conversions are pure functions of
/// (voltage, channel, frequency) with no allocation and no I/O.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationModel {
    thresholds_decivolts: &'static [i16; 4],
    coefficients: &'static [[[f64; 6]; SEGMENTS_PER_CHANNEL]; 4],
    term_exponents: &'static [i32; POLY_TERMS],
}

impl Default for CalibrationModel {
    fn default() -> Self {
        Self::factory()
    }
}

impl CalibrationModel {
    /// Model backed by the factory calibration tables.
    pub fn factory() -> Self {
        Self {
            thresholds_decivolts: &AMP_THRESHOLDS_DECIVOLTS,
            coefficients: &AMP_COEFFS,
            term_exponents: &TERM_EXPONENTS,
        }
    }

    /// Inclusive (min, max) of the calibrated voltage envelope in volts.
    pub fn voltage_envelope(&self) -> (f64, f64) {
        (
            f64::from(self.thresholds_decivolts[0]) / 10.0,
            f64::from(self.thresholds_decivolts[SEGMENTS_PER_CHANNEL]) / 10.0,
        )
    }

    /// Convert a requested voltage into the channel's gain tuning word at
    /// the given drive frequency.
    ///
    /// Deterministic: identical inputs always produce bit-identical words.
    pub fn voltage_to_tuning_word(
        &self,
        channel: Channel,
        voltage: f64,
        frequency_hz: f64,
    ) -> Result<i16, CalibrationError> {
        let (min, max) = self.voltage_envelope();
        if !(voltage >= min && voltage <= max) {
            return Err(CalibrationError::VoltageOutOfRange {
                requested: voltage,
                min,
                max,
            });
        }
        if !(frequency_hz > 0.0) {
            return Err(CalibrationError::FrequencyNotPositive(frequency_hz));
        }

        let coeffs = &self.coefficients[channel.index()][self.segment_index(voltage)];

        // Split the frequency into significand and decimal order so each
        // polynomial term stays inside a stable exponent range.
        let order = order_of_magnitude(frequency_hz);
        let significand = frequency_hz / pow10(order);
        let mut poly_sum = 0.0;
        for (term, &coeff) in coeffs[..POLY_TERMS].iter().enumerate() {
            let degree = term as i32 + 1;
            let order_diff = (self.term_exponents[term] - FIT_SCALE_EXPONENT) - order * degree;
            if order_diff < -ORDER_WINDOW || order_diff > ORDER_WINDOW {
                continue;
            }
            let mut term_value = coeff;
            for _ in 0..degree {
                term_value *= significand;
            }
            poly_sum += term_value * pow10(-order_diff);
        }

        // The factor of 10^-5 absorbed by the fit reappears as the 100/10
        // scaling of the numerator.
        let numerator = 100.0 * voltage - 10.0 * coeffs[VOLTAGE_OFFSET];
        let word = numerator / (poly_sum + coeffs[FINAL_OFFSET]);
        Ok(word as i16)
    }

    /// First segment whose inclusive bounds contain the voltage.
    fn segment_index(&self, voltage: f64) -> usize {
        for segment in 0..SEGMENTS_PER_CHANNEL {
            let low = f64::from(self.thresholds_decivolts[segment]) / 10.0;
            let high = f64::from(self.thresholds_decivolts[segment + 1]) / 10.0;
            if low <= voltage && voltage <= high {
                return segment;
            }
        }
        0
    }
}
