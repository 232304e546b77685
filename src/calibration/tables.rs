// src/calibration/tables.rs
//! Factory amplitude-calibration tables
//!
//! Fitted per channel against the bench characterization run at pattern
//! period 0x8FFF. Each channel has three contiguous voltage segments; a
//! segment's six coefficients are the four frequency-polynomial terms, the
//! voltage offset, and the final offset. The polynomial coefficients absorb
//! a factor of 10^-FIT_SCALE_EXPONENT from the fit, undone term by term
//! during evaluation.

/// Segment boundaries in tenths of a volt; segment `i` spans
/// `[THRESHOLDS[i], THRESHOLDS[i+1]]` volts after division by ten.
pub(super) const AMP_THRESHOLDS_DECIVOLTS: [i16; 4] = [-55, -15, 15, 55];

/// Fitted magnitude order of each polynomial term, shared across channels.
pub(super) const TERM_EXPONENTS: [i32; 4] = [7, 11, 15, 19];

/// Decimal exponent absorbed into the polynomial coefficients by the fit.
pub(super) const FIT_SCALE_EXPONENT: i32 = 5;

/// Half-width of the order-of-magnitude window gating term inclusion.
pub(super) const ORDER_WINDOW: i32 = 10;

/// Number of voltage segments per channel.
pub(super) const SEGMENTS_PER_CHANNEL: usize = 3;

/// Number of frequency-polynomial terms per segment.
pub(super) const POLY_TERMS: usize = 4;

/// Slot of the voltage-offset coefficient within a segment.
pub(super) const VOLTAGE_OFFSET: usize = 4;

/// Slot of the final-offset coefficient within a segment.
pub(super) const FINAL_OFFSET: usize = 5;

/// Per-channel, per-segment coefficient sets.
pub(super) const AMP_COEFFS: [[[f64; 6]; SEGMENTS_PER_CHANNEL]; 4] = [
    // channel 1
    [
        [9.8712e-6, -3.1408e-7, 1.7273e-8, -2.4101e-10, -0.31042, 0.055108],
        [1.0034e-5, -3.2211e-7, 1.7694e-8, -2.4562e-10, 0.018437, 0.056224],
        [9.9257e-6, -3.1830e-7, 1.7401e-8, -2.4315e-10, 0.29368, 0.055671],
    ],
    // channel 2
    [
        [9.7903e-6, -3.0971e-7, 1.7052e-8, -2.3894e-10, -0.30781, 0.054812],
        [9.9821e-6, -3.1905e-7, 1.7510e-8, -2.4388e-10, 0.017925, 0.055936],
        [9.8764e-6, -3.1502e-7, 1.7218e-8, -2.4079e-10, 0.29104, 0.055377],
    ],
    // channel 3
    [
        [9.9478e-6, -3.1762e-7, 1.7455e-8, -2.4330e-10, -0.31277, 0.055493],
        [1.0081e-5, -3.2446e-7, 1.7832e-8, -2.4701e-10, 0.018712, 0.056558],
        [9.9903e-6, -3.2087e-7, 1.7586e-8, -2.4486e-10, 0.29541, 0.056012],
    ],
    // channel 4
    [
        [9.8245e-6, -3.1196e-7, 1.7164e-8, -2.3987e-10, -0.30915, 0.055027],
        [1.0008e-5, -3.2073e-7, 1.7601e-8, -2.4475e-10, 0.018206, 0.056101],
        [9.9032e-6, -3.1647e-7, 1.7309e-8, -2.4188e-10, 0.29235, 0.055544],
    ],
];
