//! AWG-Core: control and safety core for a benchtop waveform generator
//!
//! This library is the control layer of a four-channel DDS instrument: it
//! validates remote requests, converts requested outputs into hardware
//! register words through a calibrated numeric model, and funnels faults
//! from every subsystem into one prioritized, bounded error queue backing
//! both the remote error query and the local error screen. It features:
//!
//! - Prioritized error-code catalog and fixed-depth fault queue
//! - Calibrated voltage-to-tuning-word and phase register conversions
//! - Register-level hardware abstraction with an in-memory simulator
//! - Display mode state machine with a structured render-sink interface
//! - TOML-backed instrument configuration
//!
//! # Quick Start
//!
//! ```rust
//! use awg_core::config::InstrumentConfig;
//! use awg_core::control::{CommandKind, ControlSurface, Reply, Request};
//! use awg_core::display::{DisplayFrame, DisplaySink};
//! use awg_core::hal::SimulatedGenerator;
//!
//! struct Panel;
//! impl DisplaySink for Panel {
//!     fn render(&mut self, frame: &DisplayFrame) {
//!         println!("{frame:?}");
//!     }
//! }
//!
//! let mut surface = ControlSurface::new(
//!     InstrumentConfig::default(),
//!     SimulatedGenerator::new(),
//!     Panel,
//! );
//! surface.initialize();
//!
//! let reply = surface.dispatch(&Request {
//!     command: CommandKind::SetVoltage,
//!     suffix: Some(2),
//!     params: &["2.5"],
//! });
//! assert_eq!(reply, Reply::None);
//! assert!(surface.faults().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calibration;
pub mod config;
pub mod control;
pub mod display;
pub mod fault;
pub mod hal;
pub mod utils;

// Re-export commonly used types for convenience
pub use calibration::{CalibrationError, CalibrationModel};
pub use control::{CommandKind, ControlSurface, Reply, Request};
pub use display::{DisplayFrame, DisplayMode, DisplaySink, ViewState};
pub use fault::{ErrorCode, Fault, FaultQueue, GenericFault, HardwareFault, ProtocolFault};
pub use hal::{Channel, SimulatedGenerator, WaveformGenerator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
