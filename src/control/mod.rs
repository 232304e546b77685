// src/control/mod.rs
//! Dispatch of tokenized remote-control requests onto the instrument
//!
//! The text grammar of the remote protocol is handled upstream; requests
//! arrive here already split into a command kind, an optional numeric header
//! suffix (the channel number) and a parameter list. Dispatch validates the
//! request, runs the conversion engines, pokes the hardware collaborator and
//! mirrors accepted values into the display cache. Every rejection is
//! reported through the shared fault queue and aborts that single request
//! before any register write.

use crate::calibration::{phase, CalibrationModel};
use crate::config::InstrumentConfig;
use crate::display::{DisplayFrame, DisplayMode, DisplaySink, ViewState};
use crate::fault::{encode, message, Fault, FaultQueue, GenericFault, ProtocolFault};
use crate::hal::{registers, Channel, WaveformGenerator};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Command kinds of the remote protocol, post-tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Identify,
    Reset,
    StartPattern,
    StopPattern,
    UpdatePattern,
    SetVoltage,
    QueryVoltage,
    SetPhase,
    QueryPhase,
    SetFrequency,
    QueryFrequency,
    ReadRegister,
    WriteRegister,
    SetDisplayMode,
    QueryLastError,
}

/// One tokenized request: command, optional channel suffix, raw parameters.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub command: CommandKind,
    pub suffix: Option<i32>,
    pub params: &'a [&'a str],
}

impl<'a> Request<'a> {
    /// Request with neither suffix nor parameters.
    pub fn bare(command: CommandKind) -> Self {
        Self {
            command,
            suffix: None,
            params: &[],
        }
    }
}

/// Text sent back over the remote interface, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    None,
    Line(String),
}

/// The instrument's single thread of control: owns the hardware
/// collaborator, the calibration model, the fault queue and the display
/// state, and processes one request or periodic update to completion at a
/// time.
pub struct ControlSurface<D: WaveformGenerator, S: DisplaySink> {
    config: InstrumentConfig,
    device: D,
    calibration: CalibrationModel,
    faults: FaultQueue,
    view: ViewState,
    sink: S,
    redraw: Rc<Cell<bool>>,
}

impl<D: WaveformGenerator, S: DisplaySink> ControlSurface<D, S> {
    /// Assemble the control surface; the fault queue's notification callback
    /// is bound here and only flags a pending display refresh.
    pub fn new(config: InstrumentConfig, device: D, sink: S) -> Self {
        let redraw = Rc::new(Cell::new(false));
        let hook = Rc::clone(&redraw);
        let faults = FaultQueue::new(Box::new(move || hook.set(true)));
        Self {
            config,
            device,
            calibration: CalibrationModel::factory(),
            faults,
            view: ViewState::new(),
            sink,
            redraw,
        }
    }

    /// Bring the hardware and display to the configured startup state.
    pub fn initialize(&mut self) {
        self.reset_instrument();
    }

    /// Process one tokenized request to completion.
    pub fn dispatch(&mut self, request: &Request<'_>) -> Reply {
        debug!(
            command = ?request.command,
            suffix = ?request.suffix,
            params = request.params.len(),
            "dispatching request"
        );
        match request.command {
            CommandKind::Identify => self.handle_identify(request),
            CommandKind::Reset => self.handle_reset(request),
            CommandKind::StartPattern => self.handle_start(request),
            CommandKind::StopPattern => self.handle_stop(request),
            CommandKind::UpdatePattern => self.handle_update(request),
            CommandKind::SetVoltage => self.handle_set_voltage(request),
            CommandKind::QueryVoltage => self.handle_query_voltage(request),
            CommandKind::SetPhase => self.handle_set_phase(request),
            CommandKind::QueryPhase => self.handle_query_phase(request),
            CommandKind::SetFrequency => self.handle_set_frequency(request),
            CommandKind::QueryFrequency => self.handle_query_frequency(request),
            CommandKind::ReadRegister => self.handle_read_register(request),
            CommandKind::WriteRegister => self.handle_write_register(request),
            CommandKind::SetDisplayMode => self.handle_set_display_mode(request),
            CommandKind::QueryLastError => self.handle_query_last_error(request),
        }
    }

    /// Entry point for the excluded tokenizer layer to report its own
    /// faults (unknown command, timeout, input overflow).
    pub fn report_protocol_fault(&mut self, fault: ProtocolFault) {
        self.report(fault);
    }

    /// Repaint the local display if anything requested it. A fault raised
    /// since the last refresh forces the error screen, which consumes the
    /// newest queued code exactly once and then returns to the prior
    /// screen.
    pub fn refresh_display(&mut self) {
        if self.redraw.take() && !self.faults.is_empty() {
            self.view.set_mode(DisplayMode::Error);
        }
        if !self.view.take_redraw() {
            return;
        }
        if self.view.mode() == DisplayMode::Error {
            let code = self.faults.pop_last();
            self.sink.render(&DisplayFrame::Error {
                code,
                message: message(code),
            });
            let last = self.view.last_mode();
            self.view.set_mode(last);
        } else {
            self.sink.render(&DisplayFrame::from_view(&self.view));
        }
    }

    /// Pending fault queue.
    pub fn faults(&self) -> &FaultQueue {
        &self.faults
    }

    /// Display state machine and value cache.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Hardware collaborator.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable hardware collaborator (fault injection in tests).
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn report(&mut self, fault: impl Into<Fault>) {
        let code = encode(fault.into());
        warn!(code = code.raw(), message = message(code), "fault reported");
        self.faults.push(code);
    }

    fn param_count_ok(&mut self, expected: usize, received: usize) -> bool {
        if expected == received {
            return true;
        }
        if received > expected {
            self.report(GenericFault::TooManyParams);
        } else {
            self.report(GenericFault::TooFewParams);
        }
        false
    }

    fn channel_from_suffix(&mut self, suffix: Option<i32>) -> Option<Channel> {
        match Channel::try_from(suffix.unwrap_or(-1)) {
            Ok(channel) => Some(channel),
            Err(_) => {
                self.report(GenericFault::BadChannel);
                None
            }
        }
    }

    fn numeric_param(&mut self, raw: &str) -> Option<f64> {
        match raw.trim().parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.report(GenericFault::UnknownParam);
                None
            }
        }
    }

    fn hex_param(&mut self, raw: &str) -> Option<u16> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        match u16::from_str_radix(digits, 16) {
            Ok(value) => Some(value),
            Err(_) => {
                self.report(GenericFault::UnknownParam);
                None
            }
        }
    }

    fn reset_instrument(&mut self) {
        self.device.reset_registers();
        // Sine output on every channel, then the characterized defaults.
        for channel in Channel::ALL {
            self.device
                .write_register(registers::wave_config_register(channel), registers::WAV_SINE);
        }
        self.device.set_dds_frequency(self.config.default_frequency_hz);
        self.device
            .write_register(registers::PAT_PERIOD, self.config.pattern_period);
        self.view.reset();
        self.view.set_frequency(self.config.default_frequency_hz);
        self.view.request_redraw();
    }

    fn handle_identify(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        Reply::Line(self.config.identity.clone())
    }

    fn handle_reset(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        self.reset_instrument();
        Reply::None
    }

    fn handle_start(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        self.device.start_pattern();
        self.view.request_redraw();
        Reply::None
    }

    fn handle_stop(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        self.device.stop_pattern();
        Reply::None
    }

    fn handle_update(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        // Chip-side faults surface after the attempt; the update may have
        // partially applied.
        if let Err(fault) = self.device.update_pattern() {
            self.report(fault);
        }
        if self.view.mode() != DisplayMode::Remote {
            self.view.request_redraw();
        }
        Reply::None
    }

    fn handle_set_voltage(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(1, request.params.len()) {
            return Reply::None;
        }
        let Some(channel) = self.channel_from_suffix(request.suffix) else {
            return Reply::None;
        };
        let Some(voltage) = self.numeric_param(request.params[0]) else {
            return Reply::None;
        };
        let frequency = self.device.dds_frequency();
        match self
            .calibration
            .voltage_to_tuning_word(channel, voltage, frequency)
        {
            Ok(word) => {
                self.device
                    .write_register(registers::gain_register(channel), word as u16);
                self.view.set_volts(channel, voltage);
            }
            Err(err) => {
                warn!(%channel, %err, "voltage request rejected");
                self.report(GenericFault::ParamOutOfRange);
            }
        }
        Reply::None
    }

    fn handle_query_voltage(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        let Some(channel) = self.channel_from_suffix(request.suffix) else {
            return Reply::None;
        };
        // TODO: report a gain-register readback instead of the display cache.
        Reply::Line(format!("{:.2}", self.view.volts(channel)))
    }

    fn handle_set_phase(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(1, request.params.len()) {
            return Reply::None;
        }
        let Some(channel) = self.channel_from_suffix(request.suffix) else {
            return Reply::None;
        };
        let Some(degrees) = self.numeric_param(request.params[0]) else {
            return Reply::None;
        };
        if !(-180.0..=180.0).contains(&degrees) {
            self.report(GenericFault::ParamOutOfRange);
            return Reply::None;
        }
        let word = phase::phase_degrees_to_register(degrees);
        self.device
            .write_register(registers::phase_register(channel), word);
        self.view.set_phase(channel, degrees);
        Reply::None
    }

    fn handle_query_phase(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        let Some(channel) = self.channel_from_suffix(request.suffix) else {
            return Reply::None;
        };
        let word = self.device.read_register(registers::phase_register(channel));
        Reply::Line(format!("{:.2}", phase::register_to_phase_degrees(word)))
    }

    fn handle_set_frequency(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(1, request.params.len()) {
            return Reply::None;
        }
        let Some(frequency) = self.numeric_param(request.params[0]) else {
            return Reply::None;
        };
        if !(frequency > 0.0) || frequency > self.config.max_frequency_hz {
            self.report(GenericFault::ParamOutOfRange);
            return Reply::None;
        }
        self.device.set_dds_frequency(frequency);
        self.view.set_frequency(self.device.dds_frequency());
        Reply::None
    }

    fn handle_query_frequency(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        Reply::Line(format!("{:.2}", self.device.dds_frequency()))
    }

    fn handle_read_register(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(1, request.params.len()) {
            return Reply::None;
        }
        let Some(addr) = self.hex_param(request.params[0]) else {
            return Reply::None;
        };
        let value = self.device.read_register(addr);
        Reply::Line(format!("{value:X}"))
    }

    fn handle_write_register(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(2, request.params.len()) {
            return Reply::None;
        }
        let Some(addr) = self.hex_param(request.params[0]) else {
            return Reply::None;
        };
        let Some(value) = self.hex_param(request.params[1]) else {
            return Reply::None;
        };
        self.device.stop_pattern();
        self.device.write_register(addr, value);
        Reply::None
    }

    fn handle_set_display_mode(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(1, request.params.len()) {
            return Reply::None;
        }
        let selector = match request.params[0].trim().parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                self.report(GenericFault::UnknownParam);
                return Reply::None;
            }
        };
        let mode = match selector {
            0 => DisplayMode::Normal,
            5 => DisplayMode::Remote,
            other => match Channel::try_from(other) {
                Ok(channel) => DisplayMode::Focus(channel),
                Err(_) => {
                    self.report(GenericFault::BadChannel);
                    return Reply::None;
                }
            },
        };
        self.view.set_mode(mode);
        Reply::None
    }

    fn handle_query_last_error(&mut self, request: &Request<'_>) -> Reply {
        if !self.param_count_ok(0, request.params.len()) {
            return Reply::None;
        }
        let code = self.faults.pop_last();
        let reply = Reply::Line(format!("{} - {}", code, message(code)));
        if !code.is_none() {
            let last = self.view.last_mode();
            self.view.set_mode(last);
        }
        reply
    }
}
