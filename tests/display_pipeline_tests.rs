// tests/display_pipeline_tests.rs
//! Integration tests for the fault-to-display pipeline
//!
//! A fault pushed anywhere in the instrument must flag a refresh, force the
//! error screen exactly once, and hand the display back to whatever screen
//! was showing before. A recording sink captures every rendered frame so the
//! tests can assert the exact screen sequence.

use awg_core::config::InstrumentConfig;
use awg_core::control::{CommandKind, ControlSurface, Request};
use awg_core::display::{DisplayFrame, DisplayMode, DisplaySink};
use awg_core::fault::{encode, GenericFault, ProtocolFault};
use awg_core::hal::{Channel, SimulatedGenerator};

#[derive(Default)]
struct RecordingSink {
    frames: Vec<DisplayFrame>,
}

impl DisplaySink for RecordingSink {
    fn render(&mut self, frame: &DisplayFrame) {
        self.frames.push(frame.clone());
    }
}

fn surface() -> ControlSurface<SimulatedGenerator, RecordingSink> {
    ControlSurface::new(
        InstrumentConfig::default(),
        SimulatedGenerator::new(),
        RecordingSink::default(),
    )
}

fn request<'a>(command: CommandKind, suffix: Option<i32>, params: &'a [&'a str]) -> Request<'a> {
    Request {
        command,
        suffix,
        params,
    }
}

#[test]
fn test_fault_forces_error_screen_then_restores_prior_screen() {
    let mut surface = surface();
    surface.dispatch(&request(CommandKind::SetDisplayMode, None, &["2"]));
    surface.refresh_display();

    surface.dispatch(&request(CommandKind::SetVoltage, Some(1), &["-50"]));
    surface.refresh_display();
    surface.refresh_display();

    assert_eq!(
        surface.sink().frames,
        vec![
            DisplayFrame::Focus {
                channel: Channel::Ch2,
                frequency_hz: 50_000.0,
                volts: 0.0,
                phase_degrees: 0.0,
            },
            DisplayFrame::Error {
                code: encode(GenericFault::ParamOutOfRange.into()),
                message: "Out of Range",
            },
            DisplayFrame::Focus {
                channel: Channel::Ch2,
                frequency_hz: 50_000.0,
                volts: 0.0,
                phase_degrees: 0.0,
            },
        ]
    );
    assert_eq!(surface.view().mode(), DisplayMode::Focus(Channel::Ch2));
}

#[test]
fn test_error_screen_pops_queue_exactly_once() {
    let mut surface = surface();
    surface.dispatch(&request(CommandKind::SetVoltage, Some(9), &["1.0"]));
    surface.dispatch(&request(CommandKind::SetVoltage, Some(1), &["-50"]));
    assert_eq!(surface.faults().len(), 2);

    surface.refresh_display();

    // The newest code is consumed; the older one stays queued for the remote
    // error query.
    assert_eq!(surface.faults().len(), 1);
    assert_eq!(surface.faults().peek_last().raw(), 205);
    match surface.sink().frames.as_slice() {
        [DisplayFrame::Error { code, message }] => {
            assert_eq!(code.raw(), 204);
            assert_eq!(*message, "Out of Range");
        }
        other => panic!("expected a single error frame, got {other:?}"),
    }
}

#[test]
fn test_refresh_without_pending_work_renders_nothing() {
    let mut surface = surface();
    surface.refresh_display();
    assert!(surface.sink().frames.is_empty());
}

#[test]
fn test_remote_mode_suppresses_periodic_refresh() {
    let mut surface = surface();
    surface.dispatch(&request(CommandKind::SetDisplayMode, None, &["5"]));
    surface.refresh_display();
    assert_eq!(surface.sink().frames, vec![DisplayFrame::Remote]);

    // Periodic hardware updates must not repaint the remote banner.
    surface.dispatch(&Request::bare(CommandKind::UpdatePattern));
    surface.refresh_display();
    assert_eq!(surface.sink().frames.len(), 1);

    // An explicit mode change still repaints.
    surface.dispatch(&request(CommandKind::SetDisplayMode, None, &["0"]));
    surface.refresh_display();
    assert_eq!(surface.sink().frames.len(), 2);
}

#[test]
fn test_periodic_update_refreshes_local_screens() {
    let mut surface = surface();
    surface.refresh_display();
    surface.dispatch(&Request::bare(CommandKind::UpdatePattern));
    surface.refresh_display();
    assert_eq!(
        surface.sink().frames,
        vec![DisplayFrame::Normal {
            channels: [(0.0, 0.0); 4],
        }]
    );
}

#[test]
fn test_error_screen_interrupts_remote_mode() {
    let mut surface = surface();
    surface.dispatch(&request(CommandKind::SetDisplayMode, None, &["5"]));
    surface.refresh_display();

    surface.report_protocol_fault(ProtocolFault::Timeout);
    surface.refresh_display();
    surface.refresh_display();

    assert_eq!(
        surface.sink().frames[1],
        DisplayFrame::Error {
            code: encode(ProtocolFault::Timeout.into()),
            message: "Timeout",
        }
    );
    // The remote banner comes back after acknowledgement.
    assert_eq!(surface.sink().frames[2], DisplayFrame::Remote);
    assert_eq!(surface.view().mode(), DisplayMode::Remote);
}

#[test]
fn test_accepted_settings_appear_on_focus_screen() {
    let mut surface = surface();
    surface.dispatch(&request(CommandKind::SetVoltage, Some(2), &["2.5"]));
    surface.dispatch(&request(CommandKind::SetPhase, Some(2), &["-90"]));
    surface.dispatch(&request(CommandKind::SetDisplayMode, None, &["2"]));
    surface.refresh_display();

    assert_eq!(
        surface.sink().frames,
        vec![DisplayFrame::Focus {
            channel: Channel::Ch2,
            frequency_hz: 50_000.0,
            volts: 2.5,
            phase_degrees: 270.0,
        }]
    );
}
