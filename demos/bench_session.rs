// demos/bench_session.rs
//! Walkthrough of a remote bench session against the simulated generator

use awg_core::config::InstrumentConfig;
use awg_core::control::{CommandKind, ControlSurface, Reply, Request};
use awg_core::display::{DisplayFrame, DisplaySink};
use awg_core::hal::SimulatedGenerator;

/// Stand-in for the character LCD: prints each frame as it would be shown.
struct ConsolePanel;

impl DisplaySink for ConsolePanel {
    fn render(&mut self, frame: &DisplayFrame) {
        match frame {
            DisplayFrame::Normal { channels } => {
                println!("  [LCD] all channels:");
                for (i, (volts, phase)) in channels.iter().enumerate() {
                    println!("  [LCD]   CH{} {:>5.1} V  {:>6.2} deg", i + 1, volts, phase);
                }
            }
            DisplayFrame::Focus {
                channel,
                frequency_hz,
                volts,
                phase_degrees,
            } => {
                println!(
                    "  [LCD] {channel}: {frequency_hz:.0} Hz  {volts:.1} V  {phase_degrees:.2} deg"
                );
            }
            DisplayFrame::Error { code, message } => {
                println!("  [LCD] Error {code}");
                println!("  [LCD] {message}");
            }
            DisplayFrame::Remote => println!("  [LCD] ** remote access **"),
        }
    }
}

fn send(
    surface: &mut ControlSurface<SimulatedGenerator, ConsolePanel>,
    label: &str,
    request: &Request<'_>,
) {
    match surface.dispatch(request) {
        Reply::Line(line) => println!("{label} -> {line}"),
        Reply::None => println!("{label}"),
    }
    surface.refresh_display();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("AWG Core Bench Session Example");
    println!("==============================");

    let config = InstrumentConfig::default();
    config.validate()?;
    println!("Configuration:");
    println!("  - Identity: {}", config.identity);
    println!("  - Default frequency: {} Hz", config.default_frequency_hz);
    println!("  - Frequency limit: {} Hz", config.max_frequency_hz);

    let mut surface = ControlSurface::new(config, SimulatedGenerator::new(), ConsolePanel);

    println!("\nInitializing instrument...");
    surface.initialize();
    surface.refresh_display();

    println!("\nProgramming outputs...");
    send(
        &mut surface,
        "*IDN?",
        &Request::bare(CommandKind::Identify),
    );
    send(
        &mut surface,
        "VOLT2 2.5",
        &Request {
            command: CommandKind::SetVoltage,
            suffix: Some(2),
            params: &["2.5"],
        },
    );
    send(
        &mut surface,
        "PHAS2 90",
        &Request {
            command: CommandKind::SetPhase,
            suffix: Some(2),
            params: &["90"],
        },
    );
    send(
        &mut surface,
        "START",
        &Request::bare(CommandKind::StartPattern),
    );

    println!("\nFocusing the panel on channel 2...");
    send(
        &mut surface,
        "DISP 2",
        &Request {
            command: CommandKind::SetDisplayMode,
            suffix: None,
            params: &["2"],
        },
    );

    println!("\nRequesting a voltage outside the calibrated envelope...");
    println!("The panel flips to the error screen, then returns to channel 2:");
    send(
        &mut surface,
        "VOLT1 -50",
        &Request {
            command: CommandKind::SetVoltage,
            suffix: Some(1),
            params: &["-50"],
        },
    );
    surface.refresh_display();
    println!("Writes that reached the hardware so far:");
    for (addr, value) in surface.device().write_log() {
        println!("  reg 0x{addr:04X} <- 0x{value:04X}");
    }

    println!("\nA bad channel suffix, queried over the remote link instead...");
    let reply = surface.dispatch(&Request {
        command: CommandKind::SetVoltage,
        suffix: Some(9),
        params: &["1.0"],
    });
    assert_eq!(reply, Reply::None);
    for _ in 0..2 {
        if let Reply::Line(line) = surface.dispatch(&Request::bare(CommandKind::QueryLastError)) {
            println!("ERR? -> {line}");
        }
    }

    println!("\nSession complete.");
    Ok(())
}
