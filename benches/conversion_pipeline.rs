
use awg_core::calibration::{phase, CalibrationModel};
use awg_core::config::InstrumentConfig;
use awg_core::control::{CommandKind, ControlSurface, Request};
use awg_core::display::{DisplayFrame, DisplaySink};
use awg_core::hal::{Channel, SimulatedGenerator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const FREQUENCIES_HZ: &[f64] = &[5.0, 500.0, 50_000.0, 100_000.0];
const VOLTAGES: &[f64] = &[-5.5, -1.2, 0.0, 2.5, 5.5];

struct NullSink;

impl DisplaySink for NullSink {
    fn render(&mut self, _frame: &DisplayFrame) {}
}

fn benchmark_voltage_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("voltage_to_tuning_word");
    let model = CalibrationModel::factory();

    for &frequency in FREQUENCIES_HZ {
        group.bench_with_input(
            BenchmarkId::new("sweep", format!("{}hz", frequency)),
            &frequency,
            |b, &frequency| {
                b.iter(|| {
                    for channel in Channel::ALL {
                        for &voltage in VOLTAGES {
                            let _ = model.voltage_to_tuning_word(
                                channel,
                                black_box(voltage),
                                black_box(frequency),
                            );
                        }
                    }
                });
            },
        );
    }

    group.bench_function("rejection_path", |b| {
        b.iter(|| model.voltage_to_tuning_word(Channel::Ch1, black_box(-50.0), 50_000.0))
    });

    group.finish();
}

fn benchmark_phase_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("phase");

    group.bench_function("degrees_to_register", |b| {
        b.iter(|| {
            for degrees in [-180.0, -90.0, 0.0, 90.0, 179.9] {
                let _ = phase::phase_degrees_to_register(black_box(degrees));
            }
        });
    });

    group.bench_function("round_trip", |b| {
        b.iter(|| {
            phase::register_to_phase_degrees(phase::phase_degrees_to_register(black_box(137.5)))
        });
    });

    group.finish();
}

fn benchmark_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("set_voltage_accepted", |b| {
        let mut surface = ControlSurface::new(
            InstrumentConfig::default(),
            SimulatedGenerator::new(),
            NullSink,
        );
        surface.initialize();
        let request = Request {
            command: CommandKind::SetVoltage,
            suffix: Some(2),
            params: &["2.5"],
        };
        b.iter(|| surface.dispatch(black_box(&request)));
    });

    group.bench_function("set_voltage_rejected", |b| {
        let mut surface = ControlSurface::new(
            InstrumentConfig::default(),
            SimulatedGenerator::new(),
            NullSink,
        );
        surface.initialize();
        let request = Request {
            command: CommandKind::SetVoltage,
            suffix: Some(1),
            params: &["-50"],
        };
        // The bounded queue simply overwrites itself under sustained faults.
        b.iter(|| surface.dispatch(black_box(&request)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_voltage_conversion,
    benchmark_phase_conversion,
    benchmark_dispatch
);
criterion_main!(benches);
