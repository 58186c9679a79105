//! Integration tests for ductile-telemetry.

use ductile_telemetry::bus::EventBus;
use ductile_telemetry::events::{EventKind, StepEvent};
use ductile_telemetry::sinks::VecSink;

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink));

    bus.emit(StepEvent::new(0, EventKind::StepBegin { dt: 0.01 }));
    bus.emit(StepEvent::new(0, EventKind::StepEnd { wall_time: 0.001 }));

    assert_eq!(bus.flush(), 2);
    // The queue is empty after a flush.
    assert_eq!(bus.flush(), 0);
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    bus.set_enabled(false);
    bus.emit(StepEvent::new(0, EventKind::RasterizeBegin));
    assert_eq!(bus.flush(), 0);
}

#[test]
fn multiple_sinks() {
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(VecSink::new()));
    bus.add_sink(Box::new(VecSink::new()));
    assert_eq!(bus.sink_count(), 2);
}

#[test]
fn event_serialization() {
    let event = StepEvent::new(
        5,
        EventKind::Enrichment {
            enriched_corners: 12,
            total_corners: 36,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: StepEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.step, 5);
}

#[test]
fn phase_events_round_trip() {
    let event = StepEvent::new(10, EventKind::ConstitutiveBegin { dt: 0.005 });
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("ConstitutiveBegin"));
}
