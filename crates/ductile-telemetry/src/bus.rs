//! Event bus: queued event dispatch with pluggable sinks.
//!
//! Producers call `emit` at phase boundaries of the MPM step; events queue
//! on a `std::sync::mpsc` channel and reach the sinks only on `flush`, so
//! emitting from inside the hot solver loop never touches sink I/O.

use std::sync::mpsc;

use crate::events::StepEvent;
use crate::sinks::EventSink;

/// Queued broadcast bus for simulation telemetry.
pub struct EventBus {
    sender: mpsc::Sender<StepEvent>,
    receiver: mpsc::Receiver<StepEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// A disabled bus drops emitted events silently.
    enabled: bool,
}

impl EventBus {
    /// Creates a bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive every flushed event.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event for the next flush. No-op while disabled.
    pub fn emit(&self, event: StepEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives on this struct, so the send cannot fail.
        let _ = self.sender.send(event);
    }

    /// Dispatches all queued events to every sink, in emission order.
    /// Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Flushes remaining events and gives each sink its shutdown callback.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
