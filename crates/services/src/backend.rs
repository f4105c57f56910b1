// Copyright (c) 2024 Mike Tsao

//! Event sources and sinks that an [Engine] can be attached to.

use midiroute::prelude::*;
use std::collections::VecDeque;

/// Something that delivers input events and accepts output events.
///
/// The engine doesn't care what kind of transport it's attached to; it only
/// ever sees [Event]s. [Backend::kind()] is informational.
pub trait Backend {
    /// Which transport this is.
    fn kind(&self) -> TransportKind;

    /// The next input event, or `None` if there is nothing more to read.
    fn receive(&mut self) -> Option<Event>;

    /// Emits `events` in order.
    fn send(&mut self, events: &[Event]) -> anyhow::Result<()>;
}

/// A backend with no hardware behind it. Input is queued up in advance, and
/// output is collected for later inspection.
#[derive(Debug, Default)]
pub struct DummyBackend {
    inputs: VecDeque<Event>,
    outputs: Vec<Event>,
}
impl DummyBackend {
    /// Creates a backend that will deliver `inputs` in order.
    pub fn new_with<I: IntoIterator<Item = Event>>(inputs: I) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            outputs: Default::default(),
        }
    }

    /// Queues another input event behind any already queued.
    pub fn push_input(&mut self, event: Event) {
        self.inputs.push_back(event);
    }

    /// Everything sent so far, in the order it was sent.
    pub fn outputs(&self) -> &[Event] {
        &self.outputs
    }

    /// Removes and returns everything sent so far.
    pub fn take_outputs(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outputs)
    }
}
impl Backend for DummyBackend {
    fn kind(&self) -> TransportKind {
        TransportKind::Dummy
    }

    fn receive(&mut self) -> Option<Event> {
        self.inputs.pop_front()
    }

    fn send(&mut self, events: &[Event]) -> anyhow::Result<()> {
        self.outputs.extend_from_slice(events);
        Ok(())
    }
}

/// Feeds every event the backend delivers through `engine`, one at a time, and
/// sends each result back to the backend before reading the next input.
/// Returns the number of input events processed.
pub fn run_backend(engine: &mut Engine, backend: &mut dyn Backend) -> anyhow::Result<usize> {
    if backend.kind() != engine.config().transport_kind {
        log::debug!(
            "engine configured for {} but attached to {}",
            engine.config().transport_kind,
            backend.kind()
        );
    }
    let mut count = 0;
    while let Some(event) = backend.receive() {
        let output = engine.process(event);
        if !output.is_empty() {
            backend.send(&output)?;
        }
        count += 1;
    }
    log::debug!("backend drained after {count} event(s)");
    Ok(count)
}
