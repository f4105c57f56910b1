// Copyright (c) 2024 Mike Tsao

//! Traits used by services.

use crossbeam::channel::{Receiver, Sender};

/// Service methods.
///
/// A service runs as a daemon on its own thread and talks to clients over
/// crossbeam channels. It accepts Inputs and produces Events.
pub trait ProvidesService<I: core::fmt::Debug, E: core::fmt::Debug> {
    /// The sender side of the Input channel. Clone it to give other threads a
    /// way to feed the service.
    fn sender(&self) -> &Sender<I>;

    /// Sends an Input to the service, logging rather than failing if the
    /// service has gone away.
    fn send_input(&self, input: I) {
        if let Err(e) = self.sender().try_send(input) {
            log::warn!("while sending to service: {e:?}");
        }
    }

    /// The receiver side of the Event channel. Integrate this into a listener
    /// loop to respond to events.
    fn receiver(&self) -> &Receiver<E>;

    /// Receives from `r` inside a crossbeam select loop.
    fn recv_operation<T>(
        oper: crossbeam::channel::SelectedOperation,
        r: &Receiver<T>,
    ) -> Result<T, crossbeam::channel::RecvError> {
        let input_result = oper.recv(r);
        if let Err(e) = input_result {
            log::debug!("while receiving from {:?}: {}", *r, e);
        }
        input_result
    }
}
