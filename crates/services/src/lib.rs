// Copyright (c) 2024 Mike Tsao

//! Transport plumbing for midiroute. Backends deliver and collect events, the
//! codec converts between [Event](midiroute::Event)s and MIDI wire bytes, and
//! [EngineService] runs an [Engine](midiroute::Engine) on its own thread
//! behind crossbeam channels.

#![deny(missing_docs)]

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        run_backend, Backend, CrossbeamChannel, DummyBackend, EngineService, EngineServiceEvent,
        EngineServiceInput, ProvidesService,
    };
}

pub use {
    backend::{run_backend, Backend, DummyBackend},
    engine::{EngineService, EngineServiceEvent, EngineServiceInput},
    traits::ProvidesService,
    types::CrossbeamChannel,
};

mod backend;
#[cfg(feature = "codec")]
pub mod codec;
mod engine;
mod traits;
mod types;
