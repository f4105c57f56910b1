// Copyright (c) 2024 Mike Tsao

//! Configuration and system utilities.

/// Commonly used imports.
pub mod prelude {
    pub use super::{EngineConfig, Rng, TransportKind, UnknownScenePolicy};
}

pub use rng::Rng;
pub use settings::{
    EngineConfig, TransportKind, UnknownScenePolicy, MAX_EVENTS, MAX_SIMULTANEOUS_NOTES,
    MAX_SUSTAIN_PEDALS,
};

mod rng;
mod settings;
