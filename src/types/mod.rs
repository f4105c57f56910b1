// Copyright (c) 2024 Mike Tsao

//! The event value model: what flows through a patch.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Event, EventType, EventTypes, FieldOverrides};
}

pub use {
    event::{Event, FieldOverrides},
    midi::{
        EventType, EventTypes, CHANNEL_RANGE, DATA_RANGE, PITCH_BEND_RANGE, SONG_POSITION_RANGE,
        SUSTAIN_CONTROLLER,
    },
};

mod event;
mod midi;
