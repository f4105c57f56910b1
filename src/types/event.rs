// Copyright (c) 2024 Mike Tsao

use super::midi::{EventType, CHANNEL_RANGE, SUSTAIN_CONTROLLER};
use crate::error::RangeError;
use serde::{Deserialize, Serialize};

/// One MIDI-like message.
///
/// [Event] is a plain value: equality is field-wise, and nothing in this crate
/// mutates an event in place. Nodes that change an event produce a new one,
/// usually with [Event::with_fields()].
///
/// The data fields follow the usual MIDI conventions. `data1` is the note or
/// controller number, and `data2` is the velocity, controller value, program
/// number, or pitch-bend amount. The fields are deliberately wider than their
/// legal ranges so that an unvalidated engine can carry out-of-range values
/// through untouched; [Event::validate()] is the gatekeeper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Event {
    /// What kind of message this is.
    pub event_type: EventType,
    /// The port the event arrived on or is destined for.
    pub port: u32,
    /// The MIDI channel, 0-15.
    pub channel: i32,
    /// First data field.
    pub data1: i32,
    /// Second data field.
    pub data2: i32,
}

/// Field replacements for [Event::with_fields()]. `None` leaves the field
/// alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct FieldOverrides {
    pub event_type: Option<EventType>,
    pub port: Option<u32>,
    pub channel: Option<i32>,
    pub data1: Option<i32>,
    pub data2: Option<i32>,
}
impl FieldOverrides {
    /// True if applying these overrides can't change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[allow(missing_docs)]
impl Event {
    /// Creates an event without checking any ranges.
    pub const fn new(event_type: EventType, port: u32, channel: i32, data1: i32, data2: i32) -> Self {
        Self {
            event_type,
            port,
            channel,
            data1,
            data2,
        }
    }

    /// Creates an event, failing if `validate` is set and any field is outside
    /// its legal range.
    pub fn new_checked(
        event_type: EventType,
        port: u32,
        channel: i32,
        data1: i32,
        data2: i32,
        validate: bool,
    ) -> Result<Self, RangeError> {
        let r = Self::new(event_type, port, channel, data1, data2);
        if validate {
            r.validate()?;
        }
        Ok(r)
    }

    pub const fn note_on(port: u32, channel: i32, note: i32, velocity: i32) -> Self {
        Self::new(EventType::NoteOn, port, channel, note, velocity)
    }

    /// A note-off always has a velocity of zero.
    pub const fn note_off(port: u32, channel: i32, note: i32) -> Self {
        Self::new(EventType::NoteOff, port, channel, note, 0)
    }

    pub const fn ctrl(port: u32, channel: i32, ctrl: i32, value: i32) -> Self {
        Self::new(EventType::ControlChange, port, channel, ctrl, value)
    }

    /// The program number lives in `data2`, like the value of a controller.
    pub const fn program(port: u32, channel: i32, program: i32) -> Self {
        Self::new(EventType::ProgramChange, port, channel, 0, program)
    }

    /// `value` is signed and centered on zero.
    pub const fn pitch_bend(port: u32, channel: i32, value: i32) -> Self {
        Self::new(EventType::PitchBend, port, channel, 0, value)
    }

    pub const fn aftertouch(port: u32, channel: i32, value: i32) -> Self {
        Self::new(EventType::Aftertouch, port, channel, 0, value)
    }

    pub const fn poly_aftertouch(port: u32, channel: i32, note: i32, value: i32) -> Self {
        Self::new(EventType::PolyAftertouch, port, channel, note, value)
    }

    /// Creates a message that has no channel or data, such as a realtime
    /// clock tick.
    pub const fn system(event_type: EventType, port: u32) -> Self {
        Self::new(event_type, port, 0, 0, 0)
    }

    /// Returns a copy of this event with the given fields replaced. Fields
    /// that `overrides` doesn't mention are copied verbatim.
    pub fn with_fields(&self, overrides: FieldOverrides) -> Self {
        Self {
            event_type: overrides.event_type.unwrap_or(self.event_type),
            port: overrides.port.unwrap_or(self.port),
            channel: overrides.channel.unwrap_or(self.channel),
            data1: overrides.data1.unwrap_or(self.data1),
            data2: overrides.data2.unwrap_or(self.data2),
        }
    }

    /// Like [Event::with_fields()], but validates the result when `validate`
    /// is set.
    pub fn try_with_fields(
        &self,
        overrides: FieldOverrides,
        validate: bool,
    ) -> Result<Self, RangeError> {
        let r = self.with_fields(overrides);
        if validate {
            r.validate()?;
        }
        Ok(r)
    }

    /// Checks every field against the legal range for this event's type.
    /// System-exclusive data fields are exempt.
    pub fn validate(&self) -> Result<(), RangeError> {
        RangeError::check("channel", self.channel, CHANNEL_RANGE)?;
        if let Some(range) = self.event_type.data1_range() {
            RangeError::check("data1", self.data1, range)?;
        }
        if let Some(range) = self.event_type.data2_range() {
            RangeError::check("data2", self.data2, range)?;
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub const fn note(&self) -> i32 {
        self.data1
    }

    pub const fn velocity(&self) -> i32 {
        self.data2
    }

    /// The controller number of a control-change event.
    pub const fn ctrl_number(&self) -> i32 {
        self.data1
    }

    pub const fn value(&self) -> i32 {
        self.data2
    }

    pub const fn program_number(&self) -> i32 {
        self.data2
    }

    /// True for a note-on with nonzero velocity.
    pub fn is_note_start(&self) -> bool {
        self.event_type == EventType::NoteOn && self.data2 != 0
    }

    /// True for a note-off, or a note-on with zero velocity, which MIDI treats
    /// the same way.
    pub fn is_note_end(&self) -> bool {
        match self.event_type {
            EventType::NoteOff => true,
            EventType::NoteOn => self.data2 == 0,
            _ => false,
        }
    }

    /// Some(true) for a sustain-pedal press, Some(false) for a release, None
    /// for anything else.
    pub fn sustain_state(&self) -> Option<bool> {
        if self.event_type == EventType::ControlChange && self.data1 == SUSTAIN_CONTROLLER {
            Some(self.data2 >= 64)
        } else {
            None
        }
    }
}
impl core::fmt::Display for Event {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} port {} channel {} ({}, {})",
            self.event_type, self.port, self.channel, self.data1, self.data2
        )
    }
}
