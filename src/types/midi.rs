// Copyright (c) 2024 Mike Tsao

use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// The legal range of an event's MIDI channel.
pub const CHANNEL_RANGE: RangeInclusive<i32> = 0..=15;
/// The legal range of a 7-bit data byte (note, velocity, controller, value,
/// program).
pub const DATA_RANGE: RangeInclusive<i32> = 0..=127;
/// The legal range of a pitch-bend value, centered on zero.
pub const PITCH_BEND_RANGE: RangeInclusive<i32> = -8192..=8191;
/// The legal range of a song-position value (14 bits).
pub const SONG_POSITION_RANGE: RangeInclusive<i32> = 0..=16383;

/// The controller number of the sustain (damper) pedal.
pub const SUSTAIN_CONTROLLER: i32 = 64;

/// The closed set of event types that can flow through a patch.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    FromRepr,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
#[allow(missing_docs)]
pub enum EventType {
    #[default]
    NoteOn,
    NoteOff,
    ControlChange,
    ProgramChange,
    PitchBend,
    /// Channel pressure.
    Aftertouch,
    /// Polyphonic key pressure.
    PolyAftertouch,
    SysEx,
    QuarterFrame,
    SongPosition,
    SongSelect,
    TuneRequest,
    Clock,
    Start,
    Continue,
    Stop,
    ActiveSensing,
    Reset,
}
#[allow(missing_docs)]
impl EventType {
    /// True for the types that carry a note number in `data1`.
    pub const fn is_note(&self) -> bool {
        matches!(
            self,
            EventType::NoteOn | EventType::NoteOff | EventType::PolyAftertouch
        )
    }

    /// True for channel-voice messages, which are the ones that care about
    /// their channel.
    pub const fn is_channel_message(&self) -> bool {
        matches!(
            self,
            EventType::NoteOn
                | EventType::NoteOff
                | EventType::ControlChange
                | EventType::ProgramChange
                | EventType::PitchBend
                | EventType::Aftertouch
                | EventType::PolyAftertouch
        )
    }

    pub const fn is_system_common(&self) -> bool {
        matches!(
            self,
            EventType::SysEx
                | EventType::QuarterFrame
                | EventType::SongPosition
                | EventType::SongSelect
                | EventType::TuneRequest
        )
    }

    pub const fn is_system_realtime(&self) -> bool {
        matches!(
            self,
            EventType::Clock
                | EventType::Start
                | EventType::Continue
                | EventType::Stop
                | EventType::ActiveSensing
                | EventType::Reset
        )
    }

    /// The legal range for this type's `data1` field, or `None` if the field
    /// is exempt from validation.
    pub fn data1_range(&self) -> Option<RangeInclusive<i32>> {
        match self {
            EventType::SysEx => None,
            _ => Some(DATA_RANGE),
        }
    }

    /// The legal range for this type's `data2` field, or `None` if the field
    /// is exempt from validation.
    pub fn data2_range(&self) -> Option<RangeInclusive<i32>> {
        match self {
            EventType::SysEx => None,
            EventType::PitchBend => Some(PITCH_BEND_RANGE),
            EventType::SongPosition => Some(SONG_POSITION_RANGE),
            _ => Some(DATA_RANGE),
        }
    }

    const fn bit(&self) -> u32 {
        1 << (*self as u8)
    }
}

/// A set of [EventType]s, used by type filters. Sets combine with `|`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct EventTypes(u32);
impl EventTypes {
    /// The empty set.
    pub const NONE: Self = Self(0);
    /// Note-ons and note-offs.
    pub const NOTE: Self = Self(EventType::NoteOn.bit() | EventType::NoteOff.bit());
    /// All system-common and system-realtime types.
    pub const SYSTEM: Self = Self(
        EventType::SysEx.bit()
            | EventType::QuarterFrame.bit()
            | EventType::SongPosition.bit()
            | EventType::SongSelect.bit()
            | EventType::TuneRequest.bit()
            | EventType::Clock.bit()
            | EventType::Start.bit()
            | EventType::Continue.bit()
            | EventType::Stop.bit()
            | EventType::ActiveSensing.bit()
            | EventType::Reset.bit(),
    );

    /// Every type.
    pub fn all() -> Self {
        EventType::iter().collect()
    }

    /// Whether the set contains the given type.
    pub const fn contains(&self, event_type: EventType) -> bool {
        self.0 & event_type.bit() != 0
    }

    /// Adds a type to the set.
    pub fn insert(&mut self, event_type: EventType) {
        self.0 |= event_type.bit();
    }

    /// Whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the types in the set, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = EventType> + '_ {
        EventType::iter().filter(|t| self.contains(*t))
    }
}
impl From<EventType> for EventTypes {
    fn from(value: EventType) -> Self {
        Self(value.bit())
    }
}
impl FromIterator<EventType> for EventTypes {
    fn from_iter<T: IntoIterator<Item = EventType>>(iter: T) -> Self {
        let mut r = Self::NONE;
        iter.into_iter().for_each(|t| r.insert(t));
        r
    }
}
impl core::ops::BitOr for EventTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}
impl core::ops::BitOr<EventType> for EventTypes {
    type Output = Self;

    fn bitor(self, rhs: EventType) -> Self::Output {
        Self(self.0 | rhs.bit())
    }
}
impl core::ops::BitOr for EventType {
    type Output = EventTypes;

    fn bitor(self, rhs: Self) -> Self::Output {
        EventTypes::from(self) | rhs
    }
}
