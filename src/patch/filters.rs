// Copyright (c) 2024 Mike Tsao

use crate::{
    error::RangeError,
    types::{Event, EventType, EventTypes, CHANNEL_RANGE, DATA_RANGE},
};
use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

/// A pure predicate on a single field. A node wrapping a [Filter] emits the
/// input event unchanged when it matches and nothing otherwise, so filters are
/// always safe to [invert](crate::patch::invert()).
///
/// Filters that look at a type-specific field (key, velocity, controller,
/// program) never match events of other types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    /// Matches events on any of the listed ports.
    Port(Vec<u32>),
    /// Matches events on any of the listed channels.
    Channel(Vec<i32>),
    /// Matches events whose type is in the set.
    Type(EventTypes),
    /// Matches note events (note-on, note-off, polyphonic aftertouch) whose
    /// note number is in range.
    Key(RangeInclusive<i32>),
    /// Matches note-ons whose velocity is in range. A note-on with velocity 0
    /// ends a note and never matches.
    Velocity(RangeInclusive<i32>),
    /// Matches control changes for any of the listed controller numbers.
    Ctrl(Vec<i32>),
    /// Matches control changes whose value is in range.
    CtrlValue(RangeInclusive<i32>),
    /// Matches program changes for any of the listed (raw) program numbers.
    Program(Vec<i32>),
}
impl Filter {
    /// Whether the event passes this filter.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Filter::Port(ports) => ports.contains(&event.port),
            Filter::Channel(channels) => channels.contains(&event.channel),
            Filter::Type(types) => types.contains(event.event_type),
            Filter::Key(range) => event.event_type.is_note() && range.contains(&event.note()),
            Filter::Velocity(range) => {
                event.is_note_start() && range.contains(&event.velocity())
            }
            Filter::Ctrl(ctrls) => {
                event.event_type == EventType::ControlChange && ctrls.contains(&event.ctrl_number())
            }
            Filter::CtrlValue(range) => {
                event.event_type == EventType::ControlChange && range.contains(&event.value())
            }
            Filter::Program(programs) => {
                event.event_type == EventType::ProgramChange
                    && programs.contains(&event.program_number())
            }
        }
    }

    /// Checks the filter's parameters against the legal field ranges.
    pub fn validate(&self) -> Result<(), RangeError> {
        match self {
            Filter::Port(_) | Filter::Type(_) => Ok(()),
            Filter::Channel(channels) => channels
                .iter()
                .try_for_each(|c| RangeError::check("channel", *c, CHANNEL_RANGE)),
            Filter::Key(range) => Self::validate_range("note", range),
            Filter::Velocity(range) => Self::validate_range("velocity", range),
            Filter::CtrlValue(range) => Self::validate_range("value", range),
            Filter::Ctrl(ctrls) => ctrls
                .iter()
                .try_for_each(|c| RangeError::check("ctrl", *c, DATA_RANGE)),
            Filter::Program(programs) => programs
                .iter()
                .try_for_each(|p| RangeError::check("program", *p, DATA_RANGE)),
        }
    }

    fn validate_range(field: &'static str, range: &RangeInclusive<i32>) -> Result<(), RangeError> {
        RangeError::check(field, *range.start(), DATA_RANGE)?;
        RangeError::check(field, *range.end(), DATA_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_and_channel_filters() {
        let e = Event::note_on(2, 5, 60, 100);
        assert!(Filter::Port(vec![1, 2]).matches(&e));
        assert!(!Filter::Port(vec![0]).matches(&e));
        assert!(Filter::Channel(vec![5]).matches(&e));
        assert!(!Filter::Channel(vec![]).matches(&e));
    }

    #[test]
    fn type_filter() {
        let f = Filter::Type(EventTypes::NOTE);
        assert!(f.matches(&Event::note_on(0, 0, 60, 100)));
        assert!(f.matches(&Event::note_off(0, 0, 60)));
        assert!(!f.matches(&Event::ctrl(0, 0, 7, 100)));
    }

    #[test]
    fn type_specific_filters_ignore_other_types() {
        let ctrl = Event::ctrl(0, 0, 60, 100);
        assert!(!Filter::Key(0..=127).matches(&ctrl));
        assert!(!Filter::Velocity(0..=127).matches(&ctrl));
        assert!(!Filter::Program(vec![60]).matches(&ctrl));

        let note = Event::note_on(0, 0, 7, 100);
        assert!(!Filter::Ctrl(vec![7]).matches(&note));
        assert!(!Filter::CtrlValue(0..=127).matches(&note));
    }

    #[test]
    fn zero_velocity_note_on_is_not_a_note_start() {
        let release = Event::note_on(0, 0, 60, 0);
        assert!(!Filter::Velocity(0..=10).matches(&release));
        assert!(!Filter::Velocity(0..=127).matches(&release));
        assert!(Filter::Key(60..=60).matches(&release));
    }

    #[test]
    fn range_filters() {
        let f = Filter::Key(60..=72);
        assert!(f.matches(&Event::note_on(0, 0, 60, 100)));
        assert!(f.matches(&Event::note_off(0, 0, 72)));
        assert!(f.matches(&Event::poly_aftertouch(0, 0, 65, 10)));
        assert!(!f.matches(&Event::note_on(0, 0, 73, 100)));

        let f = Filter::Velocity(1..=64);
        assert!(f.matches(&Event::note_on(0, 0, 60, 64)));
        assert!(!f.matches(&Event::note_on(0, 0, 60, 65)));
        assert!(
            !f.matches(&Event::note_off(0, 0, 60)),
            "velocity filters only look at note-ons"
        );

        let f = Filter::CtrlValue(10..=20);
        assert!(f.matches(&Event::ctrl(0, 0, 1, 15)));
        assert!(!f.matches(&Event::ctrl(0, 0, 1, 21)));
    }

    #[test]
    fn program_filter_uses_raw_program_number() {
        let f = Filter::Program(vec![3]);
        assert!(f.matches(&Event::program(0, 0, 3)));
        assert!(!f.matches(&Event::program(0, 0, 4)));
    }

    #[test]
    fn filter_parameter_validation() {
        assert!(Filter::Channel(vec![0, 15]).validate().is_ok());
        assert!(Filter::Channel(vec![16]).validate().is_err());
        assert!(Filter::Key(0..=128).validate().is_err());
        assert!(Filter::Ctrl(vec![-1]).validate().is_err());
        assert!(Filter::Port(vec![1000]).validate().is_ok());
    }
}
