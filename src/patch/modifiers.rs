// Copyright (c) 2024 Mike Tsao

use crate::{
    error::RangeError,
    types::{Event, EventType, FieldOverrides, CHANNEL_RANGE, DATA_RANGE},
};
use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

/// How a [Modifier::Velocity] changes note-on velocities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VelocityChange {
    /// Adds a (possibly negative) amount.
    Offset(i32),
    /// Scales by a factor, rounding to the nearest integer.
    Multiply(f64),
    /// Replaces the velocity outright.
    Fixed(i32),
}

/// A pure, single-output transformation. A node wrapping a [Modifier] always
/// emits exactly one event. Events of types the modifier doesn't apply to come
/// out unchanged.
///
/// Modifiers don't clamp. A transposition that pushes a note past 127
/// produces an out-of-range event, which a validating engine drops on output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    /// Sets the port.
    Port(u32),
    /// Sets the channel of channel messages.
    Channel(i32),
    /// Shifts the note number of note events.
    Transpose(i32),
    /// Changes note-on velocities.
    Velocity(VelocityChange),
    /// Renumbers one controller.
    CtrlMap {
        /// The controller to match.
        from: i32,
        /// Its new number.
        to: i32,
    },
    /// Linearly maps one controller's values from `input` onto `output`.
    /// Values outside `input` are clamped to its ends first.
    CtrlRange {
        /// The controller to match.
        ctrl: i32,
        /// Source value range.
        input: RangeInclusive<i32>,
        /// Destination value range.
        output: RangeInclusive<i32>,
    },
}
impl Modifier {
    /// Produces the modified event.
    pub fn apply(&self, event: &Event) -> Event {
        let overrides = match self {
            Modifier::Port(port) => FieldOverrides {
                port: Some(*port),
                ..Default::default()
            },
            Modifier::Channel(channel) if event.event_type.is_channel_message() => {
                FieldOverrides {
                    channel: Some(*channel),
                    ..Default::default()
                }
            }
            Modifier::Transpose(offset) if event.event_type.is_note() => FieldOverrides {
                data1: Some(event.note().saturating_add(*offset)),
                ..Default::default()
            },
            Modifier::Velocity(change) if event.is_note_start() => FieldOverrides {
                data2: Some(change.apply(event.velocity())),
                ..Default::default()
            },
            Modifier::CtrlMap { from, to } if Self::is_ctrl(event, *from) => FieldOverrides {
                data1: Some(*to),
                ..Default::default()
            },
            Modifier::CtrlRange {
                ctrl,
                input,
                output,
            } if Self::is_ctrl(event, *ctrl) => FieldOverrides {
                data2: Some(Self::map_range(event.value(), input, output)),
                ..Default::default()
            },
            _ => FieldOverrides::default(),
        };
        event.with_fields(overrides)
    }

    /// Checks the modifier's parameters against the legal field ranges.
    pub fn validate(&self) -> Result<(), RangeError> {
        match self {
            Modifier::Port(_) | Modifier::Transpose(_) => Ok(()),
            Modifier::Channel(channel) => RangeError::check("channel", *channel, CHANNEL_RANGE),
            Modifier::Velocity(VelocityChange::Fixed(v)) => {
                RangeError::check("velocity", *v, DATA_RANGE)
            }
            Modifier::Velocity(_) => Ok(()),
            Modifier::CtrlMap { from, to } => {
                RangeError::check("ctrl", *from, DATA_RANGE)?;
                RangeError::check("ctrl", *to, DATA_RANGE)
            }
            Modifier::CtrlRange {
                ctrl,
                input,
                output,
            } => {
                RangeError::check("ctrl", *ctrl, DATA_RANGE)?;
                for v in [input.start(), input.end(), output.start(), output.end()] {
                    RangeError::check("value", *v, DATA_RANGE)?;
                }
                Ok(())
            }
        }
    }

    fn is_ctrl(event: &Event, ctrl: i32) -> bool {
        event.event_type == EventType::ControlChange && event.ctrl_number() == ctrl
    }

    fn map_range(value: i32, input: &RangeInclusive<i32>, output: &RangeInclusive<i32>) -> i32 {
        let (in_lo, in_hi) = (*input.start(), *input.end());
        let (out_lo, out_hi) = (*output.start(), *output.end());
        if in_lo == in_hi {
            return out_lo;
        }
        let value = value.clamp(in_lo.min(in_hi), in_lo.max(in_hi));
        let t = (value as i64 - in_lo as i64) as f64 / (in_hi as i64 - in_lo as i64) as f64;
        (out_lo as f64 + t * (out_hi as i64 - out_lo as i64) as f64).round() as i32
    }
}
impl VelocityChange {
    fn apply(&self, velocity: i32) -> i32 {
        match self {
            VelocityChange::Offset(offset) => velocity.saturating_add(*offset),
            VelocityChange::Multiply(factor) => (velocity as f64 * factor).round() as i32,
            VelocityChange::Fixed(v) => *v,
        }
    }
}
