// Copyright (c) 2024 Mike Tsao

//! Converts between [Event]s and MIDI wire bytes, using
//! [midly](https://crates.io/crates/midly)'s live-event parser.
//!
//! Only messages that fit entirely in an [Event] are supported. System
//! exclusive and MTC quarter-frame messages carry payloads that an [Event]
//! has nowhere to put, so both directions reject them.
//!
//! A note-on with velocity 0 decodes as a note-off.

use anyhow::anyhow;
use midiroute::prelude::*;
use midly::{
    live::{LiveEvent, SystemCommon, SystemRealtime},
    num::{u14, u4, u7},
    MidiMessage, PitchBend,
};

/// Parses one complete MIDI message. `port` becomes the event's port.
pub fn decode(bytes: &[u8], port: u32) -> anyhow::Result<Event> {
    let live = LiveEvent::parse(bytes).map_err(|e| anyhow!("can't parse MIDI message: {e}"))?;
    let event = match live {
        LiveEvent::Midi { channel, message } => {
            let channel = channel.as_int() as i32;
            match message {
                MidiMessage::NoteOn { key, vel } if vel.as_int() == 0 => {
                    Event::note_off(port, channel, key.as_int() as i32)
                }
                MidiMessage::NoteOn { key, vel } => {
                    Event::note_on(port, channel, key.as_int() as i32, vel.as_int() as i32)
                }
                MidiMessage::NoteOff { key, vel } => Event::new(
                    EventType::NoteOff,
                    port,
                    channel,
                    key.as_int() as i32,
                    vel.as_int() as i32,
                ),
                MidiMessage::Aftertouch { key, vel } => Event::poly_aftertouch(
                    port,
                    channel,
                    key.as_int() as i32,
                    vel.as_int() as i32,
                ),
                MidiMessage::Controller { controller, value } => Event::ctrl(
                    port,
                    channel,
                    controller.as_int() as i32,
                    value.as_int() as i32,
                ),
                MidiMessage::ProgramChange { program } => {
                    Event::program(port, channel, program.as_int() as i32)
                }
                MidiMessage::ChannelAftertouch { vel } => {
                    Event::aftertouch(port, channel, vel.as_int() as i32)
                }
                MidiMessage::PitchBend { bend } => {
                    Event::pitch_bend(port, channel, bend.as_int() as i32)
                }
            }
        }
        LiveEvent::Common(common) => match common {
            SystemCommon::SongPosition(position) => Event::new(
                EventType::SongPosition,
                port,
                0,
                0,
                position.as_int() as i32,
            ),
            SystemCommon::SongSelect(song) => {
                Event::new(EventType::SongSelect, port, 0, song.as_int() as i32, 0)
            }
            SystemCommon::TuneRequest => Event::system(EventType::TuneRequest, port),
            other => return Err(anyhow!("unsupported system common message {other:?}")),
        },
        LiveEvent::Realtime(realtime) => {
            let event_type = match realtime {
                SystemRealtime::TimingClock => EventType::Clock,
                SystemRealtime::Start => EventType::Start,
                SystemRealtime::Continue => EventType::Continue,
                SystemRealtime::Stop => EventType::Stop,
                SystemRealtime::ActiveSensing => EventType::ActiveSensing,
                SystemRealtime::Reset => EventType::Reset,
                SystemRealtime::Undefined(status) => {
                    return Err(anyhow!("undefined realtime status {status:#04x}"))
                }
            };
            Event::system(event_type, port)
        }
    };
    Ok(event)
}

/// Serializes `event` as one MIDI message. The port isn't part of the wire
/// format and is ignored. Out-of-range fields are an error.
pub fn encode(event: &Event) -> anyhow::Result<Vec<u8>> {
    event.validate()?;
    let live = match event.event_type {
        EventType::SysEx | EventType::QuarterFrame => {
            return Err(anyhow!("can't encode {} without its payload", event.event_type))
        }
        EventType::SongPosition => {
            LiveEvent::Common(SystemCommon::SongPosition(u14::new(event.data2 as u16)))
        }
        EventType::SongSelect => {
            LiveEvent::Common(SystemCommon::SongSelect(u7::new(event.data1 as u8)))
        }
        EventType::TuneRequest => LiveEvent::Common(SystemCommon::TuneRequest),
        EventType::Clock => LiveEvent::Realtime(SystemRealtime::TimingClock),
        EventType::Start => LiveEvent::Realtime(SystemRealtime::Start),
        EventType::Continue => LiveEvent::Realtime(SystemRealtime::Continue),
        EventType::Stop => LiveEvent::Realtime(SystemRealtime::Stop),
        EventType::ActiveSensing => LiveEvent::Realtime(SystemRealtime::ActiveSensing),
        EventType::Reset => LiveEvent::Realtime(SystemRealtime::Reset),
        _ => LiveEvent::Midi {
            channel: u4::new(event.channel as u8),
            message: channel_message(event),
        },
    };
    let mut bytes = Vec::with_capacity(3);
    live.write_std(&mut bytes)?;
    Ok(bytes)
}

// Assumes the event has been validated.
fn channel_message(event: &Event) -> MidiMessage {
    let data1 = u7::new(event.data1 as u8);
    let data2 = u7::new(event.data2 as u8);
    match event.event_type {
        EventType::NoteOff => MidiMessage::NoteOff {
            key: data1,
            vel: data2,
        },
        EventType::PolyAftertouch => MidiMessage::Aftertouch {
            key: data1,
            vel: data2,
        },
        EventType::ControlChange => MidiMessage::Controller {
            controller: data1,
            value: data2,
        },
        EventType::ProgramChange => MidiMessage::ProgramChange { program: data2 },
        EventType::Aftertouch => MidiMessage::ChannelAftertouch { vel: data2 },
        EventType::PitchBend => MidiMessage::PitchBend {
            bend: PitchBend::from_int(event.data2 as i16),
        },
        _ => MidiMessage::NoteOn {
            key: data1,
            vel: data2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_channel_messages() {
        assert_eq!(
            decode(&[0x91, 60, 100], 2).unwrap(),
            Event::note_on(2, 1, 60, 100)
        );
        assert_eq!(
            decode(&[0x80, 60, 64], 0).unwrap(),
            Event::new(EventType::NoteOff, 0, 0, 60, 64)
        );
        assert_eq!(decode(&[0xB3, 64, 127], 0).unwrap(), Event::ctrl(0, 3, 64, 127));
        assert_eq!(
            decode(&[0xC0, 5], 0).unwrap(),
            Event::program(0, 0, 5),
            "program number lands in data2"
        );
        assert_eq!(
            decode(&[0xE0, 0x00, 0x40], 0).unwrap(),
            Event::pitch_bend(0, 0, 0),
            "pitch bend is centered at zero"
        );
        assert_eq!(
            decode(&[0xE0, 0x00, 0x00], 0).unwrap(),
            Event::pitch_bend(0, 0, -8192)
        );
    }

    #[test]
    fn zero_velocity_note_on_decodes_as_note_off() {
        let event = decode(&[0x93, 60, 0], 1).unwrap();
        assert_eq!(event, Event::note_off(1, 3, 60));
        assert_eq!(event.event_type, EventType::NoteOff);
        assert!(event.is_note_end());
        assert!(!Filter::Velocity(0..=10).matches(&event));
        assert!(Filter::Type(EventType::NoteOff.into()).matches(&event));
        assert_eq!(encode(&event).unwrap(), vec![0x83, 60, 0]);
    }

    #[test]
    fn decode_system_messages() {
        assert_eq!(
            decode(&[0xF8], 1).unwrap(),
            Event::system(EventType::Clock, 1)
        );
        assert_eq!(decode(&[0xF2, 0x7F, 0x7F], 0).unwrap().data2, 16383);
        assert_eq!(decode(&[0xF3, 9], 0).unwrap().data1, 9);
        assert!(decode(&[0xF0, 1, 2, 0xF7], 0).is_err(), "sysex");
        assert!(decode(&[0xF1, 0x10], 0).is_err(), "quarter frame");
        assert!(decode(&[], 0).is_err());
    }

    #[test]
    fn encode_matches_wire_format() {
        assert_eq!(
            encode(&Event::note_on(7, 1, 60, 100)).unwrap(),
            vec![0x91, 60, 100]
        );
        assert_eq!(encode(&Event::program(0, 0, 5)).unwrap(), vec![0xC0, 5]);
        assert_eq!(
            encode(&Event::pitch_bend(0, 0, 8191)).unwrap(),
            vec![0xE0, 0x7F, 0x7F]
        );
        assert_eq!(
            encode(&Event::system(EventType::Start, 0)).unwrap(),
            vec![0xFA]
        );
    }

    #[test]
    fn encode_rejects_what_it_cannot_represent() {
        assert!(encode(&Event::note_on(0, 16, 60, 100)).is_err());
        assert!(encode(&Event::system(EventType::SysEx, 0)).is_err());
        assert!(encode(&Event::system(EventType::QuarterFrame, 0)).is_err());
    }

    #[test]
    fn decoded_events_encode_back() {
        for bytes in [
            vec![0x9F, 0, 127],
            vec![0xA2, 10, 20],
            vec![0xD4, 33],
            vec![0xF2, 0x01, 0x02],
            vec![0xF6],
            vec![0xFF],
        ] {
            let event = decode(&bytes, 0).unwrap();
            assert_eq!(encode(&event).unwrap(), bytes, "{event}");
        }
    }
}
