// Copyright (c) 2024 Mike Tsao

//! Helpers shared by the integration tests.

#![allow(dead_code)]

use midiroute::{
    prelude::*,
    types::{DATA_RANGE, SONG_POSITION_RANGE},
};
use strum::IntoEnumIterator;

/// Routes test logging to the test harness. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A config with no scene-key bias, so program `n` selects scene `n`.
pub fn test_config() -> EngineConfig {
    EngineConfig {
        data_offset: 0,
        ..Default::default()
    }
}

/// Runs `events` through a fresh engine built from `scenes` and returns each
/// event's output.
pub fn run_scenes<I>(scenes: I, events: &[Event]) -> Vec<Vec<Event>>
where
    I: IntoIterator<Item = (SceneKey, Node)>,
{
    init_logging();
    let mut engine = Engine::new_with_patches(test_config(), scenes).unwrap();
    events.iter().map(|e| engine.process(*e)).collect()
}

/// Asserts that `patch` turns `event` into `expected`, both evaluated directly
/// and when installed as the only scene of an engine.
pub fn check_patch(patch: &Node, event: Event, expected: &[Event]) {
    assert_eq!(patch.clone().eval(&event), expected, "direct eval of {patch:?}");
    let outputs = run_scenes([(SceneKey(0), patch.clone())], &[event]);
    assert_eq!(outputs[0], expected, "engine eval of {patch:?}");
}

/// Asserts that `filter` passes or blocks `event`, and that its exclusion
/// (and, for boolean-acting filters, its inversion) does the opposite.
pub fn check_filter(filter: &Node, event: Event, passes: bool) {
    let (yes, no) = (vec![event], vec![]);
    let (expected, opposite) = if passes { (&yes, &no) } else { (&no, &yes) };
    check_patch(filter, event, expected);
    check_patch(&exclude(filter.clone()), event, opposite);
    if filter.is_boolean() {
        check_patch(&invert(filter.clone()).unwrap(), event, opposite);
    }
}

/// An arbitrary event whose fields are all within their legal ranges.
pub fn make_event(rng: &mut Rng) -> Event {
    let types: Vec<EventType> = EventType::iter().collect();
    let event_type = types[rng.rand_index(types.len())];
    make_event_of_type(rng, event_type)
}

/// Like [make_event()], with the type fixed.
pub fn make_event_of_type(rng: &mut Rng, event_type: EventType) -> Event {
    let port = rng.rand_in(0..=3) as u32;
    if !event_type.is_channel_message() {
        let mut e = Event::system(event_type, port);
        match event_type {
            EventType::SongSelect => e.data1 = rng.rand_in(DATA_RANGE),
            EventType::SongPosition => e.data2 = rng.rand_in(SONG_POSITION_RANGE),
            _ => {}
        }
        return e;
    }
    let channel = rng.rand_in(0..=15);
    let data1 = rng.rand_in(0..=127);
    let data2 = match event_type {
        EventType::NoteOn => rng.rand_in(1..=127),
        EventType::NoteOff => 0,
        other => rng.rand_in(other.data2_range().unwrap_or(0..=127)),
    };
    Event::new(event_type, port, channel, data1, data2)
}

/// A fixed-seed generator, so failures reproduce.
pub fn test_rng() -> Rng {
    Rng::new_with_seed(0x6d69_6469_726f_7574_65)
}
