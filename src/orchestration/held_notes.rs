// Copyright (c) 2024 Mike Tsao

use super::SceneKey;
use crate::{
    types::Event,
    util::{MAX_SIMULTANEOUS_NOTES, MAX_SUSTAIN_PEDALS},
};
use rustc_hash::FxHashMap;

/// Remembers which scene started each sounding note and each pressed sustain
/// pedal, so that the matching note-off or pedal release can go back through
/// the same scene after a scene switch.
///
/// Notes are keyed by (port, channel, note), pedals by (port, channel). A
/// second note-on for a held note replaces the first one's scene.
#[derive(Debug)]
pub(crate) struct HeldNotes {
    notes: FxHashMap<(u32, i32, i32), SceneKey>,
    pedals: FxHashMap<(u32, i32), SceneKey>,
}
impl Default for HeldNotes {
    fn default() -> Self {
        let mut notes = FxHashMap::default();
        notes.reserve(MAX_SIMULTANEOUS_NOTES);
        let mut pedals = FxHashMap::default();
        pedals.reserve(MAX_SUSTAIN_PEDALS);
        Self { notes, pedals }
    }
}
impl HeldNotes {
    /// If `event` ends something that an earlier event started, forgets it and
    /// returns the scene that started it.
    pub(crate) fn take_origin(&mut self, event: &Event) -> Option<SceneKey> {
        if event.is_note_end() {
            self.notes
                .remove(&(event.port, event.channel, event.note()))
        } else if event.sustain_state() == Some(false) {
            self.pedals.remove(&(event.port, event.channel))
        } else {
            None
        }
    }

    /// Records `scene` as the origin if `event` starts a note or presses a
    /// pedal.
    pub(crate) fn remember(&mut self, event: &Event, scene: SceneKey) {
        if event.is_note_start() {
            self.notes
                .insert((event.port, event.channel, event.note()), scene);
        } else if event.sustain_state() == Some(true) {
            self.pedals.insert((event.port, event.channel), scene);
        }
    }

    pub(crate) fn held_note_count(&self) -> usize {
        self.notes.len()
    }

    pub(crate) fn pressed_pedal_count(&self) -> usize {
        self.pedals.len()
    }
}
