// Copyright (c) 2024 Mike Tsao

//! Configuration for an [Engine](crate::orchestration::Engine). Intended to be
//! serialized, and always passed in explicitly; nothing here is global.

use crate::orchestration::SceneKey;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// How many output events a single call to
/// [Engine::process()](crate::orchestration::Engine::process()) may produce
/// before the rest are dropped.
pub const MAX_EVENTS: usize = 1024;
/// Initial capacity for remembering held notes across scene switches. Storage
/// grows past this if needed.
pub const MAX_SIMULTANEOUS_NOTES: usize = 64;
/// Initial capacity for remembering pressed sustain pedals across scene
/// switches.
pub const MAX_SUSTAIN_PEDALS: usize = 4;

/// Identifies the kind of transport feeding the engine. Dispatch doesn't care;
/// it's a capability tag for whoever wires the engine up.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumIter,
    Eq,
    IntoStaticStr,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// In-memory transport, used in tests and for offline processing.
    #[default]
    Dummy,
    /// ALSA sequencer.
    Alsa,
    /// JACK MIDI.
    Jack,
}

/// What to do with an event when no scene is active.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownScenePolicy {
    /// Emit nothing.
    #[default]
    Drop,
    /// Treat the missing scene patch as the identity.
    PassThrough,
}

/// Contains the engine settings.
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineConfig {
    /// Enables field-range checks on events and unit parameters.
    #[derivative(Default(value = "true"))]
    pub validate: bool,

    /// Added to a program-change value to produce the selected scene key.
    #[derivative(Default(value = "1"))]
    pub data_offset: i32,

    /// Which transport this engine is attached to.
    pub transport_kind: TransportKind,

    /// The scene that's active before any switch happens. `None` means the
    /// lowest configured key.
    pub initial_scene: Option<SceneKey>,

    /// Handles events that arrive while no scene is active.
    pub unknown_scene: UnknownScenePolicy,

    /// Whether program-change events select scenes.
    #[derivative(Default(value = "true"))]
    pub program_changes_switch_scenes: bool,

    /// Routes each note-off (and sustain release) through the scene that
    /// handled the matching note-on (or sustain press), even if the active
    /// scene has changed since.
    #[derivative(Default(value = "true"))]
    pub remember_notes: bool,

    /// Upper bound on output events per processed event.
    #[derivative(Default(value = "MAX_EVENTS"))]
    pub max_events: usize,
}
impl EngineConfig {
    /// The scene key that a program-change with the given program number
    /// selects.
    pub fn scene_key_for_program(&self, program: i32) -> SceneKey {
        SceneKey(program.saturating_add(self.data_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_defaults() {
        let c = EngineConfig::default();
        assert!(c.validate);
        assert_eq!(c.data_offset, 1);
        assert_eq!(c.transport_kind, TransportKind::Dummy);
        assert_eq!(c.initial_scene, None);
        assert_eq!(c.unknown_scene, UnknownScenePolicy::Drop);
        assert!(c.program_changes_switch_scenes);
        assert!(c.remember_notes);
        assert_eq!(c.max_events, MAX_EVENTS);
    }

    #[test]
    fn engine_config_serializes_kebab_case() {
        let c = EngineConfig {
            data_offset: 0,
            transport_kind: TransportKind::Jack,
            ..Default::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"data-offset\":0"));
        assert!(json.contains("\"transport-kind\":\"jack\""));
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn engine_config_fills_missing_fields_with_defaults() {
        let c: EngineConfig = serde_json::from_str(r#"{"validate": false}"#).unwrap();
        assert!(!c.validate);
        assert_eq!(c.data_offset, 1);
        assert_eq!(c.max_events, MAX_EVENTS);
    }

    #[test]
    fn scene_key_for_program_applies_offset() {
        let c = EngineConfig::default();
        assert_eq!(c.scene_key_for_program(0), SceneKey(1));
        let c = EngineConfig {
            data_offset: 0,
            ..Default::default()
        };
        assert_eq!(c.scene_key_for_program(5), SceneKey(5));
    }
}
