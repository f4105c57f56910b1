// Copyright (c) 2024 Mike Tsao

use super::{held_notes::HeldNotes, Scene, SceneKey};
use crate::{
    error::PatchError,
    patch::Node,
    types::{Event, EventType},
    util::{EngineConfig, UnknownScenePolicy},
};
use derive_builder::Builder;
use std::collections::BTreeMap;

/// Patches that run around the per-scene dispatch, whichever scene is active.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(default)]
pub struct Hooks {
    /// Sees every incoming event alongside the scene patch. Its output follows
    /// the scene's output.
    #[builder(setter(strip_option))]
    pub control: Option<Node>,

    /// Runs before the scene patch; the scene patch sees its output.
    #[builder(setter(strip_option))]
    pub pre: Option<Node>,

    /// Runs on everything the scene patch emits.
    #[builder(setter(strip_option))]
    pub post: Option<Node>,
}
impl Hooks {
    fn validate(&self) -> Result<(), PatchError> {
        for node in [&self.control, &self.pre, &self.post].into_iter().flatten() {
            node.validate()?;
        }
        Ok(())
    }
}

/// Dispatches each incoming event to the active scene's patch and collects
/// the result.
///
/// An [Engine] is single-threaded: one call to [Engine::process()] finishes
/// before the next starts, which `&mut self` enforces. Callers with several
/// producers should funnel them through one queue (the services crate's
/// engine service does this) or guard the engine with a mutex.
///
/// The engine is in one of two kinds of state: some scene is active, or none
/// is. It starts in [EngineConfig::initial_scene] (or the lowest key), and
/// moves only when a scene-switch trigger arrives or
/// [Engine::switch_scene()] is called. Dropping the engine ends it.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    scenes: BTreeMap<SceneKey, Scene>,
    hooks: Hooks,
    active: Option<SceneKey>,
    held_notes: HeldNotes,
}
impl Engine {
    /// Creates an engine. When [EngineConfig::validate] is set, every unit
    /// parameter in every scene and hook is range-checked first.
    pub fn new_with<I>(config: EngineConfig, scenes: I, hooks: Hooks) -> Result<Self, PatchError>
    where
        I: IntoIterator<Item = Scene>,
    {
        let mut map = BTreeMap::default();
        for scene in scenes {
            if config.validate {
                scene.patch().validate()?;
            }
            let key = scene.key();
            if map.insert(key, scene).is_some() {
                return Err(PatchError::DuplicateScene(key));
            }
        }
        if config.validate {
            hooks.validate()?;
        }

        let active = match config.initial_scene {
            Some(key) if map.contains_key(&key) => Some(key),
            Some(key) => {
                log::warn!("initial scene {key} doesn't exist; starting with no active scene");
                None
            }
            None => map.keys().next().copied(),
        };
        log::debug!(
            "engine created with {} scene(s), transport {}, active scene {:?}",
            map.len(),
            config.transport_kind,
            active
        );

        Ok(Self {
            config,
            scenes: map,
            hooks,
            active,
            held_notes: HeldNotes::default(),
        })
    }

    /// Convenience for an engine built from (key, patch) pairs with no hooks.
    pub fn new_with_patches<I>(config: EngineConfig, patches: I) -> Result<Self, PatchError>
    where
        I: IntoIterator<Item = (SceneKey, Node)>,
    {
        Self::new_with(
            config,
            patches
                .into_iter()
                .map(|(key, patch)| Scene::new_with(key, patch)),
            Hooks::default(),
        )
    }

    /// Processes one event and returns everything it produced, in order.
    ///
    /// If the event is a scene-switch trigger, the switch happens after the
    /// event itself has gone through the scene that was active when it
    /// arrived.
    pub fn process(&mut self, event: Event) -> Vec<Event> {
        if self.config.validate {
            if let Err(e) = event.validate() {
                log::warn!("dropping invalid input event {event}: {e}");
                return Vec::default();
            }
        }

        let scene_key = self.route_key(&event);
        let mut out = Vec::default();

        let inputs = match self.hooks.pre.as_mut() {
            Some(pre) => pre.eval(&event),
            None => vec![event],
        };
        for input in inputs.iter() {
            let scene_output = self.eval_scene(scene_key, input);
            match self.hooks.post.as_mut() {
                Some(post) => {
                    for e in scene_output.iter() {
                        post.eval_into(e, &mut out);
                    }
                }
                None => out.extend(scene_output),
            }
        }
        if let Some(control) = self.hooks.control.as_mut() {
            control.eval_into(&event, &mut out);
        }

        if self.config.remember_notes {
            if let Some(key) = scene_key {
                self.held_notes.remember(&event, key);
            }
        }
        if self.config.program_changes_switch_scenes && event.event_type == EventType::ProgramChange
        {
            self.switch_scene(self.config.scene_key_for_program(event.program_number()));
        }

        self.finish_output(out)
    }

    /// Makes the given scene active. If no such scene exists, the engine moves
    /// to the no-active-scene state, and events are dropped or passed through
    /// according to [EngineConfig::unknown_scene].
    pub fn switch_scene(&mut self, key: SceneKey) {
        let new_active = if self.scenes.contains_key(&key) {
            Some(key)
        } else {
            log::debug!("scene {key} doesn't exist");
            None
        };
        if new_active != self.active {
            log::info!("switching scene: {:?} -> {:?}", self.active, new_active);
            self.active = new_active;
        }
    }

    /// The active scene's key, or `None` if no scene is active.
    pub fn active_scene(&self) -> Option<SceneKey> {
        self.active
    }

    #[allow(missing_docs)]
    pub fn scene(&self, key: SceneKey) -> Option<&Scene> {
        self.scenes.get(&key)
    }

    /// The configured scene keys, in ascending order.
    pub fn scene_keys(&self) -> impl Iterator<Item = SceneKey> + '_ {
        self.scenes.keys().copied()
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[allow(missing_docs)]
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// How many notes are sounding that started in some scene and haven't
    /// been released yet.
    pub fn held_note_count(&self) -> usize {
        self.held_notes.held_note_count()
    }

    /// How many sustain pedals are down.
    pub fn pressed_pedal_count(&self) -> usize {
        self.held_notes.pressed_pedal_count()
    }

    fn route_key(&mut self, event: &Event) -> Option<SceneKey> {
        if self.config.remember_notes {
            if let Some(origin) = self.held_notes.take_origin(event) {
                return Some(origin);
            }
        }
        self.active
    }

    fn eval_scene(&mut self, key: Option<SceneKey>, event: &Event) -> Vec<Event> {
        match key.and_then(|k| self.scenes.get_mut(&k)) {
            Some(scene) => scene.patch_mut().eval(event),
            None => match self.config.unknown_scene {
                UnknownScenePolicy::Drop => Vec::default(),
                UnknownScenePolicy::PassThrough => vec![*event],
            },
        }
    }

    fn finish_output(&self, mut out: Vec<Event>) -> Vec<Event> {
        if self.config.validate {
            out.retain(|e| match e.validate() {
                Ok(_) => true,
                Err(err) => {
                    log::debug!("dropping out-of-range output {e}: {err}");
                    false
                }
            });
        }
        if out.len() > self.config.max_events {
            log::warn!(
                "patch produced {} events; keeping the first {}",
                out.len(),
                self.config.max_events
            );
            out.truncate(self.config.max_events);
        }
        out
    }
}
