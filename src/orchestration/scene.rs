// Copyright (c) 2024 Mike Tsao

use crate::patch::Node;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Identifies a scene. Program-change events select scenes by key, after the
/// configured data offset is applied.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneKey(pub i32);

/// A keyed patch. Exactly one scene is active at a time.
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Scene {
    /// The selector key.
    key: SceneKey,

    /// An optional human-readable name.
    #[builder(default, setter(into, strip_option))]
    name: Option<String>,

    /// The patch that processes events while this scene is active.
    #[builder(default)]
    patch: Node,
}
#[allow(missing_docs)]
impl Scene {
    pub fn new_with(key: SceneKey, patch: Node) -> Self {
        Self {
            key,
            name: None,
            patch,
        }
    }

    pub fn key(&self) -> SceneKey {
        self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn patch(&self) -> &Node {
        &self.patch
    }

    pub(crate) fn patch_mut(&mut self) -> &mut Node {
        &mut self.patch
    }
}
