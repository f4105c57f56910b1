// Copyright (c) 2024 Mike Tsao

//! Scenes and the engine that switches between them.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Engine, Hooks, HooksBuilder, Scene, SceneBuilder, SceneKey};
}

pub use {
    engine::{Engine, Hooks, HooksBuilder},
    scene::{Scene, SceneBuilder, SceneKey},
};

mod engine;
mod held_notes;
mod scene;
