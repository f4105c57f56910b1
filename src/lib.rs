// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs, unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! Midiroute routes MIDI events through patches.
//!
//! A patch is a tree of [Node]s built with a small algebra of combinators
//! ([chain()](patch::chain()), [parallel()](patch::parallel()),
//! [invert()](patch::invert()), [exclude()](patch::exclude())). An [Engine]
//! holds a set of keyed [Scene]s, each with its own patch, and sends every
//! incoming [Event] through the active one. Program-change events switch
//! scenes.
//!
//! ```
//! use midiroute::prelude::*;
//!
//! let mut engine = Engine::new_with_patches(
//!     EngineConfig::default(),
//!     [(SceneKey(1), chain([
//!         Node::from(Filter::Channel(vec![0])),
//!         Node::from(Modifier::Transpose(12)),
//!     ]))],
//! )
//! .unwrap();
//! assert_eq!(
//!     engine.process(Event::note_on(0, 0, 60, 100)),
//!     vec![Event::note_on(0, 0, 72, 100)]
//! );
//! assert!(engine.process(Event::note_on(0, 1, 60, 100)).is_empty());
//! ```
//!
//! Transports live in the `midiroute-services` crate.

/// A collection of imports that are useful to users of this crate. `use
/// midiroute::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        error::{PatchError, RangeError},
        orchestration::prelude::*,
        patch::prelude::*,
        types::prelude::*,
        util::prelude::*,
    };
}

// Fundamental structures that are important enough to re-export at top level.
pub use {
    error::{PatchError, RangeError},
    orchestration::{Engine, Scene, SceneKey},
    patch::Node,
    types::Event,
    version::app_version,
};

pub mod error;
pub mod orchestration;
pub mod patch;
pub mod types;
pub mod util;

mod version;
