// Copyright (c) 2024 Mike Tsao

//! The node algebra that patches are built from.
//!
//! A patch is a tree of [Node]s. Leaves are [Filter]s (pass or block),
//! [Modifier]s (change one event into another), and impure units
//! ([RoundRobin], [RandomChoice], [Process]). Interior nodes come from the
//! combinators:
//!
//! * [chain()] -- sequential composition, identity [Node::Pass].
//! * [parallel()] -- fan one event out to several children.
//! * [invert()] -- boolean negation, for pure pass/block nodes only.
//! * [exclude()] -- block whenever the child produces anything, pass the
//!   original otherwise. Safe for every node.
//!
//! For a pure filter `f`, `invert(f)` and `exclude(f)` behave identically. They
//! part ways for nodes that change, multiply, or remember events, which is why
//! [invert()] refuses those at construction time.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        chain, exclude, invert, parallel, Filter, Modifier, Node, Process, RandomChoice,
        RoundRobin, VelocityChange,
    };
}

pub use {
    filters::Filter,
    modifiers::{Modifier, VelocityChange},
    node::{chain, exclude, invert, parallel, Node},
    units::{Process, ProcessFn, RandomChoice, RoundRobin},
};

mod filters;
mod modifiers;
mod node;
mod units;
