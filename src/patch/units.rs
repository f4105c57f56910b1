// Copyright (c) 2024 Mike Tsao

//! Units with side effects. They keep internal state, or run caller code, so
//! the combinator algebra treats them as impure.

use super::Node;
use crate::{types::Event, util::Rng};
use std::sync::Arc;

/// The signature of a [Process] function.
pub type ProcessFn = dyn Fn(&Event) -> Vec<Event> + Send + Sync;

/// Sends each event to the next child in turn, cycling.
#[derive(Clone, Debug)]
pub struct RoundRobin {
    children: Vec<Node>,
    next: usize,
}
impl RoundRobin {
    #[allow(missing_docs)]
    pub fn new_with(children: Vec<Node>) -> Self {
        Self { children, next: 0 }
    }

    #[allow(missing_docs)]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn eval_into(&mut self, event: &Event, out: &mut Vec<Event>) {
        if self.children.is_empty() {
            return;
        }
        let index = self.next % self.children.len();
        self.next = (index + 1) % self.children.len();
        self.children[index].eval_into(event, out);
    }
}
// The position counter is runtime state, not part of the unit's identity.
impl PartialEq for RoundRobin {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

/// Sends each event to one child picked at random.
#[derive(Clone, Debug)]
pub struct RandomChoice {
    children: Vec<Node>,
    rng: Rng,
}
impl RandomChoice {
    /// Pass the same seed to get the same sequence of choices.
    pub fn new_with(children: Vec<Node>, seed: u128) -> Self {
        Self {
            children,
            rng: Rng::new_with_seed(seed),
        }
    }

    #[allow(missing_docs)]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn eval_into(&mut self, event: &Event, out: &mut Vec<Event>) {
        if self.children.is_empty() {
            return;
        }
        let index = self.rng.rand_index(self.children.len());
        self.children[index].eval_into(event, out);
    }
}
impl PartialEq for RandomChoice {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

/// Runs a caller-supplied function on each event. The function may return any
/// number of events, and may have side effects of its own.
#[derive(Clone)]
pub struct Process {
    name: String,
    f: Arc<ProcessFn>,
}
impl Process {
    /// `name` shows up in debug output and error messages.
    pub fn new_with<F>(name: &str, f: F) -> Self
    where
        F: Fn(&Event) -> Vec<Event> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            f: Arc::new(f),
        }
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn eval_into(&self, event: &Event, out: &mut Vec<Event>) {
        out.extend((self.f)(event));
    }
}
impl core::fmt::Debug for Process {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Process").field("name", &self.name).finish()
    }
}
// Two closures can't be compared, so a Process is equal only to its clones.
impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}
