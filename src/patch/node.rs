// Copyright (c) 2024 Mike Tsao

use super::{
    filters::Filter,
    modifiers::Modifier,
    units::{Process, RandomChoice, RoundRobin},
};
use crate::{
    error::{PatchError, RangeError},
    types::Event,
};

/// One unit of a patch, or a combination of units.
///
/// A [Node] turns one input event into an ordered sequence of zero or more
/// output events. Build trees with [chain()], [parallel()], [invert()], and
/// [exclude()] rather than by assembling the variants by hand; the builders
/// normalize the tree and enforce the rules about what may be inverted.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Emits the input unchanged. The identity of [chain()].
    Pass,
    /// Emits nothing.
    Discard,
    /// Emits the input if the filter matches.
    Filter(Filter),
    /// Emits exactly one (possibly changed) event.
    Modifier(Modifier),
    /// Feeds every output of each node into the next.
    Chain(Vec<Node>),
    /// Runs every child on the same input and concatenates the outputs in
    /// child order.
    Parallel(Vec<Node>),
    /// Boolean negation of a pure, boolean-acting node.
    Invert(Box<Node>),
    /// Emits the input if and only if the child emits nothing.
    Exclude(Box<Node>),
    /// Stateful: one child per event, in turn.
    RoundRobin(RoundRobin),
    /// Stateful: one child per event, at random.
    RandomChoice(RandomChoice),
    /// Caller-supplied function.
    Process(Process),
}
impl Default for Node {
    fn default() -> Self {
        Self::Pass
    }
}
impl From<Filter> for Node {
    fn from(value: Filter) -> Self {
        Self::Filter(value)
    }
}
impl From<Modifier> for Node {
    fn from(value: Modifier) -> Self {
        Self::Modifier(value)
    }
}
impl From<RoundRobin> for Node {
    fn from(value: RoundRobin) -> Self {
        Self::RoundRobin(value)
    }
}
impl From<RandomChoice> for Node {
    fn from(value: RandomChoice) -> Self {
        Self::RandomChoice(value)
    }
}
impl From<Process> for Node {
    fn from(value: Process) -> Self {
        Self::Process(value)
    }
}
impl Node {
    /// The identity node.
    pub const fn identity() -> Self {
        Self::Pass
    }

    /// Evaluates the node on one event and returns the outputs in order.
    ///
    /// Evaluation takes `&mut self` because impure units keep state between
    /// events. It never fails.
    pub fn eval(&mut self, event: &Event) -> Vec<Event> {
        let mut out = Vec::default();
        self.eval_into(event, &mut out);
        out
    }

    pub(crate) fn eval_into(&mut self, event: &Event, out: &mut Vec<Event>) {
        match self {
            Node::Pass => out.push(*event),
            Node::Discard => {}
            Node::Filter(filter) => {
                if filter.matches(event) {
                    out.push(*event);
                }
            }
            Node::Modifier(modifier) => out.push(modifier.apply(event)),
            Node::Chain(nodes) => {
                let mut current = vec![*event];
                let mut next = Vec::default();
                for node in nodes.iter_mut() {
                    for e in current.iter() {
                        node.eval_into(e, &mut next);
                    }
                    core::mem::swap(&mut current, &mut next);
                    next.clear();
                    if current.is_empty() {
                        break;
                    }
                }
                out.append(&mut current);
            }
            Node::Parallel(children) => {
                for child in children.iter_mut() {
                    child.eval_into(event, out);
                }
            }
            Node::Invert(inner) => {
                if !inner.test(event) {
                    out.push(*event);
                }
            }
            Node::Exclude(inner) => {
                let mut scratch = Vec::default();
                inner.eval_into(event, &mut scratch);
                if scratch.is_empty() {
                    out.push(*event);
                }
            }
            Node::RoundRobin(rr) => rr.eval_into(event, out),
            Node::RandomChoice(rc) => rc.eval_into(event, out),
            Node::Process(p) => p.eval_into(event, out),
        }
    }

    // Boolean reading of a node. Only meaningful when is_boolean() holds,
    // which invert() guarantees for everything it wraps.
    fn test(&mut self, event: &Event) -> bool {
        match self {
            Node::Pass => true,
            Node::Discard => false,
            Node::Filter(filter) => filter.matches(event),
            Node::Chain(nodes) => nodes.iter_mut().all(|n| n.test(event)),
            Node::Parallel(children) => children.iter_mut().any(|n| n.test(event)),
            Node::Invert(inner) => !inner.test(event),
            _ => !self.eval(event).is_empty(),
        }
    }

    /// True if evaluating the node has no side effects and depends only on the
    /// input event.
    pub fn is_pure(&self) -> bool {
        match self {
            Node::Pass | Node::Discard | Node::Filter(_) | Node::Modifier(_) => true,
            Node::Chain(nodes) | Node::Parallel(nodes) => nodes.iter().all(|n| n.is_pure()),
            Node::Invert(inner) | Node::Exclude(inner) => inner.is_pure(),
            Node::RoundRobin(_) | Node::RandomChoice(_) | Node::Process(_) => false,
        }
    }

    /// True if the node always emits either the unchanged input or nothing,
    /// so that its output can be read as a yes/no answer.
    pub fn is_boolean(&self) -> bool {
        match self {
            Node::Pass | Node::Discard | Node::Filter(_) => true,
            Node::Invert(_) | Node::Exclude(_) => true,
            Node::Chain(nodes) => nodes.iter().all(|n| n.is_boolean()),
            Node::Parallel(children) => match children.as_slice() {
                [] => true,
                [only] => only.is_boolean(),
                _ => false,
            },
            Node::Modifier(_) | Node::RoundRobin(_) | Node::RandomChoice(_) | Node::Process(_) => {
                false
            }
        }
    }

    /// Checks every unit parameter in the tree against the legal field
    /// ranges.
    pub fn validate(&self) -> Result<(), RangeError> {
        match self {
            Node::Pass | Node::Discard | Node::Process(_) => Ok(()),
            Node::Filter(filter) => filter.validate(),
            Node::Modifier(modifier) => modifier.validate(),
            Node::Chain(nodes) | Node::Parallel(nodes) => {
                nodes.iter().try_for_each(|n| n.validate())
            }
            Node::Invert(inner) | Node::Exclude(inner) => inner.validate(),
            Node::RoundRobin(rr) => rr.children().iter().try_for_each(|n| n.validate()),
            Node::RandomChoice(rc) => rc.children().iter().try_for_each(|n| n.validate()),
        }
    }

    /// A short human-readable description of the node's kind.
    pub fn kind_name(&self) -> String {
        match self {
            Node::Pass => "pass".to_string(),
            Node::Discard => "discard".to_string(),
            Node::Filter(filter) => format!("{filter:?} filter"),
            Node::Modifier(modifier) => format!("{modifier:?} modifier"),
            Node::Chain(nodes) => format!("chain of {}", nodes.len()),
            Node::Parallel(nodes) => format!("parallel split of {}", nodes.len()),
            Node::Invert(_) => "inverted node".to_string(),
            Node::Exclude(_) => "exclusion".to_string(),
            Node::RoundRobin(_) => "round-robin".to_string(),
            Node::RandomChoice(_) => "random choice".to_string(),
            Node::Process(p) => format!("process '{}'", p.name()),
        }
    }

    /// Sequential composition: `self` followed by `next`.
    pub fn then(self, next: Node) -> Node {
        chain([self, next])
    }
}

/// Sequential composition. Each output of one node becomes an input of the
/// next, and the final outputs keep their order.
///
/// Nested chains are flattened and [Node::Pass] elements dropped, so
/// `chain([Node::Pass, f]) == f`.
pub fn chain<I: IntoIterator<Item = Node>>(nodes: I) -> Node {
    let mut flat = Vec::default();
    for node in nodes {
        match node {
            Node::Pass => {}
            Node::Chain(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    match flat.len() {
        0 => Node::Pass,
        1 => flat.remove(0),
        _ => Node::Chain(flat),
    }
}

/// Parallel split. Every child sees the same input; the outputs are
/// concatenated in child order.
///
/// Nested splits are flattened and [Node::Discard] children dropped.
pub fn parallel<I: IntoIterator<Item = Node>>(children: I) -> Node {
    let mut flat = Vec::default();
    for child in children {
        match child {
            Node::Discard => {}
            Node::Parallel(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    match flat.len() {
        0 => Node::Discard,
        1 => flat.remove(0),
        _ => Node::Parallel(flat),
    }
}

/// Logical inversion: passes what `node` blocks and blocks what it passes.
///
/// Only pure, boolean-acting nodes have a well-defined inverse. Anything that
/// modifies events, fans out, or has side effects is rejected with
/// [PatchError::CombinatorMisuse]; [exclude()] is the safe alternative for
/// those.
pub fn invert(node: Node) -> Result<Node, PatchError> {
    if !node.is_pure() {
        return Err(PatchError::CombinatorMisuse {
            operand: node.kind_name(),
            reason: "it has side effects",
        });
    }
    if !node.is_boolean() {
        return Err(PatchError::CombinatorMisuse {
            operand: node.kind_name(),
            reason: "it doesn't act as a pass/block filter",
        });
    }
    Ok(match node {
        Node::Pass => Node::Discard,
        Node::Discard => Node::Pass,
        Node::Invert(inner) => *inner,
        other => Node::Invert(Box::new(other)),
    })
}

/// Exclusion: runs `node`, then emits the original input if `node` produced
/// nothing, and nothing otherwise. Works for any node, because it looks only
/// at whether there was output.
pub fn exclude(node: Node) -> Node {
    match node {
        Node::Discard => Node::Pass,
        other => Node::Exclude(Box::new(other)),
    }
}
