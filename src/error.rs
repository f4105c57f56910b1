// Copyright (c) 2024 Mike Tsao

//! Errors raised while building events and patches. Routing itself never
//! fails; see [Engine::process()](crate::orchestration::Engine::process()).

use crate::orchestration::SceneKey;
use core::ops::RangeInclusive;
use thiserror::Error;

/// A field was outside its legal range while validation was enabled.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{field} value {value} is outside the legal range {}..={}", .range.start(), .range.end())]
pub struct RangeError {
    /// The name of the offending field, such as `channel` or `data2`.
    pub field: &'static str,
    /// The rejected value.
    pub value: i32,
    /// The range the value should have been in.
    pub range: RangeInclusive<i32>,
}
impl RangeError {
    /// Returns `Ok(())` if `value` is inside `range`, otherwise a
    /// [RangeError] naming `field`.
    pub fn check(field: &'static str, value: i32, range: RangeInclusive<i32>) -> Result<(), Self> {
        if range.contains(&value) {
            Ok(())
        } else {
            Err(Self {
                field,
                value,
                range,
            })
        }
    }
}

/// Construction-time problems with a patch or a set of scenes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    /// A unit parameter was outside its legal range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// `invert` was applied to a node without a well-defined boolean meaning.
    #[error("can't invert {operand}: {reason}; use exclude() instead")]
    CombinatorMisuse {
        /// A short description of the rejected operand.
        operand: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Two scenes claimed the same key.
    #[error("scene {0} is defined more than once")]
    DuplicateScene(SceneKey),
}
