// Copyright (c) 2024 Mike Tsao

//! Data types shared among services.

use crossbeam::channel::{Receiver, Sender};

/// Both halves of a crossbeam channel, kept together.
#[derive(Debug)]
pub struct CrossbeamChannel<T> {
    #[allow(missing_docs)]
    pub sender: Sender<T>,
    #[allow(missing_docs)]
    pub receiver: Receiver<T>,
}
impl<T> Default for CrossbeamChannel<T> {
    fn default() -> Self {
        let (sender, receiver) = crossbeam::channel::unbounded();
        Self { sender, receiver }
    }
}
impl<T> CrossbeamChannel<T> {
    /// A channel that holds at most `capacity` messages before senders block.
    pub fn new_bounded(capacity: usize) -> Self {
        let (sender, receiver) = crossbeam::channel::bounded(capacity);
        Self { sender, receiver }
    }
}
