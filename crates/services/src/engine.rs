// Copyright (c) 2024 Mike Tsao

use crate::{CrossbeamChannel, ProvidesService};
use crossbeam::channel::{Receiver, Sender};
use midiroute::prelude::*;

#[allow(missing_docs)]
#[derive(Debug)]
pub enum EngineServiceInput {
    /// An incoming event to route.
    Event(Event),
    /// Makes the given scene active, as a program change would.
    SwitchScene(SceneKey),
    /// Ends the service. The engine is dropped with the thread.
    Quit,
}

#[allow(missing_docs)]
#[derive(Debug, PartialEq)]
pub enum EngineServiceEvent {
    /// Everything one input event produced, in order. Sent even when empty, so
    /// that every [EngineServiceInput::Event] gets exactly one reply.
    Output(Vec<Event>),
    /// The active scene changed, either by request or because an event
    /// triggered a switch.
    SceneChanged(Option<SceneKey>),
    Quit,
}

/// Owns an [Engine] on a dedicated thread. Any number of producers can clone
/// [ProvidesService::sender()] and send events; the daemon processes them one
/// at a time in the order they arrive.
#[derive(Debug)]
pub struct EngineService {
    inputs: CrossbeamChannel<EngineServiceInput>,
    events: CrossbeamChannel<EngineServiceEvent>,
}
impl ProvidesService<EngineServiceInput, EngineServiceEvent> for EngineService {
    fn sender(&self) -> &Sender<EngineServiceInput> {
        &self.inputs.sender
    }

    fn receiver(&self) -> &Receiver<EngineServiceEvent> {
        &self.events.receiver
    }
}
impl EngineService {
    #[allow(missing_docs)]
    pub fn new_with(engine: Engine) -> Self {
        let r = Self {
            inputs: Default::default(),
            events: Default::default(),
        };
        r.spawn_thread(engine);
        r
    }

    fn spawn_thread(&self, engine: Engine) {
        let receiver = self.inputs.receiver.clone();
        let sender = self.events.sender.clone();
        std::thread::spawn(move || {
            let mut daemon = EngineServiceDaemon {
                receiver,
                sender,
                engine,
            };
            daemon.execute();
        });
    }
}

struct EngineServiceDaemon {
    receiver: Receiver<EngineServiceInput>,
    sender: Sender<EngineServiceEvent>,
    engine: Engine,
}
impl EngineServiceDaemon {
    fn execute(&mut self) {
        log::debug!(
            "engine service started with active scene {:?}",
            self.engine.active_scene()
        );
        while let Ok(input) = self.receiver.recv() {
            match input {
                EngineServiceInput::Event(event) => {
                    let before = self.engine.active_scene();
                    let output = self.engine.process(event);
                    let _ = self.sender.send(EngineServiceEvent::Output(output));
                    self.notify_if_changed(before);
                }
                EngineServiceInput::SwitchScene(key) => {
                    let before = self.engine.active_scene();
                    self.engine.switch_scene(key);
                    self.notify_if_changed(before);
                }
                EngineServiceInput::Quit => {
                    log::debug!("engine service quitting");
                    let _ = self.sender.send(EngineServiceEvent::Quit);
                    break;
                }
            }
        }
    }

    fn notify_if_changed(&self, before: Option<SceneKey>) {
        let after = self.engine.active_scene();
        if after != before {
            let _ = self.sender.send(EngineServiceEvent::SceneChanged(after));
        }
    }
}
