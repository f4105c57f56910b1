// Copyright (c) 2024 Mike Tsao

use common::{init_logging, make_event, run_scenes, test_config, test_rng};
use midiroute::prelude::*;

mod common;

fn channel(c: i32) -> Node {
    Node::from(Filter::Channel(vec![c]))
}

#[test]
fn single_scene_routes_everything_without_triggers() {
    let mut rng = test_rng();
    let mut scene = channel(1);
    let events: Vec<Event> = (0..300)
        .map(|_| make_event(&mut rng))
        .filter(|e| e.event_type != EventType::ProgramChange)
        .collect();
    let outputs = run_scenes([(SceneKey(0), channel(1))], &events);
    for (e, out) in events.iter().zip(outputs) {
        assert_eq!(out, scene.eval(e));
    }
}

#[test]
fn program_change_to_missing_scene_drops_what_follows() {
    let outputs = run_scenes(
        [(SceneKey(0), Node::Pass), (SceneKey(1), Node::Pass)],
        &[
            Event::note_on(0, 0, 60, 100),
            Event::program(0, 0, 50),
            Event::note_on(0, 0, 62, 100),
            Event::ctrl(0, 0, 7, 100),
            Event::note_off(0, 0, 62),
        ],
    );
    assert_eq!(outputs[0], vec![Event::note_on(0, 0, 60, 100)]);
    assert_eq!(
        outputs[1],
        vec![Event::program(0, 0, 50)],
        "the trigger still goes through the old scene"
    );
    assert!(outputs[2..].iter().all(|o| o.is_empty()));
}

#[test]
fn missing_scene_recovers_on_next_valid_trigger() {
    let outputs = run_scenes(
        [(SceneKey(3), Node::from(Modifier::Transpose(1)))],
        &[
            Event::program(0, 0, 4),
            Event::note_on(0, 0, 60, 100),
            Event::program(0, 0, 3),
            Event::note_on(0, 0, 60, 100),
        ],
    );
    assert!(outputs[1].is_empty());
    assert!(outputs[2].is_empty(), "no scene was active when it arrived");
    assert_eq!(outputs[3], vec![Event::note_on(0, 0, 61, 100)]);
}

#[test]
fn scenes_switch_with_offset() {
    init_logging();
    let mut engine = Engine::new_with_patches(
        EngineConfig {
            data_offset: 1,
            ..test_config()
        },
        [
            (SceneKey(1), channel(0)),
            (SceneKey(2), channel(1)),
            (SceneKey(3), parallel([channel(0), channel(1)])),
        ],
    )
    .unwrap();
    let a = Event::note_on(0, 0, 60, 100);
    let b = Event::note_on(0, 1, 60, 100);
    assert_eq!(engine.active_scene(), Some(SceneKey(1)));
    assert_eq!((engine.process(a), engine.process(b)), (vec![a], vec![]));

    let _ = engine.process(Event::program(0, 0, 1));
    assert_eq!(engine.active_scene(), Some(SceneKey(2)));
    assert_eq!((engine.process(a), engine.process(b)), (vec![], vec![b]));

    let _ = engine.process(Event::program(0, 15, 2));
    assert_eq!(engine.active_scene(), Some(SceneKey(3)));
    assert_eq!((engine.process(a), engine.process(b)), (vec![a], vec![b]));
}

#[test]
fn held_notes_end_in_the_scene_that_started_them() {
    let outputs = run_scenes(
        [
            (SceneKey(0), Node::from(Modifier::Port(1))),
            (SceneKey(1), Node::from(Modifier::Port(2))),
        ],
        &[
            Event::note_on(0, 0, 60, 100),
            Event::ctrl(0, 0, 64, 127),
            Event::program(0, 0, 1),
            Event::note_on(0, 0, 64, 100),
            Event::note_off(0, 0, 60),
            Event::note_on(0, 0, 64, 0),
            Event::ctrl(0, 0, 64, 0),
        ],
    );
    let ports: Vec<u32> = outputs.iter().map(|o| o[0].port).collect();
    assert_eq!(ports, vec![1, 1, 1, 2, 1, 2, 1]);
}

#[test]
fn hooks_apply_in_every_scene() {
    init_logging();
    let hooks = HooksBuilder::default()
        .pre(invert(Node::from(Filter::Type(EventTypes::SYSTEM))).unwrap())
        .post(Node::from(Modifier::Velocity(VelocityChange::Fixed(100))))
        .control(chain([
            Node::from(Filter::Type(EventType::ProgramChange.into())),
            Node::from(Modifier::Port(9)),
        ]))
        .build()
        .unwrap();
    let mut engine = Engine::new_with(
        test_config(),
        [
            Scene::new_with(SceneKey(0), Node::Pass),
            SceneBuilder::default()
                .key(SceneKey(1))
                .name("octaves")
                .patch(parallel([
                    Node::Pass,
                    Node::from(Modifier::Transpose(12)),
                ]))
                .build()
                .unwrap(),
        ],
        hooks,
    )
    .unwrap();
    assert_eq!(engine.scene(SceneKey(1)).and_then(|s| s.name()), Some("octaves"));

    assert_eq!(
        engine.process(Event::note_on(0, 0, 60, 20)),
        vec![Event::note_on(0, 0, 60, 100)]
    );
    assert!(engine.process(Event::system(EventType::Clock, 0)).is_empty());
    assert_eq!(
        engine.process(Event::program(0, 0, 1)),
        vec![Event::program(0, 0, 1), Event::program(9, 0, 1)]
    );
    assert_eq!(
        engine.process(Event::note_on(0, 0, 60, 20)),
        vec![Event::note_on(0, 0, 60, 100), Event::note_on(0, 0, 72, 100)]
    );
}

#[test]
fn pass_through_policy_still_runs_hooks() {
    let hooks = HooksBuilder::default()
        .post(Node::from(Modifier::Channel(4)))
        .build()
        .unwrap();
    let mut engine = Engine::new_with(
        EngineConfig {
            unknown_scene: UnknownScenePolicy::PassThrough,
            ..test_config()
        },
        [Scene::new_with(SceneKey(0), Node::Discard)],
        hooks,
    )
    .unwrap();
    assert!(engine.process(Event::note_on(0, 0, 60, 100)).is_empty());
    engine.switch_scene(SceneKey(8));
    assert_eq!(
        engine.process(Event::note_on(0, 0, 60, 100)),
        vec![Event::note_on(0, 4, 60, 100)]
    );
}

#[test]
fn random_choice_is_reproducible_per_seed() {
    let patch = || {
        Node::from(RandomChoice::new_with(
            (0..4).map(|c| Node::from(Modifier::Channel(c))).collect(),
            42,
        ))
    };
    let events = vec![Event::note_on(0, 0, 60, 100); 32];
    let first = run_scenes([(SceneKey(0), patch())], &events);
    let second = run_scenes([(SceneKey(0), patch())], &events);
    assert_eq!(first, second);
    assert!(first.iter().all(|o| o.len() == 1 && (0..4).contains(&o[0].channel)));
}

#[test]
fn round_robin_cycles_through_children() {
    let patch = Node::from(RoundRobin::new_with(vec![
        Node::from(Modifier::Channel(0)),
        Node::from(Modifier::Channel(1)),
        Node::from(Modifier::Channel(2)),
    ]));
    let events: Vec<Event> = (60..66).map(|n| Event::note_on(0, 9, n, 100)).collect();
    let channels: Vec<i32> = run_scenes([(SceneKey(0), patch)], &events)
        .iter()
        .map(|o| o[0].channel)
        .collect();
    assert_eq!(channels, vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn each_engine_is_independent() {
    let config = test_config();
    let mut a = Engine::new_with_patches(
        config.clone(),
        [(SceneKey(0), Node::Pass), (SceneKey(1), Node::Discard)],
    )
    .unwrap();
    let mut b = Engine::new_with_patches(
        config,
        [(SceneKey(0), Node::Pass), (SceneKey(1), Node::Discard)],
    )
    .unwrap();
    let _ = a.process(Event::program(0, 0, 1));
    assert_eq!(a.active_scene(), Some(SceneKey(1)));
    assert_eq!(b.active_scene(), Some(SceneKey(0)));
    let e = Event::ctrl(0, 0, 1, 1);
    assert_eq!(b.process(e), vec![e]);
}

#[test]
fn invalid_parameters_are_caught_at_construction() {
    let result = Engine::new_with_patches(
        test_config(),
        [(SceneKey(0), Node::from(Filter::Key(0..=200)))],
    );
    match result {
        Err(PatchError::Range(e)) => assert_eq!(e.value, 200),
        other => panic!("expected a range error, got {other:?}"),
    }
}

#[test]
fn config_survives_serialization() {
    let config = EngineConfig {
        data_offset: 0,
        initial_scene: Some(SceneKey(4)),
        unknown_scene: UnknownScenePolicy::PassThrough,
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let restored: EngineConfig = serde_json::from_str(&json).unwrap();
    let mut engine = Engine::new_with_patches(
        restored,
        [(SceneKey(0), Node::Discard), (SceneKey(4), Node::Pass)],
    )
    .unwrap();
    assert_eq!(engine.active_scene(), Some(SceneKey(4)));
    let e = Event::note_on(0, 0, 1, 1);
    assert_eq!(engine.process(e), vec![e]);
}
