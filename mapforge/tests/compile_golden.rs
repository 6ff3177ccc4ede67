use std::fs;

use mapforge::{Action, Condition, ForgeError, Registry};
use mapforge_data::{AttackTarget, House};

fn house_x() -> House {
    House::new("X", 3)
}

fn win_and_team() -> Registry {
    let mut registry = Registry::new();
    let _ = registry
        .create_trigger()
        .name("Win")
        .owner(house_x())
        .on(Condition::elapsed_time(3))
        .act(Action::declare_winner(&house_x()));
    let _ = registry
        .create_team()
        .name("Strike")
        .house(house_x().name())
        .with_options(|o| o.waypoint = Some(2))
        .with_task_force_new(|tf| tf.name("Tanks").add("HTNK", 5))
        .with_script_new(|s| s.name("Attack").move_to_waypoint(2).attack_nearest(AttackTarget::Anything));
    registry
}

#[test]
fn compile_golden() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("Output").join("map.ini");
    win_and_team().compile(&out).expect("compile ok");
    let actual = fs::read_to_string(&out).expect("output written");
    let expected = include_str!("fixtures/compile_win_and_team.ini");
    assert_eq!(actual.trim(), expected.trim());
}

#[test]
fn end_to_end_scenario_values() {
    let doc = win_and_team().render_document().expect("render");
    assert_eq!(doc.get("Triggers", "03A00001"), Some("X,<none>,Win,0,1,1,1,0"));
    assert_eq!(doc.get("Events", "03A00001"), Some("1,13,0,3"));
    assert_eq!(doc.get("Actions", "03A00001"), Some("1,1,0,3,0,0,0,0,A"));
}

#[test]
fn compile_overwrites_previous_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("map.ini");
    fs::write(&out, "[Stale]\nkey=value\n").expect("seed file");
    win_and_team().compile(&out).expect("compile ok");
    let text = fs::read_to_string(&out).expect("read back");
    assert!(!text.contains("[Stale]"));
    assert!(text.starts_with("[Tags]"));
}

#[test]
fn over_long_record_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("map.ini");
    let mut registry = win_and_team();
    let mut builder = registry.create_trigger().name("Chatty");
    for i in 0..40 {
        builder = builder.act(Action::text(format!("MSG:LongStringTableEntry{i:03}")));
    }
    drop(builder);

    match registry.compile(&out) {
        Err(ForgeError::RecordTooLong { section, key, len, limit }) => {
            assert_eq!(section, "Actions");
            assert_eq!(key, "03A00002");
            assert!(len >= limit);
        },
        other => panic!("expected RecordTooLong, got {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn team_without_script_fails_the_build() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("map.ini");
    let mut registry = win_and_team();
    let _ = registry.create_team().with_task_force_new(|tf| tf.add("E1", 1));
    assert!(matches!(
        registry.compile(&out),
        Err(ForgeError::MissingReference { missing: "script", .. })
    ));
    assert!(!out.exists());
}
