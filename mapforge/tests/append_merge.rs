use std::fs;
use std::path::{Path, PathBuf};

use mapforge::{Action, Condition, ForgeError, IniDocument, Registry};
use mapforge_data::{House, RepeatType};

const MAP: &str = include_str!("fixtures/hand_made_map.ini");

fn seeded_map(dir: &Path) -> PathBuf {
    let path = dir.join("test.map");
    fs::write(&path, MAP).expect("seed map");
    path
}

fn raid(tag: Option<&str>) -> Registry {
    let russians = House::new("Russians", 1);
    let mut registry = Registry::new();
    let team = registry
        .create_team()
        .name("Raiders")
        .with_options(|o| o.tag = tag.map(str::to_string))
        .with_task_force_new(|tf| tf.add("HTNK", 3))
        .with_script_new(|s| s.move_to_waypoint(2).guard_for(30))
        .id();
    let _ = registry
        .create_trigger()
        .name("Raid")
        .owner(&russians)
        .repeat(RepeatType::RepeatingOr)
        .on(Condition::elapsed_time(120))
        .act(Action::reinforcements(&team));
    registry
}

#[test]
fn unrelated_sections_survive_byte_for_byte() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = seeded_map(dir.path());
    raid(None).append(&map).expect("append ok");
    let text = fs::read_to_string(&map).expect("read back");

    assert!(text.starts_with(
        "; hand authored test map\n[Basic]\nName=Test Map\nPlayer=Americans ; local player\n\n"
    ));
    assert!(text.contains("[Waypoints]\n0=12345\n2=23456\n"));
    assert!(text.contains(
        "[Triggers]\n01000001=Americans,<none>,Existing,0,1,1,1,0\n03A00001=Russians,<none>,Raid,0,1,1,1,0\n\n"
    ));
}

#[test]
fn appended_records_use_tag_keys_and_free_list_slots() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = seeded_map(dir.path());
    raid(None).append(&map).expect("append ok");
    let doc = IniDocument::read(&map).expect("parse back");

    assert_eq!(doc.get("Tags", "03B00001"), Some("2,Raid,03A00001"));
    assert_eq!(doc.get("TeamTypes", "0"), Some("01000100"));
    assert_eq!(doc.get("TeamTypes", "1"), Some("03C00001"));
    assert_eq!(doc.get("TaskForces", "0"), Some("03D00001"));
    assert_eq!(doc.get("Actions", "03A00001"), Some("1,7,1,03C00001,0,0,0,0,A"));
    assert_eq!(doc.get("03C00001", "Script"), Some("03E00001"));
}

#[test]
fn re_append_leaves_no_stale_keys() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = seeded_map(dir.path());
    raid(Some("03B00009")).append(&map).expect("first append");
    let first = IniDocument::read(&map).expect("parse back");
    assert_eq!(first.get("03C00001", "Tag"), Some("03B00009"));

    raid(None).append(&map).expect("second append");
    let second = IniDocument::read(&map).expect("parse back");
    assert_eq!(second.get("03C00001", "Tag"), None);
    assert_eq!(second.get("03C00001", "Name"), Some("Raiders"));
    let team_ids: Vec<_> = second
        .section("TeamTypes")
        .map(|s| s.values().collect())
        .unwrap_or_default();
    assert_eq!(team_ids, vec!["01000100", "03C00001"]);
}

#[test]
fn appending_twice_is_stable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = seeded_map(dir.path());
    raid(None).append(&map).expect("first append");
    let once = fs::read_to_string(&map).expect("read");
    raid(None).append(&map).expect("second append");
    let twice = fs::read_to_string(&map).expect("read");
    assert_eq!(once, twice);
}

#[test]
fn missing_target_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.map");
    match raid(None).append(&missing) {
        Err(ForgeError::FileNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    assert!(!missing.exists());
}

#[test]
fn failed_append_leaves_the_map_untouched() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = seeded_map(dir.path());
    let mut registry = raid(None);
    let mut builder = registry.create_trigger();
    for _ in 0..30 {
        builder = builder.act(Action::play_speech("EVA_ReinforcementsHaveArrived"));
    }
    drop(builder);

    assert!(matches!(
        registry.append(&map),
        Err(ForgeError::RecordTooLong { .. })
    ));
    assert_eq!(fs::read_to_string(&map).expect("read"), MAP);
}

#[test]
fn crlf_maps_keep_their_line_endings() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = dir.path().join("crlf.map");
    fs::write(&map, MAP.replace('\n', "\r\n")).expect("seed");
    raid(None).append(&map).expect("append ok");
    let text = fs::read_to_string(&map).expect("read back");
    assert!(text.contains("[Basic]\r\nName=Test Map\r\n"));
    assert!(!text.replace("\r\n", "").contains('\n'));
}

#[test]
fn legacy_encoded_names_are_not_rewritten() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = dir.path().join("gbk.map");
    let before: &[u8] = b"[Basic]\nName=\xD3\xC8\xC0\xEF\nPlayer=Americans\n\n";
    fs::write(&map, before).expect("seed");
    raid(None).append(&map).expect("append ok");
    let after = fs::read(&map).expect("read back");
    assert!(after.starts_with(before));
}

#[test]
fn split_sections_keep_their_layout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let map = dir.path().join("split.map");
    let before = "[Map]\nSize=1\n\n[Basic]\nName=M\n\n[Map]\nTheater=SNOW\n";
    fs::write(&map, before).expect("seed");
    raid(None).append(&map).expect("append ok");
    let after = fs::read_to_string(&map).expect("read back");
    assert!(after.starts_with(&format!("{before}\n[Tags]\n")));
}
