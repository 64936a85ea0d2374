//! CLI tests for `selector replay` and `selector list`.
//!
//! Spawns the selector binary inside a fixture directory and checks its
//! stdout and exit codes.

use std::process::Command;

use selector::io::catalog_store::write_platform;
use selector::test_support::{FixtureDir, sample_platform};
use serde_json::Value;

const SESSION: &str = r#"
mode = "condition"
layout = "Level1"

[instruction]
type = "ObjectA::Collision"
parameters = ["Player", "Enemy"]

[[steps]]
action = "choose_object"
object = "Enemy"

[[steps]]
action = "choose_free_instruction"
type = "Free::DoSomething"
"#;

#[test]
fn replay_prints_one_record_per_step() {
    let fixture = FixtureDir::new().expect("fixture");
    fixture.write("session.toml", SESSION).expect("write session");

    let output = Command::new(env!("CARGO_BIN_EXE_selector"))
        .current_dir(fixture.path())
        .args(["replay", "session.toml"])
        .output()
        .expect("selector replay");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let records: Vec<Value> = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["instruction_type"], "ObjectA::Collision");
    assert_eq!(records[0]["state"]["kind"], "object");
    assert_eq!(records[0]["state"]["object_name"], "Player");

    assert_eq!(records[1]["instruction_type"], "");
    assert_eq!(records[1]["phase"], "choosing_object");
    assert_eq!(records[1]["state"]["object_name"], "Enemy");

    assert_eq!(records[2]["instruction_type"], "Free::DoSomething");
    assert_eq!(records[2]["state"]["kind"], "free");
}

#[test]
fn list_prints_object_tree() {
    let fixture = FixtureDir::new().expect("fixture");

    let output = Command::new(env!("CARGO_BIN_EXE_selector"))
        .current_dir(fixture.path())
        .args(["list", "--mode", "action", "--layout", "Level1", "--object", "Player"])
        .output()
        .expect("selector list");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout,
        "Common/\n  Position/\n    SetX [Object::SetX]\n\
         Sprite/\n  Animations/\n    SetAnimation [ObjectA::SetAnimation]\n\
         Physics/\n  ApplyForce [Physics::ApplyForce]\n"
    );
}

#[test]
fn list_splits_groups_on_configured_separator() {
    let fixture = FixtureDir::new().expect("fixture");
    fixture
        .write("selector.toml", "[tree]\ngroup_separator = \">\"\n")
        .expect("write config");
    let mut platform = sample_platform();
    platform.extensions[1].objects[0].actions[0].group = "Animations>Frames".to_string();
    write_platform(&fixture.path().join("catalog.json"), &platform).expect("write catalog");

    let output = Command::new(env!("CARGO_BIN_EXE_selector"))
        .current_dir(fixture.path())
        .args(["list", "--mode", "action", "--layout", "Level1", "--object", "Player"])
        .output()
        .expect("selector list");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout,
        "Common/\n  Position/\n    SetX [Object::SetX]\n\
         Sprite/\n  Animations/\n    Frames/\n      SetAnimation [ObjectA::SetAnimation]\n\
         Physics/\n  ApplyForce [Physics::ApplyForce]\n"
    );
}

#[test]
fn unknown_layout_exits_with_error() {
    let fixture = FixtureDir::new().expect("fixture");

    let status = Command::new(env!("CARGO_BIN_EXE_selector"))
        .current_dir(fixture.path())
        .args(["list", "--mode", "condition", "--layout", "Missing"])
        .status()
        .expect("selector list");

    assert_eq!(status.code(), Some(1));
}
