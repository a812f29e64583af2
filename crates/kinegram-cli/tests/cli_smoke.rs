use std::path::PathBuf;
use std::process::{Command, Output};

fn bin() -> String {
    std::env::var("CARGO_BIN_EXE_kinegram").unwrap_or_else(|_| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/debug/kinegram")
            .to_string_lossy()
            .to_string()
    })
}

/// A fresh scratch directory so no stray kinegram.toml is picked up.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kinegram-cli-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

fn run(dir: &PathBuf, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to spawn kinegram")
}

#[test]
fn plan_stdout_is_pure_json() {
    let dir = scratch("stdout");
    let output = run(&dir, &["plan", "yellow-circle"]);
    assert!(output.status.success(), "plan failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).expect("stdout not utf-8");
    assert!(
        !stdout.contains('\u{1b}'),
        "stdout contaminated with ANSI escape codes: {stdout:?}"
    );
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).expect("stdout is not JSON");
    assert_eq!(value["scene"], "yellow-circle");
    assert!(value["shapes"].as_array().map_or(false, |s| s.len() == 2));
}

#[test]
fn plan_file_passes_check() {
    let dir = scratch("check");
    let output = run(&dir, &["plan", "cnn-explainer", "--seed", "7", "--out", "out/plan.json"]);
    assert!(output.status.success(), "plan failed: {:?}", output);
    assert!(dir.join("out/plan.json").exists());

    let output = run(&dir, &["check", "out/plan.json"]);
    assert!(output.status.success(), "check failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validate OK"), "unexpected output: {stdout}");
}

#[test]
fn check_rejects_broken_plan() {
    let dir = scratch("broken");
    std::fs::write(dir.join("plan.json"), "{\"scene\": 3}").unwrap();
    let output = run(&dir, &["check", "plan.json"]);
    assert!(!output.status.success());
}

#[test]
fn unknown_scene_fails() {
    let dir = scratch("unknown");
    let output = run(&dir, &["plan", "no-such-scene"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no-such-scene"), "unexpected stderr: {stderr}");
}

#[test]
fn list_names_every_scene() {
    let dir = scratch("list");
    let output = run(&dir, &["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "yellow-circle",
        "simple-transformer",
        "cnn-explainer",
        "attention-basics",
        "transformer-architecture",
        "transformer-intuition",
        "query-key-value",
        "attention-score",
    ] {
        assert!(stdout.contains(name), "{name} missing from list");
    }
}

#[test]
fn init_writes_config_once() {
    let dir = scratch("init");
    let output = run(&dir, &["init", "--name", "demo"]);
    assert!(output.status.success(), "init failed: {:?}", output);
    let written = std::fs::read_to_string(dir.join("kinegram.toml")).unwrap();
    assert!(written.contains("demo"));

    let again = run(&dir, &["init"]);
    assert!(!again.status.success(), "second init should refuse to overwrite");

    // The written config is picked up by later commands.
    let info = run(&dir, &["info"]);
    assert!(info.status.success(), "info failed: {:?}", info);
}

#[test]
fn inspect_prints_tree_and_active_events() {
    let dir = scratch("inspect");
    let output = run(&dir, &["inspect", "simple-transformer", "--at", "0.5"]);
    assert!(output.status.success(), "inspect failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("encoder"));
    assert!(stdout.contains("Active at 0.50s"));
    assert!(stdout.contains("write"), "title should be writing at 0.5s: {stdout}");
}

#[test]
fn inspect_rejects_non_finite_time() {
    let dir = scratch("inspect-nan");
    for at in ["nan", "inf", "-1"] {
        let output = run(&dir, &["inspect", "yellow-circle", "--at", at]);
        assert!(!output.status.success(), "--at {at} should be rejected");
    }
}
