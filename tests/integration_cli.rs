// Drives the compiled binary in headless mode (`--ticks`), so no terminal or
// stdin interaction is needed. Every run points `--config` at a temp file to
// stay clear of the user's real settings.

use assert_cmd::Command;
use serde_json::Value;
use tempfile::tempdir;

fn run_json(args: &[&str]) -> Value {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = Command::cargo_bin("hydrosync")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .args(args)
        .output()
        .unwrap();

    assert!(output.status.success(), "binary failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn headless_run_prints_summary_json() {
    let out = run_json(&["--ticks", "70", "--seed", "12", "--style", "butterfly"]);
    let summary = &out["summary"];

    assert_eq!(summary["style"], "Butterfly");
    assert_eq!(summary["total_time_seconds"], 70);
    assert_eq!(summary["total_distance_meters"], 52);
    assert_eq!(summary["calories_burned"], 10);
    assert_eq!(summary["laps"].as_array().unwrap().len(), 2);
    assert!(out["coaching"].is_null());
}

#[test]
fn journal_note_gets_fallback_feedback_offline() {
    let out = run_json(&["--ticks", "5", "--note", "legs were heavy", "--mood", "tired"]);
    assert_eq!(
        out["journal_feedback"],
        "Great effort today. Focus on recovery."
    );
}

#[test]
fn benchmark_in_config_yields_fallback_analysis() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"benchmark": {"swimmer_name": "Pro", "style": "Freestyle", "avg_lap_time_50m": 21.0, "avg_stroke_rate": 55.0}}"#,
    )
    .unwrap();

    let output = Command::cargo_bin("hydrosync")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "--json", "--ticks", "40"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        out["coaching"]["analysis"],
        "Unable to generate analysis at this time."
    );
    assert_eq!(out["coaching"]["tips"].as_array().unwrap().len(), 3);
}

#[test]
fn log_flag_appends_csv_rows() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let log = dir.path().join("sessions.csv");

    for _ in 0..2 {
        Command::cargo_bin("hydrosync")
            .unwrap()
            .args(["--config", config.to_str().unwrap(), "--ticks", "35"])
            .args(["--log", log.to_str().unwrap()])
            .assert()
            .success();
    }

    let text = std::fs::read_to_string(&log).unwrap();
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn save_config_persists_flags() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    Command::cargo_bin("hydrosync")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "--ticks", "1"])
        .args(["--style", "backstroke", "--target", "100", "--save-config"])
        .assert()
        .success();

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["style"], "Backstroke");
    assert_eq!(saved["target_distance_meters"], 100);
}

#[test]
fn text_report_lists_laps() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = Command::cargo_bin("hydrosync")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "--ticks", "70", "--seed", "1"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.starts_with("Freestyle session "));
    assert!(stdout.contains("distance:  52m"));
    assert!(stdout.contains("time:      01:10"));
    assert!(stdout.contains("lap  2:"));
}

#[test]
fn unknown_style_is_rejected() {
    Command::cargo_bin("hydrosync")
        .unwrap()
        .args(["--ticks", "1", "--style", "doggy-paddle"])
        .assert()
        .failure();
}

const PRO_BENCHMARK: &str = r#"{"benchmark": {"swimmer_name": "Pro", "style": "Freestyle", "avg_lap_time_50m": 21.0, "avg_stroke_rate": 55.0}}"#;

#[test]
fn benchmark_gap_in_json_output() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, PRO_BENCHMARK).unwrap();

    let output = Command::cargo_bin("hydrosync")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "--json"])
        .args(["--ticks", "70", "--seed", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // 70s over 2 laps is 35s a lap, 14s behind a 21s benchmark
    let out: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(out["benchmark_gap_seconds"], 14.0);
    assert!(out["stroke_count_std_dev"].is_f64());
}

#[test]
fn benchmark_gap_absent_without_benchmark() {
    let out = run_json(&["--ticks", "20"]);
    assert!(out["benchmark_gap_seconds"].is_null());
    assert!(out["stroke_count_std_dev"].is_null());
}

#[test]
fn text_report_shows_benchmark_gap() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, PRO_BENCHMARK).unwrap();

    let output = Command::cargo_bin("hydrosync")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "--ticks", "70", "--seed", "2"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("gap:       +14.0s per lap vs Pro"));
    assert!(stdout.contains("stroke sd: "));
}
