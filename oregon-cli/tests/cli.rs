use std::io::Write;
use std::process::{Command, Output, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "oregon-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run_with_input(args: &[&str], save_file: &std::path::Path, input: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_oregon");
    let mut child = Command::new(exe)
        .args(args)
        .arg("--save-file")
        .arg(save_file)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("run cli")
}

#[test]
fn cli_new_game_saves_and_quits() {
    let save_file = temp_path("save.json");
    let output = run_with_input(
        &["--seed", "7"],
        &save_file,
        "n\nAda\nBo\n\nDi\nstatus\nsave\nquit\nn\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Seed: 7"));
    assert!(stdout.contains("Traveler3"));
    assert!(stdout.contains(&format!("Game saved to {}.", save_file.display())));
    assert!(stdout.contains("Quitting. Goodbye."));

    let saved = std::fs::read_to_string(&save_file).expect("read save");
    assert!(saved.contains("milesTraveled"));
    assert!(saved.contains("Ada"));
    let _ = std::fs::remove_file(save_file);
}

#[test]
fn cli_loads_an_existing_save() {
    let save_file = temp_path("load.json");
    std::fs::write(
        &save_file,
        r#"{
  "days": 9,
  "milesTraveled": 150,
  "food": 400,
  "ammo": 30,
  "cash": 90,
  "spareWheels": 0,
  "party": [
    {"name": "Ada", "health": 80, "alive": true},
    {"name": "Bo", "health": 0, "alive": false},
    {"name": "Cy", "health": 100, "alive": true},
    {"name": "Di", "health": 55, "alive": true}
  ]
}"#,
    )
    .expect("write save");

    let output = run_with_input(&["--seed", "1"], &save_file, "y\nstatus\nquit\nn\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Save loaded."));
    assert!(stdout.contains("Miles: 150"));
    assert!(stdout.contains("Bo"));
    let _ = std::fs::remove_file(save_file);
}

#[test]
fn cli_quits_when_input_closes() {
    let save_file = temp_path("eof.json");
    let output = run_with_input(&["--seed", "3"], &save_file, "n\n\n\n\n\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Input closed"));
    assert!(!save_file.exists());
}

#[test]
fn cli_simulate_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_oregon");
    let output_path = temp_path("report.json");
    let status = Command::new(exe)
        .args([
            "simulate",
            "--seeds",
            "1,2",
            "--iterations",
            "2",
            "--strategy",
            "cautious",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());

    let content = std::fs::read_to_string(&output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    assert_eq!(report["records"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["summary"]["runs"], 4);
    assert_eq!(report["records"][0]["strategy"], "cautious");
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn cli_simulate_console_report() {
    let exe = env!("CARGO_BIN_EXE_oregon");
    let output = Command::new(exe)
        .args(["simulate", "--seeds", "1337"])
        .env("NO_COLOR", "1")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Simulation Summary"));
    assert!(stdout.contains("seed 1337 [steady]"));
}

#[test]
fn cli_rejects_a_bad_config() {
    let exe = env!("CARGO_BIN_EXE_oregon");
    let config = temp_path("config.json");
    std::fs::write(&config, r#"{"daily_travel_min": 40, "daily_travel_max": 10}"#)
        .expect("write config");

    let output = Command::new(exe)
        .args(["simulate", "--config"])
        .arg(&config)
        .output()
        .expect("run cli");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"));
    let _ = std::fs::remove_file(config);
}

#[test]
fn cli_play_subcommand_accepts_save_file() {
    let save_file = temp_path("play.json");
    let output = run_with_input(
        &["play", "--seed", "11"],
        &save_file,
        "n\n\n\n\n\nsave\nquit\nn\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Game saved to"));
    assert!(save_file.exists());
    let _ = std::fs::remove_file(save_file);
}

#[test]
fn cli_simulate_rejects_out_of_range_iterations() {
    let exe = env!("CARGO_BIN_EXE_oregon");
    for iterations in ["0", "100000000000", "18446744073709551615"] {
        let output = Command::new(exe)
            .args(["simulate", "--seeds", "1,2", "--iterations", iterations])
            .output()
            .expect("run cli");

        assert!(!output.status.success(), "--iterations {iterations}");
        assert_eq!(output.status.code(), Some(2), "--iterations {iterations}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("--iterations"), "{stderr}");
        assert!(!stderr.contains("panicked"), "{stderr}");
    }
}
