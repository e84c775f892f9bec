use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_occupancy-sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("occupancy-sim process should run")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

#[test]
fn demo_preset_prints_records_and_report() {
    let stdout = stdout_of(&run_cli(&["--preset", "demo", "--seed", "3"]));
    assert!(stdout.contains("=== Usage Report ==="));
    for room in ["Kitchen", "LivingRoom", "Bedroom"] {
        assert!(
            stdout.lines().any(|l| l.starts_with(room)),
            "missing report line for {room}: {stdout}"
        );
    }
    assert!(stdout.contains("Rejected lines: 0"));
}

#[test]
fn same_seed_gives_same_stdout() {
    let a = stdout_of(&run_cli(&["--seed", "17"]));
    let b = stdout_of(&run_cli(&["--seed", "17"]));
    assert_eq!(a, b);
}

#[test]
fn config_file_with_event_log_reports_rejections() {
    let stdout = stdout_of(&run_cli(&[
        "--config",
        "scenarios/house.json",
        "--events",
        "scenarios/house.log",
    ]));
    assert!(stdout.contains("Toaster"));
    assert!(stdout.contains("Rejected lines: 1"));
}

#[test]
fn config_without_events_is_an_error() {
    let output = run_cli(&["--config", "scenarios/house.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--events"), "stderr={stderr}");
}

#[test]
fn unknown_room_in_log_fails_the_run() {
    let dir = std::env::temp_dir().join(format!("occupancy-sim-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let log = dir.join("bad.log");
    std::fs::write(&log, "8 Kitchen Occupy\n9 Garage Occupy\n").expect("write log");

    let output = run_cli(&[
        "--config",
        "scenarios/house.json",
        "--events",
        log.to_str().expect("utf-8 temp path"),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Garage"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn csv_export_writes_header_and_rows() {
    let dir = std::env::temp_dir().join(format!("occupancy-sim-csv-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let csv = dir.join("records.csv");

    let output = run_cli(&["--preset", "demo", "--csv-out", csv.to_str().expect("utf-8 path")]);
    stdout_of(&output);

    let text = std::fs::read_to_string(&csv).expect("csv should exist");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("timestamp,room,appliance,power,occupied"));
    assert!(lines.count() >= 41 * 8);
    let _ = std::fs::remove_dir_all(&dir);
}
