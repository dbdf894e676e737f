use std::fs;
use std::path::Path;
use std::process::Command;

use hh_core::from_json_slice;
use hh_reco::ReconstructionReport;
use serde_json::Value;

const PI: f64 = std::f64::consts::PI;

fn write_dataset(dir: &Path) -> std::path::PathBuf {
    let dataset = serde_json::json!({
        "GenJet/GenJet.PT": [[50.0, 40.0, 30.0, 20.0], [10.0, 20.0, 30.0]],
        "GenJet/GenJet.Eta": [[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
        "GenJet/GenJet.Phi": [[0.0, PI, 0.0, PI], [0.0, 0.0, 0.0]],
        "GenJet/GenJet.BTag": [[1.0, 1.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
    });
    let path = dir.join("jets.json");
    fs::write(&path, serde_json::to_vec(&dataset).unwrap()).unwrap();
    path
}

fn hh_cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hh-cli"))
}

#[test]
fn reconstruct_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path());
    let out = dir.path().join("out");

    let status = hh_cli()
        .args(["--log-level", "warn", "reconstruct", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let masses = fs::read_to_string(out.join("masses.csv")).unwrap();
    let lines: Vec<_> = masses.lines().collect();
    assert_eq!(lines[0], "event,mass_h1,mass_h2");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("0,"));

    let pairings = fs::read_to_string(out.join("pairings.csv")).unwrap();
    assert!(pairings.lines().nth(1).unwrap().starts_with("0,02_13,0-2,1-3,80,60,"));

    let report: ReconstructionReport =
        from_json_slice(&fs::read(out.join("report.json")).unwrap()).unwrap();
    assert_eq!(report.summary.events_total, 2);
    assert_eq!(report.summary.events_reconstructed, 1);
    assert_eq!(report.summary.skipped_too_few_jets, 1);
    assert_eq!(report.provenance.input_hash.len(), 64);
    assert_eq!(report.report_hash.len(), 64);

    let histogram: Value =
        serde_json::from_slice(&fs::read(out.join("histogram.json")).unwrap()).unwrap();
    assert_eq!(histogram["entries"], 1);
}

#[test]
fn max_events_flag_limits_processing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path());
    let out = dir.path().join("out");

    let status = hh_cli()
        .args(["reconstruct", "--max-events", "1", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let report: Value =
        serde_json::from_slice(&fs::read(out.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["summary"]["events_total"], 1);
    assert_eq!(report["config"]["max_events"], 1);
}

#[test]
fn missing_branch_fails_with_nonzero_status() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, br#"{"GenJet/GenJet.PT": [[1.0]]}"#).unwrap();

    let output = hh_cli()
        .args(["reconstruct", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(dir.path().join("out"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing-branch"), "stderr: {stderr}");
}

#[test]
fn inspect_prints_leading_events() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path());

    let output = hh_cli()
        .args(["inspect", "--events", "1", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("events: 2"));
    assert!(stdout.contains("first jet pt: 50"));
    assert!(!stdout.contains("event 1:"));
}

#[test]
fn version_prints_package_version() {
    let output = hh_cli().arg("version").output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );
}
