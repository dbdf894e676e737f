use std::fs;

use hh_reco::dataset::load_bytes;
use hh_reco::{load_dataset, BranchNames, JetColumns};
use tempfile::tempdir;

const JSON_DATASET: &str = r#"{
  "GenJet/GenJet.PT": [[50.0, 40.0, 30.0, 20.0], [12.5]],
  "GenJet/GenJet.Eta": [[0.0, 0.0, 0.0, 0.0], [1.5]],
  "GenJet/GenJet.Phi": [[0.0, 3.141592653589793, 0.0, 3.141592653589793], [-0.5]],
  "GenJet/GenJet.BTag": [[0.9, 0.8, 0.7, 0.6], [0.1]],
  "Event/Event.Number": [[1], [2]]
}"#;

#[test]
fn json_dataset_loads_by_branch_name() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("events.json");
    fs::write(&path, JSON_DATASET).expect("write dataset");

    let columns = load_dataset(&path, &BranchNames::default()).expect("load");
    assert_eq!(columns.n_events(), 2);
    let events: Vec<_> = columns.events().collect();
    assert_eq!(events[0].len(), 4);
    assert_eq!(events[1].index, 1);
    assert_eq!(events[1].jets[0].pt, 12.5);
    assert_eq!(events[1].jets[0].btag_score, 0.1);
}

#[test]
fn custom_branch_names_are_honoured() {
    let json = r#"{"pt": [[1.0]], "eta": [[0.1]], "phi": [[0.2]], "btag": [[0.3]]}"#;
    let branches = BranchNames {
        pt: "pt".into(),
        eta: "eta".into(),
        phi: "phi".into(),
        btag: "btag".into(),
    };
    let columns = JetColumns::from_json_slice(json.as_bytes(), &branches).expect("parse");
    assert_eq!(columns.event(0).expect("event").jets[0].phi, 0.2);

    let err = JetColumns::from_json_slice(json.as_bytes(), &BranchNames::default()).unwrap_err();
    assert_eq!(err.info().code, "missing-branch");
    assert_eq!(err.info().context["branch"], "GenJet/GenJet.PT");
}

#[test]
fn csv_dataset_groups_rows_by_event() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("events.csv");
    fs::write(
        &path,
        "event,pt,eta,phi,btag\n0,50,0,0,0.9\n0,40,0,3.14,0.8\n2,30,0.5,1.0,0.7\n",
    )
    .expect("write dataset");

    let columns = load_dataset(&path, &BranchNames::default()).expect("load");
    assert_eq!(columns.n_events(), 3);
    assert_eq!(columns.pt[0], vec![50.0, 40.0]);
    assert!(columns.pt[1].is_empty());
    assert_eq!(columns.eta[2], vec![0.5]);
}

#[test]
fn mismatched_columns_are_rejected() {
    let err = JetColumns::new(
        vec![vec![1.0], vec![2.0]],
        vec![vec![0.0]],
        vec![vec![0.0], vec![0.0]],
        vec![vec![0.5], vec![0.5]],
    )
    .unwrap_err();
    assert_eq!(err.info().code, "column-length-mismatch");
    assert_eq!(err.info().context["branch"], "eta");

    let err = JetColumns::new(
        vec![vec![1.0, 2.0]],
        vec![vec![0.0, 0.0]],
        vec![vec![0.0]],
        vec![vec![0.5, 0.5]],
    )
    .unwrap_err();
    assert_eq!(err.info().code, "jet-length-mismatch");
    assert_eq!(err.info().context["event"], "0");
}

#[test]
fn malformed_input_reports_path() {
    let path = std::path::Path::new("broken.json");
    let err = load_bytes(b"{not json", path, &BranchNames::default()).unwrap_err();
    assert_eq!(err.info().code, "json-parse");
    assert_eq!(err.info().context["path"], "broken.json");

    let missing_path = std::path::Path::new("/nonexistent/events.json");
    let missing = load_dataset(missing_path, &BranchNames::default()).unwrap_err();
    assert_eq!(missing.info().code, "dataset-read");
}

#[test]
fn truncate_keeps_leading_events() {
    let mut columns =
        JetColumns::from_json_slice(JSON_DATASET.as_bytes(), &BranchNames::default())
            .expect("parse");
    columns.truncate(1);
    assert_eq!(columns.n_events(), 1);
    assert!(columns.validate().is_ok());
}

#[test]
fn csv_event_index_at_usize_max_is_rejected() {
    let csv = format!("event,pt,eta,phi,btag\n{},50,0,0,0.9\n", usize::MAX);
    let err = JetColumns::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert_eq!(err.info().code, "event-index-overflow");
    assert_eq!(err.info().context["event"], usize::MAX.to_string());
}

#[test]
fn csv_sparse_event_index_is_rejected() {
    let csv = "event,pt,eta,phi,btag\n0,50,0,0,0.9\n10000000000,40,0,0,0.8\n";
    let err = JetColumns::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert_eq!(err.info().code, "sparse-event-index");
    assert_eq!(err.info().context["event"], "10000000000");
    assert_eq!(err.info().context["rows"], "2");
}

#[test]
fn csv_small_event_gap_is_filled_with_empty_events() {
    let csv = "event,pt,eta,phi,btag\n0,50,0,0,0.9\n3,40,0,0,0.8\n";
    let columns = JetColumns::from_csv_reader(csv.as_bytes()).expect("parse");
    assert_eq!(columns.n_events(), 4);
    assert!(columns.event(1).expect("event").is_empty());
    assert_eq!(columns.event(3).expect("event").jets[0].pt, 40.0);
}
