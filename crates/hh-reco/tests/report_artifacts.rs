use hh_reco::{
    build_report, reconstruct_dataset, write_masses_csv, write_pairings_csv, JetColumns,
    RecoConfig,
};

fn columns() -> JetColumns {
    let pi = std::f64::consts::PI;
    JetColumns::new(
        vec![vec![50.0, 40.0, 30.0, 20.0], vec![10.0, 12.0], vec![50.0, 40.0, 30.0, 20.0]],
        vec![vec![0.0; 4], vec![0.0; 2], vec![0.0; 4]],
        vec![vec![0.0, pi, 0.0, pi], vec![0.0, 1.0], vec![0.0, pi, 0.0, pi]],
        vec![vec![0.9, 0.8, 0.7, 0.6], vec![0.5, 0.4], vec![0.6, 0.7, 0.8, 0.9]],
    )
    .expect("columns")
}

#[test]
fn dataset_pass_summarises_events() {
    let config = RecoConfig::default();
    let (output, histogram) = reconstruct_dataset(&columns(), &config).expect("reconstruct");
    assert_eq!(output.events_seen, 3);
    assert_eq!(output.masses.len(), 2);
    assert_eq!(output.skipped_too_few_jets, 1);
    assert_eq!(histogram.entries, 2);
    assert_eq!(histogram.counts[0][0], 2);

    let report = build_report("input-hash", &config, &output, &histogram).expect("report");
    assert_eq!(report.summary.events_reconstructed, 2);
    assert_eq!(report.summary.skipped_too_few_jets, 1);
    assert!(report.summary.mean_mass_h1.expect("mean").abs() < 1e-6);
    assert_eq!(report.provenance.input_hash, "input-hash");
    assert_eq!(report.provenance.config_hash.len(), 64);
    assert!(report.provenance.tool_versions.contains_key("hh-reco"));
}

#[test]
fn report_hash_is_deterministic() {
    let config = RecoConfig::default();
    let (output, histogram) = reconstruct_dataset(&columns(), &config).expect("reconstruct");
    let first = build_report("abc", &config, &output, &histogram).expect("report");
    let second = build_report("abc", &config, &output, &histogram).expect("report");
    assert_eq!(first.report_hash, second.report_hash);
    let other = build_report("abd", &config, &output, &histogram).expect("report");
    assert_ne!(first.report_hash, other.report_hash);
    assert_eq!(first.histogram_hash, other.histogram_hash);
}

#[test]
fn max_events_limits_the_pass() {
    let config = RecoConfig {
        max_events: Some(1),
        ..RecoConfig::default()
    };
    let (output, _) = reconstruct_dataset(&columns(), &config).expect("reconstruct");
    assert_eq!(output.events_seen, 1);
    assert_eq!(output.records.len(), 1);
}

#[test]
fn empty_pass_has_no_means() {
    let config = RecoConfig::default();
    let empty = JetColumns::default();
    let (output, histogram) = reconstruct_dataset(&empty, &config).expect("reconstruct");
    let report = build_report("", &config, &output, &histogram).expect("report");
    assert_eq!(report.summary.events_total, 0);
    assert!(report.summary.mean_mass_h1.is_none());
    assert!(report.summary.mean_mass_h2.is_none());
}

#[test]
fn csv_artefacts_have_one_row_per_event() {
    let (output, _) = reconstruct_dataset(&columns(), &RecoConfig::default()).expect("reconstruct");

    let mut masses = Vec::new();
    write_masses_csv(&mut masses, &output).expect("masses csv");
    let masses = String::from_utf8(masses).expect("utf8");
    let lines: Vec<&str> = masses.lines().collect();
    assert_eq!(lines[0], "event,mass_h1,mass_h2");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("0,"));
    assert!(lines[2].starts_with("2,"));

    let mut pairings = Vec::new();
    write_pairings_csv(&mut pairings, &output).expect("pairings csv");
    let pairings = String::from_utf8(pairings).expect("utf8");
    let rows: Vec<&str> = pairings.lines().collect();
    assert_eq!(rows[0], "event,pairing,h1_jets,h2_jets,pt_h1,pt_h2,d_hh,r_hh");
    assert!(rows[1].starts_with("0,02_13,0-2,1-3,80,60,"));
    assert!(rows[2].starts_with("2,02_13,2-0,3-1,80,60,"));
}
