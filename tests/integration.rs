//! Integration tests for the Stroop analysis
//!
//! Runs the complete workflow on the bundled 24-subject dataset.

use approx::assert_relative_eq;
use std::path::PathBuf;
use stroop_analysis::analysis::{cross_check, T_STAT_TOLERANCE};
use stroop_analysis::{
    anderson_darling, manual_t_statistic, paired_t_test, AnalysisSettings, Column, DataLoader,
    StroopAnalysis, StroopDataset, StroopError,
};

fn bundled_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/stroopdata.csv")
}

fn load_bundled() -> StroopDataset {
    DataLoader::load_csv(bundled_data_path()).expect("bundled dataset loads")
}

#[test]
fn test_bundled_dataset_shape() {
    let dataset = load_bundled();
    assert_eq!(dataset.len(), 24);

    let congruent = dataset.congruent();
    let incongruent = dataset.incongruent();
    for (i, d) in dataset.difference().iter().enumerate() {
        assert_eq!(*d, incongruent[i] - congruent[i]);
    }
}

#[test]
fn test_column_summaries() {
    let report = StroopAnalysis::new(AnalysisSettings::default())
        .run(&load_bundled())
        .unwrap();

    let congruent = &report.column(Column::Congruent).unwrap().summary;
    assert_eq!(congruent.count, 24);
    assert_relative_eq!(congruent.mean, 14.051125, epsilon = 1e-9);
    assert_relative_eq!(congruent.variance, 12.669029070652176, epsilon = 1e-9);
    assert_relative_eq!(congruent.std_dev, 3.5593579576451955, epsilon = 1e-9);
    assert_relative_eq!(congruent.standard_error, 0.726550900678799, epsilon = 1e-9);

    let incongruent = &report.column(Column::Incongruent).unwrap().summary;
    assert_relative_eq!(incongruent.mean, 22.01591666666667, epsilon = 1e-9);
    assert_relative_eq!(incongruent.std_dev, 4.797057122469138, epsilon = 1e-9);

    let difference = report.column(Column::Difference).unwrap();
    assert_relative_eq!(difference.summary.mean, 7.964791666666664, epsilon = 1e-9);
    assert_relative_eq!(difference.summary.standard_error, 0.9930286347783402, epsilon = 1e-9);
    assert_relative_eq!(difference.describe.min, 1.95, epsilon = 1e-9);
    assert_relative_eq!(difference.describe.max, 21.919, epsilon = 1e-9);
}

#[test]
fn test_normality_checks() {
    let dataset = load_bundled();

    let congruent = anderson_darling(&dataset.congruent()).unwrap();
    assert_relative_eq!(congruent.statistic, 0.2096749183076767, epsilon = 1e-8);
    assert_eq!(congruent.rejects_normality_at(5.0), Some(false));

    // Two slow outliers make the incongruent times visibly non-normal
    let incongruent = anderson_darling(&dataset.incongruent()).unwrap();
    assert_relative_eq!(incongruent.statistic, 1.069557443092183, epsilon = 1e-8);
    assert_eq!(incongruent.rejects_normality_at(1.0), Some(true));

    let difference = anderson_darling(&dataset.difference()).unwrap();
    assert_relative_eq!(difference.statistic, 0.538162550990009, epsilon = 1e-8);
    assert_eq!(difference.rejects_normality_at(5.0), Some(false));
    assert_eq!(difference.rejects_normality_at(15.0), Some(true));
}

#[test]
fn test_paired_t_test_matches_manual_statistic() {
    let dataset = load_bundled();

    let manual = manual_t_statistic(&dataset.difference()).unwrap();
    let test = paired_t_test(&dataset.incongruent(), &dataset.congruent()).unwrap();

    assert_relative_eq!(manual, 8.020706944109957, epsilon = 1e-9);
    assert_eq!(test.df, 23.0);
    assert!((manual - test.statistic).abs() < T_STAT_TOLERANCE);
    assert!(cross_check(manual, &test, T_STAT_TOLERANCE).agrees);

    assert!(test.p_value < 1e-6);
    assert!(test.is_significant(0.05));
    let (lo, hi) = test.confidence_interval;
    assert!(lo > 0.0 && lo < test.mean_difference && test.mean_difference < hi);
}

#[test]
fn test_report_to_json() {
    let report = StroopAnalysis::new(AnalysisSettings::default())
        .run(&load_bundled())
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["n_subjects"], 24);
    assert_eq!(json["t_test"]["n"], 24);
    assert_eq!(json["cross_check"]["agrees"], true);
    assert_eq!(json["columns"].as_array().unwrap().len(), 3);
}

#[test]
fn test_export_round_trip() {
    let dataset = load_bundled();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stroop_with_difference.csv");

    DataLoader::save_csv(&dataset, &path).unwrap();
    let reloaded = DataLoader::load_csv(&path).unwrap();

    assert_eq!(reloaded.len(), dataset.len());
    assert_eq!(reloaded.difference(), dataset.difference());
}

#[test]
fn test_malformed_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "Subject,Congruent,Incongruent\n1,12.0,19.0\n2,abc,18.0\n").unwrap();

    let err = DataLoader::load_csv(&path).unwrap_err();
    assert!(matches!(err, StroopError::Parse { line: Some(3), .. }));
}

#[test]
fn test_three_subject_file_runs_end_to_end() {
    let input = "Subject,Congruent,Incongruent\n1,10.0,11.0\n2,10.0,12.0\n3,10.0,13.0\n";
    let dataset = DataLoader::from_reader(input.as_bytes(), "inline").unwrap();

    let report = StroopAnalysis::new(AnalysisSettings::default())
        .run(&dataset)
        .unwrap();

    assert!(report.columns.iter().all(|c| c.normality.is_none()));
    assert_relative_eq!(report.t_test.mean_difference, 2.0, epsilon = 1e-12);
    assert_relative_eq!(report.t_test.standard_error, 0.5773502691896258, epsilon = 1e-12);
    assert_relative_eq!(report.cross_check.manual, 3.464101615137754, epsilon = 1e-9);
    assert!(report.cross_check.agrees);
}
