/// Tests for matrix module
#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::matrix::{BuildWarning, FileStatus, MatrixBuilder, build_matrix, parse_summary_line};
    use crate::types::{Cell, LegacyTally};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn result_file(legacy: (u64, u64, u64), runs: &[&str], rows: &[&str]) -> String {
        let mut s = format!("Test Pass/Fail/Error,{},{},{}\n", legacy.0, legacy.1, legacy.2);
        s.push_str(&format!("x,y,{}\n", runs.join(",")));
        s.push_str(&format!("Check,Component,{}\n", runs.join(",")));
        for row in rows {
            s.push_str(row);
            s.push('\n');
        }
        s
    }

    #[test]
    fn test_parse_summary_line() {
        let path = Path::new("a.csv");
        assert_eq!(
            parse_summary_line(path, "Test Pass/Fail/Error,2,1,0").unwrap(),
            LegacyTally { passes: 2, fails: 1, errors: 0 }
        );
        // Pattern may appear anywhere on the line
        assert_eq!(
            parse_summary_line(path, "junk Test Pass/Fail/Error,0,0,3,extra").unwrap(),
            LegacyTally { passes: 0, fails: 0, errors: 3 }
        );
        assert!(matches!(parse_summary_line(path, "Check,Component,run1"), Err(Error::SummaryLine { .. })));
        assert!(matches!(parse_summary_line(path, "Test Pass/Fail/Error,1,x,0"), Err(Error::SummaryLine { .. })));
    }

    #[test]
    fn test_summary_count_overflow_is_reported_as_such() {
        let err = parse_summary_line(Path::new("a.csv"), "Test Pass/Fail/Error,1,123456789012345678901234,0").unwrap_err();
        match &err {
            Error::SummaryCount { value, .. } => assert_eq!(value, "123456789012345678901234"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_single_file() {
        let mut builder = MatrixBuilder::new();
        let contents = result_file((2, 1, 0), &["run1", "run2"], &["CheckA,CompX,0,1"]);
        let status = builder.add_contents(Path::new("a.csv"), &contents).unwrap();
        assert_eq!(status, FileStatus::Accepted { columns: 2 });

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.test_names, vec!["run1", "run2"]);
        assert_eq!(matrix.run_names, vec!["run1", "run2"]);
        assert_eq!(matrix.legacy, Some(LegacyTally { passes: 2, fails: 1, errors: 0 }));

        let check = &matrix.checks["CheckA"];
        assert_eq!(check.component, "CompX");
        assert_eq!(check.values, vec![Cell::Count(0), Cell::Count(1)]);
    }

    #[test]
    fn test_column_alignment_across_files() {
        let mut builder = MatrixBuilder::new();
        let a = result_file((1, 0, 0), &["a1", "a2"], &["C1,Comp,0,1", "C2,Comp,0,0"]);
        let b = result_file((1, 0, 0), &["b1", "b2", "b3"], &["C2,Comp,1,,0"]);
        let c = result_file((1, 0, 0), &["c1"], &["C1,Comp,2"]);
        builder.add_contents(Path::new("a.csv"), &a).unwrap();
        builder.add_contents(Path::new("b.csv"), &b).unwrap();
        builder.add_contents(Path::new("c.csv"), &c).unwrap();
        let matrix = builder.finish().unwrap();

        assert_eq!(matrix.column_count(), 6);

        let c1 = &matrix.checks["C1"];
        assert_eq!(c1.values.len(), 6);
        assert_eq!(c1.values[..2], [Cell::Count(0), Cell::Count(1)]);
        assert!(c1.values[2..5].iter().all(|c| *c == Cell::Blank), "file B slice must be blank");
        assert_eq!(c1.values[5], Cell::Count(2));

        // C2 was absent from the last file, so it stops short of the final column
        let c2 = &matrix.checks["C2"];
        assert_eq!(c2.values, vec![Cell::Count(0), Cell::Count(0), Cell::Count(1), Cell::Blank, Cell::Count(0)]);
    }

    #[test]
    fn test_check_first_seen_in_later_file_is_padded() {
        let mut builder = MatrixBuilder::new();
        let a = result_file((1, 0, 0), &["a1", "a2"], &["C1,Comp,0,0"]);
        let b = result_file((1, 0, 0), &["b1"], &["Late,Comp,3"]);
        builder.add_contents(Path::new("a.csv"), &a).unwrap();
        builder.add_contents(Path::new("b.csv"), &b).unwrap();
        let matrix = builder.finish().unwrap();

        assert_eq!(matrix.checks["Late"].values, vec![Cell::Blank, Cell::Blank, Cell::Count(3)]);
    }

    #[test]
    fn test_bad_summary_line_is_fatal() {
        let mut builder = MatrixBuilder::new();
        let err = builder.add_contents(Path::new("bad.csv"), "Hello,world\nx,y,r\nCheck,Component,r\n").unwrap_err();
        match err {
            Error::SummaryLine { path, line } => {
                assert_eq!(path, PathBuf::from("bad.csv"));
                assert_eq!(line, "Hello,world");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_header_rejects_file_only() {
        let mut builder = MatrixBuilder::new();
        let bad = "Test Pass/Fail/Error,5,5,5\nx,y,r1\nName,Owner,r1\nC1,Comp,1\n";
        let status = builder.add_contents(Path::new("bad.csv"), bad).unwrap();
        assert_eq!(status, FileStatus::Skipped);
        assert!(matches!(builder.drain_warnings()[0], BuildWarning::MalformedHeader { .. }));

        let good = result_file((1, 0, 0), &["r1"], &["C2,Comp,0"]);
        builder.add_contents(Path::new("good.csv"), &good).unwrap();
        let matrix = builder.finish().unwrap();

        assert!(!matrix.checks.contains_key("C1"));
        assert_eq!(matrix.files, vec![PathBuf::from("good.csv")]);
        // Rejected file's tally is not retained
        assert_eq!(matrix.legacy, Some(LegacyTally { passes: 1, fails: 0, errors: 0 }));
    }

    #[test]
    fn test_short_row_is_skipped_with_warning() {
        let mut builder = MatrixBuilder::new();
        let contents = result_file((1, 0, 0), &["r1"], &["C1,Comp,0", "Lonely,Comp", ""]);
        builder.add_contents(Path::new("a.csv"), &contents).unwrap();

        let warnings = builder.drain_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[0],
            BuildWarning::MalformedRow { path: PathBuf::from("a.csv"), line_no: 5, line: "Lonely,Comp".to_string() }
        );
        assert!(builder.drain_warnings().is_empty());

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.checks.len(), 1);
    }

    #[test]
    fn test_row_width_is_normalised_to_header() {
        let mut builder = MatrixBuilder::new();
        let contents = result_file((1, 0, 0), &["r1", "r2", "r3"], &["Short,Comp,0", "Long,Comp,0,1,2,3,4"]);
        builder.add_contents(Path::new("a.csv"), &contents).unwrap();

        assert!(matches!(
            builder.drain_warnings()[0],
            BuildWarning::ExtraValues { expected: 3, found: 5, .. }
        ));

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.checks["Short"].values, vec![Cell::Count(0), Cell::Blank, Cell::Blank]);
        assert_eq!(matrix.checks["Long"].values, vec![Cell::Count(0), Cell::Count(1), Cell::Count(2)]);
    }

    #[test]
    fn test_component_fixed_at_first_sighting() {
        let mut builder = MatrixBuilder::new();
        let a = result_file((1, 0, 0), &["a1"], &["C1,Display,0"]);
        let b = result_file((1, 0, 0), &["b1"], &["C1,Test,1"]);
        builder.add_contents(Path::new("a.csv"), &a).unwrap();
        builder.add_contents(Path::new("b.csv"), &b).unwrap();

        assert_eq!(
            builder.drain_warnings(),
            vec![BuildWarning::ComponentMismatch {
                path: PathBuf::from("b.csv"),
                check: "C1".to_string(),
                kept: "Display".to_string(),
                found: "Test".to_string(),
            }]
        );

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.checks["C1"].component, "Display");
        assert_eq!(matrix.checks["C1"].values, vec![Cell::Count(0), Cell::Count(1)]);
    }

    #[test]
    fn test_run_names_follow_header_width() {
        let mut builder = MatrixBuilder::new();
        let a = "Test Pass/Fail/Error,1,0,0\n,,r1\nCheck,Component,t1,t2\nC1,Comp,0,0\n";
        let b = "Test Pass/Fail/Error,1,0,0\n,,r3,r4\nCheck,Component,t3\nC1,Comp,1\n";
        builder.add_contents(Path::new("a.csv"), a).unwrap();
        builder.add_contents(Path::new("b.csv"), b).unwrap();

        assert_eq!(
            builder.drain_warnings(),
            vec![
                BuildWarning::RunNameMismatch { path: PathBuf::from("a.csv"), expected: 2, found: 1 },
                BuildWarning::RunNameMismatch { path: PathBuf::from("b.csv"), expected: 1, found: 2 },
            ]
        );

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.test_names, vec!["t1", "t2", "t3"]);
        assert_eq!(matrix.run_names, vec!["r1", "", "r3"]);
    }

    #[test]
    fn test_oversized_count_is_a_positive_value() {
        let mut builder = MatrixBuilder::new();
        let contents = result_file((1, 0, 0), &["r1"], &["C1,Comp,99999999999999999999999"]);
        builder.add_contents(Path::new("a.csv"), &contents).unwrap();
        assert!(builder.drain_warnings().is_empty());

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.checks["C1"].values, vec![Cell::Count(u64::MAX)]);
    }

    #[test]
    fn test_duplicate_row_in_one_file_is_ignored() {
        let mut builder = MatrixBuilder::new();
        let contents = result_file((1, 0, 0), &["r1"], &["C1,Comp,0", "C1,Comp,9"]);
        builder.add_contents(Path::new("a.csv"), &contents).unwrap();
        assert!(matches!(builder.drain_warnings()[0], BuildWarning::DuplicateCheck { .. }));

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.checks["C1"].values, vec![Cell::Count(0)]);
    }

    #[test]
    fn test_invalid_value_is_kept_and_reported() {
        let mut builder = MatrixBuilder::new();
        let contents = result_file((1, 0, 0), &["r1", "r2"], &["C1,Comp,oops,2"]);
        builder.add_contents(Path::new("a.csv"), &contents).unwrap();
        assert!(matches!(&builder.drain_warnings()[0], BuildWarning::InvalidValue { value, .. } if value == "oops"));

        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.checks["C1"].values, vec![Cell::Invalid("oops".to_string()), Cell::Count(2)]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut builder = MatrixBuilder::new();
        let contents = "Test Pass/Fail/Error,1,0,0\r\nx,y,r1\r\nCheck,Component,r1\r\nC1,Comp,0\r\n";
        builder.add_contents(Path::new("a.csv"), contents).unwrap();
        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.test_names, vec!["r1"]);
        assert_eq!(matrix.checks["C1"].values, vec![Cell::Count(0)]);
    }

    #[test]
    fn test_legacy_tally_is_last_file_wins() {
        let mut builder = MatrixBuilder::new();
        builder.add_contents(Path::new("a.csv"), &result_file((9, 9, 9), &["a"], &["C,X,0"])).unwrap();
        builder.add_contents(Path::new("b.csv"), &result_file((1, 0, 2), &["b"], &["C,X,0"])).unwrap();
        let matrix = builder.finish().unwrap();
        assert_eq!(matrix.legacy, Some(LegacyTally { passes: 1, fails: 0, errors: 2 }));
    }

    #[test]
    fn test_finish_without_columns_is_no_valid_input() {
        let builder = MatrixBuilder::new();
        assert!(matches!(builder.finish(), Err(Error::NoValidInput)));
    }

    #[test]
    fn test_build_matrix_skips_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("results_empty.csv");
        fs::write(&empty, "").unwrap();
        let good = dir.path().join("results_good.csv");
        fs::write(&good, result_file((1, 0, 0), &["r1"], &["C1,Comp,0"])).unwrap();
        let missing = dir.path().join("results_missing.csv");

        let mut warnings = Vec::new();
        let matrix = build_matrix(&[missing.clone(), empty.clone(), good.clone()], |w| warnings.push(w.clone())).unwrap();

        assert_eq!(matrix.files, vec![good]);
        assert_eq!(warnings, vec![BuildWarning::Missing { path: missing }, BuildWarning::Empty { path: empty }]);
    }

    #[test]
    fn test_build_matrix_reports_warnings_before_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("results_empty.csv");
        fs::write(&empty, "").unwrap();
        let bad = dir.path().join("results_bad.csv");
        fs::write(&bad, "not a summary\n").unwrap();

        let mut warnings = Vec::new();
        let result = build_matrix(&[empty, bad], |w| warnings.push(w.clone()));

        assert!(matches!(result, Err(Error::SummaryLine { .. })));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_build_matrix_with_nothing_usable() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_matrix(&[dir.path().join("nope.csv")], |_| {});
        assert!(matches!(result, Err(Error::NoValidInput)));
    }
}
