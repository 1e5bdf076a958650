use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis::contact::check_email;
use topsis::validate::{validate, Table};
use topsis::*;

use std::fs;
use std::path::Path;

use text_diff::print_diff;

use crate::args::Args;

mod io_csv;
mod summary;

#[derive(Debug, Snafu)]
pub enum RunError {
    #[snafu(display(
        "Incorrect number of parameters.\nUsage: topsis <InputDataFile> <Weights> <Impacts> <OutputResultFileName>"
    ))]
    ArgumentCount {},

    #[snafu(display("{message}"))]
    InvalidArguments { message: String },

    #[snafu(display("Input file not found: {path}"))]
    FileNotFound { path: String },

    #[snafu(display("Unable to read input file {path}: {source}"))]
    UnreadableTable { source: csv::Error, path: String },

    #[snafu(display("Unable to read input file {path}: the file is empty"))]
    EmptyTable { path: String },

    #[snafu(display("{source}"))]
    Validation { source: TopsisError },

    #[snafu(display("{source}"))]
    Evaluation { source: TopsisError },

    #[snafu(display("Unable to format the output table: {source}"))]
    FormattingOutput { source: csv::Error },

    #[snafu(display("Unable to write output file {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Unable to write summary {path}: {source}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Unable to serialize the summary: {source}"))]
    SerializingSummary { source: serde_json::Error },

    #[snafu(display("Unable to read reference file {path}: {source}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type RunResult<T> = Result<T, RunError>;

fn rules_from_args(args: &Args) -> Rules {
    Rules {
        undefined_score: if args.strict {
            UndefinedScoreMode::Reject
        } else {
            UndefinedScoreMode::Zero
        },
    }
}

fn check_reference(reference_path: &str, content: &str) -> RunResult<()> {
    let reference = fs::read_to_string(reference_path).context(ReadingReferenceSnafu {
        path: reference_path,
    })?;
    let ref_lines: Vec<&str> = reference.lines().collect();
    let out_lines: Vec<&str> = content.lines().collect();
    if ref_lines != out_lines {
        warn!("Found differences with the reference file");
        print_diff(reference.as_str(), content, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Output matches the reference {}", reference_path);
    Ok(())
}

/// Reads the table, validates it, ranks the alternatives and writes the result.
///
/// Nothing is written if the validation or the evaluation fails. The summary and the
/// reference comparison come after the output table is written.
pub fn run_topsis(args: &Args) -> RunResult<()> {
    info!("args: {:?}", args);

    if let Some(email) = &args.email {
        check_email(email).context(ValidationSnafu {})?;
    }

    if !Path::new(&args.input).is_file() {
        return FileNotFoundSnafu {
            path: args.input.clone(),
        }
        .fail();
    }

    let table: Table = io_csv::read_table(&args.input)?;
    debug!(
        "run_topsis: header: {:?}, {} rows",
        table.header,
        table.rows.len()
    );

    let problem = validate(&table, &args.weights, &args.impacts).context(ValidationSnafu {})?;

    let rules = rules_from_args(args);
    let evaluation = problem.evaluate(&rules).context(EvaluationSnafu {})?;

    let content = io_csv::render_table(&table, &evaluation.rows)?;
    fs::write(&args.output, &content).context(WritingOutputSnafu {
        path: args.output.clone(),
    })?;
    info!("Wrote {} rows to {}", table.rows.len(), args.output);

    if let Some(summary_path) = &args.summary {
        let js = summary::build_summary_js(&problem, &evaluation, args.email.as_deref());
        summary::write_summary(summary_path, &js)?;
    }

    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &content)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn test_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
    }

    fn temp_output(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("topsis-{}-{}.csv", name, std::process::id()))
            .display()
            .to_string()
    }

    fn make_args(input: String, weights: &str, impacts: &str, output: String) -> Args {
        Args {
            input,
            weights: weights.to_string(),
            impacts: impacts.to_string(),
            output,
            summary: None,
            reference: None,
            email: None,
            strict: false,
            verbose: false,
        }
    }

    fn test_wrapper(test_name: &str, weights: &str, impacts: &str) {
        init();
        let dir = test_dir().join(test_name);
        let output = temp_output(test_name);
        let mut args = make_args(
            dir.join("input.csv").display().to_string(),
            weights,
            impacts,
            output.clone(),
        );
        args.reference = Some(dir.join("expected.csv").display().to_string());
        let res = run_topsis(&args);
        let _ = fs::remove_file(&output);
        if let Err(e) = res {
            panic!("test {} failed: {}", test_name, e);
        }
    }

    fn run_failing(test_name: &str, input: String, weights: &str, impacts: &str) -> RunError {
        init();
        let output = temp_output(test_name);
        let _ = fs::remove_file(&output);
        let res = run_topsis(&make_args(input, weights, impacts, output.clone()));
        assert!(
            !Path::new(&output).exists(),
            "no output expected for {}",
            test_name
        );
        match res {
            Err(e) => e,
            Ok(()) => panic!("test {} should have failed", test_name),
        }
    }

    fn phones_input() -> String {
        test_dir()
            .join("phones")
            .join("input.csv")
            .display()
            .to_string()
    }

    #[test]
    fn phones() {
        test_wrapper("phones", "0.25,0.25,0.25,0.25", "-,+,+,+");
    }

    #[test]
    fn funds() {
        test_wrapper("funds", "1,2,1.5,1", "+,+,-,-");
    }

    #[test]
    fn ties() {
        test_wrapper("ties", "1,1", "+,-");
    }

    #[test]
    fn identical() {
        test_wrapper("identical", "2,1,1", "+,-,+");
    }

    #[test]
    fn reference_mismatch() {
        init();
        let dir = test_dir().join("phones");
        let output = temp_output("phones_mismatch");
        let mut args = make_args(phones_input(), "1,1,1,1", "+,+,+,+", output.clone());
        args.reference = Some(dir.join("expected.csv").display().to_string());
        let res = run_topsis(&args);
        // The output is written before the comparison.
        let written = Path::new(&output).exists();
        let _ = fs::remove_file(&output);
        assert!(matches!(res, Err(RunError::ReferenceMismatch { .. })));
        assert!(written);
    }

    #[test]
    fn summary_to_file() {
        init();
        let output = temp_output("phones_summary_out");
        let summary_path = temp_output("phones_summary_json");
        let mut args = make_args(phones_input(), "1,1,1,1", "-,+,+,+", output.clone());
        args.summary = Some(summary_path.clone());
        args.email = Some("analyst@example.com".to_string());
        run_topsis(&args).unwrap();
        let js: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
        let _ = fs::remove_file(&output);
        let _ = fs::remove_file(&summary_path);
        assert_eq!(js["config"]["contact"], "analyst@example.com");
        assert_eq!(js["criteria"].as_array().unwrap().len(), 4);
        assert_eq!(js["criteria"][0]["impact"], "-");
        assert_eq!(js["results"].as_array().unwrap().len(), 5);
        assert_eq!(js["results"][0]["id"], "M1");
    }

    #[test]
    fn missing_file() {
        let e = run_failing(
            "missing",
            test_dir().join("nope.csv").display().to_string(),
            "1,1",
            "+,+",
        );
        assert!(matches!(e, RunError::FileNotFound { .. }));
    }

    #[test]
    fn empty_file() {
        let e = run_failing(
            "empty",
            test_dir().join("empty.csv").display().to_string(),
            "1,1",
            "+,+",
        );
        assert!(matches!(e, RunError::EmptyTable { .. }));
    }

    #[test]
    fn too_few_columns() {
        let e = run_failing(
            "two_columns",
            test_dir().join("two_columns.csv").display().to_string(),
            "1",
            "+",
        );
        assert!(matches!(
            e,
            RunError::Validation {
                source: TopsisError::Schema { .. }
            }
        ));
    }

    #[test]
    fn non_numeric() {
        let e = run_failing(
            "non_numeric",
            test_dir().join("non_numeric.csv").display().to_string(),
            "1,1,1",
            "+,+,+",
        );
        assert!(matches!(
            e,
            RunError::Validation {
                source: TopsisError::NonNumericData { row: 2, .. }
            }
        ));
    }

    #[test]
    fn bad_weights() {
        let e = run_failing("bad_weights", phones_input(), "1,1,x,1", "+,+,+,+");
        assert!(matches!(
            e,
            RunError::Validation {
                source: TopsisError::WeightParse { .. }
            }
        ));
    }

    #[test]
    fn bad_impacts() {
        let e = run_failing("bad_impacts", phones_input(), "1,1,1,1", "+,*,-,+");
        assert!(matches!(
            e,
            RunError::Validation {
                source: TopsisError::InvalidImpactSymbol { .. }
            }
        ));
    }

    #[test]
    fn wrong_counts() {
        let e = run_failing("wrong_counts", phones_input(), "1,1,1", "+,+,+,+");
        assert!(matches!(
            e,
            RunError::Validation {
                source: TopsisError::DimensionMismatch { .. }
            }
        ));
    }

    #[test]
    fn bad_email() {
        init();
        let output = temp_output("bad_email");
        let _ = fs::remove_file(&output);
        let mut args = make_args(phones_input(), "1,1,1,1", "+,+,+,+", output.clone());
        args.email = Some("not-an-email".to_string());
        let res = run_topsis(&args);
        assert!(!Path::new(&output).exists());
        assert!(matches!(
            res,
            Err(RunError::Validation {
                source: TopsisError::InvalidEmail { .. }
            })
        ));
    }

    #[test]
    fn zero_column() {
        let e = run_failing(
            "zero_column",
            test_dir().join("zero_column.csv").display().to_string(),
            "1,1",
            "+,+",
        );
        assert!(matches!(
            e,
            RunError::Evaluation {
                source: TopsisError::DegenerateColumn { column: 2 }
            }
        ));
    }

    #[test]
    fn strict_identical() {
        init();
        let output = temp_output("strict_identical");
        let _ = fs::remove_file(&output);
        let mut args = make_args(
            test_dir()
                .join("identical")
                .join("input.csv")
                .display()
                .to_string(),
            "2,1,1",
            "+,-,+",
            output.clone(),
        );
        args.strict = true;
        let res = run_topsis(&args);
        assert!(!Path::new(&output).exists());
        assert!(matches!(
            res,
            Err(RunError::Evaluation {
                source: TopsisError::UndefinedScore { row: 1 }
            })
        ));
    }

    #[test]
    fn error_messages() {
        assert!(RunError::ArgumentCount {}
            .to_string()
            .starts_with("Incorrect number of parameters."));
        let e = RunError::Validation {
            source: TopsisError::InvalidImpactSymbol {
                symbol: "*".to_string(),
            },
        };
        assert_eq!(e.to_string(), "Impacts must be either + or -, found \"*\"");
    }
}
