use std::error::Error;

use tinylinker::errors::{BatchFailedItem, BatchFailure, Result, TinylinkerError};
use tinylinker::interfaces::cli::CliError;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_invalid_url_error() {
        let error = TinylinkerError::invalid_url("Invalid URL format");

        assert!(matches!(error, TinylinkerError::InvalidUrl(_)));
        assert_eq!(error.to_string(), "Invalid URL: Invalid URL format");
        assert!(error.is_validation());
    }

    #[test]
    fn test_short_code_errors_are_validation() {
        assert!(TinylinkerError::invalid_short_code("bad").is_validation());
        assert!(TinylinkerError::short_code_taken("taken").is_validation());
        assert!(!TinylinkerError::persistence_failure("disk").is_validation());
        assert!(!TinylinkerError::code_space_exhausted("full").is_validation());
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            TinylinkerError::invalid_url("x"),
            TinylinkerError::invalid_short_code("x"),
            TinylinkerError::short_code_taken("x"),
            TinylinkerError::code_space_exhausted("x"),
            TinylinkerError::persistence_failure("x"),
            TinylinkerError::BatchFailed(BatchFailure::new(Vec::new(), 0)),
            TinylinkerError::serialization("x"),
            TinylinkerError::file_operation("x"),
            TinylinkerError::config("x"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_format_colored_contains_code_and_message() {
        colored::control::set_override(false);
        let error = TinylinkerError::persistence_failure("Failed to save URL data");

        let out = error.format_colored();
        assert!(out.contains("E005"));
        assert!(out.contains("Persistence Failure"));
        assert!(out.contains("Failed to save URL data"));
    }
}

#[cfg(test)]
mod batch_failure_tests {
    use super::*;

    #[test]
    fn test_summary_lists_each_position() {
        let report = BatchFailure::new(
            vec![
                BatchFailedItem {
                    position: 2,
                    error: TinylinkerError::invalid_url("Invalid URL format"),
                },
                BatchFailedItem {
                    position: 4,
                    error: TinylinkerError::short_code_taken("Shortcode already exists."),
                },
            ],
            3,
        );

        assert_eq!(report.positions(), vec![2, 4]);
        assert_eq!(report.persisted, 3);
        assert_eq!(
            report.summary(),
            "URL 2: Invalid URL format\nURL 4: Shortcode already exists."
        );

        let error = TinylinkerError::BatchFailed(report);
        assert_eq!(error.message(), "URL 2: Invalid URL format\nURL 4: Shortcode already exists.");
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: TinylinkerError = io.into();
        assert!(matches!(error, TinylinkerError::FileOperation(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let error: TinylinkerError = parse.into();
        assert!(matches!(error, TinylinkerError::Serialization(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn parse(raw: &str) -> Result<Vec<u32>> {
            Ok(serde_json::from_str(raw)?)
        }
        assert!(parse("[1,2]").is_ok());
        assert!(parse("nope").is_err());
    }

    #[test]
    fn test_implements_std_error() {
        let error = TinylinkerError::config("bad");
        let dyn_error: &dyn Error = &error;
        assert!(dyn_error.source().is_none());
    }

    #[test]
    fn test_cli_error_mapping() {
        let rejected: CliError = TinylinkerError::invalid_short_code("Use 3-20 chars").into();
        assert!(matches!(rejected, CliError::Rejected(ref m) if m == "Use 3-20 chars"));

        let storage: CliError = TinylinkerError::persistence_failure("disk full").into();
        assert!(matches!(storage, CliError::StorageError(_)));

        let batch: CliError = TinylinkerError::BatchFailed(BatchFailure::new(
            vec![BatchFailedItem {
                position: 1,
                error: TinylinkerError::invalid_url("Invalid URL format"),
            }],
            0,
        ))
        .into();
        assert_eq!(batch.to_string(), "URL 1: Invalid URL format");
    }
}
