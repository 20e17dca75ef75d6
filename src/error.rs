//! Exit codes and structured error output for the CLI.

use serde::Serialize;

/// Exit codes for the tabdupe binary.
///
/// - 0: Success (duplicates found and removed)
/// - 1: General error
/// - 2: No duplicates found (input already clean)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: duplicates were found and removed.
    Success = 0,
    /// General error: an unexpected failure.
    GeneralError = 1,
    /// No duplicates: the run completed and nothing needed removing.
    NoDuplicates = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "TD000",
            Self::GeneralError => "TD001",
            Self::NoDuplicates => "TD002",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "TD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Underlying causes, outermost first
    pub causes: Vec<String>,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            causes: err.chain().skip(1).map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NoDuplicates.as_i32(), 2);
        assert_eq!(ExitCode::NoDuplicates.code_prefix(), "TD002");
    }

    #[test]
    fn test_structured_error_collects_causes() {
        let err = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .context("Failed to read input.csv")
            .unwrap_err();
        let structured = StructuredError::new(&err, ExitCode::GeneralError);
        assert_eq!(structured.code, "TD001");
        assert_eq!(structured.message, "Failed to read input.csv");
        assert_eq!(structured.causes, vec!["gone"]);

        let json = serde_json::to_string(&structured).unwrap();
        assert!(json.contains("\"exit_code\":1"));
    }
}
