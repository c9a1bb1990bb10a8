//! Invocation of the external line-range-aware formatter.

use crate::ranges::LineRange;
use error_set::error_set;
use std::path::Path;
use std::process::Command;

error_set! {
    /// Errors from running the external formatter
    FormatCommandError := {
        #[display("Failed to run {program}: {message}")]
        SpawnFailed { program: String, message: String },
        #[display("{program} exited with {status} while formatting {file}")]
        ExitError { program: String, status: String, file: String },
    }
}

/// External formatter invoked once per changed range.
///
/// The default program is `autopep8`; tests substitute a recording stub. The
/// formatter's own stdout/stderr are inherited so its messages reach the
/// console directly.
pub struct Formatter {
    program: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new("autopep8")
    }
}

impl Formatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Rewrite one inclusive line range of `file` in place.
    ///
    /// Invokes `<program> --in-place --line-range <start> <end> <file>`. The
    /// invocation mutates the file on disk before it returns, so callers must
    /// apply ranges strictly in order and never overlap them.
    pub fn format_range(&self, file: &Path, range: LineRange) -> Result<(), FormatCommandError> {
        let status = Command::new(&self.program)
            .arg("--in-place")
            .arg("--line-range")
            .arg(range.start.to_string())
            .arg(range.end.to_string())
            .arg(file)
            .status()
            .map_err(|e| FormatCommandError::SpawnFailed {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(FormatCommandError::ExitError {
                program: self.program.clone(),
                status: status.to_string(),
                file: file.display().to_string(),
            });
        }

        Ok(())
    }
}
