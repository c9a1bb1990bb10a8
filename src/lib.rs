use std::io::{self, Write};

mod discover;
mod format;
mod git;
mod ranges;

pub use discover::{SOURCE_EXTENSION, changed_source_files, is_source_file};
pub use format::{FormatCommandError, Formatter};
pub use git::{GitCommandError, Repo};
pub use ranges::{LineRange, changed_ranges, parse_changed_ranges};

/// Printed when no qualifying changed or untracked file exists
pub const NO_CHANGES_MESSAGE: &str = "No changed Python files found.";

/// Main interface: reformats the changed line ranges of every modified or
/// untracked Python file in a working tree.
///
/// # Examples
/// ```no_run
/// # use git_rangefmt::{RangeFormatter, Repo};
/// # use std::path::Path;
/// let repo = Repo::discover(Path::new(".")).unwrap();
/// let mut stdout = std::io::stdout();
/// RangeFormatter::new(repo).run(&mut stdout).unwrap();
/// ```
pub struct RangeFormatter {
    repo: Repo,
    formatter: Formatter,
}

impl RangeFormatter {
    /// Format with the default `autopep8` invocation
    pub fn new(repo: Repo) -> Self {
        Self {
            repo,
            formatter: Formatter::default(),
        }
    }

    /// Format with a custom formatter program
    pub fn with_formatter(repo: Repo, formatter: Formatter) -> Self {
        Self { repo, formatter }
    }

    /// Run the whole pipeline, writing the per-file report to `out`.
    ///
    /// Best-effort throughout: discovery failure degrades to "no changed
    /// files", a file whose diff cannot be read is skipped, and a failed
    /// formatter invocation is reported on stderr while later ranges and
    /// files still proceed. Only failures writing the report itself escape.
    pub fn run(&self, out: &mut impl Write) -> io::Result<()> {
        let files = match changed_source_files(&self.repo) {
            Ok(files) => files,
            Err(err) => {
                eprintln!("warning: {err}");
                Vec::new()
            }
        };

        if files.is_empty() {
            writeln!(out, "{NO_CHANGES_MESSAGE}")?;
            return Ok(());
        }

        for file in &files {
            let ranges = changed_ranges(&self.repo, file);
            if ranges.is_empty() {
                continue;
            }

            writeln!(out, "Formatting {}...", file.display())?;
            for range in ranges {
                writeln!(out, "  Range: {range}")?;

                // Each invocation rewrites the file the next range's line
                // numbers refer to, so ranges must stay in diff order.
                if let Err(err) = self.formatter.format_range(file, range) {
                    eprintln!("warning: {err}");
                }
            }
        }

        Ok(())
    }
}
