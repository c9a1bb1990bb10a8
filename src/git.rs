use error_set::error_set;
use std::path::{Path, PathBuf};
use std::process::Command;

error_set! {
    /// Errors from git command execution
    GitCommandError := {
        #[display("Failed to run git {command}: {message}")]
        SpawnFailed { command: String, message: String },
        #[display("git {command} failed: {stderr}")]
        ExitError { command: String, stderr: String },
        #[display("Invalid UTF-8 in git {command} output: {message}")]
        InvalidUtf8 { command: String, message: String },
    }
}

/// Handle to a git working tree, addressed by its root directory.
///
/// All operations shell out to `git -C <root>` and capture stdout, so the
/// handle works the same regardless of the process working directory.
pub struct Repo {
    root: PathBuf,
}

impl Repo {
    /// Locate the working tree containing `dir` via `git rev-parse --show-toplevel`
    pub fn discover(dir: &Path) -> Result<Self, GitCommandError> {
        let probe = Repo {
            root: dir.to_path_buf(),
        };
        let stdout = probe.git_stdout(&["rev-parse", "--show-toplevel"], None)?;
        Ok(Repo {
            root: PathBuf::from(stdout.trim_end()),
        })
    }

    /// Root directory of the working tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths (relative to the root) that differ from HEAD, deletions excluded
    pub fn changed_files(&self) -> Result<Vec<String>, GitCommandError> {
        let stdout = self.git_stdout(&["diff", "HEAD", "--name-only", "--diff-filter=d"], None)?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    /// Paths (relative to the root) present on disk but not in the index
    pub fn untracked_files(&self) -> Result<Vec<String>, GitCommandError> {
        let stdout = self.git_stdout(&["ls-files", "--others", "--exclude-standard"], None)?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    /// Whether `path` is known to the index.
    ///
    /// Uses `git ls-files --error-unmatch`, which signals "untracked" purely
    /// through its exit status.
    pub fn is_tracked(&self, path: &Path) -> Result<bool, GitCommandError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(["ls-files", "--error-unmatch", "--"])
            .arg(path)
            .output()
            .map_err(|e| GitCommandError::SpawnFailed {
                command: "ls-files".to_string(),
                message: e.to_string(),
            })?;

        Ok(output.status.success())
    }

    /// Zero-context unified diff of `path` against HEAD, covering both staged
    /// and unstaged changes
    pub fn diff_against_head(&self, path: &Path) -> Result<String, GitCommandError> {
        self.git_stdout(
            &["diff", "HEAD", "--no-ext-diff", "-U0", "--no-color", "--"],
            Some(path),
        )
    }

    /// Run a git subcommand and return its stdout as UTF-8 text
    fn git_stdout(&self, args: &[&str], path: Option<&Path>) -> Result<String, GitCommandError> {
        let command = args.first().copied().unwrap_or("git").to_string();

        let mut invocation = Command::new("git");
        invocation.arg("-C").arg(&self.root).args(args);
        if let Some(path) = path {
            invocation.arg(path);
        }

        let output = invocation
            .output()
            .map_err(|e| GitCommandError::SpawnFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitCommandError::ExitError {
                command,
                stderr: stderr.into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| GitCommandError::InvalidUtf8 {
            command,
            message: e.to_string(),
        })
    }
}
