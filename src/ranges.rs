//! Changed line range extraction from zero-context diffs.
//!
//! Given a file, produce the 1-based inclusive line intervals of its current
//! content that were added or modified relative to HEAD. Tracked files are
//! diffed with `git diff HEAD -U0` and only the `+` side of each hunk header
//! matters; untracked files are wholly changed.
//!
//! # Examples
//!
//! ```
//! use git_rangefmt::{LineRange, parse_changed_ranges};
//!
//! let diff = "@@ -10,0 +11,3 @@\n+a\n+b\n+c\n";
//! assert_eq!(
//!     parse_changed_ranges(diff),
//!     vec![LineRange { start: 11, end: 13 }]
//! );
//!
//! // Pure deletions leave no new lines to format
//! assert!(parse_changed_ranges("@@ -5,2 +5,0 @@\n-x\n-y\n").is_empty());
//! ```

use crate::git::Repo;
use nom::IResult;
use nom::Parser;
use nom::bytes::complete::tag;
use nom::character::complete::u32 as line_number;
use nom::combinator::opt;
use nom::sequence::preceded;
use std::fmt;
use std::fs;
use std::path::Path;

/// A contiguous block of changed lines, 1-based inclusive, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Compute which lines of `file`'s current content changed relative to HEAD.
///
/// Untracked files are considered entirely changed so new files get formatted
/// in full. Any failure to probe or diff the file skips it (empty result) with
/// a stderr warning rather than aborting the run.
pub fn changed_ranges(repo: &Repo, file: &Path) -> Vec<LineRange> {
    if !file.exists() {
        return Vec::new();
    }

    match repo.is_tracked(file) {
        Ok(true) => match repo.diff_against_head(file) {
            Ok(diff) => parse_changed_ranges(&diff),
            Err(err) => {
                eprintln!("warning: skipping {}: {err}", file.display());
                Vec::new()
            }
        },
        Ok(false) => full_file_range(file),
        Err(err) => {
            eprintln!("warning: skipping {}: {err}", file.display());
            Vec::new()
        }
    }
}

/// Extract the new-file side of every hunk header in a `-U0` unified diff.
///
/// Headers look like `@@ -oldStart[,oldCount] +newStart[,newCount] @@`; an
/// omitted count means 1. A hunk with `newCount == 0` is a pure deletion and
/// contributes nothing. Ranges come out in hunk order.
pub fn parse_changed_ranges(diff: &str) -> Vec<LineRange> {
    diff.lines()
        .filter_map(|line| hunk_header(line).ok())
        .filter_map(|(_, (start, count))| {
            if count == 0 {
                None
            } else {
                Some(LineRange {
                    start,
                    end: start + count - 1,
                })
            }
        })
        .collect()
}

/// Whole-file range for an untracked file; empty files yield no range
fn full_file_range(file: &Path) -> Vec<LineRange> {
    match fs::read_to_string(file) {
        Ok(content) => {
            let total_lines = content.lines().count() as u32;
            if total_lines == 0 {
                Vec::new()
            } else {
                vec![LineRange {
                    start: 1,
                    end: total_lines,
                }]
            }
        }
        Err(err) => {
            eprintln!("warning: skipping {}: {err}", file.display());
            Vec::new()
        }
    }
}

/// Parse a hunk header anchored at the start of a line, yielding
/// `(new_start, new_count)`.
///
/// Content lines that resemble headers never match: with `-U0` every content
/// line begins with `+`, `-`, or `\`, not `@@ -`. Trailing function context
/// after the closing `@@` is ignored.
fn hunk_header(input: &str) -> IResult<&str, (u32, u32)> {
    let (input, _) = tag("@@ -").parse(input)?;
    let (input, _old) = start_and_count(input)?;
    let (input, _) = tag(" +").parse(input)?;
    let (input, new) = start_and_count(input)?;
    let (input, _) = tag(" @@").parse(input)?;
    Ok((input, new))
}

/// Parse `start[,count]`, defaulting count to 1 per unified-diff convention
fn start_and_count(input: &str) -> IResult<&str, (u32, u32)> {
    let (input, start) = line_number(input)?;
    let (input, count) = opt(preceded(tag(","), line_number)).parse(input)?;
    Ok((input, (start, count.unwrap_or(1))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn range(start: u32, end: u32) -> LineRange {
        LineRange { start, end }
    }

    #[test]
    fn insertion_hunk_yields_added_interval() {
        assert_eq!(
            parse_changed_ranges("@@ -10,0 +11,3 @@\n+a\n+b\n+c\n"),
            vec![range(11, 13)]
        );
    }

    #[test]
    fn pure_deletion_yields_nothing() {
        assert!(parse_changed_ranges("@@ -5,2 +5,0 @@\n-x\n-y\n").is_empty());
    }

    #[test]
    fn omitted_counts_default_to_one() {
        assert_eq!(
            parse_changed_ranges("@@ -3 +4 @@\n-old\n+new\n"),
            vec![range(4, 4)]
        );
    }

    #[test]
    fn replacement_hunk_covers_new_lines() {
        let diff = "@@ -10,2 +10,3 @@\n-one\n-two\n+uno\n+dos\n+tres\n";
        assert_eq!(parse_changed_ranges(diff), vec![range(10, 12)]);
    }

    #[test]
    fn new_file_hunk_starts_at_line_one() {
        assert_eq!(
            parse_changed_ranges("@@ -0,0 +1,5 @@\n+a\n+b\n+c\n+d\n+e\n"),
            vec![range(1, 5)]
        );
    }

    #[test]
    fn ranges_preserve_hunk_order() {
        let diff = "@@ -10,0 +11,3 @@\n+a\n+b\n+c\n\
                    @@ -20,2 +23,0 @@\n-x\n-y\n\
                    @@ -30 +31 @@\n-old\n+new\n";
        assert_eq!(parse_changed_ranges(diff), vec![range(11, 13), range(31, 31)]);
    }

    #[test]
    fn full_diff_headers_are_ignored() {
        let diff = "diff --git a/app.py b/app.py\n\
                    index abc1234..def5678 100644\n\
                    --- a/app.py\n\
                    +++ b/app.py\n\
                    @@ -136,0 +137 @@ def main():\n\
                    +    debug = True\n";
        assert_eq!(parse_changed_ranges(diff), vec![range(137, 137)]);
    }

    #[test]
    fn added_content_resembling_header_is_not_parsed() {
        let diff = "@@ -5,0 +6 @@\n+@@ -1 +99,9 @@\n";
        assert_eq!(parse_changed_ranges(diff), vec![range(6, 6)]);
    }

    #[test]
    fn header_with_function_context_still_parses() {
        assert_eq!(
            parse_changed_ranges("@@ -10,0 +11,3 @@ class Widget:\n+a\n+b\n+c\n"),
            vec![range(11, 13)]
        );
    }

    #[test]
    fn empty_diff_yields_nothing() {
        assert!(parse_changed_ranges("").is_empty());
    }

    #[test]
    fn rendered_ranges_use_dash_notation() {
        let diff = "@@ -10,0 +11,3 @@\n+a\n+b\n+c\n\
                    @@ -20 +24 @@\n-x\n+y\n\
                    @@ -29,0 +34,5 @@\n+p\n+q\n+r\n+s\n+t\n";
        let rendered: Vec<String> = parse_changed_ranges(diff)
            .iter()
            .map(ToString::to_string)
            .collect();
        insta::assert_snapshot!(rendered.join(", "), @"11-13, 24-24, 34-38");
    }
}
