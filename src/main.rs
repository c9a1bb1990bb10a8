use clap::Parser;
use git_rangefmt::{NO_CHANGES_MESSAGE, RangeFormatter, Repo};
use std::io::{self, Write};
use std::path::Path;

#[derive(Parser)]
#[command(name = "git-rangefmt", version)]
#[command(about = "Reformat only the changed line ranges of Python files in a git working tree")]
struct Cli {}

fn main() -> io::Result<()> {
    let _cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match Repo::discover(Path::new(".")) {
        Ok(repo) => RangeFormatter::new(repo).run(&mut out),
        Err(err) => {
            // Outside a repository there is nothing to format
            eprintln!("warning: {err}");
            writeln!(out, "{NO_CHANGES_MESSAGE}")
        }
    }
}
