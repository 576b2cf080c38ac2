use clap::Parser;
use pnlchart::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
