//! Puzzlegrid - command-line tool for slicing images into puzzle tiles and
//! replaying action scripts

use std::process::ExitCode;

use puzzlegrid::cli;

fn main() -> ExitCode {
    cli::run()
}
