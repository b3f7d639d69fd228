use std::{fs, io, path::PathBuf, process::ExitCode};

use clap::Parser;
use cmm::run_program;

/// cmm runs programs written in a small, statically typed imperative
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the program to run.
    program: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Ok(source) = fs::read_to_string(&args.program) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  args.program.display());
        return ExitCode::FAILURE;
    };

    let stdin = io::stdin();
    if let Err(e) = run_program(&source, stdin.lock(), io::stdout()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
