//! flot command-line interpreter.
//!
//! Usage:
//!   flot <file>       Execute a program file
//!   flot -e <code>    Execute a code string
//!   flot              Read the program from stdin

use std::{env, io, process::ExitCode};

use flot::{load_file, load_stdin, run};

const USAGE: &str = "\
Usage: flot [OPTIONS] [FILE]

Arguments:
  [FILE]  flot program to execute

Options:
  -e <CODE>   Execute CODE string
  -t          Trace execution and report the step count
  -h, --help  Print this help message

If no arguments are given, reads the program from stdin.";

enum Action {
    Run(String),
    Help,
}

struct Options {
    action: Action,
    trace: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let trace = args.iter().any(|arg| arg == "-t");
    args.retain(|arg| arg != "-t");

    let action = match args.as_slice() {
        [] => Action::Run(load_stdin().map_err(|e| e.to_string())?),
        [arg] if arg == "-" => Action::Run(load_stdin().map_err(|e| e.to_string())?),
        [arg] if arg == "-h" || arg == "--help" => Action::Help,
        [flag, code] if flag == "-e" => Action::Run(code.clone()),
        [file] => Action::Run(load_file(file).map_err(|e| e.to_string())?),
        _ => return Err(USAGE.into()),
    };

    Ok(Options { action, trace })
}

fn init_logging(trace: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if trace {
        builder.filter(Some("flot_vm"), log::LevelFilter::Trace);
    }
    builder.init();
}

fn main() -> ExitCode {
    match parse_args() {
        Ok(Options {
            action: Action::Help,
            ..
        }) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Options {
            action: Action::Run(source),
            trace,
        }) => {
            init_logging(trace);
            let stdout = io::stdout();
            match run(&source, &mut stdout.lock(), trace) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
