use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;
use total::args::{Action, Config};
use total::calculate::{calculate, Summary};
use total::operands::{OpenError, Operands};

fn main() -> ExitCode {
    env_logger::init();

    let args = match total::args::parsed() {
        Action::Help => {
            return match total::help::print(&mut io::stderr().lock()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => fail(&e),
            }
        }
        Action::Version => {
            println!("{}", total::help::version());
            return ExitCode::SUCCESS;
        }
        Action::Total(args) => args,
    };

    let config = &args.config;
    let operands = Operands::from(args.files);
    let stdout = io::stdout();
    let result: Result<Summary> = if stdout.is_terminal() {
        calculate(config, operands, stdout.lock())
    } else {
        calculate(config, operands, io::BufWriter::new(stdout.lock()))
    };

    match result {
        Ok(summary) if summary.skipped.is_empty() => ExitCode::SUCCESS,
        Ok(summary) => {
            for e in &summary.skipped {
                complain(config, e);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            complain(config, &e);
            ExitCode::FAILURE
        }
    }
}

// `--quiet` silences only the complaint about a file that can't be opened.
fn complain(config: &Config, e: &anyhow::Error) {
    if !(config.quiet && e.is::<OpenError>()) {
        eprintln!("total: {e:#}");
    }
}

fn fail(e: &anyhow::Error) -> ExitCode {
    eprintln!("total: {e:#}");
    ExitCode::FAILURE
}
