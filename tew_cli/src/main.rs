//! # TEW CLI
//!
//! Evaluates a study of curved stiffened panels and prints the buckling and
//! collapse loads next to the measured and published values.
//!
//! ```text
//! tew_cli [STUDY.json] [--json] [--write-reference PATH]
//! ```
//!
//! Without a study file the built-in reference study (Cases I-V) is used.
//! Configurations that fail are reported on stderr and left out of the
//! table. Set `RUST_LOG=debug` to follow the iterations.

mod reference;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use tew_core::{load_study, save_study, Study, TewError, TewResult};

use crate::reference::reference_study;
use crate::report::Report;

const USAGE: &str = "usage: tew_cli [STUDY.json] [--json] [--write-reference PATH]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    study: Option<PathBuf>,
    json: bool,
    write_reference: Option<PathBuf>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => parsed.json = true,
                "--write-reference" => {
                    let path = args.next().ok_or("--write-reference needs a path")?;
                    parsed.write_reference = Some(PathBuf::from(path));
                }
                "-h" | "--help" => return Err(USAGE.to_string()),
                flag if flag.starts_with('-') => return Err(format!("unknown option '{flag}'")),
                path => {
                    if parsed.study.is_some() {
                        return Err(format!("unexpected argument '{path}'"));
                    }
                    parsed.study = Some(PathBuf::from(path));
                }
            }
        }
        Ok(parsed)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(report) if report.failures.is_empty() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error [{}]: {}", e.error_code(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> TewResult<Report> {
    if let Some(path) = &args.write_reference {
        save_study(&reference_study()?, path)?;
        log::info!("wrote reference study to {}", path.display());
    }

    let study: Study = match &args.study {
        Some(path) => load_study(path)?,
        None => reference_study()?,
    };

    let report = Report::build(&study);
    for failure in &report.failures {
        eprintln!("skipped {} [{}]: {}", failure.case_id, failure.code, failure.error.root_cause());
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| TewError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{json}");
    } else {
        print!("{}", report.render_table());
    }
    Ok(report)
}
