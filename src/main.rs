mod args;
mod rank;

use clap::error::ErrorKind;
use clap::Parser;
use log::{debug, LevelFilter};

use crate::args::Args;
use crate::rank::{run_topsis, RunError};

const NUM_POSITIONALS: usize = 4;
const VALUE_OPTIONS: [&str; 3] = ["--summary", "--reference", "--email"];

/// Counts the positional arguments, without the program name, the options and their values.
fn count_positionals(raw: &[String]) -> usize {
    let mut count = 0;
    let mut iter = raw.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            if VALUE_OPTIONS.contains(&arg.as_str()) {
                iter.next();
            }
        } else {
            count += 1;
        }
    }
    count
}

fn parse_args_from(raw: Vec<String>) -> Result<Args, RunError> {
    match Args::try_parse_from(&raw) {
        Ok(args) => Ok(args),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                debug!("parse_args: {}", e);
                if count_positionals(&raw) != NUM_POSITIONALS {
                    Err(RunError::ArgumentCount {})
                } else {
                    let msg = e.to_string();
                    Err(RunError::InvalidArguments {
                        message: msg.trim_start_matches("error: ").trim_end().to_string(),
                    })
                }
            }
        },
    }
}

fn main() {
    let res = parse_args_from(std::env::args().collect()).and_then(|args| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(LevelFilter::Warn).parse_default_env();
        if args.verbose {
            builder.filter_level(LevelFilter::Debug);
        }
        builder.init();
        debug!("main: parsed arguments {:?}", args);
        run_topsis(&args)
    });

    if let Err(e) = res {
        println!("Error: {}", e);
        std::process::exit(1);
    }
    println!("TOPSIS analysis completed successfully.");
}
