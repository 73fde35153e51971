use std::{collections::BTreeMap, fs, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use log::{debug, info};

use crate::error::CliErr;

mod error;

#[derive(Parser)]
#[command(name = "json", version, about = "Tokenize and parse a JSON file", long_about = None)]
struct Args {
    /// Path of the JSON file to parse.
    path: PathBuf,

    /// Sets the level of verbosity.
    #[arg(short, long = "verbose", action = ArgAction::Count)]
    verbosity: u8,

    /// Print the scanned tokens before parsing.
    #[arg(long)]
    tokens: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = stderrlog::new()
        .verbosity(usize::from(args.verbosity))
        .init()
    {
        eprintln!("warning: failed to initialise logging: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliErr> {
    info!("reading {}", args.path.display());
    let source = fs::read_to_string(&args.path).map_err(|source| CliErr::Read {
        path: args.path.clone(),
        source,
    })?;

    // Nothing shorter than `{}` can hold an object
    if source.chars().count() < 2 {
        return Err(CliErr::InvalidJsonFile);
    }

    info!("tokenizing");
    let tokens = json_tree::tokenize(&source)?;
    if args.tokens {
        for token in &tokens {
            println!("{token}");
        }
    }

    info!("parsing");
    let object = json_tree::parse(&tokens)?;
    debug!("parsed {} keys", object.len());

    // Sort the top level so output is stable between runs
    let sorted: BTreeMap<_, _> = object.iter().collect();
    println!("{sorted:#?}");

    Ok(())
}
