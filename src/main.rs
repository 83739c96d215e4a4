use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use uro::{
    config::{Config, DEFAULT_LOG_FILTER, LOG_ENV},
    get_result,
};

/// uro queries and manipulates files and directories with a small expression
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory the program starts in. Defaults to the current directory.
    #[arg(short = 'd', long = "directory")]
    directory: Option<PathBuf>,

    /// Program text to run.
    #[arg(short = 'c', long = "code", conflicts_with = "file", required_unless_present = "file")]
    code: Option<String>,

    /// Reads the program from a file instead of `--code`.
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
                                                     EnvFilter::new(DEFAULT_LOG_FILTER)
                                                 });
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let source = match (args.code, &args.file) {
        (Some(code), _) => code,
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          path.display());
                return ExitCode::from(1);
            },
        },
        (None, None) => String::new(),
    };

    let config = match Config::new(args.directory.as_deref(), source) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to resolve the working directory: {e}");
            return ExitCode::from(1);
        },
    };

    match get_result(&config.source, &config.location) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        },
    }
}
