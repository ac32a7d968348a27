use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "st2py",
    about = "Translates IEC 61131-3 structured text into Python"
)]
struct Args {
    /// Path to the structured text source. Reads standard input when
    /// omitted or when the path is '-'.
    file: Option<PathBuf>,

    /// Write the translated program to the specified file instead of
    /// standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat unmatched block keywords as errors instead of passing the
    /// text through unchanged.
    #[arg(long)]
    strict: bool,

    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    if let Err(message) = cli::run(args.file.as_deref(), args.output.as_deref(), args.strict) {
        log::error!("{}", message);
        process::exit(1);
    }
}
