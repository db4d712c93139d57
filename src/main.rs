mod args;
mod poll;

use clap::Parser;
use snafu::ErrorCompat;

use crate::args::{Args, Command};

fn main() {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let res = match args.command {
        Command::Tally {
            config,
            out,
            reference,
        } => poll::run_tally(config, out, reference),
        Command::Shuffle {
            config,
            options,
            seed,
        } => poll::run_shuffle(config, options, seed),
        Command::Draw {
            config,
            options,
            count,
            with_replacement,
            seed,
        } => poll::run_draw(config, options, count, with_replacement, seed),
    };

    if let Err(e) = res {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
