use clap::{Parser, Subcommand};

/// Tabulation and ballot-order tooling for ranked poll rooms.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tabulates the ballots of a room and prints the leaderboard.
    Tally {
        /// (file path) The room description in JSON format. For more information about the
        /// file format, read the documentation of the positional_voting crate.
        #[clap(short, long, value_parser)]
        config: String,

        /// (file path, 'stdout' or empty) If specified, the summary of the room will be
        /// written in JSON format to the given location.
        #[clap(short, long, value_parser)]
        out: Option<String>,

        /// (file path) A reference summary in JSON format. If provided, rankroom will
        /// check that the tabulated output matches the reference.
        #[clap(short, long, value_parser)]
        reference: Option<String>,
    },

    /// Prints the voter-facing ordering of the options of a room.
    Shuffle {
        /// (file path, optional) The room description in JSON format.
        #[clap(short, long, value_parser)]
        config: Option<String>,

        /// (repeatable, optional) Inline options, in declaration order. Takes precedence
        /// over the options of --config.
        #[clap(long, value_parser)]
        options: Option<Vec<String>>,

        /// (string, optional) Seed for a reproducible ordering. Defaults to the room code
        /// when a configuration is given.
        #[clap(short, long, value_parser)]
        seed: Option<String>,
    },

    /// Draws entries from the options of a room.
    Draw {
        /// (file path, optional) The room description in JSON format.
        #[clap(short, long, value_parser)]
        config: Option<String>,

        /// (repeatable, optional) Inline options, in declaration order. Takes precedence
        /// over the options of --config.
        #[clap(long, value_parser)]
        options: Option<Vec<String>>,

        /// (number) How many entries to draw. Non-positive values draw nothing.
        #[clap(short = 'k', long, value_parser)]
        count: i64,

        /// If passed as an argument, every draw is independent and entries can repeat.
        #[clap(long, takes_value = false)]
        with_replacement: bool,

        /// (string, optional) Seed for a reproducible draw.
        #[clap(short, long, value_parser)]
        seed: Option<String>,
    },
}
