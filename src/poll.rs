use log::{debug, info, warn};

use positional_voting::*;
use snafu::{prelude::*, Snafu};

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_forms;
pub mod io_scores;

use crate::poll::config_reader::*;

#[derive(Debug, Snafu)]
pub enum RoomError {
    #[snafu(display("Error accessing file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error parsing a numeric index field"))]
    ParsingJsonNumber {},
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no usable worksheet"))]
    EmptyExcel {},
    #[snafu(display("Unexpected cell content at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening CSV file"))]
    CsvOpen { source: csv::Error },
    #[snafu(display("Error reading a CSV record"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("CSV line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("CSV line {lineno} does not carry a usable count"))]
    CsvBadCount { lineno: usize },
    #[snafu(display("Missing parent directory for the configuration file"))]
    MissingParentDir {},
    #[snafu(display("The room has no options"))]
    NoOptions {},
    #[snafu(display("Option at position {position} is empty"))]
    EmptyOption { position: usize },
    #[snafu(display("Option {name:?} appears more than once (options are compared case-insensitively)"))]
    DuplicateOption { name: String },
    #[snafu(display("{weights} weights declared for {options} options"))]
    BadWeights { options: usize, weights: usize },
    #[snafu(display("Ballot provider {name:?} is not supported"))]
    UnknownProvider { name: String },
    #[snafu(display("Voting error: {source}"))]
    Voting { source: VotingError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RoomResult<T> = Result<T, RoomError>;

/// A ballot as parsed by the readers, before validation against the room.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: Option<String>,
    pub count: Option<u64>,
    pub choices: Vec<String>,
}

// The two shapes a ballot source can provide.
enum RoomData {
    Ballots(Vec<Ballot>),
    Scores(Vec<ScoredRow>),
}

/// Trims the configured options and rejects empty entries and duplicates.
/// The comparison is case-insensitive, the stored spelling is kept verbatim.
fn validate_options(raw: &[String]) -> RoomResult<Vec<String>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for (idx, s) in raw.iter().enumerate() {
        let trimmed = s.trim();
        ensure!(
            !trimmed.is_empty(),
            EmptyOptionSnafu { position: idx + 1 }
        );
        ensure!(
            seen.insert(trimmed.to_lowercase()),
            DuplicateOptionSnafu { name: trimmed }
        );
        res.push(trimmed.to_string());
    }
    ensure!(!res.is_empty(), NoOptionsSnafu {});
    Ok(res)
}

fn validate_weights(options: &[String], weights: &Option<Vec<u64>>) -> RoomResult<Vec<u64>> {
    match weights {
        Some(w) => {
            ensure!(
                w.len() == options.len(),
                BadWeightsSnafu {
                    options: options.len(),
                    weights: w.len()
                }
            );
            Ok(w.clone())
        }
        None => Ok(default_weights(options.len())),
    }
}

fn validate_ballots(parsed: &[ParsedBallot]) -> Vec<Ballot> {
    let mut res: Vec<Ballot> = Vec::new();
    for pb in parsed.iter() {
        let count = pb.count.unwrap_or(1);
        if count == 0 || pb.choices.is_empty() {
            debug!("validate_ballots: dropping empty ballot {:?}", pb.id);
            continue;
        }
        res.push(Ballot {
            choices: pb.choices.clone(),
            count,
        });
    }
    res
}

fn read_ballot_data(root_path: &Path, source: &BallotSource) -> RoomResult<RoomData> {
    let p = root_path.join(&source.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read ballot file {:?}", p2);
    match source.provider.as_str() {
        "csv" => Ok(RoomData::Ballots(validate_ballots(&io_csv::read_csv_ballots(
            p2, source,
        )?))),
        "forms" => Ok(RoomData::Ballots(validate_ballots(
            &io_forms::read_forms_ballots(p2, source)?,
        ))),
        "scores" => Ok(RoomData::Scores(io_scores::read_scored_rows(p2)?)),
        x => UnknownProviderSnafu { name: x }.fail(),
    }
}

fn build_summary_js(config: &RoomConfig, rows: &[ResultRow], ballots: u64, exact: bool) -> JSValue {
    let results: Vec<JSValue> = rows
        .iter()
        .map(|r| {
            json!({
                "option": r.option,
                "points": r.points,
                "rank": r.rank,
                "tied": r.tied,
            })
        })
        .collect();
    let total_points: u64 = rows.iter().map(|r| r.points).sum();
    json!({
        "config": {
            "name": config.room.name,
            "code": config.room.code,
            "date": config.room.date,
        },
        "ballots": ballots,
        "ballotsExact": exact,
        "totalPoints": total_points,
        "results": results,
    })
}

pub fn run_tally(
    config_path: String,
    out: Option<String>,
    reference: Option<String>,
) -> RoomResult<()> {
    let config_p = Path::new(config_path.as_str());
    let config = read_room_config(&config_path)?;
    info!("config: {:?}", config);

    let options = validate_options(&config.options)?;
    let weights = validate_weights(&options, &config.weights)?;

    if config.ballot_sources.is_empty() {
        whatever!("The room has no ballot sources");
    }

    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
    let mut ballots: Vec<Ballot> = Vec::new();
    let mut scores: Vec<ScoredRow> = Vec::new();
    for source in config.ballot_sources.iter() {
        match read_ballot_data(root_p, source)? {
            RoomData::Ballots(mut b) => ballots.append(&mut b),
            RoomData::Scores(mut s) => scores.append(&mut s),
        }
    }

    if !ballots.is_empty() && !scores.is_empty() {
        whatever!("Cannot mix ballot-level and pre-scored sources in one room");
    }

    // The pre-scored shape only supports an estimated ballot count; with raw
    // ballots the exact count is reported instead.
    let (rows, ballot_count, exact) = if !scores.is_empty() {
        let rows = tally_scores(&options, &scores).context(VotingSnafu)?;
        let total: u64 = rows.iter().map(|r| r.points).sum();
        let count = estimate_ballot_count(total, weights.iter().sum());
        (rows, count, false)
    } else {
        let rows = tally_ballots(&options, &weights, &ballots).context(VotingSnafu)?;
        let count: u64 = ballots.iter().map(|b| b.count).sum();
        (rows, count, true)
    };

    let summary = build_summary_js(&config, &rows, ballot_count, exact);
    let pretty = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;

    match out.as_deref() {
        None | Some("stdout") | Some("") => println!("{}", pretty),
        Some(path) => {
            info!("Writing the summary to {:?}", path);
            fs::write(path, &pretty).context(OpeningJsonSnafu { path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_ref != pretty {
            warn!("Found differences with the reference summary");
            print_diff(pretty_ref.as_str(), pretty.as_str(), "\n");
            whatever!("Difference detected between calculated summary and reference summary");
        }
    }

    Ok(())
}

fn gather_options(
    config_path: &Option<String>,
    inline: &Option<Vec<String>>,
    seed: Option<String>,
) -> RoomResult<(Vec<String>, Option<String>)> {
    let config = match config_path {
        Some(p) => Some(read_room_config(p)?),
        None => None,
    };
    let raw: Vec<String> = match (inline, &config) {
        (Some(opts), _) if !opts.is_empty() => opts.clone(),
        (_, Some(c)) => c.options.clone(),
        _ => whatever!("No options provided: pass --config or --options"),
    };
    let options = validate_options(&raw)?;
    // A room's ballot order is stable: the room code seeds it by default.
    let seed = seed.or_else(|| config.as_ref().and_then(|c| c.room.code.clone()));
    Ok((options, seed))
}

pub fn run_shuffle(
    config: Option<String>,
    options: Option<Vec<String>>,
    seed: Option<String>,
) -> RoomResult<()> {
    let (options, seed) = gather_options(&config, &options, seed)?;
    info!(
        "run_shuffle: {} options, seed: {:?}",
        options.len(),
        seed
    );
    let order = random::shuffle(&options, seed.as_deref());
    for (idx, name) in order.iter().enumerate() {
        println!("{:3} {}", idx + 1, name);
    }
    Ok(())
}

pub fn run_draw(
    config: Option<String>,
    options: Option<Vec<String>>,
    count: i64,
    with_replacement: bool,
    seed: Option<String>,
) -> RoomResult<()> {
    let (options, seed) = gather_options(&config, &options, seed)?;
    let k = if count > 0 { count as usize } else { 0 };
    info!(
        "run_draw: {} options, drawing {}, with_replacement: {}, seed: {:?}",
        options.len(),
        k,
        with_replacement,
        seed
    );
    let picks =
        random::sample(&options, k, with_replacement, seed.as_deref()).context(VotingSnafu)?;
    for (idx, name) in picks.iter().enumerate() {
        println!("{:3} {}", idx + 1, name);
    }
    Ok(())
}
