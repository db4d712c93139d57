// Primitives for reading CSV ballot files.

use std::fs::File;

use crate::poll::{io_common::make_default_id, *};

/// Reads ballots from a CSV file: one row per ballot, the cells from the
/// start column onwards are the choices in rank order, best first.
pub fn read_csv_ballots(path: String, source: &BallotSource) -> RoomResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(&path);

    let id_idx_o = source.id_column_index_int()?;
    let count_idx_o = source.count_column_index_int()?;
    let choices_start_col = source.first_vote_column_index()?;

    let (records, row_offset) = get_records(&path, source)?;

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_ballots: lineno: {:?} row: {:?}", lineno, line);

        let id = if let Some(id_idx) = id_idx_o {
            line.get(id_idx)
                .context(CsvLineTooShortSnafu { lineno })?
                .to_string()
        } else {
            default_id(lineno)
        };

        let count: u64 = if let Some(count_idx) = count_idx_o {
            let cell = line
                .get(count_idx)
                .context(CsvLineTooShortSnafu { lineno })?;
            cell.trim()
                .parse::<u64>()
                .ok()
                .context(CsvBadCountSnafu { lineno })?
        } else {
            1
        };

        let choices: Vec<String> = line
            .iter()
            .skip(choices_start_col)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        res.push(ParsedBallot {
            id: Some(id),
            count: Some(count),
            choices,
        });
    }
    Ok(res)
}

fn get_records(
    path: &str,
    source: &BallotSource,
) -> RoomResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let first_row = source.first_vote_row_index()?;
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {})?;
    let mut records = rdr.into_records();
    for _ in 0..first_row {
        _ = records.next();
    }
    Ok((records, first_row))
}
