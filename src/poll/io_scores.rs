use serde::{Deserialize, Serialize};

use crate::poll::*;

// The on-disk shape of a pre-aggregated row.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct StoredRow {
    option: String,
    points: u64,
}

/// Reads pre-aggregated point totals: a JSON array of `{option, points}`
/// rows, the shape a result store exports when it keeps running totals
/// instead of full rankings.
pub fn read_scored_rows(path: String) -> RoomResult<Vec<ScoredRow>> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let rows: Vec<StoredRow> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_scored_rows: {} rows", rows.len());
    Ok(rows
        .into_iter()
        .map(|r| ScoredRow {
            option: r.option,
            points: r.points,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("scores.json");
        fs::write(&p, r#"[ {"option": "A", "points": 3}, {"option": "B", "points": 0} ]"#)
            .unwrap();
        let rows = read_scored_rows(p.display().to_string()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].option, "A");
        assert_eq!(rows[0].points, 3);
    }

    #[test]
    fn malformed_rows_are_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("scores.json");
        fs::write(&p, r#"{"option": "A"}"#).unwrap();
        let res = read_scored_rows(p.display().to_string());
        assert!(matches!(res, Err(RoomError::ParsingJson { .. })));
    }
}
