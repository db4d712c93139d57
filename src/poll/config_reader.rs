use crate::poll::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RoomInfo {
    pub name: String,
    /// The short code voters use to join the room. Doubles as the default
    /// shuffle seed so every voter of a room sees the same ballot order.
    pub code: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "hostName")]
    pub host_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BallotSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    _first_vote_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    _first_vote_row_index: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    pub id_column_index: Option<JSValue>,
    #[serde(rename = "countColumnIndex")]
    pub count_column_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl BallotSource {
    /// 1-based in the configuration, 0-based here. Defaults to the first column.
    pub fn first_vote_column_index(&self) -> RoomResult<usize> {
        match &self._first_vote_column_index {
            None => Ok(0),
            some => to_zero_based(read_js_int(some)?),
        }
    }

    /// 1-based in the configuration, 0-based here. Defaults to the first row.
    pub fn first_vote_row_index(&self) -> RoomResult<usize> {
        match &self._first_vote_row_index {
            None => Ok(0),
            some => to_zero_based(read_js_int(some)?),
        }
    }

    pub fn id_column_index_int(&self) -> RoomResult<Option<usize>> {
        match &self.id_column_index {
            None => Ok(None),
            some => to_zero_based(read_js_int(some)?).map(Some),
        }
    }

    pub fn count_column_index_int(&self) -> RoomResult<Option<usize>> {
        match &self.count_column_index {
            None => Ok(None),
            some => to_zero_based(read_js_int(some)?).map(Some),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    pub room: RoomInfo,
    pub options: Vec<String>,
    pub weights: Option<Vec<u64>>,
    #[serde(rename = "ballotSources", default)]
    pub ballot_sources: Vec<BallotSource>,
}

pub fn read_room_config(path: &str) -> RoomResult<RoomConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RoomConfig = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: String) -> RoomResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn to_zero_based(idx: usize) -> RoomResult<usize> {
    if idx == 0 {
        return ParsingJsonNumberSnafu {}.fail();
    }
    Ok(idx - 1)
}

// Indexes can be JSON numbers, numeric strings, or Excel-style column
// letters. The returned value is 1-based like the configuration.
fn read_js_int(x: &Option<JSValue>) -> RoomResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s))
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            let mut acc: usize = 0;
            for c in s.to_lowercase().chars() {
                acc = acc * 26 + ((c as usize) - ('a' as usize) + 1);
            }
            Ok(acc)
        }
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
