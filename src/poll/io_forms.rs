use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::poll::{io_common::make_default_id, *};

/// Reads the Excel export of a ranking grid: each row is one ballot and the
/// cells from the start column onwards name the option placed at each rank.
pub fn read_forms_ballots(path: String, source: &BallotSource) -> RoomResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(&path);
    let wrange = get_range(&path, source)?;

    let header = wrange.rows().next().context(EmptyExcelSnafu {})?;
    debug!("read_forms_ballots: header: {:?}", header);
    let start_range = source.first_vote_column_index()?;

    let mut iter = wrange.rows();
    // The first row holds the column labels of the export.
    iter.next();
    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let mut choices: Vec<String> = Vec::new();
        for cell in row.iter().skip(start_range) {
            match cell {
                DataType::String(s) if !s.trim().is_empty() => {
                    choices.push(s.trim().to_string());
                }
                DataType::String(_) => {}
                DataType::Empty => {
                    // No choice made at this rank, skip.
                }
                _ => {
                    return Err(RoomError::ExcelWrongCellType {
                        lineno: lineno as u64,
                        content: format!("{:?} IN {:?}", cell, row),
                    });
                }
            }
        }
        debug!(
            "read_forms_ballots: lineno: {:?} choices: {:?}",
            lineno, choices
        );
        res.push(ParsedBallot {
            id: Some(default_id(lineno)),
            // Form exports carry one voter per row.
            count: Some(1),
            choices,
        });
    }
    Ok(res)
}

fn get_range(path: &str, source: &BallotSource) -> RoomResult<calamine::Range<DataType>> {
    let worksheet_name_o = source.excel_worksheet_name.clone();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "get_range: path: {:?} worksheet: {:?}",
                    &path, &worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => {
                whatever!("The workbook has several worksheets, excelWorksheetName must be provided")
            }
        }
    }
}
