// Primitives for reading and writing CSV files.

use log::debug;
use snafu::prelude::*;
use topsis::validate::Table;
use topsis::ScoreRow;

use crate::rank::*;

pub const SCORE_COLUMN: &str = "Topsis Score";
pub const RANK_COLUMN: &str = "Rank";

/// Reads a CSV file with a header row.
///
/// Rows of different lengths are accepted here and rejected by the validation.
pub fn read_table(path: &str) -> RunResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(UnreadableTableSnafu { path })?;

    let header: Vec<String> = rdr
        .headers()
        .context(UnreadableTableSnafu { path })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    if header.is_empty() {
        return EmptyTableSnafu { path }.fail();
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let line = line_r.context(UnreadableTableSnafu { path })?;
        debug!("read_table: lineno: {:?} row: {:?}", idx + 2, &line);
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(Table { header, rows })
}

/// Formats the input table with the score and rank columns appended.
///
/// The cells of the input are written back unchanged.
pub fn render_table(table: &Table, scores: &[ScoreRow]) -> RunResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = table.header.clone();
    header.push(SCORE_COLUMN.to_string());
    header.push(RANK_COLUMN.to_string());
    wtr.write_record(&header).context(FormattingOutputSnafu {})?;

    for (row, sr) in table.rows.iter().zip(scores.iter()) {
        let mut record = row.clone();
        record.push(sr.score.to_string());
        record.push(sr.rank.to_string());
        wtr.write_record(&record).context(FormattingOutputSnafu {})?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
        .context(FormattingOutputSnafu {})?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
