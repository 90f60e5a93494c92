use crate::domain::model::{ParseMode, Record, Table};
use crate::utils::error::Result;

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}

/// Parse comma-separated text into a table.
///
/// The first line is dropped as a header whatever it contains. Every other
/// line is trimmed; blank lines are skipped and the rest are split on each
/// comma. There is no quoting, so a comma inside a field shifts the columns.
pub fn parse_table(text: &str) -> Table {
    let mut lines = text.split('\n');

    let header = lines
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(split_line);

    let records = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Record::new(split_line(line)))
        .collect();

    Table::new(header, records)
}

/// Quote-aware variant backed by the `csv` crate. Rows may have differing
/// lengths; short rows are left for the aggregator to reject.
pub fn parse_table_quoted(text: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let header = if header.iter().all(|h| h.trim().is_empty()) {
        None
    } else {
        Some(header)
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        records.push(row.iter().collect::<Record>());
    }

    Ok(Table::new(header, records))
}

pub fn parse_with_mode(text: &str, mode: ParseMode) -> Result<Table> {
    match mode {
        ParseMode::Simple => Ok(parse_table(text)),
        ParseMode::Quoted => parse_table_quoted(text),
    }
}
