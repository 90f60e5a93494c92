use crate::domain::model::{Criteria, DataState, Record, Summary, Table, YearQuery};
use thiserror::Error;

/// Why a record was left out of the scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("expected at least {required} fields, found {found}")]
    TooFewFields { found: usize, required: usize },

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid year format: '{start}-{end}'")]
    InvalidYear { start: String, end: String },

    #[error("no field at index {0}")]
    FieldAccess(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Excluded,
    Counted { illustrated: bool },
}

/// JavaScript `parseInt(text, 10)`: optional sign, then the leading digits.
///
/// Trailing text is ignored, so `"850AD"` is 850. Returns `None` when no
/// digit follows the sign. Values past the `i64` range saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: Vec<i64> = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.into_iter().fold(0i64, |acc, d| {
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(d)
        } else {
            acc.saturating_add(d)
        }
    });
    Some(value)
}

fn column<'a>(record: &'a Record, index: usize) -> Result<&'a str, MalformedRecord> {
    record
        .field(index)
        .map(str::trim)
        .ok_or(MalformedRecord::FieldAccess(index))
}

fn evaluate(record: &Record, query: &YearQuery, criteria: &Criteria) -> Result<Verdict, MalformedRecord> {
    let columns = &criteria.columns;
    let required = columns.min_fields();
    if record.len() < required {
        return Err(MalformedRecord::TooFewFields {
            found: record.len(),
            required,
        });
    }

    let start_text = column(record, columns.year_start)?;
    let end_text = column(record, columns.year_end)?;
    let place = column(record, columns.place)?;
    let flag = column(record, columns.illustrated)?.to_lowercase();

    if start_text.is_empty() {
        return Err(MalformedRecord::MissingField("production start year"));
    }
    if end_text.is_empty() {
        return Err(MalformedRecord::MissingField("production end year"));
    }
    if place.is_empty() {
        return Err(MalformedRecord::MissingField("production place"));
    }

    let (Some(start), Some(end)) = (parse_leading_int(start_text), parse_leading_int(end_text)) else {
        return Err(MalformedRecord::InvalidYear {
            start: start_text.to_string(),
            end: end_text.to_string(),
        });
    };

    if place == criteria.place && query.overlaps(start, end) {
        Ok(Verdict::Counted {
            illustrated: criteria.is_illustrated(&flag),
        })
    } else {
        Ok(Verdict::Excluded)
    }
}

fn scan(table: &Table, query: &YearQuery, criteria: &Criteria) -> Summary {
    let mut total = 0;
    let mut illustrated = 0;
    let mut skipped = 0;

    for (index, record) in table.records.iter().enumerate() {
        // +2: one for the header line, one for 1-based numbering
        let row = index + 2;
        match evaluate(record, query, criteria) {
            Ok(Verdict::Counted { illustrated: is_illustrated }) => {
                total += 1;
                if is_illustrated {
                    illustrated += 1;
                }
            }
            Ok(Verdict::Excluded) => {}
            Err(reason @ MalformedRecord::FieldAccess(_)) => {
                skipped += 1;
                tracing::warn!(row, %reason, "Error processing row, skipping");
            }
            Err(reason) => {
                skipped += 1;
                tracing::debug!(row, %reason, "Skipping malformed row");
            }
        }
    }

    tracing::debug!(
        start = query.start(),
        end = query.end(),
        total,
        illustrated,
        skipped,
        "Scan finished"
    );

    Summary::from_counts(total, illustrated)
}

/// Count records in `criteria.place` whose production interval overlaps
/// `query`, and how many of those are illustrated.
///
/// Malformed rows are skipped without failing the scan. When no data is
/// loaded the scan is not started and the summary carries the error text.
pub fn analyze_manuscripts(data: &DataState, query: &YearQuery, criteria: &Criteria) -> Summary {
    match data {
        DataState::NotLoaded => {
            tracing::error!("Manuscript data not loaded");
            Summary::not_loaded()
        }
        DataState::Loaded(table) => scan(table, query, criteria),
    }
}
