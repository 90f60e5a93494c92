use crate::domain::model::{QueryKind, YearBounds, YearQuery};
use crate::utils::error::{AnalyzerError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would also accept other Unicode digits.
static RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{3,4})-([0-9]{3,4})$").expect("range pattern compiles"));
static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{3,4})$").expect("year pattern compiles"));

/// Interpret `YYYY` or `YYYY-YYYY` against `bounds`.
///
/// The whole string must match. A range that matches the shape but fails
/// the bounds or order check is rejected outright.
pub fn parse_year_input(input: &str, bounds: &YearBounds) -> Option<YearQuery> {
    if let Some(caps) = RANGE_PATTERN.captures(input) {
        let start = caps[1].parse().ok()?;
        let end = caps[2].parse().ok()?;
        return YearQuery::checked(start, end, QueryKind::Range, bounds);
    }

    if let Some(caps) = YEAR_PATTERN.captures(input) {
        let year = caps[1].parse().ok()?;
        return YearQuery::checked(year, year, QueryKind::Year, bounds);
    }

    None
}

pub fn interpret(input: &str, bounds: &YearBounds) -> Result<YearQuery> {
    parse_year_input(input, bounds).ok_or_else(|| AnalyzerError::InvalidInputError {
        input: input.to_string(),
        min: bounds.min,
        max: bounds.max,
    })
}

/// Like [`interpret`], but the input must also have the given form.
pub fn interpret_as(input: &str, bounds: &YearBounds, kind: QueryKind) -> Result<YearQuery> {
    let query = interpret(input, bounds)?;
    if query.kind() != kind {
        return Err(AnalyzerError::InvalidInputError {
            input: input.to_string(),
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(query)
}
