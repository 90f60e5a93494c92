use serde::{Deserialize, Serialize};

pub const MIN_YEAR: i64 = 700;
pub const MAX_YEAR: i64 = 1100;
pub const DEFAULT_PLACE: &str = "Britain";
pub const DEFAULT_ILLUSTRATED_VALUES: [&str; 3] = ["true", "yes", "1"];
pub const DATA_NOT_LOADED_MESSAGE: &str = "Data not loaded. Please try again.";

/// One data row, fields in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// The discarded first line, split like a record. Only used for diagnostics.
    pub header: Option<Vec<String>>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(header: Option<Vec<String>>, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn header_len(&self) -> Option<usize> {
        self.header.as_ref().map(Vec::len)
    }
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Self::new(None, records)
    }
}

/// Session data. A table without records never counts as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataState {
    #[default]
    NotLoaded,
    Loaded(Table),
}

impl DataState {
    pub fn from_table(table: Table) -> Self {
        if table.is_empty() {
            DataState::NotLoaded
        } else {
            DataState::Loaded(table)
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DataState::Loaded(_))
    }

    pub fn table(&self) -> Option<&Table> {
        match self {
            DataState::Loaded(table) => Some(table),
            DataState::NotLoaded => None,
        }
    }

    pub fn record_count(&self) -> usize {
        self.table().map(Table::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Year,
    Range,
}

/// A validated `[start, end]` year interval inside the configured bounds.
///
/// Only `core::query` can build one, so holding a `YearQuery` means the
/// input already passed the pattern and bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearQuery {
    start: i64,
    end: i64,
    kind: QueryKind,
}

impl YearQuery {
    pub(crate) fn checked(start: i64, end: i64, kind: QueryKind, bounds: &YearBounds) -> Option<Self> {
        if bounds.min <= start && start <= end && end <= bounds.max {
            Some(Self { start, end, kind })
        } else {
            None
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Standard interval overlap, not containment.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        start <= self.end && end >= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub year_start: usize,
    pub year_end: usize,
    pub place: usize,
    pub illustrated: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            year_start: 4,
            year_end: 5,
            place: 6,
            illustrated: 9,
        }
    }
}

impl ColumnLayout {
    pub fn indices(&self) -> [usize; 4] {
        [self.year_start, self.year_end, self.place, self.illustrated]
    }

    /// Fewest fields a record needs before any column can be read.
    pub fn min_fields(&self) -> usize {
        self.indices().into_iter().max().unwrap_or(0) + 1
    }
}

/// What a record must satisfy to be counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub place: String,
    pub columns: ColumnLayout,
    illustrated_values: Vec<String>,
}

impl Criteria {
    pub fn new<I, S>(place: impl Into<String>, columns: ColumnLayout, illustrated_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            place: place.into(),
            columns,
            illustrated_values: illustrated_values
                .into_iter()
                .map(|v| v.as_ref().trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }

    pub fn illustrated_values(&self) -> &[String] {
        &self.illustrated_values
    }

    /// Exact membership; `flag` must already be trimmed and lower-cased.
    pub fn is_illustrated(&self, flag: &str) -> bool {
        self.illustrated_values.iter().any(|v| v == flag)
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Self::new(DEFAULT_PLACE, ColumnLayout::default(), DEFAULT_ILLUSTRATED_VALUES)
    }
}

/// `part / whole * 100` with two decimals, exact halves rounded up
/// (`1/32` is "3.13"). A zero `whole` gives "0.00".
pub fn format_percentage(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.00".to_string();
    }
    let (part, whole) = (part as u128, whole as u128);
    let hundredths = (part * 20_000 + whole) / (2 * whole);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub illustrated: usize,
    pub percentage: String,
    pub error: Option<String>,
}

impl Summary {
    pub fn from_counts(total: usize, illustrated: usize) -> Self {
        Self {
            total,
            illustrated,
            percentage: format_percentage(illustrated, total),
            error: None,
        }
    }

    pub fn not_loaded() -> Self {
        Self {
            error: Some(DATA_NOT_LOADED_MESSAGE.to_string()),
            ..Self::from_counts(0, 0)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Split each line on every comma. No quoting.
    #[default]
    Simple,
    /// Honor double-quoted fields that contain commas.
    Quoted,
}
