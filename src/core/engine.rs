use crate::core::aggregator::analyze_manuscripts;
use crate::core::parser::parse_with_mode;
use crate::core::query::{interpret, interpret_as};
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{DataState, QueryKind, Summary, YearQuery};
use crate::utils::error::{AnalyzerError, Result};
use serde::Serialize;

/// One answered query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub query: YearQuery,
    pub summary: Summary,
}

/// Holds the manuscript table for a session and answers year queries against it.
pub struct AnalysisEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    data: DataState,
}

impl<S: Storage, C: ConfigProvider> AnalysisEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            data: DataState::NotLoaded,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn data(&self) -> &DataState {
        &self.data
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_loaded()
    }

    /// Fetch and parse the configured data source. Returns the number of records.
    pub async fn load(&mut self) -> Result<usize> {
        let location = self.config.data_source().to_string();
        tracing::debug!("Reading data source: {}", location);

        let bytes = self.storage.read_file(&location).await?;
        let text = String::from_utf8_lossy(&bytes);
        self.load_from(&location, &text)
    }

    pub fn load_text(&mut self, text: &str) -> Result<usize> {
        let location = self.config.data_source().to_string();
        self.load_from(&location, text)
    }

    fn load_from(&mut self, location: &str, text: &str) -> Result<usize> {
        let table = parse_with_mode(text, self.config.parse_mode())?;

        if self.config.check_header() {
            let required = self.config.criteria().columns.min_fields();
            let found = table.header_len().unwrap_or(0);
            if found < required {
                return Err(AnalyzerError::HeaderMismatchError {
                    source_name: location.to_string(),
                    found,
                    required,
                });
            }
        }

        self.data = DataState::from_table(table);
        let count = self.data.record_count();
        if self.data.is_loaded() {
            tracing::info!("Successfully loaded and parsed {} data rows", count);
        } else {
            tracing::warn!("Data source '{}' contains no data rows", location);
        }
        Ok(count)
    }

    /// Interpret `input` and run the aggregation over the loaded table.
    pub fn analyze(&self, input: &str) -> Result<Analysis> {
        self.analyze_as(input, None)
    }

    /// As [`analyze`](Self::analyze); with `Some(kind)` the input must be that form.
    pub fn analyze_as(&self, input: &str, kind: Option<QueryKind>) -> Result<Analysis> {
        let input = input.trim();
        let bounds = self.config.bounds();
        let query = match kind {
            Some(kind) => interpret_as(input, &bounds, kind)?,
            None => interpret(input, &bounds)?,
        };

        if !self.data.is_loaded() {
            return Err(AnalyzerError::DataNotLoadedError);
        }

        let summary = analyze_manuscripts(&self.data, &query, &self.config.criteria());

        tracing::debug!(
            "Query {}-{}: {} of {} illustrated",
            query.start(),
            query.end(),
            summary.illustrated,
            summary.total
        );
        Ok(Analysis { query, summary })
    }
}
