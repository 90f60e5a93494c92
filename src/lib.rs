pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use config::{cli::LocalStorage, http::HttpStorage, toml_config::TomlConfig, SourceStorage};
pub use core::{
    aggregator::analyze_manuscripts,
    engine::{Analysis, AnalysisEngine},
    parser::parse_table,
    query::parse_year_input,
};
pub use domain::model::{Criteria, DataState, QueryKind, Record, Summary, Table, YearBounds, YearQuery};
pub use utils::error::{AnalyzerError, Result};
