pub mod cli;
pub mod http;
pub mod toml_config;

use crate::core::Storage;
use crate::utils::error::Result;
use crate::utils::validation::is_remote_location;
use cli::LocalStorage;
use http::HttpStorage;

pub const DEFAULT_DATA_FILE: &str = "insular_manuscripts_britain_700_1100.csv";

/// Storage picked from the shape of the data source location.
#[derive(Debug, Clone)]
pub enum SourceStorage {
    Local(LocalStorage),
    Http(HttpStorage),
}

impl SourceStorage {
    pub fn for_location(location: &str) -> Self {
        if is_remote_location(location) {
            SourceStorage::Http(HttpStorage::new())
        } else {
            SourceStorage::Local(LocalStorage::default())
        }
    }
}

impl Storage for SourceStorage {
    async fn read_file(&self, location: &str) -> Result<Vec<u8>> {
        match self {
            SourceStorage::Local(storage) => storage.read_file(location).await,
            SourceStorage::Http(storage) => storage.read_file(location).await,
        }
    }
}

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, OutputFormat};

#[cfg(feature = "cli")]
mod cli_args {
    use super::DEFAULT_DATA_FILE;
    use crate::core::ConfigProvider;
    use crate::domain::model::{Criteria, ParseMode, QueryKind, YearBounds};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_data_source, Validate};
    use clap::{ArgGroup, Parser, ValueEnum};

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        #[default]
        Text,
        Json,
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "insular-analyzer")]
    #[command(about = "Percentage of illustrated Insular manuscripts produced in Britain, 700-1100 CE")]
    #[command(group(
        ArgGroup::new("query_input")
            .args(["query", "year", "year_range"])
            .multiple(false)
    ))]
    pub struct CliConfig {
        /// A year (YYYY) or a year range (YYYY-YYYY)
        pub query: Option<String>,

        /// Analyze manuscripts for a specific year, e.g. 850
        #[arg(long, value_name = "YYYY")]
        pub year: Option<String>,

        /// Analyze manuscripts within a range of years, e.g. 700-799
        #[arg(long, value_name = "YYYY-YYYY")]
        pub year_range: Option<String>,

        /// Data file path or http(s) URL [default: insular_manuscripts_britain_700_1100.csv]
        #[arg(long)]
        pub data: Option<String>,

        /// TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, value_enum)]
        pub parse_mode: Option<ParseMode>,

        /// Fail when the header has fewer columns than the layout needs
        #[arg(long)]
        pub check_header: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        pub format: OutputFormat,

        /// List archives and catalogues for researching these manuscripts
        #[arg(long)]
        pub list_sources: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl CliConfig {
        pub fn query_input(&self) -> Option<&str> {
            self.query
                .as_deref()
                .or(self.year.as_deref())
                .or(self.year_range.as_deref())
        }

        /// The form `--year` or `--year-range` demands; a positional query may be either.
        pub fn expected_kind(&self) -> Option<QueryKind> {
            if self.year.is_some() {
                Some(QueryKind::Year)
            } else if self.year_range.is_some() {
                Some(QueryKind::Range)
            } else {
                None
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn data_source(&self) -> &str {
            self.data.as_deref().unwrap_or(DEFAULT_DATA_FILE)
        }

        fn bounds(&self) -> YearBounds {
            YearBounds::default()
        }

        fn criteria(&self) -> Criteria {
            Criteria::default()
        }

        fn parse_mode(&self) -> ParseMode {
            self.parse_mode.unwrap_or_default()
        }

        fn check_header(&self) -> bool {
            self.check_header
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_data_source("data", self.data_source())
        }
    }

}
