use crate::config::DEFAULT_DATA_FILE;
use crate::core::ConfigProvider;
use crate::domain::model::{
    ColumnLayout, Criteria, ParseMode, YearBounds, DEFAULT_ILLUSTRATED_VALUES, DEFAULT_PLACE,
    MAX_YEAR, MIN_YEAR,
};
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{
    validate_data_source, validate_distinct_columns, validate_non_empty_list,
    validate_non_empty_string, validate_ordered_bounds, validate_range, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Query input is three or four digits, so bounds outside this span can never match.
const YEAR_DIGITS_MIN: i64 = 100;
const YEAR_DIGITS_MAX: i64 = 9999;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub columns: ColumnLayout,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: String,
    pub parse_mode: ParseMode,
    pub check_header: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATA_FILE.to_string(),
            parse_mode: ParseMode::Simple,
            check_header: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub min_year: i64,
    pub max_year: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            min_year: MIN_YEAR,
            max_year: MAX_YEAR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub place: String,
    pub illustrated_values: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            place: DEFAULT_PLACE.to_string(),
            illustrated_values: DEFAULT_ILLUSTRATED_VALUES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_data_source("data.source", &self.data.source)?;
        validate_range("query.min_year", self.query.min_year, YEAR_DIGITS_MIN, YEAR_DIGITS_MAX)?;
        validate_range("query.max_year", self.query.max_year, YEAR_DIGITS_MIN, YEAR_DIGITS_MAX)?;
        validate_ordered_bounds("query", self.query.min_year, self.query.max_year)?;
        validate_non_empty_string("filter.place", &self.filter.place)?;
        validate_non_empty_list("filter.illustrated_values", &self.filter.illustrated_values)?;
        validate_distinct_columns("columns", &self.columns.indices())?;
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_source(&self) -> &str {
        &self.data.source
    }

    fn bounds(&self) -> YearBounds {
        YearBounds {
            min: self.query.min_year,
            max: self.query.max_year,
        }
    }

    fn criteria(&self) -> Criteria {
        Criteria::new(
            self.filter.place.clone(),
            self.columns,
            &self.filter.illustrated_values,
        )
    }

    fn parse_mode(&self) -> ParseMode {
        self.data.parse_mode
    }

    fn check_header(&self) -> bool {
        self.data.check_header
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
