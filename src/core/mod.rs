pub mod aggregator;
pub mod engine;
pub mod parser;
pub mod query;
pub mod report;

pub use crate::domain::model::{Criteria, DataState, Record, Summary, Table, YearBounds, YearQuery};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
