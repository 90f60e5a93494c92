use crate::domain::model::{Criteria, ParseMode, YearBounds};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, location: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_source(&self) -> &str;
    fn bounds(&self) -> YearBounds;
    fn criteria(&self) -> Criteria;
    fn parse_mode(&self) -> ParseMode;
    fn check_header(&self) -> bool;
}
