use crate::utils::error::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Source of "today". Sampled once per insight computation.
///
/// Calendar days are counted in `offset()`, so "today" and the day a digest
/// went out are compared in the same frame.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn offset(&self) -> FixedOffset;

    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset()).date_naive()
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn cycle_count(&self) -> usize;
    fn utc_offset(&self) -> FixedOffset;
}
