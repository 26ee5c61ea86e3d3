use time::{Date, Duration, OffsetDateTime};

use crate::domain::DeviceRecord;

/// Summary of the loaded dataset: its inclusive time span and record count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metadata {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub total_records: usize,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TableError {
    #[error("table must contain at least one record")]
    Empty,
    #[error("duplicate timestamp {0}")]
    DuplicateTimestamp(OffsetDateTime),
    #[error("no data for the requested day")]
    NotFound,
    #[error("requested range extends beyond the loaded data span")]
    OutOfBounds {
        min: OffsetDateTime,
        max: OffsetDateTime,
    },
}

/// Immutable collection of device records, sorted ascending by timestamp and
/// unique by timestamp. Built once at startup and shared read-only for the
/// process lifetime; both lookups are binary-search-bounded slices.
#[derive(Debug, Clone)]
pub struct DeviceDataTable {
    records: Vec<DeviceRecord>,
}

impl DeviceDataTable {
    /// Builds the table from loaded records, sorting by timestamp. Rejects
    /// empty input and duplicate timestamps; either is fatal at startup.
    pub fn new(mut records: Vec<DeviceRecord>) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }
        records.sort_by_key(|r| r.ts);
        if let Some(pair) = records.windows(2).find(|pair| pair[0].ts == pair[1].ts) {
            return Err(TableError::DuplicateTimestamp(pair[0].ts));
        }
        Ok(Self { records })
    }

    pub fn min_ts(&self) -> OffsetDateTime {
        self.records[0].ts
    }

    pub fn max_ts(&self) -> OffsetDateTime {
        self.records[self.records.len() - 1].ts
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            start: self.min_ts(),
            end: self.max_ts(),
            total_records: self.records.len(),
        }
    }

    /// All records whose timestamp falls on the given calendar day (UTC),
    /// ascending. A day with no records is `NotFound`, whether it lies inside
    /// or outside the loaded span.
    pub fn lookup_day(&self, day: Date) -> Result<&[DeviceRecord], TableError> {
        let start = day.midnight().assume_utc();
        let end = start + Duration::days(1);
        let lo = self.records.partition_point(|r| r.ts < start);
        let hi = self.records.partition_point(|r| r.ts < end);
        if lo == hi {
            return Err(TableError::NotFound);
        }
        Ok(&self.records[lo..hi])
    }

    /// Records with `from <= ts <= to`, ascending. Both bounds must lie
    /// within the loaded span; a bounded sub-range that matches no record is
    /// an empty slice, not an error.
    pub fn lookup_range(
        &self,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<&[DeviceRecord], TableError> {
        let (min, max) = (self.min_ts(), self.max_ts());
        if from < min || to > max {
            return Err(TableError::OutOfBounds { min, max });
        }
        if from > to {
            return Ok(&[]);
        }
        let lo = self.records.partition_point(|r| r.ts < from);
        let hi = self.records.partition_point(|r| r.ts <= to);
        Ok(&self.records[lo..hi])
    }
}
