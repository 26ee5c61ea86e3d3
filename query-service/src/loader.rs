use std::{fs::File, io::Read, path::Path};

use csv::StringRecord;
use device_data::DeviceRecord;

use crate::profile::Profile;

/// CSV source for the device dataset.
///
/// Expected header columns (by name):
/// - date (timestamp in the active profile's format)
/// - temperature
/// - humidity
/// - wind_speed
/// - wind_direction
/// - air_pressure
/// - consumption
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to open data file '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Record(String),
}

fn record_to_device_record(
    record: &StringRecord,
    headers: &StringRecord,
    profile: Profile,
) -> Result<DeviceRecord, LoadError> {
    let get = |name: &str| -> Result<&str, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .ok_or_else(|| LoadError::Record(format!("missing column '{name}' in CSV record")))
    };

    let ts_str = get("date")?;
    let ts = profile
        .parse_ts(ts_str.trim())
        .map_err(|e| LoadError::Record(format!("invalid date '{ts_str}': {e}")))?;

    let number = |name: &str| -> Result<f64, LoadError> {
        let raw = get(name)?;
        raw.trim()
            .parse()
            .map_err(|e| LoadError::Record(format!("invalid {name} '{raw}': {e}")))
    };

    Ok(DeviceRecord {
        ts,
        temperature: number("temperature")?,
        humidity: number("humidity")?,
        wind_speed: number("wind_speed")?,
        wind_direction: number("wind_direction")?,
        air_pressure: number("air_pressure")?,
        consumption: number("consumption")?,
    })
}

pub fn load_records<R: Read>(reader: R, profile: Profile) -> Result<Vec<DeviceRecord>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record_to_device_record(&record, &headers, profile)?);
    }
    Ok(records)
}

pub fn load_from_path(path: &Path, profile: Profile) -> Result<Vec<DeviceRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    load_records(file, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const DAILY_CSV: &str = "\
date,temperature,humidity,wind_speed,wind_direction,air_pressure,consumption
2020-01-01,21.5,54.2,3.1,180.0,1013.2,12.7
2020-01-02,19.8,60.1,4.5,210.0,1009.8,14.3
";

    #[test]
    fn loads_daily_csv() {
        let records = load_records(DAILY_CSV.as_bytes(), Profile::Daily).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ts, datetime!(2020-01-01 00:00:00 UTC));
        assert_eq!(records[0].temperature, 21.5);
        assert_eq!(records[1].consumption, 14.3);
    }

    #[test]
    fn loads_datetime_csv() {
        let csv = "\
date,temperature,humidity,wind_speed,wind_direction,air_pressure,consumption
01/01/2020 06:30:00,21.5,54.2,3.1,180.0,1013.2,12.7
";
        let records = load_records(csv.as_bytes(), Profile::Datetime).unwrap();
        assert_eq!(records[0].ts, datetime!(2020-01-01 06:30:00 UTC));
    }

    #[test]
    fn rejects_timestamp_in_wrong_profile_format() {
        let res = load_records(DAILY_CSV.as_bytes(), Profile::Datetime);
        assert!(matches!(res, Err(LoadError::Record(_))));
    }

    #[test]
    fn rejects_non_numeric_measurement() {
        let csv = "\
date,temperature,humidity,wind_speed,wind_direction,air_pressure,consumption
2020-01-01,warm,54.2,3.1,180.0,1013.2,12.7
";
        let res = load_records(csv.as_bytes(), Profile::Daily);
        match res {
            Err(LoadError::Record(msg)) => assert!(msg.contains("temperature")),
            other => panic!("expected record error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_column() {
        let csv = "\
date,temperature,humidity,wind_speed,wind_direction,air_pressure
2020-01-01,21.5,54.2,3.1,180.0,1013.2
";
        let res = load_records(csv.as_bytes(), Profile::Daily);
        match res {
            Err(LoadError::Record(msg)) => assert!(msg.contains("consumption")),
            other => panic!("expected record error, got {other:?}"),
        }
    }
}
