mod error;

pub use error::ApiError;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use device_data::{DeviceDataTable, DeviceRecord, TableError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::profile::{self, Profile};

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<DeviceDataTable>,
    pub profile: Profile,
}

/// Builds the HTTP surface for the active profile. `/api/data_info` is always
/// present; which lookup endpoint exists depends on the profile.
pub fn router(state: AppState) -> Router {
    let router = Router::new().route("/api/data_info", get(get_data_info));
    let router = match state.profile {
        Profile::Daily => router.route("/api/get_data_by_date", get(get_data_by_date)),
        Profile::Datetime => router.route("/api/get_data_range", get(get_data_range)),
    };
    router.with_state(state)
}

async fn get_data_info(State(state): State<AppState>) -> Json<Value> {
    metrics::counter!("data_info_requests_total").increment(1);

    let meta = state.table.metadata();
    Json(json!({
        "data_range": {
            "start": state.profile.render_ts(meta.start),
            "end": state.profile.render_ts(meta.end),
        },
        "total_records": meta.total_records,
    }))
}

#[derive(Debug, Deserialize)]
struct DateParams {
    date: String,
}

async fn get_data_by_date(
    State(state): State<AppState>,
    Query(params): Query<DateParams>,
) -> Result<Json<Value>, ApiError> {
    metrics::counter!("data_by_date_requests_total").increment(1);

    let day = profile::parse_day(&params.date).map_err(|_| ApiError::InvalidFormat {
        what: "date",
        expected: profile::DAY_FORMAT_HINT,
    })?;

    let records = match state.table.lookup_day(day) {
        Ok(records) => records,
        Err(TableError::NotFound) => return Err(ApiError::NotFound),
        Err(other) => return Err(ApiError::Internal(other.to_string())),
    };

    // Day-granularity data has one record per day, rendered as a single flat
    // object. Finer-grained data renders as an ordered list.
    let data = if records.len() == 1 {
        render_measurements(&records[0])
    } else {
        Value::Array(records.iter().map(render_measurements).collect())
    };

    Ok(Json(json!({ "date": params.date, "data": data })))
}

#[derive(Debug, Deserialize)]
struct RangeParams {
    from_datetime: String,
    to_datetime: String,
}

async fn get_data_range(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Value>, ApiError> {
    metrics::counter!("data_range_requests_total").increment(1);

    let invalid = || ApiError::InvalidFormat {
        what: "datetime",
        expected: state.profile.format_hint(),
    };
    let from = state
        .profile
        .parse_ts(&params.from_datetime)
        .map_err(|_| invalid())?;
    let to = state
        .profile
        .parse_ts(&params.to_datetime)
        .map_err(|_| invalid())?;

    let records = match state.table.lookup_range(from, to) {
        Ok(records) => records,
        Err(TableError::OutOfBounds { min, max }) => {
            return Err(ApiError::OutOfBounds {
                min: state.profile.render_ts(min),
                max: state.profile.render_ts(max),
            })
        }
        Err(other) => return Err(ApiError::Internal(other.to_string())),
    };

    let data: Vec<Value> = records
        .iter()
        .map(|r| render_record(r, state.profile))
        .collect();

    Ok(Json(json!({
        "from_datetime": params.from_datetime,
        "to_datetime": params.to_datetime,
        "data": data,
    })))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn render_measurements(r: &DeviceRecord) -> Value {
    json!({
        "temperature": round2(r.temperature),
        "humidity": round2(r.humidity),
        "wind_speed": round2(r.wind_speed),
        "wind_direction": round2(r.wind_direction),
        "air_pressure": round2(r.air_pressure),
        "consumption": round2(r.consumption),
    })
}

fn render_record(r: &DeviceRecord, profile: Profile) -> Value {
    json!({
        "datetime": profile.render_ts(r.ts),
        "temperature": round2(r.temperature),
        "humidity": round2(r.humidity),
        "wind_speed": round2(r.wind_speed),
        "wind_direction": round2(r.wind_direction),
        "air_pressure": round2(r.air_pressure),
        "consumption": round2(r.consumption),
    })
}
