use time::OffsetDateTime;

/// One telemetry observation from a device, keyed by timestamp.
///
/// Measurements keep full source precision; rounding happens only when a
/// record is rendered into a response.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub ts: OffsetDateTime,
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// degrees
    pub wind_direction: f64,
    /// hPa
    pub air_pressure: f64,
    /// kWh
    pub consumption: f64,
}
