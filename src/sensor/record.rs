//! Sensor record files.
//!
//! One JSON object per file:
//!
//! ```json
//! {
//!   "name": "kitchen",
//!   "sensor": "C4:7C:8D:6A:3E:1F",
//!   "parameter": { "max_soil_moist": 60, "min_soil_moist": 15 }
//! }
//! ```
//!
//! Every threshold in `parameter` is optional and defaults to zero.

use std::ffi::OsStr;

use serde::Deserialize;
use serde::de::{self, Unexpected};
use serde_json::{Map, Value};

use super::{RecordError, Sensor, Thresholds};

/// File suffix identifying sensor records inside the sensor directory.
pub const RECORD_SUFFIX: &str = ".json";

#[derive(Debug, Deserialize)]
struct SensorRecord {
    #[serde(default)]
    name: String,

    #[serde(default)]
    sensor: String,

    #[serde(default)]
    parameter: ParameterSection,
}

#[derive(Debug, Default, Deserialize)]
struct ParameterSection {
    #[serde(default)]
    max_soil_moist: i64,
    #[serde(default)]
    min_soil_moist: i64,
    #[serde(default)]
    max_soil_ec: i64,
    #[serde(default)]
    min_soil_ec: i64,
    #[serde(default)]
    max_light_lux: i64,
    #[serde(default)]
    min_light_lux: i64,
}

impl From<ParameterSection> for Thresholds {
    fn from(p: ParameterSection) -> Self {
        Self {
            max_soil_moist: p.max_soil_moist,
            min_soil_moist: p.min_soil_moist,
            max_soil_ec: p.max_soil_ec,
            min_soil_ec: p.min_soil_ec,
            max_light_lux: p.max_light_lux,
            min_light_lux: p.min_light_lux,
        }
    }
}

/// Decodes one sensor from the contents of a record file.
///
/// # Errors
///
/// Returns [`RecordError::Decode`] for malformed JSON or an unexpected
/// shape, and [`RecordError::MissingAddress`] when `sensor` is absent or
/// blank.
pub fn decode_record(content: &str) -> Result<Sensor, RecordError> {
    let value: Value = serde_json::from_str(content).map_err(RecordError::Decode)?;
    let record = to_record(value).map_err(RecordError::Decode)?;

    if record.sensor.trim().is_empty() {
        return Err(RecordError::MissingAddress);
    }

    Ok(Sensor::new(record.name, record.sensor).with_thresholds(record.parameter.into()))
}

/// Returns true if a file name denotes a sensor record.
#[must_use]
pub fn is_record_name(file_name: &OsStr) -> bool {
    file_name
        .as_encoded_bytes()
        .ends_with(RECORD_SUFFIX.as_bytes())
}

// Derived struct impls also accept JSON arrays; records and their
// `parameter` section must be objects.
fn to_record(value: Value) -> Result<SensorRecord, serde_json::Error> {
    let mut map = expect_object(value, "a sensor record object")?;
    if let Some(parameter) = map.remove("parameter") {
        let parameter = expect_object(parameter, "a parameter object")?;
        map.insert("parameter".to_string(), Value::Object(parameter));
    }
    serde_json::from_value(Value::Object(map))
}

fn expect_object(
    value: Value,
    expected: &'static str,
) -> Result<Map<String, Value>, serde_json::Error> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(de::Error::invalid_type(unexpected(&other), &expected)),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
