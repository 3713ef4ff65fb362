//! Typed view of the Netatmo station-data payload.
//!
//! Every reading is optional: the vendor populates `dashboard_data` fields
//! depending on the module type, and an unreachable module may omit the bag
//! entirely. Absent fields deserialize to `None` instead of faulting.

use serde::{Deserialize, Serialize};

/// Current sensor readings attached to a station or module.
///
/// Field names follow the vendor's wire format (mixed casing included).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardData {
    pub time_utc: Option<i64>,
    #[serde(rename = "Pressure")]
    pub pressure: Option<f64>,
    #[serde(rename = "AbsolutePressure")]
    pub absolute_pressure: Option<f64>,
    pub pressure_trend: Option<String>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "Humidity")]
    pub humidity: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub date_min_temp: Option<i64>,
    pub date_max_temp: Option<i64>,
    pub temp_trend: Option<String>,
    #[serde(rename = "Rain")]
    pub rain: Option<f64>,
    pub sum_rain_1: Option<f64>,
    pub sum_rain_24: Option<f64>,
    #[serde(rename = "WindStrength")]
    pub wind_strength: Option<f64>,
    #[serde(rename = "WindAngle")]
    pub wind_angle: Option<f64>,
    #[serde(rename = "GustStrength")]
    pub gust_strength: Option<f64>,
    #[serde(rename = "GustAngle")]
    pub gust_angle: Option<f64>,
    pub max_wind_str: Option<f64>,
    pub max_wind_angle: Option<f64>,
    pub date_max_wind_str: Option<i64>,
}

/// Where a station is installed. Passed through to the output verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Longitude/latitude pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<[f64; 2]>,
}

/// Sensor module categories relevant to the flattened output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// NAModule1: outdoor temperature/humidity sensor.
    TempHumidity,
    /// NAModule2: wind gauge.
    Wind,
    /// NAModule3: rain gauge.
    Rain,
    /// Any other module type (indoor modules, thermostats, ...).
    Other,
}

impl ModuleKind {
    /// Map a vendor type tag to a module category.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "NAModule1" => Self::TempHumidity,
            "NAModule2" => Self::Wind,
            "NAModule3" => Self::Rain,
            _ => Self::Other,
        }
    }
}

/// A sensor unit attached to a base station.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Module {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(default)]
    pub data_type: Vec<String>,
    pub reachable: Option<bool>,
    pub last_message: Option<i64>,
    pub last_seen: Option<i64>,
    pub dashboard_data: Option<DashboardData>,
}

impl Module {
    pub fn kind(&self) -> ModuleKind {
        ModuleKind::from_tag(&self.module_type)
    }
}

/// A physical base unit together with its attached modules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    pub station_name: String,
    pub last_status_store: Option<i64>,
    pub favorite: Option<bool>,
    pub read_only: Option<bool>,
    pub place: Option<Place>,
    pub dashboard_data: Option<DashboardData>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// Successful response from the OAuth2 token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Top-level shape of the station-data response.
#[derive(Debug, Deserialize)]
pub(crate) struct StationsResponse {
    #[serde(default)]
    pub devices: Vec<Station>,
}
