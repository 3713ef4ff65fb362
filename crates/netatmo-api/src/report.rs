//! Flattened, consumer-friendly station reports.
//!
//! [`massage`] is a pure mapping from the vendor's station/module tree to
//! one [`StationReport`] per station. A reading block only exists when a
//! module of the matching kind exists on the station; absent blocks and
//! absent leaf values are omitted from serialized output entirely, never
//! emitted as `null`.

use serde::Serialize;

use crate::types::{Module, ModuleKind, Place, Station};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressureReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumidityReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GustReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    pub gust: GustReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_angle: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_24: Option<f64>,
}

/// Flattened view of one station, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub station_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status_store: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    pub pressure: PressureReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<HumidityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<RainReport>,
}

/// Reshape the vendor's station array into flat reports.
///
/// Pure function: no I/O, no mutation of the input, output in input order.
pub fn massage(stations: &[Station]) -> Vec<StationReport> {
    stations.iter().map(station_report).collect()
}

fn station_report(station: &Station) -> StationReport {
    let dashboard = station.dashboard_data.as_ref();
    let temp_module = first_module_of(station, ModuleKind::TempHumidity);
    let wind_module = first_module_of(station, ModuleKind::Wind);
    let rain_module = first_module_of(station, ModuleKind::Rain);

    StationReport {
        station_name: station.station_name.clone(),
        last_status_store: station.last_status_store,
        place: station.place.clone(),
        pressure: PressureReport {
            value: dashboard.and_then(|d| d.pressure),
            trend: dashboard.and_then(|d| d.pressure_trend.clone()),
        },
        temperature: temp_module.map(|module| {
            let d = module.dashboard_data.as_ref();
            TemperatureReport {
                value: d.and_then(|d| d.temperature),
                min: d.and_then(|d| d.min_temp),
                max: d.and_then(|d| d.max_temp),
                trend: d.and_then(|d| d.temp_trend.clone()),
            }
        }),
        humidity: temp_module.map(|module| HumidityReport {
            value: module.dashboard_data.as_ref().and_then(|d| d.humidity),
        }),
        wind: wind_module.map(|module| {
            let d = module.dashboard_data.as_ref();
            WindReport {
                strength: d.and_then(|d| d.wind_strength),
                angle: d.and_then(|d| d.wind_angle),
                gust: GustReport {
                    strength: d.and_then(|d| d.gust_strength),
                    angle: d.and_then(|d| d.gust_angle),
                },
                max_strength: d.and_then(|d| d.max_wind_str),
                max_angle: d.and_then(|d| d.max_wind_angle),
            }
        }),
        rain: rain_module.map(|module| {
            let d = module.dashboard_data.as_ref();
            RainReport {
                value: d.and_then(|d| d.rain),
                sum_1: d.and_then(|d| d.sum_rain_1),
                sum_24: d.and_then(|d| d.sum_rain_24),
            }
        }),
    }
}

/// First module of the given kind, in vendor order.
fn first_module_of(station: &Station, kind: ModuleKind) -> Option<&Module> {
    station.modules.iter().find(|m| m.kind() == kind)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn station_from_json(value: serde_json::Value) -> Station {
        serde_json::from_value(value).unwrap()
    }

    fn module_json(module_type: &str, dashboard: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "_id": format!("70:ee:50:{module_type}"),
            "type": module_type,
            "dashboard_data": dashboard
        })
    }

    #[test]
    fn test_station_without_modules_gets_pressure_only() {
        let station = station_from_json(serde_json::json!({
            "station_name": "Home",
            "last_status_store": 1000,
            "dashboard_data": {"Pressure": 1013.0, "pressure_trend": "stable"},
            "modules": []
        }));

        let reports = massage(&[station]);

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.pressure.value, Some(1013.0));
        assert_eq!(report.pressure.trend.as_deref(), Some("stable"));
        assert!(report.temperature.is_none());
        assert!(report.humidity.is_none());
        assert!(report.wind.is_none());
        assert!(report.rain.is_none());
    }

    #[test]
    fn test_one_module_of_each_kind_yields_all_blocks() {
        let station = station_from_json(serde_json::json!({
            "station_name": "Home",
            "dashboard_data": {"Pressure": 1008.5},
            "modules": [
                module_json("NAModule1", serde_json::json!({
                    "Temperature": 18.2,
                    "Humidity": 61,
                    "min_temp": 12.1,
                    "max_temp": 22.9,
                    "temp_trend": "up"
                })),
                module_json("NAModule2", serde_json::json!({
                    "WindStrength": 14,
                    "WindAngle": 75,
                    "GustStrength": 28,
                    "GustAngle": 81,
                    "max_wind_str": 31,
                    "max_wind_angle": 90
                })),
                module_json("NAModule3", serde_json::json!({
                    "Rain": 0.2,
                    "sum_rain_1": 0.4,
                    "sum_rain_24": 3.7
                })),
            ]
        }));

        let reports = massage(&[station]);
        let report = &reports[0];

        let temperature = report.temperature.as_ref().unwrap();
        assert_eq!(temperature.value, Some(18.2));
        assert_eq!(temperature.min, Some(12.1));
        assert_eq!(temperature.max, Some(22.9));
        assert_eq!(temperature.trend.as_deref(), Some("up"));
        assert_eq!(report.humidity.as_ref().unwrap().value, Some(61.0));

        let wind = report.wind.as_ref().unwrap();
        assert_eq!(wind.strength, Some(14.0));
        assert_eq!(wind.angle, Some(75.0));
        assert_eq!(wind.gust.strength, Some(28.0));
        assert_eq!(wind.gust.angle, Some(81.0));
        assert_eq!(wind.max_strength, Some(31.0));
        assert_eq!(wind.max_angle, Some(90.0));

        let rain = report.rain.as_ref().unwrap();
        assert_eq!(rain.value, Some(0.2));
        assert_eq!(rain.sum_1, Some(0.4));
        assert_eq!(rain.sum_24, Some(3.7));
    }

    #[test]
    fn test_first_module_of_a_kind_wins() {
        let station = station_from_json(serde_json::json!({
            "station_name": "Home",
            "modules": [
                module_json("NAModule3", serde_json::json!({"Rain": 1.0})),
                module_json("NAModule3", serde_json::json!({"Rain": 9.0})),
            ]
        }));

        let reports = massage(&[station]);

        assert_eq!(reports[0].rain.as_ref().unwrap().value, Some(1.0));
    }

    #[test]
    fn test_massage_is_pure_and_order_preserving() {
        let stations = vec![
            station_from_json(serde_json::json!({"station_name": "A"})),
            station_from_json(serde_json::json!({"station_name": "B"})),
        ];
        let before = stations.clone();

        let first = massage(&stations);
        let second = massage(&stations);

        assert_eq!(first, second);
        assert_eq!(stations, before);
        assert_eq!(first[0].station_name, "A");
        assert_eq!(first[1].station_name, "B");
    }

    #[test]
    fn test_module_without_dashboard_data_yields_empty_block() {
        let station = station_from_json(serde_json::json!({
            "station_name": "Home",
            "modules": [{"type": "NAModule1"}]
        }));

        let reports = massage(&[station]);
        let report = &reports[0];

        // The block exists (the module exists) but carries no readings.
        let temperature = report.temperature.as_ref().unwrap();
        assert_eq!(temperature.value, None);
        assert_eq!(report.humidity.as_ref().unwrap().value, None);
    }

    #[test]
    fn test_serialized_report_omits_absent_blocks_and_leaves() {
        let station = station_from_json(serde_json::json!({
            "station_name": "Home",
            "last_status_store": 1000,
            "place": {"altitude": 30, "city": "Paris", "country": "FR",
                      "timezone": "Europe/Paris", "location": [2.35, 48.85]},
            "dashboard_data": {"Pressure": 1013.0, "pressure_trend": "stable"},
            "modules": [
                module_json("NAModule1", serde_json::json!({
                    "Temperature": 21.5,
                    "Humidity": 55
                })),
            ]
        }));

        let reports = massage(&[station]);
        let json = serde_json::to_value(&reports).unwrap();
        let report = &json[0];

        assert_eq!(report["station_name"], "Home");
        assert_eq!(report["last_status_store"], 1000);
        assert_eq!(report["place"]["city"], "Paris");
        assert_eq!(report["pressure"]["value"], 1013.0);
        assert_eq!(report["pressure"]["trend"], "stable");
        assert_eq!(report["temperature"]["value"], 21.5);
        assert_eq!(report["humidity"]["value"], 55.0);

        // Structural absence: no key at all, not a null.
        assert!(report["temperature"].get("min").is_none());
        assert!(report["temperature"].get("max").is_none());
        assert!(report["temperature"].get("trend").is_none());
        assert!(report.get("wind").is_none());
        assert!(report.get("rain").is_none());
    }
}
