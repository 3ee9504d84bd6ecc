// src/sensors.rs

//! Read-only sensor values derived from a station snapshot.

use serde::Serialize;

use crate::models::{StationConfig, StationRecord};
use crate::services::StationSnapshot;
use crate::utils::url::STATION_HOST;

const UNIQUE_ID_PREFIX: &str = "dansk_retursystem_pantstation";
const ATTRIBUTION: &str = "Data fra danskretursystem.dk";

/// The values exposed for every station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Drift,
    Message,
    Address,
    OpeningHours,
}

impl SensorKind {
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Drift,
        SensorKind::Message,
        SensorKind::Address,
        SensorKind::OpeningHours,
    ];

    fn key(&self) -> &'static str {
        match self {
            SensorKind::Drift => "drift",
            SensorKind::Message => "message",
            SensorKind::Address => "address",
            SensorKind::OpeningHours => "opening_hours",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SensorKind::Drift => "drift",
            SensorKind::Message => "besked",
            SensorKind::Address => "adresse",
            SensorKind::OpeningHours => "åbningstider",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SensorKind::Drift => "mdi:recycle",
            SensorKind::Message => "mdi:message-text",
            SensorKind::Address => "mdi:map-marker",
            SensorKind::OpeningHours => "mdi:clock-outline",
        }
    }

    fn value(&self, record: &StationRecord) -> Option<String> {
        match self {
            SensorKind::Drift => record.drift_state().map(|s| s.as_str().to_string()),
            SensorKind::Message => record.message().map(str::to_string),
            SensorKind::Address => record.address().map(str::to_string),
            SensorKind::OpeningHours => {
                let hours = record.opening_hours();
                (!hours.is_empty()).then(|| hours.join("\n"))
            }
        }
    }
}

/// Metadata attached to every reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorAttributes {
    pub url: String,
    pub source: &'static str,
    pub last_update: Option<String>,
    pub attribution: &'static str,
}

/// One sensor value for one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorReading {
    pub unique_id: String,
    pub name: String,
    pub kind: SensorKind,
    pub icon: &'static str,
    pub value: Option<String>,
    pub attributes: SensorAttributes,
}

/// All sensor readings for a station. Values are `None` until data arrives.
pub fn station_sensors(station: &StationConfig, snapshot: &StationSnapshot) -> Vec<SensorReading> {
    let slug = station.slug();
    let record = snapshot.record.as_deref();

    let attributes = SensorAttributes {
        url: record.map_or_else(|| station.url.clone(), |r| r.source_url().to_string()),
        source: STATION_HOST,
        last_update: record.map(|r| r.fetched_at().to_rfc3339()),
        attribution: ATTRIBUTION,
    };

    SensorKind::ALL
        .iter()
        .map(|kind| SensorReading {
            unique_id: format!("{UNIQUE_ID_PREFIX}_{slug}_{}", kind.key()),
            name: format!("Pantstation {} {}", station.name, kind.label()),
            kind: *kind,
            icon: kind.icon(),
            value: record.and_then(|r| kind.value(r)),
            attributes: attributes.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::parser::parse_station_page;

    const URL: &str = "https://danskretursystem.dk/pantstation/aarhus-syd/";

    fn station() -> StationConfig {
        StationConfig::new("Aarhus Syd", URL).unwrap()
    }

    #[test]
    fn test_sensors_without_data() {
        let readings = station_sensors(&station(), &StationSnapshot::default());

        assert_eq!(readings.len(), 4);
        assert!(readings.iter().all(|r| r.value.is_none()));
        assert_eq!(readings[0].attributes.url, URL);
        assert_eq!(readings[0].attributes.last_update, None);
        assert_eq!(
            readings[0].unique_id,
            "dansk_retursystem_pantstation_aarhus_syd_drift"
        );
        assert_eq!(readings[3].name, "Pantstation Aarhus Syd åbningstider");
    }

    #[test]
    fn test_sensors_with_record() {
        let html = "<p>Åben. Alt fungerer</p><h3>Adresse</h3><p>Butiksvej 5</p>\
                    <h3>Åbningstider</h3><p>Mandag: 08-20</p><p>Tirsdag: 08-20</p>";
        let fetched_at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        let record = parse_station_page(URL, html, fetched_at);
        let snapshot = StationSnapshot {
            record: Some(Arc::new(record)),
            last_success: Some(fetched_at),
            ..StationSnapshot::default()
        };

        let readings = station_sensors(&station(), &snapshot);
        let values: Vec<_> = readings.iter().map(|r| r.value.as_deref()).collect();
        assert_eq!(
            values,
            [
                Some("Åben"),
                Some("Alt fungerer"),
                Some("Butiksvej 5"),
                Some("Mandag: 08-20\nTirsdag: 08-20"),
            ]
        );
        assert_eq!(
            readings[1].attributes.last_update.as_deref(),
            Some("2026-03-02T08:00:00+00:00")
        );
        assert_eq!(readings[2].icon, "mdi:map-marker");
    }

    #[test]
    fn test_empty_opening_hours_is_absent() {
        let record = parse_station_page(URL, "<p>Lukket.</p>", Utc::now());
        let snapshot = StationSnapshot {
            record: Some(Arc::new(record)),
            ..StationSnapshot::default()
        };

        let readings = station_sensors(&station(), &snapshot);
        assert_eq!(readings[0].value.as_deref(), Some("Lukket"));
        assert_eq!(readings[3].value, None);
    }
}
