//! Earthquake records decoded from the USGS FDSN event feed.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Deserialize;

use super::geo::LngLat;

/// The properties of a single earthquake, as shown in the detail panel.
///
/// Magnitude presence is explicit: the feed reports `null` for events whose
/// magnitude has not been computed yet, which is different from a genuine
/// magnitude of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Quake {
    pub title: String,
    pub magnitude: Option<f64>,
    /// Event origin time, milliseconds since the Unix epoch.
    pub time_ms: i64,
    /// USGS tsunami flag (1 when the event is in an oceanic region large
    /// enough to warrant a tsunami bulletin).
    pub tsunami: i64,
}

/// Visual severity tier of the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Magnitude up to and including 2 (or unknown)
    Minor,
    /// Magnitude strictly between 2 and 4
    Moderate,
    /// Magnitude 4 or above
    Strong,
}

impl Quake {
    pub fn severity(&self) -> Severity {
        match self.magnitude {
            Some(m) if m >= 4.0 => Severity::Strong,
            Some(m) if m > 2.0 => Severity::Moderate,
            _ => Severity::Minor,
        }
    }

    pub fn has_tsunami_flag(&self) -> bool {
        self.tsunami != 0
    }

    /// Origin time as a clock string in the local timezone, e.g. `10:13:20 PM`.
    pub fn local_time_string(&self) -> String {
        format_clock_time(self.time_ms, &Local)
    }
}

/// Format epoch milliseconds as an English-locale clock time in `tz`.
///
/// Out-of-range timestamps render as an empty string.
pub fn format_clock_time<Tz>(time_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::<Utc>::from_timestamp_millis(time_ms) {
        Some(utc) => utc.with_timezone(tz).format("%-I:%M:%S %p").to_string(),
        None => String::new(),
    }
}

/// An earthquake positioned on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakePoint {
    pub id: String,
    pub quake: Quake,
    pub center: LngLat,
}

// Wire types for the GeoJSON FeatureCollection returned by the feed.

#[derive(Debug, Deserialize)]
pub struct FeedCollection {
    #[serde(default)]
    pub features: Vec<FeedFeature>,
}

#[derive(Debug, Deserialize)]
pub struct FeedFeature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: FeedProperties,
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedProperties {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub tsunami: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl FeedCollection {
    /// Convert to map points, skipping features without usable coordinates.
    pub fn into_points(self) -> Vec<EarthquakePoint> {
        self.features
            .into_iter()
            .enumerate()
            .filter_map(|(index, feature)| {
                let center = feature
                    .geometry
                    .as_ref()
                    .and_then(|g| LngLat::from_position(&g.coordinates))?;
                let props = feature.properties;
                Some(EarthquakePoint {
                    id: feature.id.unwrap_or_else(|| format!("quake-{}", index)),
                    quake: Quake {
                        title: props.title.unwrap_or_default(),
                        magnitude: props.mag,
                        time_ms: props.time.unwrap_or_default(),
                        tsunami: props.tsunami.unwrap_or_default(),
                    },
                    center,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"count": 3},
        "features": [
            {"type": "Feature", "id": "nc1",
             "properties": {"mag": 3.2, "title": "M 3.2 - 5km N of X", "time": 1700000000000, "tsunami": 0},
             "geometry": {"type": "Point", "coordinates": [-122.1, 37.5, 8.0]}},
            {"type": "Feature", "id": "nc2",
             "properties": {"mag": null, "title": "Unknown", "time": 1700000001000, "tsunami": 1},
             "geometry": {"type": "Point", "coordinates": [-121.0, 36.0]}},
            {"type": "Feature", "id": "broken",
             "properties": {"mag": 1.0},
             "geometry": null}
        ]
    }"#;

    #[test]
    fn test_decode_feed_skips_missing_geometry() {
        let feed: FeedCollection = serde_json::from_str(SAMPLE).unwrap();
        let points = feed.into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].id, "nc1");
        assert_eq!(points[0].quake.magnitude, Some(3.2));
        assert_eq!(points[0].center, LngLat::new(-122.1, 37.5));
        assert_eq!(points[1].quake.magnitude, None);
        assert!(points[1].quake.has_tsunami_flag());
    }

    #[test]
    fn test_severity_tiers() {
        let mut quake = Quake {
            title: String::new(),
            magnitude: Some(2.0),
            time_ms: 0,
            tsunami: 0,
        };
        assert_eq!(quake.severity(), Severity::Minor);
        quake.magnitude = Some(2.1);
        assert_eq!(quake.severity(), Severity::Moderate);
        quake.magnitude = Some(3.99);
        assert_eq!(quake.severity(), Severity::Moderate);
        quake.magnitude = Some(4.0);
        assert_eq!(quake.severity(), Severity::Strong);
        quake.magnitude = None;
        assert_eq!(quake.severity(), Severity::Minor);
    }

    #[test]
    fn test_format_clock_time_utc() {
        assert_eq!(format_clock_time(1_700_000_000_000, &Utc), "10:13:20 PM");
        assert_eq!(format_clock_time(0, &Utc), "12:00:00 AM");
    }
}
