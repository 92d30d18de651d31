//! Per-airport stand configuration documents.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::error::AirportConfigError;
use super::stand::StandDefinition;

/// Stand configuration of one airport, loaded from `<ICAO>.json`.
///
/// The `Stands` table keeps the declaration order of the source document;
/// the allocation tie-break depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportConfig {
    icao: String,
    version: Option<String>,
    coordinates: Option<String>,
    stands: Option<Vec<StandDefinition>>,
}

#[derive(Deserialize)]
struct RawAirportConfig {
    #[serde(default, deserialize_with = "deserialize_version")]
    version: Option<String>,
    #[serde(rename = "Coordinates", default)]
    coordinates: Option<String>,
    #[serde(rename = "Stands", default, deserialize_with = "deserialize_stands")]
    stands: Option<Vec<StandDefinition>>,
}

impl AirportConfig {
    /// Build a configuration directly from stand definitions.
    pub fn new(icao: &str, stands: Vec<StandDefinition>) -> Self {
        Self {
            icao: icao.to_uppercase(),
            version: None,
            coordinates: None,
            stands: Some(stands),
        }
    }

    /// Build a configuration without a `Stands` section.
    pub fn without_stands(icao: &str) -> Self {
        Self {
            icao: icao.to_uppercase(),
            version: None,
            coordinates: None,
            stands: None,
        }
    }

    /// Set the document version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parse a configuration document.
    pub fn from_json_str(icao: &str, json: &str) -> Result<Self, AirportConfigError> {
        let raw: RawAirportConfig = serde_json::from_str(json)?;
        Ok(Self {
            icao: icao.to_uppercase(),
            version: raw.version,
            coordinates: raw.coordinates,
            stands: raw.stands,
        })
    }

    /// Read and parse a configuration file.
    pub fn from_path<P: AsRef<Path>>(icao: &str, path: P) -> Result<Self, AirportConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AirportConfigError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(icao, &text)
    }

    /// Upper-case ICAO code.
    pub fn icao(&self) -> &str {
        &self.icao
    }

    /// Document version, compared to detect changed files.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Airport reference position as `(lat, lon)`.
    pub fn position(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.coordinates.as_deref()?.split_once(':')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.split(':').next()?.trim().parse().ok()?;
        (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
    }

    /// Ordered stand table, or `None` when the document has no `Stands` section.
    pub fn stands(&self) -> Option<&[StandDefinition]> {
        self.stands.as_deref()
    }

    /// Look up a stand by name.
    pub fn stand(&self, name: &str) -> Option<&StandDefinition> {
        self.stands()?.iter().find(|s| s.name == name)
    }
}

fn deserialize_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn deserialize_stands<'de, D>(deserializer: D) -> Result<Option<Vec<StandDefinition>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StandsVisitor;

    impl<'de> Visitor<'de> for StandsVisitor {
        type Value = Vec<StandDefinition>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping stand names to stand definitions")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut stands: Vec<StandDefinition> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, mut stand)) = map.next_entry::<String, StandDefinition>()? {
                stand.name = name;
                // A repeated key replaces the earlier entry in place.
                match stands.iter_mut().find(|s| s.name == stand.name) {
                    Some(existing) => *existing = stand,
                    None => stands.push(stand),
                }
            }
            Ok(stands)
        }
    }

    // `"Stands": null` reads the same as an absent section.
    struct OptionalStandsVisitor;

    impl<'de> Visitor<'de> for OptionalStandsVisitor {
        type Value = Option<Vec<StandDefinition>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a stand table or null")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_map(StandsVisitor).map(Some)
        }
    }

    deserializer.deserialize_option(OptionalStandsVisitor)
}
