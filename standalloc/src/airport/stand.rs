//! Stand definitions as declared in an airport configuration.

use serde::{Deserialize, Deserializer};

/// Default stand radius in meters when the coordinates omit it.
pub const DEFAULT_STAND_RADIUS_M: f64 = 15.0;

/// One stand entry of an airport's `Stands` table.
///
/// Every eligibility field is optional; an absent field imposes no
/// constraint on the stand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StandDefinition {
    /// Stand name, taken from the key of the `Stands` object.
    #[serde(skip_deserializing)]
    pub name: String,

    /// Aircraft codes accepted by the stand; the flight's code must be a
    /// substring of this string.
    #[serde(rename = "Code", default)]
    pub code: Option<String>,

    /// Accepted usage categories, a string over `A`, `P`, `H`, `M`, `C`.
    #[serde(rename = "Use", default)]
    pub usage: Option<String>,

    /// Required Schengen status of the flight.
    #[serde(rename = "Schengen", default)]
    pub schengen: Option<bool>,

    /// Accepted two-letter origin prefixes.
    #[serde(rename = "Countries", default)]
    pub countries: Option<Vec<String>>,

    /// Accepted three-letter operator prefixes.
    #[serde(rename = "Callsigns", default)]
    pub callsigns: Option<Vec<String>>,

    /// Preference rank, lower preferred. Non-integer values count as absent.
    #[serde(rename = "Priority", default, deserialize_with = "deserialize_priority")]
    pub priority: Option<i64>,

    /// Apron stands are shared and never enter the occupancy ledgers.
    #[serde(rename = "Apron", default)]
    pub apron: Option<bool>,

    /// Stands excluded while this one is occupied.
    #[serde(rename = "Block", default)]
    pub block: Option<Vec<String>>,

    /// Position as `"lat:lon"` or `"lat:lon:radius"`.
    #[serde(rename = "Coordinates", default)]
    pub coordinates: Option<String>,
}

/// Parsed stand position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

impl StandDefinition {
    /// Create an unconstrained stand.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_use(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_schengen(mut self, schengen: bool) -> Self {
        self.schengen = Some(schengen);
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_callsigns<I, S>(mut self, callsigns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.callsigns = Some(callsigns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_apron(mut self, apron: bool) -> Self {
        self.apron = Some(apron);
        self
    }

    pub fn with_block<I, S>(mut self, block: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block = Some(block.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the stand is a shared apron position.
    pub fn is_apron(&self) -> bool {
        self.apron.unwrap_or(false)
    }

    /// Names blocked while this stand is occupied.
    pub fn blocked_names(&self) -> &[String] {
        self.block.as_deref().unwrap_or_default()
    }

    /// Highest character of the declared code, if any.
    ///
    /// A lower ceiling marks a more narrowly scoped stand.
    pub fn code_ceiling(&self) -> Option<char> {
        self.code.as_deref().and_then(|c| c.chars().max())
    }

    /// Parse the declared coordinates.
    pub fn position(&self) -> Option<StandPosition> {
        let raw = self.coordinates.as_deref()?;
        let mut parts = raw.split(':').map(str::trim);
        let latitude: f64 = parts.next()?.parse().ok()?;
        let longitude: f64 = parts.next()?.parse().ok()?;
        let radius_m = parts
            .next()
            .and_then(|r| r.parse::<f64>().ok())
            .unwrap_or(DEFAULT_STAND_RADIUS_M);

        (latitude.is_finite() && longitude.is_finite()).then_some(StandPosition {
            latitude,
            longitude,
            radius_m,
        })
    }
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}
