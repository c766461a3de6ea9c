//! Statistics snapshots delivered by the data source.
//!
//! Both record types decode leniently: absent, `null` or zero counters all
//! become zero, and unknown fields are ignored. Daily deltas and `active` are
//! signed since the provider publishes corrections as negative values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Global counters for the whole data set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSnapshot {
    /// Last update, milliseconds since the Unix epoch
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_cases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_deaths: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affected_countries: u64,
}

/// Counters for a single country or territory
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    #[serde(default, rename = "country", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_cases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_deaths: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered_per_one_million: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical_per_one_million: f64,
    #[serde(default, rename = "countryInfo", deserialize_with = "null_as_default")]
    pub info: EntityInfo,
}

/// Identity block nested in every entity record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EntityInfo {
    #[serde(default, rename = "_id", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub iso2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub iso3: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flag: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Percentage of `part` in `whole`, or `None` when `whole` is zero
pub fn percentage(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(part as f64 / whole as f64 * 100.0)
}

/// Format a percentage with two decimals, `n/a` when undefined
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => "n/a".to_string(),
    }
}

impl AggregateSnapshot {
    /// Infection fatality rate: deaths over total cases
    pub fn ifr(&self) -> Option<f64> {
        percentage(self.deaths, self.cases)
    }

    /// Case fatality rate: deaths over resolved cases
    pub fn cfr(&self) -> Option<f64> {
        percentage(self.deaths, self.recovered.saturating_add(self.deaths))
    }

    /// Share of cases currently in critical condition
    pub fn critical_share(&self) -> Option<f64> {
        percentage(self.critical, self.cases)
    }

    /// Time of the last upstream update, if the service reported one
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        if self.updated <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.updated)
    }
}

impl EntityRecord {
    /// Deaths over total cases for this entity
    pub fn mortality(&self) -> Option<f64> {
        percentage(self.deaths, self.cases)
    }
}
