//! Statistics data source.
//!
//! The dashboard needs exactly two snapshots. They are fetched one after the
//! other through the [`DataSource`] trait so the render pipeline can be driven
//! by a canned source in tests.

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::stats::{AggregateSnapshot, EntityRecord};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of the two statistics snapshots
#[cfg_attr(test, mockall::automock)]
pub trait DataSource {
    /// Fetch the global counters
    fn aggregate(&self) -> Result<AggregateSnapshot, FetchError>;

    /// Fetch the per-entity counters, in provider order
    fn entities(&self) -> Result<Vec<EntityRecord>, FetchError>;
}

/// Both snapshots, ready for formatting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshots {
    pub aggregate: AggregateSnapshot,
    pub entities: Vec<EntityRecord>,
}

/// Fetch the aggregate, then the entity list. The second request is not
/// issued when the first one fails.
pub fn load_snapshots(source: &dyn DataSource) -> Result<Snapshots, FetchError> {
    let aggregate = source.aggregate()?;
    let entities = source.entities()?;
    info!(entities = entities.len(), "statistics loaded");
    Ok(Snapshots {
        aggregate,
        entities,
    })
}

type JsonObject = serde_json::Map<String, serde_json::Value>;

fn decode_error(endpoint: &'static str) -> impl Fn(serde_json::Error) -> FetchError {
    move |source| FetchError::Decode { endpoint, source }
}

// Records only decode from JSON objects. Going through `Map` first keeps the
// derived impls from filling fields positionally out of an array.
fn decode_object<T: DeserializeOwned>(object: JsonObject) -> serde_json::Result<T> {
    serde_json::from_value(serde_json::Value::Object(object))
}

/// Decode the aggregate endpoint body
pub fn decode_aggregate(body: &str) -> Result<AggregateSnapshot, FetchError> {
    let object: JsonObject = serde_json::from_str(body).map_err(decode_error("aggregate"))?;
    decode_object(object).map_err(decode_error("aggregate"))
}

/// Decode the per-entity endpoint body
pub fn decode_entities(body: &str) -> Result<Vec<EntityRecord>, FetchError> {
    let objects: Vec<JsonObject> = serde_json::from_str(body).map_err(decode_error("entities"))?;
    objects
        .into_iter()
        .map(decode_object)
        .collect::<serde_json::Result<_>>()
        .map_err(decode_error("entities"))
}

/// HTTP implementation backed by a blocking reqwest client
pub struct HttpSource {
    client: Client,
    aggregate_url: String,
    entities_url: String,
}

impl HttpSource {
    /// Build the client; no request is made here.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            aggregate_url: config.aggregate_url(),
            entities_url: config.entities_url(),
        })
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = body.len(), elapsed_ms = started.elapsed().as_millis() as u64, "fetched");
        Ok(body)
    }
}

impl DataSource for HttpSource {
    fn aggregate(&self) -> Result<AggregateSnapshot, FetchError> {
        decode_aggregate(&self.get(&self.aggregate_url)?)
    }

    fn entities(&self) -> Result<Vec<EntityRecord>, FetchError> {
        decode_entities(&self.get(&self.entities_url)?)
    }
}
