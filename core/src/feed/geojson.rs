use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::feed::record::EventRecord;
use crate::prelude::{SourceError, SourceResult};

/// Only the parts of a GeoJSON feature collection the map reads.
///
/// Every field is optional at the serde level so a missing field is reported
/// against the feature that lacks it instead of as a generic decode failure.
#[derive(Debug, Deserialize)]
struct RawCollection {
    features: Option<Vec<RawFeature>>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    properties: Option<RawProperties>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    place: Option<String>,
    mag: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Option<Vec<f64>>,
}

/// Parse a feed body into event records, preserving feed order.
pub fn parse_feed(bytes: &[u8]) -> SourceResult<Vec<EventRecord>> {
    let collection: RawCollection = serde_json::from_slice(bytes).map_err(malformed_json)?;
    validate(collection)
}

fn malformed_json(err: serde_json::Error) -> SourceError {
    warn!("feed body rejected: {}", err);
    SourceError::MalformedPayload(format!("invalid feature collection: {}", err))
}

fn validate(collection: RawCollection) -> SourceResult<Vec<EventRecord>> {
    let features = collection
        .features
        .ok_or_else(|| malformed("feed has no `features` array".into()))?;

    features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| to_record(index, feature))
        .collect()
}

fn to_record(index: usize, feature: RawFeature) -> SourceResult<EventRecord> {
    let properties = feature
        .properties
        .ok_or_else(|| missing(index, "properties"))?;
    let place = properties
        .place
        .ok_or_else(|| missing(index, "properties.place"))?;
    let magnitude = properties
        .mag
        .ok_or_else(|| missing(index, "properties.mag"))?;

    let coordinates = feature
        .geometry
        .and_then(|geometry| geometry.coordinates)
        .ok_or_else(|| missing(index, "geometry.coordinates"))?;
    if coordinates.len() < 2 {
        return Err(malformed(format!(
            "feature {} has {} coordinate(s), expected at least [lon, lat]",
            index,
            coordinates.len()
        )));
    }

    Ok(EventRecord {
        place,
        magnitude,
        longitude: coordinates[0],
        latitude: coordinates[1],
        id: feature.id.and_then(id_to_string),
        depth_km: coordinates.get(2).copied(),
    })
}

fn id_to_string(id: Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn missing(index: usize, field: &str) -> SourceError {
    malformed(format!("feature {} is missing `{}`", index, field))
}

fn malformed(message: String) -> SourceError {
    warn!("feed rejected: {}", message);
    SourceError::MalformedPayload(message)
}
