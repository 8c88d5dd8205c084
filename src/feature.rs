//! Typed GeoJSON features and the normalizer that flattens any top-level
//! GeoJSON object into an ordered list of them.

use std::fmt;

use anyhow::{anyhow, bail, Result};
use geo::Coord;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A closed ring or open line of lon/lat coordinates, as stored in the source.
pub type Ring = Vec<Coord<f64>>;

/// Supported GeoJSON geometry kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Coord<f64>),
    MultiPoint(Vec<Coord<f64>>),
    LineString(Ring),
    MultiLineString(Vec<Ring>),
    /// Index 0 is the outer ring, the rest are holes.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Parse a GeoJSON geometry object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let kind = value["type"].as_str()
            .ok_or_else(|| anyhow!("[feature] geometry has no type"))?;
        let coords = &value["coordinates"];

        Ok(match kind {
            "Point" => Self::Point(parse_coord(coords)?),
            "MultiPoint" => Self::MultiPoint(parse_line(coords)?),
            "LineString" => Self::LineString(parse_line(coords)?),
            "MultiLineString" => Self::MultiLineString(parse_rings(coords)?),
            "Polygon" => Self::Polygon(parse_rings(coords)?),
            "MultiPolygon" => Self::MultiPolygon(
                as_array(coords)?.iter()
                    .map(parse_rings)
                    .collect::<Result<_>>()?
            ),
            other => bail!("[feature] unsupported geometry type {other:?}"),
        })
    }

    /// The GeoJSON type name of this geometry.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::MultiPoint(_) => "MultiPoint",
            Self::LineString(_) => "LineString",
            Self::MultiLineString(_) => "MultiLineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

#[inline]
fn as_array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("[feature] expected an array of coordinates, found {value}"))
}

/// Parse a position `[lon, lat, ...]`; extra dimensions are ignored.
fn parse_coord(value: &Value) -> Result<Coord<f64>> {
    let pair = as_array(value)?;
    if pair.len() < 2 { bail!("[feature] position needs at least two numbers, found {value}") }
    let x = pair[0].as_f64().ok_or_else(|| anyhow!("[feature] longitude must be a number"))?;
    let y = pair[1].as_f64().ok_or_else(|| anyhow!("[feature] latitude must be a number"))?;
    Ok(Coord { x, y })
}

fn parse_line(value: &Value) -> Result<Ring> {
    as_array(value)?.iter().map(parse_coord).collect()
}

fn parse_rings(value: &Value) -> Result<Vec<Ring>> {
    as_array(value)?.iter().map(parse_line).collect()
}

/// The region a feature belongs to, taken from its `name` property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Region {
    Named(String),
    /// No usable `name` (missing, null, empty or not a string).
    #[default]
    Unnamed,
}

impl Region {
    /// Get the region name, if there is one.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Unnamed => None,
        }
    }
}

impl From<&str> for Region {
    fn from(name: &str) -> Self {
        if name.is_empty() { Self::Unnamed } else { Self::Named(name.to_string()) }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Unknown"))
    }
}

impl Serialize for Region {
    /// Serialized as the display name, so unnamed regions read "Unknown".
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Feature properties: the region name plus everything else, untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    pub region: Region,
    pub extra: Map<String, Value>,
}

impl Properties {
    /// Read properties from a GeoJSON `properties` member (object or null).
    pub fn from_json(value: &Value) -> Self {
        let mut extra = value.as_object().cloned().unwrap_or_default();
        let region = match extra.remove("name") {
            Some(Value::String(name)) => Region::from(name.as_str()),
            _ => Region::Unnamed,
        };
        Self { region, extra }
    }
}

/// A geometry together with its properties.
///
/// `geometry` is `None` when the source geometry is null, malformed or of a
/// kind that cannot be drawn; such features produce no primitives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Properties,
}

impl Feature {
    /// Build a feature from a geometry and properties.
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Self { geometry: Some(geometry), properties }
    }

    /// Read a GeoJSON `Feature` object.
    pub fn from_json(value: &Value) -> Self {
        Self {
            geometry: parse_geometry(&value["geometry"]),
            properties: Properties::from_json(&value["properties"]),
        }
    }
}

/// Parse a geometry member, logging and discarding anything unusable.
fn parse_geometry(value: &Value) -> Option<Geometry> {
    if value.is_null() { return None }
    Geometry::from_json(value)
        .map_err(|e| tracing::debug!("{e:#}"))
        .ok()
}

/// Flatten a GeoJSON object into an ordered sequence of features.
///
/// - `Feature` yields itself.
/// - `FeatureCollection` yields its `features`, in order.
/// - `GeometryCollection` yields each geometry with empty properties, in order.
/// - Anything else yields nothing.
pub fn normalize(json: &Value) -> Vec<Feature> {
    match json["type"].as_str() {
        Some("Feature") => vec![Feature::from_json(json)],
        Some("FeatureCollection") => json["features"].as_array()
            .map(|features| features.iter().map(Feature::from_json).collect())
            .unwrap_or_default(),
        Some("GeometryCollection") => json["geometries"].as_array()
            .map(|geometries| geometries.iter()
                .map(|geometry| Feature { geometry: parse_geometry(geometry), properties: Properties::default() })
                .collect())
            .unwrap_or_default(),
        other => {
            tracing::debug!("[normalize] ignoring top-level GeoJSON object of type {other:?}");
            Vec::new()
        }
    }
}
