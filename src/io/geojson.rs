//! GeoJSON input and primitive JSON output.

use std::{fs, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::{feature::{normalize, Feature}, primitive::Primitive};

/// Parse GeoJSON bytes into a JSON value.
pub fn parse_geojson_value(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON bytes")
}

/// Parse GeoJSON bytes and normalize them into features.
pub fn parse_geojson(bytes: &[u8]) -> Result<Vec<Feature>> {
    Ok(normalize(&parse_geojson_value(bytes)?))
}

/// Read a GeoJSON file into a JSON value.
pub fn read_geojson_value(path: &Path) -> Result<Value> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::geojson] Failed to open GeoJSON file: {}", path.display()))?;
    parse_geojson_value(&bytes)
        .with_context(|| format!("[io::geojson] Failed to read GeoJSON from {}", path.display()))
}

/// Read a GeoJSON file and normalize it into features.
pub fn read_geojson(path: &Path) -> Result<Vec<Feature>> {
    Ok(normalize(&read_geojson_value(path)?))
}

/// Write primitives to a JSON file as an array.
pub fn write_primitives(path: &Path, primitives: &[Primitive]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("[io::geojson] Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, primitives)
        .with_context(|| format!("[io::geojson] Failed to write primitives to {}", path.display()))?;
    writer.flush()
        .with_context(|| format!("[io::geojson] Failed to write primitives to {}", path.display()))
}
