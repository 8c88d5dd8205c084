//! Readers and writers for the file formats the pipeline touches.
//!
//! # Format Modules
//!
//! - `csv` - CSV region value tables (headerless or keyword-selected column)
//! - `geojson` - GeoJSON input and JSON output of the drawn primitives

pub mod csv;
pub mod geojson;
