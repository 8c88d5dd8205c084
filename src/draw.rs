//! Turns normalized features into globe primitives.

use anyhow::{Context, Result};
use geo::Coord;
use serde_json::Value;

use crate::{
    color::{ColorScale, Rgb},
    config::GlobeConfig,
    feature::{normalize, Feature, Geometry, Region, Ring},
    geom::{densify_line, project, triangulate},
    primitive::{Primitive, PrimitiveSink, Shape, Summary},
    values::RegionValues,
};

/// Draws features onto a globe, coloring each region by its value.
pub struct Painter<'a, C: ColorScale + ?Sized> {
    config: &'a GlobeConfig,
    values: &'a RegionValues,
    colors: &'a C,
}

/// Per-feature metadata stamped on every primitive it produces.
struct Style {
    region: Region,
    value: f64,
    color: Rgb,
}

impl<'a, C: ColorScale + ?Sized> Painter<'a, C> {
    /// Fails if `config` does not pass [`GlobeConfig::validate`].
    pub fn new(config: &'a GlobeConfig, values: &'a RegionValues, colors: &'a C) -> Result<Self> {
        config.validate().context("[paint] Invalid drawing parameters")?;
        Ok(Self { config, values, colors })
    }

    /// Normalize a GeoJSON object and draw all of its features.
    pub fn paint(&self, json: &Value) -> Vec<Primitive> {
        let mut primitives = Vec::new();
        self.paint_features(&normalize(json), &mut primitives);
        let summary = Summary::of(&primitives);
        tracing::info!(
            "[paint] {} particles, {} polylines, {} meshes ({} triangles)",
            summary.particles, summary.polylines, summary.meshes, summary.triangles
        );
        primitives
    }

    /// Draw every feature into `sink`, in order.
    pub fn paint_features<S: PrimitiveSink + ?Sized>(&self, features: &[Feature], sink: &mut S) {
        for feature in features {
            self.paint_feature(feature, sink);
        }
    }

    /// Draw one feature: particles for points, outlines for lines and rings,
    /// and one fill mesh per polygon.
    pub fn paint_feature<S: PrimitiveSink + ?Sized>(&self, feature: &Feature, sink: &mut S) {
        let Some(geometry) = &feature.geometry else {
            tracing::debug!("[paint] skipping feature {} without a drawable geometry", feature.properties.region);
            return;
        };
        let style = self.style(&feature.properties.region);

        match geometry {
            Geometry::Point(coord) => self.particle(*coord, &style, sink),
            Geometry::MultiPoint(coords) => {
                for coord in coords { self.particle(*coord, &style, sink) }
            }
            Geometry::LineString(line) => self.outline(line, &style, sink),
            Geometry::MultiLineString(lines) => {
                for line in lines { self.outline(line, &style, sink) }
            }
            Geometry::Polygon(rings) => self.polygon(rings, &style, sink),
            Geometry::MultiPolygon(polygons) => {
                // Holes belong to their own polygon only.
                for rings in polygons { self.polygon(rings, &style, sink) }
            }
        }
    }

    fn style(&self, region: &Region) -> Style {
        let value = self.values.get(region);
        let color = if value > 0.0 { self.colors.color(value) } else { self.config.fallback_color };
        Style { region: region.clone(), value, color }
    }

    fn emit<S: PrimitiveSink + ?Sized>(&self, shape: Shape, style: &Style, sink: &mut S) {
        sink.push(Primitive { shape, region: style.region.clone(), value: style.value, color: style.color });
    }

    fn particle<S: PrimitiveSink + ?Sized>(&self, coord: Coord<f64>, style: &Style, sink: &mut S) {
        self.emit(Shape::Particle(project(coord, self.config.radius)), style, sink);
    }

    fn outline<S: PrimitiveSink + ?Sized>(&self, line: &[Coord<f64>], style: &Style, sink: &mut S) {
        let points = densify_line(line, self.config.outline_step, self.config.outline_max_depth).into_iter()
            .map(|coord| project(coord, self.config.radius))
            .collect();
        self.emit(Shape::Polyline(points), style, sink);
    }

    fn polygon<S: PrimitiveSink + ?Sized>(&self, rings: &[Ring], style: &Style, sink: &mut S) {
        for ring in rings { self.outline(ring, style, sink) }
        let mesh = triangulate(rings, self.config.radius, self.config.border_step, self.config.grid_step);
        self.emit(Shape::Mesh(mesh), style, sink);
    }
}
