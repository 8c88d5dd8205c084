//! Renderable output: particles, polylines and fill meshes tagged with the
//! region they belong to.

use serde::Serialize;

use crate::{color::Rgb, feature::Region, geom::{SpherePoint, TriangleMesh}};

/// The geometric payload of a primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "positions", rename_all = "snake_case")]
pub enum Shape {
    Particle(SpherePoint),
    Polyline(Vec<SpherePoint>),
    Mesh(TriangleMesh),
}

/// A renderable unit with the metadata a picking layer needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Primitive {
    #[serde(flatten)]
    pub shape: Shape,
    pub region: Region,
    pub value: f64,
    pub color: Rgb,
}

impl Primitive {
    /// Pointer-over label: region name, then the formatted value.
    pub fn tooltip(&self) -> String {
        format!("{}\nValue: {}", self.region, format_value(self.value))
    }
}

/// Format a value for display: rounded to an integer (halves toward +inf) with
/// `,` thousands separators, or `N/A` when the value is zero or not finite.
pub fn format_value(value: f64) -> String {
    if value == 0.0 || !value.is_finite() { return "N/A".to_string() }

    let rounded = (value + 0.5).floor();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 { out.push('-') }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 { out.push(',') }
        out.push(ch);
    }
    out
}

/// Anything that accepts primitives as they are produced.
pub trait PrimitiveSink {
    fn push(&mut self, primitive: Primitive);
}

impl PrimitiveSink for Vec<Primitive> {
    #[inline]
    fn push(&mut self, primitive: Primitive) { Vec::push(self, primitive) }
}

/// Counts of each primitive kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub particles: usize,
    pub polylines: usize,
    pub meshes: usize,
    pub triangles: usize,
}

impl Summary {
    pub fn of(primitives: &[Primitive]) -> Self {
        primitives.iter().fold(Self::default(), |mut acc, primitive| {
            match &primitive.shape {
                Shape::Particle(_) => acc.particles += 1,
                Shape::Polyline(_) => acc.polylines += 1,
                Shape::Mesh(mesh) => {
                    acc.meshes += 1;
                    acc.triangles += mesh.len();
                }
            }
            acc
        })
    }
}

/// The displayed primitive set. Updates replace the whole set at once; there
/// is no incremental patching.
#[derive(Clone, Debug, Default)]
pub struct GlobeLayer {
    primitives: Vec<Primitive>,
}

impl GlobeLayer {
    pub fn new() -> Self { Self::default() }

    /// Get a reference to the current primitives.
    #[inline] pub fn primitives(&self) -> &[Primitive] { &self.primitives }

    /// Swap in a freshly built primitive set and hand back the old one.
    pub fn replace(&mut self, primitives: Vec<Primitive>) -> Vec<Primitive> {
        std::mem::replace(&mut self.primitives, primitives)
    }

    /// Drop every primitive.
    pub fn clear(&mut self) { self.primitives.clear() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(region: &str, value: f64) -> Primitive {
        Primitive {
            shape: Shape::Particle(SpherePoint::new(1.0, 0.0, 0.0)),
            region: Region::from(region),
            value,
            color: Rgb::new(0, 0, 0),
        }
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(0.0), "N/A");
        assert_eq!(format_value(f64::NAN), "N/A");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(999.5), "1,000");
        assert_eq!(format_value(1234567.4), "1,234,567");
        assert_eq!(format_value(-12345.0), "-12,345");
        assert_eq!(format_value(0.2), "0");
        assert_eq!(format_value(2.5), "3");
        assert_eq!(format_value(-2.5), "-2");
        assert_eq!(format_value(-1234.5), "-1,234");
        assert_eq!(format_value(-0.5), "0");
    }

    #[test]
    fn tooltip_text() {
        assert_eq!(particle("Testland", 1500.0).tooltip(), "Testland\nValue: 1,500");
        assert_eq!(particle("", 0.0).tooltip(), "Unknown\nValue: N/A");
    }

    #[test]
    fn layer_replacement_is_wholesale() {
        let mut layer = GlobeLayer::new();
        assert!(layer.replace(vec![particle("A", 1.0), particle("B", 2.0)]).is_empty());
        let old = layer.replace(vec![particle("C", 3.0)]);
        assert_eq!(old.len(), 2);
        assert_eq!(layer.primitives().len(), 1);
        assert_eq!(layer.primitives()[0].region, Region::from("C"));
        layer.clear();
        assert!(layer.primitives().is_empty());
    }

    #[test]
    fn summary_counts_kinds() {
        let mut primitives = vec![particle("A", 1.0)];
        primitives.push(Primitive { shape: Shape::Polyline(vec![]), ..particle("A", 1.0) });
        let summary = Summary::of(&primitives);
        assert_eq!(summary, Summary { particles: 1, polylines: 1, meshes: 0, triangles: 0 });
    }

    #[test]
    fn serializes_with_region_metadata() {
        let json = serde_json::to_value(particle("Testland", 42.0)).unwrap();
        assert_eq!(json["kind"], "particle");
        assert_eq!(json["region"], "Testland");
        assert_eq!(json["value"], 42.0);
        assert_eq!(json["color"], "#000000");
        assert_eq!(json["positions"]["x"], 1.0);
    }
}
