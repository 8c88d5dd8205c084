// End-to-end checks of the GeoJSON -> globe primitive pipeline:
//   projection, outline densification, fill meshes for plain, holed and
//   multi-part polygons, and region value/color lookup.

use geo::Coord;
use geoglobe::{
    geom::{densify_line, project, triangulate, triangulate_planar, SpherePoint, TriangleMesh},
    io::geojson,
    Feature, Geometry, GlobeConfig, GlobeLayer, Painter, Primitive, Properties, QuantileScale, Region,
    RegionValues, Shape, Ring, FALLBACK_COLOR,
};
use serde_json::{json, Value};

fn ring(points: &[(f64, f64)]) -> Ring {
    points.iter().map(|&(x, y)| Coord { x, y }).collect()
}

fn square(lo: f64, hi: f64) -> Ring {
    ring(&[(lo, lo), (lo, hi), (hi, hi), (hi, lo), (lo, lo)])
}

fn paint(json: &Value, values: &RegionValues) -> Vec<Primitive> {
    let config = GlobeConfig::default();
    let colors = QuantileScale::or_rd(values.samples());
    Painter::new(&config, values, &colors).unwrap().paint(json)
}

fn meshes(primitives: &[Primitive]) -> Vec<&TriangleMesh> {
    primitives.iter()
        .filter_map(|p| match &p.shape { Shape::Mesh(mesh) => Some(mesh), _ => None })
        .collect()
}

fn polylines(primitives: &[Primitive]) -> Vec<&Vec<SpherePoint>> {
    primitives.iter()
        .filter_map(|p| match &p.shape { Shape::Polyline(points) => Some(points), _ => None })
        .collect()
}

fn polygon_feature(name: &str, rings: Vec<Ring>) -> Value {
    let coordinates: Vec<Vec<[f64; 2]>> = rings.iter()
        .map(|r| r.iter().map(|c| [c.x, c.y]).collect())
        .collect();
    json!({
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": coordinates },
        "properties": { "name": name },
    })
}

#[test]
fn projection_lands_on_the_sphere() {
    for radius in [0.5, 1.0, 2.0, 6371.0] {
        for lon in (-180..=180).step_by(15) {
            for lat in (-90..=90).step_by(15) {
                let p = project(Coord { x: lon as f64, y: lat as f64 }, radius);
                assert!((p.norm() - radius).abs() < 1e-9 * radius, "({lon},{lat}) r={radius}: {}", p.norm());
            }
        }
    }
}

#[test]
fn densified_outline_respects_step_on_both_axes() {
    let lines = [
        ring(&[(0.0, 0.0), (37.0, -12.0), (-150.0, 80.0)]),
        ring(&[(179.0, 10.0), (-179.0, 10.0)]),
        ring(&[(-170.0, -85.0), (170.0, 85.0), (0.0, 0.0)]),
    ];
    for line in &lines {
        let dense = densify_line(line, 5.0, 32);
        assert_eq!(dense.first(), line.first());
        assert_eq!(dense.last(), line.last());
        for pair in dense.windows(2) {
            assert!((pair[0].x - pair[1].x).abs() <= 5.0 && (pair[0].y - pair[1].y).abs() <= 5.0, "{pair:?}");
        }
    }
}

#[test]
fn fine_outline_is_left_alone() {
    let line = ring(&[(0.0, 0.0), (4.0, 1.0), (8.5, -2.0), (10.0, 3.0), (6.0, 6.0)]);
    assert_eq!(densify_line(&line, 5.0, 32), line);
}

#[test]
fn simple_square_outline_and_mesh() {
    let primitives = paint(&polygon_feature("Square", vec![square(0.0, 10.0)]), &RegionValues::new());

    let outlines = polylines(&primitives);
    assert_eq!(outlines.len(), 1);
    assert!(outlines[0].len() >= 5);
    for corner in [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)] {
        let p = project(Coord { x: corner.0, y: corner.1 }, 2.0);
        assert!(outlines[0].contains(&p), "corner {corner:?} missing from outline");
    }

    let fills = meshes(&primitives);
    assert_eq!(fills.len(), 1);
    assert!(!fills[0].is_empty());
    assert!(fills[0].vertices().all(|v| (v.norm() - 2.0).abs() < 1e-9));

    let config = GlobeConfig::default();
    let planar = triangulate_planar(&[square(0.0, 10.0)], config.border_step, config.grid_step);
    assert_eq!(planar.len(), fills[0].len());
    for tri in &planar {
        let c = geoglobe::geom::centroid(tri);
        assert!((0.0..=10.0).contains(&c.x) && (0.0..=10.0).contains(&c.y), "centroid {c:?}");
    }
}

#[test]
fn hole_stays_empty() {
    let rings = vec![square(0.0, 10.0), square(4.0, 6.0)];
    let config = GlobeConfig::default();
    let planar = triangulate_planar(&rings, config.border_step, config.grid_step);
    assert!(!planar.is_empty());
    for tri in &planar {
        let c = geoglobe::geom::centroid(tri);
        let in_hole = c.x > 4.0 + 1e-9 && c.x < 6.0 - 1e-9 && c.y > 4.0 + 1e-9 && c.y < 6.0 - 1e-9;
        assert!(!in_hole, "centroid {c:?} inside the hole");
    }

    let primitives = paint(&polygon_feature("Donut", rings), &RegionValues::new());
    assert_eq!(polylines(&primitives).len(), 2);
    assert_eq!(meshes(&primitives).len(), 1);
}

#[test]
fn multipolygon_parts_are_triangulated_independently() {
    let first = vec![square(0.0, 5.0), square(2.0, 3.0)];
    let second = vec![square(20.0, 25.0)];
    let json = json!({
        "type": "Feature",
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": [
                first.iter().map(|r| r.iter().map(|c| [c.x, c.y]).collect::<Vec<_>>()).collect::<Vec<_>>(),
                second.iter().map(|r| r.iter().map(|c| [c.x, c.y]).collect::<Vec<_>>()).collect::<Vec<_>>(),
            ],
        },
        "properties": { "name": "Archipelago" },
    });
    let primitives = paint(&json, &RegionValues::new());

    let kinds: Vec<_> = primitives.iter()
        .map(|p| match p.shape { Shape::Particle(_) => "particle", Shape::Polyline(_) => "polyline", Shape::Mesh(_) => "mesh" })
        .collect();
    assert_eq!(kinds, ["polyline", "polyline", "mesh", "polyline", "mesh"]);

    // Each part's mesh is exactly what that part produces on its own, so the
    // first part's hole has no effect on the second.
    let config = GlobeConfig::default();
    let fills = meshes(&primitives);
    assert_eq!(*fills[0], triangulate(&first, config.radius, config.border_step, config.grid_step));
    assert_eq!(*fills[1], triangulate(&second, config.radius, config.border_step, config.grid_step));
}

#[test]
fn mesh_stays_inside_its_outline() {
    let rings = vec![square(0.0, 10.0)];
    let primitives = paint(&polygon_feature("Square", rings), &RegionValues::new());
    let mesh = meshes(&primitives)[0];

    // Great-circle edges between the projected outline corners bound a convex
    // spherical polygon; every fill vertex must be on its inner side.
    let corners: Vec<SpherePoint> = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)].iter()
        .map(|&(x, y)| project(Coord { x, y }, 2.0))
        .collect();
    let inside = project(Coord { x: 5.0, y: 5.0 }, 2.0);
    for edge in corners.windows(2) {
        let normal = edge[0].cross(&edge[1]);
        let side = normal.dot(&inside).signum();
        for v in mesh.vertices() {
            assert!(side * normal.dot(v) >= -1e-9, "vertex {v:?} outside edge {edge:?}");
        }
    }
}

#[test]
fn region_values_and_fallback_color() {
    let values: RegionValues = [("Testland", 42.0)].into_iter().collect();
    let json = json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [1, 2] }, "properties": { "name": "Testland" } },
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [3, 4] }, "properties": { "name": "Nowhere" } },
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [5, 6] }, "properties": null },
        ],
    });
    let primitives = paint(&json, &values);
    assert_eq!(primitives.len(), 3);

    let colors = QuantileScale::or_rd(values.samples());
    assert_eq!(primitives[0].region, Region::Named("Testland".into()));
    assert_eq!(primitives[0].value, 42.0);
    assert_eq!(primitives[0].color, geoglobe::ColorScale::color(&colors, 42.0));
    assert_eq!(primitives[0].tooltip(), "Testland\nValue: 42");

    assert_eq!(primitives[1].value, 0.0);
    assert_eq!(primitives[1].color, FALLBACK_COLOR);
    assert_eq!(primitives[1].tooltip(), "Nowhere\nValue: N/A");

    assert_eq!(primitives[2].region, Region::Unnamed);
    assert_eq!(primitives[2].color, FALLBACK_COLOR);
}

#[test]
fn typed_features_feed_a_layer() {
    let config = GlobeConfig { radius: 1.0, ..GlobeConfig::default() };
    let values = RegionValues::new();
    let colors = QuantileScale::or_rd(values.samples());
    let painter = Painter::new(&config, &values, &colors).unwrap();

    let properties = Properties { region: Region::from("Line"), ..Properties::default() };
    let features = [
        Feature::new(Geometry::LineString(ring(&[(0.0, 0.0), (0.0, 20.0)])), properties),
        Feature::default(),
    ];
    let mut fresh = Vec::new();
    painter.paint_features(&features, &mut fresh);

    let mut layer = GlobeLayer::new();
    let old = layer.replace(fresh);
    assert!(old.is_empty());
    assert_eq!(layer.primitives().len(), 1);
    let Shape::Polyline(points) = &layer.primitives()[0].shape else { panic!("expected a polyline") };
    assert_eq!(points.len(), 5);
    assert!(points.iter().all(|p| (p.norm() - 1.0).abs() < 1e-12));
}

#[test]
fn primitives_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primitives.json");

    let primitives = paint(&polygon_feature("Square", vec![square(0.0, 10.0)]), &RegionValues::new());
    geojson::write_primitives(&path, &primitives).unwrap();

    let written: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let items = written.as_array().unwrap();
    assert_eq!(items.len(), primitives.len());
    assert_eq!(items[0]["kind"], json!("polyline"));
    assert_eq!(items[1]["kind"], json!("mesh"));
    assert!(items.iter().all(|item| item["region"] == json!("Square") && item["color"] == json!("#bfbfbf")));
}
