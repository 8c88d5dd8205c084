use std::path::Path;

use anyhow::{Context, Result};
use geoglobe::{
    io::{csv, geojson},
    GlobeConfig, GlobeLayer, Painter, QuantileScale, RegionValues, Summary,
};

use crate::cli::RenderArgs;

pub fn run(cli: &crate::cli::Cli, args: &RenderArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./primitives.json".into());

    let summary = render_to(args, out_path, cli.verbose)?;
    println!(
        "[render] {} particles, {} polylines, {} meshes ({} triangles)",
        summary.particles, summary.polylines, summary.meshes, summary.triangles,
    );

    Ok(())
}

/// Load the inputs named by `args`, paint them and write the primitives to
/// `out_path`.
pub fn render_to(args: &RenderArgs, out_path: &Path, verbose: u8) -> Result<Summary> {
    let mut config = match &args.config {
        Some(path) => GlobeConfig::load(path)?,
        None => GlobeConfig::default(),
    };
    if let Some(radius) = args.radius { config.radius = radius }

    println!("[render] loading regions from {}", args.geojson.display());
    let json = geojson::read_geojson_value(&args.geojson)?;

    let values = match (&args.data, &args.keyword) {
        (Some(path), Some(keyword)) => {
            println!("[render] loading column {keyword:?} from {}", path.display());
            csv::read_values_by_keyword(path, keyword)?
        }
        (Some(path), None) => {
            println!("[render] loading values from {}", path.display());
            csv::read_values(path)?
        }
        (None, _) => RegionValues::new(),
    };
    if verbose > 0 { eprintln!("[render] {} regions with values", values.len()) }

    let colors = QuantileScale::or_rd(values.samples());
    let painter = Painter::new(&config, &values, &colors).context("[render] Invalid drawing parameters")?;

    let mut layer = GlobeLayer::new();
    layer.replace(painter.paint(&json));

    println!("[render] writing primitives to {}", out_path.display());
    geojson::write_primitives(out_path, layer.primitives())?;

    Ok(Summary::of(layer.primitives()))
}
