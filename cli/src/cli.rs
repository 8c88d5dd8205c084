use std::path::PathBuf;

/// Globe choropleth CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "geoglobe", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Draw a GeoJSON file onto the globe and write the primitives as JSON
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Input GeoJSON (Feature, FeatureCollection or GeometryCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub geojson: PathBuf,

    /// Region values CSV; headerless `Country,Value` unless --keyword is given
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Header of the value column (first column holds region names)
    #[arg(short, long, requires = "data")]
    pub keyword: Option<String>,

    /// Drawing configuration (TOML)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Sphere radius, overrides the config file
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Output primitives file, defaults to "./primitives.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
