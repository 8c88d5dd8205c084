#![doc = "GeoGlobe public API"]
mod color;
mod config;
mod draw;
mod feature;
pub mod geom;
pub mod io;
mod primitive;
mod values;

#[doc(inline)]
pub use color::{ColorScale, QuantileScale, Rgb, FALLBACK_COLOR, OR_RD_9};

#[doc(inline)]
pub use config::GlobeConfig;

#[doc(inline)]
pub use draw::Painter;

#[doc(inline)]
pub use feature::{normalize, Feature, Geometry, Properties, Region, Ring};

#[doc(inline)]
pub use primitive::{format_value, GlobeLayer, Primitive, PrimitiveSink, Shape, Summary};

#[doc(inline)]
pub use values::RegionValues;
