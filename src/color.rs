//! Colors and value-to-color scales.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, ensure, Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

/// Color used for regions without a positive value.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xbf, 0xbf, 0xbf);

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional, alpha ignored).
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        ensure!(hex.is_ascii() && (hex.len() == 6 || hex.len() == 8), "[color] invalid hex color {s:?}");
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| anyhow!("[color] invalid hex color {s:?}"));
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Maps a region value to a color.
pub trait ColorScale {
    fn color(&self, value: f64) -> Rgb;
}

impl<F: Fn(f64) -> Rgb> ColorScale for F {
    #[inline]
    fn color(&self, value: f64) -> Rgb { self(value) }
}

/// 9-class sequential Orange-Red scheme (ColorBrewer OrRd).
pub const OR_RD_9: [Rgb; 9] = [
    Rgb::new(0xff, 0xf7, 0xec),
    Rgb::new(0xfe, 0xe8, 0xc8),
    Rgb::new(0xfd, 0xd4, 0x9e),
    Rgb::new(0xfd, 0xbb, 0x84),
    Rgb::new(0xfc, 0x8d, 0x59),
    Rgb::new(0xef, 0x65, 0x48),
    Rgb::new(0xd7, 0x30, 0x1f),
    Rgb::new(0xb3, 0x00, 0x00),
    Rgb::new(0x7f, 0x00, 0x00),
];

/// Quantile scale: splits the sorted sample domain into as many equally
/// populated buckets as there are colors.
#[derive(Clone, Debug)]
pub struct QuantileScale {
    thresholds: Vec<f64>,
    range: Vec<Rgb>,
}

impl QuantileScale {
    /// Build from a sample domain (non-finite samples are ignored) and a
    /// non-empty color range.
    pub fn new(domain: &[f64], range: &[Rgb]) -> Result<Self> {
        ensure!(!range.is_empty(), "[color] quantile scale needs at least one color");

        let mut sorted: Vec<f64> = domain.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let n = range.len();
        let thresholds = if sorted.is_empty() { Vec::new() } else {
            (1..n).map(|i| quantile_sorted(&sorted, i as f64 / n as f64)).collect()
        };
        Ok(Self { thresholds, range: range.to_vec() })
    }

    /// Quantile scale over the OrRd 9-class scheme.
    pub fn or_rd(domain: &[f64]) -> Self {
        Self {
            thresholds: Self::new(domain, &OR_RD_9).map(|s| s.thresholds).unwrap_or_default(),
            range: OR_RD_9.to_vec(),
        }
    }

    /// Get the bucket boundaries (one fewer than the number of colors).
    #[inline] pub fn thresholds(&self) -> &[f64] { &self.thresholds }
}

impl ColorScale for QuantileScale {
    fn color(&self, value: f64) -> Rgb {
        // Right bisection: values equal to a threshold fall in the upper bucket.
        let idx = self.thresholds.partition_point(|&t| t <= value);
        self.range[idx.min(self.range.len() - 1)]
    }
}

/// Linear-interpolated quantile (R-7) of sorted, non-empty data.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let i = h.floor() as usize;
    let lo = sorted[i];
    match sorted.get(i + 1) {
        Some(&hi) => lo + (hi - lo) * (h - i as f64),
        None => lo,
    }
}
