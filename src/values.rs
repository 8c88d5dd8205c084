use ahash::AHashMap;

use crate::feature::Region;

/// Numeric value per region name, plus every sample in load order.
///
/// Duplicate names overwrite earlier entries in the lookup map, while the
/// sample list keeps all of them (it is the domain the color scale is built
/// from).
#[derive(Clone, Debug, Default)]
pub struct RegionValues {
    by_name: AHashMap<String, f64>,
    samples: Vec<f64>,
}

impl RegionValues {
    pub fn new() -> Self { Self::default() }

    /// Record `value` for `name`; the last write for a name wins.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.by_name.insert(name.into(), value);
        self.samples.push(value);
    }

    /// Get the number of distinct region names.
    #[inline] pub fn len(&self) -> usize { self.by_name.len() }

    /// Check if no values were loaded.
    #[inline] pub fn is_empty(&self) -> bool { self.by_name.is_empty() }

    /// Every inserted value, in insertion order (duplicates included).
    #[inline] pub fn samples(&self) -> &[f64] { &self.samples }

    /// Value for a region name, if present.
    #[inline] pub fn get_name(&self, name: &str) -> Option<f64> { self.by_name.get(name).copied() }

    /// Value for a region; 0 when the region is unnamed, absent, or not finite.
    pub fn get(&self, region: &Region) -> f64 {
        region.name()
            .and_then(|name| self.get_name(name))
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RegionValues {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter { values.insert(name, value) }
        values
    }
}
