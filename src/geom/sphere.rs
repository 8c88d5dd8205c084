use geo::Coord;
use serde::Serialize;

/// A Cartesian point on (or near) a sphere centered at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpherePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpherePoint {
    #[inline] pub fn new(x: f64, y: f64, z: f64) -> Self { Self { x, y, z } }

    /// Euclidean distance from the origin.
    #[inline] pub fn norm(&self) -> f64 { (self.x * self.x + self.y * self.y + self.z * self.z).sqrt() }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 { self.x * other.x + self.y * other.y + self.z * other.z }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

/// Project a lon/lat coordinate (degrees) onto a sphere of the given radius.
///
/// Convention: `x = cos(lat)·cos(lon)·r`, `y = cos(lat)·sin(lon)·r`,
/// `z = sin(lat)·r`. Every 3D position in the crate goes through here so that
/// outlines, particles and fill meshes line up on the surface.
#[inline]
pub fn project(coord: Coord<f64>, radius: f64) -> SpherePoint {
    let (lon, lat) = (coord.x.to_radians(), coord.y.to_radians());
    SpherePoint {
        x: lat.cos() * lon.cos() * radius,
        y: lat.cos() * lon.sin() * radius,
        z: lat.sin() * radius,
    }
}

#[inline]
fn haversin(theta: f64) -> f64 {
    let s = (theta * 0.5).sin();
    s * s
}

/// Great-circle angle between two lon/lat coordinates, in radians.
pub fn angular_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (lon0, lat0) = (a.x.to_radians(), a.y.to_radians());
    let (lon1, lat1) = (b.x.to_radians(), b.y.to_radians());
    let h = haversin(lat1 - lat0) + lat0.cos() * lat1.cos() * haversin(lon1 - lon0);
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Spherical linear interpolation between two lon/lat coordinates.
///
/// Returns lon/lat in degrees; `t = 0` is `a` and `t = 1` is `b`.
pub fn interpolate(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
    let d = angular_distance(a, b);
    let k = d.sin();
    if d == 0.0 || k == 0.0 { return a }

    let (lon0, lat0) = (a.x.to_radians(), a.y.to_radians());
    let (lon1, lat1) = (b.x.to_radians(), b.y.to_radians());

    // Unit vectors of both endpoints.
    let (kx0, ky0, kz0) = (lat0.cos() * lon0.cos(), lat0.cos() * lon0.sin(), lat0.sin());
    let (kx1, ky1, kz1) = (lat1.cos() * lon1.cos(), lat1.cos() * lon1.sin(), lat1.sin());

    let td = t * d;
    let wa = (d - td).sin() / k;
    let wb = td.sin() / k;
    let x = wa * kx0 + wb * kx1;
    let y = wa * ky0 + wb * ky1;
    let z = wa * kz0 + wb * kz1;

    Coord {
        x: y.atan2(x).to_degrees(),
        y: z.atan2((x * x + y * y).sqrt()).to_degrees(),
    }
}
