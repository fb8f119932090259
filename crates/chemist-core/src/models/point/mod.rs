use crate::error::{ChemistError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

pub mod set;
pub mod view;

pub use set::{PointSet, PointSetView};
pub use view::PointView;

/// A point in Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns coordinate `q` (0 = x, 1 = y, 2 = z).
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `q > 2`.
    pub fn coord(&self, q: usize) -> Result<f64> {
        match q {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(ChemistError::OutOfRange { index: q, len: 3 }),
        }
    }

    pub fn to_point3(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Distance from the origin.
    pub fn magnitude(&self) -> f64 {
        self.to_point3().coords.norm()
    }

    pub fn distance(&self, other: &Point) -> f64 {
        nalgebra::distance(&self.to_point3(), &other.to_point3())
    }
}

impl From<Point3<f64>> for Point {
    fn from(point: Point3<f64>) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl From<Point> for Point3<f64> {
    fn from(point: Point) -> Self {
        point.to_point3()
    }
}
