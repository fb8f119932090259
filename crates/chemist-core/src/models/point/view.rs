use super::Point;
use crate::error::{ChemistError, Result};
use crate::view::{Access, ReadOnly, ReadWrite, RecordView};
use nalgebra::Point3;
use std::fmt;

/// Aliases the three coordinates of a point stored elsewhere.
///
/// The coordinates may live in an owned [`Point`], in the parallel x/y/z arrays of a
/// [`PointSet`](super::PointSet), or anywhere else the caller can borrow three
/// `f64`s from. A default-constructed view is null and every accessor on it fails
/// with [`ChemistError::NullView`].
pub struct PointView<'a, M: Access = ReadOnly> {
    coords: Option<[M::Ref<'a, f64>; 3]>,
}

impl<'a, M: Access> Default for PointView<'a, M> {
    fn default() -> Self {
        Self { coords: None }
    }
}

impl<'a, M: Access> PointView<'a, M> {
    /// Builds a view from individually supplied coordinate references.
    pub fn new(x: M::Ref<'a, f64>, y: M::Ref<'a, f64>, z: M::Ref<'a, f64>) -> Self {
        Self {
            coords: Some([x, y, z]),
        }
    }

    fn values(&self) -> Option<[f64; 3]> {
        self.coords
            .as_ref()
            .map(|coords| coords.each_ref().map(|coord| **coord))
    }

    /// Returns the current value of coordinate `q` (0 = x, 1 = y, 2 = z).
    pub fn coord(&self, q: usize) -> Result<f64> {
        let coords = self.coords.as_ref().ok_or(ChemistError::NullView)?;
        coords
            .get(q)
            .map(|coord| **coord)
            .ok_or(ChemistError::OutOfRange { index: q, len: 3 })
    }

    pub fn x(&self) -> Result<f64> {
        self.coord(0)
    }

    pub fn y(&self) -> Result<f64> {
        self.coord(1)
    }

    pub fn z(&self) -> Result<f64> {
        self.coord(2)
    }

    pub fn to_point3(&self) -> Result<Point3<f64>> {
        let [x, y, z] = self.values().ok_or(ChemistError::NullView)?;
        Ok(Point3::new(x, y, z))
    }

    /// Distance of the aliased point from the origin.
    pub fn magnitude(&self) -> Result<f64> {
        Ok(self.to_point3()?.coords.norm())
    }

    /// A read-only view of the same coordinates.
    pub fn as_const(&self) -> PointView<'_, ReadOnly> {
        PointView {
            coords: self
                .coords
                .as_ref()
                .map(|coords| coords.each_ref().map(|coord| &**coord)),
        }
    }

    /// A shorter-lived view of the same coordinates with the same access mode.
    pub fn reborrow(&mut self) -> PointView<'_, M> {
        PointView {
            coords: self
                .coords
                .as_mut()
                .map(|coords| coords.each_mut().map(|coord| M::reborrow(coord))),
        }
    }
}

impl<'a> PointView<'a, ReadWrite> {
    /// Returns a mutable alias of coordinate `q`.
    pub fn coord_mut(&mut self, q: usize) -> Result<&mut f64> {
        let coords = self.coords.as_mut().ok_or(ChemistError::NullView)?;
        coords
            .get_mut(q)
            .map(|coord| &mut **coord)
            .ok_or(ChemistError::OutOfRange { index: q, len: 3 })
    }

    pub fn x_mut(&mut self) -> Result<&mut f64> {
        self.coord_mut(0)
    }

    pub fn y_mut(&mut self) -> Result<&mut f64> {
        self.coord_mut(1)
    }

    pub fn z_mut(&mut self) -> Result<&mut f64> {
        self.coord_mut(2)
    }

    pub fn set_x(&mut self, x: f64) -> Result<()> {
        *self.x_mut()? = x;
        Ok(())
    }

    pub fn set_y(&mut self, y: f64) -> Result<()> {
        *self.y_mut()? = y;
        Ok(())
    }

    pub fn set_z(&mut self, z: f64) -> Result<()> {
        *self.z_mut()? = z;
        Ok(())
    }

    /// Overwrites the aliased coordinates with those of `point`.
    pub fn assign(&mut self, point: &Point) -> Result<()> {
        let coords = self.coords.as_mut().ok_or(ChemistError::NullView)?;
        for (coord, value) in coords.iter_mut().zip([point.x, point.y, point.z]) {
            **coord = value;
        }
        Ok(())
    }
}

impl<'a, M: Access> RecordView for PointView<'a, M> {
    type Record = Point;

    fn is_null(&self) -> bool {
        self.coords.is_none()
    }

    fn materialize(&self) -> Result<Point> {
        let [x, y, z] = self.values().ok_or(ChemistError::NullView)?;
        Ok(Point::new(x, y, z))
    }
}

impl<'a> From<&'a Point> for PointView<'a, ReadOnly> {
    fn from(point: &'a Point) -> Self {
        Self::new(&point.x, &point.y, &point.z)
    }
}

impl<'a> From<&'a mut Point> for PointView<'a, ReadWrite> {
    fn from(point: &'a mut Point) -> Self {
        let Point { x, y, z } = point;
        Self::new(x, y, z)
    }
}

impl<'a> Clone for PointView<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for PointView<'a, ReadOnly> {}

impl<'a, 'b, M: Access, N: Access> PartialEq<PointView<'b, N>> for PointView<'a, M> {
    fn eq(&self, other: &PointView<'b, N>) -> bool {
        self.values() == other.values()
    }
}

impl<'a, M: Access> PartialEq<Point> for PointView<'a, M> {
    fn eq(&self, other: &Point) -> bool {
        self.values() == Some([other.x, other.y, other.z])
    }
}

impl<'a, M: Access> PartialEq<PointView<'a, M>> for Point {
    fn eq(&self, other: &PointView<'a, M>) -> bool {
        other == self
    }
}

impl<'a, M: Access> fmt::Debug for PointView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values() {
            Some([x, y, z]) => f
                .debug_struct("PointView")
                .field("x", &x)
                .field("y", &y)
                .field("z", &z)
                .finish(),
            None => f.write_str("PointView(null)"),
        }
    }
}
