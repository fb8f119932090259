use super::{Point, PointView};
use crate::error::{ChemistError, Result};
use crate::view::{Access, CollectionView, FieldStorage, ReadOnly, ReadWrite};
use serde::{Deserialize, Serialize};

/// A view of a set of points, contiguous or a subset.
pub type PointSetView<'a, M = ReadOnly> = CollectionView<'a, PointSet, M>;

/// Points stored as three parallel coordinate arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointSet {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All x coordinates, one per point. Empty when the set is empty.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    pub fn x_mut(&mut self) -> &mut [f64] {
        &mut self.x
    }

    pub fn y_mut(&mut self) -> &mut [f64] {
        &mut self.y
    }

    pub fn z_mut(&mut self) -> &mut [f64] {
        &mut self.z
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ChemistError::OutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

impl FieldStorage for PointSet {
    type Record = Point;
    type View<'a, M: Access> = PointView<'a, M>;

    fn len(&self) -> usize {
        self.x.len()
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.x.try_reserve(additional)?;
        self.y.try_reserve(additional)?;
        self.z.try_reserve(additional)?;
        Ok(())
    }

    fn push(&mut self, point: Point) -> Result<()> {
        self.reserve(1)?;
        self.x.push(point.x);
        self.y.push(point.y);
        self.z.push(point.z);
        Ok(())
    }

    fn at(&self, index: usize) -> Result<PointView<'_, ReadOnly>> {
        self.check_index(index)?;
        Ok(PointView::new(&self.x[index], &self.y[index], &self.z[index]))
    }

    fn at_mut(&mut self, index: usize) -> Result<PointView<'_, ReadWrite>> {
        self.check_index(index)?;
        let Self { x, y, z } = self;
        Ok(PointView::new(&mut x[index], &mut y[index], &mut z[index]))
    }
}

impl TryFrom<Vec<Point>> for PointSet {
    type Error = ChemistError;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::from_records(points)
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(set: PointSet) -> Self {
        set.x
            .into_iter()
            .zip(set.y)
            .zip(set.z)
            .map(|((x, y), z)| Point::new(x, y, z))
            .collect()
    }
}

impl<'a, M: Access> PartialEq<PointSet> for PointSetView<'a, M> {
    fn eq(&self, other: &PointSet) -> bool {
        self.eq_storage(other)
    }
}

impl<'a, M: Access> PartialEq<PointSetView<'a, M>> for PointSet {
    fn eq(&self, other: &PointSetView<'a, M>) -> bool {
        other.eq_storage(self)
    }
}
