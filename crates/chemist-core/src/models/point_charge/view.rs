use super::PointCharge;
use crate::error::{ChemistError, Result};
use crate::models::point::PointView;
use crate::view::{Access, ReadOnly, ReadWrite, RecordView};
use std::fmt;

/// Aliases the charge and position of a point charge stored elsewhere.
///
/// The position is itself a [`PointView`] with the same access mode, so a read-only
/// point charge view only ever exposes read-only coordinates.
pub struct PointChargeView<'a, M: Access = ReadOnly> {
    point: PointView<'a, M>,
    charge: Option<M::Ref<'a, f64>>,
}

impl<'a, M: Access> Default for PointChargeView<'a, M> {
    fn default() -> Self {
        Self {
            point: PointView::default(),
            charge: None,
        }
    }
}

impl<'a, M: Access> PointChargeView<'a, M> {
    pub fn new(point: PointView<'a, M>, charge: M::Ref<'a, f64>) -> Self {
        Self {
            point,
            charge: Some(charge),
        }
    }

    pub fn charge(&self) -> Result<f64> {
        self.charge.as_deref().copied().ok_or(ChemistError::NullView)
    }

    /// The aliased position.
    pub fn point(&self) -> &PointView<'a, M> {
        &self.point
    }

    pub fn x(&self) -> Result<f64> {
        self.point.x()
    }

    pub fn y(&self) -> Result<f64> {
        self.point.y()
    }

    pub fn z(&self) -> Result<f64> {
        self.point.z()
    }

    pub fn as_const(&self) -> PointChargeView<'_, ReadOnly> {
        PointChargeView {
            point: self.point.as_const(),
            charge: self.charge.as_deref(),
        }
    }

    pub fn reborrow(&mut self) -> PointChargeView<'_, M> {
        PointChargeView {
            point: self.point.reborrow(),
            charge: self.charge.as_mut().map(|charge| M::reborrow(charge)),
        }
    }
}

impl<'a> PointChargeView<'a, ReadWrite> {
    pub fn charge_mut(&mut self) -> Result<&mut f64> {
        self.charge.as_deref_mut().ok_or(ChemistError::NullView)
    }

    pub fn set_charge(&mut self, charge: f64) -> Result<()> {
        *self.charge_mut()? = charge;
        Ok(())
    }

    pub fn point_mut(&mut self) -> &mut PointView<'a, ReadWrite> {
        &mut self.point
    }

    /// Overwrites the aliased charge and position with those of `charge`.
    pub fn assign(&mut self, charge: &PointCharge) -> Result<()> {
        self.set_charge(charge.charge)?;
        self.point.assign(&charge.point)
    }
}

impl<'a, M: Access> RecordView for PointChargeView<'a, M> {
    type Record = PointCharge;

    fn is_null(&self) -> bool {
        self.charge.is_none() || self.point.is_null()
    }

    fn materialize(&self) -> Result<PointCharge> {
        Ok(PointCharge::new(self.charge()?, self.point.materialize()?))
    }
}

impl<'a> From<&'a PointCharge> for PointChargeView<'a, ReadOnly> {
    fn from(charge: &'a PointCharge) -> Self {
        Self::new(PointView::from(&charge.point), &charge.charge)
    }
}

impl<'a> From<&'a mut PointCharge> for PointChargeView<'a, ReadWrite> {
    fn from(charge: &'a mut PointCharge) -> Self {
        let PointCharge { charge, point } = charge;
        Self::new(PointView::from(point), charge)
    }
}

impl<'a> Clone for PointChargeView<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for PointChargeView<'a, ReadOnly> {}

impl<'a, 'b, M: Access, N: Access> PartialEq<PointChargeView<'b, N>> for PointChargeView<'a, M> {
    fn eq(&self, other: &PointChargeView<'b, N>) -> bool {
        self.charge.as_deref() == other.charge.as_deref() && self.point == other.point
    }
}

impl<'a, M: Access> PartialEq<PointCharge> for PointChargeView<'a, M> {
    fn eq(&self, other: &PointCharge) -> bool {
        *self == PointChargeView::from(other)
    }
}

impl<'a, M: Access> PartialEq<PointChargeView<'a, M>> for PointCharge {
    fn eq(&self, other: &PointChargeView<'a, M>) -> bool {
        other == self
    }
}

impl<'a, M: Access> fmt::Debug for PointChargeView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.charge.as_deref() {
            Some(charge) => f
                .debug_struct("PointChargeView")
                .field("charge", charge)
                .field("point", &self.point)
                .finish(),
            None => f.write_str("PointChargeView(null)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::point::Point;

    #[test]
    fn default_view_is_null() {
        let view: PointChargeView<'_, ReadOnly> = PointChargeView::default();
        assert!(view.is_null());
        assert_eq!(view.charge(), Err(ChemistError::NullView));
        assert_eq!(view.x(), Err(ChemistError::NullView));
    }

    #[test]
    fn view_compares_by_value_with_records() {
        let a = PointCharge::new(1.0, Point::new(0.0, 0.0, 1.0));
        let b = a;
        let view = PointChargeView::from(&a);
        assert_eq!(view, b);
        assert_eq!(b, view);
        assert_ne!(view, PointCharge::new(2.0, b.point));
    }

    #[test]
    fn view_assembled_from_parts_matches_view_of_record() {
        let record = PointCharge::new(-0.5, Point::new(1.0, 2.0, 3.0));
        let (q, x, y, z) = (-0.5, 1.0, 2.0, 3.0);
        let by_hand = PointChargeView::<ReadOnly>::new(PointView::new(&x, &y, &z), &q);
        assert_eq!(by_hand, PointChargeView::from(&record));
    }

    #[test]
    fn writes_propagate_to_nested_point() {
        let mut record = PointCharge::new(1.0, Point::new(0.0, 0.0, 0.0));
        {
            let mut view = PointChargeView::from(&mut record);
            view.set_charge(3.0).unwrap();
            view.point_mut().set_y(2.0).unwrap();
        }
        assert_eq!(record, PointCharge::new(3.0, Point::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn assign_overwrites_every_field() {
        let mut record = PointCharge::default();
        let target = PointCharge::new(4.0, Point::new(1.0, 1.0, 1.0));
        PointChargeView::from(&mut record).assign(&target).unwrap();
        assert_eq!(record, target);
    }

    #[test]
    fn as_const_view_reads_current_values() {
        let mut record = PointCharge::new(1.0, Point::new(0.0, 0.0, 0.0));
        let mut view = PointChargeView::from(&mut record);
        view.reborrow().set_charge(9.0).unwrap();
        let read_only = view.as_const();
        assert_eq!(read_only.charge(), Ok(9.0));
        assert_eq!(read_only.materialize().unwrap().charge, 9.0);
    }
}
