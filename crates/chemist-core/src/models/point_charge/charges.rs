use super::{PointCharge, PointChargeView};
use crate::error::{ChemistError, Result};
use crate::models::point::PointSet;
use crate::view::{Access, CollectionView, FieldStorage, ReadOnly, ReadWrite};
use serde::{Deserialize, Serialize};

/// A view of a set of point charges, contiguous or a subset.
pub type ChargesView<'a, M = ReadOnly> = CollectionView<'a, Charges, M>;

/// Point charges stored as a [`PointSet`] plus a parallel array of charges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PointCharge>", into = "Vec<PointCharge>")]
pub struct Charges {
    points: PointSet,
    charges: Vec<f64>,
}

impl Charges {
    pub fn new() -> Self {
        Self::default()
    }

    /// The positions of the charges.
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut PointSet {
        &mut self.points
    }

    /// All charges, one per point. Empty when the set is empty.
    pub fn charge_data(&self) -> &[f64] {
        &self.charges
    }

    pub fn charge_data_mut(&mut self) -> &mut [f64] {
        &mut self.charges
    }

    /// Sum of every charge in the set.
    pub fn total_charge(&self) -> f64 {
        self.charges.iter().sum()
    }
}

impl FieldStorage for Charges {
    type Record = PointCharge;
    type View<'a, M: Access> = PointChargeView<'a, M>;

    fn len(&self) -> usize {
        self.charges.len()
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.points.reserve(additional)?;
        self.charges.try_reserve(additional)?;
        Ok(())
    }

    fn push(&mut self, charge: PointCharge) -> Result<()> {
        self.reserve(1)?;
        self.points.push(charge.point)?;
        self.charges.push(charge.charge);
        Ok(())
    }

    fn at(&self, index: usize) -> Result<PointChargeView<'_, ReadOnly>> {
        let point = self.points.at(index)?;
        let charge = self.charges.get(index).ok_or(ChemistError::OutOfRange {
            index,
            len: self.len(),
        })?;
        Ok(PointChargeView::new(point, charge))
    }

    fn at_mut(&mut self, index: usize) -> Result<PointChargeView<'_, ReadWrite>> {
        let len = self.len();
        let Self { points, charges } = self;
        let point = points.at_mut(index)?;
        let charge = charges
            .get_mut(index)
            .ok_or(ChemistError::OutOfRange { index, len })?;
        Ok(PointChargeView::new(point, charge))
    }
}

impl TryFrom<Vec<PointCharge>> for Charges {
    type Error = ChemistError;

    fn try_from(charges: Vec<PointCharge>) -> Result<Self> {
        Self::from_records(charges)
    }
}

impl From<Charges> for Vec<PointCharge> {
    fn from(set: Charges) -> Self {
        let points: Vec<_> = set.points.into();
        set.charges
            .into_iter()
            .zip(points)
            .map(|(charge, point)| PointCharge::new(charge, point))
            .collect()
    }
}

impl<'a, M: Access> PartialEq<Charges> for ChargesView<'a, M> {
    fn eq(&self, other: &Charges) -> bool {
        self.eq_storage(other)
    }
}

impl<'a, M: Access> PartialEq<ChargesView<'a, M>> for Charges {
    fn eq(&self, other: &ChargesView<'a, M>) -> bool {
        other.eq_storage(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::point::Point;
    use crate::view::RecordView;

    fn make_charges() -> Charges {
        Charges::from_records([
            PointCharge::new(1.0, Point::new(0.0, 0.0, 0.0)),
            PointCharge::new(-1.0, Point::new(1.0, 0.0, 0.0)),
            PointCharge::new(0.5, Point::new(0.0, 1.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn push_keeps_points_and_charges_aligned() {
        let charges = make_charges();
        assert_eq!(charges.len(), 3);
        assert_eq!(charges.points().len(), 3);
        assert_eq!(charges.charge_data(), &[1.0, -1.0, 0.5]);
        assert_eq!(charges.points().x(), &[0.0, 1.0, 0.0]);
        assert!((charges.total_charge() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn at_reads_charge_and_position_together() {
        let charges = make_charges();
        let view = charges.at(1).unwrap();
        assert_eq!(view, PointCharge::new(-1.0, Point::new(1.0, 0.0, 0.0)));
        assert_eq!(view.point().materialize(), Ok(Point::new(1.0, 0.0, 0.0)));
        assert_eq!(
            charges.at(3).unwrap_err(),
            ChemistError::OutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn at_mut_writes_nested_position_into_point_set() {
        let mut charges = make_charges();
        {
            let mut view = charges.at_mut(0).unwrap();
            view.point_mut().set_z(5.0).unwrap();
            view.set_charge(2.0).unwrap();
        }
        assert_eq!(charges.points().z()[0], 5.0);
        assert_eq!(charges.charge_data()[0], 2.0);
    }

    #[test]
    fn subset_view_selects_charges_in_order() {
        let charges = make_charges();
        let subset = charges.view().subset([2, 0]).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.at(0).unwrap().charge(), Ok(0.5));
        assert_eq!(subset.at(1).unwrap().charge(), Ok(1.0));
        assert_eq!(subset.materialize().unwrap().charge_data(), &[0.5, 1.0]);
    }

    #[test]
    fn round_trips_through_a_list_of_point_charges() {
        let charges = make_charges();
        let list: Vec<PointCharge> = charges.clone().into();
        assert_eq!(list[2], PointCharge::new(0.5, Point::new(0.0, 1.0, 0.0)));
        assert_eq!(Charges::try_from(list), Ok(charges));
    }
}
