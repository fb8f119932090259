use super::access::{Access, ReadOnly, ReadWrite};
use super::collection::CollectionView;
use crate::error::Result;
use std::fmt;

/// A non-owning handle onto the fields of a single record.
pub trait RecordView {
    /// The owned record type this view aliases.
    type Record;

    /// Returns `true` when the view was never bound to any fields.
    fn is_null(&self) -> bool;

    /// Copies the current value of every aliased field into a new owned record.
    ///
    /// # Errors
    ///
    /// Returns [`ChemistError::NullView`](crate::error::ChemistError::NullView) if
    /// the view, or any view nested inside it, is null.
    fn materialize(&self) -> Result<Self::Record>;
}

/// An owning structure-of-arrays container for a homogeneous set of records.
///
/// Each field of [`Self::Record`] lives in its own array; implementors keep all
/// arrays at the same length by only growing them together through [`push`].
/// Element access hands out [`Self::View`]s that alias one row of every array.
///
/// [`push`]: FieldStorage::push
pub trait FieldStorage: Default + Clone + PartialEq + fmt::Debug + 'static {
    /// The owned record one row of the storage represents.
    type Record: Clone + PartialEq + fmt::Debug;

    /// The view aliasing one row with the access mode `M`.
    type View<'a, M: Access>: RecordView<Record = Self::Record> + PartialEq + fmt::Debug
    where
        Self: 'a;

    /// Number of records held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reserves room for `additional` records in every field array.
    ///
    /// # Errors
    ///
    /// Returns [`ChemistError::Allocation`](crate::error::ChemistError::Allocation)
    /// if any array cannot grow. Lengths are never changed by this call.
    fn reserve(&mut self, additional: usize) -> Result<()>;

    /// Splits `record` into its fields and appends each to its array.
    ///
    /// Either every array grows by one element or none of them do.
    fn push(&mut self, record: Self::Record) -> Result<()>;

    /// Returns a read-only view of row `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChemistError::OutOfRange`](crate::error::ChemistError::OutOfRange)
    /// if `index >= self.len()`.
    fn at(&self, index: usize) -> Result<Self::View<'_, ReadOnly>>;

    /// Returns a read/write view of row `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChemistError::OutOfRange`](crate::error::ChemistError::OutOfRange)
    /// if `index >= self.len()`.
    fn at_mut(&mut self, index: usize) -> Result<Self::View<'_, ReadWrite>>;

    /// Compares row `index` of `self` with row `other_index` of `other` by value.
    ///
    /// Missing rows never compare equal.
    fn element_eq(&self, index: usize, other: &Self, other_index: usize) -> bool {
        match (self.at(index), other.at(other_index)) {
            (Ok(lhs), Ok(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    /// Builds a storage from a sequence of owned records.
    fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Self::Record>,
    {
        let records = records.into_iter();
        let mut storage = Self::default();
        storage.reserve(records.size_hint().0)?;
        for record in records {
            storage.push(record)?;
        }
        Ok(storage)
    }

    /// Appends a copy of every record visible through `view`.
    ///
    /// The records are materialized before anything is pushed, so a failure while
    /// reading `view` leaves `self` untouched.
    fn extend_from_view<M: Access>(&mut self, view: &CollectionView<'_, Self, M>) -> Result<()> {
        let records = (0..view.len())
            .map(|index| view.at(index)?.materialize())
            .collect::<Result<Vec<_>>>()?;
        self.reserve(records.len())?;
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    /// A read-only collection view over every row.
    fn view(&self) -> CollectionView<'_, Self, ReadOnly> {
        CollectionView::<Self, ReadOnly>::new(self)
    }

    /// A read/write collection view over every row.
    fn view_mut(&mut self) -> CollectionView<'_, Self, ReadWrite> {
        CollectionView::<Self, ReadWrite>::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChemistError;
    use crate::models::point::{Point, PointSet};

    fn make_set() -> PointSet {
        PointSet::from_records([Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0)]).unwrap()
    }

    #[test]
    fn element_eq_compares_rows_across_storages() {
        let a = make_set();
        let b = PointSet::from_records([Point::new(4.0, 5.0, 6.0)]).unwrap();
        assert!(a.element_eq(1, &b, 0));
        assert!(!a.element_eq(0, &b, 0));
        assert!(!a.element_eq(2, &b, 0));
    }

    #[test]
    fn extend_from_view_appends_copies_of_visible_rows() {
        let source = make_set();
        let mut target = PointSet::new();
        target
            .extend_from_view(&source.view().subset([1]).unwrap())
            .unwrap();
        assert_eq!(target.len(), 1);
        assert_eq!(target.at(0).unwrap(), Point::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn reserve_does_not_change_length() {
        let mut set = make_set();
        set.reserve(100).unwrap();
        assert_eq!(set.len(), 2);
        assert!(matches!(
            set.reserve(usize::MAX),
            Err(ChemistError::Allocation(_))
        ));
        assert_eq!(set.len(), 2);
    }
}
