use super::access::{Access, ReadOnly};
use super::layout::{Layout, Subset};
use super::traits::{FieldStorage, RecordView};
use crate::error::{ChemistError, Result};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A list-like view over records held in a [`FieldStorage`].
///
/// The view pairs a reference to the storage (shared for [`ReadOnly`], exclusive for
/// [`ReadWrite`](super::access::ReadWrite)) with a [`Layout`] deciding which rows
/// are visible and in what order. Callers see the same `len`/`at`/`iter` surface
/// whether the layout is the whole storage or a filtered subset of it.
///
/// Elements are handed out as record views aliasing the storage; nothing is copied
/// unless [`materialize`](Self::materialize) is called.
pub struct CollectionView<'a, S: FieldStorage, M: Access = ReadOnly> {
    storage: Option<M::Ref<'a, S>>,
    layout: Layout,
}

impl<'a, S: FieldStorage, M: Access> Default for CollectionView<'a, S, M> {
    fn default() -> Self {
        Self {
            storage: None,
            layout: Layout::Empty,
        }
    }
}

impl<'a, S: FieldStorage, M: Access> CollectionView<'a, S, M> {
    /// Aliases every row of `storage`, in storage order.
    pub fn new(storage: M::Ref<'a, S>) -> Self {
        let layout = Layout::contiguous(storage.len());
        Self {
            storage: Some(storage),
            layout,
        }
    }

    /// Aliases the rows of `storage` selected by `layout`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `layout` addresses a row `storage` does not have.
    pub fn with_layout(storage: M::Ref<'a, S>, layout: Layout) -> Result<Self> {
        let len = storage.len();
        if let Some(index) = layout.physical_indices().find(|&row| row >= len) {
            return Err(ChemistError::OutOfRange { index, len });
        }
        Ok(Self {
            storage: Some(storage),
            layout,
        })
    }

    /// Number of visible records.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the view is not bound to a storage and layout.
    pub fn is_null(&self) -> bool {
        self.storage.is_none() || self.layout.is_null()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The aliased storage, for bulk access to its field arrays.
    pub fn storage(&self) -> Option<&S> {
        self.storage.as_deref()
    }

    /// Returns a read-only view of element `index`.
    ///
    /// # Errors
    ///
    /// `NullView` if the view is null, `OutOfRange` if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<S::View<'_, ReadOnly>> {
        let row = self.layout.resolve(index)?;
        let storage = self.storage.as_deref().ok_or(ChemistError::NullView)?;
        storage.at(row)
    }

    /// Returns a view of element `index` with the access mode of the collection.
    ///
    /// # Errors
    ///
    /// `NullView` if the view is null, `OutOfRange` if `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<S::View<'_, M>> {
        let row = self.layout.resolve(index)?;
        let storage = self.storage.as_mut().ok_or(ChemistError::NullView)?;
        M::storage_view(M::reborrow(storage), row)
    }

    /// Read-only views of every element, in logical order.
    pub fn iter(&self) -> impl Iterator<Item = S::View<'_, ReadOnly>> + '_ {
        (0..self.len()).filter_map(move |index| self.at(index).ok())
    }

    /// Calls `f` with each element index and a view of that element carrying the
    /// collection's access mode.
    pub fn for_each_mut<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(usize, S::View<'_, M>),
    {
        for index in 0..self.len() {
            f(index, self.at_mut(index)?);
        }
        Ok(())
    }

    /// A read-only view of the same elements.
    pub fn as_const(&self) -> CollectionView<'_, S, ReadOnly> {
        CollectionView {
            storage: self.storage.as_deref(),
            layout: self.layout.clone(),
        }
    }

    /// A copy of this view that borrows from it.
    ///
    /// The layout is deep-copied, so the copy's bookkeeping is independent of the
    /// original; both still alias the same storage rows.
    pub fn reborrow(&mut self) -> CollectionView<'_, S, M> {
        CollectionView {
            storage: self.storage.as_mut().map(|storage| M::reborrow(storage)),
            layout: self.layout.clone(),
        }
    }

    /// Turns this view into a view of the elements at `members` (in that order).
    ///
    /// # Errors
    ///
    /// `NullView` if the view is null, `OutOfRange` for a member `>= self.len()`.
    pub fn into_subset<I>(self, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        if self.storage.is_none() {
            return Err(ChemistError::NullView);
        }
        let subset = Subset::new(Rc::new(self.layout), members)?;
        trace!(len = subset.len(), "Created subset view.");
        Ok(Self {
            storage: self.storage,
            layout: Layout::Subset(subset),
        })
    }

    /// A subset view that borrows from this one.
    pub fn subset_mut<I>(&mut self, members: I) -> Result<CollectionView<'_, S, M>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.reborrow().into_subset(members)
    }

    /// Copies every visible record into a new, independently owned storage.
    ///
    /// # Errors
    ///
    /// `NullView` if the view is null.
    pub fn materialize(&self) -> Result<S> {
        if self.is_null() {
            return Err(ChemistError::NullView);
        }
        let mut owned = S::default();
        owned.reserve(self.len())?;
        for index in 0..self.len() {
            owned.push(self.at(index)?.materialize()?)?;
        }
        Ok(owned)
    }

    /// Compares the visible records with every record of `storage`, in order.
    pub fn eq_storage(&self, storage: &S) -> bool {
        *self == CollectionView::<S, ReadOnly>::new(storage)
    }
}

impl<'a, S: FieldStorage> CollectionView<'a, S, ReadOnly> {
    /// Returns a view of element `index` that borrows the storage rather than `self`.
    ///
    /// # Errors
    ///
    /// `NullView` if the view is null, `OutOfRange` if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<S::View<'a, ReadOnly>> {
        let row = self.layout.resolve(index)?;
        let storage: &'a S = self.storage.ok_or(ChemistError::NullView)?;
        storage.at(row)
    }

    /// A view of the elements at `members` (in that order) of this view.
    ///
    /// # Errors
    ///
    /// `NullView` if the view is null, `OutOfRange` for a member `>= self.len()`.
    pub fn subset<I>(&self, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        self.clone().into_subset(members)
    }
}

impl<'a, S: FieldStorage> Clone for CollectionView<'a, S, ReadOnly> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            layout: self.layout.clone(),
        }
    }
}

impl<'a, 'b, S, M, N> PartialEq<CollectionView<'b, S, N>> for CollectionView<'a, S, M>
where
    S: FieldStorage,
    M: Access,
    N: Access,
{
    fn eq(&self, other: &CollectionView<'b, S, N>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        (0..self.len()).all(|index| match (self.at(index), other.at(index)) {
            (Ok(lhs), Ok(rhs)) => lhs == rhs,
            _ => false,
        })
    }
}

impl<'a, S: FieldStorage, M: Access> fmt::Debug for CollectionView<'a, S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("CollectionView(null)");
        }
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::point::{Point, PointSet};
    use crate::view::access::ReadWrite;
    use crate::view::layout::Contiguous;

    fn make_set() -> PointSet {
        PointSet::from_records([
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn default_view_is_null() {
        let view: CollectionView<'_, PointSet> = CollectionView::default();
        assert!(view.is_null());
        assert!(view.is_empty());
        assert_eq!(view.at(0).unwrap_err(), ChemistError::NullView);
        assert_eq!(view.subset([]).unwrap_err(), ChemistError::NullView);
        assert_eq!(format!("{view:?}"), "CollectionView(null)");
    }

    #[test]
    fn contiguous_view_covers_every_row_in_order() {
        let set = make_set();
        let view = set.view();
        assert_eq!(view.len(), 4);
        assert_eq!(view.storage(), Some(&set));
        let xs: Vec<f64> = view.iter().map(|p| p.x().unwrap()).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn with_layout_offsets_into_the_storage() {
        let set = make_set();
        let view = CollectionView::<PointSet, ReadOnly>::with_layout(
            &set,
            Layout::from(Contiguous::new(1, 2)),
        )
        .unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.at(0).unwrap().x(), Ok(2.0));
        assert_eq!(
            view.at(2).unwrap_err(),
            ChemistError::OutOfRange { index: 2, len: 2 }
        );

        let too_long = CollectionView::<PointSet, ReadOnly>::with_layout(
            &set,
            Layout::from(Contiguous::new(3, 2)),
        );
        assert_eq!(
            too_long.unwrap_err(),
            ChemistError::OutOfRange { index: 4, len: 4 }
        );
    }

    #[test]
    fn subset_of_a_subset_resolves_to_the_storage() {
        let set = make_set();
        let outer = set.view().subset([3, 1, 0]).unwrap();
        let inner = outer.subset([2, 0]).unwrap();
        assert_eq!(inner.get(0).unwrap().x(), Ok(1.0));
        assert_eq!(inner.get(1).unwrap().x(), Ok(4.0));
        assert_eq!(
            outer.subset([3]).unwrap_err(),
            ChemistError::OutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn get_outlives_the_view_it_came_from() {
        let set = make_set();
        let element = {
            let view = set.view();
            view.get(2).unwrap()
        };
        assert_eq!(element, Point::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn read_write_view_mutates_the_storage() {
        let mut set = make_set();
        {
            let mut view = set.view_mut();
            view.at_mut(1).unwrap().set_y(5.0).unwrap();
            view.for_each_mut(|index, mut point| {
                point.set_z(index as f64).unwrap();
            })
            .unwrap();
        }
        assert_eq!(set.y(), &[0.0, 5.0, 0.0, 0.0]);
        assert_eq!(set.z(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn subset_mut_writes_through_to_the_supersystem_rows() {
        let mut set = make_set();
        {
            let mut view = set.view_mut();
            let mut subset = view.subset_mut([3, 0]).unwrap();
            subset.at_mut(0).unwrap().set_x(40.0).unwrap();
            subset.at_mut(1).unwrap().set_x(10.0).unwrap();
        }
        assert_eq!(set.x(), &[10.0, 2.0, 3.0, 40.0]);
    }

    #[test]
    fn reborrowed_view_has_its_own_layout() {
        let mut set = make_set();
        let mut view = CollectionView::<PointSet, ReadWrite>::new(&mut set)
            .into_subset([0, 2])
            .unwrap();
        let original_members = view.layout().as_subset().unwrap().members().as_ptr();
        {
            let mut copy = view.reborrow();
            let copy_members = copy.layout().as_subset().unwrap().members();
            assert_eq!(copy_members, &[0, 2]);
            assert_ne!(copy_members.as_ptr(), original_members);
            copy.at_mut(1).unwrap().set_y(9.0).unwrap();
        }
        assert_eq!(view.at(1).unwrap().y(), Ok(9.0));
        assert_eq!(set.y()[2], 9.0);
    }

    #[test]
    fn equality_ignores_backend_and_access_mode() {
        let mut set = make_set();
        let other = make_set();
        let reordered = PointSet::from_records([
            Point::new(3.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
        ])
        .unwrap();

        let subset = other.view().subset([2, 0]).unwrap();
        assert_eq!(subset, reordered.view());
        assert_eq!(subset, reordered);
        assert_eq!(reordered, subset);

        let mutable = set.view_mut();
        assert_eq!(mutable, other.view());
        assert_ne!(mutable.as_const(), subset);
    }

    #[test]
    fn materialize_copies_only_visible_rows() {
        let set = make_set();
        let owned = set.view().subset([1, 1]).unwrap().materialize().unwrap();
        assert_eq!(owned.x(), &[2.0, 2.0]);
        assert_eq!(
            CollectionView::<PointSet, ReadOnly>::default()
                .materialize()
                .unwrap_err(),
            ChemistError::NullView
        );
    }
}
