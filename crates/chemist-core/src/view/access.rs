//! Compile-time resolution of read-only versus read/write access.
//!
//! Every view in this crate is generic over a single [`Access`] parameter. The
//! parameter decides what kind of reference each aliased field is held through,
//! and because nested views reuse the same parameter, the decision propagates all
//! the way down: a read-only shell view yields a read-only contracted Gaussian
//! view, which yields read-only primitives with a read-only center.
//!
//! Mutating accessors only exist on views instantiated with [`ReadWrite`], so asking
//! a read-only view for write access is rejected by the compiler:
//!
//! ```compile_fail
//! use chemist::{Point, PointView, ReadOnly};
//!
//! let point = Point::new(1.0, 2.0, 3.0);
//! let mut view: PointView<'_, ReadOnly> = PointView::from(&point);
//! view.set_x(4.0).unwrap();
//! ```
//!
//! The same holds for nested fields reached through a composite view:
//!
//! ```compile_fail
//! use chemist::{Nucleus, NucleusView, Point, ReadOnly};
//!
//! let nucleus = Nucleus::new("H", 1, 1.0, Point::new(0.0, 0.0, 0.0));
//! let mut view: NucleusView<'_, ReadOnly> = NucleusView::from(&nucleus);
//! *view.point_charge_mut().point_mut().x_mut().unwrap() = 1.0;
//! ```
//!
//! whereas the read/write instantiation accepts it:
//!
//! ```
//! use chemist::{Point, PointView, ReadWrite};
//!
//! let mut point = Point::new(1.0, 2.0, 3.0);
//! let mut view: PointView<'_, ReadWrite> = PointView::from(&mut point);
//! view.set_x(4.0).unwrap();
//! assert_eq!(point.x, 4.0);
//! ```

use super::traits::FieldStorage;
use crate::error::Result;
use std::fmt;
use std::ops::{Deref, Range};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::ReadOnly {}
    impl Sealed for super::ReadWrite {}
}

/// Marker selecting shared, read-only access to aliased fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReadOnly;

/// Marker selecting exclusive, read/write access to aliased fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReadWrite;

/// Maps a mutability marker onto the reference type used for every aliased field.
///
/// The trait is sealed; [`ReadOnly`] and [`ReadWrite`] are its only implementors.
pub trait Access: sealed::Sealed + Copy + fmt::Debug + 'static {
    /// `&'a T` for [`ReadOnly`], `&'a mut T` for [`ReadWrite`].
    type Ref<'a, T: ?Sized + 'a>: Deref<Target = T>;

    /// Whether references of this kind permit mutation.
    const IS_MUTABLE: bool;

    /// Produces a shorter-lived reference of the same mutability.
    fn reborrow<'b, 'a: 'b, T: ?Sized + 'a>(reference: &'b mut Self::Ref<'a, T>)
    -> Self::Ref<'b, T>;

    /// Narrows a slice reference to one of its elements.
    fn index<'a, T: 'a>(slice: Self::Ref<'a, [T]>, index: usize) -> Option<Self::Ref<'a, T>>;

    /// Narrows a slice reference to a sub-slice.
    fn sub_slice<'a, T: 'a>(
        slice: Self::Ref<'a, [T]>,
        range: Range<usize>,
    ) -> Option<Self::Ref<'a, [T]>>;

    /// Builds the record view of row `index` of `storage` with this mutability.
    fn storage_view<'a, S: FieldStorage + 'a>(
        storage: Self::Ref<'a, S>,
        index: usize,
    ) -> Result<S::View<'a, Self>>;
}

impl Access for ReadOnly {
    type Ref<'a, T: ?Sized + 'a> = &'a T;

    const IS_MUTABLE: bool = false;

    fn reborrow<'b, 'a: 'b, T: ?Sized + 'a>(reference: &'b mut &'a T) -> &'b T {
        *reference
    }

    fn index<'a, T: 'a>(slice: &'a [T], index: usize) -> Option<&'a T> {
        slice.get(index)
    }

    fn sub_slice<'a, T: 'a>(slice: &'a [T], range: Range<usize>) -> Option<&'a [T]> {
        slice.get(range)
    }

    fn storage_view<'a, S: FieldStorage + 'a>(
        storage: &'a S,
        index: usize,
    ) -> Result<S::View<'a, ReadOnly>> {
        storage.at(index)
    }
}

impl Access for ReadWrite {
    type Ref<'a, T: ?Sized + 'a> = &'a mut T;

    const IS_MUTABLE: bool = true;

    fn reborrow<'b, 'a: 'b, T: ?Sized + 'a>(reference: &'b mut &'a mut T) -> &'b mut T {
        &mut **reference
    }

    fn index<'a, T: 'a>(slice: &'a mut [T], index: usize) -> Option<&'a mut T> {
        slice.get_mut(index)
    }

    fn sub_slice<'a, T: 'a>(slice: &'a mut [T], range: Range<usize>) -> Option<&'a mut [T]> {
        slice.get_mut(range)
    }

    fn storage_view<'a, S: FieldStorage + 'a>(
        storage: &'a mut S,
        index: usize,
    ) -> Result<S::View<'a, ReadWrite>> {
        storage.at_mut(index)
    }
}
