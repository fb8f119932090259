use crate::error::{ChemistError, Result};
use std::ops::Range;
use std::rc::Rc;

/// The backend of a [`CollectionView`](super::collection::CollectionView): how
/// logical element indices map onto rows of the aliased storage.
///
/// A layout only ever holds indices. Cloning one deep-copies any member list and
/// shares any supersystem layout, but never touches field data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Layout {
    /// Not bound to anything yet. Every lookup fails with `NullView`.
    #[default]
    Empty,
    /// A run of consecutive rows.
    Contiguous(Contiguous),
    /// An ordered selection of elements of a supersystem layout.
    Subset(Subset),
}

/// `len` consecutive rows starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contiguous {
    offset: usize,
    len: usize,
}

/// An ordered list of element indices into a shared supersystem layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset {
    supersystem: Rc<Layout>,
    members: Vec<usize>,
}

impl Contiguous {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The storage rows covered, usable to slice bulk field data directly.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    fn resolve(&self, index: usize) -> Result<usize> {
        if index < self.len {
            Ok(self.offset + index)
        } else {
            Err(ChemistError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }
}

impl Subset {
    /// Selects `members` (in order, repeats allowed) out of `supersystem`.
    ///
    /// # Errors
    ///
    /// Returns `NullView` if `supersystem` is [`Layout::Empty`] and `OutOfRange`
    /// for the first member that is not an element of `supersystem`.
    pub fn new<I>(supersystem: Rc<Layout>, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        if supersystem.is_null() {
            return Err(ChemistError::NullView);
        }
        let members: Vec<usize> = members.into_iter().collect();
        let len = supersystem.len();
        if let Some(&index) = members.iter().find(|&&member| member >= len) {
            return Err(ChemistError::OutOfRange { index, len });
        }
        Ok(Self {
            supersystem,
            members,
        })
    }

    pub fn supersystem(&self) -> &Rc<Layout> {
        &self.supersystem
    }

    /// Supersystem element indices, in subset order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn resolve(&self, index: usize) -> Result<usize> {
        let member = self
            .members
            .get(index)
            .copied()
            .ok_or(ChemistError::OutOfRange {
                index,
                len: self.members.len(),
            })?;
        self.supersystem.resolve(member)
    }
}

impl Layout {
    /// Every row of a storage holding `len` records.
    pub fn contiguous(len: usize) -> Self {
        Layout::Contiguous(Contiguous::new(0, len))
    }

    /// Number of logical elements addressed.
    pub fn len(&self) -> usize {
        match self {
            Layout::Empty => 0,
            Layout::Contiguous(contiguous) => contiguous.len(),
            Layout::Subset(subset) => subset.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for [`Layout::Empty`].
    pub fn is_null(&self) -> bool {
        matches!(self, Layout::Empty)
    }

    /// Maps logical element `index` onto a storage row.
    ///
    /// # Errors
    ///
    /// `NullView` for an empty layout, `OutOfRange` if `index >= self.len()`.
    pub fn resolve(&self, index: usize) -> Result<usize> {
        match self {
            Layout::Empty => Err(ChemistError::NullView),
            Layout::Contiguous(contiguous) => contiguous.resolve(index),
            Layout::Subset(subset) => subset.resolve(index),
        }
    }

    /// Storage rows addressed, in logical order.
    pub fn physical_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter_map(move |index| self.resolve(index).ok())
    }

    pub fn as_contiguous(&self) -> Option<&Contiguous> {
        match self {
            Layout::Contiguous(contiguous) => Some(contiguous),
            _ => None,
        }
    }

    pub fn as_subset(&self) -> Option<&Subset> {
        match self {
            Layout::Subset(subset) => Some(subset),
            _ => None,
        }
    }
}

impl From<Contiguous> for Layout {
    fn from(contiguous: Contiguous) -> Self {
        Layout::Contiguous(contiguous)
    }
}

impl From<Subset> for Layout {
    fn from(subset: Subset) -> Self {
        Layout::Subset(subset)
    }
}
