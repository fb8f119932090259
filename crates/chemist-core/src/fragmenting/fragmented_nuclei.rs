use super::cap::Cap;
use super::cap_set::CapSet;
use crate::error::{ChemistError, Result};
use crate::models::nucleus::{Nuclei, NucleiView};
use crate::view::{FieldStorage, Layout, ReadOnly, ReadWrite, Subset};
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::debug;

/// A set of nuclei split into (possibly overlapping) fragments.
///
/// The supersystem is owned here; every fragment is a [`Subset`] of one shared
/// supersystem layout, so fragment views alias the supersystem's storage and
/// writing through one is visible through the supersystem and every other fragment
/// containing the same nucleus.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentedNuclei {
    supersystem: Nuclei,
    layout: Rc<Layout>,
    fragments: Vec<Subset>,
    caps: CapSet,
}

impl FragmentedNuclei {
    /// Takes ownership of `supersystem` with no fragments and no caps.
    pub fn new(supersystem: Nuclei) -> Self {
        let layout = Rc::new(Layout::contiguous(supersystem.len()));
        Self {
            supersystem,
            layout,
            fragments: Vec::new(),
            caps: CapSet::new(),
        }
    }

    pub fn supersystem(&self) -> NucleiView<'_, ReadOnly> {
        self.supersystem.view()
    }

    /// Consumes the fragmentation, returning the supersystem.
    pub fn into_supersystem(self) -> Nuclei {
        self.supersystem
    }

    pub fn n_fragments(&self) -> usize {
        self.fragments.len()
    }

    /// Defines a fragment made of the supersystem nuclei at `members`, in that order.
    ///
    /// Returns the index of the new fragment.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if a member is not a supersystem index.
    pub fn add_fragment<I>(&mut self, members: I) -> Result<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let subset = Subset::new(Rc::clone(&self.layout), members)?;
        debug!(
            fragment = self.fragments.len(),
            size = subset.len(),
            "Added fragment."
        );
        self.fragments.push(subset);
        Ok(self.fragments.len() - 1)
    }

    /// Supersystem indices of the nuclei in fragment `index`.
    pub fn fragment_members(&self, index: usize) -> Result<&[usize]> {
        Ok(self.subset(index)?.members())
    }

    /// A read-only view of fragment `index`.
    pub fn fragment(&self, index: usize) -> Result<NucleiView<'_, ReadOnly>> {
        let layout = Layout::Subset(self.subset(index)?.clone());
        NucleiView::<ReadOnly>::with_layout(&self.supersystem, layout)
    }

    /// A read/write view of fragment `index`, aliasing the supersystem.
    pub fn fragment_mut(&mut self, index: usize) -> Result<NucleiView<'_, ReadWrite>> {
        let layout = Layout::Subset(self.subset(index)?.clone());
        NucleiView::<ReadWrite>::with_layout(&mut self.supersystem, layout)
    }

    /// Read-only views of every fragment, in definition order.
    pub fn fragments(&self) -> impl Iterator<Item = NucleiView<'_, ReadOnly>> + '_ {
        (0..self.n_fragments()).filter_map(move |index| self.fragment(index).ok())
    }

    /// Registers a cap.
    ///
    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if the cap's anchor or replaced index is unset,
    /// and `OutOfRange` if either is not a supersystem index.
    pub fn add_cap(&mut self, cap: Cap) -> Result<()> {
        let len = self.supersystem.len();
        for index in [cap.anchor_index()?, cap.replaced_index()?] {
            if index >= len {
                return Err(ChemistError::OutOfRange { index, len });
            }
        }
        debug!(
            anchor = cap.anchor_index()?,
            replaced = cap.replaced_index()?,
            "Added cap."
        );
        self.caps.push(cap);
        Ok(())
    }

    pub fn caps(&self) -> &CapSet {
        &self.caps
    }

    /// An owned copy of fragment `index` followed by the nuclei of every cap it needs.
    pub fn capped_fragment(&self, index: usize) -> Result<Nuclei> {
        let members: BTreeSet<usize> = self.fragment_members(index)?.iter().copied().collect();
        let mut capped = self.fragment(index)?.materialize()?;
        let cap_nuclei = self.caps.cap_nuclei(&members)?;
        capped.extend_from_view(&cap_nuclei.view())?;
        Ok(capped)
    }

    fn subset(&self, index: usize) -> Result<&Subset> {
        self.fragments.get(index).ok_or(ChemistError::OutOfRange {
            index,
            len: self.fragments.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::nucleus::Nucleus;
    use crate::models::point::Point;
    use crate::view::RecordView;

    fn water_dimer() -> Nuclei {
        Nuclei::from_records([
            Nucleus::new("O", 8, 16.0, Point::new(0.0, 0.0, 0.0)),
            Nucleus::new("H", 1, 1.0, Point::new(0.0, 1.0, 0.0)),
            Nucleus::new("H", 1, 1.0, Point::new(1.0, 0.0, 0.0)),
            Nucleus::new("O", 8, 16.0, Point::new(3.0, 0.0, 0.0)),
            Nucleus::new("H", 1, 1.0, Point::new(3.0, 1.0, 0.0)),
            Nucleus::new("H", 1, 1.0, Point::new(4.0, 0.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn fragments_alias_the_supersystem_in_member_order() {
        let mut system = FragmentedNuclei::new(water_dimer());
        let index = system.add_fragment([5, 3, 4]).unwrap();
        assert_eq!(index, 0);

        let fragment = system.fragment(0).unwrap();
        assert_eq!(fragment.len(), 3);
        assert_eq!(fragment.at(1).unwrap().name(), Ok("O"));
        assert_eq!(fragment.at(0).unwrap().point().x(), Ok(4.0));
        assert_eq!(system.fragment_members(0), Ok(&[5, 3, 4][..]));
    }

    #[test]
    fn add_fragment_rejects_unknown_nuclei() {
        let mut system = FragmentedNuclei::new(water_dimer());
        assert_eq!(
            system.add_fragment([0, 6]),
            Err(ChemistError::OutOfRange { index: 6, len: 6 })
        );
        assert_eq!(system.n_fragments(), 0);
        assert!(system.fragment(0).is_err());
    }

    #[test]
    fn writes_through_one_fragment_are_seen_by_overlapping_fragments() {
        let mut system = FragmentedNuclei::new(water_dimer());
        system.add_fragment([0, 1, 2]).unwrap();
        system.add_fragment([2, 3]).unwrap();

        system
            .fragment_mut(0)
            .unwrap()
            .at_mut(2)
            .unwrap()
            .set_mass(2.0)
            .unwrap();

        assert_eq!(system.fragment(1).unwrap().at(0).unwrap().mass(), Ok(2.0));
        assert_eq!(system.supersystem().at(2).unwrap().mass(), Ok(2.0));
    }

    #[test]
    fn fragment_views_compare_equal_to_equivalent_owned_sets() {
        let mut system = FragmentedNuclei::new(water_dimer());
        system.add_fragment([3, 4, 5]).unwrap();
        let owned = Nuclei::from_records(
            water_dimer()
                .view()
                .iter()
                .skip(3)
                .map(|nucleus| nucleus.materialize().unwrap())
                .collect::<Vec<_>>(),
        )
        .unwrap();
        assert_eq!(system.fragment(0).unwrap(), owned);
        assert_eq!(system.fragments().count(), 1);
    }

    #[test]
    fn capped_fragment_appends_needed_caps() {
        let mut system = FragmentedNuclei::new(water_dimer());
        system.add_fragment([0, 1]).unwrap();
        let cap_h = Nucleus::new("H", 1, 1.0, Point::new(0.8, 0.0, 0.0));
        system.add_cap(Cap::new(0, 2, [cap_h.clone()]).unwrap()).unwrap();
        system
            .add_cap(Cap::new(3, 0, [Nucleus::new("H", 1, 1.0, Point::default())]).unwrap())
            .unwrap();

        let capped = system.capped_fragment(0).unwrap();
        assert_eq!(capped.len(), 3);
        assert_eq!(capped.at(2).unwrap(), cap_h);
        assert_eq!(system.caps().len(), 2);
    }

    #[test]
    fn add_cap_validates_indices() {
        let mut system = FragmentedNuclei::new(water_dimer());
        assert_eq!(
            system.add_cap(Cap::default()),
            Err(ChemistError::UnsetOptionalField { field: "anchor" })
        );
        assert_eq!(
            system.add_cap(Cap::new(0, 9, []).unwrap()),
            Err(ChemistError::OutOfRange { index: 9, len: 6 })
        );
    }
}
