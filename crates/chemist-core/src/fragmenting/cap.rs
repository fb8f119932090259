use crate::error::{ChemistError, Result};
use crate::models::nucleus::{Nuclei, NucleiView, Nucleus, NucleusView};
use crate::view::{FieldStorage, ReadOnly, ReadWrite};
use serde::{Deserialize, Serialize};

/// The nuclei used to cap a broken bond when a fragment is cut out of a system.
///
/// A cap is attached to the `anchor` nucleus (inside the fragment) and stands in for
/// the `replaced` nucleus (outside it). Both are indices into the supersystem and
/// both may be left unset until the cap is placed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cap {
    anchor: Option<usize>,
    replaced: Option<usize>,
    nuclei: Nuclei,
}

impl Cap {
    /// # Arguments
    ///
    /// * `anchor` - Supersystem index of the nucleus the cap is bonded to.
    /// * `replaced` - Supersystem index of the nucleus the cap replaces.
    /// * `nuclei` - The nuclei making up the cap.
    pub fn new<I>(anchor: usize, replaced: usize, nuclei: I) -> Result<Self>
    where
        I: IntoIterator<Item = Nucleus>,
    {
        Ok(Self {
            anchor: Some(anchor),
            replaced: Some(replaced),
            nuclei: Nuclei::from_records(nuclei)?,
        })
    }

    pub fn insert(&mut self, nucleus: Nucleus) -> Result<()> {
        self.nuclei.push(nucleus)
    }

    pub fn len(&self) -> usize {
        self.nuclei.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nuclei.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<NucleusView<'_, ReadOnly>> {
        self.nuclei.at(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Result<NucleusView<'_, ReadWrite>> {
        self.nuclei.at_mut(index)
    }

    pub fn nuclei(&self) -> NucleiView<'_, ReadOnly> {
        self.nuclei.view()
    }

    pub fn set_anchor_index(&mut self, anchor: usize) {
        self.anchor = Some(anchor);
    }

    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if the anchor was never set. An anchor of zero
    /// is a valid, set index.
    pub fn anchor_index(&self) -> Result<usize> {
        self.anchor
            .ok_or(ChemistError::UnsetOptionalField { field: "anchor" })
    }

    pub fn set_replaced_index(&mut self, replaced: usize) {
        self.replaced = Some(replaced);
    }

    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if the replaced index was never set.
    pub fn replaced_index(&self) -> Result<usize> {
        self.replaced
            .ok_or(ChemistError::UnsetOptionalField { field: "replaced" })
    }
}
