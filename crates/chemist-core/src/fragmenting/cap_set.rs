use super::cap::Cap;
use crate::error::{ChemistError, Result};
use crate::models::nucleus::Nuclei;
use crate::view::FieldStorage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Every cap defined for a fragmented system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapSet {
    caps: Vec<Cap>,
}

impl CapSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cap: Cap) {
        self.caps.push(cap);
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&Cap> {
        self.caps.get(index).ok_or(ChemistError::OutOfRange {
            index,
            len: self.caps.len(),
        })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Cap> {
        let len = self.caps.len();
        self.caps
            .get_mut(index)
            .ok_or(ChemistError::OutOfRange { index, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cap> {
        self.caps.iter()
    }

    /// Indices of the caps needed by a fragment made of `fragment` supersystem
    /// nuclei: those anchored inside it that replace a nucleus outside it.
    ///
    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if a cap has no anchor or replaced index.
    pub fn cap_indices(&self, fragment: &BTreeSet<usize>) -> Result<BTreeSet<usize>> {
        let mut indices = BTreeSet::new();
        for (index, cap) in self.caps.iter().enumerate() {
            let anchored = fragment.contains(&cap.anchor_index()?);
            let replaced = fragment.contains(&cap.replaced_index()?);
            if anchored && !replaced {
                indices.insert(index);
            }
        }
        Ok(indices)
    }

    /// The nuclei of every cap [`cap_indices`](Self::cap_indices) selects, copied
    /// into one set in cap order.
    pub fn cap_nuclei(&self, fragment: &BTreeSet<usize>) -> Result<Nuclei> {
        let mut nuclei = Nuclei::new();
        for index in self.cap_indices(fragment)? {
            nuclei.extend_from_view(&self.at(index)?.nuclei())?;
        }
        Ok(nuclei)
    }
}

impl FromIterator<Cap> for CapSet {
    fn from_iter<I: IntoIterator<Item = Cap>>(iter: I) -> Self {
        Self {
            caps: iter.into_iter().collect(),
        }
    }
}
