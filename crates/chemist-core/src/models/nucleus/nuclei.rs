use super::{AtomicNumber, Nucleus, NucleusView};
use crate::error::{ChemistError, Result};
use crate::models::point_charge::Charges;
use crate::view::{Access, CollectionView, FieldStorage, ReadOnly, ReadWrite};
use serde::{Deserialize, Serialize};

/// A view of a set of nuclei, contiguous or a subset.
pub type NucleiView<'a, M = ReadOnly> = CollectionView<'a, Nuclei, M>;

/// Nuclei stored as parallel arrays of names, atomic numbers and masses, plus a
/// [`Charges`] set holding their positions and nuclear charges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Nucleus>", into = "Vec<Nucleus>")]
pub struct Nuclei {
    names: Vec<String>,
    atomic_numbers: Vec<AtomicNumber>,
    masses: Vec<f64>,
    charges: Charges,
}

impl Nuclei {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn atomic_numbers(&self) -> &[AtomicNumber] {
        &self.atomic_numbers
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Positions and nuclear charges of every nucleus.
    pub fn charges(&self) -> &Charges {
        &self.charges
    }

    pub fn names_mut(&mut self) -> &mut [String] {
        &mut self.names
    }

    pub fn atomic_numbers_mut(&mut self) -> &mut [AtomicNumber] {
        &mut self.atomic_numbers
    }

    pub fn masses_mut(&mut self) -> &mut [f64] {
        &mut self.masses
    }

    pub fn charges_mut(&mut self) -> &mut Charges {
        &mut self.charges
    }

    /// Sum of the atomic numbers, i.e. the electron count of the neutral system.
    pub fn total_atomic_number(&self) -> u64 {
        self.atomic_numbers.iter().map(|&z| u64::from(z)).sum()
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

impl FieldStorage for Nuclei {
    type Record = Nucleus;
    type View<'a, M: Access> = NucleusView<'a, M>;

    fn len(&self) -> usize {
        self.names.len()
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.names.try_reserve(additional)?;
        self.atomic_numbers.try_reserve(additional)?;
        self.masses.try_reserve(additional)?;
        self.charges.reserve(additional)
    }

    fn push(&mut self, nucleus: Nucleus) -> Result<()> {
        self.reserve(1)?;
        let Nucleus {
            name,
            atomic_number,
            mass,
            point_charge,
        } = nucleus;
        self.charges.push(point_charge)?;
        self.names.push(name);
        self.atomic_numbers.push(atomic_number);
        self.masses.push(mass);
        Ok(())
    }

    fn at(&self, index: usize) -> Result<NucleusView<'_, ReadOnly>> {
        self.check_index(index)?;
        Ok(NucleusView::new(
            &self.names[index],
            &self.atomic_numbers[index],
            &self.masses[index],
            self.charges.at(index)?,
        ))
    }

    fn at_mut(&mut self, index: usize) -> Result<NucleusView<'_, ReadWrite>> {
        self.check_index(index)?;
        let Self {
            names,
            atomic_numbers,
            masses,
            charges,
        } = self;
        Ok(NucleusView::new(
            &mut names[index],
            &mut atomic_numbers[index],
            &mut masses[index],
            charges.at_mut(index)?,
        ))
    }
}

impl TryFrom<Vec<Nucleus>> for Nuclei {
    type Error = ChemistError;

    fn try_from(nuclei: Vec<Nucleus>) -> Result<Self> {
        Self::from_records(nuclei)
    }
}

impl From<Nuclei> for Vec<Nucleus> {
    fn from(set: Nuclei) -> Self {
        let charges: Vec<_> = set.charges.into();
        set.names
            .into_iter()
            .zip(set.atomic_numbers)
            .zip(set.masses)
            .zip(charges)
            .map(|(((name, atomic_number), mass), point_charge)| Nucleus {
                name,
                atomic_number,
                mass,
                point_charge,
            })
            .collect()
    }
}

impl<'a, M: Access> PartialEq<Nuclei> for NucleiView<'a, M> {
    fn eq(&self, other: &Nuclei) -> bool {
        self.eq_storage(other)
    }
}

impl<'a, M: Access> PartialEq<NucleiView<'a, M>> for Nuclei {
    fn eq(&self, other: &NucleiView<'a, M>) -> bool {
        other.eq_storage(self)
    }
}
