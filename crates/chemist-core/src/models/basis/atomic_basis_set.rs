use super::contracted_gaussian::{ContractedGaussian, ContractedGaussianView};
use super::primitive::PrimitiveView;
use super::shell::{Shell, ShellView};
use super::ShellType;
use crate::error::{ChemistError, Result};
use crate::models::nucleus::AtomicNumber;
use crate::models::point::{Point, PointView};
use crate::view::{Access, CollectionView, FieldStorage, ReadOnly, ReadWrite};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::trace;

/// A view of the shells of one atomic basis set, contiguous or a subset.
pub type AtomicBasisSetView<'a, M = ReadOnly> = CollectionView<'a, AtomicBasisSet, M>;

/// The shells centered on one atom, stored structure-of-arrays.
///
/// Per-shell data (type, angular momentum, first primitive) live in one array each,
/// and the primitives of every shell are packed back to back into shared
/// coefficient and exponent arrays. All shells share a single center: it is taken
/// from the first shell pushed (or set up front with [`with_center`]), and writing
/// it through any shell view moves every shell.
///
/// [`with_center`]: AtomicBasisSet::with_center
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AtomicBasisSetFields", into = "AtomicBasisSetFields")]
pub struct AtomicBasisSet {
    name: Option<String>,
    atomic_number: Option<AtomicNumber>,
    center: Option<Point>,
    shell_types: Vec<ShellType>,
    ls: Vec<u32>,
    offsets: Vec<usize>,
    coefficients: Vec<f64>,
    exponents: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AtomicBasisSetFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    atomic_number: Option<AtomicNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center: Option<Point>,
    #[serde(default)]
    shells: Vec<Shell>,
}

impl AtomicBasisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty basis set whose shells must all be centered on `center`.
    pub fn with_center(center: Point) -> Self {
        Self {
            center: Some(center),
            ..Self::default()
        }
    }

    /// The basis set name, e.g. `"cc-pVDZ"`.
    ///
    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if no name was ever assigned.
    pub fn name(&self) -> Result<&str> {
        self.name
            .as_deref()
            .ok_or(ChemistError::UnsetOptionalField { field: "name" })
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if no atomic number was ever assigned.
    pub fn atomic_number(&self) -> Result<AtomicNumber> {
        self.atomic_number
            .ok_or(ChemistError::UnsetOptionalField {
                field: "atomic_number",
            })
    }

    pub fn set_atomic_number(&mut self, atomic_number: AtomicNumber) {
        self.atomic_number = Some(atomic_number);
    }

    /// # Errors
    ///
    /// Returns `UnsetOptionalField` for an empty basis set built without a center.
    pub fn center(&self) -> Result<Point> {
        self.center
            .ok_or(ChemistError::UnsetOptionalField { field: "center" })
    }

    /// Range of the packed primitive arrays belonging to shell `index`.
    pub fn primitive_range(&self, index: usize) -> Result<Range<usize>> {
        let start = *self.offsets.get(index).ok_or(ChemistError::OutOfRange {
            index,
            len: self.len(),
        })?;
        let end = self
            .offsets
            .get(index + 1)
            .copied()
            .unwrap_or(self.coefficients.len());
        Ok(start..end)
    }

    /// Total number of primitives over every shell.
    pub fn n_primitives(&self) -> usize {
        self.coefficients.len()
    }

    /// Total number of atomic orbitals over every shell.
    pub fn n_aos(&self) -> usize {
        self.shell_types
            .iter()
            .zip(&self.ls)
            .map(|(shell_type, &l)| shell_type.n_aos(l))
            .sum()
    }

    /// Largest angular momentum of any shell, `None` for an empty basis set.
    pub fn max_l(&self) -> Option<u32> {
        self.ls.iter().copied().max()
    }

    /// Primitive `index`, counting across shells in storage order.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `index >= self.n_primitives()`.
    pub fn primitive(&self, index: usize) -> Result<PrimitiveView<'_, ReadOnly>> {
        self.check_primitive(index)?;
        let center = self
            .center
            .as_ref()
            .ok_or(ChemistError::UnsetOptionalField { field: "center" })?;
        Ok(PrimitiveView::<ReadOnly>::new(
            &self.coefficients[index],
            &self.exponents[index],
            PointView::from(center),
        ))
    }

    pub fn primitive_mut(&mut self, index: usize) -> Result<PrimitiveView<'_, ReadWrite>> {
        self.check_primitive(index)?;
        let Self {
            center,
            coefficients,
            exponents,
            ..
        } = self;
        let center = center
            .as_mut()
            .ok_or(ChemistError::UnsetOptionalField { field: "center" })?;
        Ok(PrimitiveView::<ReadWrite>::new(
            &mut coefficients[index],
            &mut exponents[index],
            PointView::from(center),
        ))
    }

    fn check_primitive(&self, index: usize) -> Result<()> {
        if index < self.n_primitives() {
            Ok(())
        } else {
            Err(ChemistError::OutOfRange {
                index,
                len: self.n_primitives(),
            })
        }
    }

    pub fn shell_type_data(&self) -> &[ShellType] {
        &self.shell_types
    }

    pub fn l_data(&self) -> &[u32] {
        &self.ls
    }

    /// Index of the first packed primitive of each shell.
    pub fn primitive_offset_data(&self) -> &[usize] {
        &self.offsets
    }

    /// Packed coefficients of every shell, in shell order.
    pub fn coefficient_data(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn exponent_data(&self) -> &[f64] {
        &self.exponents
    }

    pub fn coefficient_data_mut(&mut self) -> &mut [f64] {
        &mut self.coefficients
    }

    pub fn exponent_data_mut(&mut self) -> &mut [f64] {
        &mut self.exponents
    }

    fn shells(&self) -> Vec<Shell> {
        let Some(center) = self.center else {
            return Vec::new();
        };
        (0..self.len())
            .filter_map(|index| {
                let range = self.primitive_range(index).ok()?;
                let contraction = ContractedGaussian::new(
                    self.coefficients[range.clone()].to_vec(),
                    self.exponents[range].to_vec(),
                    center,
                )
                .ok()?;
                Some(Shell::new(self.shell_types[index], self.ls[index], contraction))
            })
            .collect()
    }
}

impl FieldStorage for AtomicBasisSet {
    type Record = Shell;
    type View<'a, M: Access> = ShellView<'a, M>;

    fn len(&self) -> usize {
        self.shell_types.len()
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.shell_types.try_reserve(additional)?;
        self.ls.try_reserve(additional)?;
        self.offsets.try_reserve(additional)?;
        Ok(())
    }

    /// Appends a shell, packing its primitives after those already stored.
    ///
    /// # Errors
    ///
    /// Returns `CenterMismatch` if the shell is not centered on the basis set.
    fn push(&mut self, shell: Shell) -> Result<()> {
        let shell_center = *shell.contracted_gaussian.center();
        if self.center.is_some_and(|center| center != shell_center) {
            return Err(ChemistError::CenterMismatch);
        }
        let n_primitives = shell.contracted_gaussian.n_primitives();
        self.reserve(1)?;
        self.coefficients.try_reserve(n_primitives)?;
        self.exponents.try_reserve(n_primitives)?;

        self.center.get_or_insert(shell_center);
        self.offsets.push(self.coefficients.len());
        self.shell_types.push(shell.shell_type);
        self.ls.push(shell.l);
        self.coefficients
            .extend_from_slice(shell.contracted_gaussian.coefficients());
        self.exponents
            .extend_from_slice(shell.contracted_gaussian.exponents());
        trace!(
            shell = self.len() - 1,
            n_primitives, "Appended shell to atomic basis set."
        );
        Ok(())
    }

    fn at(&self, index: usize) -> Result<ShellView<'_, ReadOnly>> {
        let range = self.primitive_range(index)?;
        let center = self
            .center
            .as_ref()
            .ok_or(ChemistError::UnsetOptionalField { field: "center" })?;
        let contraction = ContractedGaussianView::<ReadOnly>::new(
            &self.coefficients[range.clone()],
            &self.exponents[range],
            PointView::from(center),
        )?;
        Ok(ShellView::new(
            &self.shell_types[index],
            &self.ls[index],
            contraction,
        ))
    }

    fn at_mut(&mut self, index: usize) -> Result<ShellView<'_, ReadWrite>> {
        let range = self.primitive_range(index)?;
        let Self {
            center,
            shell_types,
            ls,
            coefficients,
            exponents,
            ..
        } = self;
        let center = center
            .as_mut()
            .ok_or(ChemistError::UnsetOptionalField { field: "center" })?;
        let contraction = ContractedGaussianView::<ReadWrite>::new(
            &mut coefficients[range.clone()],
            &mut exponents[range],
            PointView::from(center),
        )?;
        Ok(ShellView::new(
            &mut shell_types[index],
            &mut ls[index],
            contraction,
        ))
    }
}

impl TryFrom<AtomicBasisSetFields> for AtomicBasisSet {
    type Error = ChemistError;

    fn try_from(fields: AtomicBasisSetFields) -> Result<Self> {
        let mut basis = Self {
            name: fields.name,
            atomic_number: fields.atomic_number,
            center: fields.center,
            ..Self::default()
        };
        basis.reserve(fields.shells.len())?;
        for shell in fields.shells {
            basis.push(shell)?;
        }
        Ok(basis)
    }
}

impl From<AtomicBasisSet> for AtomicBasisSetFields {
    fn from(basis: AtomicBasisSet) -> Self {
        let shells = basis.shells();
        Self {
            name: basis.name,
            atomic_number: basis.atomic_number,
            center: basis.center,
            shells,
        }
    }
}

impl<'a, M: Access> PartialEq<AtomicBasisSet> for AtomicBasisSetView<'a, M> {
    fn eq(&self, other: &AtomicBasisSet) -> bool {
        self.eq_storage(other)
    }
}

impl<'a, M: Access> PartialEq<AtomicBasisSetView<'a, M>> for AtomicBasisSet {
    fn eq(&self, other: &AtomicBasisSetView<'a, M>) -> bool {
        other.eq_storage(self)
    }
}
