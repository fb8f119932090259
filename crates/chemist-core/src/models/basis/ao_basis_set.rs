use super::ShellType;
use super::atomic_basis_set::AtomicBasisSet;
use super::contracted_gaussian::ContractedGaussianView;
use super::primitive::PrimitiveView;
use super::shell::ShellView;
use crate::error::{ChemistError, Result};
use crate::models::nucleus::AtomicNumber;
use crate::models::point::{PointSet, PointView};
use crate::view::{Access, CollectionView, FieldStorage, ReadOnly, ReadWrite, RecordView};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// A view of the centers of an AO basis set, contiguous or a subset.
pub type AOBasisSetView<'a, M = ReadOnly> = CollectionView<'a, AOBasisSet, M>;

/// The atomic basis sets of every center in a system, flattened into one storage.
///
/// One row per center holds its optional name and atomic number, its position and
/// the index of its first shell. Shells of all centers share one set of per-shell
/// arrays, and their primitives share one pair of coefficient and exponent arrays.
///
/// Shells are numbered across centers: the shells of center 0 come first, then
/// those of center 1, and so on. Primitives are numbered the same way across
/// shells, so [`shell`](Self::shell) and [`primitive`](Self::primitive) reach any
/// function without going through its center.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AtomicBasisSet>", into = "Vec<AtomicBasisSet>")]
pub struct AOBasisSet {
    names: Vec<Option<String>>,
    atomic_numbers: Vec<Option<AtomicNumber>>,
    centers: PointSet,
    shell_offsets: Vec<usize>,
    shell_types: Vec<ShellType>,
    ls: Vec<u32>,
    primitive_offsets: Vec<usize>,
    coefficients: Vec<f64>,
    exponents: Vec<f64>,
}

impl AOBasisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `center` after the centers already stored.
    ///
    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if `center` has no center point.
    pub fn add_center(&mut self, center: AtomicBasisSet) -> Result<()> {
        self.push(center)
    }

    /// Appends a copy of every center of `other`.
    pub fn append(&mut self, other: &AOBasisSet) -> Result<()> {
        self.extend_from_view(&other.view())
    }

    pub fn n_shells(&self) -> usize {
        self.shell_types.len()
    }

    pub fn n_primitives(&self) -> usize {
        self.coefficients.len()
    }

    /// Total number of atomic orbitals over every center.
    pub fn n_aos(&self) -> usize {
        self.shell_types
            .iter()
            .zip(&self.ls)
            .map(|(shell_type, &l)| shell_type.n_aos(l))
            .sum()
    }

    /// Largest angular momentum of any shell, `None` if there are no shells.
    pub fn max_l(&self) -> Option<u32> {
        self.ls.iter().copied().max()
    }

    /// Flat indices of the shells on `center`.
    pub fn shell_range(&self, center: usize) -> Result<Range<usize>> {
        let start = *self
            .shell_offsets
            .get(center)
            .ok_or(ChemistError::OutOfRange {
                index: center,
                len: self.len(),
            })?;
        let end = self
            .shell_offsets
            .get(center + 1)
            .copied()
            .unwrap_or(self.n_shells());
        Ok(start..end)
    }

    /// Flat indices of the primitives of `shell`.
    pub fn primitive_range(&self, shell: usize) -> Result<Range<usize>> {
        if shell >= self.n_shells() {
            return Err(ChemistError::OutOfRange {
                index: shell,
                len: self.n_shells(),
            });
        }
        Ok(self.first_primitive(shell)..self.first_primitive(shell + 1))
    }

    /// Shell `index`, counting across centers.
    pub fn shell(&self, index: usize) -> Result<ShellView<'_, ReadOnly>> {
        let range = self.primitive_range(index)?;
        let center = self.centers.at(self.center_of_shell(index))?;
        let contraction = ContractedGaussianView::<ReadOnly>::new(
            &self.coefficients[range.clone()],
            &self.exponents[range],
            center,
        )?;
        Ok(ShellView::new(
            &self.shell_types[index],
            &self.ls[index],
            contraction,
        ))
    }

    pub fn shell_mut(&mut self, index: usize) -> Result<ShellView<'_, ReadWrite>> {
        let range = self.primitive_range(index)?;
        let center = self.center_of_shell(index);
        let Self {
            centers,
            shell_types,
            ls,
            coefficients,
            exponents,
            ..
        } = self;
        let contraction = ContractedGaussianView::<ReadWrite>::new(
            &mut coefficients[range.clone()],
            &mut exponents[range],
            centers.at_mut(center)?,
        )?;
        Ok(ShellView::new(
            &mut shell_types[index],
            &mut ls[index],
            contraction,
        ))
    }

    /// Primitive `index`, counting across shells and centers.
    pub fn primitive(&self, index: usize) -> Result<PrimitiveView<'_, ReadOnly>> {
        self.check_primitive(index)?;
        let center = self.center_of_shell(self.shell_of_primitive(index));
        Ok(PrimitiveView::<ReadOnly>::new(
            &self.coefficients[index],
            &self.exponents[index],
            self.centers.at(center)?,
        ))
    }

    pub fn primitive_mut(&mut self, index: usize) -> Result<PrimitiveView<'_, ReadWrite>> {
        self.check_primitive(index)?;
        let center = self.center_of_shell(self.shell_of_primitive(index));
        let Self {
            centers,
            coefficients,
            exponents,
            ..
        } = self;
        Ok(PrimitiveView::<ReadWrite>::new(
            &mut coefficients[index],
            &mut exponents[index],
            centers.at_mut(center)?,
        ))
    }

    pub fn center_data(&self) -> &PointSet {
        &self.centers
    }

    pub fn l_data(&self) -> &[u32] {
        &self.ls
    }

    pub fn coefficient_data(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn exponent_data(&self) -> &[f64] {
        &self.exponents
    }

    fn first_primitive(&self, shell: usize) -> usize {
        self.primitive_offsets
            .get(shell)
            .copied()
            .unwrap_or(self.coefficients.len())
    }

    // Both lookups expect an index already checked against the flat counts.
    fn center_of_shell(&self, shell: usize) -> usize {
        self.shell_offsets
            .partition_point(|&start| start <= shell)
            .saturating_sub(1)
    }

    fn shell_of_primitive(&self, primitive: usize) -> usize {
        self.primitive_offsets
            .partition_point(|&start| start <= primitive)
            .saturating_sub(1)
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
}

impl FieldStorage for AOBasisSet {
    type Record = AtomicBasisSet;
    type View<'a, M: Access> = BasisCenterView<'a, M>;

    fn len(&self) -> usize {
        self.shell_offsets.len()
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.names.try_reserve(additional)?;
        self.atomic_numbers.try_reserve(additional)?;
        self.shell_offsets.try_reserve(additional)?;
        self.centers.reserve(additional)
    }

    /// Appends a center, packing its shells and primitives after those already stored.
    ///
    /// # Errors
    ///
    /// Returns `UnsetOptionalField` if `basis` has no center point.
    fn push(&mut self, basis: AtomicBasisSet) -> Result<()> {
        let center = basis.center()?;
        let n_shells = basis.len();
        let n_primitives = basis.n_primitives();
        self.reserve(1)?;
        self.shell_types.try_reserve(n_shells)?;
        self.ls.try_reserve(n_shells)?;
        self.primitive_offsets.try_reserve(n_shells)?;
        self.coefficients.try_reserve(n_primitives)?;
        self.exponents.try_reserve(n_primitives)?;

        let first_primitive = self.coefficients.len();
        self.centers.push(center)?;
        self.names.push(basis.name().ok().map(str::to_owned));
        self.atomic_numbers.push(basis.atomic_number().ok());
        self.shell_offsets.push(self.shell_types.len());
        self.shell_types.extend_from_slice(basis.shell_type_data());
        self.ls.extend_from_slice(basis.l_data());
        self.primitive_offsets.extend(
            basis
                .primitive_offset_data()
                .iter()
                .map(|offset| first_primitive + offset),
        );
        self.coefficients
            .extend_from_slice(basis.coefficient_data());
        self.exponents.extend_from_slice(basis.exponent_data());
        debug!(
            center = self.len() - 1,
            n_shells, n_primitives, "Added center to AO basis set."
        );
        Ok(())
    }

    fn at(&self, index: usize) -> Result<BasisCenterView<'_, ReadOnly>> {
        let shells = self.shell_range(index)?;
        let primitives = self.first_primitive(shells.start)..self.first_primitive(shells.end);
        Ok(BasisCenterView {
            parts: Some(CenterParts {
                name: &self.names[index],
                atomic_number: &self.atomic_numbers[index],
                center: self.centers.at(index)?,
                shell_types: &self.shell_types[shells.clone()],
                ls: &self.ls[shells.clone()],
                primitive_offsets: &self.primitive_offsets[shells],
                first_primitive: primitives.start,
                coefficients: &self.coefficients[primitives.clone()],
                exponents: &self.exponents[primitives],
            }),
        })
    }

    fn at_mut(&mut self, index: usize) -> Result<BasisCenterView<'_, ReadWrite>> {
        let shells = self.shell_range(index)?;
        let primitives = self.first_primitive(shells.start)..self.first_primitive(shells.end);
        let Self {
            names,
            atomic_numbers,
            centers,
            shell_types,
            ls,
            primitive_offsets,
            coefficients,
            exponents,
            ..
        } = self;
        Ok(BasisCenterView {
            parts: Some(CenterParts {
                name: &mut names[index],
                atomic_number: &mut atomic_numbers[index],
                center: centers.at_mut(index)?,
                shell_types: &mut shell_types[shells.clone()],
                ls: &mut ls[shells.clone()],
                primitive_offsets: &primitive_offsets[shells],
                first_primitive: primitives.start,
                coefficients: &mut coefficients[primitives.clone()],
                exponents: &mut exponents[primitives],
            }),
        })
    }
}

impl TryFrom<Vec<AtomicBasisSet>> for AOBasisSet {
    type Error = ChemistError;

    fn try_from(centers: Vec<AtomicBasisSet>) -> Result<Self> {
        Self::from_records(centers)
    }
}

impl From<AOBasisSet> for Vec<AtomicBasisSet> {
    fn from(basis: AOBasisSet) -> Self {
        (0..basis.len())
            .filter_map(|index| basis.at(index).ok()?.materialize().ok())
            .collect()
    }
}

impl<'a, M: Access> PartialEq<AOBasisSet> for AOBasisSetView<'a, M> {
    fn eq(&self, other: &AOBasisSet) -> bool {
        self.eq_storage(other)
    }
}

impl<'a, M: Access> PartialEq<AOBasisSetView<'a, M>> for AOBasisSet {
    fn eq(&self, other: &AOBasisSetView<'a, M>) -> bool {
        other.eq_storage(self)
    }
}

/// Aliases everything an [`AOBasisSet`] stores for one center: name, atomic number,
/// position and the slices of the shared arrays holding its shells.
///
/// Materializes into an [`AtomicBasisSet`].
pub struct BasisCenterView<'a, M: Access = ReadOnly> {
    parts: Option<CenterParts<'a, M>>,
}

struct CenterParts<'a, M: Access> {
    name: M::Ref<'a, Option<String>>,
    atomic_number: M::Ref<'a, Option<AtomicNumber>>,
    center: PointView<'a, M>,
    shell_types: M::Ref<'a, [ShellType]>,
    ls: M::Ref<'a, [u32]>,
    /// Storage-wide offsets; `first_primitive` rebases them onto the slices below.
    primitive_offsets: &'a [usize],
    first_primitive: usize,
    coefficients: M::Ref<'a, [f64]>,
    exponents: M::Ref<'a, [f64]>,
}

impl<'a, M: Access> CenterParts<'a, M> {
    fn n_shells(&self) -> usize {
        self.shell_types.len()
    }

    fn primitive_range(&self, shell: usize) -> Result<Range<usize>> {
        let start = *self
            .primitive_offsets
            .get(shell)
            .ok_or(ChemistError::OutOfRange {
                index: shell,
                len: self.n_shells(),
            })?;
        let end = self
            .primitive_offsets
            .get(shell + 1)
            .copied()
            .unwrap_or(self.first_primitive + self.coefficients.len());
        Ok(start - self.first_primitive..end - self.first_primitive)
    }
}

impl<'a> Clone for CenterParts<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for CenterParts<'a, ReadOnly> {}

impl<'a, M: Access> Default for BasisCenterView<'a, M> {
    fn default() -> Self {
        Self { parts: None }
    }
}

impl<'a, M: Access> BasisCenterView<'a, M> {
    fn parts(&self) -> Result<&CenterParts<'a, M>> {
        self.parts.as_ref().ok_or(ChemistError::NullView)
    }

    /// # Errors
    ///
    /// `NullView` for a null view, `UnsetOptionalField` if the center has no name.
    pub fn name(&self) -> Result<&str> {
        let name: &Option<String> = &self.parts()?.name;
        name.as_deref()
            .ok_or(ChemistError::UnsetOptionalField { field: "name" })
    }

    pub fn atomic_number(&self) -> Result<AtomicNumber> {
        let atomic_number: &Option<AtomicNumber> = &self.parts()?.atomic_number;
        atomic_number.ok_or(ChemistError::UnsetOptionalField {
            field: "atomic_number",
        })
    }

    pub fn center(&self) -> Result<&PointView<'a, M>> {
        Ok(&self.parts()?.center)
    }

    /// Number of shells on this center; zero for a null view.
    pub fn n_shells(&self) -> usize {
        self.parts.as_ref().map_or(0, CenterParts::n_shells)
    }

    pub fn n_primitives(&self) -> usize {
        self.parts
            .as_ref()
            .map_or(0, |parts| parts.coefficients.len())
    }

    pub fn n_aos(&self) -> usize {
        self.parts.as_ref().map_or(0, |parts| {
            parts
                .shell_types
                .iter()
                .zip(parts.ls.iter())
                .map(|(shell_type, &l)| shell_type.n_aos(l))
                .sum()
        })
    }

    pub fn max_l(&self) -> Option<u32> {
        self.parts.as_ref()?.ls.iter().copied().max()
    }

    /// Shell `index` of this center, read-only.
    pub fn shell(&self, index: usize) -> Result<ShellView<'_, ReadOnly>> {
        let parts = self.parts()?;
        let range = parts.primitive_range(index)?;
        let shell_types: &[ShellType] = &parts.shell_types;
        let ls: &[u32] = &parts.ls;
        let coefficients: &[f64] = &parts.coefficients;
        let exponents: &[f64] = &parts.exponents;
        let contraction = ContractedGaussianView::<ReadOnly>::new(
            &coefficients[range.clone()],
            &exponents[range],
            parts.center.as_const(),
        )?;
        Ok(ShellView::new(&shell_types[index], &ls[index], contraction))
    }

    /// Shell `index` of this center with this view's access mode.
    pub fn shell_mut(&mut self, index: usize) -> Result<ShellView<'_, M>> {
        let parts = self.parts.as_mut().ok_or(ChemistError::NullView)?;
        let range = parts.primitive_range(index)?;
        let out_of_range = ChemistError::OutOfRange {
            index,
            len: parts.n_shells(),
        };
        let CenterParts {
            center,
            shell_types,
            ls,
            coefficients,
            exponents,
            ..
        } = parts;
        let shell_type =
            M::index(M::reborrow(shell_types), index).ok_or(out_of_range.clone())?;
        let l = M::index(M::reborrow(ls), index).ok_or(out_of_range.clone())?;
        let coefficients =
            M::sub_slice(M::reborrow(coefficients), range.clone()).ok_or(out_of_range.clone())?;
        let exponents = M::sub_slice(M::reborrow(exponents), range).ok_or(out_of_range)?;
        let contraction =
            ContractedGaussianView::<M>::new(coefficients, exponents, center.reborrow())?;
        Ok(ShellView::<M>::new(shell_type, l, contraction))
    }

    pub fn shells(&self) -> impl Iterator<Item = ShellView<'_, ReadOnly>> + '_ {
        (0..self.n_shells()).filter_map(move |index| self.shell(index).ok())
    }

    pub fn as_const(&self) -> BasisCenterView<'_, ReadOnly> {
        BasisCenterView {
            parts: self.parts.as_ref().map(|parts| CenterParts {
                name: &*parts.name,
                atomic_number: &*parts.atomic_number,
                center: parts.center.as_const(),
                shell_types: &*parts.shell_types,
                ls: &*parts.ls,
                primitive_offsets: parts.primitive_offsets,
                first_primitive: parts.first_primitive,
                coefficients: &*parts.coefficients,
                exponents: &*parts.exponents,
            }),
        }
    }
}

impl<'a> BasisCenterView<'a, ReadWrite> {
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let parts = self.parts.as_mut().ok_or(ChemistError::NullView)?;
        *parts.name = Some(name.into());
        Ok(())
    }

    pub fn set_atomic_number(&mut self, atomic_number: AtomicNumber) -> Result<()> {
        let parts = self.parts.as_mut().ok_or(ChemistError::NullView)?;
        *parts.atomic_number = Some(atomic_number);
        Ok(())
    }

    /// The center position. Moving it moves every shell of the center.
    pub fn center_mut(&mut self) -> Result<&mut PointView<'a, ReadWrite>> {
        let parts = self.parts.as_mut().ok_or(ChemistError::NullView)?;
        Ok(&mut parts.center)
    }
}

impl<'a, M: Access> RecordView for BasisCenterView<'a, M> {
    type Record = AtomicBasisSet;

    fn is_null(&self) -> bool {
        self.parts.is_none()
    }

    fn materialize(&self) -> Result<AtomicBasisSet> {
        let parts = self.parts()?;
        let mut basis = AtomicBasisSet::with_center(parts.center.materialize()?);
        if let Ok(name) = self.name() {
            basis.set_name(name);
        }
        if let Ok(atomic_number) = self.atomic_number() {
            basis.set_atomic_number(atomic_number);
        }
        basis.reserve(parts.n_shells())?;
        for index in 0..parts.n_shells() {
            basis.push(self.shell(index)?.materialize()?)?;
        }
        Ok(basis)
    }
}

impl<'a> Clone for BasisCenterView<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for BasisCenterView<'a, ReadOnly> {}

impl<'a, 'b, M: Access, N: Access> PartialEq<BasisCenterView<'b, N>> for BasisCenterView<'a, M> {
    fn eq(&self, other: &BasisCenterView<'b, N>) -> bool {
        match (&self.parts, &other.parts) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => {
                *lhs.name == *rhs.name
                    && *lhs.atomic_number == *rhs.atomic_number
                    && lhs.center == rhs.center
                    && self.n_shells() == other.n_shells()
                    && (0..self.n_shells()).all(|index| {
                        matches!(
                            (self.shell(index), other.shell(index)),
                            (Ok(lhs), Ok(rhs)) if lhs == rhs
                        )
                    })
            }
            _ => false,
        }
    }
}

impl<'a, M: Access> PartialEq<AtomicBasisSet> for BasisCenterView<'a, M> {
    fn eq(&self, other: &AtomicBasisSet) -> bool {
        let Some(parts) = &self.parts else {
            return false;
        };
        self.name().ok() == other.name().ok()
            && self.atomic_number().ok() == other.atomic_number().ok()
            && other.center().is_ok_and(|center| parts.center == center)
            && self.n_shells() == other.len()
            && (0..other.len()).all(|index| {
                matches!(
                    (self.shell(index), other.at(index)),
                    (Ok(lhs), Ok(rhs)) if lhs == rhs
                )
            })
    }
}

impl<'a, M: Access> PartialEq<BasisCenterView<'a, M>> for AtomicBasisSet {
    fn eq(&self, other: &BasisCenterView<'a, M>) -> bool {
        other == self
    }
}

impl<'a, M: Access> fmt::Debug for BasisCenterView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(parts) = &self.parts else {
            return f.write_str("BasisCenterView(null)");
        };
        f.debug_struct("BasisCenterView")
            .field("name", &self.name().ok())
            .field("atomic_number", &self.atomic_number().ok())
            .field("center", &parts.center)
            .field("shells", &self.shells().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::basis::{ContractedGaussian, Primitive, Shell};
    use crate::models::point::Point;

    fn oxygen_center() -> Point {
        Point::new(0.0, 0.0, 1.2)
    }

    fn s_shell(center: Point) -> Shell {
        let contraction =
            ContractedGaussian::new(vec![0.15, 0.53, 0.44], vec![3.42, 0.62, 0.17], center)
                .unwrap();
        Shell::new(ShellType::Pure, 0, contraction)
    }

    fn p_shell(center: Point) -> Shell {
        let contraction = ContractedGaussian::new(vec![1.0], vec![0.8], center).unwrap();
        Shell::new(ShellType::Cartesian, 1, contraction)
    }

    fn hydrogen() -> AtomicBasisSet {
        let mut basis = AtomicBasisSet::from_records([s_shell(Point::default())]).unwrap();
        basis.set_name("sto-3g");
        basis.set_atomic_number(1);
        basis
    }

    fn oxygen() -> AtomicBasisSet {
        let center = oxygen_center();
        let mut basis = AtomicBasisSet::from_records([s_shell(center), p_shell(center)]).unwrap();
        basis.set_name("sto-3g");
        basis.set_atomic_number(8);
        basis
    }

    fn make_basis() -> AOBasisSet {
        AOBasisSet::from_records([hydrogen(), oxygen()]).unwrap()
    }

    #[test]
    fn shells_and_primitives_are_numbered_across_centers() {
        let basis = make_basis();
        assert_eq!(basis.len(), 2);
        assert_eq!(basis.n_shells(), 3);
        assert_eq!(basis.n_primitives(), 7);
        assert_eq!(basis.n_aos(), 5);
        assert_eq!(basis.max_l(), Some(1));

        assert_eq!(basis.shell_range(0), Ok(0..1));
        assert_eq!(basis.shell_range(1), Ok(1..3));
        assert_eq!(
            basis.shell_range(2),
            Err(ChemistError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(basis.primitive_range(1), Ok(3..6));
        assert_eq!(basis.primitive_range(2), Ok(6..7));
        assert_eq!(
            basis.primitive_range(3),
            Err(ChemistError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn flat_shell_and_primitive_views_carry_their_center() {
        let basis = make_basis();
        assert_eq!(basis.shell(0).unwrap(), s_shell(Point::default()));
        assert_eq!(basis.shell(2).unwrap(), p_shell(oxygen_center()));
        assert_eq!(
            basis.primitive(2).unwrap(),
            Primitive::new(0.44, 0.17, Point::default())
        );
        assert_eq!(
            basis.primitive(6).unwrap(),
            Primitive::new(1.0, 0.8, oxygen_center())
        );
        assert_eq!(
            basis.primitive(7).unwrap_err(),
            ChemistError::OutOfRange { index: 7, len: 7 }
        );
    }

    #[test]
    fn flat_writes_land_in_the_shared_arrays() {
        let mut basis = make_basis();
        basis
            .shell_mut(2)
            .unwrap()
            .primitive_mut(0)
            .unwrap()
            .set_exponent(0.9)
            .unwrap();
        basis.primitive_mut(0).unwrap().set_coefficient(0.2).unwrap();
        assert_eq!(basis.exponent_data()[6], 0.9);
        assert_eq!(basis.coefficient_data()[0], 0.2);

        basis
            .shell_mut(1)
            .unwrap()
            .contracted_gaussian_mut()
            .center_mut()
            .set_x(0.5)
            .unwrap();
        assert_eq!(basis.shell(2).unwrap().contracted_gaussian().center().x(), Ok(0.5));
        assert_eq!(basis.shell(0).unwrap().contracted_gaussian().center().x(), Ok(0.0));
    }

    #[test]
    fn center_views_alias_one_atomic_basis_set() {
        let basis = make_basis();
        let oxygen_view = basis.at(1).unwrap();
        assert_eq!(oxygen_view.name(), Ok("sto-3g"));
        assert_eq!(oxygen_view.atomic_number(), Ok(8));
        assert_eq!(oxygen_view.n_shells(), 2);
        assert_eq!(oxygen_view.n_primitives(), 4);
        assert_eq!(oxygen_view.n_aos(), 4);
        assert_eq!(oxygen_view.center().unwrap().z(), Ok(1.2));
        assert_eq!(oxygen_view.shell(1).unwrap(), p_shell(oxygen_center()));
        assert_eq!(oxygen_view, oxygen());
        assert_eq!(oxygen(), oxygen_view);
        assert_ne!(oxygen_view, hydrogen());
        assert_eq!(oxygen_view.materialize(), Ok(oxygen()));
        assert_eq!(
            oxygen_view.shell(2).unwrap_err(),
            ChemistError::OutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn center_views_write_through_to_the_storage() {
        let mut basis = make_basis();
        {
            let mut center = basis.at_mut(0).unwrap();
            center.set_name("6-31g").unwrap();
            center.set_atomic_number(2).unwrap();
            center.shell_mut(0).unwrap().set_l(2).unwrap();
            center.center_mut().unwrap().set_y(-1.0).unwrap();
        }
        assert_eq!(basis.at(0).unwrap().name(), Ok("6-31g"));
        assert_eq!(basis.at(0).unwrap().atomic_number(), Ok(2));
        assert_eq!(basis.l_data(), &[2, 0, 1]);
        assert_eq!(basis.n_aos(), 9);
        assert_eq!(basis.center_data().y(), &[-1.0, 0.0]);
    }

    #[test]
    fn centers_without_shells_are_skipped_by_flat_numbering() {
        let empty = AtomicBasisSet::with_center(Point::new(5.0, 0.0, 0.0));
        let basis = AOBasisSet::from_records([hydrogen(), empty.clone(), oxygen()]).unwrap();
        assert_eq!(basis.shell_range(1), Ok(1..1));
        assert_eq!(basis.shell(1).unwrap(), s_shell(oxygen_center()));
        assert_eq!(
            basis.primitive(3).unwrap().center().z(),
            Ok(oxygen_center().z)
        );
        assert_eq!(basis.at(1).unwrap().n_shells(), 0);
        assert_eq!(basis.at(1).unwrap().max_l(), None);
        assert_eq!(basis.at(1).unwrap().materialize(), Ok(empty));
    }

    #[test]
    fn add_center_requires_a_center_point() {
        let mut basis = make_basis();
        assert_eq!(
            basis.add_center(AtomicBasisSet::new()),
            Err(ChemistError::UnsetOptionalField { field: "center" })
        );
        assert_eq!(basis.len(), 2);
        assert_eq!(basis.n_shells(), 3);
    }

    #[test]
    fn append_copies_every_center_of_another_basis_set() {
        let mut basis = AOBasisSet::from_records([hydrogen()]).unwrap();
        let other = AOBasisSet::from_records([oxygen()]).unwrap();
        basis.append(&other).unwrap();
        assert_eq!(basis, make_basis());
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn subset_views_select_centers() {
        let basis = make_basis();
        let oxygen_only = basis.view().subset([1]).unwrap();
        assert_eq!(oxygen_only.at(0).unwrap(), oxygen());
        assert_eq!(
            oxygen_only.materialize().unwrap(),
            AOBasisSet::from_records([oxygen()]).unwrap()
        );
        assert_eq!(
            basis
                .view()
                .iter()
                .map(|center| center.n_shells())
                .collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(basis.view(), make_basis());
    }

    #[test]
    fn null_center_view_rejects_access() {
        let view: BasisCenterView<'_, ReadWrite> = BasisCenterView::default();
        assert!(view.is_null());
        assert_eq!(view.name(), Err(ChemistError::NullView));
        assert_eq!(view.n_shells(), 0);
        assert_eq!(view.shell(0).unwrap_err(), ChemistError::NullView);
        assert_eq!(view.materialize(), Err(ChemistError::NullView));
        assert_eq!(format!("{view:?}"), "BasisCenterView(null)");
    }

    #[test]
    fn failed_reserve_leaves_every_field_array_at_the_same_length() {
        let mut basis = make_basis();
        assert!(matches!(
            basis.reserve(usize::MAX),
            Err(ChemistError::Allocation(_))
        ));
        assert_eq!(basis.len(), 2);
        assert_eq!(basis.center_data().len(), 2);
        assert_eq!(basis.n_shells(), 3);
        assert_eq!(basis.l_data().len(), 3);
        assert_eq!(basis.coefficient_data().len(), basis.exponent_data().len());
        assert_eq!(basis.max_l(), Some(1));
        assert_eq!(AOBasisSet::new().max_l(), None);
    }
}
