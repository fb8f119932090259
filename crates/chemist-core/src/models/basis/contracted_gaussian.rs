use super::primitive::{Primitive, PrimitiveView};
use crate::error::{ChemistError, Result};
use crate::models::point::{Point, PointView};
use crate::view::{Access, ReadOnly, ReadWrite, RecordView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed linear combination of primitives sharing one center.
///
/// Coefficients and exponents are stored as two parallel arrays of equal length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ContractedGaussianFields")]
pub struct ContractedGaussian {
    coefficients: Vec<f64>,
    exponents: Vec<f64>,
    center: Point,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ContractedGaussianFields {
    coefficients: Vec<f64>,
    exponents: Vec<f64>,
    center: Point,
}

impl TryFrom<ContractedGaussianFields> for ContractedGaussian {
    type Error = ChemistError;

    fn try_from(fields: ContractedGaussianFields) -> Result<Self> {
        Self::new(fields.coefficients, fields.exponents, fields.center)
    }
}

impl ContractedGaussian {
    /// # Errors
    ///
    /// Returns `LengthMismatch` if `coefficients` and `exponents` differ in length.
    pub fn new(coefficients: Vec<f64>, exponents: Vec<f64>, center: Point) -> Result<Self> {
        if coefficients.len() != exponents.len() {
            return Err(ChemistError::LengthMismatch {
                expected: coefficients.len(),
                found: exponents.len(),
            });
        }
        Ok(Self {
            coefficients,
            exponents,
            center,
        })
    }

    /// Builds a contraction out of primitives that all share `center`.
    pub fn from_primitives<I>(center: Point, primitives: I) -> Result<Self>
    where
        I: IntoIterator<Item = Primitive>,
    {
        let mut contraction = Self::new(Vec::new(), Vec::new(), center)?;
        for primitive in primitives {
            if primitive.center != center {
                return Err(ChemistError::CenterMismatch);
            }
            contraction.coefficients.try_reserve(1)?;
            contraction.exponents.try_reserve(1)?;
            contraction.coefficients.push(primitive.coefficient);
            contraction.exponents.push(primitive.exponent);
        }
        Ok(contraction)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn n_primitives(&self) -> usize {
        self.coefficients.len()
    }

    pub fn primitive(&self, index: usize) -> Result<Primitive> {
        ContractedGaussianView::from(self).at(index)?.materialize()
    }
}

/// Aliases the coefficient and exponent arrays of one contraction plus its center.
///
/// The arrays may be a whole [`ContractedGaussian`] or a sub-slice of the packed
/// arrays of an [`AtomicBasisSet`](super::AtomicBasisSet).
pub struct ContractedGaussianView<'a, M: Access = ReadOnly> {
    coefficients: Option<M::Ref<'a, [f64]>>,
    exponents: Option<M::Ref<'a, [f64]>>,
    center: PointView<'a, M>,
}

impl<'a, M: Access> Default for ContractedGaussianView<'a, M> {
    fn default() -> Self {
        Self {
            coefficients: None,
            exponents: None,
            center: PointView::default(),
        }
    }
}

impl<'a, M: Access> ContractedGaussianView<'a, M> {
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the two slices differ in length.
    pub fn new(
        coefficients: M::Ref<'a, [f64]>,
        exponents: M::Ref<'a, [f64]>,
        center: PointView<'a, M>,
    ) -> Result<Self> {
        if coefficients.len() != exponents.len() {
            return Err(ChemistError::LengthMismatch {
                expected: coefficients.len(),
                found: exponents.len(),
            });
        }
        Ok(Self {
            coefficients: Some(coefficients),
            exponents: Some(exponents),
            center,
        })
    }

    /// Number of primitives; zero for a null view.
    pub fn len(&self) -> usize {
        self.coefficients.as_deref().map_or(0, <[f64]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn coefficients(&self) -> Result<&[f64]> {
        self.coefficients.as_deref().ok_or(ChemistError::NullView)
    }

    pub fn exponents(&self) -> Result<&[f64]> {
        self.exponents.as_deref().ok_or(ChemistError::NullView)
    }

    pub fn center(&self) -> &PointView<'a, M> {
        &self.center
    }

    /// A read-only view of primitive `index`.
    pub fn at(&self, index: usize) -> Result<PrimitiveView<'_, ReadOnly>> {
        let coefficients = self.coefficients()?;
        let exponents = self.exponents()?;
        let out_of_range = ChemistError::OutOfRange {
            index,
            len: coefficients.len(),
        };
        let coefficient = coefficients.get(index).ok_or(out_of_range.clone())?;
        let exponent = exponents.get(index).ok_or(out_of_range)?;
        Ok(PrimitiveView::<ReadOnly>::new(
            coefficient,
            exponent,
            self.center.as_const(),
        ))
    }

    /// A view of primitive `index` with this view's access mode.
    pub fn at_mut(&mut self, index: usize) -> Result<PrimitiveView<'_, M>> {
        let len = self.len();
        let Self {
            coefficients,
            exponents,
            center,
        } = self;
        let coefficients = coefficients.as_mut().ok_or(ChemistError::NullView)?;
        let exponents = exponents.as_mut().ok_or(ChemistError::NullView)?;
        let coefficient = M::index(M::reborrow(coefficients), index)
            .ok_or(ChemistError::OutOfRange { index, len })?;
        let exponent = M::index(M::reborrow(exponents), index)
            .ok_or(ChemistError::OutOfRange { index, len })?;
        Ok(PrimitiveView::new(coefficient, exponent, center.reborrow()))
    }

    pub fn iter(&self) -> impl Iterator<Item = PrimitiveView<'_, ReadOnly>> + '_ {
        (0..self.len()).filter_map(move |index| self.at(index).ok())
    }

    /// Calls `f` with each primitive index and a view carrying this view's access mode.
    pub fn for_each_mut<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(usize, PrimitiveView<'_, M>),
    {
        for index in 0..self.len() {
            f(index, self.at_mut(index)?);
        }
        Ok(())
    }

    /// Value of the contraction at `point`.
    pub fn evaluate(&self, point: &Point) -> Result<f64> {
        self.iter()
            .map(|primitive| primitive.evaluate(point))
            .sum()
    }

    pub fn as_const(&self) -> ContractedGaussianView<'_, ReadOnly> {
        ContractedGaussianView {
            coefficients: self.coefficients.as_deref(),
            exponents: self.exponents.as_deref(),
            center: self.center.as_const(),
        }
    }

    pub fn reborrow(&mut self) -> ContractedGaussianView<'_, M> {
        ContractedGaussianView {
            coefficients: self.coefficients.as_mut().map(|c| M::reborrow(c)),
            exponents: self.exponents.as_mut().map(|e| M::reborrow(e)),
            center: self.center.reborrow(),
        }
    }
}

impl<'a> ContractedGaussianView<'a, ReadWrite> {
    pub fn coefficients_mut(&mut self) -> Result<&mut [f64]> {
        self.coefficients
            .as_deref_mut()
            .ok_or(ChemistError::NullView)
    }

    pub fn exponents_mut(&mut self) -> Result<&mut [f64]> {
        self.exponents.as_deref_mut().ok_or(ChemistError::NullView)
    }

    pub fn center_mut(&mut self) -> &mut PointView<'a, ReadWrite> {
        &mut self.center
    }
}

impl<'a, M: Access> RecordView for ContractedGaussianView<'a, M> {
    type Record = ContractedGaussian;

    fn is_null(&self) -> bool {
        self.coefficients.is_none() || self.exponents.is_none() || self.center.is_null()
    }

    fn materialize(&self) -> Result<ContractedGaussian> {
        ContractedGaussian::new(
            self.coefficients()?.to_vec(),
            self.exponents()?.to_vec(),
            self.center.materialize()?,
        )
    }
}

impl<'a> From<&'a ContractedGaussian> for ContractedGaussianView<'a, ReadOnly> {
    fn from(contraction: &'a ContractedGaussian) -> Self {
        Self {
            coefficients: Some(contraction.coefficients.as_slice()),
            exponents: Some(contraction.exponents.as_slice()),
            center: PointView::from(&contraction.center),
        }
    }
}

impl<'a> From<&'a mut ContractedGaussian> for ContractedGaussianView<'a, ReadWrite> {
    fn from(contraction: &'a mut ContractedGaussian) -> Self {
        let ContractedGaussian {
            coefficients,
            exponents,
            center,
        } = contraction;
        Self {
            coefficients: Some(coefficients.as_mut_slice()),
            exponents: Some(exponents.as_mut_slice()),
            center: PointView::from(center),
        }
    }
}

impl<'a> Clone for ContractedGaussianView<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for ContractedGaussianView<'a, ReadOnly> {}

impl<'a, 'b, M, N> PartialEq<ContractedGaussianView<'b, N>> for ContractedGaussianView<'a, M>
where
    M: Access,
    N: Access,
{
    fn eq(&self, other: &ContractedGaussianView<'b, N>) -> bool {
        self.coefficients.as_deref() == other.coefficients.as_deref()
            && self.exponents.as_deref() == other.exponents.as_deref()
            && self.center == other.center
    }
}

impl<'a, M: Access> PartialEq<ContractedGaussian> for ContractedGaussianView<'a, M> {
    fn eq(&self, other: &ContractedGaussian) -> bool {
        *self == ContractedGaussianView::from(other)
    }
}

impl<'a, M: Access> PartialEq<ContractedGaussianView<'a, M>> for ContractedGaussian {
    fn eq(&self, other: &ContractedGaussianView<'a, M>) -> bool {
        other == self
    }
}

impl<'a, M: Access> fmt::Debug for ContractedGaussianView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("ContractedGaussianView(null)");
        }
        f.debug_struct("ContractedGaussianView")
            .field("coefficients", &self.coefficients.as_deref())
            .field("exponents", &self.exponents.as_deref())
            .field("center", &self.center)
            .finish()
    }
}
