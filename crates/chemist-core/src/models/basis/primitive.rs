use crate::error::{ChemistError, Result};
use crate::models::point::{Point, PointView};
use crate::view::{Access, ReadOnly, ReadWrite, RecordView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single Gaussian: `coefficient * exp(-exponent * r^2)` about `center`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Primitive {
    pub coefficient: f64,
    pub exponent: f64,
    pub center: Point,
}

impl Primitive {
    pub fn new(coefficient: f64, exponent: f64, center: Point) -> Self {
        Self {
            coefficient,
            exponent,
            center,
        }
    }
}

/// Aliases a primitive's coefficient, exponent and center.
pub struct PrimitiveView<'a, M: Access = ReadOnly> {
    coefficient: Option<M::Ref<'a, f64>>,
    exponent: Option<M::Ref<'a, f64>>,
    center: PointView<'a, M>,
}

impl<'a, M: Access> Default for PrimitiveView<'a, M> {
    fn default() -> Self {
        Self {
            coefficient: None,
            exponent: None,
            center: PointView::default(),
        }
    }
}

impl<'a, M: Access> PrimitiveView<'a, M> {
    pub fn new(
        coefficient: M::Ref<'a, f64>,
        exponent: M::Ref<'a, f64>,
        center: PointView<'a, M>,
    ) -> Self {
        Self {
            coefficient: Some(coefficient),
            exponent: Some(exponent),
            center,
        }
    }

    pub fn coefficient(&self) -> Result<f64> {
        self.coefficient
            .as_deref()
            .copied()
            .ok_or(ChemistError::NullView)
    }

    pub fn exponent(&self) -> Result<f64> {
        self.exponent.as_deref().copied().ok_or(ChemistError::NullView)
    }

    pub fn center(&self) -> &PointView<'a, M> {
        &self.center
    }

    /// Value of the primitive at `point`.
    pub fn evaluate(&self, point: &Point) -> Result<f64> {
        let r2 = (point.to_point3() - self.center.to_point3()?).norm_squared();
        Ok(self.coefficient()? * (-self.exponent()? * r2).exp())
    }

    pub fn as_const(&self) -> PrimitiveView<'_, ReadOnly> {
        PrimitiveView {
            coefficient: self.coefficient.as_deref(),
            exponent: self.exponent.as_deref(),
            center: self.center.as_const(),
        }
    }

    pub fn reborrow(&mut self) -> PrimitiveView<'_, M> {
        PrimitiveView {
            coefficient: self.coefficient.as_mut().map(|c| M::reborrow(c)),
            exponent: self.exponent.as_mut().map(|e| M::reborrow(e)),
            center: self.center.reborrow(),
        }
    }
}

impl<'a> PrimitiveView<'a, ReadWrite> {
    pub fn coefficient_mut(&mut self) -> Result<&mut f64> {
        self.coefficient
            .as_deref_mut()
            .ok_or(ChemistError::NullView)
    }

    pub fn set_coefficient(&mut self, coefficient: f64) -> Result<()> {
        *self.coefficient_mut()? = coefficient;
        Ok(())
    }

    pub fn exponent_mut(&mut self) -> Result<&mut f64> {
        self.exponent.as_deref_mut().ok_or(ChemistError::NullView)
    }

    pub fn set_exponent(&mut self, exponent: f64) -> Result<()> {
        *self.exponent_mut()? = exponent;
        Ok(())
    }

    pub fn center_mut(&mut self) -> &mut PointView<'a, ReadWrite> {
        &mut self.center
    }
}

impl<'a, M: Access> RecordView for PrimitiveView<'a, M> {
    type Record = Primitive;

    fn is_null(&self) -> bool {
        self.coefficient.is_none() || self.exponent.is_none() || self.center.is_null()
    }

    fn materialize(&self) -> Result<Primitive> {
        Ok(Primitive::new(
            self.coefficient()?,
            self.exponent()?,
            self.center.materialize()?,
        ))
    }
}

impl<'a> From<&'a Primitive> for PrimitiveView<'a, ReadOnly> {
    fn from(primitive: &'a Primitive) -> Self {
        Self::new(
            &primitive.coefficient,
            &primitive.exponent,
            PointView::from(&primitive.center),
        )
    }
}

impl<'a> From<&'a mut Primitive> for PrimitiveView<'a, ReadWrite> {
    fn from(primitive: &'a mut Primitive) -> Self {
        let Primitive {
            coefficient,
            exponent,
            center,
        } = primitive;
        Self::new(coefficient, exponent, PointView::from(center))
    }
}

impl<'a> Clone for PrimitiveView<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for PrimitiveView<'a, ReadOnly> {}

impl<'a, 'b, M: Access, N: Access> PartialEq<PrimitiveView<'b, N>> for PrimitiveView<'a, M> {
    fn eq(&self, other: &PrimitiveView<'b, N>) -> bool {
        self.coefficient.as_deref() == other.coefficient.as_deref()
            && self.exponent.as_deref() == other.exponent.as_deref()
            && self.center == other.center
    }
}

impl<'a, M: Access> PartialEq<Primitive> for PrimitiveView<'a, M> {
    fn eq(&self, other: &Primitive) -> bool {
        *self == PrimitiveView::from(other)
    }
}

impl<'a, M: Access> PartialEq<PrimitiveView<'a, M>> for Primitive {
    fn eq(&self, other: &PrimitiveView<'a, M>) -> bool {
        other == self
    }
}

impl<'a, M: Access> fmt::Debug for PrimitiveView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("PrimitiveView(null)");
        }
        f.debug_struct("PrimitiveView")
            .field("coefficient", &self.coefficient.as_deref())
            .field("exponent", &self.exponent.as_deref())
            .field("center", &self.center)
            .finish()
    }
}
