use super::{AtomicNumber, Nucleus};
use crate::error::{ChemistError, Result};
use crate::models::point::PointView;
use crate::models::point_charge::PointChargeView;
use crate::view::{Access, ReadOnly, ReadWrite, RecordView};
use std::fmt;

/// Aliases the fields of a nucleus stored elsewhere.
///
/// The position and charge are reached through a nested [`PointChargeView`] that
/// shares this view's access mode.
pub struct NucleusView<'a, M: Access = ReadOnly> {
    name: Option<M::Ref<'a, String>>,
    atomic_number: Option<M::Ref<'a, AtomicNumber>>,
    mass: Option<M::Ref<'a, f64>>,
    point_charge: PointChargeView<'a, M>,
}

impl<'a, M: Access> Default for NucleusView<'a, M> {
    fn default() -> Self {
        Self {
            name: None,
            atomic_number: None,
            mass: None,
            point_charge: PointChargeView::default(),
        }
    }
}

impl<'a, M: Access> NucleusView<'a, M> {
    pub fn new(
        name: M::Ref<'a, String>,
        atomic_number: M::Ref<'a, AtomicNumber>,
        mass: M::Ref<'a, f64>,
        point_charge: PointChargeView<'a, M>,
    ) -> Self {
        Self {
            name: Some(name),
            atomic_number: Some(atomic_number),
            mass: Some(mass),
            point_charge,
        }
    }

    pub fn name(&self) -> Result<&str> {
        self.name
            .as_deref()
            .map(String::as_str)
            .ok_or(ChemistError::NullView)
    }

    pub fn atomic_number(&self) -> Result<AtomicNumber> {
        self.atomic_number
            .as_deref()
            .copied()
            .ok_or(ChemistError::NullView)
    }

    pub fn mass(&self) -> Result<f64> {
        self.mass.as_deref().copied().ok_or(ChemistError::NullView)
    }

    pub fn charge(&self) -> Result<f64> {
        self.point_charge.charge()
    }

    pub fn point_charge(&self) -> &PointChargeView<'a, M> {
        &self.point_charge
    }

    pub fn point(&self) -> &PointView<'a, M> {
        self.point_charge.point()
    }

    pub fn as_const(&self) -> NucleusView<'_, ReadOnly> {
        NucleusView {
            name: self.name.as_deref(),
            atomic_number: self.atomic_number.as_deref(),
            mass: self.mass.as_deref(),
            point_charge: self.point_charge.as_const(),
        }
    }

    pub fn reborrow(&mut self) -> NucleusView<'_, M> {
        NucleusView {
            name: self.name.as_mut().map(|name| M::reborrow(name)),
            atomic_number: self.atomic_number.as_mut().map(|z| M::reborrow(z)),
            mass: self.mass.as_mut().map(|mass| M::reborrow(mass)),
            point_charge: self.point_charge.reborrow(),
        }
    }
}

impl<'a> NucleusView<'a, ReadWrite> {
    pub fn name_mut(&mut self) -> Result<&mut String> {
        self.name.as_deref_mut().ok_or(ChemistError::NullView)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        *self.name_mut()? = name.into();
        Ok(())
    }

    pub fn atomic_number_mut(&mut self) -> Result<&mut AtomicNumber> {
        self.atomic_number
            .as_deref_mut()
            .ok_or(ChemistError::NullView)
    }

    pub fn set_atomic_number(&mut self, atomic_number: AtomicNumber) -> Result<()> {
        *self.atomic_number_mut()? = atomic_number;
        Ok(())
    }

    pub fn mass_mut(&mut self) -> Result<&mut f64> {
        self.mass.as_deref_mut().ok_or(ChemistError::NullView)
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        *self.mass_mut()? = mass;
        Ok(())
    }

    pub fn point_charge_mut(&mut self) -> &mut PointChargeView<'a, ReadWrite> {
        &mut self.point_charge
    }

    /// Overwrites every aliased field with the values of `nucleus`.
    pub fn assign(&mut self, nucleus: &Nucleus) -> Result<()> {
        self.name_mut()?.clone_from(&nucleus.name);
        self.set_atomic_number(nucleus.atomic_number)?;
        self.set_mass(nucleus.mass)?;
        self.point_charge.assign(&nucleus.point_charge)
    }
}

impl<'a, M: Access> RecordView for NucleusView<'a, M> {
    type Record = Nucleus;

    fn is_null(&self) -> bool {
        self.name.is_none()
            || self.atomic_number.is_none()
            || self.mass.is_none()
            || self.point_charge.is_null()
    }

    fn materialize(&self) -> Result<Nucleus> {
        Ok(Nucleus {
            name: self.name()?.to_owned(),
            atomic_number: self.atomic_number()?,
            mass: self.mass()?,
            point_charge: self.point_charge.materialize()?,
        })
    }
}

impl<'a> From<&'a Nucleus> for NucleusView<'a, ReadOnly> {
    fn from(nucleus: &'a Nucleus) -> Self {
        Self::new(
            &nucleus.name,
            &nucleus.atomic_number,
            &nucleus.mass,
            PointChargeView::from(&nucleus.point_charge),
        )
    }
}

impl<'a> From<&'a mut Nucleus> for NucleusView<'a, ReadWrite> {
    fn from(nucleus: &'a mut Nucleus) -> Self {
        let Nucleus {
            name,
            atomic_number,
            mass,
            point_charge,
        } = nucleus;
        Self::new(name, atomic_number, mass, PointChargeView::from(point_charge))
    }
}

impl<'a> Clone for NucleusView<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for NucleusView<'a, ReadOnly> {}

impl<'a, 'b, M: Access, N: Access> PartialEq<NucleusView<'b, N>> for NucleusView<'a, M> {
    fn eq(&self, other: &NucleusView<'b, N>) -> bool {
        self.name.as_deref() == other.name.as_deref()
            && self.atomic_number.as_deref() == other.atomic_number.as_deref()
            && self.mass.as_deref() == other.mass.as_deref()
            && self.point_charge == other.point_charge
    }
}

impl<'a, M: Access> PartialEq<Nucleus> for NucleusView<'a, M> {
    fn eq(&self, other: &Nucleus) -> bool {
        *self == NucleusView::from(other)
    }
}

impl<'a, M: Access> PartialEq<NucleusView<'a, M>> for Nucleus {
    fn eq(&self, other: &NucleusView<'a, M>) -> bool {
        other == self
    }
}

impl<'a, M: Access> fmt::Debug for NucleusView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NucleusView(null)");
        }
        f.debug_struct("NucleusView")
            .field("name", &self.name.as_deref())
            .field("atomic_number", &self.atomic_number.as_deref())
            .field("mass", &self.mass.as_deref())
            .field("point_charge", &self.point_charge)
            .finish()
    }
}
