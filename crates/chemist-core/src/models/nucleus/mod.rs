use super::point::Point;
use super::point_charge::PointCharge;
use serde::{Deserialize, Serialize};

pub mod nuclei;
pub mod view;

pub use nuclei::{Nuclei, NucleiView};
pub use view::NucleusView;

pub type AtomicNumber = u32;

/// An atomic nucleus: an element label, its atomic number and mass, and a point
/// charge giving its position and nuclear charge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Nucleus {
    pub name: String,
    pub atomic_number: AtomicNumber,
    /// Mass in daltons.
    pub mass: f64,
    pub point_charge: PointCharge,
}

impl Nucleus {
    /// Creates a nucleus whose charge equals its atomic number.
    ///
    /// # Arguments
    ///
    /// * `name` - The element label, e.g. `"He"`.
    /// * `atomic_number` - The number of protons.
    /// * `mass` - The mass in daltons.
    /// * `point` - The position of the nucleus.
    pub fn new(
        name: impl Into<String>,
        atomic_number: AtomicNumber,
        mass: f64,
        point: Point,
    ) -> Self {
        Self {
            name: name.into(),
            atomic_number,
            mass,
            point_charge: PointCharge::new(f64::from(atomic_number), point),
        }
    }

    /// Replaces the nuclear charge, e.g. for an effective core potential.
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.point_charge.charge = charge;
        self
    }

    pub fn charge(&self) -> f64 {
        self.point_charge.charge
    }

    pub fn point(&self) -> &Point {
        &self.point_charge.point
    }
}
