use super::point::Point;
use serde::{Deserialize, Serialize};

pub mod charges;
pub mod view;

pub use charges::{Charges, ChargesView};
pub use view::PointChargeView;

/// A point carrying a charge, in atomic units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCharge {
    pub charge: f64,
    pub point: Point,
}

impl PointCharge {
    pub fn new(charge: f64, point: Point) -> Self {
        Self { charge, point }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_point_charge_keeps_charge_and_position() {
        let charge = PointCharge::new(-1.0, Point::new(0.0, 1.0, 2.0));
        assert_eq!(charge.charge, -1.0);
        assert_eq!(charge.point, Point::new(0.0, 1.0, 2.0));
        assert_eq!(charge, charge.clone());
    }
}
