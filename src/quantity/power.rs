use std::ops::Mul;

use crate::quantity::{energy::MegawattHours, time::Hours};

quantity!(Megawatts, via: f64, suffix: "MW", precision: 1);

impl Mul<Hours> for Megawatts {
    type Output = MegawattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        MegawattHours(self.0 * hours.0)
    }
}
