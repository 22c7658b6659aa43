use std::ops::Div;

use crate::quantity::{power::Megawatts, time::Hours};

quantity!(GigawattHours, via: f64, suffix: "GWh", precision: 1);
quantity!(MegawattHours, via: f64, suffix: "MWh", precision: 1);

impl From<GigawattHours> for MegawattHours {
    fn from(gigawatt_hours: GigawattHours) -> Self {
        Self(gigawatt_hours.0 * 1000.0)
    }
}

impl From<MegawattHours> for GigawattHours {
    fn from(megawatt_hours: MegawattHours) -> Self {
        Self(megawatt_hours.0 / 1000.0)
    }
}

impl Div<Hours> for MegawattHours {
    type Output = Megawatts;

    fn div(self, hours: Hours) -> Self::Output {
        Megawatts(self.0 / hours.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_gigawatt_hours_to_megawatt_hours() {
        assert_abs_diff_eq!(MegawattHours::from(GigawattHours(2.623)).0, 2623.0);
    }

    #[test]
    fn test_energy_over_time() {
        assert_abs_diff_eq!((MegawattHours(120.0) / Hours(4.0)).0, 30.0);
    }
}
