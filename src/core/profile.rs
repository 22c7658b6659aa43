use std::ops::{Add, AddAssign, Mul};

pub const HOURS_PER_DAY: usize = 24;

/// Value per hour of day, `0..24`.
///
/// After normalization the values form a density: they sum to one.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HourlyProfile(pub [f64; HOURS_PER_DAY]);

impl Default for HourlyProfile {
    fn default() -> Self {
        Self::ZERO
    }
}

impl HourlyProfile {
    pub const ZERO: Self = Self([0.0; HOURS_PER_DAY]);

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Divide every value by the profile sum.
    ///
    /// Returns [`None`] when the sum is zero or not finite.
    pub fn normalized(self) -> Option<Self> {
        let sum = self.sum();
        (sum.is_finite() && sum != 0.0).then(|| self * sum.recip())
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl Mul<f64> for HourlyProfile {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self::Output {
        for value in &mut self.0 {
            *value *= rhs;
        }
        self
    }
}

impl Add for HourlyProfile {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for HourlyProfile {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}
