// fusion_core/src/types.rs

use std::fmt;
use std::ops::Sub;

use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

// --- Core Type Aliases ---
pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat4 = Matrix4<f64>;

/// A point in time, in seconds.
///
/// Only comparability and differences are meaningful; there is no wall-clock
/// epoch attached to it. Subtracting two `Time`s yields the `dt` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub const fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> f64 {
        self.0
    }
}

impl From<f64> for Time {
    fn from(secs: f64) -> Self {
        Self(secs)
    }
}

impl Sub for Time {
    type Output = f64;

    fn sub(self, rhs: Self) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_orders_and_subtracts() {
        let t1 = Time::from_secs(1.0);
        let t2 = Time::from(2.5);
        assert!(t1 < t2);
        assert_eq!(t2 - t1, 1.5);
        assert_eq!(t2.to_string(), "2.5");
    }
}
