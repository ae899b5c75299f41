// fusion_core/src/state.rs

use nalgebra::{DMatrix, UnitQuaternion};

use crate::math::{check_cov, rpy_from_rot_mat};
use crate::types::Vec3;

/// Dimension of the core error state: δp, δv, δθ, δb_w, δb_a.
pub const CORE_ERROR_STATE_DIM: usize = 15;

/// The nominal navigation state propagated by the filter core.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreState {
    /// Position of the body in the world frame.
    pub position: Vec3,
    /// Velocity of the body in the world frame.
    pub velocity: Vec3,
    /// Rotation from body to world.
    pub orientation: UnitQuaternion<f64>,
    pub gyro_bias: Vec3,
    pub accel_bias: Vec3,
}

impl Default for CoreState {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            orientation: UnitQuaternion::identity(),
            gyro_bias: Vec3::zeros(),
            accel_bias: Vec3::zeros(),
        }
    }
}

/// A state estimate as stored in the buffer: the nominal state together with
/// its error-state covariance `P`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub state: CoreState,
    pub covariance: DMatrix<f64>,
}

impl StateSnapshot {
    /// Creates a snapshot with the covariance set to a scaled identity matrix.
    pub fn new(state: CoreState, initial_covariance_val: f64) -> Self {
        Self {
            state,
            covariance: DMatrix::identity(CORE_ERROR_STATE_DIM, CORE_ERROR_STATE_DIM)
                * initial_covariance_val,
        }
    }

    pub fn with_covariance(state: CoreState, covariance: DMatrix<f64>) -> Self {
        Self { state, covariance }
    }

    /// Returns the dimension of the error state described by the covariance.
    pub fn dim(&self) -> usize {
        self.covariance.nrows()
    }

    /// Roll, pitch and yaw of the body orientation, for diagnostics.
    pub fn rpy(&self) -> Vec3 {
        rpy_from_rot_mat(self.state.orientation.to_rotation_matrix().matrix())
    }

    /// Runs the covariance checks on `P`, logging a warning tagged with
    /// `description` on failure.
    pub fn has_valid_covariance(&self, description: &str) -> bool {
        check_cov(&self.covariance, description, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn new_snapshot_has_scaled_identity_covariance() {
        let snapshot = StateSnapshot::new(CoreState::default(), 0.5);
        assert_eq!(snapshot.dim(), CORE_ERROR_STATE_DIM);
        assert_eq!(snapshot.covariance[(3, 3)], 0.5);
        assert_eq!(snapshot.covariance[(3, 4)], 0.0);
        assert!(snapshot.has_valid_covariance("P_init"));
    }

    #[test]
    fn default_state_has_identity_orientation() {
        let snapshot = StateSnapshot::new(CoreState::default(), 1.0);
        assert_abs_diff_eq!(snapshot.rpy(), Vec3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn rpy_reports_body_orientation() {
        let state = CoreState {
            orientation: UnitQuaternion::from_euler_angles(0.1, -0.2, 1.3),
            ..CoreState::default()
        };
        let snapshot = StateSnapshot::new(state, 1.0);
        assert_abs_diff_eq!(snapshot.rpy(), Vec3::new(0.1, -0.2, 1.3), epsilon = 1e-9);
    }

    #[test]
    fn negative_covariance_is_flagged() {
        let snapshot = StateSnapshot::new(CoreState::default(), -1.0);
        assert!(!snapshot.has_valid_covariance("P_bad"));
    }
}
