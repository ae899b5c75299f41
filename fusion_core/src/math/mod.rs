// fusion_core/src/math/mod.rs

//! Stateless rotation and linear-algebra kernels used by propagation,
//! correction and sensor-to-sensor frame transforms.
//!
//! Every function here is pure and may be called from any thread. The only
//! side effect in the module is the diagnostic emitted by [`check_cov`],
//! which goes through a [`CovReporter`].

pub mod covariance;
pub mod imu_transform;
pub mod rotation;
pub mod sampling;

pub use covariance::{
    check_cov, check_cov_with, enforce_matrix_symmetry, inspect_cov, CovIssue, CovReporter,
    TracingReporter,
};
pub use imu_transform::{transform_imu, transform_imu_with_prev};
pub use rotation::{
    apply_small_angle_quat_corr, mat_exp, omega_mat, quat_from_small_angle, quat_from_wxyz,
    quat_to_wxyz, quaternion_average, rpy_from_rot_mat, skew, DEFAULT_MAT_EXP_ORDER,
};
pub use sampling::{every_nth, vec_extract_every_nth};
