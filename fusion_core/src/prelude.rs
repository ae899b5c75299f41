// fusion_core/src/prelude.rs

// --- Buffer records (what the timeline stores and the filter core consumes) ---
pub use crate::buffer::{BufferData, BufferEntry, BufferMetadata, Timeline};

// --- Core Data Structures ---
pub use crate::messages::{
    ImuMeasurement, MagnetometerMeasurement, MeasurementData, MeasurementKind,
    PoseMeasurement, PositionMeasurement,
};
pub use crate::sensors::{SensorDescriptor, SensorHandle};
pub use crate::state::{CoreState, StateSnapshot};
pub use crate::types::{Mat3, Mat4, Time, Vec3, Vec4};

// --- Math kernels ---
pub use crate::math::{
    apply_small_angle_quat_corr, check_cov, enforce_matrix_symmetry, mat_exp, omega_mat,
    quat_from_small_angle, quaternion_average, rpy_from_rot_mat, skew, transform_imu,
    transform_imu_with_prev, vec_extract_every_nth,
};

// --- Ambient ---
pub use crate::config::KernelConfig;
pub use crate::error::FusionError;
