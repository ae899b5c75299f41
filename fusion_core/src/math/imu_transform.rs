// fusion_core/src/math/imu_transform.rs

use nalgebra::UnitQuaternion;

use crate::error::{FusionError, Result};
use crate::math::rotation::skew;
use crate::messages::ImuMeasurement;
use crate::types::Vec3;

/// Transforms an IMU reading from frame A into a rigidly attached frame B.
///
/// `p_ab` and `q_ab` are the translation and rotation of B with respect to A.
/// The centripetal lever-arm term `ω × (ω × p_ab)` is included; angular
/// acceleration is not, since a single sample cannot provide it. Use
/// [`transform_imu_with_prev`] when the previous sample is available.
pub fn transform_imu(
    now: &ImuMeasurement,
    p_ab: &Vec3,
    q_ab: &UnitQuaternion<f64>,
) -> ImuMeasurement {
    transform_with_angular_accel(now, &Vec3::zeros(), p_ab, q_ab)
}

/// Like [`transform_imu`], but also accounts for the tangential lever-arm
/// term `α × p_ab`, with the angular acceleration `α` estimated by finite
/// difference of the two gyro samples.
///
/// Returns an error when `dt` is zero or not finite.
pub fn transform_imu_with_prev(
    prev: &ImuMeasurement,
    now: &ImuMeasurement,
    dt: f64,
    p_ab: &Vec3,
    q_ab: &UnitQuaternion<f64>,
) -> Result<ImuMeasurement> {
    if dt == 0.0 || !dt.is_finite() {
        return Err(FusionError::InvalidTimeStep { dt });
    }
    let angular_accel_a = (now.angular_velocity - prev.angular_velocity) / dt;
    Ok(transform_with_angular_accel(now, &angular_accel_a, p_ab, q_ab))
}

fn transform_with_angular_accel(
    now: &ImuMeasurement,
    angular_accel_a: &Vec3,
    p_ab: &Vec3,
    q_ab: &UnitQuaternion<f64>,
) -> ImuMeasurement {
    let rot_ba = q_ab.to_rotation_matrix().transpose();
    let w_a = now.angular_velocity;

    // Specific force at the origin of B, still expressed in A.
    let skew_w = skew(&w_a);
    let a_at_b = now.linear_acceleration + skew(angular_accel_a) * p_ab + skew_w * skew_w * p_ab;

    ImuMeasurement {
        linear_acceleration: rot_ba * a_at_b,
        angular_velocity: rot_ba * w_a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    fn reading(accel: [f64; 3], gyro: [f64; 3]) -> ImuMeasurement {
        ImuMeasurement::new(Vec3::from(accel), Vec3::from(gyro))
    }

    #[test]
    fn identity_extrinsics_leave_reading_unchanged() {
        let now = reading([0.1, -0.2, 9.81], [0.3, 0.2, -0.1]);
        let out = transform_imu(&now, &Vec3::zeros(), &UnitQuaternion::identity());
        assert_abs_diff_eq!(out.linear_acceleration, now.linear_acceleration, epsilon = EPS);
        assert_abs_diff_eq!(out.angular_velocity, now.angular_velocity, epsilon = EPS);
    }

    #[test]
    fn identity_extrinsics_with_prev_leave_reading_unchanged() {
        let prev = reading([0.0, 0.0, 9.81], [0.0, 0.0, 0.0]);
        let now = reading([0.1, -0.2, 9.81], [0.3, 0.2, -0.1]);
        let out =
            transform_imu_with_prev(&prev, &now, 0.01, &Vec3::zeros(), &UnitQuaternion::identity())
                .unwrap();
        assert_abs_diff_eq!(out.linear_acceleration, now.linear_acceleration, epsilon = EPS);
        assert_abs_diff_eq!(out.angular_velocity, now.angular_velocity, epsilon = EPS);
    }

    #[test]
    fn pure_rotation_rotates_both_vectors() {
        // B is A rotated by +90° about z.
        let q_ab = UnitQuaternion::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2);
        let now = reading([1.0, 0.0, 9.81], [0.0, 0.5, 0.0]);
        let out = transform_imu(&now, &Vec3::zeros(), &q_ab);
        assert_abs_diff_eq!(out.linear_acceleration, Vec3::new(0.0, -1.0, 9.81), epsilon = 1e-9);
        assert_abs_diff_eq!(out.angular_velocity, Vec3::new(0.5, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn lever_arm_adds_centripetal_acceleration() {
        // Spinning about z at 2 rad/s, B sits 0.5 m along x.
        let now = reading([0.0, 0.0, 0.0], [0.0, 0.0, 2.0]);
        let p_ab = Vec3::new(0.5, 0.0, 0.0);
        let out = transform_imu(&now, &p_ab, &UnitQuaternion::identity());
        // ω × (ω × r) = -|ω|² r
        assert_abs_diff_eq!(out.linear_acceleration, Vec3::new(-2.0, 0.0, 0.0), epsilon = EPS);
    }

    #[test]
    fn angular_acceleration_adds_tangential_term() {
        let prev = reading([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let now = reading([0.0, 0.0, 0.0], [0.0, 0.0, 0.1]);
        let p_ab = Vec3::new(1.0, 0.0, 0.0);
        let out =
            transform_imu_with_prev(&prev, &now, 0.1, &p_ab, &UnitQuaternion::identity()).unwrap();
        // α = (0, 0, 1); α × r = (0, 1, 0); centripetal = (-0.01, 0, 0)
        assert_abs_diff_eq!(out.linear_acceleration, Vec3::new(-0.01, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn lever_arm_is_applied_in_a_before_rotating_into_b() {
        // B sits 0.5 m along x of A and is rotated +90° about z.
        let q_ab = UnitQuaternion::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2);
        let p_ab = Vec3::new(0.5, 0.0, 0.0);
        let prev = reading([0.0, 0.0, 9.81], [0.0, 0.0, 1.9]);
        let now = reading([0.0, 0.0, 9.81], [0.0, 0.0, 2.0]);

        // In A: centripetal = (-2, 0, 0). Rotating into B maps (x, y, z) to (y, -x, z).
        let out = transform_imu(&now, &p_ab, &q_ab);
        assert_abs_diff_eq!(out.linear_acceleration, Vec3::new(0.0, 2.0, 9.81), epsilon = 1e-9);
        assert_abs_diff_eq!(out.angular_velocity, Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-9);

        // α = (0, 0, 1) adds α × p_ab = (0, 0.5, 0) in A.
        let out = transform_imu_with_prev(&prev, &now, 0.1, &p_ab, &q_ab).unwrap();
        assert_abs_diff_eq!(out.linear_acceleration, Vec3::new(0.5, 2.0, 9.81), epsilon = 1e-9);
    }

    #[test]
    fn zero_dt_is_rejected() {
        let now = reading([0.0, 0.0, 9.81], [0.1, 0.0, 0.0]);
        let identity = UnitQuaternion::identity();
        let err = transform_imu_with_prev(&now, &now, 0.0, &Vec3::zeros(), &identity).unwrap_err();
        assert!(matches!(err, FusionError::InvalidTimeStep { .. }));
        assert!(transform_imu_with_prev(
            &now,
            &now,
            f64::NAN,
            &Vec3::zeros(),
            &UnitQuaternion::identity()
        )
        .is_err());
    }
}
