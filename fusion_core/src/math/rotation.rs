// fusion_core/src/math/rotation.rs

use std::cmp::Ordering;

use nalgebra::{Quaternion, SymmetricEigen, UnitQuaternion};

use crate::error::{FusionError, Result};
use crate::types::{Mat3, Mat4, Vec3, Vec4};

/// Number of Taylor terms used for the matrix exponential during propagation.
pub const DEFAULT_MAT_EXP_ORDER: u32 = 4;

/// Skew-symmetric matrix `[v]×`, so that `skew(v) * w == v.cross(&w)`.
pub fn skew(v: &Vec3) -> Mat3 {
    Mat3::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
}

/// Matrix exponential of `a`, with the Taylor series cut off after `order` terms:
/// `I + A + A²/2! + ... + Aⁿ/n!`.
///
/// An `order` of zero would just return the identity and is rejected.
pub fn mat_exp(a: &Mat4, order: u32) -> Result<Mat4> {
    if order < 1 {
        return Err(FusionError::InvalidSeriesOrder { order });
    }

    let mut result = Mat4::identity();
    let mut term = Mat4::identity();
    for k in 1..=order {
        // term = A^k / k!
        term = (term * a) / f64::from(k);
        result += term;
    }
    Ok(result)
}

/// The right-multiplication quaternion-kinematics matrix `Ω(v)`.
///
/// Acts on quaternions stacked as `[w, x, y, z]`, such that
/// `q̇ = ½ Ω(ω) q` is the same as `q̇ = ½ q ⊗ (0, ω)`.
///
/// # Note
/// Reference: J. Solà, "Quaternion kinematics for the error-state Kalman filter", eq. (199).
#[rustfmt::skip]
pub fn omega_mat(v: &Vec3) -> Mat4 {
    Mat4::new(
        0.0, -v.x, -v.y, -v.z,
        v.x,  0.0,  v.z, -v.y,
        v.y, -v.z,  0.0,  v.x,
        v.z,  v.y, -v.x,  0.0,
    )
}

/// Stacks a quaternion as `[w, x, y, z]`, the layout `omega_mat` works on.
pub fn quat_to_wxyz(q: &UnitQuaternion<f64>) -> Vec4 {
    Vec4::new(q.w, q.i, q.j, q.k)
}

/// Inverse of [`quat_to_wxyz`]. The result is renormalized.
pub fn quat_from_wxyz(v: &Vec4) -> UnitQuaternion<f64> {
    UnitQuaternion::new_normalize(Quaternion::new(v[0], v[1], v[2], v[3]))
}

/// Quaternion for a small rotation vector `d_theta`, using the half-angle
/// first-order expansion.
///
/// When `|d_theta|² / 4` reaches one the square root would turn imaginary, so
/// the scalar part switches to `1 / sqrt(1 + |d_theta|² / 4)`.
pub fn quat_from_small_angle(d_theta: &Vec3) -> UnitQuaternion<f64> {
    let half = d_theta * 0.5;
    let q_squared = d_theta.norm_squared() / 4.0;

    let q = if q_squared < 1.0 {
        Quaternion::new((1.0 - q_squared).sqrt(), half.x, half.y, half.z)
    } else {
        let w = 1.0 / (1.0 + q_squared).sqrt();
        let v = half * w;
        Quaternion::new(w, v.x, v.y, v.z)
    };

    UnitQuaternion::new_normalize(q)
}

/// Applies a small-angle error-state correction to a prior orientation:
/// `normalize(q_prior ⊗ δq(correction))`.
pub fn apply_small_angle_quat_corr(
    q_prior: &UnitQuaternion<f64>,
    correction: &Vec3,
) -> UnitQuaternion<f64> {
    let corrected = q_prior.quaternion() * quat_from_small_angle(correction).quaternion();
    UnitQuaternion::new_normalize(corrected)
}

/// Roll, pitch and yaw (in that order) of `R = Rz(yaw) · Ry(pitch) · Rx(roll)`.
///
/// The `asin` argument is clamped so that a matrix with pitch at ±90° plus
/// round-off still yields a finite angle.
pub fn rpy_from_rot_mat(rot_mat: &Mat3) -> Vec3 {
    let pitch = (-rot_mat[(2, 0)]).clamp(-1.0, 1.0).asin();
    let roll = rot_mat[(2, 1)].atan2(rot_mat[(2, 2)]);
    let yaw = rot_mat[(1, 0)].atan2(rot_mat[(0, 0)]);
    Vec3::new(roll, pitch, yaw)
}

/// Unweighted quaternion mean.
///
/// Accumulates `M = Σ qᵢ qᵢᵀ` and returns the eigenvector of its largest
/// eigenvalue, with the sign chosen so that `w >= 0`. Since `q` and `-q` give
/// the same outer product, the inputs may come from either hemisphere.
///
/// # Note
/// Reference: Markley et al., "Averaging Quaternions", Journal of Guidance,
/// Control, and Dynamics, 30(4):1193-1196, 2007.
pub fn quaternion_average(quats: &[UnitQuaternion<f64>]) -> Result<UnitQuaternion<f64>> {
    if quats.is_empty() {
        return Err(FusionError::empty_input(
            "quaternion average needs at least one quaternion",
        ));
    }

    let accumulator = quats
        .iter()
        .map(quat_to_wxyz)
        .fold(Mat4::zeros(), |acc, q| acc + q * q.transpose());

    let eigen = SymmetricEigen::new(accumulator);
    let largest = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let mut mean: Vec4 = eigen.eigenvectors.column(largest).into_owned();
    if mean[0] < 0.0 {
        mean = -mean;
    }
    Ok(quat_from_wxyz(&mean))
}
