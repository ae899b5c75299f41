// fusion_core/src/messages.rs

use std::fmt;

use nalgebra::UnitQuaternion;

use crate::types::Vec3;

// =========================================================================
// == Sensor Payloads ==
// =========================================================================

/// A position fix `[x, y, z]` in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionMeasurement {
    pub position: Vec3,
}

impl PositionMeasurement {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// A full 6-DoF pose fix, e.g. from a motion-capture system or visual odometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseMeasurement {
    pub position: Vec3,
    pub orientation: UnitQuaternion<f64>,
}

impl PoseMeasurement {
    pub fn new(position: Vec3, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// A single inertial sample, expressed in the IMU's own frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ImuMeasurement {
    /// Specific force in m/s².
    pub linear_acceleration: Vec3,
    /// Angular rate in rad/s.
    pub angular_velocity: Vec3,
}

impl ImuMeasurement {
    pub fn new(linear_acceleration: Vec3, angular_velocity: Vec3) -> Self {
        Self {
            linear_acceleration,
            angular_velocity,
        }
    }
}

/// Magnetic field vector in the sensor frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MagnetometerMeasurement {
    pub magnetic_field: Vec3,
}

impl MagnetometerMeasurement {
    pub fn new(magnetic_field: Vec3) -> Self {
        Self { magnetic_field }
    }
}

// =========================================================================
// == Core Message Enum ==
// =========================================================================

/// Every kind of measurement the estimator knows how to buffer.
///
/// The set is closed on purpose: adding a sensor type means adding a variant
/// here, and every `match` over it then has to handle the new kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementData {
    Position(PositionMeasurement),
    Pose(PoseMeasurement),
    Imu(ImuMeasurement),
    Magnetometer(MagnetometerMeasurement),
}

/// The kind of a [`MeasurementData`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    Position,
    Pose,
    Imu,
    Magnetometer,
}

impl MeasurementData {
    pub fn kind(&self) -> MeasurementKind {
        match self {
            Self::Position(_) => MeasurementKind::Position,
            Self::Pose(_) => MeasurementKind::Pose,
            Self::Imu(_) => MeasurementKind::Imu,
            Self::Magnetometer(_) => MeasurementKind::Magnetometer,
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Position => "position",
            Self::Pose => "pose",
            Self::Imu => "imu",
            Self::Magnetometer => "magnetometer",
        };
        f.write_str(name)
    }
}

impl From<PositionMeasurement> for MeasurementData {
    fn from(m: PositionMeasurement) -> Self {
        Self::Position(m)
    }
}

impl From<PoseMeasurement> for MeasurementData {
    fn from(m: PoseMeasurement) -> Self {
        Self::Pose(m)
    }
}

impl From<ImuMeasurement> for MeasurementData {
    fn from(m: ImuMeasurement) -> Self {
        Self::Imu(m)
    }
}

impl From<MagnetometerMeasurement> for MeasurementData {
    fn from(m: MagnetometerMeasurement) -> Self {
        Self::Magnetometer(m)
    }
}
