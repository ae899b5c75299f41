// fusion_core/src/buffer/mod.rs

//! Timestamped records flowing through the estimator.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::messages::MeasurementData;
use crate::sensors::SensorDescriptor;
use crate::state::StateSnapshot;
use crate::types::Time;

pub mod timeline;

pub use timeline::Timeline;

/// Tag describing what a [`BufferEntry`] holds.
///
/// Raw tags outside the five known codes are kept as `Unclassified` instead of
/// being rejected; such entries are neither states nor measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferMetadata {
    CoreState,
    SensorState,
    InitState,
    Measurement,
    /// A measurement older than entries that were already processed.
    MeasurementOoo,
    Unclassified(UnknownTag),
}

/// A raw tag that is not one of the known [`BufferMetadata`] codes.
///
/// Only `BufferMetadata::from(i32)` creates one, so a known code can never end
/// up unclassified:
///
/// ```compile_fail
/// use fusion_core::buffer::{BufferMetadata, UnknownTag};
/// let tag = BufferMetadata::Unclassified(UnknownTag(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownTag(i32);

impl UnknownTag {
    pub fn code(self) -> i32 {
        self.0
    }
}

/// Tags classified as states.
pub const STATE_METADATA: [BufferMetadata; 3] = [
    BufferMetadata::CoreState,
    BufferMetadata::SensorState,
    BufferMetadata::InitState,
];

/// Tags classified as measurements.
pub const MEASUREMENT_METADATA: [BufferMetadata; 2] =
    [BufferMetadata::Measurement, BufferMetadata::MeasurementOoo];

impl BufferMetadata {
    /// The raw integer tag.
    pub fn code(self) -> i32 {
        match self {
            Self::CoreState => 0,
            Self::SensorState => 1,
            Self::InitState => 2,
            Self::Measurement => 3,
            Self::MeasurementOoo => 4,
            Self::Unclassified(tag) => tag.code(),
        }
    }

    pub fn is_state(self) -> bool {
        STATE_METADATA.contains(&self)
    }

    pub fn is_measurement(self) -> bool {
        MEASUREMENT_METADATA.contains(&self)
    }
}

impl From<i32> for BufferMetadata {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::CoreState,
            1 => Self::SensorState,
            2 => Self::InitState,
            3 => Self::Measurement,
            4 => Self::MeasurementOoo,
            other => Self::Unclassified(UnknownTag(other)),
        }
    }
}

impl fmt::Display for BufferMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoreState => f.write_str("core_state"),
            Self::SensorState => f.write_str("sensor_state"),
            Self::InitState => f.write_str("init_state"),
            Self::Measurement => f.write_str("measurement"),
            Self::MeasurementOoo => f.write_str("measurement_ooo"),
            Self::Unclassified(tag) => write!(f, "unclassified({})", tag.code()),
        }
    }
}

/// The payload of a buffer entry: either a state estimate or a sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub enum BufferData {
    State(StateSnapshot),
    Measurement(MeasurementData),
}

impl From<StateSnapshot> for BufferData {
    fn from(snapshot: StateSnapshot) -> Self {
        Self::State(snapshot)
    }
}

impl From<MeasurementData> for BufferData {
    fn from(data: MeasurementData) -> Self {
        Self::Measurement(data)
    }
}

/// One immutable, timestamped record in the estimator timeline.
///
/// Entries compare by `timestamp` only. Two entries with the same timestamp
/// compare as `Equal` (and `==`) even if their payloads differ; ordering them
/// further is the job of the container holding them.
#[derive(Debug, Clone)]
pub struct BufferEntry {
    timestamp: Time,
    data: BufferData,
    sensor: Arc<SensorDescriptor>,
    metadata: BufferMetadata,
}

impl BufferEntry {
    /// Wraps a payload. `metadata` is not validated: unknown raw tags give an
    /// entry that is neither a state nor a measurement.
    pub fn new(
        timestamp: impl Into<Time>,
        data: impl Into<BufferData>,
        sensor: Arc<SensorDescriptor>,
        metadata: impl Into<BufferMetadata>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            data: data.into(),
            sensor,
            metadata: metadata.into(),
        }
    }

    pub fn timestamp(&self) -> Time {
        self.timestamp
    }

    pub fn data(&self) -> &BufferData {
        &self.data
    }

    pub fn sensor(&self) -> &Arc<SensorDescriptor> {
        &self.sensor
    }

    pub fn metadata(&self) -> BufferMetadata {
        self.metadata
    }

    pub fn is_state(&self) -> bool {
        self.metadata.is_state()
    }

    pub fn is_measurement(&self) -> bool {
        self.metadata.is_measurement()
    }

    /// The state payload, if this entry carries one.
    pub fn state(&self) -> Option<&StateSnapshot> {
        match &self.data {
            BufferData::State(snapshot) => Some(snapshot),
            BufferData::Measurement(_) => None,
        }
    }

    /// The measurement payload, if this entry carries one.
    pub fn measurement(&self) -> Option<&MeasurementData> {
        match &self.data {
            BufferData::Measurement(data) => Some(data),
            BufferData::State(_) => None,
        }
    }
}

impl PartialEq for BufferEntry {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl PartialOrd for BufferEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.timestamp.partial_cmp(&other.timestamp)
    }
}

impl fmt::Display for BufferEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t", self.sensor.name, self.timestamp, self.metadata)
    }
}
