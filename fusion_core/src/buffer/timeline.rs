// fusion_core/src/buffer/timeline.rs

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::buffer::BufferEntry;
use crate::error::{FusionError, Result};
use crate::sensors::SensorDescriptor;
use crate::types::Time;

/// A bounded, time-ordered store of [`BufferEntry`] values.
///
/// Entries are kept sorted by timestamp. Entries with equal timestamps keep
/// their insertion order, which is the tie-break `BufferEntry` itself does not
/// define. When full, the oldest entry is evicted.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use fusion_core::prelude::*;
///
/// let gps = Arc::new(SensorDescriptor::new("gps", SensorHandle(1)));
/// let fix = MeasurementData::from(PositionMeasurement::new(Vec3::new(1.0, 2.0, 3.0)));
///
/// let mut timeline = Timeline::new(100);
/// timeline.insert(BufferEntry::new(0.2, fix.clone(), gps.clone(), BufferMetadata::Measurement))?;
/// timeline.insert(BufferEntry::new(0.1, fix, gps, BufferMetadata::Measurement))?;
///
/// assert!(timeline.is_sorted());
/// assert_eq!(timeline.latest_measurement().map(|e| e.timestamp()), Some(Time(0.2)));
/// # Ok::<(), FusionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Timeline {
    max_len: usize,
    entries: VecDeque<BufferEntry>,
}

impl Timeline {
    /// Creates an empty timeline holding at most `max_len` entries (at least one).
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
            entries: VecDeque::with_capacity(max_len.clamp(1, 1024)),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &BufferEntry> + '_ {
        self.entries.iter()
    }

    /// Inserts `entry` after every entry with an equal or earlier timestamp and
    /// returns the index it ended up at.
    ///
    /// If this pushes the timeline past `max_len`, the oldest entry is dropped
    /// (which may be the one just inserted). Entries with a NaN or infinite
    /// timestamp are rejected and the timeline is left unchanged.
    pub fn insert(&mut self, entry: BufferEntry) -> Result<usize> {
        let t = entry.timestamp().as_secs();
        if !t.is_finite() {
            debug!(sensor = %entry.sensor().name, t, "Rejecting non-finite timestamp");
            return Err(FusionError::NonFiniteTimestamp { t });
        }

        if !entry.is_state() && !entry.is_measurement() {
            debug!(
                sensor = %entry.sensor().name,
                metadata = %entry.metadata(),
                "Inserting unclassified buffer entry"
            );
        }

        let mut idx = self.entries.partition_point(|e| e <= &entry);
        self.entries.insert(idx, entry);

        if self.entries.len() > self.max_len {
            if let Some(evicted) = self.entries.pop_front() {
                debug!(
                    sensor = %evicted.sensor().name,
                    timestamp = evicted.timestamp().as_secs(),
                    "Timeline full, evicting oldest entry"
                );
            }
            idx = idx.saturating_sub(1);
        }
        Ok(idx)
    }

    /// The newest entry classified as a state.
    pub fn latest_state(&self) -> Option<&BufferEntry> {
        self.entries.iter().rev().find(|e| e.is_state())
    }

    /// The newest entry classified as a measurement.
    pub fn latest_measurement(&self) -> Option<&BufferEntry> {
        self.entries.iter().rev().find(|e| e.is_measurement())
    }

    /// The newest entry produced by `sensor`, compared by descriptor identity.
    pub fn latest_from_sensor(&self, sensor: &Arc<SensorDescriptor>) -> Option<&BufferEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| Arc::ptr_eq(e.sensor(), sensor))
    }

    /// The newest state whose timestamp is at or before `t`.
    pub fn closest_state_before(&self, t: Time) -> Option<&BufferEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.timestamp() <= t)
            .find(|e| e.is_state())
    }

    /// Entries strictly later than `t`, oldest first.
    pub fn entries_after(&self, t: Time) -> impl Iterator<Item = &BufferEntry> + '_ {
        let start = self.entries.partition_point(|e| e.timestamp() <= t);
        self.entries.range(start..)
    }

    /// True if every entry is at or after the one before it.
    pub fn is_sorted(&self) -> bool {
        self.entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .all(|(a, b)| a <= b)
    }
}
