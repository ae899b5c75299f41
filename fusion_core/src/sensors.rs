// fusion_core/src/sensors.rs

use std::fmt;

// --- A generic, framework-agnostic identifier ---
// On a real robot this might be a hardware ID; any unique integer works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SensorHandle(pub u64);

/// Read-only identity of a sensor.
///
/// Owned by whatever registry created the sensor; buffer entries only hold an
/// `Arc` to it, so many entries may share one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SensorDescriptor {
    pub name: String,
    pub handle: SensorHandle,
}

impl SensorDescriptor {
    pub fn new(name: impl Into<String>, handle: SensorHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

impl fmt::Display for SensorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
