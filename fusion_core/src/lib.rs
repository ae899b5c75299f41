// fusion_core/src/lib.rs

// This file defines the public modules of the library.
pub mod buffer;
pub mod config;
pub mod error;
pub mod math;
pub mod messages;
pub mod prelude;
pub mod sensors;
pub mod state;
pub mod types;
