//! Classic signal-processing demonstrations.
//!
//! The numeric work lives in [`signal_lab_core`]; this crate adds the YAML
//! configuration, the five demos, PNG rendering with plotters and WAV export.

pub mod audio;
pub mod canvas;
pub mod config;
pub mod demos;
pub mod error;
pub mod types;

pub use config::LabConfig;
pub use demos::DemoRun;
pub use error::{LabError, LabResult};
pub use signal_lab_core;
