//! Error types for the demo layer

use crate::config::ConfigError;
use signal_lab_core::DspError;
use std::path::PathBuf;
use thiserror::Error;

pub type LabResult<T> = Result<T, LabError>;

#[derive(Error, Debug)]
pub enum LabError {
    #[error(transparent)]
    Dsp(#[from] DspError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Drawing a figure failed (backend errors are stringified)
    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },

    #[error("failed to write {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
