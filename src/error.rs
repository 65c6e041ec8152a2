use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised by the dial model.
#[derive(Debug, Error)]
pub enum DialError {
    #[error("unknown dial '{0}'")]
    UnknownDial(String),

    #[error("'{input}' is not a whole number")]
    Parse {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("dial '{name}' has invalid bounds {min}..={max} (min must be below max)")]
    InvalidBounds { name: String, min: i64, max: i64 },

    #[error("dial '{0}' is defined more than once")]
    DuplicateDial(String),
}

/// Errors raised by the serial channel.
#[derive(Debug, Error)]
pub enum ConnectionError {
    // Port busy, missing or not permitted. The channel stays closed.
    #[error("failed to open {port} at {baud_rate} baud: {source}")]
    Open {
        port: String,
        baud_rate: u32,
        #[source]
        source: serialport::Error,
    },

    // The channel was demoted to closed when this happened.
    #[error("write to {port} failed: {source}")]
    Write {
        port: String,
        #[source]
        source: std::io::Error,
    },
}
