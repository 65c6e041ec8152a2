// Export modules for the binary and for testing
pub mod about;
pub mod app;
pub mod config;
pub mod dial;
pub mod error;
pub mod ports;
pub mod protocol;
pub mod serial;
pub mod state;
pub mod ui;

// Re-export main struct and types for testing
pub use crate::app::{DialControl, SharedChannel};
pub use crate::config::{ConfigData, DialConfig};
pub use crate::dial::{Dial, DialModel};
pub use crate::error::{ConnectionError, DialError};
pub use crate::serial::{PortOpener, SerialChannel};
pub use crate::state::State;

// Constants
pub const PROGRAM_TITLE: &str = "Dial Control";
pub const INITIAL_WIDTH: f32 = 620.0;
pub const INITIAL_HEIGHT: f32 = 340.0;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Serial port to connect to at startup, e.g. /dev/ttyUSB0 or COM3
    #[arg(short, long)]
    pub port: Option<String>,

    /// Configuration file to use instead of the one in the user config dir
    #[arg(short, long)]
    pub config: Option<String>,
}
