//! Line protocol spoken to the gauge driver.
//!
//! Every command is a single ASCII line terminated by `\n`:
//!
//! * `<DialName>:<integer>` sets a dial, e.g. `Speedometer:120`
//! * `STBY:1` / `STBY:0` turns standby on or off
//!
//! Nothing is ever read back from the device.

use std::fmt;

pub const BAUD_RATE: u32 = 9600;
pub const STANDBY_KEY: &str = "STBY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Dial { name: &'a str, value: i64 },
    Standby(bool),
}

impl Command<'_> {
    /// Encodes the command as the bytes written to the port, newline included.
    pub fn encode(&self) -> Vec<u8> {
        format!("{}\n", self).into_bytes()
    }
}

// The line without its terminator, also used in log output
impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Dial { name, value } => write!(f, "{}:{}", name, value),
            Command::Standby(on) => write!(f, "{}:{}", STANDBY_KEY, u8::from(*on)),
        }
    }
}
