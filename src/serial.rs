use crate::dial::DialModel;
use crate::error::ConnectionError;
use crate::protocol::{Command, BAUD_RATE};
use log::{debug, error, info, warn};
use std::io::Write;
use std::time::Duration;

const WRITE_TIMEOUT_MS: u64 = 500;

pub type PortWriter = Box<dyn Write + Send>;

/// Opens a named port for writing.
///
/// The system implementation goes through `serialport`; tests substitute an
/// in-memory writer.
pub trait PortOpener {
    fn open(&self, port_name: &str, baud_rate: u32) -> Result<PortWriter, ConnectionError>;
}

// Opens real ports as 8N1 without flow control
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPorts;

impl PortOpener for SystemPorts {
    fn open(&self, port_name: &str, baud_rate: u32) -> Result<PortWriter, ConnectionError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(WRITE_TIMEOUT_MS))
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|source| ConnectionError::Open {
                port: port_name.to_string(),
                baud_rate,
                source,
            })?;
        Ok(Box::new(port))
    }
}

pub enum Connection {
    Closed,
    Open { port_name: String, writer: PortWriter },
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Connection::Closed => write!(f, "Closed"),
            Connection::Open { port_name, .. } => write!(f, "Open({})", port_name),
        }
    }
}

/// Fire-and-forget transport for dial and standby commands.
///
/// While closed every send succeeds without touching any port. While open
/// each command is written as one line and flushed. A failed write closes the
/// channel and keeps the error around for the UI to show.
pub struct SerialChannel {
    opener: Box<dyn PortOpener>,
    baud_rate: u32,
    connection: Connection,
    last_error: Option<String>,
}

impl std::fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SerialChannel")
            .field("baud_rate", &self.baud_rate)
            .field("connection", &self.connection)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl Default for SerialChannel {
    fn default() -> Self {
        Self::new(Box::new(SystemPorts), BAUD_RATE)
    }
}

impl SerialChannel {
    pub fn new(opener: Box<dyn PortOpener>, baud_rate: u32) -> Self {
        Self {
            opener,
            baud_rate,
            connection: Connection::Closed,
            last_error: None,
        }
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn is_open(&self) -> bool {
        matches!(self.connection, Connection::Open { .. })
    }

    pub fn port_name(&self) -> Option<&str> {
        match &self.connection {
            Connection::Open { port_name, .. } => Some(port_name),
            Connection::Closed => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Opens `port_name` and brings the device in line with the panel.
    ///
    /// Any existing connection is closed first. On success every dial's
    /// current value is sent in model order, followed by the standby flag.
    /// On failure the channel is left closed.
    pub fn connect(
        &mut self,
        port_name: &str,
        dials: &DialModel,
        standby: bool,
    ) -> Result<(), ConnectionError> {
        self.disconnect();

        let writer = match self.opener.open(port_name, self.baud_rate) {
            Ok(writer) => writer,
            Err(e) => {
                error!("{}", e);
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };
        info!("Connected to {} at {} baud", port_name, self.baud_rate);
        self.connection = Connection::Open {
            port_name: port_name.to_string(),
            writer,
        };
        self.last_error = None;

        for dial in dials.iter() {
            self.send(dial.name(), dial.value())?;
        }
        self.send_standby(standby)
    }

    /// Closes the port if one is open. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        if let Connection::Open { port_name, .. } =
            std::mem::replace(&mut self.connection, Connection::Closed)
        {
            info!("Disconnected from {}", port_name);
        }
    }

    pub fn send(&mut self, name: &str, value: i64) -> Result<(), ConnectionError> {
        self.write_command(&Command::Dial { name, value })
    }

    pub fn send_standby(&mut self, on: bool) -> Result<(), ConnectionError> {
        self.write_command(&Command::Standby(on))
    }

    fn write_command(&mut self, command: &Command) -> Result<(), ConnectionError> {
        let Connection::Open { port_name, writer } = &mut self.connection else {
            return Ok(());
        };

        let line = command.encode();
        let result = writer.write_all(&line).and_then(|_| writer.flush());
        match result {
            Ok(()) => {
                debug!("{} <- {}", port_name, command);
                Ok(())
            }
            Err(source) => {
                let e = ConnectionError::Write {
                    port: port_name.clone(),
                    source,
                };
                warn!("{}; closing connection", e);
                self.last_error = Some(e.to_string());
                self.connection = Connection::Closed;
                Err(e)
            }
        }
    }
}
