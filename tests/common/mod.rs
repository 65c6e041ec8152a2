// Shared in-memory serial port for the integration tests
#![allow(dead_code)]

use dial_control::serial::{PortOpener, PortWriter};
use dial_control::ConnectionError;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Bytes written to the fake device. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct Wire {
    bytes: Arc<Mutex<Vec<u8>>>,
    broken: Arc<AtomicBool>,
}

impl Wire {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8(bytes.clone())
            .unwrap()
            .split_inclusive('\n')
            .map(str::to_string)
            .collect()
    }

    pub fn raw(&self) -> Vec<u8> {
        self.bytes.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.bytes.lock().unwrap().clear();
    }

    // Simulates the device being unplugged mid-session
    pub fn unplug(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }
}

impl Write for Wire {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
        }
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
        }
        Ok(())
    }
}

/// Opener handing out the shared wire, or refusing when `missing` is set.
#[derive(Clone, Default)]
pub struct FakePorts {
    pub wire: Wire,
    pub missing: bool,
    pub opened: Arc<Mutex<Vec<(String, u32)>>>,
}

impl PortOpener for FakePorts {
    fn open(&self, port_name: &str, baud_rate: u32) -> Result<PortWriter, ConnectionError> {
        if self.missing {
            return Err(ConnectionError::Open {
                port: port_name.to_string(),
                baud_rate,
                source: serialport::Error::new(serialport::ErrorKind::NoDevice, "no such port"),
            });
        }
        self.opened
            .lock()
            .unwrap()
            .push((port_name.to_string(), baud_rate));
        Ok(Box::new(self.wire.clone()))
    }
}
