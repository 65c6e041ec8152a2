use log::{error, info};
use serialport::{SerialPortInfo, SerialPortType};

// A serial port offered in the port selector
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortEntry {
    pub name: String,        // Device name passed to open, e.g. /dev/ttyUSB0 or COM3
    pub description: String, // What the OS knows about it
}

impl PortEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

// How the port is displayed in the dropdown
impl std::fmt::Display for PortEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.description)
        }
    }
}

/// Lists the serial ports currently present on the system.
///
/// Sorted by name with duplicates removed. Enumeration failures are logged
/// and produce an empty list.
pub fn list_ports() -> Vec<PortEntry> {
    match serialport::available_ports() {
        Ok(ports) => {
            let entries = collect_entries(ports.iter().map(entry_from_info));
            info!("Port list refresh complete. Found {} ports.", entries.len());
            entries
        }
        Err(e) => {
            error!("Failed to enumerate serial ports: {}", e);
            Vec::new()
        }
    }
}

/// Sorts and deduplicates entries by port name.
pub fn collect_entries(entries: impl IntoIterator<Item = PortEntry>) -> Vec<PortEntry> {
    let mut entries: Vec<PortEntry> = entries.into_iter().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries.dedup_by(|a, b| a.name == b.name);
    entries
}

/// Position of the saved port name in the list, if it is still present.
pub fn find_port_index(ports: &[PortEntry], name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    ports.iter().position(|p| p.name == name)
}

fn entry_from_info(info: &SerialPortInfo) -> PortEntry {
    let description = match &info.port_type {
        SerialPortType::UsbPort(usb) => format!(
            "USB {} {}",
            usb.manufacturer.as_deref().unwrap_or("Device"),
            usb.product.as_deref().unwrap_or("Serial Port")
        ),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::PciPort => "PCI".to_string(),
        _ => String::new(),
    };
    PortEntry::new(info.port_name.clone(), description)
}
