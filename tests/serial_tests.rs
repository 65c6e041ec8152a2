mod common;

use common::FakePorts;
use dial_control::config::default_dials;
use dial_control::{ConnectionError, DialModel, SerialChannel};

fn channel(ports: &FakePorts) -> SerialChannel {
    SerialChannel::new(Box::new(ports.clone()), 9600)
}

fn gauges() -> DialModel {
    DialModel::from_config(&default_dials()).unwrap()
}

#[test]
fn test_send_while_closed_is_silent_success() {
    let ports = FakePorts::default();
    let mut channel = channel(&ports);

    assert!(!channel.is_open());
    assert!(channel.send("Speedometer", 10).is_ok());
    assert!(channel.send_standby(true).is_ok());
    assert!(ports.wire.raw().is_empty());
    assert!(ports.opened.lock().unwrap().is_empty());
}

#[test]
fn test_connect_syncs_every_dial_then_standby() {
    let ports = FakePorts::default();
    let mut channel = channel(&ports);
    let mut dials = gauges();
    dials.set_value("Speedometer", 100).unwrap();
    dials.set_value("Thermometer", -5).unwrap();

    channel.connect("/dev/ttyUSB0", &dials, true).unwrap();

    assert!(channel.is_open());
    assert_eq!(channel.port_name(), Some("/dev/ttyUSB0"));
    assert_eq!(
        *ports.opened.lock().unwrap(),
        vec![("/dev/ttyUSB0".to_string(), 9600)]
    );
    assert_eq!(
        ports.wire.lines(),
        vec![
            "Speedometer:100\n",
            "Tachometer:0\n",
            "Dynamometer:0\n",
            "Chargeometer:0\n",
            "Thermometer:356\n",
            "STBY:1\n",
        ]
    );
}

#[test]
fn test_send_writes_one_line_per_command() {
    let ports = FakePorts::default();
    let mut channel = channel(&ports);
    channel.connect("COM3", &gauges(), false).unwrap();
    ports.wire.clear();

    channel.send("Tachometer", 270).unwrap();
    channel.send_standby(true).unwrap();
    channel.send_standby(false).unwrap();

    assert_eq!(ports.wire.raw(), b"Tachometer:270\nSTBY:1\nSTBY:0\n".to_vec());
}

#[test]
fn test_disconnect_then_send_does_no_io() {
    let ports = FakePorts::default();
    let mut channel = channel(&ports);
    channel.connect("COM3", &gauges(), false).unwrap();
    ports.wire.clear();

    channel.disconnect();
    channel.disconnect();

    assert!(!channel.is_open());
    assert_eq!(channel.port_name(), None);
    assert!(channel.send("Speedometer", 1).is_ok());
    assert!(ports.wire.raw().is_empty());
}

#[test]
fn test_failed_open_leaves_channel_closed() {
    let ports = FakePorts {
        missing: true,
        ..Default::default()
    };
    let mut channel = channel(&ports);

    let err = channel.connect("/dev/ttyNOPE", &gauges(), false).unwrap_err();

    assert!(matches!(
        err,
        ConnectionError::Open { ref port, baud_rate: 9600, .. } if port == "/dev/ttyNOPE"
    ));
    assert!(!channel.is_open());
    assert!(channel.last_error().unwrap().contains("/dev/ttyNOPE"));
    assert!(ports.wire.raw().is_empty());
}

#[test]
fn test_write_failure_demotes_to_closed() {
    let ports = FakePorts::default();
    let mut channel = channel(&ports);
    channel.connect("COM3", &gauges(), false).unwrap();

    ports.wire.unplug();
    let err = channel.send("Speedometer", 5).unwrap_err();

    assert!(matches!(err, ConnectionError::Write { ref port, .. } if port == "COM3"));
    assert!(!channel.is_open());
    assert!(channel.last_error().is_some());

    // Closed again, so later sends are silent
    assert!(channel.send("Speedometer", 6).is_ok());

    assert!(channel.take_last_error().is_some());
    assert!(channel.last_error().is_none());
}

#[test]
fn test_reconnect_replaces_connection_and_clears_error() {
    let ports = FakePorts::default();
    let mut channel = channel(&ports);
    let dials = gauges();

    channel.connect("COM3", &dials, false).unwrap();
    channel.connect("COM4", &dials, true).unwrap();

    assert_eq!(channel.port_name(), Some("COM4"));
    assert_eq!(ports.opened.lock().unwrap().len(), 2);
    assert!(channel.last_error().is_none());
    assert_eq!(ports.wire.lines().last().map(String::as_str), Some("STBY:1\n"));
}
