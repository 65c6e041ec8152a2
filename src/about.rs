pub fn about() -> Vec<String> {
    vec![
        "Dial Control drives a bank of analog gauges over a serial link.".to_string(),
        "Each dial is sent as a <Name>:<value> line at 9600 baud; \
        the standby switch is sent as STBY:0 or STBY:1.".to_string(),
        "\n".to_string(),
        "On connect the current position of every dial and the standby \
        state are sent so the gauges match the panel.".to_string(),
        "Set RUST_LOG=debug to see every line written to the port.".to_string(),
    ]
}
