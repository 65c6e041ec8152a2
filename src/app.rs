use crate::config::{default_config_path, default_dials, ConfigData};
use crate::dial::DialModel;
use crate::ports::{find_port_index, list_ports, PortEntry};
use crate::serial::{SerialChannel, SystemPorts};
use crate::state::State;
use crate::{ui, Args, INITIAL_HEIGHT, INITIAL_WIDTH};
use eframe::{egui, glow};
use fast_config::Config;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// The channel is shared with the dial observer, all on the UI thread
pub type SharedChannel = Rc<RefCell<SerialChannel>>;

// The main application struct
pub struct DialControl {
    // State
    pub state: State,

    // Panel data
    pub dials: DialModel,
    pub standby: bool,
    pub entries: Vec<String>, // Text entry buffer per dial, same order as dials

    // Serial
    pub channel: SharedChannel,
    pub port_list: Vec<PortEntry>,
    pub selected_port: String,
    startup_port: Option<String>,

    // Configuration, None if the file could not be created
    pub config: Option<Config<ConfigData>>,
}

impl DialControl {
    /// Loads the configuration and builds the panel for the real serial ports.
    pub fn new(args: &Args) -> Self {
        let config_path = args.config.clone().unwrap_or_else(default_config_path);

        let config = match Config::new(&config_path, ConfigData::default()) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                log::error!(
                    "Error creating config file at {}: {}. Running on defaults.",
                    config_path,
                    e
                );
                None
            }
        };

        let defaults = ConfigData::default();
        let data = config.as_ref().map(|c| &c.data).unwrap_or(&defaults);
        let channel = SerialChannel::new(Box::new(SystemPorts), data.baud_rate);
        let mut app = Self::with_channel(data, channel);
        app.config = config;
        app.startup_port = args.port.clone().filter(|p| !p.is_empty());
        if let Some(port) = &app.startup_port {
            app.selected_port = port.clone();
        }
        app
    }

    /// Builds the panel from configuration data and an existing channel.
    ///
    /// Registers the observer that forwards every dial change to the channel.
    pub fn with_channel(data: &ConfigData, channel: SerialChannel) -> Self {
        let mut dials = DialModel::from_config(&data.dials).unwrap_or_else(|e| {
            log::error!("Invalid dial configuration: {}. Using default dials.", e);
            DialModel::from_config(&default_dials()).unwrap_or_default()
        });

        let channel: SharedChannel = Rc::new(RefCell::new(channel));
        let observer_channel = Rc::clone(&channel);
        dials.subscribe(move |dial| {
            // Failures are logged and recorded by the channel itself
            let _ = observer_channel.borrow_mut().send(dial.name(), dial.value());
        });

        let entries = dials.iter().map(|d| d.value().to_string()).collect();

        Self {
            state: State::Initialising,
            dials,
            standby: false,
            entries,
            channel,
            port_list: vec![],
            selected_port: data.port.clone(),
            startup_port: None,
            config: None,
        }
    }

    // Initialization logic called once at the start
    pub fn init(&mut self) {
        self.refresh_ports();

        if let Some(port) = self.startup_port.take() {
            log::info!("Connecting to {} as requested on the command line.", port);
            self.handle_toggle_connection();
        }

        self.state = State::Running;
        log::info!("Initialization complete. State set to Running.");
    }

    /// Rescans the system ports. Keeps the current selection even if it
    /// vanished so a replugged device can be reconnected by name.
    pub fn refresh_ports(&mut self) {
        self.port_list = list_ports();
        if !self.selected_port.is_empty()
            && find_port_index(&self.port_list, &self.selected_port).is_none()
        {
            log::warn!("Selected port {} is not currently present.", self.selected_port);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.channel.borrow().is_open()
    }

    /// Copies the panel selection into the configuration and writes it out.
    pub fn save_config(&mut self) {
        let Some(config) = self.config.as_mut() else {
            return;
        };
        config.data.port = self.selected_port.clone();
        if let Err(e) = config.save() {
            log::error!("Failed to save configuration: {}", e);
        } else {
            log::info!("Configuration saved.");
        }
    }

    // Graceful shutdown logic
    fn shutdown_app(&mut self) {
        log::info!("Shutdown requested.");
        self.channel.borrow_mut().disconnect();
        self.save_config();
        log::info!("Shutdown complete.");
    }
}

// Main eframe application loop
impl eframe::App for DialControl {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keeps the connection status current after a failed write
        ctx.request_repaint_after(Duration::from_millis(250));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Resize::default()
                .default_width(INITIAL_WIDTH)
                .default_height(INITIAL_HEIGHT)
                .auto_sized()
                .show(ui, |ui| match self.state {
                    State::Initialising => {
                        ui.centered_and_justified(|ui| {
                            ui.label("Initialising...");
                        });
                        self.init();
                    }
                    State::About => {
                        ui::draw_about_screen(self, ui);
                    }
                    State::Running => {
                        ui::draw_running_state(self, ui, ctx);
                    }
                });
        });
    }

    // Called when the application is about to close
    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.shutdown_app();
    }
}
