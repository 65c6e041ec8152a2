use crate::about;
use crate::app::DialControl;
use crate::state::State;
use crate::{INITIAL_WIDTH, PROGRAM_TITLE};
use eframe::egui::{self, Color32, Context, Ui};

const SLIDER_WIDTH: f32 = 250.0;
const ENTRY_WIDTH: f32 = 40.0;
const NAME_WIDTH: f32 = 110.0;

// Keep UI action handlers associated with DialControl
impl DialControl {
    // --- Button/Action Handlers (called from draw_running_state) ---

    /// Disconnects if connected, otherwise connects to the selected port and
    /// syncs every dial and the standby flag.
    pub fn handle_toggle_connection(&mut self) {
        if self.is_connected() {
            self.channel.borrow_mut().disconnect();
            return;
        }
        if self.selected_port.is_empty() {
            log::warn!("Connect ignored: no port selected.");
            return;
        }
        // Errors are logged and kept on the channel for display
        let connected = self
            .channel
            .borrow_mut()
            .connect(&self.selected_port, &self.dials, self.standby)
            .is_ok();
        if connected {
            self.save_config();
        }
    }

    pub fn handle_standby_toggle(&mut self) {
        log::debug!("Standby set to {}", self.standby);
        let _ = self.channel.borrow_mut().send_standby(self.standby);
    }

    /// Slider moved: store the new value, which also sends it.
    pub fn handle_slider_change(&mut self, index: usize, value: i64) {
        let Some(name) = self.dial_name(index) else {
            return;
        };
        match self.dials.set_value(&name, value) {
            Ok(stored) => self.entries[index] = stored.to_string(),
            Err(e) => log::warn!("{}", e),
        }
    }

    /// Enter pressed in a dial's text entry.
    ///
    /// Non-numeric text is dropped and the entry shows the dial's current
    /// value again.
    pub fn handle_entry_submit(&mut self, index: usize) {
        let Some(name) = self.dial_name(index) else {
            return;
        };
        let text = self.entries[index].clone();
        match self.dials.set_value_text(&name, &text) {
            Ok(stored) => self.entries[index] = stored.to_string(),
            Err(_) => {
                if let Some(current) = self.dials.value(&name) {
                    self.entries[index] = current.to_string();
                }
            }
        }
    }

    fn dial_name(&self, index: usize) -> Option<String> {
        self.dials.iter().nth(index).map(|d| d.name().to_string())
    }
}

// --- UI Drawing Functions ---

pub(crate) fn draw_about_screen(app: &mut DialControl, ui: &mut Ui) {
    ui.set_width(INITIAL_WIDTH);
    ui.vertical_centered(|ui| {
        ui.heading(format!("About {}", PROGRAM_TITLE));
        ui.separator();
        for line in about::about() {
            ui.label(line);
        }
        ui.separator();
        if ui.button("OK").clicked() {
            app.state = State::Running;
        }
    });
}

pub(crate) fn draw_running_state(app: &mut DialControl, ui: &mut Ui, ctx: &Context) {
    draw_connection_bar(app, ui, ctx);
    draw_status_line(app, ui);
    ui.separator();
    draw_dials_section(app, ui);
}

fn draw_connection_bar(app: &mut DialControl, ui: &mut Ui, ctx: &Context) {
    let connected = app.is_connected();

    ui.horizontal(|ui| {
        // Port selection is locked while connected
        ui.add_enabled_ui(!connected, |ui| {
            let selected_text = if app.selected_port.is_empty() {
                "-SELECT PORT-".to_string()
            } else {
                app.selected_port.clone()
            };
            egui::ComboBox::from_id_salt("port_combo")
                .width(220.0)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for port in &app.port_list {
                        ui.selectable_value(
                            &mut app.selected_port,
                            port.name.clone(),
                            port.to_string(),
                        );
                    }
                });

            if ui.button("Refresh").clicked() {
                log::info!("Refreshing port list manually.");
                app.refresh_ports();
            }
        });

        let (text, color) = if connected {
            ("Disconnect", Color32::RED)
        } else {
            ("Connect", Color32::GREEN)
        };
        if ui
            .button(
                egui::RichText::new(text)
                    .color(Color32::BLACK)
                    .background_color(color),
            )
            .clicked()
        {
            app.handle_toggle_connection();
        }

        if ui.checkbox(&mut app.standby, "Standby").changed() {
            app.handle_standby_toggle();
        }

        ui.separator();
        if ui.button("About").clicked() {
            app.state = State::About;
        }
        if ui.button("Exit").clicked() {
            // `on_exit` will be called
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn draw_status_line(app: &DialControl, ui: &mut Ui) {
    let channel = app.channel.borrow();
    ui.horizontal(|ui| match channel.port_name() {
        Some(port) => {
            ui.label(
                egui::RichText::new(format!("ONLINE {} @ {} baud", port, channel.baud_rate()))
                    .color(Color32::GREEN),
            );
        }
        None => {
            ui.label(egui::RichText::new("OFFLINE").color(Color32::GRAY));
            if let Some(err) = channel.last_error() {
                ui.colored_label(Color32::RED, err);
            }
        }
    });
}

fn draw_dials_section(app: &mut DialControl, ui: &mut Ui) {
    // Snapshot so the model can be mutated from inside the loop
    let dials: Vec<(String, i64, i64, i64, String)> = app
        .dials
        .iter()
        .map(|d| {
            (
                d.name().to_string(),
                d.min(),
                d.max(),
                d.value(),
                d.unit().to_string(),
            )
        })
        .collect();

    egui::Grid::new("dials_grid")
        .num_columns(6)
        .spacing([8.0, 10.0])
        .show(ui, |ui| {
            for (i, (name, min, max, value, unit)) in dials.into_iter().enumerate() {
                ui.add_sized([NAME_WIDTH, 18.0], egui::Label::new(name));
                ui.label(egui::RichText::new(min.to_string()).strong());

                let mut slider_value = value;
                let slider = egui::Slider::new(&mut slider_value, min..=max).show_value(false);
                ui.spacing_mut().slider_width = SLIDER_WIDTH;
                if ui.add(slider).changed() {
                    app.handle_slider_change(i, slider_value);
                }

                ui.label(egui::RichText::new(max.to_string()).strong());

                let response = ui.add(
                    egui::TextEdit::singleline(&mut app.entries[i]).desired_width(ENTRY_WIDTH),
                );
                if response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
                    app.handle_entry_submit(i);
                }

                ui.label(unit);
                ui.end_row();
            }
        });
}
