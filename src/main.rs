//! hdsctl-panel - HDS oscilloscope control panel
//!
//! Connects to an instrument server over WebSocket, draws the live
//! waveforms of both channels and keeps the instrument's settings in
//! sync with a side panel of controls.
//!
//! ## Data flow
//! - Server pushes JSON snapshots → waveforms are plotted, controls updated
//! - User edits a control → a `"<id>: <value>"` command goes back
//!
//! Usage: `hdsctl-panel [ws://host:port/ws]`

use eframe::egui;

mod controls;
mod error;
mod input;
mod net;
mod panel;
mod protocol;
mod render;
mod settings;
mod sync;

use controls::ControlKind;
use input::{InputDispatcher, Key, UserAction};
use net::{Outbound, SocketClient};
use panel::Panel;
use render::ScopeDisplay;
use settings::PanelSettings;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting hdsctl-panel");

    let mut settings = PanelSettings::load();
    if let Some(url) = std::env::args().nth(1) {
        settings.server_url = url;
    }

    let (width, height) = settings.display_size();
    let panel = match Panel::new(&settings.layout, settings.state_sync(), width, height) {
        Ok(panel) => panel,
        Err(e) => {
            log::error!("Invalid control layout: {}", e);
            std::process::exit(2);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width + 340.0, height + 90.0])
            .with_title("hdsctl-panel"),
        ..Default::default()
    };

    eframe::run_native(
        "hdsctl-panel",
        options,
        Box::new(move |cc| Ok(Box::new(PanelApp::new(cc, settings, panel)))),
    )
}

/// Main application state
struct PanelApp {
    settings: PanelSettings,
    panel: Panel,
    client: SocketClient,
    dispatcher: InputDispatcher<Outbound>,

    /// Group titles and control ids, fixed at startup
    groups: Vec<(String, Vec<String>)>,
}

impl PanelApp {
    fn new(cc: &eframe::CreationContext<'_>, settings: PanelSettings, panel: Panel) -> Self {
        let client = SocketClient::connect(&settings.server_url, cc.egui_ctx.clone());
        let dispatcher = InputDispatcher::new(client.outbound());
        let groups = panel
            .registry
            .groups()
            .map(|(title, ids)| (title.to_string(), ids.into_iter().map(String::from).collect()))
            .collect();

        Self {
            settings,
            panel,
            client,
            dispatcher,
            groups,
        }
    }

    /// Apply every message that arrived since the last frame, in order
    fn process_messages(&mut self) {
        while let Some(text) = self.client.try_recv() {
            self.panel.handle_message(&text);
        }
    }

    /// Draw the control groups and collect what the user did
    fn controls_ui(&self, ui: &mut egui::Ui) -> Vec<UserAction> {
        let mut actions = Vec::new();

        for (title, ids) in &self.groups {
            egui::CollapsingHeader::new(title.as_str())
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new(title.as_str())
                        .num_columns(2)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for id in ids {
                                let Some(control) = self.panel.registry.get(id) else {
                                    continue;
                                };
                                ui.label(&control.label);

                                match control.kind {
                                    ControlKind::Text => {
                                        let mut text = control.value.clone();
                                        let response = ui.add(
                                            egui::TextEdit::singleline(&mut text)
                                                .id_salt(id)
                                                .desired_width(110.0),
                                        );
                                        if response.changed() {
                                            actions.push(UserAction::Edit { id: id.clone(), text });
                                        }
                                        // Enter drops focus in a singleline edit; take it back
                                        // so the next Enter confirms again
                                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                            actions.push(UserAction::KeyUp {
                                                id: id.clone(),
                                                key: Key::Enter,
                                            });
                                            response.request_focus();
                                        }
                                    }
                                    ControlKind::Select => {
                                        let mut selected = control.value.clone();
                                        egui::ComboBox::from_id_salt(id)
                                            .selected_text(&control.value)
                                            .width(110.0)
                                            .show_ui(ui, |ui| {
                                                for option in &control.options {
                                                    ui.selectable_value(&mut selected, option.clone(), option);
                                                }
                                            });
                                        if selected != control.value {
                                            actions.push(UserAction::Select {
                                                id: id.clone(),
                                                value: selected,
                                            });
                                        }
                                    }
                                    ControlKind::Readout => {
                                        ui.monospace(&control.value);
                                    }
                                }
                                ui.end_row();
                            }
                        });
                });
        }

        actions
    }
}

impl eframe::App for PanelApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("Saving settings on exit");
        self.settings.save();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("hdsctl");
                ui.separator();

                if ui.toggle_value(&mut self.settings.show_controls, "⚙ Controls").changed() {
                    self.settings.save();
                }

                ui.separator();
                ui.label(&self.settings.server_url);
                ui.separator();
                ui.label(self.client.state().describe());
            });
        });

        // Controls panel
        if self.settings.show_controls {
            let mut actions = Vec::new();
            egui::SidePanel::left("controls_panel")
                .min_width(300.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        actions = self.controls_ui(ui);
                    });
                });

            for action in actions {
                self.dispatcher.dispatch(&mut self.panel.registry, action);
            }
        }

        // Scope display
        egui::CentralPanel::default().show(ctx, |ui| {
            ScopeDisplay::new(&self.panel.frame)
                .idle_background(self.settings.background())
                .show(ui);

            ui.horizontal(|ui| {
                let counts: Vec<String> = self
                    .panel
                    .last_sample_counts
                    .iter()
                    .map(|n| n.to_string())
                    .collect();
                ui.small(format!("Samples: {}", counts.join(" / ")));
                ui.separator();
                ui.small(format!("Messages: {}", self.panel.messages_handled));
                if self.panel.messages_dropped > 0 {
                    ui.separator();
                    ui.small(format!("Dropped: {}", self.panel.messages_dropped));
                }
            });
        });
    }
}
