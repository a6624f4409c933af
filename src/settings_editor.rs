use crate::cleanup;
use crate::gui::OverlayApp;
use crate::settings::{
    ClockFormat, Settings, Theme, ALPHA_RANGE, FONT_SIZE_RANGE, INTERVAL_CHOICES, THEME_CHOICES,
};
use eframe::egui;

/// Result of committing the editor into the live settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The hotkey string changed; the running binding keeps the old value
    /// until restart.
    pub hotkey_changed: bool,
}

/// Two-step guard in front of the temp-file sweep: the sweep only starts
/// once the prompt has been explicitly accepted.
#[derive(Debug, Default)]
pub struct CleanupConfirm {
    open: bool,
}

impl CleanupConfirm {
    pub fn request(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close the prompt. Returns true only when it was pending and accepted.
    pub fn resolve(&mut self, accepted: bool) -> bool {
        std::mem::take(&mut self.open) && accepted
    }

    /// Draw the prompt; returns true once the user accepts it.
    pub fn ui(&mut self, ctx: &egui::Context) -> bool {
        if !self.open {
            return false;
        }
        let mut choice: Option<bool> = None;
        let mut open = true;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Delete temporary files?");
                ui.colored_label(egui::Color32::YELLOW, "This action cannot be undone.");
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        choice = Some(true);
                    }
                    if ui.button("No").clicked() {
                        choice = Some(false);
                    }
                });
            });
        if !open {
            choice = Some(false);
        }
        match choice {
            Some(accepted) => self.resolve(accepted),
            None => false,
        }
    }
}

/// Interactive editor for the settings record.
///
/// Font size and opacity are live-bound for preview; everything else is
/// editor state copied over on commit.
pub struct SettingsEditor {
    hotkey: String,
    use_12h: bool,
    show_cpu: bool,
    show_ram: bool,
    show_temp: bool,
    show_network: bool,
    show_battery: bool,
    show_voltage: bool,
    show_amperage: bool,
    show_time: bool,
    theme: Theme,
    update_interval: f32,
    confirm: CleanupConfirm,
}

impl SettingsEditor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            confirm: CleanupConfirm::default(),
            hotkey: settings.hotkey.clone(),
            use_12h: settings.clock_format == ClockFormat::H12,
            show_cpu: settings.show_cpu,
            show_ram: settings.show_ram,
            show_temp: settings.show_temp,
            show_network: settings.show_network,
            show_battery: settings.show_battery,
            show_voltage: settings.show_voltage,
            show_amperage: settings.show_amperage,
            show_time: settings.show_time,
            theme: settings.theme,
            update_interval: settings.update_interval,
        }
    }

    pub fn set_hotkey(&mut self, hotkey: &str) {
        self.hotkey = hotkey.to_string();
    }

    /// Copy the editor state into `settings`.
    pub fn apply(&self, settings: &mut Settings) -> CommitOutcome {
        let hotkey_changed = settings.hotkey != self.hotkey;
        settings.hotkey = self.hotkey.clone();
        settings.clock_format = if self.use_12h {
            ClockFormat::H12
        } else {
            ClockFormat::H24
        };
        settings.show_cpu = self.show_cpu;
        settings.show_ram = self.show_ram;
        settings.show_temp = self.show_temp;
        settings.show_network = self.show_network;
        settings.show_battery = self.show_battery;
        settings.show_voltage = self.show_voltage;
        settings.show_amperage = self.show_amperage;
        settings.show_time = self.show_time;
        settings.theme = self.theme;
        settings.update_interval = self.update_interval;
        CommitOutcome { hotkey_changed }
    }

    /// Draw the editor in its own viewport. Returns false once it should
    /// close.
    pub fn ui(&mut self, ctx: &egui::Context, app: &mut OverlayApp) -> bool {
        let mut keep_open = true;
        let title = if app.cleanup.is_running() {
            "Cleaning..."
        } else {
            "Settings"
        };
        ctx.show_viewport_immediate(
            Self::viewport_id(),
            egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size([300.0, 620.0])
                .with_always_on_top(),
            |ctx, _class| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.panel(ui, app, &mut keep_open);
                    });
                });
                if self.confirm.ui(ctx) && !app.cleanup.start(cleanup::default_targets()) {
                    app.notice = Some("Cleanup is already running.".to_string());
                }
                if ctx.input(|i| i.viewport().close_requested()) {
                    keep_open = false;
                }
            },
        );
        keep_open
    }

    pub fn viewport_id() -> egui::ViewportId {
        egui::ViewportId::from_hash_of("settings_editor")
    }

    fn panel(&mut self, ui: &mut egui::Ui, app: &mut OverlayApp, keep_open: &mut bool) {
        ui.heading("Display Items");
        ui.checkbox(&mut self.show_cpu, "CPU Usage");
        ui.checkbox(&mut self.show_ram, "RAM Usage");
        ui.checkbox(&mut self.show_temp, "CPU Temp");
        ui.checkbox(&mut self.show_network, "Network Speed");
        ui.separator();
        ui.checkbox(&mut self.show_battery, "Battery Level");
        ui.checkbox(&mut self.show_voltage, "Voltage (V)");
        ui.checkbox(&mut self.show_amperage, "Amperage (A)");
        ui.separator();
        ui.checkbox(&mut self.show_time, "Time");

        ui.separator();
        ui.heading("General");
        // Live-bound for immediate preview.
        ui.label("Font Size");
        ui.add(egui::Slider::new(
            &mut app.settings.font_size,
            FONT_SIZE_RANGE,
        ));
        ui.label("Background Alpha");
        ui.add(egui::Slider::new(&mut app.settings.alpha, ALPHA_RANGE));

        egui::ComboBox::from_label("Color Theme")
            .selected_text(self.theme.to_string())
            .show_ui(ui, |ui| {
                for theme in THEME_CHOICES {
                    ui.selectable_value(&mut self.theme, theme, theme.to_string());
                }
            });
        egui::ComboBox::from_label("Update Interval (sec)")
            .selected_text(format!("{}", self.update_interval))
            .show_ui(ui, |ui| {
                for choice in INTERVAL_CHOICES {
                    ui.selectable_value(&mut self.update_interval, choice, format!("{choice}"));
                }
            });

        ui.horizontal(|ui| {
            ui.label("Hotkey");
            ui.text_edit_singleline(&mut self.hotkey);
        });
        ui.checkbox(&mut self.use_12h, "Use 12h Format (AM/PM)");

        ui.separator();
        ui.heading("Maintenance");
        #[cfg(target_os = "windows")]
        if ui.button("Open Task Manager").clicked() {
            if let Err(e) = std::process::Command::new("taskmgr").spawn() {
                app.error = Some(format!("Failed to open Task Manager: {e}"));
            }
        }
        let cleaning = app.cleanup.is_running();
        if ui
            .add_enabled(!cleaning, egui::Button::new("Clean Temp Files"))
            .clicked()
        {
            self.confirm.request();
        }
        if let Some(msg) = &app.cleanup_result {
            ui.label(msg);
        }
        if let Some(err) = &app.error {
            ui.colored_label(egui::Color32::RED, err);
        }

        ui.separator();
        if ui.button("Save & Close").clicked() && app.commit_settings(self) {
            *keep_open = false;
        }
    }
}
