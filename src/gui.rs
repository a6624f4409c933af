use crate::cleanup::CleanupTask;
use crate::display::{render_lines, DisplayMode, DragState, SurfaceControl};
use crate::hotkey::HotkeyTrigger;
use crate::metrics::{Sampler, Snapshot};
use crate::settings::Settings;
use crate::settings_editor::SettingsEditor;
use crate::tray::TrayCommand;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

/// Translates mode side effects into viewport commands and app flags.
///
/// The main viewport is the info surface; the backdrop is an extra
/// viewport drawn while `backdrop` is set.
struct Surfaces<'a> {
    ctx: &'a egui::Context,
    backdrop: &'a mut bool,
    gear: &'a mut bool,
}

impl SurfaceControl for Surfaces<'_> {
    fn set_backdrop_visible(&mut self, visible: bool) {
        *self.backdrop = visible;
    }

    fn set_info_visible(&mut self, visible: bool) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Visible(visible));
    }

    fn set_click_through(&mut self, on: bool) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::MousePassthrough(on));
    }

    fn set_settings_affordance(&mut self, shown: bool) {
        *self.gear = shown;
    }
}

pub struct OverlayApp {
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub mode: DisplayMode,
    pub lines: Vec<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub cleanup: CleanupTask,
    pub cleanup_result: Option<String>,
    snapshot: Snapshot,
    sampler: Sampler,
    trigger: HotkeyTrigger,
    tray_rx: Receiver<TrayCommand>,
    editor: Option<SettingsEditor>,
    drag: Option<DragState>,
    last_tick: Option<Instant>,
    backdrop_visible: bool,
    gear_visible: bool,
}

impl OverlayApp {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        trigger: HotkeyTrigger,
        tray_rx: Receiver<TrayCommand>,
    ) -> Self {
        let mut app = Self {
            settings,
            settings_path,
            mode: DisplayMode::Hidden,
            lines: Vec::new(),
            error: None,
            notice: None,
            cleanup: CleanupTask::new(),
            cleanup_result: None,
            snapshot: Snapshot::default(),
            sampler: Sampler::new(),
            trigger,
            tray_rx,
            editor: None,
            drag: None,
            last_tick: None,
            backdrop_visible: false,
            gear_visible: true,
        };
        app.refresh_lines();
        app
    }

    /// Re-render the label text from the latest snapshot and settings.
    pub fn refresh_lines(&mut self) {
        self.lines = render_lines(&self.snapshot, &self.settings);
    }

    /// Advance the display mode cycle and apply its window side effects.
    pub fn toggle(&mut self, ctx: &egui::Context) {
        self.mode = self.mode.toggle();
        tracing::debug!(mode = ?self.mode, "display mode toggled");
        let mode = self.mode;
        let mut surfaces = Surfaces {
            ctx,
            backdrop: &mut self.backdrop_visible,
            gear: &mut self.gear_visible,
        };
        mode.apply(&mut surfaces);
    }

    /// Commit the editor into the live record: re-render and persist.
    ///
    /// Any previous notice is cleared first; a changed hotkey raises the
    /// restart notice (the running binding keeps the old combination until
    /// then). Returns false when persisting failed, leaving the editor open.
    pub fn commit_settings(&mut self, editor: &SettingsEditor) -> bool {
        self.notice = None;
        let outcome = editor.apply(&mut self.settings);
        if outcome.hotkey_changed {
            self.notice = Some("Restart the app to apply the new hotkey.".to_string());
        }
        match self.settings.save(&self.settings_path) {
            Ok(()) => {
                self.error = None;
                self.refresh_lines();
                true
            }
            Err(e) => {
                self.error = Some(format!("Failed to save: {e}"));
                false
            }
        }
    }

    /// Open the settings editor, or focus it when already open.
    pub fn open_settings(&mut self, ctx: &egui::Context) {
        if self.editor.is_some() {
            ctx.send_viewport_cmd_to(SettingsEditor::viewport_id(), egui::ViewportCommand::Focus);
        } else {
            self.editor = Some(SettingsEditor::new(&self.settings));
        }
    }

    fn tick_due(&self) -> bool {
        self.last_tick
            .map_or(true, |t| t.elapsed().as_secs_f32() >= self.settings.update_interval)
    }

    fn handle_background_events(&mut self, ctx: &egui::Context) {
        if self.trigger.take() {
            self.toggle(ctx);
        }
        while let Ok(cmd) = self.tray_rx.try_recv() {
            match cmd {
                TrayCommand::Toggle => self.toggle(ctx),
                TrayCommand::Exit => {
                    tracing::info!("exit requested from tray");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
        if let Some(report) = self.cleanup.poll() {
            self.cleanup_result = Some(report.summary());
        }
    }

    fn handle_drag(&mut self, ctx: &egui::Context, response: &egui::Response) {
        if self.mode != DisplayMode::Interactive {
            self.drag = None;
            return;
        }
        let origin = ctx
            .input(|i| i.viewport().outer_rect)
            .map(|r| r.min)
            .unwrap_or_default();
        let pointer = ctx.input(|i| i.pointer.interact_pos());
        if response.drag_started() {
            if let Some(p) = pointer {
                self.drag = Some(DragState::begin(origin + p.to_vec2(), origin));
            }
        } else if response.dragged() {
            if let (Some(drag), Some(p)) = (self.drag, pointer) {
                let target = drag.target(origin + p.to_vec2());
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(target));
            }
        } else if response.drag_stopped() {
            self.drag = None;
        }
    }

    fn show_backdrop(&self, ctx: &egui::Context) {
        let alpha = (self.settings.alpha.clamp(0.0, 1.0) * 255.0) as u8;
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("overlay_backdrop"),
            egui::ViewportBuilder::default()
                .with_title("stat_overlay backdrop")
                .with_decorations(false)
                .with_transparent(true)
                .with_always_on_top()
                .with_mouse_passthrough(true)
                .with_fullscreen(true),
            |ctx, _class| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none().fill(egui::Color32::from_black_alpha(alpha)))
                    .show(ctx, |_ui| {});
            },
        );
    }

    fn show_info_panel(&mut self, ctx: &egui::Context) {
        let fg = self.settings.theme.foreground();
        let bg = self.settings.theme.background();
        let font = self.settings.font_size as f32;

        let panel_frame = egui::Frame::none().fill(egui::Color32::TRANSPARENT);
        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let inner = egui::Frame::none()
                    .fill(bg)
                    .rounding(egui::Rounding::same(6.0))
                    .inner_margin(egui::Margin::symmetric(10.0, 5.0));
                let response = inner
                    .show(ui, |ui| {
                        ui.horizontal_top(|ui| {
                            if self.gear_visible {
                                let gear = ui.button(egui::RichText::new("⚙").size(font));
                                if gear.clicked() {
                                    self.open_settings(ctx);
                                }
                            }
                            ui.vertical(|ui| {
                                for line in &self.lines {
                                    ui.label(
                                        egui::RichText::new(line)
                                            .monospace()
                                            .size(font)
                                            .strong()
                                            .color(fg),
                                    );
                                }
                                if let Some(notice) = &self.notice {
                                    ui.label(
                                        egui::RichText::new(notice).size(font * 0.8).color(fg),
                                    );
                                }
                            });
                        });
                    })
                    .response;
                let response = response.interact(egui::Sense::drag());
                self.handle_drag(ctx, &response);
            });
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Keep the info surface window itself transparent.
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_background_events(ctx);

        if self.tick_due() {
            self.snapshot = self.sampler.sample(&self.settings);
            self.refresh_lines();
            self.last_tick = Some(Instant::now());
        }
        ctx.request_repaint_after(Duration::from_secs_f32(
            self.settings.update_interval.max(0.1),
        ));

        if self.backdrop_visible {
            self.show_backdrop(ctx);
        }
        self.show_info_panel(ctx);

        if let Some(mut editor) = self.editor.take() {
            if editor.ui(ctx, self) {
                self.editor = Some(editor);
            }
        }
    }
}
