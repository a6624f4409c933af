#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use stat_overlay::gui::OverlayApp;
use stat_overlay::hotkey::HotkeyTrigger;
use stat_overlay::settings::{config_path, Settings};
use stat_overlay::{logging, tray, win_util};

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let debug = std::env::var("STAT_OVERLAY_DEBUG").is_ok();
    let config = config_path();
    logging::init(debug, config.parent().map(|d| d.join("stat_overlay.log")));
    win_util::lower_process_priority();

    let settings = Settings::load(&config);
    let trigger = HotkeyTrigger::new(settings.hotkey());
    trigger.start_listener();
    let tray_rx = tray::spawn();

    let (rgba, width, height) = tray::icon_rgba();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("stat_overlay")
            .with_inner_size([280.0, 240.0])
            .with_position([600.0, 20.0])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_visible(false)
            .with_taskbar(false)
            .with_icon(egui::IconData {
                rgba,
                width,
                height,
            }),
        ..Default::default()
    };

    eframe::run_native(
        "stat_overlay",
        native_options,
        Box::new(move |_cc| Box::new(OverlayApp::new(settings, config, trigger, tray_rx))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run overlay: {e}"))?;

    tracing::info!("overlay exited");
    Ok(())
}
