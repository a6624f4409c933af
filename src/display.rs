use crate::metrics::{format_speed, Snapshot};
use crate::settings::Settings;
use eframe::egui::{Pos2, Vec2};

/// Prompt shown when every metric category is disabled.
pub const EMPTY_PROMPT: &str = "Open Settings ⚙";

/// Visibility/interactivity mode of the overlay.
///
/// Advanced only by the hotkey toggle, in a fixed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Hidden,
    Interactive,
    ClickThrough,
}

impl DisplayMode {
    /// Hidden -> Interactive -> ClickThrough -> Hidden.
    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Hidden => DisplayMode::Interactive,
            DisplayMode::Interactive => DisplayMode::ClickThrough,
            DisplayMode::ClickThrough => DisplayMode::Hidden,
        }
    }

    /// Apply this mode's window side effects through the platform seam.
    pub fn apply(&self, surfaces: &mut dyn SurfaceControl) {
        match self {
            DisplayMode::Hidden => {
                surfaces.set_backdrop_visible(false);
                surfaces.set_info_visible(false);
            }
            DisplayMode::Interactive => {
                surfaces.set_click_through(false);
                surfaces.set_settings_affordance(true);
                surfaces.set_backdrop_visible(true);
                surfaces.set_info_visible(true);
            }
            DisplayMode::ClickThrough => {
                surfaces.set_click_through(true);
                surfaces.set_settings_affordance(false);
                surfaces.set_backdrop_visible(false);
                surfaces.set_info_visible(true);
            }
        }
    }
}

/// Window-system capability seam so mode transitions stay testable without
/// a real window system.
pub trait SurfaceControl {
    fn set_backdrop_visible(&mut self, visible: bool);
    fn set_info_visible(&mut self, visible: bool);
    /// Forward pointer input on the info surface to whatever is beneath it.
    fn set_click_through(&mut self, on: bool);
    fn set_settings_affordance(&mut self, shown: bool);
}

/// Produce the overlay's text lines from the latest snapshot.
///
/// One line per enabled category, in fixed order: CPU, RAM, temperature,
/// net-sent, net-received, battery, voltage, amperage, time. With nothing
/// enabled a single prompt line is returned.
pub fn render_lines(snapshot: &Snapshot, settings: &Settings) -> Vec<String> {
    let mut lines = Vec::new();
    if settings.show_cpu {
        if let Some(cpu) = snapshot.cpu_percent {
            lines.push(format!("💻 CPU: {cpu:>5.1} %"));
        }
    }
    if settings.show_ram {
        if let Some(ram) = snapshot.ram_percent {
            lines.push(format!("🧠 RAM: {ram:>5.1} %"));
        }
    }
    if settings.show_temp {
        match snapshot.temp {
            Some(t) => lines.push(format!("🌡 TEMP: {t:>4.0} °C")),
            None => lines.push("🌡 TEMP:    N/A".to_string()),
        }
    }
    if settings.show_network {
        // No line until a first counter delta exists.
        if let Some(net) = snapshot.net {
            lines.push(format!("📤 NET: {}", format_speed(net.sent_bps)));
            lines.push(format!("📥 NET: {}", format_speed(net.recv_bps)));
        }
    }
    if settings.show_battery {
        match snapshot.battery {
            Some(bat) => {
                let plugged = if bat.plugged { " (AC)" } else { "" };
                lines.push(format!("🔋 BAT: {:.0}%{plugged}", bat.percent));
            }
            None => lines.push("🔋 BAT: N/A".to_string()),
        }
    }
    if settings.show_voltage {
        lines.push("⚡ VOLT: N/A".to_string());
    }
    if settings.show_amperage {
        lines.push("🔌 AMP:  N/A".to_string());
    }
    if settings.show_time {
        if let Some(clock) = &snapshot.clock {
            lines.push(format!("🕒 TIME: {clock}"));
        }
    }
    if lines.is_empty() {
        lines.push(EMPTY_PROMPT.to_string());
    }
    lines
}

/// Standard drag semantics for the info surface: the pointer keeps the same
/// offset from the surface origin for the whole gesture. No momentum, no
/// snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    offset: Vec2,
}

impl DragState {
    /// Record the pointer's offset from the surface origin on pointer-down.
    pub fn begin(pointer: Pos2, surface_origin: Pos2) -> Self {
        Self {
            offset: pointer - surface_origin,
        }
    }

    /// New surface origin for the current pointer position.
    pub fn target(&self, pointer: Pos2) -> Pos2 {
        pointer - self.offset
    }
}
