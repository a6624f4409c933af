use eframe::egui::pos2;
use stat_overlay::display::{render_lines, DisplayMode, DragState, SurfaceControl, EMPTY_PROMPT};
use stat_overlay::metrics::{BatteryInfo, NetSpeed, Snapshot};
use stat_overlay::settings::Settings;

fn all_disabled() -> Settings {
    Settings {
        show_cpu: false,
        show_ram: false,
        show_temp: false,
        show_network: false,
        show_battery: false,
        show_voltage: false,
        show_amperage: false,
        show_time: false,
        ..Settings::default()
    }
}

fn full_snapshot() -> Snapshot {
    Snapshot {
        cpu_percent: Some(42.5),
        ram_percent: Some(63.1),
        temp: Some(55.0),
        net: Some(NetSpeed {
            sent_bps: 4000.0,
            recv_bps: 80_000.0,
        }),
        battery: Some(BatteryInfo {
            percent: 88.0,
            plugged: true,
        }),
        clock: Some("12:34:56".into()),
    }
}

#[test]
fn toggle_is_cyclic_with_period_three() {
    for start in [
        DisplayMode::Hidden,
        DisplayMode::Interactive,
        DisplayMode::ClickThrough,
    ] {
        assert_ne!(start.toggle(), start);
        assert_ne!(start.toggle().toggle(), start);
        assert_eq!(start.toggle().toggle().toggle(), start);
    }
}

#[test]
fn toggle_order_is_fixed() {
    assert_eq!(DisplayMode::Hidden.toggle(), DisplayMode::Interactive);
    assert_eq!(DisplayMode::Interactive.toggle(), DisplayMode::ClickThrough);
    assert_eq!(DisplayMode::ClickThrough.toggle(), DisplayMode::Hidden);
}

#[test]
fn render_all_disabled_is_exactly_the_prompt() {
    let lines = render_lines(&full_snapshot(), &all_disabled());
    assert_eq!(lines, vec![EMPTY_PROMPT.to_string()]);
}

#[test]
fn render_single_category_produces_one_line() {
    let mut settings = all_disabled();
    settings.show_battery = true;
    let lines = render_lines(&full_snapshot(), &settings);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("BAT"));
    assert!(lines[0].contains("88%"));
    assert!(lines[0].contains("(AC)"));
}

#[test]
fn render_order_is_fixed_regardless_of_enable_order() {
    let mut settings = all_disabled();
    // enabled in reverse of the render order
    settings.show_time = true;
    settings.show_network = true;
    settings.show_cpu = true;
    let lines = render_lines(&full_snapshot(), &settings);
    assert_eq!(lines.len(), 4, "cpu + sent + recv + time");
    assert!(lines[0].contains("CPU"));
    assert!(lines[1].contains("📤"));
    assert!(lines[2].contains("📥"));
    assert!(lines[3].contains("TIME"));
}

#[test]
fn render_missing_sensors_say_na() {
    let mut settings = all_disabled();
    settings.show_temp = true;
    settings.show_battery = true;
    settings.show_voltage = true;
    settings.show_amperage = true;
    let snapshot = Snapshot::default();
    let lines = render_lines(&snapshot, &settings);
    assert_eq!(lines.len(), 4);
    for line in &lines {
        assert!(line.contains("N/A"), "{line}");
    }
}

#[test]
fn render_skips_network_before_first_delta() {
    let mut settings = all_disabled();
    settings.show_network = true;
    settings.show_cpu = true;
    let mut snapshot = full_snapshot();
    snapshot.net = None;
    let lines = render_lines(&snapshot, &settings);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("CPU"));
}

#[derive(Default)]
struct RecordingSurfaces {
    backdrop: Option<bool>,
    info: Option<bool>,
    click_through: Option<bool>,
    gear: Option<bool>,
}

impl SurfaceControl for RecordingSurfaces {
    fn set_backdrop_visible(&mut self, visible: bool) {
        self.backdrop = Some(visible);
    }
    fn set_info_visible(&mut self, visible: bool) {
        self.info = Some(visible);
    }
    fn set_click_through(&mut self, on: bool) {
        self.click_through = Some(on);
    }
    fn set_settings_affordance(&mut self, shown: bool) {
        self.gear = Some(shown);
    }
}

#[test]
fn hidden_mode_hides_both_surfaces() {
    let mut surfaces = RecordingSurfaces::default();
    DisplayMode::Hidden.apply(&mut surfaces);
    assert_eq!(surfaces.backdrop, Some(false));
    assert_eq!(surfaces.info, Some(false));
}

#[test]
fn interactive_mode_shows_both_and_accepts_input() {
    let mut surfaces = RecordingSurfaces::default();
    DisplayMode::Interactive.apply(&mut surfaces);
    assert_eq!(surfaces.backdrop, Some(true));
    assert_eq!(surfaces.info, Some(true));
    assert_eq!(surfaces.click_through, Some(false));
    assert_eq!(surfaces.gear, Some(true));
}

#[test]
fn click_through_mode_shows_info_only_and_forwards_input() {
    let mut surfaces = RecordingSurfaces::default();
    DisplayMode::ClickThrough.apply(&mut surfaces);
    assert_eq!(surfaces.backdrop, Some(false));
    assert_eq!(surfaces.info, Some(true));
    assert_eq!(surfaces.click_through, Some(true));
    assert_eq!(surfaces.gear, Some(false));
}

#[test]
fn drag_keeps_pointer_offset_constant() {
    let drag = DragState::begin(pos2(110.0, 125.0), pos2(100.0, 100.0));
    // pointer moves; the surface origin follows so the 10/25 offset holds
    assert_eq!(drag.target(pos2(110.0, 125.0)), pos2(100.0, 100.0));
    assert_eq!(drag.target(pos2(150.0, 90.0)), pos2(140.0, 65.0));
    assert_eq!(drag.target(pos2(60.0, 300.0)), pos2(50.0, 275.0));
}
