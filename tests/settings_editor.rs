use stat_overlay::gui::OverlayApp;
use stat_overlay::hotkey::HotkeyTrigger;
use stat_overlay::settings::{ClockFormat, Settings, Theme};
use stat_overlay::settings_editor::{CleanupConfirm, SettingsEditor};
use tempfile::tempdir;

fn app_with_config(dir: &std::path::Path) -> OverlayApp {
    let settings = Settings::default();
    let trigger = HotkeyTrigger::new(settings.hotkey());
    let (_tx, rx) = std::sync::mpsc::channel();
    OverlayApp::new(settings, dir.join("settings.json"), trigger, rx)
}

#[test]
fn commit_with_unchanged_hotkey_raises_no_restart_notice() {
    let mut settings = Settings::default();
    let editor = SettingsEditor::new(&settings);
    let outcome = editor.apply(&mut settings);
    assert!(!outcome.hotkey_changed);
    assert_eq!(settings, Settings::default());
}

#[test]
fn commit_with_changed_hotkey_raises_the_restart_notice() {
    let mut settings = Settings::default();
    let old_binding = settings.hotkey();

    let mut editor = SettingsEditor::new(&settings);
    editor.set_hotkey("Alt+F4");
    let outcome = editor.apply(&mut settings);

    assert!(outcome.hotkey_changed);
    assert_eq!(settings.hotkey, "Alt+F4");
    // The running listener keeps the combination it was started with; only
    // the stored record changes until restart.
    assert_eq!(old_binding, Settings::default().hotkey());
}

#[test]
fn commit_copies_every_edited_field() {
    let mut settings = Settings::default();
    let mut edited = Settings::default();
    edited.show_cpu = false;
    edited.show_voltage = true;
    edited.clock_format = ClockFormat::H12;
    edited.theme = Theme::GreenOnBlack;
    edited.update_interval = 5.0;

    let editor = SettingsEditor::new(&edited);
    let outcome = editor.apply(&mut settings);

    assert!(!outcome.hotkey_changed);
    assert_eq!(settings, edited);
}

#[test]
fn cleanup_prompt_only_fires_when_pending_and_accepted() {
    let mut confirm = CleanupConfirm::default();
    assert!(!confirm.is_open());
    // Accepting a prompt that was never raised does nothing.
    assert!(!confirm.resolve(true));

    confirm.request();
    assert!(confirm.is_open());
    assert!(!confirm.resolve(false));
    assert!(!confirm.is_open(), "declining closes the prompt");

    confirm.request();
    assert!(confirm.resolve(true));
    assert!(!confirm.is_open(), "accepting closes the prompt");
}

#[test]
fn commit_clears_a_stale_notice() {
    let dir = tempdir().unwrap();
    let mut app = app_with_config(dir.path());
    app.notice = Some("Cleanup is already running.".to_string());

    let editor = SettingsEditor::new(&app.settings);
    assert!(app.commit_settings(&editor));

    assert_eq!(app.notice, None);
    assert!(dir.path().join("settings.json").exists());
}

#[test]
fn commit_with_new_hotkey_replaces_the_notice() {
    let dir = tempdir().unwrap();
    let mut app = app_with_config(dir.path());
    app.notice = Some("Cleanup is already running.".to_string());

    let mut editor = SettingsEditor::new(&app.settings);
    editor.set_hotkey("Alt+F4");
    assert!(app.commit_settings(&editor));

    assert_eq!(
        app.notice.as_deref(),
        Some("Restart the app to apply the new hotkey.")
    );
    assert_eq!(app.settings.hotkey, "Alt+F4");
}
