pub mod cleanup;
pub mod display;
pub mod gui;
pub mod hotkey;
pub mod logging;
pub mod metrics;
pub mod settings;
pub mod settings_editor;
pub mod tray;
pub mod win_util;
