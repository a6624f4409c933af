use std::sync::mpsc::{channel, Receiver, Sender};

/// Lifecycle commands dispatched from the tray thread to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    Toggle,
    Exit,
}

/// Spawn the tray-icon thread and return the command channel polled by the
/// UI loop. On platforms without a tray host this is a channel that never
/// fires.
pub fn spawn() -> Receiver<TrayCommand> {
    let (tx, rx) = channel();
    imp::spawn(tx);
    rx
}

/// 32x32 RGBA placeholder used when no icon resource can be loaded.
pub fn placeholder_rgba() -> (Vec<u8>, u32, u32) {
    const SIZE: u32 = 32;
    let img = image::RgbaImage::from_fn(SIZE, SIZE, |_, y| {
        if (12..20).contains(&y) {
            image::Rgba([0xff, 0x4c, 0x4c, 0xff])
        } else {
            image::Rgba([0x22, 0x22, 0x22, 0xff])
        }
    });
    (img.into_raw(), SIZE, SIZE)
}

/// Load the icon shipped next to the executable, if any.
pub fn icon_rgba() -> (Vec<u8>, u32, u32) {
    let path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("stat_overlay.png")));
    if let Some(path) = path {
        if let Ok(img) = image::open(&path) {
            let img = img.into_rgba8();
            let (w, h) = img.dimensions();
            return (img.into_raw(), w, h);
        }
    }
    tracing::debug!("no icon resource found; using generated placeholder");
    placeholder_rgba()
}

#[cfg(target_os = "windows")]
mod imp {
    use super::*;
    use tray_icon::menu::{Menu, MenuEvent, MenuItem};
    use tray_icon::TrayIconBuilder;
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG,
    };

    pub fn spawn(tx: Sender<TrayCommand>) {
        std::thread::spawn(move || {
            if let Err(e) = run(tx) {
                tracing::error!("tray thread failed: {e}");
            }
        });
    }

    fn run(tx: Sender<TrayCommand>) -> anyhow::Result<()> {
        let menu = Menu::new();
        let toggle = MenuItem::new("Toggle Overlay", true, None);
        let exit = MenuItem::new("Exit", true, None);
        menu.append_items(&[&toggle, &exit])?;

        let (rgba, w, h) = icon_rgba();
        let icon = tray_icon::Icon::from_rgba(rgba, w, h)?;
        let _tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip("stat_overlay")
            .with_icon(icon)
            .build()?;

        let events = MenuEvent::receiver();
        let mut msg = MSG::default();
        // Menu events are produced while dispatching tray messages; drain
        // the receiver after each one.
        while unsafe { GetMessageW(&mut msg, None, 0, 0) }.as_bool() {
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            while let Ok(event) = events.try_recv() {
                if event.id() == toggle.id() {
                    let _ = tx.send(TrayCommand::Toggle);
                } else if event.id() == exit.id() {
                    let _ = tx.send(TrayCommand::Exit);
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(target_os = "windows"))]
mod imp {
    use super::*;

    pub fn spawn(_tx: Sender<TrayCommand>) {
        tracing::debug!("tray icon not supported on this platform");
    }
}
