use rdev::{listen, EventType, Key};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A key plus modifier set captured by the global listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: Key::KeyO,
            ctrl: true,
            shift: true,
            alt: false,
        }
    }
}

/// Parse a hotkey string like "Ctrl+Shift+O" into a [`Hotkey`].
///
/// Modifiers may appear in any order; exactly one terminal key is required.
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut hk = Hotkey {
        key: Key::Unknown(0),
        ctrl: false,
        shift: false,
        alt: false,
    };
    let mut key = None;

    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => hk.ctrl = true,
            "SHIFT" => hk.shift = true,
            "ALT" => hk.alt = true,
            "" => {}
            other => {
                if key.replace(parse_key(other)?).is_some() {
                    return None;
                }
            }
        }
    }

    hk.key = key?;
    Some(hk)
}

fn parse_key(upper: &str) -> Option<Key> {
    const LETTERS: [Key; 26] = [
        Key::KeyA,
        Key::KeyB,
        Key::KeyC,
        Key::KeyD,
        Key::KeyE,
        Key::KeyF,
        Key::KeyG,
        Key::KeyH,
        Key::KeyI,
        Key::KeyJ,
        Key::KeyK,
        Key::KeyL,
        Key::KeyM,
        Key::KeyN,
        Key::KeyO,
        Key::KeyP,
        Key::KeyQ,
        Key::KeyR,
        Key::KeyS,
        Key::KeyT,
        Key::KeyU,
        Key::KeyV,
        Key::KeyW,
        Key::KeyX,
        Key::KeyY,
        Key::KeyZ,
    ];
    const DIGITS: [Key; 10] = [
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];
    const FKEYS: [Key; 12] = [
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];

    match upper {
        "SPACE" => return Some(Key::Space),
        "TAB" => return Some(Key::Tab),
        "ENTER" | "RETURN" => return Some(Key::Return),
        "ESC" | "ESCAPE" => return Some(Key::Escape),
        "HOME" => return Some(Key::Home),
        "END" => return Some(Key::End),
        "INSERT" => return Some(Key::Insert),
        "DELETE" => return Some(Key::Delete),
        _ => {}
    }
    if let Some(n) = upper.strip_prefix('F').and_then(|r| r.parse::<usize>().ok()) {
        return FKEYS.get(n.checked_sub(1)?).copied();
    }
    let mut chars = upper.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_digit() {
        Some(DIGITS[c as usize - '0' as usize])
    } else if c.is_ascii_uppercase() {
        Some(LETTERS[c as usize - 'A' as usize])
    } else {
        None
    }
}

/// Shared signal raised by the listener thread when the combo is pressed.
///
/// The UI thread polls [`HotkeyTrigger::take`] each frame; the trigger is
/// edge-triggered and fires once per press of the full combination.
pub struct HotkeyTrigger {
    fired: Arc<Mutex<bool>>,
    hotkey: Hotkey,
}

impl HotkeyTrigger {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            fired: Arc::new(Mutex::new(false)),
            hotkey,
        }
    }

    /// Spawn the background listener. Restarts it if the OS hook fails.
    pub fn start_listener(&self) {
        let fired = self.fired.clone();
        let hotkey = self.hotkey;
        tracing::debug!("starting hotkey listener for {:?}", hotkey);
        thread::spawn(move || loop {
            let fired = fired.clone();
            let mut ctrl = false;
            let mut shift = false;
            let mut alt = false;
            let mut key_down = false;
            let mut triggered = false;

            let result = listen(move |event| {
                let (k, down) = match event.event_type {
                    EventType::KeyPress(k) => (k, true),
                    EventType::KeyRelease(k) => (k, false),
                    _ => return,
                };
                match k {
                    Key::ControlLeft | Key::ControlRight => ctrl = down,
                    Key::ShiftLeft | Key::ShiftRight => shift = down,
                    Key::Alt | Key::AltGr => alt = down,
                    _ => {}
                }
                if k == hotkey.key {
                    key_down = down;
                }

                let combo = key_down
                    && (!hotkey.ctrl || ctrl)
                    && (!hotkey.shift || shift)
                    && (!hotkey.alt || alt);
                if combo {
                    if !triggered {
                        triggered = true;
                        tracing::debug!("hotkey combo pressed");
                        if let Ok(mut flag) = fired.lock() {
                            *flag = true;
                        }
                    }
                } else {
                    triggered = false;
                }
            });

            match result {
                Ok(()) => tracing::warn!("hotkey listener exited unexpectedly; restarting shortly"),
                Err(e) => tracing::warn!("hotkey listener failed: {:?}; retrying shortly", e),
            }
            thread::sleep(Duration::from_millis(500));
        });
    }

    /// Consume a pending trigger, if any.
    pub fn take(&self) -> bool {
        let mut fired = match self.fired.lock() {
            Ok(f) => f,
            Err(_) => return false,
        };
        std::mem::take(&mut *fired)
    }
}
