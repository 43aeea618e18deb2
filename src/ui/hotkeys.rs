//! `global-hotkey` backed [`HotkeyRegistrar`].

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::GlobalHotKeyManager;

use crate::managers::shortcut_manager::{HotkeyRegistrar, Key, KeyCombo};
use crate::types::errors::{ShortcutError, UiError};

pub struct GlobalHotkeys {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
}

impl GlobalHotkeys {
    pub fn new() -> Result<Self, UiError> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| UiError::EventLoop(format!("global hotkeys unavailable: {}", e)))?;
        Ok(Self {
            manager,
            registered: Vec::new(),
        })
    }
}

fn to_hotkey(combo: &KeyCombo) -> HotKey {
    let mut mods = Modifiers::empty();
    if combo.primary {
        mods |= if cfg!(target_os = "macos") {
            Modifiers::SUPER
        } else {
            Modifiers::CONTROL
        };
    }
    if combo.shift {
        mods |= Modifiers::SHIFT;
    }
    if combo.alt {
        mods |= Modifiers::ALT;
    }
    let code = match combo.key {
        Key::P => Code::KeyP,
        Key::ArrowLeft => Code::ArrowLeft,
        Key::ArrowRight => Code::ArrowRight,
        Key::ArrowUp => Code::ArrowUp,
    };
    HotKey::new(Some(mods), code)
}

impl HotkeyRegistrar for GlobalHotkeys {
    type Id = u32;

    fn register(&mut self, combo: &KeyCombo) -> Result<u32, ShortcutError> {
        let hotkey = to_hotkey(combo);
        let id = hotkey.id();
        self.manager
            .register(hotkey)
            .map_err(|e| ShortcutError::Registration(format!("{}: {}", combo, e)))?;
        self.registered.push(to_hotkey(combo));
        Ok(id)
    }

    fn unregister(&mut self, id: u32) -> Result<(), ShortcutError> {
        let Some(pos) = self.registered.iter().position(|h| h.id() == id) else {
            return Ok(());
        };
        let hotkey = self.registered.remove(pos);
        self.manager
            .unregister(hotkey)
            .map_err(|e| ShortcutError::Unregistration(e.to_string()))
    }
}
