//! Shortcut Manager for photoview.
//!
//! Holds the fixed set of process-wide shortcuts and their platform-adapted
//! key combinations, and registers them through a [`HotkeyRegistrar`].

use std::fmt;

use crate::types::errors::ShortcutError;

/// What a global shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    TogglePreview,
    SnapLeft,
    SnapRight,
    ResizeAndCenter,
}

/// Non-modifier key of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    P,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
}

/// A key combination. `primary` is Cmd on macOS and Ctrl elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
    pub key: Key,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.primary {
            f.write_str(if cfg!(target_os = "macos") { "Cmd+" } else { "Ctrl+" })?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        let key = match self.key {
            Key::P => "P",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::ArrowUp => "Up",
        };
        f.write_str(key)
    }
}

/// Platform seam for global hotkey registration.
pub trait HotkeyRegistrar {
    /// Opaque handle the platform reports when the combination fires.
    type Id: Copy + PartialEq;

    fn register(&mut self, combo: &KeyCombo) -> Result<Self::Id, ShortcutError>;
    fn unregister(&mut self, id: Self::Id) -> Result<(), ShortcutError>;
}

/// Trait defining shortcut manager operations.
pub trait ShortcutManagerTrait {
    /// Id type of the registrar the shortcuts are registered with.
    type Id: Copy + PartialEq;

    fn bindings(&self) -> &[(ShortcutAction, KeyCombo)];
    fn register_all<R>(&mut self, registrar: &mut R) -> Result<(), ShortcutError>
    where
        R: HotkeyRegistrar<Id = Self::Id>;
    fn unregister_all<R>(&mut self, registrar: &mut R)
    where
        R: HotkeyRegistrar<Id = Self::Id>;
    fn action_for(&self, id: Self::Id) -> Option<ShortcutAction>;
    fn is_registered(&self) -> bool;
}

/// Fixed shortcut table plus the ids the platform handed back.
pub struct ShortcutManager<Id> {
    bindings: Vec<(ShortcutAction, KeyCombo)>,
    registered: Vec<(Id, ShortcutAction)>,
}

impl<Id: Copy + PartialEq> ShortcutManager<Id> {
    pub fn new() -> Self {
        Self {
            bindings: Self::default_bindings(),
            registered: Vec::new(),
        }
    }

    /// The built-in bindings. These are not user-configurable.
    pub fn default_bindings() -> Vec<(ShortcutAction, KeyCombo)> {
        let combo = |shift, alt, key| KeyCombo {
            primary: true,
            shift,
            alt,
            key,
        };
        vec![
            (ShortcutAction::TogglePreview, combo(true, false, Key::P)),
            (ShortcutAction::SnapLeft, combo(false, true, Key::ArrowLeft)),
            (ShortcutAction::SnapRight, combo(false, true, Key::ArrowRight)),
            (ShortcutAction::ResizeAndCenter, combo(false, true, Key::ArrowUp)),
        ]
    }
}

impl<Id: Copy + PartialEq> ShortcutManagerTrait for ShortcutManager<Id> {
    type Id = Id;

    fn bindings(&self) -> &[(ShortcutAction, KeyCombo)] {
        &self.bindings
    }

    /// Registers every binding. On the first failure the ones already
    /// registered are released again and the error is returned.
    fn register_all<R>(&mut self, registrar: &mut R) -> Result<(), ShortcutError>
    where
        R: HotkeyRegistrar<Id = Id>,
    {
        if !self.registered.is_empty() {
            return Ok(());
        }
        let bindings = self.bindings.clone();
        for (action, combo) in &bindings {
            match registrar.register(combo) {
                Ok(id) => {
                    tracing::info!(shortcut = %combo, ?action, "registered global shortcut");
                    self.registered.push((id, *action));
                }
                Err(e) => {
                    self.unregister_all(registrar);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Releases everything, logging failures instead of stopping on them.
    fn unregister_all<R>(&mut self, registrar: &mut R)
    where
        R: HotkeyRegistrar<Id = Id>,
    {
        for (id, action) in self.registered.drain(..) {
            if let Err(e) = registrar.unregister(id) {
                tracing::warn!(?action, error = %e, "failed to release global shortcut");
            }
        }
    }

    fn action_for(&self, id: Id) -> Option<ShortcutAction> {
        self.registered
            .iter()
            .find(|(registered, _)| *registered == id)
            .map(|(_, action)| *action)
    }

    fn is_registered(&self) -> bool {
        !self.registered.is_empty()
    }
}

impl<Id: Copy + PartialEq> Default for ShortcutManager<Id> {
    fn default() -> Self {
        Self::new()
    }
}
