use crate::runtime::event::CloseReason;
use crate::runtime::intent::Intent;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Keys handled before the picker sees them. Everything else reaches the
/// focused field as `Intent::InputKey`.
#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Intent>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, intent: Intent) {
        self.bindings.insert(key, intent);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Intent> {
        self.bindings.get(&KeyBinding::from_event(event)).cloned()
    }

    fn install_defaults(&mut self) {
        // Esc stands in for a backdrop tap, Ctrl-C for the hardware back button.
        self.bind(
            KeyBinding::key(KeyCode::Esc),
            Intent::Dismiss(CloseReason::Backdrop),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('c')),
            Intent::Dismiss(CloseReason::Back),
        );
        self.bind(KeyBinding::key(KeyCode::Tab), Intent::NextFocus);
        self.bind(KeyBinding::key(KeyCode::BackTab), Intent::PrevFocus);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Intent::PrevFocus,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_dismiss_and_focus_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.resolve(KeyEvent::new(KeyCode::Esc)),
            Some(Intent::Dismiss(CloseReason::Backdrop))
        );
        assert_eq!(
            bindings.resolve(
                KeyEvent::new(KeyCode::Char('c')).with_modifiers(KeyModifiers::CONTROL)
            ),
            Some(Intent::Dismiss(CloseReason::Back))
        );
        assert_eq!(
            bindings.resolve(KeyEvent::new(KeyCode::BackTab).with_modifiers(KeyModifiers::SHIFT)),
            Some(Intent::PrevFocus)
        );
        assert_eq!(bindings.resolve(KeyEvent::new(KeyCode::Char('c'))), None);
    }

    #[test]
    fn unbind_lets_key_through() {
        let mut bindings = KeyBindings::new();
        bindings.unbind(&KeyBinding::key(KeyCode::Tab));
        assert_eq!(bindings.resolve(KeyEvent::new(KeyCode::Tab)), None);
    }
}
