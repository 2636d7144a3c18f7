//! Modal Keyboard Handling
//!
//! Maps key presses to reading-mode actions while the modal is open.

use std::collections::HashMap;

/// Keyboard shortcut
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyboardShortcut {
    pub fn new(key: &str) -> Self {
        Self { key: key.into(), ctrl: false, alt: false, shift: false, meta: false }
    }
    pub fn ctrl(mut self) -> Self { self.ctrl = true; self }
    pub fn alt(mut self) -> Self { self.alt = true; self }
    pub fn shift(mut self) -> Self { self.shift = true; self }
    pub fn meta(mut self) -> Self { self.meta = true; self }

    pub fn tab() -> Self { Self::new("Tab") }
    pub fn shift_tab() -> Self { Self::new("Tab").shift() }
    pub fn escape() -> Self { Self::new("Escape") }

    /// Parse `"Shift+Tab"`, `"ctrl+s"`, `"Escape"`...
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts: Vec<&str> = text.split('+').map(str::trim).collect();
        let key = parts.pop().filter(|k| !k.is_empty())?;
        let mut shortcut = Self::new(&normalize_key(key));
        for modifier in parts {
            shortcut = match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl(),
                "alt" | "option" => shortcut.alt(),
                "shift" => shortcut.shift(),
                "cmd" | "meta" | "super" => shortcut.meta(),
                _ => return None,
            };
        }
        Some(shortcut)
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl { parts.push("Ctrl"); }
        if self.alt { parts.push("Alt"); }
        if self.shift { parts.push("Shift"); }
        if self.meta { parts.push("Cmd"); }
        parts.push(&self.key);
        parts.join("+")
    }
}

fn normalize_key(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "tab" => "Tab".to_string(),
        "esc" | "escape" => "Escape".to_string(),
        "enter" | "return" => "Enter".to_string(),
        "space" => " ".to_string(),
        _ => key.to_string(),
    }
}

/// Reading-mode action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    NextElement,
    PrevElement,
    Close,
    ToggleSpeech,
}

/// Shortcut registry
#[derive(Debug)]
pub struct ShortcutRegistry {
    shortcuts: HashMap<KeyboardShortcut, ModalAction>,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        let mut registry = Self { shortcuts: HashMap::new() };
        registry.register(KeyboardShortcut::tab(), ModalAction::NextElement);
        registry.register(KeyboardShortcut::shift_tab(), ModalAction::PrevElement);
        registry.register(KeyboardShortcut::escape(), ModalAction::Close);
        registry
    }
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, shortcut: KeyboardShortcut, action: ModalAction) {
        self.shortcuts.insert(shortcut, action);
    }

    pub fn get_action(&self, shortcut: &KeyboardShortcut) -> Option<ModalAction> {
        self.shortcuts.get(shortcut).copied()
    }
}
