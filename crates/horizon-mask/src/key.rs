//! Key-down events relevant to masked editing.

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held (Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Returns true if a shortcut modifier (Control or Meta) is held.
    pub fn has_shortcut_modifier(&self) -> bool {
        self.control || self.meta
    }
}

/// The key that went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    /// Remove the slot left of the caret.
    Backspace,
    /// Remove the slot at the caret.
    Delete,
    /// Any other key.
    Other,
}

/// A key-down notification forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key.
    pub key: EditKey,
    /// Modifier state at the time of the press.
    pub modifiers: KeyboardModifiers,
    /// The host already handled the event.
    pub default_prevented: bool,
}

impl KeyPress {
    /// A plain press of `key`.
    pub fn new(key: EditKey) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
            default_prevented: false,
        }
    }

    /// A Backspace press.
    pub fn backspace() -> Self {
        Self::new(EditKey::Backspace)
    }

    /// A Delete press.
    pub fn delete() -> Self {
        Self::new(EditKey::Delete)
    }

    /// Set the modifier state.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the event as already handled by the host.
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}
