#![forbid(unsafe_code)]

//! Keyboard modifiers held during a pointer notification.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held while dragging.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// The platform's "copy instead of move" drag modifier.
    ///
    /// Option on macOS, Control everywhere else.
    #[must_use]
    pub const fn platform_copy() -> Self {
        if cfg!(target_os = "macos") {
            Self::ALT
        } else {
            Self::CTRL
        }
    }

    /// Parse a `+`-separated modifier list such as `"ctrl+shift"`.
    ///
    /// Unknown names yield `None`; an empty string yields [`Modifiers::NONE`].
    pub fn parse(s: &str) -> Option<Self> {
        let mut out = Self::NONE;
        for part in s.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            out |= match part.to_ascii_lowercase().as_str() {
                "shift" => Self::SHIFT,
                "alt" | "option" => Self::ALT,
                "ctrl" | "control" => Self::CTRL,
                "super" | "cmd" | "meta" => Self::SUPER,
                _ => return None,
            };
        }
        Some(out)
    }
}
