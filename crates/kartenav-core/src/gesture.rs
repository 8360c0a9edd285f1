#![forbid(unsafe_code)]

//! Classification of genuine user input.
//!
//! A tab click locks the highlighted tab until the user actually moves the
//! page again. Only real scroll intent releases the lock: wheel input,
//! touch movement, or a navigation key. Everything else (programmatic
//! scrolling, pointer hover, unrelated keys) must not.

/// Keyboard keys that scroll the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
}

impl NavKey {
    /// Normalize a DOM `KeyboardEvent.key` string.
    ///
    /// Returns `None` for keys that do not scroll. Accepts both `" "` and
    /// the legacy `"Spacebar"` spelling some engines still emit.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            " " | "Spacebar" => Some(Self::Space),
            _ => None,
        }
    }

    /// Stable string representation for logs and replay traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Home => "Home",
            Self::End => "End",
            Self::Space => "Space",
        }
    }
}

/// A user input that counts as genuine scroll intent.
///
/// Every variant is an unlock trigger by construction; non-gestures are
/// filtered out before this type is built (see [`NavKey::from_dom_key`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Mouse wheel or trackpad scroll.
    Wheel,
    /// Touch drag on the page.
    TouchMove,
    /// Navigation key press.
    Key(NavKey),
}

impl Gesture {
    /// Classify a DOM key string as a gesture, if it is one.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        NavKey::from_dom_key(key).map(Self::Key)
    }
}
