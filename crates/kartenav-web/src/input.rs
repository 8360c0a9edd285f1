#![forbid(unsafe_code)]

//! Deterministic, JSON-friendly input schema for `kartenav-web`.
//!
//! The web host (JS/TS) forwards DOM events as compact JSON records; the
//! same records drive deterministic replay in tests. This module focuses
//! on:
//! - a stable event schema ([`NavEvent`], tagged by `"type"`),
//! - the gesture mapping (which events count as a genuine user gesture and
//!   therefore release a highlight lock),
//! - a compact modifier bitset (`mods: u8`) carried on key events for
//!   logs and replay, and
//! - JSON-level configuration overrides ([`ConfigOverrides`]).

use bitflags::bitflags;
use kartenav_core::gesture::Gesture;
use kartenav_core::sync::SyncConfig;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a key event.
    ///
    /// These flags are encoded as a compact `u8` bitset in JSON (`mods`).
    /// They are diagnostic only; a navigation key releases the lock
    /// regardless of held modifiers.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

impl Modifiers {
    #[must_use]
    pub const fn from_bits_truncate_u8(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

/// One normalized host event.
///
/// `scroll` and `resize` are the passive tracking inputs; `wheel`,
/// `touch_move`, and navigation `key` events are the genuine gestures;
/// the rest are the control surface (clicks, settle signal, detail
/// sheet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavEvent {
    Scroll,
    Resize,
    Wheel,
    TouchMove,
    Key {
        /// DOM `KeyboardEvent.key` value.
        key: Box<str>,
        /// Modifier bitset, see [`Modifiers`].
        #[serde(default)]
        mods: u8,
    },
    /// The host's `scrollend` (or equivalent) signal.
    ScrollSettled,
    TabClick {
        /// Category id of the clicked tab.
        id: Box<str>,
    },
    /// Detail sheet opened or closed.
    Sheet { open: bool },
}

impl NavEvent {
    /// Map this event to the core gesture it represents, if any.
    ///
    /// Key events map only for navigation keys; printable characters and
    /// shortcuts return `None` and leave the lock alone.
    #[must_use]
    pub fn to_gesture(&self) -> Option<Gesture> {
        match self {
            Self::Wheel => Some(Gesture::Wheel),
            Self::TouchMove => Some(Gesture::TouchMove),
            Self::Key { key, .. } => Gesture::from_dom_key(key),
            _ => None,
        }
    }

    /// Modifier bitset for key events, empty otherwise.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::Key { mods, .. } => Modifiers::from_bits_truncate_u8(*mods),
            _ => Modifiers::empty(),
        }
    }
}

/// A replayable event record: the event plus the host clock at arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavRecord {
    /// Host timestamp in milliseconds (DOM `event.timeStamp` domain).
    pub now_ms: f64,
    #[serde(flatten)]
    pub event: NavEvent,
}

impl NavRecord {
    /// Parse one JSON record.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Optional JSON overrides for [`SyncConfig`]; absent fields keep their
/// defaults. Passed by the host at construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConfigOverrides {
    pub sticky_offset: Option<f64>,
    pub switch_offset: Option<f64>,
    pub click_scroll_gap: Option<f64>,
    pub bottom_epsilon: Option<f64>,
    pub strip_edge_gap: Option<f64>,
    pub unlock_fallback_ms: Option<f64>,
    pub unlock_safety_ms: Option<f64>,
    pub realign_delay_ms: Option<f64>,
    pub resume_delay_ms: Option<f64>,
}

impl ConfigOverrides {
    /// Parse overrides from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply the present fields on top of `base`.
    #[must_use]
    pub fn apply(&self, mut base: SyncConfig) -> SyncConfig {
        if let Some(v) = self.sticky_offset {
            base.sticky_offset = v;
        }
        if let Some(v) = self.switch_offset {
            base.switch_offset = v;
        }
        if let Some(v) = self.click_scroll_gap {
            base.click_scroll_gap = v;
        }
        if let Some(v) = self.bottom_epsilon {
            base.bottom_epsilon = v;
        }
        if let Some(v) = self.strip_edge_gap {
            base.strip_edge_gap = v;
        }
        if let Some(v) = self.unlock_fallback_ms {
            base.unlock_fallback_ms = v;
        }
        if let Some(v) = self.unlock_safety_ms {
            base.unlock_safety_ms = v;
        }
        if let Some(v) = self.realign_delay_ms {
            base.realign_delay_ms = v;
        }
        if let Some(v) = self.resume_delay_ms {
            base.resume_delay_ms = v;
        }
        base
    }
}
