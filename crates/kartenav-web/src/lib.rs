#![forbid(unsafe_code)]

//! WASM frontend for Kartenav.
//!
//! This crate is intentionally host-specific (web/WASM). It provides a stable
//! `wasm-bindgen` API surface for:
//! - reading section/tab/strip geometry from the DOM,
//! - normalizing DOM events into the JSON schema in [`input`],
//! - driving [`kartenav_core::sync::ScrollSync`] once per animation frame,
//! - executing the queued smooth-scroll commands.
//!
//! The [`input`] module compiles on every target so the schema and its
//! gesture mapping stay testable with plain `cargo test`.

pub mod input;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::KartenavWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace`
/// stays green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct KartenavWeb;

#[cfg(not(target_arch = "wasm32"))]
impl KartenavWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
