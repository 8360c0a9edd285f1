#![forbid(unsafe_code)]

//! Core: scroll-synchronized sticky tab navigation for a category menu page.
//!
//! The engine is host-agnostic and deterministic: the host injects geometry
//! through [`geometry::GeometryProvider`], time as millisecond
//! [`clock::Timestamp`]s, and receives scroll side effects as drainable
//! [`sync::SyncCommand`]s. Nothing in this crate touches the DOM, timers,
//! or a wall clock.

pub mod align;
pub mod clock;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod sync;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
