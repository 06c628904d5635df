//! Portfolio site front-end effects
//!
//! - Background particle field: pointer repulsion, edge reflection and
//!   distance-faded connection lines
//! - Typewriter headings, scroll styling and scroll reveals
//! - Skill radar chart, contact form handling, presence indicator
//!
//! `core` is platform-agnostic and shared with the headless CLI; the browser
//! glue lives in `web` and is only built for wasm32 with the `wasm` feature.

pub mod core;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::{start, stop_background};
