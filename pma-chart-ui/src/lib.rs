//! Shared Dioxus components, dataset fetching, and D3.js bridge for the
//! PMA chart apps.
//!
//! This crate provides:
//! - `fetch`: browser-side dataset loading (parallel fan-out, timeout,
//!   gzip support) feeding a [`pma_store::DataStore`]
//! - `state`: reactive `AppState` with Dioxus Signals plus the load
//!   generation counter that guarantees last-selection-wins
//! - `js_bridge`: Rust wrappers for the D3.js chart functions evaluated
//!   via `js_sys::eval()`
//! - `components`: reusable RSX components (selectors, containers, etc.)

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
