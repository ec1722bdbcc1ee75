//! Shared UI crate for Transloom: application state, actions against the
//! translation API, and the Dioxus components that render them.

pub mod actions;
pub mod components;
pub mod core;
pub mod i18n;
pub mod views;
