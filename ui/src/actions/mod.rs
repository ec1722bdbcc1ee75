//! Async controllers: read the state, await the API, write the result back.
//!
//! Every action takes `&mut impl StateAccess`, so components pass their
//! `Signal<AppState>` and tests pass a bare `AppState`.

pub mod auth;
pub mod billing;
pub mod export;
pub mod settings;
pub mod startup;
pub mod translate;
