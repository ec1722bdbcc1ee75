pub mod catalog;
pub mod config;
pub mod format;
pub mod payments;
pub mod platform;
pub mod session;
pub mod state;
pub mod storage;
pub mod timing;
