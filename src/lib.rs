// The binary entry point is main.rs; the library exposes the session so that
// integration tests can drive it with their own console and store.

pub mod app;
pub mod config;
pub mod event;
pub mod session;
pub mod store;
pub mod ui;
