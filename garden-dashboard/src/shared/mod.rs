/// Shared modules for the Garden dashboard
pub mod chain_pair;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod date_input;
pub mod error;
pub mod format;
pub mod types;
pub mod ui;
pub mod view;
pub mod widget;
