// src/acquire/mod.rs
pub mod client;
pub mod config;

pub use client::fetch_report;
pub use config::AcquireConfig;
