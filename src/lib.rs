//! Pocketlink - A local, single-user URL shortener
//!
//! This library provides the core of pocketlink: the shortlink store and the
//! redirect resolution built on it. All state lives in local key-value slots;
//! there is no server and no remote authority for shortcodes.
//!
//! # Features
//! - **external-geo**: coarse geolocation through an HTTP API (default)
//!
//! # Architecture
//! - `storage`: Key-value backends and the link store
//! - `services`: Link creation, redirect resolution, statistics, geolocation
//! - `system`: Logging and the diagnostic log sink
//! - `config`: Configuration management
//! - `interfaces`: Command-line front end
//! - `runtime`: Wiring and execution modes

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
