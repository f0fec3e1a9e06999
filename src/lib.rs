//! Tinylinker - a local URL shortener
//!
//! Short codes with expiry windows and per-click analytics, kept entirely in
//! client-local key/value storage. There is no server; "redirecting" means
//! resolving a code to its target and recording the visit.
//!
//! # Architecture
//! - `storage`: key/value backends and the record store
//! - `services`: the URL registry and short-link resolution
//! - `system`: tracing setup and the persisted audit log
//! - `clock`: the injectable time source
//! - `config`: configuration loading
//! - `runtime`: startup wiring
//! - `interfaces`: the command-line front end

pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
