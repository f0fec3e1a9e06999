//! Configuration loading
//!
//! A TOML file (optional) layered under `TL__`-prefixed environment
//! variables.

mod r#impl;
mod structs;

pub use r#impl::DEFAULT_CONFIG_PATH;
pub use structs::*;
