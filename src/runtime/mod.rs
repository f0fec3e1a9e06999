//! Application lifecycle

pub mod startup;

pub use startup::{StartupContext, prepare_startup};
