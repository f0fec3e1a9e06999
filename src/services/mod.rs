//! Business services shared by every front end

pub mod redirect;
pub mod registry;

pub use redirect::{RedirectOutcome, RedirectService};
pub use registry::{CodeGenerator, RegistrySettings, UrlRegistry};
