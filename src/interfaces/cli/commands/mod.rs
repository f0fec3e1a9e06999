//! CLI command implementations

mod analytics;
mod config_gen;
mod link_management;
mod visit;

pub use analytics::{show_logs, show_stats};
pub use config_gen::config_generate;
pub use link_management::{
    add_link, batch_create, clear_expired, list_links, remove_link, show_link,
};
pub use visit::visit_link;
