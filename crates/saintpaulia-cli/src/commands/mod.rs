//! Command implementations for the CLI.

mod activity;
mod attention;
mod config;
mod list;
mod stats;
mod status;

pub use activity::cmd_activity;
pub use attention::cmd_attention;
pub use config::cmd_config;
pub use list::{ListArgs, cmd_list};
pub use stats::cmd_stats;
pub use status::cmd_status;
