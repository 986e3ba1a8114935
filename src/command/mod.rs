mod check_config;
mod sync;

pub use check_config::run_check_config;
pub use sync::run_sync_command;
