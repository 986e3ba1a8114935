use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::archive::RunOptions;

/// camsync - upload a day of camera clips to cloud storage
#[derive(Parser)]
#[command(name = "camsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Upload the day this many days before today
    #[arg(short, long, default_value_t = 1, global = true)]
    pub days: u32,

    /// Delete local originals once the day is confirmed uploaded
    #[arg(short, long, global = true)]
    pub remove: bool,

    /// Upload root, replacing `upload_path` from the configuration
    #[arg(short = 'p', long, global = true)]
    pub upload_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Submit the target day's missing clips for upload (default)
    Sync,
    /// Show what a sync would submit without copying, removing or alerting
    Plan,
    /// Validate the configuration and print a redacted summary
    CheckConfig,
}

impl Cli {
    /// Run options for the sync and plan commands.
    pub fn run_options(&self, dry_run: bool) -> RunOptions {
        RunOptions {
            days_back: self.days,
            delete_after_upload: self.remove,
            upload_path_override: self.upload_path.clone(),
            dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["camsync"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.days, 1);
        assert!(!cli.remove);
        assert!(cli.config.is_none());

        let options = cli.run_options(false);
        assert_eq!(options.days_back, 1);
        assert!(!options.delete_after_upload);
        assert!(options.upload_path_override.is_none());
    }

    #[test]
    fn test_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "camsync", "plan", "-d", "3", "-r", "-p", "/other", "-c", "cfg.toml",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Plan));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));

        let options = cli.run_options(true);
        assert_eq!(options.days_back, 3);
        assert!(options.delete_after_upload);
        assert_eq!(options.upload_path_override.as_deref(), Some("/other"));
        assert!(options.dry_run);
    }

    #[test]
    fn test_check_config_command() {
        let cli = Cli::try_parse_from(["camsync", "check-config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::CheckConfig));
    }

    #[test]
    fn test_rejects_negative_days() {
        assert!(Cli::try_parse_from(["camsync", "--days", "-1"]).is_err());
    }
}
