use std::path::Path;

use anyhow::Result;

use crate::config::AppConfig;

pub fn run_check_config(config_path: Option<&Path>) -> Result<()> {
    let (config, path) = AppConfig::load(config_path)?;

    println!("✅ Configuration is valid: {}", path.display());
    println!("   Endpoint:     {}", config.endpoint);
    println!("   Username:     {}", config.username);
    println!("   Password:     [REDACTED]");
    println!("   Source:       {}", config.source_path);
    println!("   Upload root:  {}", config.upload_path);
    println!("   Scan policy:  {:?}", config.scan_policy);
    println!("   Completion:   {:?}", config.completion_policy);
    println!("   Timeout:      {}s", config.request_timeout_secs);

    match (&config.notify, config.deadline_hour()) {
        (Some(_), Some(hour)) => println!("   Alerts:       from {:02}:00", hour),
        (Some(_), None) => println!("   Alerts:       disabled (no deadline_hour)"),
        (None, _) => println!("   Alerts:       disabled"),
    }

    Ok(())
}
