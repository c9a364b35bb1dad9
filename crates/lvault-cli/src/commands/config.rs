//! Config command handlers

use anyhow::{bail, Context, Result};

use lvault_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "storage_key": config.storage_key,
                    "storage_path": config.storage_path(),
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.storage_path().display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  data_dir:    {}", config.data_dir.display());
            println!("  storage_key: {}", config.storage_key);
            println!(
                "  log_file:    {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Links file:  {}", config.storage_path().display());
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    config.save().context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one `key = value` setting to a config
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            if value.is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "storage_key" => {
            let value = value.trim();
            if value.is_empty() {
                bail!("storage_key cannot be empty");
            }
            config.storage_key = value.to_string();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, storage_key, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply_setting(&mut config, "data_dir", "/tmp/vault").unwrap();
        apply_setting(&mut config, "storage_key", " work ").unwrap();
        apply_setting(&mut config, "log_file", "/tmp/vault.log").unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/vault"));
        assert_eq!(config.storage_key, "work");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/vault.log")));

        apply_setting(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();

        assert!(apply_setting(&mut config, "storage_key", "  ").is_err());
        assert!(apply_setting(&mut config, "data_dir", "").is_err());

        let err = apply_setting(&mut config, "theme", "dark").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }
}
