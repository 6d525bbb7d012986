//! CLI commands for settings

use std::io::Write;

use clap::Subcommand;

use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;
use crate::models::Currency;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the settings file location and current values
    Show,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Change the default display currency
    SetCurrency {
        /// Symbol or code: $, ₦, €, £, USD, NGN, EUR, GBP
        currency: Currency,
    },
}

/// Handle config commands
pub fn handle_config_command<W: Write>(
    paths: &TrackerPaths,
    settings: &Settings,
    cmd: ConfigCommands,
    out: &mut W,
) -> TrackerResult<()> {
    match cmd {
        ConfigCommands::Show => {
            writeln!(out, "Budget Tracker Configuration")?;
            writeln!(out, "============================")?;
            writeln!(out, "Settings file: {}", paths.settings_file().display())?;
            writeln!(out)?;
            writeln!(out, "  Currency:           {}", settings.currency)?;
            writeln!(out, "  Export date format: {}", settings.export_date_format)?;
            writeln!(out, "  CSV delimiter:      {:?}", settings.csv_delimiter)?;
        }
        ConfigCommands::Init { force } => {
            if paths.settings_file().exists() && !force {
                writeln!(
                    out,
                    "Settings already exist at {} (use --force to overwrite)",
                    paths.settings_file().display()
                )?;
                return Ok(());
            }
            Settings::default().save(paths)?;
            writeln!(out, "Wrote default settings to {}", paths.settings_file().display())?;
        }
        ConfigCommands::SetCurrency { currency } => {
            let updated = Settings {
                currency,
                ..settings.clone()
            };
            updated.save(paths)?;
            writeln!(out, "Default currency set to {}", currency)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp_dir: &TempDir) -> TrackerPaths {
        TrackerPaths::with_base_dir(temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_init_then_show() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        let mut out = Vec::new();

        handle_config_command(&paths, &Settings::default(), ConfigCommands::Init { force: false }, &mut out)
            .unwrap();
        assert!(paths.settings_file().exists());

        handle_config_command(&paths, &Settings::default(), ConfigCommands::Show, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Wrote default settings"));
        assert!(text.contains("Currency:           $ (USD)"));
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        let custom = Settings {
            currency: Currency::Eur,
            ..Settings::default()
        };
        custom.save(&paths).unwrap();

        let mut out = Vec::new();
        handle_config_command(&paths, &custom, ConfigCommands::Init { force: false }, &mut out)
            .unwrap();
        assert_eq!(Settings::load_or_default(&paths).unwrap().currency, Currency::Eur);
    }

    #[test]
    fn test_set_currency_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        let mut out = Vec::new();

        handle_config_command(
            &paths,
            &Settings::default(),
            ConfigCommands::SetCurrency {
                currency: Currency::Ngn,
            },
            &mut out,
        )
        .unwrap();

        assert_eq!(Settings::load_or_default(&paths).unwrap().currency, Currency::Ngn);
    }
}
