use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use shelf_config::{Config, CredentialStore, PathManager};

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_create(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    match cmd {
        ConfigCommands::Show => {
            show_config(&config, &cred_store, &path_manager, output);
            Ok(())
        }
        ConfigCommands::Api { base_url, timeout_secs, default_type } => {
            if base_url.is_none() && timeout_secs.is_none() && default_type.is_none() {
                output.warn("No option given. Use --base-url, --timeout-secs or --default-type");
                return Ok(());
            }
            if let Some(base_url) = base_url {
                config.api.base_url = base_url;
            }
            if let Some(timeout_secs) = timeout_secs {
                config.api.timeout_secs = timeout_secs;
            }
            if let Some(default_type) = default_type {
                config.display.default_type = default_type;
            }
            config.validate()
                .map_err(|e| eyre!("Configuration validation failed: {}", e))?;
            config.save_to_file(&config_file)
                .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
            output.success(format!("API configuration saved to {}", config_file.display()));
            Ok(())
        }
        ConfigCommands::Login { user_id, token, expires } => {
            let expires_at = expires
                .map(|s| parse_expiry(&s))
                .transpose()?;
            if user_id.trim().is_empty() || token.trim().is_empty() {
                return Err(eyre!("--user-id and --token cannot be empty"));
            }
            cred_store.set_session(user_id.clone(), token, expires_at);
            cred_store.save()
                .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;
            output.success(format!("Logged in as {}", user_id));
            Ok(())
        }
        ConfigCommands::Logout => {
            cred_store.clear_session();
            cred_store.save()
                .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;
            output.success("Session cleared");
            Ok(())
        }
    }
}

fn parse_expiry(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| eyre!("Invalid --expires '{}': {} (expected RFC 3339, e.g. 2026-12-31T00:00:00Z)", value, e))
}

fn mask(secret: &str) -> String {
    if secret.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{}", tail)
}

fn show_config(config: &Config, cred_store: &CredentialStore, path_manager: &PathManager, output: &Output) {
    let session = cred_store.session();

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Shelf Configuration").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new(path_manager.config_file().display().to_string()),
            ]);
            table.add_row(vec![Cell::new("API base URL"), Cell::new(&config.api.base_url)]);
            table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", config.api.timeout_secs))]);
            table.add_row(vec![Cell::new("Default type"), Cell::new(config.display.default_type)]);
            table.add_row(vec![
                Cell::new("Show untracked"),
                Cell::new(if config.display.show_untracked { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            let session_display = match &session {
                Some(session) => format!("{} (token {})", session.user_id, mask(&session.token)),
                None => "not logged in".yellow().to_string(),
            };
            table.add_row(vec![Cell::new("Session"), Cell::new(session_display)]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            output.info(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "config",
                "configFile": path_manager.config_file().display().to_string(),
                "api": {
                    "baseUrl": config.api.base_url,
                    "timeoutSecs": config.api.timeout_secs,
                },
                "display": {
                    "defaultType": config.display.default_type,
                    "showUntracked": config.display.show_untracked,
                },
                "session": session.map(|s| json!({
                    "userId": s.user_id,
                    "token": mask(&s.token),
                    "expires": cred_store.get_session_expires().map(|dt| dt.to_rfc3339()),
                })),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_last_four() {
        assert_eq!(mask("abcdefgh"), "****efgh");
        assert_eq!(mask("abc"), "****");
    }

    #[test]
    fn test_parse_expiry() {
        let parsed = parse_expiry("2026-12-31T00:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-12-30T22:00:00+00:00");
        assert!(parse_expiry("next week").is_err());
    }
}
