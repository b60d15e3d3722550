use std::io::IsTerminal;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use plexkit_config::{Config, ServerConfig};
use serde_json::json;

use super::prompts;
use super::Settings;
use crate::output::{Output, OutputFormat};

pub fn run_config(cmd: crate::ConfigCommands, settings: Settings, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(&settings, full, output),
        crate::ConfigCommands::AddServer { name, address, port, scheme } => {
            add_server(settings, name, address, port, scheme, output)
        }
        crate::ConfigCommands::SetToken { server, token } => set_token(settings, server, token, output),
    }
}

fn show_config(settings: &Settings, full: bool, output: &Output) -> Result<()> {
    let config_file = settings.paths.config_file();
    let config = &settings.config;

    let display_token = |server: &ServerConfig| match server.resolve_token(Some(&settings.credentials)) {
        Some(token) if full => token,
        Some(token) => mask_string(&token),
        None => "<not set>".to_string(),
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            if !config_file.exists() {
                output.warn(format!("Configuration file not found at: {}", config_file.display()));
                output.info("It is created by 'plexkit config add-server'.");
            } else {
                println!("{} {}", "Config file:".bold(), config_file.display());
            }
            println!();

            let mut servers = Table::new();
            servers.set_header(vec![
                Cell::new("Server").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new("Address").add_attribute(Attribute::Bold),
                Cell::new("Port").add_attribute(Attribute::Bold),
                Cell::new("Scheme").add_attribute(Attribute::Bold),
                Cell::new("Token").add_attribute(Attribute::Bold),
            ]);
            for server in &config.servers {
                servers.add_row(vec![
                    Cell::new(&server.name),
                    Cell::new(&server.address),
                    Cell::new(server.port),
                    Cell::new(&server.scheme),
                    Cell::new(display_token(server)),
                ]);
            }
            servers.load_preset(comfy_table::presets::UTF8_FULL);
            servers.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            if config.servers.is_empty() {
                println!("{}", "Servers: none configured".bright_black());
            } else {
                println!("{}", servers);
            }
            println!();

            let mut settings_table = Table::new();
            settings_table.set_header(vec![
                Cell::new("Settings").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);
            settings_table.add_row(vec![
                Cell::new("HTTP timeout"),
                Cell::new(format!("{} seconds", config.http.timeout_seconds)),
            ]);
            settings_table.add_row(vec![
                Cell::new("Client identifier"),
                Cell::new(&config.http.client_identifier),
            ]);
            settings_table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
            settings_table.add_row(vec![
                Cell::new("JSON logs"),
                Cell::new(if config.logging.json { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            if let Some(file) = &config.logging.file {
                settings_table.add_row(vec![Cell::new("Log file"), Cell::new(file.display())]);
            }
            settings_table.load_preset(comfy_table::presets::UTF8_FULL);
            settings_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", settings_table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let servers: Vec<_> = config
                .servers
                .iter()
                .map(|server| {
                    json!({
                        "name": server.name,
                        "address": server.address,
                        "port": server.port,
                        "scheme": server.scheme,
                        "token": display_token(server),
                    })
                })
                .collect();
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "servers": servers,
                "http": config.http,
                "logging": config.logging,
            }));
        }
    }
    Ok(())
}

fn add_server(
    settings: Settings,
    name: String,
    address: String,
    port: u16,
    scheme: String,
    output: &Output,
) -> Result<()> {
    let Settings { paths, mut config, .. } = settings;

    if let Some(existing) = config.server(&name) {
        let prompt = format!(
            "Server '{}' already points at {}:{}. Replace it?",
            name, existing.address, existing.port
        );
        if std::io::stdin().is_terminal() && !prompts::prompt_yes_no(&prompt, false)? {
            output.info("Keeping the existing server.");
            return Ok(());
        }
    }

    let mut server = ServerConfig::new(&name, &address);
    server.port = port;
    server.scheme = scheme;
    config.upsert_server(server);
    if let Err(e) = config.validate() {
        output.error(format!("Validation error: {}", e));
        return Err(eyre!("Invalid server '{}': {}", name, e));
    }

    save_config(&config, &paths)?;
    output.success(format!("Server '{}' saved ({}:{})", name, address, port));
    if config.servers.first().map(|s| s.name.as_str()) == Some(name.as_str()) {
        output.info("This is the default server.");
    }
    Ok(())
}

fn set_token(settings: Settings, server: String, token: Option<String>, output: &Output) -> Result<()> {
    let Settings { paths, config, mut credentials } = settings;

    if config.server(&server).is_none() {
        return Err(eyre!(
            "Unknown server '{}'. Add it first with 'plexkit config add-server'.",
            server
        ));
    }

    let token = match token {
        Some(token) => token,
        None => prompts::prompt_password(&format!("Token for {}", server))?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(eyre!("Token cannot be empty"));
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    credentials.set_server_token(&server, token);
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Token stored for '{}'", server));
    Ok(())
}

fn save_config(config: &Config, paths: &plexkit_config::PathManager) -> Result<()> {
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    let config_file = paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexkit_config::{CredentialStore, PathManager};

    fn settings(dir: &std::path::Path) -> Settings {
        let paths = PathManager::with_base(dir.to_path_buf());
        let credentials = CredentialStore::new(paths.credentials_file());
        Settings { paths, config: Config::default(), credentials }
    }

    #[test]
    fn test_add_server_rejects_invalid_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = Output::new(OutputFormat::Json, true);

        let err = add_server(settings(dir.path()), "home".into(), "10.0.0.5".into(), 0, "http".into(), &output)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid server 'home'"));
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_add_server_saves_config() {
        let dir = tempfile::tempdir().unwrap();
        let output = Output::new(OutputFormat::Json, true);

        add_server(settings(dir.path()), "home".into(), "10.0.0.5".into(), 32400, "http".into(), &output).unwrap();
        let saved = Config::load_from_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.servers.len(), 1);
        assert_eq!(saved.servers[0].address, "10.0.0.5");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("abcdefgh"), "ab***gh");
    }
}
