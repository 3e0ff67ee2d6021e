use std::io::{self, Write};

use vcom_api::config::DEFAULT_API_URL;
use vcom_api::{Config, Result, VcomError};

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("VCOM CLI Configuration");
    println!("======================\n");

    let api_url = prompt(&format!("API URL [{DEFAULT_API_URL}]: "))?;

    let api_key = prompt("Enter your API key: ")?;
    if api_key.is_empty() {
        return Err(VcomError::MissingApiKey);
    }

    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;
    if username.is_empty() || password.is_empty() {
        return Err(VcomError::MissingCredentials);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| VcomError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(
        &config_path,
        render_config(&api_url, &api_key, &username, &password),
    )
    .map_err(|e| VcomError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'vcom' commands!");

    Ok(())
}

fn render_config(api_url: &str, api_key: &str, username: &str, password: &str) -> String {
    let mut table = toml::Table::new();
    if !api_url.is_empty() {
        table.insert("api_url".into(), api_url.into());
    }
    table.insert("api_key".into(), api_key.into());
    table.insert("username".into(), username.into());
    table.insert("password".into(), password.into());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, render_config("", "k\"ey", "alice", "pa ss")).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.api_url.is_none());
        assert_eq!(config.api_key.as_deref(), Some("k\"ey"));
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert_eq!(config.password.as_deref(), Some("pa ss"));
    }
}
