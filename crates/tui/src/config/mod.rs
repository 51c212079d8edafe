use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/carteira.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub quotes_url: String,
    pub username: String,
    pub quote_pairs: Vec<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            quotes_url: "https://economia.awesomeapi.com.br".to_string(),
            username: String::new(),
            quote_pairs: vec![
                "USD-BRL".to_string(),
                "EUR-BRL".to_string(),
                "BTC-BRL".to_string(),
            ],
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "carteira_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override backend base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override exchange-rate API base URL.
    #[arg(long)]
    quotes_url: Option<String>,
    /// Override login email prefill (password is never read from CLI).
    #[arg(long)]
    username: Option<String>,
    /// Override log level filter (trace/debug/info/warn/error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CARTEIRA_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(quotes_url) = args.quotes_url {
        settings.quotes_url = quotes_url;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_public_quote_pairs() {
        let config = AppConfig::default();
        assert_eq!(config.quote_pairs, ["USD-BRL", "EUR-BRL", "BTC-BRL"]);
        assert!(config.quotes_url.starts_with("https://"));
        assert_eq!(config.log_level, "info");
    }
}
