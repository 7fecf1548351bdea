//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and overridden by `SPLITLEDGER__SECTION__KEY`
//! environment variables.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level for the crates of this workspace.
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Ledger {
    pub current_user_name: String,
    pub current_user_avatar: String,
    pub seed_sample_data: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub ledger: Ledger,
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("app.level", "info")?
        .set_default("server.bind", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("ledger.current_user_name", "You")?
        .set_default("ledger.current_user_avatar", "lorelei")?
        .set_default("ledger.seed_sample_data", false)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("SPLITLEDGER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings: Settings = defaults().unwrap().build().unwrap().try_deserialize().unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.address(), "127.0.0.1:3000");
        assert_eq!(settings.ledger.current_user_name, "You");
        assert!(!settings.ledger.seed_sample_data);
    }

    #[test]
    fn file_overrides_defaults() {
        let toml = r#"
            [server]
            port = 8080

            [ledger]
            seed_sample_data = true
        "#;
        let settings: Settings = defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.address(), "127.0.0.1:8080");
        assert!(settings.ledger.seed_sample_data);
        assert_eq!(settings.ledger.current_user_avatar, "lorelei");
    }
}
