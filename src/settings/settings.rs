use anyhow::{Result, anyhow, bail};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub auth: Auth,
    pub cache: Cache,
    pub document: Document,
    pub http: Http,
    pub log: Log,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub backend: String, // "fake"
}

#[derive(Debug, Deserialize)]
pub struct Cache {
    pub backend: String, // "memory" or "redis"
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub probe_interval_secs: u64,
}

impl Cache {
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!("redis://:{}@{}:{}", password, self.host, self.port),
            None => format!("redis://{}:{}", self.host, self.port),
        }
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct Document {
    pub backend: String, // "memory" or "mysql"
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    pub probe_interval_secs: u64,
}

impl Document {
    pub fn dsn(&self) -> String {
        let credentials = match &self.password {
            Some(password) => format!("{}:{}", self.user, password),
            None => self.user.clone(),
        };
        format!(
            "mysql://{}@{}:{}/{}",
            credentials, self.host, self.port, self.database
        )
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

/// Environment variables that override a settings key when set.
const ENV_OVERRIDES: [(&str, &str); 8] = [
    ("REDIS_HOST", "cache.host"),
    ("REDIS_PORT", "cache.port"),
    ("REDIS_PASSWORD", "cache.password"),
    ("DB_HOST", "document.host"),
    ("DB_PORT", "document.port"),
    ("DB_DATABASE", "document.database"),
    ("DB_USER", "document.user"),
    ("DB_PASSWORD", "document.password"),
];

/// Load settings from `path` (or the build's default file), on top of
/// built-in defaults, with environment overrides applied last.
///
/// An explicit `path` must exist; the default file is optional.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let file = match path {
        Some(path) => File::with_name(path).required(true),
        None => File::with_name(SETTINGS_PATH).required(false),
    };
    let builder = defaults()?.add_source(file);
    build(builder, |name| std::env::var(name).ok())
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    let builder = Config::builder()
        .set_default("auth.backend", "fake")?
        .set_default("cache.backend", "redis")?
        .set_default("cache.host", "localhost")?
        .set_default("cache.port", 6379)?
        .set_default("cache.probe_interval_secs", 5)?
        .set_default("document.backend", "mysql")?
        .set_default("document.host", "localhost")?
        .set_default("document.port", 3306)?
        .set_default("document.database", "files_manager")?
        .set_default("document.user", "root")?
        .set_default("document.probe_interval_secs", 5)?
        .set_default("http.address", "0.0.0.0:5000")?
        .set_default("log.filter", "info")?;
    Ok(builder)
}

fn build(
    mut builder: ConfigBuilder<DefaultState>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    for (variable, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(key, env(variable))?;
    }

    let settings: Settings = builder
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    // Probe intervals also bound each probe and the MySQL acquire timeout.
    if settings.cache.probe_interval_secs == 0 {
        bail!("cache.probe_interval_secs must be at least 1");
    }
    if settings.document.probe_interval_secs == 0 {
        bail!("document.probe_interval_secs must be at least 1");
    }

    Ok(settings)
}
