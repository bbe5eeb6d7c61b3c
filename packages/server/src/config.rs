use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign admin session cookies.
    pub jwt_secret: String,
    /// Lifetime of an admin session in seconds. Default: one day.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,
    /// Mark the session cookie `Secure`. Enable behind HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_session_ttl_secs() -> i64 {
    60 * 60 * 24
}

/// An admin account created on startup if no user with the same email exists.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub admins: Vec<AdminSeed>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.session_ttl_secs", default_session_ttl_secs())?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., HACKREG__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("HACKREG").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
