use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Shown in the order message header.
    pub store_name: String,
    /// Shared admin secret: plaintext from ADMIN_PASSWORD, or an argon2
    /// hash from ADMIN_PASSWORD_HASH (the hash wins when both are set).
    pub admin_secret: AdminSecret,
    pub admin_session_ttl_hours: i64,
    /// Destination phone for the wa.me deep link, digits only.
    pub whatsapp_number: String,
    pub shipping_flat_fee: i64,
    pub free_shipping_threshold: i64,
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub enum AdminSecret {
    Plain(String),
    Argon2Hash(String),
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let admin_secret = match env::var("ADMIN_PASSWORD_HASH") {
            Ok(hash) => AdminSecret::Argon2Hash(hash),
            Err(_) => AdminSecret::Plain(env::var("ADMIN_PASSWORD")?),
        };

        let whatsapp_number = env::var("WHATSAPP_NUMBER")?;

        Ok(Self {
            database_url,
            host,
            port,
            store_name: env::var("STORE_NAME").unwrap_or_else(|_| "Storefront".to_string()),
            admin_secret,
            admin_session_ttl_hours: env_i64("ADMIN_SESSION_TTL_HOURS", 12),
            whatsapp_number,
            shipping_flat_fee: env_i64("SHIPPING_FLAT_FEE", 100),
            free_shipping_threshold: env_i64("FREE_SHIPPING_THRESHOLD", 1000),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
        })
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}
