use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// 32-byte AES-256 key for card numbers, decoded from 64 hex chars.
    pub card_encryption_key: Vec<u8>,
    pub run_migrations: bool,
    pub port: u16,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("Missing env: DATABASE_URL")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("Missing env: JWT_SECRET")?;
        let card_key_hex =
            std::env::var("CARD_ENCRYPTION_KEY").context("Missing env: CARD_ENCRYPTION_KEY")?;
        let run_migrations_str =
            std::env::var("RUN_MIGRATIONS").context("Missing env: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing env: PORT")?;

        let card_encryption_key =
            hex::decode(card_key_hex.trim()).context("CARD_ENCRYPTION_KEY must be hex")?;
        if card_encryption_key.len() != 32 {
            return Err(anyhow!(
                "CARD_ENCRYPTION_KEY must decode to 32 bytes, got {}",
                card_encryption_key.len()
            ));
        }

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{other}'",
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        Ok(Self {
            database_url,
            jwt_secret,
            card_encryption_key,
            run_migrations,
            port,
        })
    }
}
