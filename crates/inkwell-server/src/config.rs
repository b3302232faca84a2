use anyhow::{Context, bail};
use tracing::warn;

use inkwell_core::TokenService;

/// Runtime configuration, read once at startup from the environment.
pub struct Config {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub jwt_secret: String,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let production = std::env::var("INKWELL_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let jwt_secret = match std::env::var("INKWELL_JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if production => {
                bail!("INKWELL_JWT_SECRET must be set when INKWELL_ENV=production")
            }
            Err(_) => {
                warn!("INKWELL_JWT_SECRET not set, using an insecure development secret");
                "dev-secret-change-me".into()
            }
        };

        let db_path = std::env::var("INKWELL_DB_PATH").unwrap_or_else(|_| "inkwell.db".into());
        let host = std::env::var("INKWELL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("INKWELL_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .context("INKWELL_PORT must be a port number")?;
        let bcrypt_cost: u32 = std::env::var("INKWELL_BCRYPT_COST")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .context("INKWELL_BCRYPT_COST must be an integer")?;

        Ok(Self {
            db_path,
            host,
            port,
            bcrypt_cost,
            jwt_secret,
            production,
        })
    }

    /// Hour-long tokens in production, day-long in development.
    pub fn token_service(&self) -> TokenService {
        if self.production {
            TokenService::production(&self.jwt_secret)
        } else {
            TokenService::development(&self.jwt_secret)
        }
    }
}
