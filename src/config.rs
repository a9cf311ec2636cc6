use std::net::IpAddr;

use jsonwebtoken::Algorithm;

/// One year.
const MAX_ACCESS_TOKEN_MINUTES: i64 = 525_600;
/// Ten years.
const MAX_REFRESH_TOKEN_DAYS: i64 = 3_650;

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub database_url: String,
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
    pub allowed_origins: Vec<String>,
    pub frontend_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let app_name = or("APP_NAME", "Sparq Dashboard");
        let database_url = required("DATABASE_URL")?;
        let secret_key = required("SECRET_KEY")?;

        let algorithm = parse_algorithm(&or("ALGORITHM", "HS256"))?;

        let access_token_expire_minutes = parse_lifetime(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            &or("ACCESS_TOKEN_EXPIRE_MINUTES", "30"),
            MAX_ACCESS_TOKEN_MINUTES,
        )?;
        let refresh_token_expire_days = parse_lifetime(
            "REFRESH_TOKEN_EXPIRE_DAYS",
            &or("REFRESH_TOKEN_EXPIRE_DAYS", "7"),
            MAX_REFRESH_TOKEN_DAYS,
        )?;

        let allowed_origins: Vec<String> =
            or("ALLOWED_ORIGINS", "http://localhost:3000,http://localhost:5173")
                .split(',')
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .collect();

        let frontend_url = or("FRONTEND_URL", "http://localhost:5173")
            .trim_end_matches('/')
            .to_string();

        let host: IpAddr = or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = or("PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let log_level = or("LOG_LEVEL", "info");

        Ok(Config {
            app_name,
            database_url,
            secret_key,
            algorithm,
            access_token_expire_minutes,
            refresh_token_expire_days,
            allowed_origins,
            frontend_url,
            host,
            port,
            log_level,
        })
    }

    /// Origins accepted by the CORS layer: the configured list plus the frontend itself.
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = self.allowed_origins.clone();
        if !origins.contains(&self.frontend_url) {
            origins.push(self.frontend_url.clone());
        }
        origins
    }
}

fn parse_algorithm(value: &str) -> Result<Algorithm, String> {
    let algorithm: Algorithm = value
        .trim()
        .parse()
        .map_err(|e| format!("Invalid ALGORITHM '{value}': {e}"))?;

    // Only symmetric algorithms can sign with a shared secret.
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(format!(
            "Unsupported ALGORITHM {other:?}: SECRET_KEY requires HS256, HS384 or HS512"
        )),
    }
}

fn parse_lifetime(key: &str, value: &str, max: i64) -> Result<i64, String> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|e| format!("Invalid {key}: {e}"))?;
    if !(1..=max).contains(&parsed) {
        return Err(format!("Invalid {key}: must be between 1 and {max}"));
    }
    Ok(parsed)
}
