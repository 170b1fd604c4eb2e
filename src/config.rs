use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// How list endpoints report an empty collection.
///
/// The client frontend treats "no documents yet" as an error state, so the
/// default maps an empty result to 404 with an empty data array. Deployments
/// that want a plain empty-success can opt out via `EMPTY_LIST_POLICY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyListPolicy {
    /// Empty collection is reported as 404 with `data: []`.
    NotFound,
    /// Empty collection is a normal 200 with an empty list.
    EmptyOk,
}

#[derive(Debug, Error)]
#[error("unrecognized empty-list policy '{0}' (expected 'not-found' or 'empty-ok')")]
pub struct InvalidEmptyListPolicy(String);

impl FromStr for EmptyListPolicy {
    type Err = InvalidEmptyListPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-found" => Ok(Self::NotFound),
            "empty-ok" => Ok(Self::EmptyOk),
            other => Err(InvalidEmptyListPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Browser origin allowed by CORS (the app ships a Vite dev client).
    pub allowed_origin: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub empty_list_policy: EmptyListPolicy,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub api: ApiConfig,
}

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_NAME: &str = "relief-chain";
const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 3600;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `MONGODB_URI` and `JWT_SECRET` are required; secrets never get
    /// defaults. Everything else falls back to documented defaults.
    pub fn load() -> Result<Self> {
        let uri = env::var("MONGODB_URI").context("MONGODB_URI must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let port = parse_or_default("PORT", DEFAULT_PORT)?;
        let name = env::var("DATABASE_NAME").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());
        let token_expiry_secs = parse_or_default("TOKEN_EXPIRY_SECS", DEFAULT_TOKEN_EXPIRY_SECS)?;
        let allowed_origin =
            env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());
        let empty_list_policy = parse_or_default("EMPTY_LIST_POLICY", EmptyListPolicy::NotFound)?;

        Ok(Self {
            server: ServerConfig {
                port,
                allowed_origin,
            },
            database: DatabaseConfig { uri, name },
            auth: AuthConfig {
                jwt_secret,
                token_expiry_secs,
            },
            api: ApiConfig { empty_list_policy },
        })
    }
}

/// Parse an optional environment variable, keeping the default when unset.
/// A set-but-malformed value is a startup error, not a silent fallback.
fn parse_or_default<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_policy_parses_known_values() {
        assert_eq!(
            "not-found".parse::<EmptyListPolicy>().unwrap(),
            EmptyListPolicy::NotFound
        );
        assert_eq!(
            "empty-ok".parse::<EmptyListPolicy>().unwrap(),
            EmptyListPolicy::EmptyOk
        );
    }

    #[test]
    fn empty_list_policy_rejects_unknown_values() {
        assert!("always-200".parse::<EmptyListPolicy>().is_err());
        assert!("".parse::<EmptyListPolicy>().is_err());
    }

    #[test]
    fn parse_or_default_keeps_default_when_unset() {
        let port = parse_or_default("RELIEF_CHAIN_TEST_UNSET_PORT", DEFAULT_PORT).unwrap();
        assert_eq!(port, DEFAULT_PORT);
    }
}
