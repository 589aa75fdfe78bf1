use dotenvy::dotenv;
use std::env;

/// Mail transport settings; all three must be present together.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

/// Application configuration loaded from environment variables.
///
/// Both collaborators are optional: without `MAP_TOKEN` the geocoder is
/// unavailable, without the `MAIL_*` trio the mail transport is.
#[derive(Debug, Clone)]
pub struct Config {
    pub map_token: Option<String>,
    pub mail: Option<MailConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env file if present (development)
        let _ = dotenv();

        let mail = match (
            env::var("MAIL_API_URL"),
            env::var("MAIL_API_KEY"),
            env::var("MAIL_FROM"),
        ) {
            (Ok(api_url), Ok(api_key), Ok(from_address)) => Some(MailConfig {
                api_url,
                api_key,
                from_address,
            }),
            _ => None,
        };

        Self {
            map_token: env::var("MAP_TOKEN").ok(),
            mail,
        }
    }
}
