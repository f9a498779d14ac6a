use crate::engine::{DEFAULT_ACTIVITY_LIMIT, MAX_ELIGIBLE_MATCHES};
use dotenv::dotenv;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_pool_size: usize,
    pub server_host: String,
    pub server_port: u16,
    pub eligible_match_limit: usize,
    pub activity_limit: usize,
    pub log_config_path: String,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value
            .parse::<T>()
            .unwrap_or_else(|_| panic!("Failed to parse {key}")),
        _ => default,
    }
}

impl Config {
    pub fn init() -> Config {
        dotenv().ok();
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let database_pool_size = env_or("DATABASE_POOL_SIZE", 16);
        let server_host = env_or("SERVER_HOST", "127.0.0.1".to_string());
        let server_port = env_or("SERVER_PORT", 8080);
        let eligible_match_limit = env_or("ELIGIBLE_MATCH_LIMIT", MAX_ELIGIBLE_MATCHES);
        let activity_limit = env_or("ACTIVITY_LIMIT", DEFAULT_ACTIVITY_LIMIT);
        let log_config_path = env_or("LOG_CONFIG_PATH", "./log-config.yml".to_string());

        Config {
            database_url,
            database_pool_size,
            server_host,
            server_port,
            eligible_match_limit,
            activity_limit,
            log_config_path,
        }
    }
}
