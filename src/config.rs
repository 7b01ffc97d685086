use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_auth_token: Option<String>,
    pub http_timeout_secs: u64,
    pub student_id: Option<Uuid>,
    pub counselor_id: Option<Uuid>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            api_base_url: get_env("API_BASE_URL")?,
            api_auth_token: env::var("API_AUTH_TOKEN").ok(),
            http_timeout_secs: get_env_parse("HTTP_TIMEOUT_SECS")?,
            student_id: get_env_opt_parse("STUDENT_ID")?,
            counselor_id: get_env_opt_parse("COUNSELOR_ID")?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_opt_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
