use crate::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub base_url: Option<String>,
    pub patch: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var("DOTA_COUNTER_DATA") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .ok_or_else(|| {
                    AppError::ConfigError(
                        "Cannot resolve home directory; set DOTA_COUNTER_DATA".to_string(),
                    )
                })?
                .join(".dota-counter")
                .join("content"),
        };

        let base_url = env::var("DOTA_COUNTER_BASE_URL").ok();
        let patch = env::var("DOTA_COUNTER_PATCH").ok();

        Ok(Config {
            data_dir,
            base_url,
            patch,
        })
    }
}
