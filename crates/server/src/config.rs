use std::env;

use puzzle_trainer::TrainerConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub trainer: TrainerConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = TrainerConfig::default();
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            trainer: TrainerConfig {
                time_limit_secs: env::var("PUZZLE_TIME_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.time_limit_secs),
                auto_advance: env::var("AUTO_ADVANCE")
                    .ok()
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(defaults.auto_advance),
            },
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
