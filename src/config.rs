use std::env;

use crate::errors::LeagueError;

const DEFAULT_BIND_URL: &str = "127.0.0.1";
const DEFAULT_BIND_PORT: &str = "8080";
const DEFAULT_DB_EXECUTORS: usize = 3;
const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_url: String,
    pub bind_port: String,
    pub db_executors: usize,
}

impl Config {
    /// Reads the server settings from the environment, after loading `.env` if present.
    pub fn from_env() -> Result<Config, LeagueError> {
        dotenv::dotenv().ok();

        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, LeagueError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| LeagueError::Validation("DATABASE_URL must be set".to_owned()))?;

        let db_executors = match lookup("DB_EXECUTORS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(LeagueError::Validation(format!(
                        "DB_EXECUTORS must be a positive number, got {:?}",
                        raw
                    )))
                }
            },
            None => DEFAULT_DB_EXECUTORS,
        };
        // every connection to :memory: opens a database of its own
        let db_executors = if database_url == IN_MEMORY {
            if db_executors > 1 {
                warn!("{} is private to one connection, using a single executor", IN_MEMORY);
            }
            1
        } else {
            db_executors
        };

        Ok(Config {
            database_url,
            bind_url: lookup("BIND_URL").unwrap_or_else(|| DEFAULT_BIND_URL.to_owned()),
            bind_port: lookup("BIND_PORT").unwrap_or_else(|| DEFAULT_BIND_PORT.to_owned()),
            db_executors,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_url, self.bind_port)
    }
}
