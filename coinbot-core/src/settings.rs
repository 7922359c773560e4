// File: src/settings.rs

use std::time::Duration;
use tracing::{debug, warn};

use coinbot_common::models::{CookieOptions, DailyTaskOptions};
use crate::Error;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Everything a run needs, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub task: DailyTaskOptions,
    pub cookie: CookieOptions,
    pub http_timeout: Duration,
}

impl Settings {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        match dotenv::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(e) => debug!("no .env loaded: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = DailyTaskOptions::default();

        let task = DailyTaskOptions {
            number_of_coins: match get("COINBOT_NUMBER_OF_COINS") {
                Some(v) => parse_u32("COINBOT_NUMBER_OF_COINS", &v)?,
                None => defaults.number_of_coins,
            },
            max_coins_per_day: match get("COINBOT_MAX_COINS_PER_DAY") {
                Some(v) => parse_u32("COINBOT_MAX_COINS_PER_DAY", &v)?,
                None => defaults.max_coins_per_day,
            },
            support_up_ids: match get("COINBOT_SUPPORT_UP_IDS") {
                Some(v) => parse_id_list("COINBOT_SUPPORT_UP_IDS", &v)?,
                None => defaults.support_up_ids,
            },
            select_like: match get("COINBOT_SELECT_LIKE") {
                Some(v) => parse_bool("COINBOT_SELECT_LIKE", &v)?,
                None => defaults.select_like,
            },
            region_ids: match get("COINBOT_REGION_IDS") {
                Some(v) => parse_id_list("COINBOT_REGION_IDS", &v)?,
                None => defaults.region_ids,
            },
        };
        if task.number_of_coins > task.max_coins_per_day {
            warn!(
                "COINBOT_NUMBER_OF_COINS={} is above the daily maximum, {} will be used",
                task.number_of_coins, task.max_coins_per_day
            );
        }

        let cookie = match get("BILI_COOKIE") {
            Some(raw) => CookieOptions::from_cookie_str(&raw)?,
            None => {
                let cookie = CookieOptions {
                    user_id: match get("BILI_USER_ID") {
                        Some(v) => v.parse::<u64>().map_err(|e| {
                            Error::Config(format!("BILI_USER_ID='{v}' is not a number: {e}"))
                        })?,
                        None => 0,
                    },
                    sess_data: get("BILI_SESSDATA").unwrap_or_default(),
                    bili_jct: get("BILI_JCT").unwrap_or_default(),
                };
                cookie.validate()?;
                cookie
            }
        };

        let timeout_secs = match get("COINBOT_HTTP_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|e| {
                Error::Config(format!("COINBOT_HTTP_TIMEOUT_SECS='{v}': {e}"))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            task,
            cookie,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32, Error> {
    value
        .parse()
        .map_err(|e| Error::Config(format!("{key}='{value}' is not a non-negative integer: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, Error> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{key}='{value}' is not a boolean"))),
    }
}

/// Comma separated ids; blanks between commas are ignored.
pub fn parse_id_list<T: std::str::FromStr>(key: &str, value: &str) -> Result<Vec<T>, Error>
where
    T::Err: std::fmt::Display,
{
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| Error::Config(format!("{key}: '{s}' is not a valid id: {e}")))
        })
        .collect()
}
