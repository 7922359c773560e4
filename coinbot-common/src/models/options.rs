use serde::{Deserialize, Serialize};
use crate::error::Error;
use super::video::CreatorId;

/// Coins beyond this number per day earn no experience on the platform.
pub const MAX_DONATE_COINS_PER_DAY: u32 = 5;

/// Main partitions used as the last-resort ranking pool.
pub const DEFAULT_REGION_IDS: [u32; 15] = [
    1, 3, 4, 5, 36, 119, 129, 155, 160, 181, 188, 211, 217, 223, 234,
];

/// Options driving the daily coin task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTaskOptions {
    /// Coins the operator wants donated per day.
    pub number_of_coins: u32,
    /// Upper bound applied on top of `number_of_coins`.
    pub max_coins_per_day: u32,
    /// Creators to prefer when choosing videos. May be empty.
    pub support_up_ids: Vec<CreatorId>,
    /// Also like the video when donating.
    pub select_like: bool,
    pub region_ids: Vec<u32>,
}

impl Default for DailyTaskOptions {
    fn default() -> Self {
        Self {
            number_of_coins: MAX_DONATE_COINS_PER_DAY,
            max_coins_per_day: MAX_DONATE_COINS_PER_DAY,
            support_up_ids: Vec::new(),
            select_like: false,
            region_ids: DEFAULT_REGION_IDS.to_vec(),
        }
    }
}

/// The three browser cookies the task needs.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CookieOptions {
    /// `DedeUserID`
    pub user_id: u64,
    /// `SESSDATA`
    pub sess_data: String,
    /// `bili_jct`, doubles as the csrf token on write endpoints.
    pub bili_jct: String,
}

impl std::fmt::Debug for CookieOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieOptions")
            .field("user_id", &self.user_id)
            .field("sess_data", &"***")
            .field("bili_jct", &"***")
            .finish()
    }
}

impl CookieOptions {
    /// Parses a raw `Cookie` header value as copied from a browser, e.g.
    /// `DedeUserID=1; SESSDATA=abc; bili_jct=def; other=ignored`.
    pub fn from_cookie_str(raw: &str) -> Result<Self, Error> {
        let mut user_id = None;
        let mut sess_data = None;
        let mut bili_jct = None;

        for pair in raw.split(';') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "DedeUserID" => user_id = Some(value.parse::<u64>()?),
                "SESSDATA" => sess_data = Some(value.to_string()),
                "bili_jct" => bili_jct = Some(value.to_string()),
                _ => {}
            }
        }

        let opts = Self {
            user_id: user_id.ok_or_else(|| Error::Config("cookie is missing DedeUserID".into()))?,
            sess_data: sess_data.ok_or_else(|| Error::Config("cookie is missing SESSDATA".into()))?,
            bili_jct: bili_jct.ok_or_else(|| Error::Config("cookie is missing bili_jct".into()))?,
        };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.user_id == 0 {
            return Err(Error::Config("DedeUserID must be set".into()));
        }
        if self.sess_data.is_empty() {
            return Err(Error::Config("SESSDATA must be set".into()));
        }
        if self.bili_jct.is_empty() {
            return Err(Error::Config("bili_jct must be set".into()));
        }
        Ok(())
    }

    /// Renders the cookies back into a `Cookie` header value.
    pub fn to_header_value(&self) -> String {
        format!(
            "DedeUserID={}; SESSDATA={}; bili_jct={}",
            self.user_id, self.sess_data, self.bili_jct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_cookie_string() {
        let c = CookieOptions::from_cookie_str(
            "buvid3=xyz; DedeUserID=1234; SESSDATA=abc%2C123; bili_jct=deadbeef; sid=1",
        )
        .unwrap();
        assert_eq!(c.user_id, 1234);
        assert_eq!(c.sess_data, "abc%2C123");
        assert_eq!(c.bili_jct, "deadbeef");
    }

    #[test]
    fn missing_csrf_is_a_config_error() {
        let err = CookieOptions::from_cookie_str("DedeUserID=1; SESSDATA=abc").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn non_numeric_user_id_is_rejected() {
        let err = CookieOptions::from_cookie_str("DedeUserID=abc; SESSDATA=a; bili_jct=b").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let c = CookieOptions {
            user_id: 9,
            sess_data: "secret".into(),
            bili_jct: "token".into(),
        };
        let printed = format!("{:?}", c);
        assert!(!printed.contains("secret"));
        assert!(!printed.contains("token"));
    }

    #[test]
    fn defaults_cap_at_platform_maximum() {
        let opts = DailyTaskOptions::default();
        assert_eq!(opts.number_of_coins, MAX_DONATE_COINS_PER_DAY);
        assert_eq!(opts.max_coins_per_day, MAX_DONATE_COINS_PER_DAY);
        assert!(opts.support_up_ids.is_empty());
        assert!(!opts.region_ids.is_empty());
    }
}
