// File: coinbot-core/src/platforms/bilibili/client.rs

use std::fmt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::http::{HttpClient, Params};
use crate::Error;

pub const API_BASE: &str = "https://api.bilibili.com";

/// Envelope code meaning the session cookie is missing or expired.
pub const CODE_NOT_LOGGED_IN: i64 = -101;

/// The `{ code, message, data }` envelope every endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct BiliApiResponse<T> {
    pub code: i64,
    #[serde(default, alias = "msg")]
    pub message: String,
    pub data: Option<T>,
}

impl<T> BiliApiResponse<T> {
    /// Unwraps `data` of a successful response.
    pub fn into_data(self, endpoint: &str) -> Result<T, Error> {
        match self.code {
            0 => self.data.ok_or_else(|| {
                Error::Platform(format!("{endpoint}: response carried no data"))
            }),
            CODE_NOT_LOGGED_IN => Err(Error::CredentialInvalid(format!(
                "{endpoint}: {} (SESSDATA missing or expired)",
                self.message
            ))),
            code => {
                warn!("{} => code={} message={}", endpoint, code, self.message);
                Err(Error::Api { code, message: self.message })
            }
        }
    }
}

/// Video ids come back as numbers from some endpoints and strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Aid {
    Number(u64),
    Text(String),
}

impl fmt::Display for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aid::Number(n) => write!(f, "{n}"),
            Aid::Text(s) => f.write_str(s),
        }
    }
}

/// Bilibili web API client. Implements every platform capability trait; see
/// the `requests` modules for the individual endpoints.
pub struct BiliClient<H: HttpClient> {
    http: H,
    base_url: String,
    user_id: u64,
}

impl<H: HttpClient> BiliClient<H> {
    /// - `user_id`: `DedeUserID` of the logged-in account, used for owner-scoped queries
    pub fn new(http: H, user_id: u64) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
            user_id,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GETs `path` and returns the unwrapped `data` field.
    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Params,
    ) -> Result<T, Error> {
        let body = self.http.get(&self.url(path), query).await?;
        let parsed: BiliApiResponse<T> = serde_json::from_str(&body)?;
        parsed.into_data(path)
    }

    /// Like [`get_data`](Self::get_data), but a successful response without
    /// `data` yields `None`.
    pub(crate) async fn get_optional_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Params,
    ) -> Result<Option<T>, Error> {
        let body = self.http.get(&self.url(path), query).await?;
        let parsed: BiliApiResponse<T> = serde_json::from_str(&body)?;
        if parsed.code == 0 {
            return Ok(parsed.data);
        }
        parsed.into_data(path).map(Some)
    }

    /// POSTs a form to `path` and returns the raw envelope.
    pub(crate) async fn post_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Params,
    ) -> Result<BiliApiResponse<T>, Error> {
        let body = self.http.post_form(&self.url(path), form).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

pub(crate) fn param(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_logged_in_maps_to_credential_error() {
        let resp: BiliApiResponse<u32> =
            serde_json::from_str(r#"{"code":-101,"message":"账号未登录","data":null}"#).unwrap();
        assert!(resp.into_data("/x/test").unwrap_err().is_credential_error());
    }

    #[test]
    fn other_codes_map_to_api_error() {
        let resp: BiliApiResponse<u32> =
            serde_json::from_str(r#"{"code":-404,"message":"啥都木有"}"#).unwrap();
        match resp.into_data("/x/test") {
            Err(Error::Api { code, message }) => {
                assert_eq!(code, -404);
                assert_eq!(message, "啥都木有");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn aid_accepts_numbers_and_strings() {
        let n: Aid = serde_json::from_str("170001").unwrap();
        let s: Aid = serde_json::from_str("\"170002\"").unwrap();
        assert_eq!(n.to_string(), "170001");
        assert_eq!(s.to_string(), "170002");
    }
}
