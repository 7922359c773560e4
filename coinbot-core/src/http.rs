//! HTTP client abstraction layer for the platform client
//!
//! Every request the task makes goes through [`HttpClient`], so the Bilibili
//! client can be exercised against canned JSON in tests without touching the
//! network. The default implementation wraps reqwest and carries the session
//! cookies, a browser user agent and the request timeout.
//!
//! # Example Usage:
//! ``
//! use coinbot_core::http::{HttpClient, DefaultHttpClient};
//!
//! let http = DefaultHttpClient::new(&cookie, Duration::from_secs(15))?;
//! let body = http.get(url, vec![("aid".into(), "170001".into())]).await?;
//! ``

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER, USER_AGENT};
use tracing::debug;

use coinbot_common::models::CookieOptions;
use crate::Error;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
const REFERER_URL: &str = "https://www.bilibili.com/";

/// Query string or form body, as ordered key/value pairs.
pub type Params = Vec<(String, String)>;

/// A generic trait for making HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, query: Params) -> Result<String, Error>;
    async fn post_form(&self, url: &str, form: Params) -> Result<String, Error>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn get(&self, url: &str, query: Params) -> Result<String, Error> {
        (**self).get(url, query).await
    }

    async fn post_form(&self, url: &str, form: Params) -> Result<String, Error> {
        (**self).post_form(url, form).await
    }
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new(cookie: &CookieOptions, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let cookie_value = HeaderValue::from_str(&cookie.to_header_value())
            .map_err(|e| Error::Config(format!("cookie contains invalid characters: {e}")))?;
        headers.insert(COOKIE, cookie_value);
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn get(&self, url: &str, query: Params) -> Result<String, Error> {
        debug!("GET {} {:?}", url, query);
        let response = self.client
            .get(url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(response)
    }

    async fn post_form(&self, url: &str, form: Params) -> Result<String, Error> {
        debug!("POST {}", url);
        let response = self.client
            .post(url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(response)
    }
}
