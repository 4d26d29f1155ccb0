use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
    redirect, StatusCode,
};
use std::error::Error;

use crate::config::ScrapeConfig;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{}", get_error(.0))]
    Request(#[from] reqwest::Error),

    #[error("{status} for url: {url}")]
    Status { status: StatusCode, url: String },

    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

/// Innermost cause is usually the readable one (dns, refused connection...)
fn get_error(error: &reqwest::Error) -> String {
    match error.source() {
        Some(e) => match e.source() {
            Some(e) => format!("{error}: {e}"),
            None => format!("{error}: {e}"),
        },
        None => error.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    /// Url after redirects
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

/// Blocking http client shared by all resolvers of one batch.
///
/// One attempt per url, no retries.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    browser_user_agent: String,
}

impl Transport {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|err| FetchError::Client(get_error(&err)))?;

        Ok(Self {
            client,
            browser_user_agent: config.browser_user_agent.clone(),
        })
    }

    /// Headers that make the request look like it came from a desktop browser
    pub fn browser_headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.browser_user_agent)?);
        Ok(headers)
    }

    pub fn fetch(&self, url: &str, headers: Option<HeaderMap>) -> Result<Page, FetchError> {
        let url_parsed = reqwest::Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let host = url_parsed.host_str().unwrap_or_default();
        let iden = format!("{host}{}", url_parsed.path());
        log::debug!("{iden}: requesting");

        let mut request = self.client.get(url_parsed.clone());
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        let resp = request.send().map_err(|err| {
            log::debug!("{iden}: {}", get_error(&err));
            FetchError::Request(err)
        })?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            log::debug!("{iden}: {status}");
            return Err(FetchError::Status {
                status,
                url: resp.url().to_string(),
            });
        }

        let final_url = resp.url().to_string();
        let body = resp.text()?;

        Ok(Page {
            url: final_url,
            status,
            body,
        })
    }
}
