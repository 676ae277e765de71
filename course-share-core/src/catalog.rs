//! Remote catalog client.
//!
//! The catalog backend exposes a small read-only HTTP API: the list of
//! calendars, the courses of one calendar, the types of one course and
//! the last sync window. The core only ever consumes these results;
//! retry policy, if any, lives outside.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;

use crate::{CalendarName, CourseId, Error, Result, UpdateInfo};

/// Remote source of calendars and their course lists.
///
/// The browsing layer is written against this trait so it can be
/// exercised with stub sources in tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All known calendars, in the backend's tab order.
    async fn list_calendars(&self) -> Result<Vec<CalendarName>>;

    /// The courses of one calendar.
    async fn list_courses(&self, calendar: &str) -> Result<Vec<CourseId>>;

    /// The types of one course (lecture, lab, ...), when the catalog
    /// tracks them.
    async fn list_course_types(&self, calendar: &str, course: &str) -> Result<Vec<String>>;

    /// When the catalog was last synced from its upstream sources.
    async fn update_info(&self) -> Result<UpdateInfo>;
}

/// Builder for [`CatalogClient`], carrying the JSON default headers.
pub struct CatalogClientBuilder {
    pub client_builder: ClientBuilder,
    base_url: String,
}

impl CatalogClientBuilder {
    /// Start a builder for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client_builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("course-share/", env!("CARGO_PKG_VERSION")))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert("Accept", "application/json".parse().unwrap());
                headers.insert("Content-Type", "application/json".parse().unwrap());
                headers
            });

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client_builder,
            base_url,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.client_builder = self.client_builder.timeout(Duration::from_secs(timeout_secs));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CatalogClient> {
        let client = self
            .client_builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(CatalogClient {
            client,
            base_url: self.base_url,
        })
    }
}

/// HTTP implementation of [`CatalogSource`] against the catalog API.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client with default settings for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        CatalogClientBuilder::new(base_url).build()
    }

    fn handle_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(error)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.handle_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Fetch {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| self.handle_error(e))
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn list_calendars(&self) -> Result<Vec<CalendarName>> {
        self.get_json("/list_calendars").await
    }

    async fn list_courses(&self, calendar: &str) -> Result<Vec<CourseId>> {
        self.get_json(&format!("/courses/{}", calendar)).await
    }

    async fn list_course_types(&self, calendar: &str, course: &str) -> Result<Vec<String>> {
        self.get_json(&format!("/courses/{}/{}", calendar, course))
            .await
    }

    async fn update_info(&self) -> Result<UpdateInfo> {
        self.get_json("/update_info").await
    }
}
