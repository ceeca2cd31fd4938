use crate::domain::model::{DataSourceStatus, FilterOptions, ProgramRecord};
use crate::domain::ports::{
    dependent_filter_pairs, ConfigProvider, DirectoryApi, ListQuery, DEPENDENT_FILTERS_PATH,
    FILTERS_PATH, PROGRAMS_PATH, PROGRAM_PATH, STATUS_PATH,
};
use crate::domain::state::FilterSelection;
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// 透過 reqwest 呼叫後端 REST API
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl HttpDirectoryApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // 確保 join 時保留既有路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, seconds: Option<u64>) -> Self {
        self.timeout = seconds.map(Duration::from_secs);
        self
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.api_base_url())?.with_timeout(config.timeout_seconds()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let mut request = self.client.get(url.clone());

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        let response = response.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn list_programs(&self, query: &ListQuery) -> Result<Vec<ProgramRecord>> {
        let mut url = self.endpoint(PROGRAMS_PATH)?;
        url.set_query(Some(&query.encode()));
        self.get_json(url).await
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        let url = self.endpoint(FILTERS_PATH)?;
        self.get_json(url).await
    }

    async fn dependent_filter_options(&self, selection: &FilterSelection) -> Result<FilterOptions> {
        let mut url = self.endpoint(DEPENDENT_FILTERS_PATH)?;
        let pairs = dependent_filter_pairs(selection);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.get_json(url).await
    }

    async fn program(&self, code: &str) -> Result<ProgramRecord> {
        let mut url = self.endpoint(PROGRAM_PATH)?;
        url.path_segments_mut()
            .map_err(|_| DirectoryError::InvalidUrlError {
                url: self.base_url.to_string(),
                reason: "base URL cannot carry path segments".to_string(),
            })?
            .push(code.trim());
        self.get_json(url).await
    }

    async fn status(&self) -> Result<DataSourceStatus> {
        let url = self.endpoint(STATUS_PATH)?;
        self.get_json(url).await
    }
}
