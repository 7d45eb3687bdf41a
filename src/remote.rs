use crate::errors::RemoteError;
use crate::models::ChallengeData;
use std::time::Duration;

/// Read-only challenge document published at a fixed URL.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<ChallengeData, RemoteError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }
        Ok(response.json::<ChallengeData>().await?)
    }
}
