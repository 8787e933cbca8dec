//! HTTP access to the JMA region catalog and forecast endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tenki_core::{JmaConfig, REGION_CODE_PLACEHOLDER};
use tracing::instrument;

use crate::catalog::{AreaDocument, RegionCatalog};
use crate::error::JmaError;
use crate::types::{RawForecastDocument, RegionCode};

const USER_AGENT: &str = concat!("tenki/", env!("CARGO_PKG_VERSION"));

/// Where the catalog and forecasts are fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JmaEndpoints {
    pub area_url: String,
    /// `{code}` is replaced with the url-encoded region code
    pub forecast_url_template: String,
}

impl From<&JmaConfig> for JmaEndpoints {
    fn from(config: &JmaConfig) -> Self {
        Self {
            area_url: config.area_url.clone(),
            forecast_url_template: config.forecast_url_template.clone(),
        }
    }
}

impl JmaEndpoints {
    pub fn forecast_url(&self, code: &RegionCode) -> String {
        self.forecast_url_template
            .replace(REGION_CODE_PLACEHOLDER, &urlencoding::encode(code.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct JmaClient {
    client: reqwest::Client,
    endpoints: JmaEndpoints,
}

impl JmaClient {
    /// Build a client. Without `timeout` the HTTP client's default applies.
    pub fn new(endpoints: JmaEndpoints, timeout: Option<Duration>) -> Result<Self, JmaError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoints,
        })
    }

    /// Fetch the area catalog and flatten its offices into selectable regions.
    #[instrument(skip(self), level = "info")]
    pub async fn load_regions(&self) -> Result<RegionCatalog, JmaError> {
        let doc: AreaDocument = self.get_json(&self.endpoints.area_url).await?;
        let catalog = RegionCatalog::from_offices(&doc.offices);
        tracing::info!("Loaded {} forecast regions", catalog.len());
        Ok(catalog)
    }

    /// Fetch the raw forecast document for one region.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, code: &RegionCode) -> Result<RawForecastDocument, JmaError> {
        let url = self.endpoints.forecast_url(code);
        self.get_json(&url).await
    }

    /// GET `url` and decode the body, separating HTTP failures from bad payloads.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, JmaError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JmaError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| JmaError::Decode(format!("{} from {}", e, url)))
    }
}
