use super::gateway::{DatasetGateway, DatasetQuery, TransportError};
use crate::config::DatasetConfig;
use tracing::debug;

const USER_AGENT: &str = concat!("bnb-audit/", env!("CARGO_PKG_VERSION"));
const APP_TOKEN_HEADER: &str = "X-App-Token";
const ERROR_BODY_EXCERPT: usize = 200;

/// Socrata Open Data API client shared by both record sources.
pub struct SodaClient {
    http: reqwest::Client,
    app_token: Option<String>,
}

impl SodaClient {
    pub fn new(config: &DatasetConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            http,
            app_token: config.app_token.clone(),
        })
    }
}

impl std::fmt::Debug for SodaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SodaClient")
            .field("authenticated", &self.app_token.is_some())
            .finish_non_exhaustive()
    }
}

impl DatasetGateway for SodaClient {
    async fn fetch(&self, endpoint: &str, query: &DatasetQuery) -> Result<String, TransportError> {
        let params = query.to_params();
        debug!(%endpoint, ?params, "querying dataset");

        let mut request = self.http.get(endpoint).query(&params);
        if let Some(token) = &self.app_token {
            request = request.header(APP_TOKEN_HEADER, token);
        }

        let request_error = |source| TransportError::Request {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        Ok(body)
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(ERROR_BODY_EXCERPT) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
