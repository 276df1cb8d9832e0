use super::gateway::{DatasetGateway, DatasetQuery, TransportError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a JSON array of records: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
enum Canned {
    Rows(Vec<Value>),
    Body(String),
    Failure { status: u16, body: String },
}

/// Serves dataset responses from memory: saved registry exports for offline
/// runs, or canned payloads in tests. Honors the query's row cap and keeps a
/// log of the queries it received.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<(String, DatasetQuery)>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, endpoint: impl Into<String>, rows: Vec<Value>) -> Self {
        self.responses.insert(endpoint.into(), Canned::Rows(rows));
        self
    }

    /// Serves `body` verbatim, ignoring the row cap.
    pub fn with_body(mut self, endpoint: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(endpoint.into(), Canned::Body(body.into()));
        self
    }

    pub fn with_failure(
        mut self,
        endpoint: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.responses.insert(
            endpoint.into(),
            Canned::Failure {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Loads a saved JSON export (an array of records) for `endpoint`.
    pub fn with_fixture_file(
        self,
        endpoint: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<Value> =
            serde_json::from_str(&raw).map_err(|source| FixtureError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.with_rows(endpoint, rows))
    }

    pub fn requests(&self) -> Vec<(String, DatasetQuery)> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, endpoint: &str, query: &DatasetQuery) {
        let mut guard = match self.requests.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((endpoint.to_string(), query.clone()));
    }

    fn respond(&self, endpoint: &str, query: &DatasetQuery) -> Result<String, TransportError> {
        match self.responses.get(endpoint) {
            Some(Canned::Rows(rows)) => {
                let page: Vec<&Value> = rows.iter().take(query.probe_limit()).collect();
                serde_json::to_string(&page).map_err(|err| TransportError::Status {
                    endpoint: endpoint.to_string(),
                    status: 500,
                    body: err.to_string(),
                })
            }
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Failure { status, body }) => Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: *status,
                body: body.clone(),
            }),
            None => Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: 404,
                body: "no dataset registered for endpoint".to_string(),
            }),
        }
    }
}

impl DatasetGateway for InMemoryGateway {
    async fn fetch(&self, endpoint: &str, query: &DatasetQuery) -> Result<String, TransportError> {
        self.record(endpoint, query);
        self.respond(endpoint, query)
    }
}
